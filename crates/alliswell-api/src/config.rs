//! Environment configuration for the relay server.
//!
//! Values are read through a lookup function so tests can supply a map
//! instead of touching the process environment. Blank values count as unset.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use alliswell_completion::bedrock::{self, BedrockConfig};
use alliswell_completion::gemini::{self, GeminiConfig};

pub use alliswell_completion::redact_api_key;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 200;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown completion provider: {0:?} (expected \"gemini\" or \"bedrock\")")]
    UnknownProvider(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionProvider {
    Gemini,
    Bedrock,
}

impl FromStr for CompletionProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "bedrock" => Ok(Self::Bedrock),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Backend-specific settings for the selected provider. `Debug` output
/// shows the API key only in redacted form.
#[derive(Debug, Clone)]
pub enum CompletionSettings {
    Gemini(GeminiConfig),
    Bedrock {
        region: String,
        config: BedrockConfig,
    },
}

impl CompletionSettings {
    pub fn provider(&self) -> CompletionProvider {
        match self {
            CompletionSettings::Gemini(_) => CompletionProvider::Gemini,
            CompletionSettings::Bedrock { .. } => CompletionProvider::Bedrock,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub completion: CompletionSettings,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var(
            "ALLISWELL_BIND_ADDR",
            get("ALLISWELL_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;
        let max_output_tokens = match get("ALLISWELL_MAX_OUTPUT_TOKENS") {
            Some(v) => parse_max_output_tokens(v)?,
            None => DEFAULT_MAX_OUTPUT_TOKENS,
        };
        let system_prompt = get("ALLISWELL_SYSTEM_PROMPT");

        let provider = match get("ALLISWELL_COMPLETION_PROVIDER") {
            Some(v) => v.parse()?,
            None => CompletionProvider::Gemini,
        };

        let completion = match provider {
            CompletionProvider::Gemini => {
                let request_timeout_ms = match get("ALLISWELL_REQUEST_TIMEOUT_MS") {
                    Some(v) => parse_var("ALLISWELL_REQUEST_TIMEOUT_MS", v)?,
                    None => DEFAULT_REQUEST_TIMEOUT_MS,
                };
                CompletionSettings::Gemini(GeminiConfig {
                    api_base: get("GEMINI_API_BASE")
                        .unwrap_or_else(|| gemini::DEFAULT_API_BASE.to_string()),
                    api_key: get("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?,
                    model: get("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
                    max_output_tokens: Some(max_output_tokens),
                    system_instruction: system_prompt,
                    request_timeout_ms,
                })
            }
            CompletionProvider::Bedrock => CompletionSettings::Bedrock {
                region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
                config: BedrockConfig {
                    model_id: get("BEDROCK_MODEL_ID")
                        .unwrap_or_else(|| bedrock::DEFAULT_MODEL_ID.to_string()),
                    max_output_tokens: Some(max_output_tokens),
                    system_prompt,
                },
            },
        };

        Ok(Self {
            bind_addr,
            completion,
        })
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

/// Both backends must accept the cap; Bedrock takes it as an `i32`.
fn parse_max_output_tokens(value: String) -> Result<u32, ConfigError> {
    const VAR: &str = "ALLISWELL_MAX_OUTPUT_TOKENS";
    let max: u32 = parse_var(VAR, value.clone())?;
    if i32::try_from(max).is_err() {
        return Err(ConfigError::Invalid {
            var: VAR,
            value,
            reason: format!("must be at most {}", i32::MAX),
        });
    }
    Ok(max)
}
