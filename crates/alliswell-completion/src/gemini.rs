//! Google Generative Language (`generateContent`) backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use alliswell_core::models::chat::{ChatRole, ChatTurn};

use crate::{CompletionService, redact_api_key};
use crate::error::CompletionError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub max_output_tokens: Option<u32>,
    pub system_instruction: Option<String>,
    pub request_timeout_ms: u64,
}

// Hand-written so the API key never reaches a log line in full.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &redact_api_key(&self.api_key))
            .field("model", &self.model)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("system_instruction", &self.system_instruction)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn generate_content_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.config.model)
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, history: &[ChatTurn], message: &str) -> Result<String, CompletionError> {
        let body = build_request(&self.config, history, message);
        debug!(
            model = %self.config.model,
            turns = body.contents.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        parse_response(&raw)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

fn text_content(role: &str, text: &str) -> Content {
    Content {
        role: Some(role.to_string()),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

fn build_request(config: &GeminiConfig, history: &[ChatTurn], message: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .filter(|turn| !turn.text.trim().is_empty())
        .map(|turn| {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Model => "model",
            };
            text_content(role, &turn.text)
        })
        .collect();
    contents.push(text_content("user", message));

    GenerateContentRequest {
        contents,
        system_instruction: config
            .system_instruction
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| Content {
                role: None,
                parts: vec![Part {
                    text: Some(s.to_string()),
                }],
            }),
        generation_config: config
            .max_output_tokens
            .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
    }
}

fn parse_response(raw: &str) -> Result<String, CompletionError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw)?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(CompletionError::Blocked(reason));
        }
        return Err(CompletionError::ResponseParse(
            "response contained no candidates".to_string(),
        ));
    };

    let text = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        warn!(finish_reason = %reason, "candidate carried no text");
        return Err(CompletionError::Blocked(reason));
    }

    Ok(text)
}
