//! AWS Bedrock Converse backend.
//!
//! Bedrock names the second speaker `assistant`; relay history uses `model`.
//! The new message is appended as the last user turn.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput, InferenceConfiguration, Message,
    SystemContentBlock,
};
use tracing::debug;

use alliswell_core::models::chat::{ChatRole, ChatTurn};

use crate::CompletionService;
use crate::error::CompletionError;

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub model_id: String,
    pub max_output_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

pub struct BedrockCompletion {
    client: Client,
    config: BedrockConfig,
}

impl BedrockCompletion {
    pub fn new(sdk_config: &aws_config::SdkConfig, config: BedrockConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
            config,
        }
    }

    /// Load AWS credentials from the default chain for `region`.
    pub async fn from_region(region: &str, config: BedrockConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(&sdk_config, config)
    }
}

#[async_trait]
impl CompletionService for BedrockCompletion {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn complete(&self, history: &[ChatTurn], message: &str) -> Result<String, CompletionError> {
        let messages = converse_messages(history, message)?;

        debug!(
            model_id = %self.config.model_id,
            turns = messages.len(),
            "sending converse request"
        );

        let response = self
            .client
            .converse()
            .model_id(&self.config.model_id)
            .set_messages(Some(messages))
            .set_system(system_blocks(&self.config))
            .set_inference_config(inference_config(&self.config)?)
            .send()
            .await
            .map_err(|e| CompletionError::Invocation(e.into_service_error().to_string()))?;

        response_text(response.output())
    }
}

/// Build the Converse message list for `history` plus the new `message`.
///
/// Converse wants strictly alternating turns starting with the user. The
/// relay history can hold runs of one role (overlapping sends, replies that
/// resolved out of order), so consecutive same-role turns are merged into
/// one message with a text block each. Blank turns and any model turns
/// ahead of the first user turn are dropped.
pub fn converse_messages(
    history: &[ChatTurn],
    message: &str,
) -> Result<Vec<Message>, CompletionError> {
    let turns = history
        .iter()
        .filter(|t| !t.text.trim().is_empty())
        .map(|t| (t.role, t.text.as_str()))
        .chain(std::iter::once((ChatRole::User, message)));

    let mut grouped: Vec<(ChatRole, Vec<&str>)> = Vec::new();
    for (role, text) in turns {
        let extends_last = grouped.last().is_some_and(|(last, _)| *last == role);
        if extends_last {
            if let Some((_, texts)) = grouped.last_mut() {
                texts.push(text);
            }
        } else if !grouped.is_empty() || role == ChatRole::User {
            grouped.push((role, vec![text]));
        }
    }

    grouped
        .into_iter()
        .map(|(role, texts)| {
            let role = match role {
                ChatRole::User => ConversationRole::User,
                ChatRole::Model => ConversationRole::Assistant,
            };
            texts
                .into_iter()
                .fold(Message::builder().role(role), |builder, text| {
                    builder.content(ContentBlock::Text(text.to_string()))
                })
                .build()
                .map_err(|e| CompletionError::Invocation(e.to_string()))
        })
        .collect()
}

/// The system prompt block, if one is configured.
pub fn system_blocks(config: &BedrockConfig) -> Option<Vec<SystemContentBlock>> {
    config
        .system_prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| vec![SystemContentBlock::Text(p.to_string())])
}

/// Generation cap for the request. Converse takes an `i32`.
pub fn inference_config(
    config: &BedrockConfig,
) -> Result<Option<InferenceConfiguration>, CompletionError> {
    config
        .max_output_tokens
        .map(|max| {
            let max_tokens = i32::try_from(max).map_err(|_| {
                CompletionError::Invocation(format!("max output tokens out of range: {max}"))
            })?;
            Ok(InferenceConfiguration::builder()
                .max_tokens(max_tokens)
                .build())
        })
        .transpose()
}

/// Join the text blocks of a Converse reply.
pub fn response_text(output: Option<&ConverseOutput>) -> Result<String, CompletionError> {
    let output_message = output
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| CompletionError::ResponseParse("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    if response_text.trim().is_empty() {
        return Err(CompletionError::ResponseParse(
            "response contained no text".to_string(),
        ));
    }

    Ok(response_text)
}
