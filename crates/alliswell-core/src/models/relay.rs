//! Request and reply bodies of `POST /api/chat`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::chat::ChatTurn;
use crate::error::CoreError;

/// Body sent by the chat widget to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl ChatRequest {
    /// Build a request, rejecting a blank message.
    pub fn new(message: impl Into<String>, history: Vec<ChatTurn>) -> Result<Self, CoreError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(CoreError::EmptyMessage);
        }
        Ok(Self { message, history })
    }
}

/// Normalized relay reply.
///
/// Success carries `message` and `timestamp`; failure carries `error`.
/// Every field but `success` is optional on the way in so a partial body
/// still parses and can be classified by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatReply {
    /// A body without the flag counts as unsuccessful.
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<jiff::Timestamp>,
}

impl ChatReply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            timestamp: Some(jiff::Timestamp::now()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            timestamp: None,
        }
    }

    /// The model text, if the reply is a success with a non-empty message.
    pub fn into_text(self) -> Option<String> {
        if !self.success {
            return None;
        }
        self.message.filter(|m| !m.is_empty())
    }
}
