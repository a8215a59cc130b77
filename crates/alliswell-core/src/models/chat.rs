use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Author of a chat message.
///
/// `Model` covers both relay replies and the locally generated crisis
/// response; the completion service uses the same two role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatRole {
    User,
    Model,
}

/// A message held in a chat session's history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: jiff::Timestamp,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }

    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: jiff::Timestamp::now(),
        }
    }

    /// The timestamp-free form sent to the relay as history.
    pub fn turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            text: self.text.clone(),
        }
    }
}

/// One prior exchange as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}
