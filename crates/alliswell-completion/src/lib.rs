//! alliswell-completion
//!
//! Text completion backends behind the chat relay. The relay treats the
//! model as opaque: prior turns and a new message go in, one reply comes out.
//! Calls are made once; there is no retry.

pub mod bedrock;
pub mod error;
pub mod gemini;

use async_trait::async_trait;

use alliswell_core::models::chat::ChatTurn;

use error::CompletionError;

/// A remote service that continues a conversation.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Short backend name for logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Reply to `message` given the prior `history`, oldest first.
    async fn complete(&self, history: &[ChatTurn], message: &str) -> Result<String, CompletionError>;
}

/// Keep the first and last four characters: `abcd...wxyz`.
pub fn redact_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
