use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::info;

use alliswell_core::models::relay::{ChatReply, ChatRequest};

use crate::error::ApiError;
use crate::state::AppState;

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const CHAT_FAILED: &str = "Unable to process chat message";

/// Forward a message and its history to the completion service.
pub async fn relay_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::from_rejection(e, MESSAGE_REQUIRED))?;
    let request = ChatRequest::new(body.message, body.history)
        .map_err(|_| ApiError::BadRequest(MESSAGE_REQUIRED.to_string()))?;

    let text = state
        .completion
        .complete(&request.history, &request.message)
        .await
        .map_err(|e| ApiError::Upstream {
            public: CHAT_FAILED,
            detail: format!("{}: {e}", state.completion.name()),
        })?;

    info!(
        backend = state.completion.name(),
        history = request.history.len(),
        reply_chars = text.chars().count(),
        "chat reply relayed"
    );

    Ok(Json(ChatReply::success(text)))
}
