use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("missing API key")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("completion blocked: {0}")]
    Blocked(String),
}
