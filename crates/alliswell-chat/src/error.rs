use thiserror::Error;

/// Why a relay call produced no usable reply body.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay answered with a non-2xx status.
    #[error("relay returned status {0}")]
    Status(u16),

    /// The request never completed (DNS, connect, timeout, reset).
    #[error("relay transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body was not a relay reply.
    #[error("relay reply could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
