//! [`Relay`] over HTTP, posting to the site's own `/api/chat`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use alliswell_core::models::relay::{ChatReply, ChatRequest};

use crate::error::{ChatError, RelayError};
use crate::session::Relay;

#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelay {
    /// `base_url` is the site origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, ChatError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        debug!(endpoint = %self.endpoint, history = request.history.len(), "posting chat message");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status.as_u16()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| RelayError::Decode(e.to_string()))
    }
}
