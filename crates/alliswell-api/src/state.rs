use std::sync::Arc;

use alliswell_assessment::{Questionnaire, wellness_check};
use alliswell_completion::CompletionService;
use alliswell_completion::bedrock::BedrockCompletion;
use alliswell_completion::error::CompletionError;
use alliswell_completion::gemini::GeminiClient;

use crate::config::CompletionSettings;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionService>,
    pub questionnaire: &'static Questionnaire,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            questionnaire: wellness_check(),
        }
    }

    /// Build the configured completion backend.
    pub async fn from_settings(settings: &CompletionSettings) -> Result<Self, CompletionError> {
        let completion: Arc<dyn CompletionService> = match settings {
            CompletionSettings::Gemini(config) => Arc::new(GeminiClient::new(config.clone())?),
            CompletionSettings::Bedrock { region, config } => {
                Arc::new(BedrockCompletion::from_region(region, config.clone()).await)
            }
        };
        Ok(Self::new(completion))
    }
}
