use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use alliswell_assessment::Category;
use alliswell_assessment::Questionnaire;
use alliswell_assessment::submission::AssessmentReceipt;

use crate::error::ApiError;
use crate::state::AppState;

pub const INVALID_ASSESSMENT: &str = "Invalid assessment data";

/// Submitted body, read loosely so every shape problem becomes the same 400.
#[derive(Debug, Deserialize)]
pub struct SubmissionBody {
    responses: Option<Vec<Value>>,
    score: Option<Value>,
    category: Option<String>,
    timestamp: Option<String>,
}

pub async fn questions(State(state): State<AppState>) -> Json<&'static Questionnaire> {
    Json(state.questionnaire)
}

/// Acknowledge a completed assessment and return matching self-help
/// resources. Nothing is stored.
pub async fn submit_assessment(
    body: Result<Json<SubmissionBody>, JsonRejection>,
) -> Result<Json<AssessmentReceipt>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::from_rejection(e, INVALID_ASSESSMENT))?;

    let invalid = || ApiError::BadRequest(INVALID_ASSESSMENT.to_string());
    let responses = body.responses.as_ref().ok_or_else(invalid)?;
    let score = body
        .score
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|s| u32::try_from(s).ok())
        .ok_or_else(invalid)?;

    let receipt = AssessmentReceipt::received(score);
    let category = receipt.resources.category;

    if let Some(reported) = body.category.as_deref()
        && Category::parse(reported) != Some(category)
    {
        warn!(
            score,
            reported,
            computed = category.as_str(),
            "submitted category disagrees with score"
        );
    }

    info!(
        score,
        category = category.as_str(),
        responses = responses.len(),
        timestamp = body.timestamp.as_deref().unwrap_or("-"),
        "assessment received"
    );

    Ok(Json(receipt))
}
