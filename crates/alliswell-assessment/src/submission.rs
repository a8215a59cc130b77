//! Bodies of `POST /api/assessment`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{self, Category, Response};

/// What the client reports after a completed assessment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentSubmission {
    pub responses: Vec<Option<Response>>,
    pub score: u32,
    pub category: Category,
    pub timestamp: jiff::Timestamp,
}

impl AssessmentSubmission {
    pub fn new(responses: Vec<Option<Response>>, timestamp: jiff::Timestamp) -> Self {
        let score = scoring::total_score(&responses);
        Self {
            responses,
            score,
            category: Category::for_score(score),
            timestamp,
        }
    }
}

/// Self-help suggestions matching a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Resources {
    pub category: Category,
    pub description: String,
    pub suggestions: Vec<String>,
}

impl Resources {
    pub fn for_score(score: u32) -> Self {
        let category = Category::for_score(score);
        Self {
            category,
            description: category.description().to_string(),
            suggestions: category
                .recommendations()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentReceipt {
    pub success: bool,
    pub message: String,
    pub resources: Resources,
}

impl AssessmentReceipt {
    pub fn received(score: u32) -> Self {
        Self {
            success: true,
            message: "Assessment received".to_string(),
            resources: Resources::for_score(score),
        }
    }
}
