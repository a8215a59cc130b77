use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A recorded answer to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub value: u32,
}

/// Severity band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    Well,
    Mild,
    Moderate,
    High,
}

struct Band {
    /// Inclusive upper bound; `None` for the open-ended top band.
    upper: Option<u32>,
    category: Category,
    label: &'static str,
    description: &'static str,
    recommendations: [&'static str; 3],
}

/// Ordered by ascending bound. Classification takes the first band whose
/// bound admits the score.
static BANDS: [Band; 4] = [
    Band {
        upper: Some(7),
        category: Category::Well,
        label: "Generally Well",
        description: "You seem to be managing well. Keep practicing self-care.",
        recommendations: [
            "Continue current self-care practices",
            "Maintain regular sleep/exercise",
            "Stay connected with supportive people",
        ],
    },
    Band {
        upper: Some(15),
        category: Category::Mild,
        label: "Mild Distress",
        description: "You may be experiencing some mild challenges. Self-care strategies might be helpful.",
        recommendations: [
            "Try deep breathing exercises",
            "Consider guided meditation",
            "Reach out to friends or family",
        ],
    },
    Band {
        upper: Some(23),
        category: Category::Moderate,
        label: "Moderate Distress",
        description: "You might be going through a challenging time. Consider professional support.",
        recommendations: [
            "Consider speaking with a counselor",
            "Practice stress-reduction techniques",
            "Maintain check-ins with your support network",
        ],
    },
    Band {
        upper: None,
        category: Category::High,
        label: "High Distress",
        description: "You may be experiencing significant distress. We strongly encourage professional support.",
        recommendations: [
            "Strongly consider a mental health professional",
            "Reach out to crisis support if needed",
            "Connect with trusted support groups",
        ],
    },
];

/// Shown under every result.
pub const DISCLAIMER: &str = "This is for self-reflection only and is not a diagnostic tool. \
     If you're in crisis, please contact emergency services.";

impl Category {
    pub fn for_score(total_score: u32) -> Self {
        band_for(total_score).category
    }

    /// Heading shown on the results screen.
    pub fn label(self) -> &'static str {
        self.band().label
    }

    pub fn description(self) -> &'static str {
        self.band().description
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        &self.band().recommendations
    }

    /// Lowercase identifier used on the wire, e.g. `"moderate"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Well => "well",
            Category::Mild => "mild",
            Category::Moderate => "moderate",
            Category::High => "high",
        }
    }

    /// Accepts either the wire identifier or the display label,
    /// case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        BANDS
            .iter()
            .find(|b| b.category.as_str().eq_ignore_ascii_case(s) || b.label.eq_ignore_ascii_case(s))
            .map(|b| b.category)
    }

    fn band(self) -> &'static Band {
        // BANDS holds exactly one entry per category, in declaration order.
        &BANDS[self as usize]
    }
}

fn band_for(total_score: u32) -> &'static Band {
    BANDS
        .iter()
        .find(|b| b.upper.is_none_or(|upper| total_score <= upper))
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

/// Outcome of a completed assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub total_score: u32,
    pub category: Category,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl ScoreResult {
    pub fn for_total(total_score: u32) -> Self {
        let band = band_for(total_score);
        Self {
            total_score,
            category: band.category,
            description: band.description.to_string(),
            recommendations: band.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// Sum of all recorded values. Unanswered questions contribute 0; the sum
/// saturates at `u32::MAX`.
pub fn total_score(responses: &[Option<Response>]) -> u32 {
    responses
        .iter()
        .flatten()
        .map(|r| r.value)
        .fold(0, u32::saturating_add)
}

pub fn score(responses: &[Option<Response>]) -> ScoreResult {
    ScoreResult::for_total(total_score(responses))
}
