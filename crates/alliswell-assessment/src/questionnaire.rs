use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AssessmentError;

/// One selectable answer and the points it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub text: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn has_option(&self, value: u32) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Highest value any option of this question contributes.
    pub fn max_value(&self) -> u32 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }
}

/// An ordered, non-empty set of questions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Questionnaire {
    pub id: String,
    pub name: String,
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, AssessmentError> {
        if questions.is_empty() {
            return Err(AssessmentError::EmptyQuestionnaire);
        }
        if let Some(q) = questions.iter().find(|q| q.options.is_empty()) {
            return Err(AssessmentError::QuestionWithoutOptions(q.id));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            questions,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Result<&Question, AssessmentError> {
        self.questions
            .get(index)
            .ok_or(AssessmentError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    /// Score reached by picking the highest option everywhere.
    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .map(Question::max_value)
            .fold(0, u32::saturating_add)
    }
}

/// The eight-question wellness check shown on the site.
pub fn wellness_check() -> &'static Questionnaire {
    static QUESTIONNAIRE: std::sync::LazyLock<Questionnaire> = std::sync::LazyLock::new(|| {
        let frequency = [
            "Not at all",
            "Several days",
            "More than half the days",
            "Nearly every day",
        ];

        Questionnaire {
            id: "wellness_check".to_string(),
            name: "Wellness Check".to_string(),
            questions: vec![
                question(
                    1,
                    "Over the past two weeks, how often have you felt down, depressed, or hopeless?",
                    &frequency,
                ),
                question(
                    2,
                    "How often have you felt nervous, anxious, or on edge?",
                    &frequency,
                ),
                question(
                    3,
                    "How would you rate your overall stress level recently?",
                    &["Very low", "Low", "Moderate", "High", "Very high"],
                ),
                question(
                    4,
                    "How well have you been sleeping?",
                    &["Very well", "Fairly well", "Not very well", "Not well at all"],
                ),
                question(
                    5,
                    "How often do you feel overwhelmed by daily responsibilities?",
                    &["Never", "Rarely", "Sometimes", "Often", "Always"],
                ),
                question(
                    6,
                    "How satisfied are you with your social connections?",
                    &["Very satisfied", "Satisfied", "Neutral", "Dissatisfied"],
                ),
                question(
                    7,
                    "How often do you engage in activities you enjoy?",
                    &["Daily", "Several times a week", "Once a week", "Rarely", "Never"],
                ),
                question(
                    8,
                    "How hopeful do you feel about the future?",
                    &[
                        "Very hopeful",
                        "Somewhat hopeful",
                        "Neutral",
                        "Not very hopeful",
                        "Not hopeful at all",
                    ],
                ),
            ],
        }
    });
    &QUESTIONNAIRE
}

/// Options are scored by position: the first is worth 0.
fn question(id: u32, text: &str, options: &[&str]) -> Question {
    Question {
        id,
        text: text.to_string(),
        options: options
            .iter()
            .zip(0..)
            .map(|(text, value)| AnswerOption {
                text: text.to_string(),
                value,
            })
            .collect(),
    }
}
