use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("question index {index} is out of range (questionnaire has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("value {value} is not an option of question {question_id}")]
    InvalidOption { question_id: u32, value: u32 },

    #[error("no question is showing")]
    NotAnswering,

    #[error("questionnaire has no questions")]
    EmptyQuestionnaire,

    #[error("question {0} has no options")]
    QuestionWithoutOptions(u32),
}
