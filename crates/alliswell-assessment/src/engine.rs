//! Assessment session state machine.
//!
//! ```text
//! Closed --open--> Showing(0)
//! Showing(i) --next--> Showing(i + 1)      while i < N - 1
//! Showing(N - 1) --next--> Results
//! Showing(i) --prev--> Showing(i - 1)      while i > 0
//! Results --retake--> Showing(0)
//! any --close--> Closed
//! ```
//!
//! Every operation is a synchronous transition on owned state. The UI layer
//! dispatches an [`Action`], then draws the returned [`AssessmentView`]; it
//! never mutates the session directly.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::AssessmentError;
use crate::questionnaire::Questionnaire;
use crate::scoring::{self, DISCLAIMER, Category, Response, ScoreResult};
use crate::submission::AssessmentSubmission;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Showing(usize),
    Results,
}

/// A user intent, as raised by the assessment modal's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Select { question_index: usize, value: u32 },
    Next,
    Prev,
    Retake,
    Close,
}

/// Drives one assessment session over a borrowed questionnaire.
#[derive(Debug, Clone)]
pub struct AssessmentEngine<'q> {
    questionnaire: &'q Questionnaire,
    current: usize,
    responses: Vec<Option<Response>>,
    open: bool,
    result: Option<ScoreResult>,
}

impl<'q> AssessmentEngine<'q> {
    pub fn new(questionnaire: &'q Questionnaire) -> Self {
        Self {
            questionnaire,
            current: 0,
            responses: vec![None; questionnaire.len()],
            open: false,
            result: None,
        }
    }

    pub fn questionnaire(&self) -> &'q Questionnaire {
        self.questionnaire
    }

    pub fn phase(&self) -> Phase {
        if !self.open {
            Phase::Closed
        } else if self.result.is_some() {
            Phase::Results
        } else {
            Phase::Showing(self.current)
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn responses(&self) -> &[Option<Response>] {
        &self.responses
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    /// Apply one action and return the view to draw.
    pub fn dispatch(&mut self, action: Action) -> Result<AssessmentView, AssessmentError> {
        match action {
            Action::Open => self.open(),
            Action::Select {
                question_index,
                value,
            } => self.select_option(question_index, value)?,
            Action::Next => self.next(),
            Action::Prev => self.prev(),
            Action::Retake => self.retake(),
            Action::Close => self.close(),
        }
        Ok(self.view())
    }

    /// Start a fresh session. Re-initializes if already open.
    pub fn open(&mut self) {
        self.reset();
        self.open = true;
        debug!(questionnaire = %self.questionnaire.id, "assessment opened");
    }

    /// Record `value` as the answer to question `question_index`.
    ///
    /// Only allowed while a question is showing. The value must be one of
    /// that question's options.
    pub fn select_option(&mut self, question_index: usize, value: u32) -> Result<(), AssessmentError> {
        if !matches!(self.phase(), Phase::Showing(_)) {
            return Err(AssessmentError::NotAnswering);
        }
        let question = self.questionnaire.question(question_index)?;
        if !question.has_option(value) {
            return Err(AssessmentError::InvalidOption {
                question_id: question.id,
                value,
            });
        }
        self.responses[question_index] = Some(Response { value });
        Ok(())
    }

    /// Advance, or score the session when on the last question.
    ///
    /// An unanswered question does not block advancing; it scores 0.
    pub fn next(&mut self) {
        let Phase::Showing(index) = self.phase() else {
            return;
        };
        if index + 1 < self.questionnaire.len() {
            self.current = index + 1;
            return;
        }

        let result = scoring::score(&self.responses);
        info!(
            total_score = result.total_score,
            category = result.category.as_str(),
            answered = self.responses.iter().flatten().count(),
            "assessment completed"
        );
        self.result = Some(result);
    }

    pub fn prev(&mut self) {
        if let Phase::Showing(index) = self.phase()
            && index > 0
        {
            self.current = index - 1;
        }
    }

    /// Clear every answer and go back to the first question. A closed
    /// session stays closed.
    pub fn retake(&mut self) {
        self.reset();
    }

    /// Hide the assessment and discard the session. The UI returns focus to
    /// the control that opened it.
    pub fn close(&mut self) {
        self.open = false;
        self.reset();
    }

    /// Body for `POST /api/assessment`, available once results are showing.
    pub fn submission(&self, timestamp: jiff::Timestamp) -> Option<AssessmentSubmission> {
        self.result
            .as_ref()
            .map(|_| AssessmentSubmission::new(self.responses.clone(), timestamp))
    }

    pub fn view(&self) -> AssessmentView {
        match self.phase() {
            Phase::Closed => AssessmentView::Hidden,
            Phase::Showing(index) => AssessmentView::Question(self.question_view(index)),
            Phase::Results => match &self.result {
                Some(result) => AssessmentView::Results(ResultsView::from(result)),
                None => AssessmentView::Hidden,
            },
        }
    }

    fn question_view(&self, index: usize) -> QuestionView {
        let total = self.questionnaire.len();
        let question = &self.questionnaire.questions()[index];
        let selected = self.responses[index].map(|r| r.value);

        QuestionView {
            question_id: question.id,
            number: index + 1,
            total,
            progress_percent: ((index + 1) * 100 / total) as u8,
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .map(|o| OptionView {
                    text: o.text.clone(),
                    value: o.value,
                    selected: selected == Some(o.value),
                })
                .collect(),
            previous_enabled: index > 0,
            next_label: if index + 1 == total {
                NextLabel::Finish
            } else {
                NextLabel::Next
            },
        }
    }

    fn reset(&mut self) {
        self.current = 0;
        self.responses = vec![None; self.questionnaire.len()];
        self.result = None;
    }
}

/// What the assessment modal should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AssessmentView {
    Hidden,
    Question(QuestionView),
    Results(ResultsView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub question_id: u32,
    /// 1-based position, as in "Question 3 of 8".
    pub number: usize,
    pub total: usize,
    pub progress_percent: u8,
    pub text: String,
    pub options: Vec<OptionView>,
    pub previous_enabled: bool,
    pub next_label: NextLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub value: u32,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextLabel {
    Next,
    Finish,
}

impl NextLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            NextLabel::Next => "Next",
            NextLabel::Finish => "Finish",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub total_score: u32,
    pub category: Category,
    pub label: String,
    pub description: String,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

impl From<&ScoreResult> for ResultsView {
    fn from(result: &ScoreResult) -> Self {
        Self {
            total_score: result.total_score,
            category: result.category,
            label: result.label().to_string(),
            description: result.description.clone(),
            recommendations: result.recommendations.clone(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}
