//! alliswell-assessment
//!
//! The wellness self-assessment. Pure data and state, no I/O: the question
//! table, the score bands, and a reducer that drives a session from open to
//! results and hands the UI a view model to draw.
//!
//! The same score table backs both the client-side results screen and the
//! server's `/api/assessment` resource lookup.

pub mod engine;
pub mod error;
pub mod questionnaire;
pub mod scoring;
pub mod submission;

pub use engine::{Action, AssessmentEngine, AssessmentView, Phase};
pub use questionnaire::{Questionnaire, wellness_check};
pub use scoring::{Category, Response, ScoreResult};
