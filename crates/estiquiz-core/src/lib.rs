//! estiquiz-core: Scoring and aggregation of interval estimates.
//!
//! This crate defines the data model, the scorer that classifies one
//! respondent's intervals, and the aggregator that combines many
//! respondents into extremes and means. It performs no I/O.

pub mod error;
pub mod model;
pub mod naming;
pub mod scoring;
pub mod statistics;

pub use error::QuizError;
pub use model::{Answer, Estimate, Outcome, Question, QuestionSet, Quiz, QuizResult};
pub use scoring::{classify, score};
pub use statistics::{combine, summarize, CombinedEstimate, Summary};
