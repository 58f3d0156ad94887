//! The storage seam between request handling and persistence.

use anyhow::Result;
use chrono::{DateTime, Utc};

use estiquiz_core::model::{QuestionSet, Quiz, QuizResult};

/// Keyed access to question sets, quizzes and per-respondent results.
///
/// Implementations must keep each (quiz, respondent) result separate so
/// that concurrent respondents never write the same record.
pub trait QuizStore {
    /// Load a named question set.
    fn load_question_set(&self, name: &str) -> Result<QuestionSet>;

    /// Write a question set, replacing any existing set with that name.
    fn save_question_set(&self, name: &str, set: &QuestionSet) -> Result<()>;

    /// Sorted names of all question sets.
    fn list_question_sets(&self) -> Result<Vec<String>>;

    /// Snapshot a question set into a new quiz under a fresh unique name.
    fn create_quiz(&self, set_name: &str, timestamp: DateTime<Utc>) -> Result<String>;

    /// Load a quiz definition by name.
    fn load_quiz(&self, name: &str) -> Result<Quiz>;

    /// Sorted names of all quizzes.
    fn list_quizzes(&self) -> Result<Vec<String>>;

    /// Persist a scored result under its quiz and respondent.
    fn save_result(&self, result: &QuizResult) -> Result<()>;

    /// Load one respondent's result.
    fn load_result(&self, quiz: &str, respondent: &str) -> Result<QuizResult>;

    /// Every stored result of a quiz, ordered by respondent key.
    fn list_results(&self, quiz: &str) -> Result<Vec<QuizResult>>;
}
