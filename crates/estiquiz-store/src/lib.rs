//! estiquiz-store: Persistence for question sets, quizzes and results.
//!
//! The filesystem is the system of record: one JSON file per question set,
//! one directory per quiz, one result file per respondent.

pub mod config;
pub mod fs;
pub mod import;
pub mod traits;

pub use config::{load_config, load_config_from, EstiquizConfig};
pub use fs::FsStore;
pub use traits::QuizStore;
