//! The `estiquiz summary` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use estiquiz_core::statistics::summarize;
use estiquiz_store::QuizStore;

use super::open_store;
use super::output::{print_summary, OutputFormat};

pub fn execute(quiz: String, format: OutputFormat, config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path)?;
    let results = store.list_results(&quiz)?;
    let summary = summarize(&results, chrono::Utc::now())
        .with_context(|| format!("cannot summarize quiz {quiz}"))?;
    print_summary(&quiz, &summary, format)
}
