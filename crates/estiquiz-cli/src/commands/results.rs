//! The `estiquiz results` command.

use std::path::PathBuf;

use anyhow::Result;

use estiquiz_store::QuizStore;

use super::open_store;
use super::output::{print_result, OutputFormat};

pub fn execute(
    quiz: String,
    respondent: String,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let store = open_store(config_path)?;
    let result = store.load_result(&quiz, &respondent)?;
    print_result(&result, format)
}
