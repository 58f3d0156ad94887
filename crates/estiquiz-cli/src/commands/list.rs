//! The `estiquiz list` command.

use std::path::PathBuf;

use anyhow::Result;

use estiquiz_store::QuizStore;

use super::open_store;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path)?;

    let sets = store.list_question_sets()?;
    println!("Question sets ({}):", sets.len());
    for set in &sets {
        println!("  {set}");
    }

    let quizzes = store.list_quizzes()?;
    println!("\nQuizzes ({}):", quizzes.len());
    for quiz in &quizzes {
        println!("  {quiz}");
    }

    if sets.is_empty() && quizzes.is_empty() {
        println!("\nNothing here yet. Run `estiquiz init` to create an example question set.");
    }

    Ok(())
}
