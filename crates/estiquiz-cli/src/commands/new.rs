//! The `estiquiz new` command.

use std::path::PathBuf;

use anyhow::Result;

use estiquiz_store::QuizStore;

use super::open_store;

pub fn execute(set: String, config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path)?;
    let name = store.create_quiz(&set, chrono::Utc::now())?;

    println!("Created quiz {name} from question set {set}");
    println!("\nRespondents answer with:");
    println!("  estiquiz answer {name}");
    Ok(())
}
