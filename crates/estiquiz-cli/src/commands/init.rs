//! The `estiquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("estiquiz.toml").exists() {
        println!("estiquiz.toml already exists, skipping.");
    } else {
        std::fs::write("estiquiz.toml", SAMPLE_CONFIG)?;
        println!("Created estiquiz.toml");
    }

    std::fs::create_dir_all("question-sets")?;
    let example_path = Path::new("question-sets/example.json");
    if example_path.exists() {
        println!("question-sets/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created question-sets/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: estiquiz new example");
    println!("  2. Run: estiquiz answer <quiz-name>");
    println!("  3. Run: estiquiz summary <quiz-name>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# estiquiz configuration

quiz_dir = "quizzes"
question_set_dir = "question-sets"

# One word per line; the built-in list is used when unset.
# words_file = "words.txt"

name_words = 2
name_separator = "-"
max_name_attempts = 100
"#;

const EXAMPLE_QUESTION_SET: &str = r#"{
  "Length of the Nile in kilometres": 6650.0,
  "Height of Mount Everest in metres": 8849.0,
  "Year the first Nobel Prizes were awarded": 1901.0,
  "Boiling point of ethanol at sea level in degrees Celsius": 78.37,
  "Number of bones in the adult human body": 206.0
}
"#;
