//! The `estiquiz sets` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use estiquiz_report::plural_s;
use estiquiz_store::import::{import_question_sets, rename_with_random_names, SetNaming};

use super::open_store;

pub fn import(
    tsv: PathBuf,
    size: usize,
    numbered: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(size >= 1, "size must be at least 1");
    let store = open_store(config_path)?;

    let content = std::fs::read_to_string(&tsv)
        .with_context(|| format!("failed to read question file: {}", tsv.display()))?;

    let naming = if numbered {
        let base = tsv
            .file_stem()
            .and_then(|s| s.to_str())
            .context("question file has no usable name")?;
        SetNaming::Numbered {
            base: base.to_string(),
        }
    } else {
        SetNaming::Random
    };

    let imported = import_question_sets(&store, &content, size, &naming, &mut rand::thread_rng())?;

    for set in &imported {
        println!(
            "Wrote {} ({} question{})",
            set.name,
            set.questions,
            plural_s(set.questions)
        );
        if set.questions < size {
            println!(
                "*** {} only has {} question{}.",
                set.name,
                set.questions,
                plural_s(set.questions)
            );
        }
    }
    println!(
        "\n{} question set{} written to {}",
        imported.len(),
        plural_s(imported.len()),
        store.question_set_dir().display()
    );

    Ok(())
}

pub fn rename(files: Vec<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_path)?;
    let renamed = rename_with_random_names(
        &files,
        store.words(),
        store.name_style(),
        &mut rand::thread_rng(),
    )?;

    for (old, new) in &renamed {
        println!("Renamed {} to {}", old.display(), new.display());
    }
    Ok(())
}
