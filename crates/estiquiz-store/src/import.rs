//! Building question sets from tab-separated sources, and renaming them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use estiquiz_core::model::QuestionSet;
use estiquiz_core::naming::{claim_name, unique_name, NameStyle};

use crate::fs::FsStore;
use crate::traits::QuizStore;

/// Parse `question<TAB>answer` lines. Blank lines are skipped.
pub fn parse_tsv(content: &str) -> Result<Vec<(String, f64)>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let (question, answer) = line
                .split_once('\t')
                .with_context(|| format!("line {}: expected question<TAB>answer", i + 1))?;
            let value =
                to_number(answer).with_context(|| format!("line {}: bad answer", i + 1))?;
            Ok((question.trim().to_string(), value))
        })
        .collect()
}

/// Parse a loosely formatted number, keeping only digits, `.` and `-`.
///
/// `"1,234 km"` becomes `1234`. Any cleaning is logged.
pub fn to_number(raw: &str) -> Result<f64> {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if clean != raw {
        tracing::warn!("cleaned {raw:?} => {clean:?}");
    }
    clean
        .parse::<f64>()
        .with_context(|| format!("not a number: {raw:?}"))
}

/// Shuffle the questions and split them into sets of at most `size`.
pub fn split_into_sets<R: Rng + ?Sized>(
    mut rows: Vec<(String, f64)>,
    size: usize,
    rng: &mut R,
) -> Result<Vec<QuestionSet>> {
    anyhow::ensure!(size >= 1, "set size must be at least 1");
    rows.shuffle(rng);
    Ok(rows
        .chunks(size)
        .map(|chunk| chunk.iter().cloned().collect())
        .collect())
}

/// How imported sets are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetNaming {
    /// `<base>-1`, `<base>-2`, ...
    Numbered { base: String },
    /// A unique random name per set.
    Random,
}

/// A question set written by [`import_question_sets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSet {
    pub name: String,
    pub questions: usize,
}

/// Split a TSV source into question sets and write each to the store.
pub fn import_question_sets<R: Rng + ?Sized>(
    store: &FsStore,
    content: &str,
    size: usize,
    naming: &SetNaming,
    rng: &mut R,
) -> Result<Vec<ImportedSet>> {
    let rows = parse_tsv(content)?;
    anyhow::ensure!(!rows.is_empty(), "no questions found");

    let sets = split_into_sets(rows, size, rng)?;
    let mut used: HashSet<String> = store.list_question_sets()?.into_iter().collect();
    let mut imported = Vec::with_capacity(sets.len());

    for (i, set) in sets.iter().enumerate() {
        let name = match naming {
            SetNaming::Numbered { base } => format!("{base}-{}", i + 1),
            SetNaming::Random => unique_name(store.words(), &mut used, store.name_style(), rng)?,
        };
        tracing::info!(set = %name, questions = set.len(), "writing question set");
        store.save_question_set(&name, set)?;
        if set.len() < size {
            tracing::warn!("set {} only has {} question(s)", i + 1, set.len());
        }
        imported.push(ImportedSet {
            name,
            questions: set.len(),
        });
    }

    Ok(imported)
}

/// Give each file a unique random name in its own directory.
///
/// Returns `(old, new)` path pairs in input order.
pub fn rename_with_random_names<R: Rng + ?Sized>(
    files: &[PathBuf],
    words: &[String],
    style: &NameStyle,
    rng: &mut R,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut used = HashSet::new();
    let mut renamed = Vec::with_capacity(files.len());

    for file in files {
        anyhow::ensure!(file.is_file(), "not a file: {}", file.display());
        let parent = file.parent().unwrap_or_else(|| Path::new("."));
        let ext = file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json")
            .to_string();

        let name = claim_name(words, style, rng, |n| {
            !used.contains(n) && !parent.join(format!("{n}.{ext}")).exists()
        })?;
        used.insert(name.clone());

        let target = parent.join(format!("{name}.{ext}"));
        tracing::info!(
            "renaming {} to {}",
            file.file_stem().unwrap_or_default().to_string_lossy(),
            name
        );
        std::fs::rename(file, &target).with_context(|| {
            format!("failed to rename {} to {}", file.display(), target.display())
        })?;
        renamed.push((file.clone(), target));
    }

    Ok(renamed)
}
