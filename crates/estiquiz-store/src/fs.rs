//! Directory-per-quiz storage on the local filesystem.
//!
//! Layout:
//! - `<question_set_dir>/<set>.json`
//! - `<quiz_dir>/<quiz>/quiz.json`
//! - `<quiz_dir>/<quiz>/<respondent>.json`

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use estiquiz_core::model::{QuestionSet, Quiz, QuizResult};
use estiquiz_core::naming::{claim_name, NameStyle};

use crate::config::EstiquizConfig;
use crate::traits::QuizStore;

const QUIZ_FILE: &str = "quiz.json";

/// Serialize as indented JSON with a trailing newline.
pub fn to_json_file<T: Serialize>(data: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(data).context("failed to serialize JSON")?;
    json.push('\n');
    Ok(json)
}

/// Write `data` as JSON to `path`, creating parent directories.
///
/// The JSON goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old file or the new one.
pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let json = to_json_file(data)?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    tracing::info!(path = %path.display(), "writing");

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reject keys that would escape their directory or hide as dotfiles.
fn check_key(kind: &str, key: &str) -> Result<()> {
    anyhow::ensure!(!key.is_empty(), "{kind} name is empty");
    anyhow::ensure!(
        !key.starts_with('.') && !key.contains(['/', '\\']),
        "invalid {kind} name: '{key}'"
    );
    Ok(())
}

fn sorted_stems(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if !keep(&path) {
            continue;
        }
        let stem = if path.is_dir() {
            path.file_name()
        } else {
            path.file_stem()
        };
        if let Some(stem) = stem.and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

/// [`QuizStore`] backed by plain directories and JSON files.
#[derive(Debug, Clone)]
pub struct FsStore {
    quiz_dir: PathBuf,
    question_set_dir: PathBuf,
    words: Vec<String>,
    style: NameStyle,
}

impl FsStore {
    pub fn new(quiz_dir: impl Into<PathBuf>, question_set_dir: impl Into<PathBuf>) -> Self {
        Self {
            quiz_dir: quiz_dir.into(),
            question_set_dir: question_set_dir.into(),
            words: estiquiz_core::naming::DEFAULT_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            style: NameStyle::default(),
        }
    }

    /// Build a store from configuration, loading its dictionary.
    pub fn from_config(config: &EstiquizConfig) -> Result<Self> {
        Ok(Self::new(&config.quiz_dir, &config.question_set_dir)
            .with_names(config.load_words()?, config.name_style()))
    }

    pub fn with_names(mut self, words: Vec<String>, style: NameStyle) -> Self {
        self.words = words;
        self.style = style;
        self
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn name_style(&self) -> &NameStyle {
        &self.style
    }

    pub fn question_set_dir(&self) -> &Path {
        &self.question_set_dir
    }

    pub fn question_set_file(&self, name: &str) -> PathBuf {
        self.question_set_dir.join(format!("{name}.json"))
    }

    pub fn quiz_file(&self, name: &str) -> PathBuf {
        self.quiz_dir.join(name).join(QUIZ_FILE)
    }

    pub fn result_file(&self, quiz: &str, respondent: &str) -> PathBuf {
        self.quiz_dir.join(quiz).join(format!("{respondent}.json"))
    }

    /// Create a fresh quiz directory, retrying on name collisions.
    ///
    /// The directory itself is the claim: `create_dir` fails if another
    /// writer got there first.
    fn claim_quiz_dir(&self) -> Result<String> {
        std::fs::create_dir_all(&self.quiz_dir).with_context(|| {
            format!("failed to create quiz directory: {}", self.quiz_dir.display())
        })?;

        let mut failure = None;
        let name = claim_name(&self.words, &self.style, &mut rand::thread_rng(), |name| {
            let dir = self.quiz_dir.join(name);
            match std::fs::create_dir(&dir) {
                Ok(()) => true,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::warn!(dir = %dir.display(), "quiz directory exists");
                    false
                }
                Err(e) => {
                    failure = Some(anyhow::Error::new(e).context(format!(
                        "failed to create quiz directory: {}",
                        dir.display()
                    )));
                    true
                }
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(name),
        }
    }
}

impl QuizStore for FsStore {
    fn load_question_set(&self, name: &str) -> Result<QuestionSet> {
        check_key("question set", name)?;
        load_json(&self.question_set_file(name))
    }

    fn save_question_set(&self, name: &str, set: &QuestionSet) -> Result<()> {
        check_key("question set", name)?;
        save_json(set, &self.question_set_file(name))
    }

    fn list_question_sets(&self) -> Result<Vec<String>> {
        sorted_stems(&self.question_set_dir, is_json)
    }

    fn create_quiz(&self, set_name: &str, timestamp: DateTime<Utc>) -> Result<String> {
        let questions = self.load_question_set(set_name)?;
        anyhow::ensure!(
            !questions.is_empty(),
            "question set '{set_name}' has no questions"
        );

        let name = self.claim_quiz_dir()?;
        let quiz = Quiz::new(set_name, questions, timestamp);
        save_json(&quiz, &self.quiz_file(&name))?;
        tracing::info!(quiz = %name, set = %set_name, "created quiz");
        Ok(name)
    }

    fn load_quiz(&self, name: &str) -> Result<Quiz> {
        check_key("quiz", name)?;
        load_json(&self.quiz_file(name)).with_context(|| format!("unknown quiz: {name}"))
    }

    fn list_quizzes(&self) -> Result<Vec<String>> {
        sorted_stems(&self.quiz_dir, |p| p.join(QUIZ_FILE).is_file())
    }

    fn save_result(&self, result: &QuizResult) -> Result<()> {
        let quiz = result
            .quiz_name
            .as_deref()
            .context("result has no quiz name")?;
        let respondent = result
            .respondent_id
            .as_deref()
            .context("result has no respondent id")?;
        check_key("quiz", quiz)?;
        check_key("respondent", respondent)?;
        anyhow::ensure!(
            self.quiz_file(quiz).is_file(),
            "unknown quiz: {quiz}"
        );
        save_json(result, &self.result_file(quiz, respondent))
    }

    fn load_result(&self, quiz: &str, respondent: &str) -> Result<QuizResult> {
        check_key("quiz", quiz)?;
        check_key("respondent", respondent)?;
        load_json(&self.result_file(quiz, respondent))
    }

    fn list_results(&self, quiz: &str) -> Result<Vec<QuizResult>> {
        check_key("quiz", quiz)?;
        let dir = self.quiz_dir.join(quiz);
        anyhow::ensure!(dir.is_dir(), "unknown quiz: {quiz}");

        let respondents = sorted_stems(&dir, |p| {
            is_json(p) && p.file_name().is_some_and(|n| n != QUIZ_FILE)
        })?;
        tracing::debug!(quiz = %quiz, count = respondents.len(), "loading results");

        respondents
            .iter()
            .map(|r| self.load_result(quiz, r))
            .collect()
    }
}
