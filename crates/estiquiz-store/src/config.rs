//! Workspace configuration: where files live and how names are made.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use estiquiz_core::naming::{parse_words, NameStyle, DEFAULT_WORDS};

/// Top-level estiquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstiquizConfig {
    /// Directory holding one subdirectory per quiz.
    #[serde(default = "default_quiz_dir")]
    pub quiz_dir: PathBuf,
    /// Directory holding `<name>.json` question sets.
    #[serde(default = "default_question_set_dir")]
    pub question_set_dir: PathBuf,
    /// Dictionary for generated names, one word per line.
    #[serde(default)]
    pub words_file: Option<PathBuf>,
    /// Words per generated name.
    #[serde(default = "default_name_words")]
    pub name_words: usize,
    /// Separator between words of a generated name.
    #[serde(default = "default_name_separator")]
    pub name_separator: String,
    /// Attempts before name generation gives up.
    #[serde(default = "default_max_name_attempts")]
    pub max_name_attempts: u32,
}

fn default_quiz_dir() -> PathBuf {
    PathBuf::from("quizzes")
}
fn default_question_set_dir() -> PathBuf {
    PathBuf::from("question-sets")
}
fn default_name_words() -> usize {
    2
}
fn default_name_separator() -> String {
    "-".to_string()
}
fn default_max_name_attempts() -> u32 {
    100
}

impl Default for EstiquizConfig {
    fn default() -> Self {
        Self {
            quiz_dir: default_quiz_dir(),
            question_set_dir: default_question_set_dir(),
            words_file: None,
            name_words: default_name_words(),
            name_separator: default_name_separator(),
            max_name_attempts: default_max_name_attempts(),
        }
    }
}

impl EstiquizConfig {
    pub fn name_style(&self) -> NameStyle {
        NameStyle {
            words: self.name_words,
            separator: self.name_separator.clone(),
            max_attempts: self.max_name_attempts,
        }
    }

    /// Load the configured dictionary, or the built-in list if none is set.
    pub fn load_words(&self) -> Result<Vec<String>> {
        match &self.words_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read words file: {}", path.display()))?;
                let words = parse_words(&content);
                anyhow::ensure!(!words.is_empty(), "words file is empty: {}", path.display());
                Ok(words)
            }
            None => Ok(DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `estiquiz.toml` in the current directory
/// 2. `~/.config/estiquiz/config.toml`
///
/// Environment variable overrides: `ESTIQUIZ_QUIZ_DIR`, `ESTIQUIZ_QUESTION_SET_DIR`.
pub fn load_config() -> Result<EstiquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EstiquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("estiquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<EstiquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EstiquizConfig::default(),
    };

    if let Ok(dir) = std::env::var("ESTIQUIZ_QUIZ_DIR") {
        config.quiz_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("ESTIQUIZ_QUESTION_SET_DIR") {
        config.question_set_dir = PathBuf::from(dir);
    }

    config.quiz_dir = resolve_path(&config.quiz_dir);
    config.question_set_dir = resolve_path(&config.question_set_dir);
    config.words_file = config.words_file.as_deref().map(resolve_path);

    anyhow::ensure!(config.name_words >= 1, "name_words must be at least 1");
    anyhow::ensure!(
        config.max_name_attempts >= 1,
        "max_name_attempts must be at least 1"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("estiquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ESTIQUIZ_TEST_VAR", "data");
        assert_eq!(resolve_env_vars("${_ESTIQUIZ_TEST_VAR}"), "data");
        assert_eq!(
            resolve_env_vars("/srv/${_ESTIQUIZ_TEST_VAR}/quizzes"),
            "/srv/data/quizzes"
        );
        std::env::remove_var("_ESTIQUIZ_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_ESTIQUIZ_SELF_REF", "${_ESTIQUIZ_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_ESTIQUIZ_SELF_REF}/x"),
            "${_ESTIQUIZ_SELF_REF}/x"
        );
        std::env::remove_var("_ESTIQUIZ_SELF_REF");
        assert_eq!(resolve_env_vars("${_ESTIQUIZ_UNSET_VAR}a${"), "a${");
    }

    #[test]
    fn resolve_env_vars_unterminated() {
        assert_eq!(resolve_env_vars("a/${oops"), "a/${oops");
    }

    #[test]
    fn default_config() {
        let config = EstiquizConfig::default();
        assert_eq!(config.quiz_dir, PathBuf::from("quizzes"));
        assert_eq!(config.name_words, 2);
        assert_eq!(config.name_style().separator, "-");
        assert!(!config.load_words().unwrap().is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
quiz_dir = "/tmp/quizzes"
name_separator = "_"
"#;
        let config: EstiquizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.quiz_dir, PathBuf::from("/tmp/quizzes"));
        assert_eq!(config.question_set_dir, PathBuf::from("question-sets"));
        assert_eq!(config.name_separator, "_");
        assert_eq!(config.max_name_attempts, 100);
    }

    #[test]
    fn load_explicit_missing_file() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_words_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "otter\nlamp\n").unwrap();
        let config = EstiquizConfig {
            words_file: Some(path),
            ..EstiquizConfig::default()
        };
        assert_eq!(config.load_words().unwrap(), ["otter", "lamp"]);
    }
}
