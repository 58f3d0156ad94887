//! Human-memorable names built from random dictionary words.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{QuizError, Result};

/// Word list used when no dictionary file is configured.
pub const DEFAULT_WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "apple", "arrow", "aspen", "badger", "bamboo", "basin", "beacon",
    "birch", "bison", "bramble", "breeze", "brook", "cactus", "canyon", "cedar", "cinder", "clover",
    "cobalt", "comet", "coral", "cricket", "crystal", "dahlia", "delta", "dune", "ember", "falcon",
    "fern", "fjord", "flint", "forest", "garnet", "geyser", "glacier", "granite", "harbor", "hazel",
    "heron", "hollow", "island", "ivory", "jasper", "juniper", "kelp", "kestrel", "lagoon",
    "lantern", "larch", "lemon", "lichen", "lotus", "lynx", "maple", "marble", "meadow", "mesa",
    "meteor", "moss", "nectar", "nickel", "oasis", "ocean", "olive", "onyx", "orchid", "otter",
    "pebble", "pepper", "pine", "plume", "prairie", "quartz", "quill", "raven", "reef", "ridge",
    "river", "saffron", "sage", "sequoia", "shale", "sparrow", "spruce", "summit", "thistle",
    "thunder", "tide", "timber", "topaz", "tundra", "valley", "velvet", "walnut", "willow", "wren",
    "yarrow", "zephyr",
];

/// How names are assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameStyle {
    /// Number of words per name.
    pub words: usize,
    /// String placed between words.
    pub separator: String,
    /// Attempts before giving up on finding an unused name.
    pub max_attempts: u32,
}

impl Default for NameStyle {
    fn default() -> Self {
        Self {
            words: 2,
            separator: "-".to_string(),
            max_attempts: 100,
        }
    }
}

/// Join `n` randomly chosen words with `separator`.
pub fn random_name<S: AsRef<str>, R: Rng + ?Sized>(
    words: &[S],
    n: usize,
    separator: &str,
    rng: &mut R,
) -> Result<String> {
    if words.is_empty() {
        return Err(QuizError::EmptyInput("word list is empty"));
    }
    let mut picked: Vec<&str> = Vec::with_capacity(n);
    for _ in 0..n {
        if let Some(word) = words.choose(rng) {
            picked.push(word.as_ref());
        }
    }
    Ok(picked.join(separator))
}

/// Generate names until `is_free` accepts one.
///
/// `is_free` may also claim the name (for example by creating a directory);
/// returning `false` counts as a collision and triggers another attempt.
pub fn claim_name<S, R, F>(
    words: &[S],
    style: &NameStyle,
    rng: &mut R,
    mut is_free: F,
) -> Result<String>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    for attempt in 1..=style.max_attempts {
        let name = random_name(words, style.words, &style.separator, rng)?;
        if is_free(&name) {
            return Ok(name);
        }
        tracing::debug!(name = %name, attempt, "name already taken, retrying");
    }
    Err(QuizError::NamingExhausted {
        attempts: style.max_attempts,
    })
}

/// Generate a name not present in `used`, and record it there.
pub fn unique_name<S: AsRef<str>, R: Rng + ?Sized>(
    words: &[S],
    used: &mut HashSet<String>,
    style: &NameStyle,
    rng: &mut R,
) -> Result<String> {
    let name = claim_name(words, style, rng, |n| !used.contains(n))?;
    used.insert(name.clone());
    Ok(name)
}

/// Parse a word list: one word per line, blank lines skipped.
pub fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
