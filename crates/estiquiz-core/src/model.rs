//! Core data model types for estiquiz.
//!
//! Questions, submitted intervals, estimates and the persisted result
//! record. Field names on disk use camelCase.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// A question with its true numeric answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question as shown to the respondent.
    pub text: String,
    /// The value the respondent is trying to bracket.
    pub correct_answer: f64,
}

impl Question {
    pub fn new(text: impl Into<String>, correct_answer: f64) -> Self {
        Self {
            text: text.into(),
            correct_answer,
        }
    }
}

/// A submitted `[low, high]` interval, before it is paired with a question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub low: f64,
    pub high: f64,
}

impl Answer {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Parse the two bounds as typed by a respondent.
    pub fn parse(low: &str, high: &str) -> Result<Self> {
        Ok(Self {
            low: parse_bound("low", low)?,
            high: parse_bound("high", high)?,
        })
    }
}

fn parse_bound(which: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuizError::MalformedInput(format!("missing {which} bound")));
    }
    let value = trimmed.parse::<f64>().map_err(|_| {
        QuizError::MalformedInput(format!("{which} bound is not a number: '{trimmed}'"))
    })?;
    if !value.is_finite() {
        return Err(QuizError::MalformedInput(format!(
            "{which} bound is not finite: '{trimmed}'"
        )));
    }
    Ok(value)
}

/// One respondent's interval for one question.
///
/// `low <= high` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub question: Question,
    pub low: f64,
    pub high: f64,
}

impl Estimate {
    pub fn new(question: Question, low: f64, high: f64) -> Self {
        Self {
            question,
            low,
            high,
        }
    }

    /// Pair each question with the respondent's answer at the same position.
    ///
    /// Unanswered positions are reported as malformed input.
    pub fn from_parts(questions: &[Question], answers: &[Option<Answer>]) -> Result<Vec<Self>> {
        if questions.len() != answers.len() {
            return Err(QuizError::MisalignedInput {
                index: questions.len().min(answers.len()),
                reason: format!(
                    "{} questions but {} answers",
                    questions.len(),
                    answers.len()
                ),
            });
        }

        questions
            .iter()
            .zip(answers)
            .enumerate()
            .map(|(i, (q, a))| match a {
                Some(a) => Ok(Estimate::new(q.clone(), a.low, a.high)),
                None => Err(QuizError::MalformedInput(format!(
                    "question {} has no answer",
                    i + 1
                ))),
            })
            .collect()
    }

    /// The true answer this estimate is scored against.
    pub fn answer(&self) -> f64 {
        self.question.correct_answer
    }
}

/// How an estimate compares with the true answer.
///
/// `TooHigh` means the interval started above the true value; `TooLow`
/// means the interval ended below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TooLow,
    Correct,
    TooHigh,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::TooLow => write!(f, "too_low"),
            Outcome::Correct => write!(f, "correct"),
            Outcome::TooHigh => write!(f, "too_high"),
        }
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "too_low" => Ok(Outcome::TooLow),
            "correct" => Ok(Outcome::Correct),
            "too_high" => Ok(Outcome::TooHigh),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// An estimate together with its outcome. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredEstimate<'a> {
    pub estimate: &'a Estimate,
    pub outcome: Outcome,
}

/// One respondent's scored quiz, or an aggregated view of many.
///
/// Aggregated views carry no quiz name or respondent id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub quiz_name: Option<String>,
    pub respondent_id: Option<String>,
    #[serde(with = "compact_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub estimates: Vec<Estimate>,
    pub correct_count: usize,
    pub too_low_count: usize,
    pub too_high_count: usize,
    pub fraction_correct: f64,
}

impl QuizResult {
    /// Number of scored estimates.
    pub fn total(&self) -> usize {
        self.estimates.len()
    }

    /// Each estimate paired with its outcome, in question order.
    pub fn scored(&self) -> impl Iterator<Item = ScoredEstimate<'_>> {
        self.estimates.iter().map(|e| ScoredEstimate {
            estimate: e,
            outcome: crate::scoring::classify(e),
        })
    }
}

/// A reusable, ordered mapping of question text to correct answer.
pub type QuestionSet = IndexMap<String, f64>;

/// Turn a question set into the ordered question list.
pub fn questions_from_set(set: &QuestionSet) -> Vec<Question> {
    set.iter()
        .map(|(text, answer)| Question::new(text.clone(), *answer))
        .collect()
}

/// A named, timestamped snapshot of a question set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(with = "compact_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Name of the question set this quiz was created from.
    pub set: String,
    pub questions: QuestionSet,
}

impl Quiz {
    pub fn new(set: impl Into<String>, questions: QuestionSet, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            set: set.into(),
            questions,
        }
    }

    pub fn questions(&self) -> Vec<Question> {
        questions_from_set(&self.questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Serde adapter for the compact UTC form `20240131T235959Z`.
pub mod compact_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y%m%dT%H%M%SZ";

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, FORMAT).map(|n| n.and_utc())
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
