//! Interval scoring for a single respondent.

use chrono::{DateTime, Utc};

use crate::error::{QuizError, Result};
use crate::model::{Estimate, Outcome, QuizResult};

/// Classify an estimate against its true answer `a`.
///
/// Precedence: `a < low` is `TooHigh`, then `a <= high` is `Correct`,
/// otherwise `TooLow`. Both bounds are inclusive.
pub fn classify(estimate: &Estimate) -> Outcome {
    let a = estimate.answer();
    if a < estimate.low {
        Outcome::TooHigh
    } else if a <= estimate.high {
        Outcome::Correct
    } else {
        Outcome::TooLow
    }
}

/// Outcome counts for a sequence of estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub too_low: usize,
    pub too_high: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::TooLow => self.too_low += 1,
            Outcome::TooHigh => self.too_high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.too_low + self.too_high
    }

    /// Fraction of estimates that bracket the true answer.
    ///
    /// `None` when nothing has been recorded.
    pub fn fraction_correct(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.correct as f64 / n as f64),
        }
    }
}

impl FromIterator<Outcome> for Tally {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for outcome in iter {
            tally.record(outcome);
        }
        tally
    }
}

fn check_finite(index: usize, estimate: &Estimate) -> Result<()> {
    let fields = [
        ("low", estimate.low),
        ("high", estimate.high),
        ("correct answer", estimate.answer()),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(QuizError::MalformedInput(format!(
                "question {}: {name} is not a finite number",
                index + 1
            )));
        }
    }
    Ok(())
}

/// Score one respondent's estimates into a [`QuizResult`].
///
/// Fails on an empty estimate list and on non-finite values rather than
/// producing `NaN`.
pub fn score(
    quiz_name: Option<String>,
    respondent_id: Option<String>,
    timestamp: DateTime<Utc>,
    estimates: Vec<Estimate>,
) -> Result<QuizResult> {
    if estimates.is_empty() {
        return Err(QuizError::EmptyInput("no estimates to score"));
    }
    for (i, e) in estimates.iter().enumerate() {
        check_finite(i, e)?;
    }

    let tally: Tally = estimates.iter().map(classify).collect();
    let fraction_correct = tally
        .fraction_correct()
        .ok_or(QuizError::EmptyInput("no estimates to score"))?;

    Ok(QuizResult {
        quiz_name,
        respondent_id,
        timestamp,
        estimates,
        correct_count: tally.correct,
        too_low_count: tally.too_low,
        too_high_count: tally.too_high,
        fraction_correct,
    })
}
