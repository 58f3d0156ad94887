//! Aggregation of many respondents' intervals into summary views.
//!
//! All inputs are positional: index `i` must refer to the same question in
//! every result. This is checked, and a mismatch is an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::model::{Estimate, Question, QuizResult};
use crate::scoring;

/// Every respondent's bounds for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedEstimate {
    pub question: Question,
    pub lows: Vec<f64>,
    pub highs: Vec<f64>,
}

impl CombinedEstimate {
    fn first(e: &Estimate) -> Self {
        Self {
            question: e.question.clone(),
            lows: vec![e.low],
            highs: vec![e.high],
        }
    }

    fn push(&mut self, e: &Estimate) {
        self.lows.push(e.low);
        self.highs.push(e.high);
    }

    /// The widest envelope: smallest low and largest high.
    pub fn extremes(&self) -> Estimate {
        let low = self.lows.iter().copied().fold(f64::INFINITY, f64::min);
        let high = self.highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Estimate::new(self.question.clone(), low, high)
    }

    /// The average interval.
    pub fn means(&self) -> Estimate {
        Estimate::new(self.question.clone(), mean(&self.lows), mean(&self.highs))
    }
}

/// Falls back to dividing before summing when the plain sum overflows.
fn mean(xs: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let sum = xs.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        xs.iter().map(|x| x / n).sum()
    }
}

fn check_aligned(index: usize, expected: &Question, actual: &Question) -> Result<()> {
    if expected.text != actual.text {
        return Err(QuizError::MisalignedInput {
            index,
            reason: format!("expected question '{}', found '{}'", expected.text, actual.text),
        });
    }
    if expected.correct_answer != actual.correct_answer {
        return Err(QuizError::MisalignedInput {
            index,
            reason: format!(
                "correct answer {} differs from {}",
                actual.correct_answer, expected.correct_answer
            ),
        });
    }
    Ok(())
}

/// Collect each question's bounds across all results.
///
/// The first result fixes the question sequence; every other result must
/// match it in length, text and correct answer.
pub fn combine(results: &[QuizResult]) -> Result<Vec<CombinedEstimate>> {
    let (first, rest) = results
        .split_first()
        .ok_or(QuizError::EmptyInput("no results to aggregate"))?;

    let mut combined: Vec<CombinedEstimate> =
        first.estimates.iter().map(CombinedEstimate::first).collect();

    for result in rest {
        if result.estimates.len() != combined.len() {
            return Err(QuizError::MisalignedInput {
                index: result.estimates.len().min(combined.len()),
                reason: format!(
                    "result {} has {} estimates, expected {}",
                    result.respondent_id.as_deref().unwrap_or("<unnamed>"),
                    result.estimates.len(),
                    combined.len()
                ),
            });
        }
        for (i, (c, e)) in combined.iter_mut().zip(&result.estimates).enumerate() {
            check_aligned(i, &c.question, &e.question)?;
            c.push(e);
        }
    }

    Ok(combined)
}

/// The two aggregated views of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of results aggregated.
    pub respondents: usize,
    pub extremes: QuizResult,
    pub means: QuizResult,
}

/// Combine results, reduce to extremes and means, and score both views.
pub fn summarize(results: &[QuizResult], timestamp: DateTime<Utc>) -> Result<Summary> {
    let combined = combine(results)?;
    tracing::debug!(
        respondents = results.len(),
        questions = combined.len(),
        "aggregating results"
    );

    let extremes = scoring::score(
        None,
        None,
        timestamp,
        combined.iter().map(CombinedEstimate::extremes).collect(),
    )?;
    let means = scoring::score(
        None,
        None,
        timestamp,
        combined.iter().map(CombinedEstimate::means).collect(),
    )?;

    Ok(Summary {
        respondents: results.len(),
        extremes,
        means,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn result(id: &str, intervals: &[(&str, f64, f64, f64)]) -> QuizResult {
        let estimates = intervals
            .iter()
            .map(|&(q, a, low, high)| Estimate::new(Question::new(q, a), low, high))
            .collect();
        scoring::score(Some("quiz".into()), Some(id.into()), ts(), estimates).unwrap()
    }

    #[test]
    fn two_respondents_one_question() {
        let results = vec![
            result("a", &[("q", 25.0, 10.0, 20.0)]),
            result("b", &[("q", 25.0, 30.0, 40.0)]),
        ];
        let summary = summarize(&results, ts()).unwrap();
        assert_eq!(summary.respondents, 2);

        let ext = &summary.extremes.estimates[0];
        assert_eq!((ext.low, ext.high), (10.0, 40.0));
        let mean = &summary.means.estimates[0];
        assert_eq!((mean.low, mean.high), (20.0, 30.0));

        assert_eq!(summary.extremes.correct_count, 1);
        assert_eq!(summary.means.correct_count, 1);
        assert!(summary.extremes.quiz_name.is_none());
        assert!(summary.means.respondent_id.is_none());
    }

    #[test]
    fn extremes_and_means_per_question() {
        let results = vec![
            result("a", &[("x", 5.0, 1.0, 4.0), ("y", 100.0, 90.0, 95.0)]),
            result("b", &[("x", 5.0, 2.0, 9.0), ("y", 100.0, 80.0, 120.0)]),
            result("c", &[("x", 5.0, 3.0, 5.0), ("y", 100.0, 101.0, 130.0)]),
        ];
        let combined = combine(&results).unwrap();
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[1].lows, [90.0, 80.0, 101.0]);

        let ext: Vec<_> = combined
            .iter()
            .map(|c| (c.extremes().low, c.extremes().high))
            .collect();
        assert_eq!(ext, [(1.0, 9.0), (80.0, 130.0)]);

        let means: Vec<_> = combined
            .iter()
            .map(|c| (c.means().low, c.means().high))
            .collect();
        assert!((means[0].0 - 2.0).abs() < 1e-9);
        assert!((means[0].1 - 6.0).abs() < 1e-9);
        assert!((means[1].0 - 90.333_333_333).abs() < 1e-6);
        assert!((means[1].1 - 115.0).abs() < 1e-9);
    }

    #[test]
    fn single_respondent_views_equal_input() {
        let results = vec![result("only", &[("q", 3.0, 1.0, 2.0)])];
        let summary = summarize(&results, ts()).unwrap();
        assert_eq!(summary.extremes.estimates, results[0].estimates);
        assert_eq!(summary.means.estimates, results[0].estimates);
        assert_eq!(summary.means.too_low_count, 1);
    }

    #[test]
    fn means_of_huge_bounds_stay_finite() {
        let results = vec![
            result("a", &[("q", 1e300, 0.0, f64::MAX)]),
            result("b", &[("q", 1e300, -f64::MAX, f64::MAX)]),
        ];
        let summary = summarize(&results, ts()).unwrap();
        let mean = &summary.means.estimates[0];
        assert_eq!(mean.high, f64::MAX);
        assert_eq!(mean.low, -f64::MAX / 2.0);
        assert_eq!(summary.means.correct_count, 1);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let results = vec![
            result("a", &[("q", 7.0, 1.0, 8.0)]),
            result("b", &[("q", 7.0, 2.0, 3.0)]),
        ];
        let first = summarize(&results, ts()).unwrap();
        let second = summarize(&results, ts()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(combine(&[]), Err(QuizError::EmptyInput(_))));
        assert!(matches!(summarize(&[], ts()), Err(QuizError::EmptyInput(_))));
    }

    #[test]
    fn length_mismatch_is_detected() {
        let results = vec![
            result("a", &[("x", 1.0, 0.0, 2.0), ("y", 1.0, 0.0, 2.0)]),
            result("b", &[("x", 1.0, 0.0, 2.0)]),
        ];
        let err = combine(&results).unwrap_err();
        assert!(matches!(err, QuizError::MisalignedInput { index: 1, .. }));
    }

    #[test]
    fn question_order_mismatch_is_detected() {
        let results = vec![
            result("a", &[("x", 1.0, 0.0, 2.0), ("y", 1.0, 0.0, 2.0)]),
            result("b", &[("y", 1.0, 0.0, 2.0), ("x", 1.0, 0.0, 2.0)]),
        ];
        let err = combine(&results).unwrap_err();
        assert!(matches!(err, QuizError::MisalignedInput { index: 0, .. }));
    }

    #[test]
    fn edited_answer_is_detected() {
        let results = vec![
            result("a", &[("x", 1.0, 0.0, 2.0)]),
            result("b", &[("x", 1.5, 0.0, 2.0)]),
        ];
        let err = combine(&results).unwrap_err();
        assert!(err.to_string().contains("correct answer"));
    }
}
