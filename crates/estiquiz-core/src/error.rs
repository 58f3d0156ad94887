//! Error types for scoring and aggregation.
//!
//! Every variant is a local validation failure. Nothing here is transient,
//! so callers should abort the current operation and report the error.

use thiserror::Error;

/// Errors produced by the scorer, the aggregator and the name generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    /// An estimate is missing a bound or carries a non-numeric value.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Nothing to score or aggregate.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Result sets do not share the same question sequence.
    #[error("misaligned input at question {index}: {reason}")]
    MisalignedInput { index: usize, reason: String },

    /// Every generated name collided with one already in use.
    #[error("no unused name found after {attempts} attempts")]
    NamingExhausted { attempts: u32 },
}

impl QuizError {
    /// Returns `true` if the error was caused by the shape of the input data
    /// rather than by naming.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, QuizError::NamingExhausted { .. })
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            QuizError::EmptyInput("no estimates").to_string(),
            "empty input: no estimates"
        );
        let err = QuizError::MisalignedInput {
            index: 2,
            reason: "question text differs".into(),
        };
        assert_eq!(
            err.to_string(),
            "misaligned input at question 2: question text differs"
        );
    }

    #[test]
    fn input_error_classification() {
        assert!(QuizError::MalformedInput("x".into()).is_input_error());
        assert!(!QuizError::NamingExhausted { attempts: 3 }.is_input_error());
    }
}
