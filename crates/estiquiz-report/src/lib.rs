//! estiquiz-report: Presentation of quiz results.
//!
//! Number filters shared by every front end, plus markdown and JSON
//! renderings of a single result and of a quiz summary.

pub mod format;
pub mod markdown;

pub use format::{format_input_number, format_number, format_percentage, plural, plural_s};
