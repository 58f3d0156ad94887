//! Markdown and JSON rendering of results and summaries.

use anyhow::{Context, Result};

use estiquiz_core::model::{Outcome, QuizResult};
use estiquiz_core::statistics::Summary;

use crate::format::{format_number, format_percentage, plural_s};

/// Short label used in tables.
pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "correct",
        Outcome::TooLow => "too low",
        Outcome::TooHigh => "too high",
    }
}

/// One-line tally such as `2 of 3 correct (67%), 1 too low, 0 too high`.
pub fn headline(result: &QuizResult) -> String {
    format!(
        "{} of {} correct ({}), {} too low, {} too high",
        result.correct_count,
        result.total(),
        format_percentage(result.fraction_correct),
        result.too_low_count,
        result.too_high_count
    )
}

fn estimates_table(md: &mut String, result: &QuizResult) {
    md.push_str("| # | Question | Answer | Low | High | Outcome |\n");
    md.push_str("|---|----------|--------|-----|------|---------|\n");
    for (i, s) in result.scored().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            s.estimate.question.text.replace('|', "\\|"),
            format_number(s.estimate.answer()),
            format_number(s.estimate.low),
            format_number(s.estimate.high),
            outcome_label(s.outcome)
        ));
    }
}

/// Render one respondent's result.
pub fn result_to_markdown(result: &QuizResult) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "## Results for {}\n\n",
        result.quiz_name.as_deref().unwrap_or("quiz")
    ));
    if let Some(id) = &result.respondent_id {
        md.push_str(&format!("Respondent: `{id}`  \n"));
    }
    md.push_str(&format!(
        "Completed: {}\n\n",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("**{}**\n\n", headline(result)));
    estimates_table(&mut md, result);

    md
}

/// Render the extremes and means views of a quiz.
pub fn summary_to_markdown(quiz: &str, summary: &Summary) -> String {
    let mut md = String::new();
    let n = summary.respondents;

    md.push_str(&format!("## Summary for {quiz}\n\n"));
    md.push_str(&format!("Combined from {n} respondent{}.\n\n", plural_s(n)));

    md.push_str("### Extremes\n\n");
    md.push_str("Smallest low and largest high across respondents.\n\n");
    md.push_str(&format!("**{}**\n\n", headline(&summary.extremes)));
    estimates_table(&mut md, &summary.extremes);
    md.push('\n');

    md.push_str("### Means\n\n");
    md.push_str("Average low and average high across respondents.\n\n");
    md.push_str(&format!("**{}**\n\n", headline(&summary.means)));
    estimates_table(&mut md, &summary.means);

    md
}

/// Pretty JSON for machine consumers.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use estiquiz_core::model::{Estimate, Question};
    use estiquiz_core::scoring::score;
    use estiquiz_core::statistics::summarize;

    fn make_result(id: &str, low: f64, high: f64) -> QuizResult {
        let ts = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        let estimates = vec![
            Estimate::new(Question::new("Population of Iceland", 387_758.0), low, high),
            Estimate::new(Question::new("Pipe | in text", 1.0), 2.0, 3.0),
        ];
        score(Some("otter-lamp".into()), Some(id.into()), ts, estimates).unwrap()
    }

    #[test]
    fn headline_counts() {
        let result = make_result("r1", 300_000.0, 400_000.0);
        assert_eq!(
            headline(&result),
            "1 of 2 correct (50%), 0 too low, 1 too high"
        );
    }

    #[test]
    fn result_markdown_contains_rows() {
        let md = result_to_markdown(&make_result("r1", 300_000.0, 400_000.0));
        assert!(md.contains("## Results for otter-lamp"));
        assert!(md.contains("`r1`"));
        let row = "| 1 | Population of Iceland | 387,758 | 300,000 | 400,000 | correct |";
        assert!(md.contains(row));
        assert!(md.contains("Pipe \\| in text"));
        assert!(md.contains("too high"));
        assert!(md.contains("2024-02-03 04:05:06 UTC"));
    }

    #[test]
    fn summary_markdown_has_both_views() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        let results = vec![
            make_result("a", 100.0, 200.0),
            make_result("b", 500_000.0, 600_000.0),
        ];
        let summary = summarize(&results, ts).unwrap();
        let md = summary_to_markdown("otter-lamp", &summary);
        assert!(md.contains("Combined from 2 respondents."));
        assert!(md.contains("### Extremes"));
        assert!(md.contains("### Means"));
        assert!(md.contains("| 1 | Population of Iceland | 387,758 | 100 | 600,000 | correct |"));
        let row = "| 1 | Population of Iceland | 387,758 | 250,050 | 300,100 | too low |";
        assert!(md.contains(row));
    }

    #[test]
    fn json_is_camel_case() {
        let json = to_json(&make_result("r1", 1.0, 2.0)).unwrap();
        assert!(json.contains("\"fractionCorrect\""));
    }
}
