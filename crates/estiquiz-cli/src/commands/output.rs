//! Console rendering shared by the result-printing commands.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};

use estiquiz_core::model::QuizResult;
use estiquiz_core::statistics::Summary;
use estiquiz_report::markdown::{
    headline, outcome_label, result_to_markdown, summary_to_markdown, to_json,
};
use estiquiz_report::{format_number, plural_s};

/// How results are printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table output (default)
    #[default]
    Text,
    /// Markdown tables
    Markdown,
    /// Pretty JSON
    Json,
}

fn estimates_table(result: &QuizResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer", "Low", "High", "Outcome"]);

    for (i, s) in result.scored().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&s.estimate.question.text),
            Cell::new(format_number(s.estimate.answer())),
            Cell::new(format_number(s.estimate.low)),
            Cell::new(format_number(s.estimate.high)),
            Cell::new(outcome_label(s.outcome)),
        ]);
    }

    table
}

pub fn print_result(result: &QuizResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(result)?),
        OutputFormat::Markdown => println!("{}", result_to_markdown(result)),
        OutputFormat::Text => {
            if let Some(quiz) = &result.quiz_name {
                println!("Quiz: {quiz}");
            }
            if let Some(id) = &result.respondent_id {
                println!("Respondent: {id}");
            }
            println!("{}", estimates_table(result));
            println!("{}", headline(result));
        }
    }
    Ok(())
}

pub fn print_summary(quiz: &str, summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(summary)?),
        OutputFormat::Markdown => println!("{}", summary_to_markdown(quiz, summary)),
        OutputFormat::Text => {
            let n = summary.respondents;
            println!("Quiz: {quiz}");
            println!("Combined from {n} respondent{}", plural_s(n));

            println!("\nExtremes (smallest low, largest high):");
            println!("{}", estimates_table(&summary.extremes));
            println!("{}", headline(&summary.extremes));

            println!("\nMeans (average low, average high):");
            println!("{}", estimates_table(&summary.means));
            println!("{}", headline(&summary.means));
        }
    }
    Ok(())
}
