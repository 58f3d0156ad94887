//! The `estiquiz answer` command.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use estiquiz_core::model::{Answer, Estimate, Question, QuizResult};
use estiquiz_core::scoring::score;
use estiquiz_report::format_input_number;
use estiquiz_store::QuizStore;

use super::open_store;
use super::output::{print_result, OutputFormat};

/// Per-request answering state: who is answering which quiz, and what
/// they have submitted so far.
#[derive(Debug, Clone)]
pub struct AnswerSession {
    quiz: String,
    respondent: String,
    questions: Vec<Question>,
    answers: Vec<Option<Answer>>,
}

impl AnswerSession {
    pub fn new(quiz: String, respondent: String, questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            quiz,
            respondent,
            questions,
            answers,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The answer already given for question `n` (1-based), if any.
    pub fn current(&self, n: usize) -> Option<Answer> {
        self.answers.get(n.checked_sub(1)?).copied().flatten()
    }

    /// Start from a respondent's saved answers. Only positions whose
    /// question still matches are taken over.
    pub fn prefill(&mut self, previous: &QuizResult) {
        for ((slot, question), e) in self
            .answers
            .iter_mut()
            .zip(&self.questions)
            .zip(&previous.estimates)
        {
            if e.question == *question {
                *slot = Some(Answer::new(e.low, e.high));
            }
        }
    }

    /// Record the answer to question `n` (1-based).
    pub fn record(&mut self, n: usize, answer: Answer) -> Result<()> {
        let total = self.questions.len();
        let slot = n
            .checked_sub(1)
            .and_then(|i| self.answers.get_mut(i))
            .with_context(|| format!("question {n} is out of range 1..={total}"))?;
        *slot = Some(answer);
        Ok(())
    }

    /// Replace every answer at once, as read from an answers file.
    pub fn record_all(&mut self, answers: Vec<Option<Answer>>) -> Result<()> {
        anyhow::ensure!(
            answers.len() == self.questions.len(),
            "quiz {} has {} questions but {} answers were given",
            self.quiz,
            self.questions.len(),
            answers.len()
        );
        self.answers = answers;
        Ok(())
    }

    /// Score the submitted answers.
    pub fn finish(self, timestamp: DateTime<Utc>) -> Result<QuizResult> {
        let estimates = Estimate::from_parts(&self.questions, &self.answers)?;
        Ok(score(
            Some(self.quiz),
            Some(self.respondent),
            timestamp,
            estimates,
        )?)
    }
}

fn read_line<R: BufRead>(input: &mut R, n: usize) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    anyhow::ensure!(read > 0, "input ended before question {n} was answered");
    Ok(line)
}

/// Ask every question in turn, reading a low and a high bound for each.
///
/// When the question already has an answer, two blank lines keep it.
pub fn collect_interactive<R: BufRead, W: Write>(
    session: &mut AnswerSession,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let total = session.questions().len();
    for n in 1..=total {
        let text = session.questions()[n - 1].text.clone();
        writeln!(output, "\nQuestion {n} of {total}: {text}")?;
        if let Some(previous) = session.current(n) {
            writeln!(
                output,
                "  (previous answer: {} to {}, press Enter twice to keep it)",
                format_input_number(previous.low),
                format_input_number(previous.high)
            )?;
        }

        write!(output, "  low: ")?;
        output.flush()?;
        let low = read_line(input, n)?;
        write!(output, "  high: ")?;
        output.flush()?;
        let high = read_line(input, n)?;

        let keep = low.trim().is_empty() && high.trim().is_empty();
        let answer = match session.current(n) {
            Some(previous) if keep => previous,
            _ => Answer::parse(&low, &high)
                .with_context(|| format!("question {n} of {total}"))?,
        };
        session.record(n, answer)?;
    }
    Ok(())
}

fn load_answers(path: &Path) -> Result<Vec<Option<Answer>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers file: {}", path.display()))
}

pub fn execute(
    quiz: String,
    respondent: Option<String>,
    answers_path: Option<PathBuf>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let store = open_store(config_path)?;
    let questions = store.load_quiz(&quiz)?.questions();
    let respondent = respondent.unwrap_or_else(|| Uuid::new_v4().simple().to_string());
    tracing::debug!(quiz = %quiz, respondent = %respondent, "answering");

    let resuming = store.result_file(&quiz, &respondent).is_file();
    let mut session = AnswerSession::new(quiz, respondent, questions);
    match answers_path {
        Some(path) => session.record_all(load_answers(&path)?)?,
        None => {
            if resuming {
                let previous = store.load_result(&session.quiz, &session.respondent)?;
                session.prefill(&previous);
            }
            let stdin = std::io::stdin();
            let stderr = std::io::stderr();
            collect_interactive(&mut session, &mut stdin.lock(), &mut stderr.lock())?;
        }
    }

    let result = session.finish(Utc::now())?;
    store.save_result(&result)?;

    print_result(&result, format)?;
    if format != OutputFormat::Json {
        println!(
            "\nSaved. View again with: estiquiz results {} {}",
            result.quiz_name.as_deref().unwrap_or_default(),
            result.respondent_id.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session() -> AnswerSession {
        AnswerSession::new(
            "otter-lamp".into(),
            "r1".into(),
            vec![Question::new("Nile (km)", 6650.0), Question::new("Everest (m)", 8849.0)],
        )
    }

    #[test]
    fn interactive_answers_are_scored() {
        let mut s = session();
        let mut input = Cursor::new("6000\n7000\n9000\n9500\n");
        let mut output = Vec::new();
        collect_interactive(&mut s, &mut input, &mut output).unwrap();

        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.contains("Question 2 of 2: Everest (m)"));

        let result = s.finish(Utc::now()).unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.too_high_count, 1);
        assert_eq!(result.respondent_id.as_deref(), Some("r1"));
    }

    #[test]
    fn interactive_rejects_non_numbers() {
        let mut s = session();
        let mut input = Cursor::new("six\n7000\n");
        let err = collect_interactive(&mut s, &mut input, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("not a number"));
    }

    #[test]
    fn interactive_early_eof() {
        let mut s = session();
        let mut input = Cursor::new("1\n2\n3\n");
        let err = collect_interactive(&mut s, &mut input, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("question 2"));
    }

    #[test]
    fn incomplete_session_cannot_finish() {
        let mut s = session();
        s.record(1, Answer::new(1.0, 2.0)).unwrap();
        let err = s.finish(Utc::now()).unwrap_err();
        assert!(err.to_string().contains("question 2 has no answer"));
    }

    #[test]
    fn prefilled_answers_can_be_kept_or_replaced() {
        let mut s = session();
        let mut first = Cursor::new("6000\n7000\n9000\n9500\n");
        collect_interactive(&mut s, &mut first, &mut Vec::new()).unwrap();
        let previous = s.finish(Utc::now()).unwrap();

        let mut again = session();
        again.prefill(&previous);
        assert_eq!(again.current(1), Some(Answer::new(6000.0, 7000.0)));

        let mut input = Cursor::new("\n\n8000\n9000\n");
        let mut output = Vec::new();
        collect_interactive(&mut again, &mut input, &mut output).unwrap();
        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.contains("previous answer: 6000 to 7000"));

        let result = again.finish(Utc::now()).unwrap();
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.estimates[0].low, 6000.0);
    }

    #[test]
    fn prefill_skips_changed_questions() {
        let mut old = session();
        old.record_all(vec![Some(Answer::new(1.0, 2.0)), Some(Answer::new(3.0, 4.0))])
            .unwrap();
        let mut previous = old.finish(Utc::now()).unwrap();
        previous.estimates[1].question.correct_answer = 8848.0;

        let mut s = session();
        s.prefill(&previous);
        assert_eq!(s.current(1), Some(Answer::new(1.0, 2.0)));
        assert_eq!(s.current(2), None);
    }

    #[test]
    fn blank_lines_without_previous_answer_fail() {
        let mut s = session();
        let mut input = Cursor::new("\n\n");
        assert!(collect_interactive(&mut s, &mut input, &mut Vec::new()).is_err());
    }

    #[test]
    fn record_out_of_range() {
        let mut s = session();
        assert!(s.record(0, Answer::new(1.0, 2.0)).is_err());
        assert!(s.record(3, Answer::new(1.0, 2.0)).is_err());
        assert_eq!(s.current(5), None);
    }

    #[test]
    fn record_all_checks_length() {
        let mut s = session();
        assert!(s.record_all(vec![Some(Answer::new(1.0, 2.0))]).is_err());
        s.record_all(vec![Some(Answer::new(1.0, 2.0)), Some(Answer::new(3.0, 4.0))])
            .unwrap();
        assert_eq!(s.current(2), Some(Answer::new(3.0, 4.0)));
    }
}
