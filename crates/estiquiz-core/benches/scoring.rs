use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use estiquiz_core::model::{Estimate, Question, QuizResult};
use estiquiz_core::scoring::{classify, score};
use estiquiz_core::statistics::summarize;

fn make_estimates(n: usize, offset: f64) -> Vec<Estimate> {
    (0..n)
        .map(|i| {
            let a = i as f64 * 10.0;
            Estimate::new(Question::new(format!("q{i}"), a), a - 5.0 + offset, a + 5.0 + offset)
        })
        .collect()
}

fn make_results(respondents: usize, questions: usize) -> Vec<QuizResult> {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..respondents)
        .map(|r| {
            score(
                Some("bench".into()),
                Some(format!("r{r}")),
                ts,
                make_estimates(questions, r as f64),
            )
            .unwrap()
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let estimate = Estimate::new(Question::new("q", 50.0), 40.0, 60.0);
    c.bench_function("classify", |b| b.iter(|| classify(black_box(&estimate))));
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for n in [10, 100, 1000] {
        let estimates = make_estimates(n, 3.0);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| score(None, None, ts, black_box(estimates.clone())))
        });
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for respondents in [10, 100] {
        let results = make_results(respondents, 20);
        group.bench_function(format!("respondents={respondents}"), |b| {
            b.iter(|| summarize(black_box(&results), ts))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_score, bench_summarize);
criterion_main!(benches);
