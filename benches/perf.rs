use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cricsquad_engine::composer::{ComposeOptions, RosterConstraints, compose};
use cricsquad_engine::fake_pool;
use cricsquad_engine::pool::ScoringWeights;
use cricsquad_engine::report::build_reports;
use cricsquad_engine::topsis::score;

fn bench_topsis_score(c: &mut Criterion) {
    let pool = fake_pool::generate(11, 6);
    c.bench_function("topsis_score", |b| {
        b.iter(|| {
            let scored = score(black_box(&pool), ScoringWeights::default()).unwrap();
            black_box(scored.len());
        })
    });
}

fn bench_compose_small(c: &mut Criterion) {
    // 2 candidates per slot: 2^11 = 2048 enumerated squads.
    let pool = fake_pool::generate(3, 2);
    let scored = score(&pool, ScoringWeights::default()).unwrap();
    let constraints = RosterConstraints::default();
    let options = ComposeOptions::default();
    c.bench_function("compose_small", |b| {
        b.iter(|| {
            let squads = compose(black_box(&scored), &constraints, &options).unwrap();
            black_box(squads.len());
        })
    });
}

fn bench_compose_large(c: &mut Criterion) {
    // 3 candidates per slot: 3^11 = 177_147 enumerated squads.
    let pool = fake_pool::generate(3, 3);
    let scored = score(&pool, ScoringWeights::default()).unwrap();
    let constraints = RosterConstraints::default();
    let options = ComposeOptions::default();
    c.bench_function("compose_large", |b| {
        b.iter(|| {
            let squads = compose(black_box(&scored), &constraints, &options).unwrap();
            black_box(squads.len());
        })
    });
}

fn bench_compose_large_parallel(c: &mut Criterion) {
    let pool = fake_pool::generate(3, 3);
    let scored = score(&pool, ScoringWeights::default()).unwrap();
    let constraints = RosterConstraints::default();
    let options = ComposeOptions {
        parallel: true,
        ..ComposeOptions::default()
    };
    c.bench_function("compose_large_parallel", |b| {
        b.iter(|| {
            let squads = compose(black_box(&scored), &constraints, &options).unwrap();
            black_box(squads.len());
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let pool = fake_pool::generate(7, 2);
    let constraints = RosterConstraints::default();
    let options = ComposeOptions::default();
    c.bench_function("score_compose_report", |b| {
        b.iter(|| {
            let scored = score(black_box(&pool), ScoringWeights::default()).unwrap();
            let squads = compose(&scored, &constraints, &options).unwrap();
            let reports = build_reports(&squads);
            black_box(reports.len());
        })
    });
}

criterion_group!(
    perf,
    bench_topsis_score,
    bench_compose_small,
    bench_compose_large,
    bench_compose_large_parallel,
    bench_full_pipeline
);
criterion_main!(perf);
