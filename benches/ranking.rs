//! Benchmarks for the ranking engine.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use franchise_ranker::{
    compare_regions, rank, rebalance, Catalog, MetricKey, RankingCache, RegionFilter,
    ScoreWeights, TitleProfile,
};
use std::hint::black_box;

/// The builtin titles repeated with unique ids and jittered metrics.
fn scaled_titles(copies: usize) -> Vec<TitleProfile> {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let base = catalog.titles();
    (0..copies)
        .flat_map(move |copy| {
            base.iter().cloned().map(move |mut title| {
                let jitter = (copy % 17) as f64 * 0.001;
                title.id = format!("{}-{copy}", title.id);
                title.completion_rate += jitter;
                title.rewatch_rate += jitter / 2.0;
                title
            })
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let weights = ScoreWeights::default();
    for copies in [1, 10, 100] {
        let titles = scaled_titles(copies);
        group.bench_with_input(BenchmarkId::from_parameter(titles.len()), &titles, |b, titles| {
            b.iter(|| rank(black_box(titles), black_box(&weights), RegionFilter::Global));
        });
    }
    group.finish();
}

fn bench_rebalance(c: &mut Criterion) {
    c.bench_function("rebalance_slider_sweep", |b| {
        b.iter(|| {
            let mut weights = ScoreWeights::default();
            for step in 0..=20 {
                let metric = MetricKey::ALL[step % MetricKey::COUNT];
                weights = rebalance(black_box(&weights), metric, step as f64 / 20.0);
            }
            weights
        });
    });
}

fn bench_compare(c: &mut Criterion) {
    let catalog = Catalog::new(scaled_titles(50)).expect("scaled catalog");
    let weights = ScoreWeights::default();
    c.bench_function("compare_regions_cold", |b| {
        b.iter(|| {
            let cache = RankingCache::new(16);
            compare_regions(black_box(&catalog), &weights, &cache)
        });
    });

    let warm = RankingCache::new(16);
    c.bench_function("compare_regions_warm", |b| {
        b.iter(|| compare_regions(black_box(&catalog), &weights, &warm));
    });
}

criterion_group!(benches, bench_rank, bench_rebalance, bench_compare);
criterion_main!(benches);
