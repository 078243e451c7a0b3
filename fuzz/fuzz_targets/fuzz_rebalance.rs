#![no_main]
use franchise_ranker::{rebalance, MetricKey, ScoreWeights};
use libfuzzer_sys::fuzz_target;

/// Fuzz slider sequences against arbitrary starting weights.
///
/// Every finite, non-negative start must stay on the simplex.
fuzz_target!(|input: ([f64; 6], Vec<(u8, f64)>)| {
    let (start, moves) = input;
    if start.iter().any(|w| !w.is_finite() || *w < 0.0 || *w > 1e12) {
        return;
    }
    let mut weights = ScoreWeights::new(start);
    for (slot, value) in moves {
        let metric = MetricKey::ALL[usize::from(slot) % MetricKey::COUNT];
        weights = rebalance(&weights, metric, value);
        assert!((weights.total() - 1.0).abs() < 1e-6, "{weights:?}");
    }
});
