//! Weight normalization and slider rebalancing.
//!
//! Both functions are pure: they take the current vector by reference and
//! return a fresh one that sums to 1.0.

use super::numeric::clamp;
use crate::model::{MetricKey, ScoreWeights};

/// Negative and non-finite entries count as zero weight.
fn floor_at_zero(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// Scale weights so they sum to 1.0.
///
/// Entries are floored at zero first. A non-positive total (all zeros)
/// falls back to equal weights of 1/6.
#[must_use]
pub fn normalize(weights: &ScoreWeights) -> ScoreWeights {
    let floored = ScoreWeights::from_fn(|metric| floor_at_zero(weights[metric]));
    let total = floored.total();
    if total <= 0.0 || !total.is_finite() {
        return ScoreWeights::equal();
    }
    ScoreWeights::from_fn(|metric| floored[metric] / total)
}

/// Set `changed` to `next_value` and redistribute the remainder.
///
/// `next_value` is clamped to `[0, 1]` and negative current weights count
/// as zero. The remaining budget is shared among
/// the other five metrics in proportion to their current weights, or
/// equally when they are all zero. The result goes through [`normalize`] so
/// the sum-to-one invariant holds regardless of floating-point drift.
#[must_use]
pub fn rebalance(current: &ScoreWeights, changed: MetricKey, next_value: f64) -> ScoreWeights {
    let bounded = clamp(next_value, 0.0, 1.0);
    let remaining = 1.0 - bounded;
    let other_total: f64 = current
        .iter()
        .filter(|(metric, _)| *metric != changed)
        .map(|(_, weight)| floor_at_zero(weight))
        .sum();
    let others = (MetricKey::COUNT - 1) as f64;

    let next = ScoreWeights::from_fn(|metric| {
        if metric == changed {
            bounded
        } else if other_total <= 0.0 {
            remaining / others
        } else {
            floor_at_zero(current[metric]) / other_total * remaining
        }
    });

    tracing::trace!(metric = %changed, value = bounded, "rebalanced weights");
    normalize(&next)
}
