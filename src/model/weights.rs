//! Weight vector over the six metrics.

use super::metric::{MetricKey, MetricMap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Relative importance of each metric.
///
/// Public scoring operations always return vectors that sum to 1.0; values
/// read from files or CLI flags are normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ScoreWeights(MetricMap<f64>);

impl Default for ScoreWeights {
    /// Demo formula: `0.25C + 0.20R + 0.20Ret + 0.15M + 0.10A + 0.10B`.
    fn default() -> Self {
        Self::new([0.25, 0.20, 0.20, 0.15, 0.10, 0.10])
    }
}

impl ScoreWeights {
    /// Create weights from values listed in metric enumeration order.
    #[must_use]
    pub const fn new(values: [f64; MetricKey::COUNT]) -> Self {
        Self(MetricMap::from_array(values))
    }

    /// Build weights by evaluating `f` for each metric.
    pub fn from_fn(f: impl FnMut(MetricKey) -> f64) -> Self {
        Self(MetricMap::from_fn(f))
    }

    /// Equal weight (1/6) on every metric.
    #[must_use]
    pub fn equal() -> Self {
        Self(MetricMap::splat(1.0 / MetricKey::COUNT as f64))
    }

    /// All-zero weights (degenerate input for `normalize`).
    #[must_use]
    pub fn zero() -> Self {
        Self(MetricMap::splat(0.0))
    }

    /// Weight for a single metric.
    #[must_use]
    pub fn get(&self, metric: MetricKey) -> f64 {
        self.0[metric]
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate `(metric, weight)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        self.0.iter().map(|(metric, weight)| (metric, *weight))
    }

    /// Exact bit pattern of every weight, usable as a hash key.
    #[must_use]
    pub fn bit_pattern(&self) -> [u64; MetricKey::COUNT] {
        self.0.as_array().map(f64::to_bits)
    }

    /// Render the weights as a formula such as `0.25C + 0.20R + ...`.
    #[must_use]
    pub fn formula(&self) -> String {
        self.iter()
            .map(|(metric, weight)| format!("{weight:.2}{}", metric.symbol()))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl Index<MetricKey> for ScoreWeights {
    type Output = f64;

    fn index(&self, metric: MetricKey) -> &f64 {
        &self.0[metric]
    }
}

impl IndexMut<MetricKey> for ScoreWeights {
    fn index_mut(&mut self, metric: MetricKey) -> &mut f64 {
        &mut self.0[metric]
    }
}
