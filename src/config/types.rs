//! Configuration type definitions.

use super::defaults::{
    WeightPreset, DEFAULT_SLIDER_STEP, DEFAULT_STRONG_THRESHOLD, DEFAULT_TICK_RATE_MS,
};
use crate::model::{RegionFilter, ScoreWeights};
use crate::reports::ReportFormat;
use crate::scoring::DEFAULT_CAPACITY;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration.
///
/// Loaded from `.franchise-ranker.yaml` (see [`super::file`]) and layered
/// with command-line overrides via [`AppConfig::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Weighting and filter defaults
    pub scoring: ScoringConfig,
    /// Report output settings
    pub output: OutputConfig,
    /// Dashboard settings
    pub tui: TuiConfig,
}

impl AppConfig {
    /// Weights to rank with: explicit weights win over the preset.
    #[must_use]
    pub fn resolved_weights(&self) -> ScoreWeights {
        self.scoring
            .weights
            .unwrap_or_else(|| self.scoring.preset.weights())
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Scoring defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Named weight preset used when `weights` is not set
    pub preset: WeightPreset,
    /// Explicit weight vector; normalized before use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
    /// Starting filter context: "Global" or a region code
    pub region: RegionFilter,
    /// Score at or above which a title counts as a strong contender
    #[schemars(range(min = 0.0, max = 100.0))]
    pub strong_threshold: f64,
    /// Number of rankings kept in memory by the dashboard
    #[schemars(range(min = 1))]
    pub cache_capacity: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            preset: WeightPreset::Balanced,
            weights: None,
            region: RegionFilter::Global,
            strong_threshold: DEFAULT_STRONG_THRESHOLD,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Scoring values named explicitly on the command line.
///
/// Unlike the override config passed to [`AppConfig::merge`], a `Some` here
/// wins even when it equals the built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExplicitScoring {
    pub preset: Option<WeightPreset>,
    pub region: Option<RegionFilter>,
    pub strong_threshold: Option<f64>,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Only report the top N titles
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub limit: Option<usize>,
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Event poll interval in milliseconds
    #[schemars(range(min = 10))]
    pub tick_rate_ms: u64,
    /// Amount a single key press moves a weight slider
    #[schemars(range(min = 0.0, max = 0.5))]
    pub slider_step: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            slider_step: DEFAULT_SLIDER_STEP,
        }
    }
}
