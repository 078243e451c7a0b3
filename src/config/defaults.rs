//! Default values and named weight presets.

use crate::model::ScoreWeights;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default score at or above which a title is a strong contender.
pub const DEFAULT_STRONG_THRESHOLD: f64 = 70.0;

/// Default dashboard event poll interval.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Default weight change per slider key press.
pub const DEFAULT_SLIDER_STEP: f64 = 0.05;

// ============================================================================
// Weight Presets
// ============================================================================

/// Named weight vectors for common evaluation strategies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WeightPreset {
    /// The demo formula: completion first, then rewatch and return
    #[default]
    #[value(alias = "default")]
    Balanced,
    /// Emphasizes finishing, rewatching and coming back
    #[value(alias = "loyalty")]
    Retention,
    /// Emphasizes multi-region strength and audience breadth
    #[value(alias = "global")]
    Reach,
    /// Emphasizes binge intensity
    #[value(alias = "binge-intensity")]
    Binge,
    /// Every metric weighted 1/6
    #[value(alias = "flat")]
    Equal,
}

impl WeightPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Retention => "retention",
            Self::Reach => "reach",
            Self::Binge => "binge",
            Self::Equal => "equal",
        }
    }

    /// Parse a preset from a string name or alias.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "balanced" | "default" => Some(Self::Balanced),
            "retention" | "loyalty" => Some(Self::Retention),
            "reach" | "global" => Some(Self::Reach),
            "binge" | "binge-intensity" | "binge_intensity" => Some(Self::Binge),
            "equal" | "flat" => Some(Self::Equal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Balanced => "Completion-led demo formula",
            Self::Retention => "Completion, rewatch and 7-day return weighted up",
            Self::Reach => "Multi-region strength and audience breadth weighted up",
            Self::Binge => "Binge intensity weighted up",
            Self::Equal => "Every metric weighted equally",
        }
    }

    /// The weight vector for this preset; every preset sums to 1.0.
    #[must_use]
    pub fn weights(&self) -> ScoreWeights {
        match self {
            Self::Balanced => ScoreWeights::default(),
            Self::Retention => ScoreWeights::new([0.30, 0.25, 0.25, 0.05, 0.05, 0.10]),
            Self::Reach => ScoreWeights::new([0.15, 0.10, 0.10, 0.30, 0.25, 0.10]),
            Self::Binge => ScoreWeights::new([0.15, 0.15, 0.15, 0.10, 0.10, 0.35]),
            Self::Equal => ScoreWeights::equal(),
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Balanced,
            Self::Retention,
            Self::Reach,
            Self::Binge,
            Self::Equal,
        ]
    }
}

impl std::fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricKey;

    #[test]
    fn test_presets_sum_to_one() {
        for preset in WeightPreset::all() {
            let total = preset.weights().total();
            assert!((total - 1.0).abs() < 1e-9, "{preset} sums to {total}");
        }
    }

    #[test]
    fn test_preset_from_name_aliases() {
        assert_eq!(WeightPreset::from_name("Default"), Some(WeightPreset::Balanced));
        assert_eq!(WeightPreset::from_name("flat"), Some(WeightPreset::Equal));
        assert_eq!(WeightPreset::from_name("binge_intensity"), Some(WeightPreset::Binge));
        assert_eq!(WeightPreset::from_name("nope"), None);
    }

    #[test]
    fn test_binge_preset_leads_with_binge() {
        let weights = WeightPreset::Binge.weights();
        let max = weights
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(m, _)| m);
        assert_eq!(max, Some(MetricKey::BingeIntensity));
    }
}
