//! Catalog loading and weight resolution.
//!
//! Shared by every command that ranks: pick the catalog, settle the
//! starting weight vector, then replay command-line slider changes on it.

use crate::catalog::Catalog;
use crate::config::{AppConfig, Validatable};
use crate::error::RankerError;
use crate::model::{MetricKey, ScoreWeights};
use crate::scoring::{normalize, rebalance};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single `metric=value` slider change given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightOverride {
    pub metric: MetricKey,
    pub value: f64,
}

impl FromStr for WeightOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (metric, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected METRIC=VALUE, got '{s}'"))?;
        let metric: MetricKey = metric.trim().parse().map_err(|e| format!("{e}"))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid weight '{}' for {metric}", value.trim()))?;
        if !value.is_finite() {
            return Err(format!("weight for {metric} must be finite"));
        }
        Ok(Self { metric, value })
    }
}

impl fmt::Display for WeightOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.metric, self.value)
    }
}

/// Load the catalog at `path`, or the bundled one when no path is given.
pub fn load_catalog(path: Option<&Path>, quiet: bool) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        None => Catalog::builtin().context("Failed to load bundled catalog")?,
    };
    if !quiet {
        tracing::info!(
            "Catalog {} with {} titles",
            catalog.version_hex(),
            catalog.len()
        );
    }
    Ok(catalog)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightsDocument {
    Wrapped { weights: ScoreWeights },
    Bare(ScoreWeights),
}

/// Read a weight vector from a JSON or YAML file.
///
/// The file holds either the bare metric map or an object with a `weights`
/// key. The result is normalized.
pub fn load_weights_file(path: &Path) -> Result<ScoreWeights> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file: {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let document: WeightsDocument = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid weights JSON: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid weights YAML: {}", path.display()))?
    };
    let weights = match document {
        WeightsDocument::Wrapped { weights } | WeightsDocument::Bare(weights) => weights,
    };
    let problems = weights.validate();
    if !problems.is_empty() {
        let details: Vec<String> = problems.iter().map(ToString::to_string).collect();
        return Err(RankerError::validation(details.join("; ")))
            .with_context(|| format!("Invalid weights file: {}", path.display()));
    }
    Ok(normalize(&weights))
}

/// Settle the weight vector for a command.
///
/// A weights file wins over the configured weights or preset. Each override
/// is then applied in order through [`rebalance`], exactly as successive
/// slider moves would be.
pub fn resolve_weights(
    config: &AppConfig,
    weights_file: Option<&Path>,
    overrides: &[WeightOverride],
) -> Result<ScoreWeights> {
    let base = match weights_file {
        Some(path) => load_weights_file(path)?,
        None => normalize(&config.resolved_weights()),
    };
    let weights = overrides.iter().fold(base, |current, change| {
        tracing::debug!("Rebalancing {}", change);
        rebalance(&current, change.metric, change.value)
    });
    tracing::debug!("Resolved weights: {}", weights.formula());
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightPreset;
    use std::io::Write;

    #[test]
    fn test_parse_override() {
        let change: WeightOverride = "binge=0.4".parse().unwrap();
        assert_eq!(change.metric, MetricKey::BingeIntensity);
        assert!((change.value - 0.4).abs() < f64::EPSILON);

        let change: WeightOverride = "completionRate = 1".parse().unwrap();
        assert_eq!(change.metric, MetricKey::CompletionRate);
    }

    #[test]
    fn test_parse_override_errors() {
        assert!("binge".parse::<WeightOverride>().is_err());
        assert!("nope=0.3".parse::<WeightOverride>().is_err());
        assert!("binge=lots".parse::<WeightOverride>().is_err());
        assert!("binge=NaN".parse::<WeightOverride>().is_err());
    }

    #[test]
    fn test_resolve_defaults_to_preset() {
        let mut config = AppConfig::default();
        config.scoring.preset = WeightPreset::Equal;
        let weights = resolve_weights(&config, None, &[]).unwrap();
        assert_eq!(weights, normalize(&ScoreWeights::equal()));
    }

    #[test]
    fn test_overrides_apply_in_order() {
        let config = AppConfig::default();
        let changes: [WeightOverride; 2] = [
            "completion=0.5".parse().unwrap(),
            "binge=0.3".parse().unwrap(),
        ];
        let weights = resolve_weights(&config, None, &changes).unwrap();
        let expected = rebalance(
            &rebalance(&ScoreWeights::default(), MetricKey::CompletionRate, 0.5),
            MetricKey::BingeIntensity,
            0.3,
        );
        for metric in MetricKey::ALL {
            assert!((weights[metric] - expected[metric]).abs() < 1e-12);
        }
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_file_yaml_and_wrapped_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("w.yaml");
        let mut file = std::fs::File::create(&yaml_path).unwrap();
        writeln!(
            file,
            "completionRate: 2\nrewatchRate: 2\nreturnRate7d: 2\nmultiRegionStrength: 2\naudienceBreadth: 1\nbingeIntensity: 1"
        )
        .unwrap();
        let weights = load_weights_file(&yaml_path).unwrap();
        assert!((weights[MetricKey::CompletionRate] - 0.2).abs() < 1e-12);
        assert!((weights[MetricKey::BingeIntensity] - 0.1).abs() < 1e-12);

        let json_path = dir.path().join("w.json");
        let json = serde_json::json!({ "weights": ScoreWeights::default() });
        std::fs::write(&json_path, json.to_string()).unwrap();
        let weights = load_weights_file(&json_path).unwrap();
        assert!((weights[MetricKey::CompletionRate] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_weights_file_rejects_negative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.json");
        let mut weights = ScoreWeights::default();
        weights[MetricKey::RewatchRate] = -0.5;
        std::fs::write(&path, serde_json::to_string(&weights).unwrap()).unwrap();
        assert!(load_weights_file(&path).is_err());
    }

    #[test]
    fn test_weights_file_wins_over_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.json");
        std::fs::write(&path, serde_json::to_string(&ScoreWeights::equal()).unwrap()).unwrap();
        let mut config = AppConfig::default();
        config.scoring.preset = WeightPreset::Binge;
        let weights = resolve_weights(&config, Some(&path), &[]).unwrap();
        assert!((weights[MetricKey::BingeIntensity] - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_builtin_catalog() {
        let catalog = load_catalog(None, true).unwrap();
        assert!(!catalog.is_empty());
    }
}
