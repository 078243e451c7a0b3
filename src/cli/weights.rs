//! Weights and rebalance command handlers.

use crate::config::{AppConfig, WeightPreset};
use crate::model::MetricKey;
use crate::pipeline::{resolve_weights, write_output, OutputTarget, WeightOverride};
use crate::reports::{render_weights, WeightsFormat};
use crate::scoring::rebalance;
use anyhow::Result;
use std::path::Path;

/// Run the weights command: print the resolved vector, or every preset.
pub fn run_weights(
    config: &AppConfig,
    weights_file: Option<&Path>,
    overrides: &[WeightOverride],
    format: WeightsFormat,
    list_presets: bool,
) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let content = if list_presets {
        preset_listing()
    } else {
        let weights = resolve_weights(config, weights_file, overrides)?;
        render_weights(&weights, format)?
    };
    write_output(&content, &target, false)
}

/// Run the rebalance command: apply one slider change and print the result.
pub fn run_rebalance(
    config: &AppConfig,
    weights_file: Option<&Path>,
    metric: MetricKey,
    value: f64,
    format: WeightsFormat,
) -> Result<()> {
    let current = resolve_weights(config, weights_file, &[])?;
    let next = rebalance(&current, metric, value);
    tracing::info!(
        "{}: {:.1}% -> {:.1}%",
        metric.label(),
        current[metric] * 100.0,
        next[metric] * 100.0
    );

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&render_weights(&next, format)?, &target, false)
}

fn preset_listing() -> String {
    let mut lines = Vec::new();
    for preset in WeightPreset::all() {
        lines.push(format!("{:<10} {}", preset.name(), preset.description()));
        lines.push(format!("{:<10} {}", "", preset.weights().formula()));
    }
    lines.join("\n") + "\n"
}
