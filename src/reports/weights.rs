//! Weight vector rendering for the `weights` and `rebalance` commands.

use super::text::{bar, pad_right};
use super::ReportError;
use crate::model::ScoreWeights;
use clap::ValueEnum;

/// Output format for a weight vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum WeightsFormat {
    /// Aligned table with bars
    #[default]
    Table,
    /// Map of metric key to weight
    Json,
    /// Map of metric key to weight, ready for a config file
    Yaml,
}

/// Render `weights` in the given format.
pub fn render_weights(weights: &ScoreWeights, format: WeightsFormat) -> Result<String, ReportError> {
    match format {
        WeightsFormat::Json => {
            let mut json = serde_json::to_string_pretty(weights)?;
            json.push('\n');
            Ok(json)
        }
        WeightsFormat::Yaml => serde_yaml::to_string(weights)
            .map_err(|e| ReportError::SerializationError(e.to_string())),
        WeightsFormat::Table => {
            let mut lines: Vec<String> = weights
                .iter()
                .map(|(metric, weight)| {
                    format!(
                        "{} {:>4} {} {:>5.1}%",
                        pad_right(metric.label(), 22),
                        metric.symbol(),
                        bar(weight, 20),
                        weight * 100.0
                    )
                })
                .collect();
            lines.push(String::new());
            lines.push(format!("Formula: {}", weights.formula()));
            lines.push(format!("Total:   {:.4}", weights.total()));
            Ok(lines.join("\n") + "\n")
        }
    }
}
