//! Report type definitions.

use crate::catalog::Catalog;
use crate::model::{MetricKey, MetricMap, RegionFilter, ScoreWeights};
use crate::scoring::{normalize, RankedTitle, RankingSummary};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: TUI for the dashboard on a TTY, table otherwise
    #[default]
    Auto,
    /// Interactive TUI display
    Tui,
    /// Aligned ranking table for the terminal (colored)
    Table,
    /// Overview cards only
    Summary,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Tui => write!(f, "tui"),
            Self::Table => write!(f, "table"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Provenance of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub tool_name: String,
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    /// Hex fingerprint of the ranked catalog
    pub catalog_version: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            catalog_version: catalog.version_hex(),
        }
    }
}

/// A ranked title joined with the descriptive fields reports show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub genre: String,
    pub score: f64,
    pub raw_score: f64,
    pub top_driver: MetricKey,
    pub suggestion: String,
    pub normalized_metrics: MetricMap<f64>,
    pub contributions: MetricMap<f64>,
}

/// Everything a report generator needs for one ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    /// Weights after normalization
    pub weights: ScoreWeights,
    pub formula: String,
    pub filter: RegionFilter,
    /// Summary over the full ranking, before any limit
    pub summary: RankingSummary,
    pub entries: Vec<ReportEntry>,
}

impl RankingReport {
    /// Join `rows` with their titles from `catalog`, keeping at most `limit`
    /// entries. Rows whose dataset index does not resolve are skipped.
    #[must_use]
    pub fn build(
        catalog: &Catalog,
        rows: &[RankedTitle],
        weights: &ScoreWeights,
        filter: RegionFilter,
        strong_threshold: f64,
        limit: Option<usize>,
    ) -> Self {
        let weights = normalize(weights);
        let entries = rows
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .filter_map(|row| {
                let title = row.title(catalog.titles())?;
                Some(ReportEntry {
                    rank: row.rank,
                    id: title.id.clone(),
                    name: title.name.clone(),
                    genre: title.genre.clone(),
                    score: row.score,
                    raw_score: row.raw_score,
                    top_driver: row.top_driver,
                    suggestion: title.headline_suggestion().to_string(),
                    normalized_metrics: row.normalized_metrics,
                    contributions: row.contributions,
                })
            })
            .collect();

        Self {
            metadata: ReportMetadata::for_catalog(catalog),
            formula: weights.formula(),
            weights,
            filter,
            summary: RankingSummary::from_rows(rows, strong_threshold),
            entries,
        }
    }

    /// Name of the top candidate, if any.
    #[must_use]
    pub fn top_name(&self) -> Option<&str> {
        let top = self.summary.top.as_ref()?;
        self.entries
            .iter()
            .find(|e| e.id == top.title_id)
            .map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank;

    #[test]
    fn test_build_applies_limit_after_summary() {
        let catalog = Catalog::builtin().unwrap();
        let weights = ScoreWeights::default();
        let rows = rank(catalog.titles(), &weights, RegionFilter::Global);
        let report = RankingReport::build(&catalog, &rows, &weights, RegionFilter::Global, 70.0, Some(3));

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.summary.title_count, catalog.len());
        assert_eq!(report.entries[0].rank, 1);
        assert_eq!(report.top_name(), Some(report.entries[0].name.as_str()));
    }

    #[test]
    fn test_report_weights_are_normalized() {
        let catalog = Catalog::builtin().unwrap();
        let weights = ScoreWeights::new([2.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        let rows = rank(catalog.titles(), &weights, RegionFilter::Global);
        let report = RankingReport::build(&catalog, &rows, &weights, RegionFilter::Global, 70.0, None);
        assert!((report.weights.total() - 1.0).abs() < 1e-9);
        assert_eq!(report.formula, "0.50C + 0.00R + 0.00Ret + 0.00M + 0.00A + 0.50B");
    }

    #[test]
    fn test_format_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ReportFormat::Markdown).unwrap(), "\"markdown\"");
    }
}
