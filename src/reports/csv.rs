//! CSV report generator.
//!
//! One row per ranked title with the per-metric contributions, suitable for
//! spreadsheet import.

use super::escape::escape_csv;
use super::{RankingReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::MetricKey;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, report: &RankingReport) -> Result<String, ReportError> {
        let mut content = String::from("Rank,ID,Title,Genre,Score,Top Driver");
        for metric in MetricKey::ALL {
            content.push(',');
            content.push_str(metric.key());
        }
        content.push_str(",Suggestion\n");

        for entry in &report.entries {
            content.push_str(&format!(
                "{},{},{},{},{:.1},{}",
                entry.rank,
                escape_csv(&entry.id),
                escape_csv(&entry.name),
                escape_csv(&entry.genre),
                entry.score,
                entry.top_driver.key()
            ));
            for (_, contribution) in entry.contributions.iter() {
                content.push_str(&format!(",{contribution:.2}"));
            }
            content.push(',');
            content.push_str(&escape_csv(&entry.suggestion));
            content.push('\n');
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}
