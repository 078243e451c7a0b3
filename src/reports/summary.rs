//! Summary report generator for shell output.
//!
//! Provides the overview cards: top candidate, dataset average, strong
//! contenders and which metrics drive the ranking.

use super::{ansi_color, score_color, RankingReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::MetricKey;

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &RankingReport) -> Result<String, ReportError> {
        let summary = &report.summary;
        let mut lines = Vec::new();

        lines.push(self.color("Franchise Ranking Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!("{}  {}", self.color("Formula:", "cyan"), report.formula));
        lines.push(format!(
            "{}  {}",
            self.color("Region:", "cyan"),
            report.filter.label()
        ));
        lines.push(String::new());

        match (&summary.top, report.top_name()) {
            (Some(top), name) => lines.push(format!(
                "{}  {} {}",
                self.color("Top candidate:", "cyan"),
                name.unwrap_or(top.title_id.as_str()),
                self.color(&format!("({:.1})", top.score), score_color(top.score))
            )),
            (None, _) => lines.push(format!(
                "{}  {}",
                self.color("Top candidate:", "cyan"),
                self.color("none", "dim")
            )),
        }
        lines.push(format!(
            "{}  {:.1} across {} {}",
            self.color("Average score:", "cyan"),
            summary.average_score,
            summary.title_count,
            if summary.title_count == 1 {
                "title"
            } else {
                "titles"
            }
        ));
        lines.push(format!(
            "{}  {} scoring {:.0}+",
            self.color("Strong contenders:", "cyan"),
            summary.strong_contenders,
            summary.strong_threshold
        ));

        if summary.title_count > 0 {
            lines.push(String::new());
            lines.push(self.color("Top drivers:", "bold"));
            let dominant = summary.dominant_driver();
            for metric in MetricKey::ALL {
                let count = summary.driver_counts[metric];
                if count == 0 {
                    continue;
                }
                let label = format!("{:<22}", metric.label());
                let line = format!("  {label} {count}");
                if Some(metric) == dominant {
                    lines.push(self.color(&line, "green"));
                } else {
                    lines.push(line);
                }
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::builtin_report;

    #[test]
    fn test_summary_shows_cards() {
        let report = builtin_report(None);
        let output = SummaryReporter::new().no_color().generate(&report).unwrap();
        assert!(output.contains("Top candidate:"));
        assert!(output.contains("Average score:"));
        assert!(output.contains("Strong contenders:"));
        assert!(output.contains(report.top_name().unwrap()));
    }

    #[test]
    fn test_driver_counts_cover_every_title() {
        let report = builtin_report(None);
        let total: usize = report.summary.driver_counts.values().sum();
        assert_eq!(total, report.summary.title_count);
    }
}
