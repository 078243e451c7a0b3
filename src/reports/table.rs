//! Aligned ranking table for the terminal.

use super::text::{pad_left, pad_right};
use super::{ansi_color, score_color, RankingReport, ReportError, ReportFormat, ReportGenerator};

const RANK_WIDTH: usize = 4;
const TITLE_WIDTH: usize = 24;
const GENRE_WIDTH: usize = 16;
const SCORE_WIDTH: usize = 6;
const DRIVER_WIDTH: usize = 22;
const SUGGESTION_WIDTH: usize = 34;

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
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

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, report: &RankingReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(format!(
            "{}  {}",
            self.color("Formula:", "cyan"),
            report.formula
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Region:", "cyan"),
            report.filter.label()
        ));
        lines.push(String::new());

        // Pad before coloring so escape codes do not skew the columns
        let header = [
            pad_left("#", RANK_WIDTH),
            pad_right("TITLE", TITLE_WIDTH),
            pad_right("GENRE", GENRE_WIDTH),
            pad_left("SCORE", SCORE_WIDTH),
            pad_right("TOP DRIVER", DRIVER_WIDTH),
            pad_right("SUGGESTION", SUGGESTION_WIDTH),
        ];
        lines.push(self.color(header.join(" ").trim_end(), "bold"));
        let rule_width =
            RANK_WIDTH + TITLE_WIDTH + GENRE_WIDTH + SCORE_WIDTH + DRIVER_WIDTH + SUGGESTION_WIDTH + 5;
        lines.push(self.color(&"─".repeat(rule_width), "dim"));

        for entry in &report.entries {
            let score = pad_left(&format!("{:.1}", entry.score), SCORE_WIDTH);
            let row = [
                pad_left(&entry.rank.to_string(), RANK_WIDTH),
                pad_right(&entry.name, TITLE_WIDTH),
                pad_right(&entry.genre, GENRE_WIDTH),
                self.color(&score, score_color(entry.score)),
                pad_right(entry.top_driver.label(), DRIVER_WIDTH),
                pad_right(&entry.suggestion, SUGGESTION_WIDTH),
            ];
            lines.push(row.join(" ").trim_end().to_string());
        }

        if report.entries.is_empty() {
            lines.push(self.color("  No titles to rank", "dim"));
        }

        lines.push(String::new());
        let shown = report.entries.len();
        let total = report.summary.title_count;
        let mut footer = format!(
            "Titles: {total} | Average: {:.1} | Strong contenders (>= {:.0}): {}",
            report.summary.average_score,
            report.summary.strong_threshold,
            report.summary.strong_contenders
        );
        if shown < total {
            footer.push_str(&format!(" | Showing top {shown}"));
        }
        lines.push(footer);

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::builtin_report;
    use crate::reports::text::truncate_str;

    #[test]
    fn test_table_lists_every_entry_in_rank_order() {
        let report = builtin_report(None);
        let output = TableReporter::new().no_color().generate(&report).unwrap();

        let mut last = 0;
        for entry in &report.entries {
            let pos = output.find(&truncate_str(&entry.name, TITLE_WIDTH)).unwrap();
            assert!(pos > last, "{} out of order", entry.name);
            last = pos;
        }
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_long_titles_are_truncated_to_the_column() {
        let mut report = builtin_report(None);
        report.entries[0].name = "The Extraordinarily Long Chronicles of Everything".to_string();
        let output = TableReporter::new().no_color().generate(&report).unwrap();

        assert!(!output.contains(&report.entries[0].name));
        assert!(output.contains(&truncate_str(&report.entries[0].name, TITLE_WIDTH)));
    }

    #[test]
    fn test_table_footer_mentions_limit() {
        let report = builtin_report(Some(2));
        let output = TableReporter::new().no_color().generate(&report).unwrap();
        assert!(output.contains("Showing top 2"));
    }

    #[test]
    fn test_colored_table_has_escape_codes() {
        let report = builtin_report(Some(1));
        let output = TableReporter::new().generate(&report).unwrap();
        assert!(output.contains("\x1b[1m"));
    }
}
