//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_table};
use super::{RankingReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::MetricKey;
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Include the per-metric contribution table
    include_breakdown: bool,
}

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_breakdown: true,
        }
    }

    /// Omit the contribution breakdown section
    #[must_use]
    pub const fn without_breakdown(mut self) -> Self {
        self.include_breakdown = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, report: &RankingReport) -> Result<String, ReportError> {
        let mut md = String::new();
        let summary = &report.summary;

        writeln!(md, "# Franchise Ranking")?;
        writeln!(md)?;
        writeln!(md, "- **Formula:** `{}`", report.formula)?;
        writeln!(md, "- **Region:** {}", report.filter.label())?;
        writeln!(
            md,
            "- **Generated:** {} by {} {}",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.metadata.tool_name,
            report.metadata.tool_version
        )?;
        writeln!(md, "- **Catalog:** `{}`", report.metadata.catalog_version)?;
        writeln!(md)?;

        writeln!(md, "## Overview")?;
        writeln!(md)?;
        match (&summary.top, report.top_name()) {
            (Some(top), name) => writeln!(
                md,
                "- **Top candidate:** {} ({:.1})",
                escape_markdown_inline(name.unwrap_or(top.title_id.as_str())),
                top.score
            )?,
            (None, _) => writeln!(md, "- **Top candidate:** none")?,
        }
        writeln!(md, "- **Average score:** {:.1}", summary.average_score)?;
        writeln!(
            md,
            "- **Strong contenders ({:.0}+):** {}",
            summary.strong_threshold, summary.strong_contenders
        )?;
        writeln!(md)?;

        writeln!(md, "## Ranking")?;
        writeln!(md)?;
        writeln!(md, "| # | Title | Genre | Score | Top Driver | Suggestion |")?;
        writeln!(md, "|--:|-------|-------|------:|------------|------------|")?;
        for entry in &report.entries {
            writeln!(
                md,
                "| {} | {} | {} | {:.1} | {} | {} |",
                entry.rank,
                escape_markdown_table(&entry.name),
                escape_markdown_table(&entry.genre),
                entry.score,
                entry.top_driver.label(),
                escape_markdown_table(&entry.suggestion)
            )?;
        }

        if self.include_breakdown && !report.entries.is_empty() {
            writeln!(md)?;
            writeln!(md, "## Contribution Breakdown")?;
            writeln!(md)?;
            let header: Vec<&str> = MetricKey::ALL.iter().map(|m| m.symbol()).collect();
            writeln!(md, "| Title | {} |", header.join(" | "))?;
            writeln!(md, "|-------|{}", "------:|".repeat(MetricKey::COUNT))?;
            for entry in &report.entries {
                let cells: Vec<String> = entry
                    .contributions
                    .values()
                    .map(|c| format!("{c:.2}"))
                    .collect();
                writeln!(
                    md,
                    "| {} | {} |",
                    escape_markdown_table(&entry.name),
                    cells.join(" | ")
                )?;
            }
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::builtin_report;

    #[test]
    fn test_markdown_sections() {
        let report = builtin_report(Some(3));
        let md = MarkdownReporter::new().generate(&report).unwrap();
        assert!(md.starts_with("# Franchise Ranking"));
        assert!(md.contains("## Overview"));
        assert!(md.contains("## Contribution Breakdown"));
        assert!(md.contains("| C | R | Ret | M | A | B |"));
    }

    #[test]
    fn test_markdown_without_breakdown() {
        let report = builtin_report(Some(3));
        let md = MarkdownReporter::new()
            .without_breakdown()
            .generate(&report)
            .unwrap();
        assert!(!md.contains("## Contribution Breakdown"));
        let table_rows = md.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| #")).count();
        assert_eq!(table_rows, 3);
    }
}
