//! Report generation for rankings.
//!
//! This module provides multiple output formats for a ranking:
//! - Table: Aligned tabular terminal output
//! - Summary: Overview cards (top candidate, average, strong contenders)
//! - JSON: Structured data for programmatic integration
//! - CSV: Spreadsheet import
//! - Markdown: Human-readable documentation
//!
//! Single-title deep dives, weight vectors and region comparisons have
//! their own renderers ([`render_title_detail`], [`render_weights`],
//! [`render_comparison`]).

mod compare;
mod csv;
mod detail;
pub mod escape;
mod json;
mod markdown;
mod summary;
mod table;
pub(crate) mod text;
mod types;
mod weights;

pub use compare::render_comparison;
pub use csv::CsvReporter;
pub use detail::render_title_detail;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use table::TableReporter;
pub use types::{RankingReport, ReportEntry, ReportFormat, ReportMetadata};
pub use weights::{render_weights, WeightsFormat};

use crate::error::{RankerError, ReportErrorKind};
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<ReportError> for RankerError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::SerializationError(msg) => {
                Self::report("serializing", ReportErrorKind::JsonSerializationError(msg))
            }
            ReportError::UnsupportedFormat(format) => {
                Self::report("selecting reporter", ReportErrorKind::UnsupportedFormat(format))
            }
            ReportError::FormatError(e) => Self::report(
                "formatting",
                ReportErrorKind::UnsupportedFormat(e.to_string()),
            ),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a ranking report
    fn generate(&self, report: &RankingReport) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
pub fn create_reporter(format: ReportFormat) -> Result<Box<dyn ReportGenerator>, ReportError> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Tui` has no static rendering and is rejected; callers launch the
/// dashboard instead.
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Result<Box<dyn ReportGenerator>, ReportError> {
    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Auto | ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Tui => return Err(ReportError::UnsupportedFormat(format.to_string())),
    };
    Ok(reporter)
}

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Color band for a 0-100 score.
pub(crate) fn score_color(score: f64) -> &'static str {
    if score >= 80.0 {
        "green"
    } else if score >= 60.0 {
        "yellow"
    } else {
        "red"
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_has_no_static_reporter() {
        assert!(create_reporter(ReportFormat::Tui).is_err());
    }

    #[test]
    fn test_reporter_formats() {
        for format in [
            ReportFormat::Table,
            ReportFormat::Summary,
            ReportFormat::Json,
            ReportFormat::Csv,
            ReportFormat::Markdown,
        ] {
            let reporter = create_reporter_with_options(format, false).unwrap();
            assert_eq!(reporter.format(), format);
        }
    }

    #[test]
    fn test_auto_falls_back_to_table() {
        let reporter = create_reporter(ReportFormat::Auto).unwrap();
        assert_eq!(reporter.format(), ReportFormat::Table);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_color(80.0), "green");
        assert_eq!(score_color(79.9), "yellow");
        assert_eq!(score_color(60.0), "yellow");
        assert_eq!(score_color(12.0), "red");
    }

    #[test]
    fn test_no_color_is_plain() {
        assert_eq!(ansi_color("x", "red", false), "x");
        assert_eq!(ansi_color("x", "red", true), "\x1b[31mx\x1b[0m");
    }
}
