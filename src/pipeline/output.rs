//! Output handling for ranking reports.
//!
//! Provides utilities for auto-detecting output format and writing reports.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Resolve `auto` for commands that print a static report.
///
/// Static commands have no dashboard, so `auto` and `tui` both become the
/// table view.
pub fn auto_detect_format(format: ReportFormat) -> ReportFormat {
    match format {
        ReportFormat::Auto | ReportFormat::Tui => ReportFormat::Table,
        other => other,
    }
}

/// Whether the `dashboard` command should open the TUI.
///
/// `auto` opens it only on an interactive stdout; any static format prints
/// that report instead.
pub fn dashboard_is_interactive(format: ReportFormat, target: &OutputTarget) -> bool {
    match format {
        ReportFormat::Tui => true,
        ReportFormat::Auto => target.is_terminal(),
        _ => false,
    }
}

/// Determine if color should be used based on flags, environment and target
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err() && target.is_terminal()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            print!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option_none() {
        let target = OutputTarget::from_option(None);
        assert!(matches!(target, OutputTarget::Stdout));
    }

    #[test]
    fn test_output_target_from_option_some() {
        let path = PathBuf::from("/tmp/ranking.json");
        let target = OutputTarget::from_option(Some(path.clone()));
        match target {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_auto_detect_format() {
        assert_eq!(auto_detect_format(ReportFormat::Json), ReportFormat::Json);
        assert_eq!(auto_detect_format(ReportFormat::Auto), ReportFormat::Table);
        assert_eq!(auto_detect_format(ReportFormat::Tui), ReportFormat::Table);
    }

    #[test]
    fn test_dashboard_file_target_is_static() {
        let target = OutputTarget::File(PathBuf::from("/tmp/ranking.md"));
        assert!(!dashboard_is_interactive(ReportFormat::Auto, &target));
        assert!(!dashboard_is_interactive(ReportFormat::Markdown, &target));
        assert!(dashboard_is_interactive(ReportFormat::Tui, &target));
    }

    #[test]
    fn test_no_color_for_files() {
        let target = OutputTarget::File(PathBuf::from("/tmp/ranking.txt"));
        assert!(!should_use_color(false, &target));
        assert!(!should_use_color(true, &OutputTarget::Stdout));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output("hello\n", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }
}
