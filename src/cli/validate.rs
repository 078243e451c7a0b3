//! Validate command handler.
//!
//! Implements the `validate` subcommand: check a catalog file for
//! problems without ranking it.

use crate::catalog::{check_path, Catalog, CatalogIssue, IssueSeverity};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationSummary<'a> {
    title_count: usize,
    error_count: usize,
    warning_count: usize,
    issues: &'a [CatalogIssue],
}

/// Run the validate command, returning the desired exit code.
///
/// Errors always fail; warnings fail only when `strict` is set.
pub fn run_validate(
    catalog_path: Option<&Path>,
    format: ReportFormat,
    output_file: Option<std::path::PathBuf>,
    strict: bool,
) -> Result<i32> {
    let (title_count, issues) = match catalog_path {
        Some(path) => check_path(path)?,
        None => {
            let catalog = Catalog::builtin()?;
            (catalog.len(), catalog.validate())
        }
    };

    let error_count = count(&issues, IssueSeverity::Error);
    let warning_count = count(&issues, IssueSeverity::Warning);
    let summary = ValidationSummary {
        title_count,
        error_count,
        warning_count,
        issues: &issues,
    };

    let content = match format {
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&summary)?;
            json.push('\n');
            json
        }
        ReportFormat::Auto | ReportFormat::Table | ReportFormat::Summary => {
            format_validation_text(&summary)
        }
        other => bail!("validate supports table and json output, not {other}"),
    };
    write_output(&content, &OutputTarget::from_option(output_file), false)?;

    if error_count > 0 || (strict && warning_count > 0) {
        return Ok(exit_codes::ISSUES_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}

fn count(issues: &[CatalogIssue], severity: IssueSeverity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

fn format_validation_text(summary: &ValidationSummary<'_>) -> String {
    let mut lines = Vec::new();
    for issue in summary.issues {
        lines.push(format!("{:<8} {issue}", issue.severity));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    let verdict = if summary.error_count > 0 {
        "FAILED"
    } else {
        "OK"
    };
    lines.push(format!(
        "{verdict}: {} titles, {} errors, {} warnings",
        summary.title_count, summary.error_count, summary.warning_count
    ));
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.txt");
        let code = run_validate(None, ReportFormat::Table, Some(out.clone()), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let text = std::fs::read_to_string(out).unwrap();
        assert!(text.starts_with("OK: "), "{text}");
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::builtin().unwrap();
        let mut titles = catalog.titles().to_vec();
        titles.push(titles[0].clone());
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&titles).unwrap()).unwrap();

        let out = dir.path().join("report.json");
        let code = run_validate(Some(&path), ReportFormat::Json, Some(out.clone()), false).unwrap();
        assert_eq!(code, exit_codes::ISSUES_FOUND);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["errorCount"], 1);
        assert_eq!(value["issues"][0]["severity"], "error");
    }

    #[test]
    fn test_warnings_only_fail_when_strict() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::builtin().unwrap();
        let mut titles = catalog.titles().to_vec();
        titles[0].expansion_suggestions.clear();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&titles).unwrap()).unwrap();
        let out = dir.path().join("report.txt");

        let lenient = run_validate(Some(&path), ReportFormat::Table, Some(out.clone()), false).unwrap();
        assert_eq!(lenient, exit_codes::SUCCESS);
        let strict = run_validate(Some(&path), ReportFormat::Table, Some(out), true).unwrap();
        assert_eq!(strict, exit_codes::ISSUES_FOUND);
    }
}
