//! Catalog integrity checks.
//!
//! Errors make a catalog unusable (duplicate ids, non-finite values the
//! engine cannot scale). Warnings flag data that still ranks but is probably
//! wrong.

use crate::error::CatalogErrorKind;
use crate::model::{MetricKey, TitleProfile};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Tolerance on the cluster distribution summing to 100.
const CLUSTER_TOTAL_TOLERANCE: f64 = 1.0;

/// How serious a catalog issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single problem found in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogIssue {
    pub severity: IssueSeverity,
    /// Offending title id, if the issue belongs to one title
    pub title_id: Option<String>,
    pub field: String,
    pub message: String,
}

impl CatalogIssue {
    fn error(title: &TitleProfile, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            title_id: Some(title.id.clone()),
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(title: &TitleProfile, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            title_id: Some(title.id.clone()),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title_id {
            Some(id) => write!(f, "{id}.{}: {}", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Every scored value of a title with its wire field name.
fn scored_fields(title: &TitleProfile) -> Vec<(String, f64)> {
    let mut fields: Vec<(String, f64)> = MetricKey::ALL
        .iter()
        .map(|m| (m.key().to_string(), title.base_metric(*m)))
        .collect();
    for (code, perf) in title.region_data.iter() {
        fields.push((format!("regionData.{code}.completionRate"), perf.completion_rate));
    }
    fields
}

/// First condition that makes the titles unrankable, if any.
pub(crate) fn first_fatal(titles: &[TitleProfile]) -> Option<CatalogErrorKind> {
    let mut seen = HashSet::new();
    for title in titles {
        if !seen.insert(title.id.as_str()) {
            return Some(CatalogErrorKind::DuplicateId(title.id.clone()));
        }
        if let Some((field, _)) = scored_fields(title).into_iter().find(|(_, v)| !v.is_finite()) {
            return Some(CatalogErrorKind::NonFiniteMetric {
                id: title.id.clone(),
                field,
            });
        }
    }
    None
}

/// Run every check and collect all issues, errors first.
pub(crate) fn check_titles(titles: &[TitleProfile]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    if titles.is_empty() {
        issues.push(CatalogIssue {
            severity: IssueSeverity::Warning,
            title_id: None,
            field: "titles".to_string(),
            message: "catalog is empty; rankings will be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for title in titles {
        if !seen.insert(title.id.as_str()) {
            issues.push(CatalogIssue::error(title, "id", "duplicate title id"));
        }
        if title.id.trim().is_empty() {
            issues.push(CatalogIssue::warning(title, "id", "title id is blank"));
        }

        for (field, value) in scored_fields(title) {
            if !value.is_finite() {
                issues.push(CatalogIssue::error(title, field, "value is not a finite number"));
            } else if value < 0.0 {
                issues.push(CatalogIssue::warning(
                    title,
                    field,
                    format!("negative value {value}"),
                ));
            }
        }

        let cluster_total = title.cluster_distribution.total();
        if (cluster_total - 100.0).abs() > CLUSTER_TOTAL_TOLERANCE {
            issues.push(CatalogIssue::warning(
                title,
                "clusterDistribution",
                format!("segments sum to {cluster_total:.1}, expected 100"),
            ));
        }

        if title.expansion_suggestions.is_empty() {
            issues.push(CatalogIssue::warning(
                title,
                "expansionSuggestions",
                "no expansion suggestions",
            ));
        }

        if title.region_data.over_indexed().next().is_none() {
            issues.push(CatalogIssue::warning(
                title,
                "regionData",
                "title does not over-index in any region",
            ));
        }
    }

    issues.sort_by(|a, b| b.severity.cmp(&a.severity));
    issues
}
