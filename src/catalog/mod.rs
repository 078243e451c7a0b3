//! Title catalog loading.
//!
//! A [`Catalog`] is the read-only dataset the engine ranks. It can come from
//! the bundled demo data or from a JSON/YAML file, and carries a content
//! fingerprint that identifies the dataset version for caching.

mod validation;

pub use validation::{CatalogIssue, IssueSeverity};

use crate::error::{ErrorContext, RankerError, Result};
use crate::model::TitleProfile;
use serde::Deserialize;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

/// Bundled synthetic demo dataset.
const BUILTIN_CATALOG: &str = include_str!("../../data/titles.json");

/// Minimum Jaro-Winkler similarity accepted for "did you mean" suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Accepted document shapes: a bare array or `{ "titles": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { titles: Vec<TitleProfile> },
    Bare(Vec<TitleProfile>),
}

impl CatalogDocument {
    fn into_titles(self) -> Vec<TitleProfile> {
        match self {
            Self::Wrapped { titles } | Self::Bare(titles) => titles,
        }
    }
}

/// Serialization format of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick a format from the file extension, falling back to sniffing the
    /// first non-whitespace character.
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => match content.trim_start().chars().next() {
                Some('[' | '{') => Some(Self::Json),
                Some(_) if content.contains("titles:") || content.trim_start().starts_with('-') => {
                    Some(Self::Yaml)
                }
                _ => None,
            },
        }
    }
}

/// An immutable set of titles plus its content fingerprint.
#[derive(Debug, Clone)]
pub struct Catalog {
    titles: Vec<TitleProfile>,
    version: u64,
}

impl Catalog {
    /// Wrap titles, rejecting duplicate ids and non-finite metric values.
    pub fn new(titles: Vec<TitleProfile>) -> Result<Self> {
        if let Some(err) = validation::first_fatal(&titles) {
            return Err(RankerError::catalog("validating titles", err));
        }
        for issue in validation::check_titles(&titles)
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
        {
            tracing::warn!("catalog: {issue}");
        }

        let canonical = serde_json::to_vec(&titles)?;
        Ok(Self {
            version: xxh3_64(&canonical),
            titles,
        })
    }

    /// The bundled demo dataset.
    pub fn builtin() -> Result<Self> {
        Self::from_str_as(BUILTIN_CATALOG, CatalogFormat::Json).context("builtin catalog")
    }

    /// Parse a catalog document in the given format.
    pub fn from_str_as(content: &str, format: CatalogFormat) -> Result<Self> {
        Self::new(parse_titles(content, format)?)
    }

    /// Load a catalog from a JSON or YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let (content, format) = read_document(path)?;
        let catalog = Self::from_str_as(&content, format)
            .with_context(|| format!("reading {}", path.display()))?;
        tracing::info!(
            "Loaded {} titles from {} (version {})",
            catalog.len(),
            path.display(),
            catalog.version_hex()
        );
        Ok(catalog)
    }

    /// All titles in dataset order.
    #[must_use]
    pub fn titles(&self) -> &[TitleProfile] {
        &self.titles
    }

    /// Content fingerprint of the titles.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Fingerprint as a fixed-width hex string.
    #[must_use]
    pub fn version_hex(&self) -> String {
        format!("{:016x}", self.version)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Look up a title by exact id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&TitleProfile> {
        self.titles.iter().find(|t| t.id == id)
    }

    /// Look up a title by id, falling back to a case-insensitive name match.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Option<&TitleProfile> {
        self.find(query).or_else(|| {
            self.titles
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(query))
        })
    }

    /// Closest title id to `query` by Jaro-Winkler similarity on ids and names.
    #[must_use]
    pub fn suggest(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.titles
            .iter()
            .map(|t| {
                let by_id = strsim::jaro_winkler(&query, &t.id.to_lowercase());
                let by_name = strsim::jaro_winkler(&query, &t.name.to_lowercase());
                (t.id.as_str(), by_id.max(by_name))
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Run every validation check, including warnings.
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogIssue> {
        validation::check_titles(&self.titles)
    }
}

/// Parse a catalog file and report every issue, fatal ones included,
/// without building a [`Catalog`]. Returns the title count and the issues.
pub fn check_path(path: &Path) -> Result<(usize, Vec<CatalogIssue>)> {
    let (content, format) = read_document(path)?;
    let titles =
        parse_titles(&content, format).with_context(|| format!("reading {}", path.display()))?;
    Ok((titles.len(), validation::check_titles(&titles)))
}

fn read_document(path: &Path) -> Result<(String, CatalogFormat)> {
    let content = std::fs::read_to_string(path).map_err(|e| RankerError::io(path, e))?;
    let format = CatalogFormat::detect(path, &content)
        .ok_or_else(|| RankerError::unknown_format(path.display().to_string()))?;
    Ok((content, format))
}

fn parse_titles(content: &str, format: CatalogFormat) -> Result<Vec<TitleProfile>> {
    let document: CatalogDocument = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(document.into_titles())
}

impl TryFrom<Vec<TitleProfile>> for Catalog {
    type Error = RankerError;

    fn try_from(titles: Vec<TitleProfile>) -> Result<Self> {
        Self::new(titles)
    }
}
