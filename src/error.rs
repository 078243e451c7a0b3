//! Unified error types for franchise-ranker.
//!
//! Scoring itself never fails: out-of-range weights are clamped and
//! degenerate inputs fall back to defined values. Errors come from the edges
//! of the system: loading catalogs, reading configuration, and writing
//! reports.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for franchise-ranker operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RankerError {
    /// Errors while loading or validating a title catalog
    #[error("Failed to load catalog: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unrecognised catalog format: {0}")]
    UnknownFormat(String),

    #[error("Duplicate title id: {0}")]
    DuplicateId(String),

    #[error("Non-finite value for '{field}' in title {id}")]
    NonFiniteMetric { id: String, field: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for franchise-ranker operations
pub type Result<T> = std::result::Result<T, RankerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RankerError {
    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create a catalog error for an unrecognised document format
    pub fn unknown_format(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::catalog(format!("at {path}"), CatalogErrorKind::UnknownFormat(path))
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RankerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RankerError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog(
            "JSON deserialization",
            CatalogErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for RankerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::catalog(
            "YAML deserialization",
            CatalogErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so
/// nested calls produce a chain such as `"loading catalog: JSON
/// deserialization"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RankerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RankerError, new_ctx: &str) -> RankerError {
    match err {
        RankerError::Catalog {
            context: existing,
            source,
        } => RankerError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RankerError::Report {
            context: existing,
            source,
        } => RankerError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RankerError::Io {
            path,
            message,
            source,
        } => RankerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RankerError::Config(msg) => RankerError::Config(chain_context(new_ctx, &msg)),
        RankerError::Validation(msg) => RankerError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as `"new: existing"`.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RankerError::unknown_format("titles.txt");
        let display = err.to_string();
        assert!(display.contains("catalog"), "{display}");
        assert!(display.contains("titles.txt"), "{display}");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RankerError::io("/path/to/titles.json", io_err);
        assert!(err.to_string().contains("/path/to/titles.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(RankerError::catalog(
                "base",
                CatalogErrorKind::DuplicateId("t1".into()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(RankerError::Catalog { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_only_runs_on_error() {
        let mut built = 0;
        let ok: Result<usize> = Ok(12);
        let _ = ok.with_context(|| {
            built += 1;
            "reading titles.json"
        });
        assert_eq!(built, 0);

        let err: Result<usize> = Err(RankerError::validation("catalog is empty"));
        let err = err
            .with_context(|| {
                built += 1;
                "reading titles.json"
            })
            .unwrap_err();
        assert_eq!(built, 1);
        assert_eq!(err.to_string(), "Validation failed: reading titles.json: catalog is empty");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
