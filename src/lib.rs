//! **Weighted multi-metric ranking for franchise candidates.**
//!
//! `franchise-ranker` scores a catalog of titles against a weighted formula
//! over six engagement metrics, lets the weights be re-tuned one slider at a
//! time, and re-ranks on every change. It powers both a command-line tool
//! (static reports and an interactive terminal dashboard) and a library for
//! programmatic use.
//!
//! ## Key Features
//!
//! - **Fixed-sum weights**: [`rebalance`] sets one metric's weight and shares
//!   the remainder among the others in proportion to their previous weights,
//!   so the vector always sums to 1.
//! - **Relative normalization**: every metric is min-max scaled to 0-100
//!   across the catalog, under either the global context or one region.
//! - **Deterministic ranking**: [`rank`] sorts by the sum of rounded
//!   contributions, breaks ties by catalog order and names each title's top driving metric.
//! - **Reports**: table, summary, JSON, CSV and Markdown output, a per-title
//!   deep dive and a cross-region comparison.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: metric keys, weight vectors, region filters and the
//!   [`TitleProfile`] record.
//! - **[`catalog`]**: loading and validating the dataset into a [`Catalog`].
//! - **[`scoring`]**: the engine ([`rank`], [`normalize`], [`rebalance`]),
//!   overview statistics, the [`RankingCache`] and region comparison.
//! - **[`reports`]**: output generators.
//! - **[`config`]**: YAML configuration with presets and validation.
//! - **[`tui`]**: the interactive dashboard.
//!
//! ## Getting Started
//!
//! ```no_run
//! use franchise_ranker::{rank, rebalance, Catalog, MetricKey, RegionFilter, ScoreWeights};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::builtin()?;
//!
//!     // Lean harder on completion; the other weights shrink proportionally
//!     let weights = rebalance(&ScoreWeights::default(), MetricKey::CompletionRate, 0.4);
//!
//!     for row in rank(catalog.titles(), &weights, RegionFilter::Global) {
//!         println!("#{} {} {:.1} ({})", row.rank, row.title_id, row.score, row.top_driver);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the library crate. The `franchise-ranker`
//! binary wraps it with `rank`, `inspect`, `rebalance`, `compare` and
//! `dashboard` subcommands; see the README.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize <-> f64 casts in averages and TUI layout math; values are small
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::similar_names
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod tui;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogIssue, IssueSeverity};
pub use config::{AppConfig, ConfigError, Validatable, WeightPreset};
pub use error::{ErrorContext, RankerError, Result};
pub use model::{
    MetricKey, MetricMap, RegionCode, RegionFilter, ScoreWeights, TitleProfile,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{
    compare_regions, normalize, rank, rebalance, RankedTitle, RankingCache, RankingSummary,
};
