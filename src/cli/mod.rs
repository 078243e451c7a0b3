//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod compare;
mod dashboard;
mod inspect;
mod rank;
mod validate;
mod weights;

pub use compare::run_compare;
pub use dashboard::run_dashboard;
pub use inspect::{find_title, run_inspect};
pub use rank::run_rank;
pub use validate::run_validate;
pub use weights::{run_rebalance, run_weights};

use crate::pipeline::WeightOverride;
use std::path::PathBuf;

/// Inputs shared by every command that ranks titles.
#[derive(Debug, Clone, Default)]
pub struct RankingInputs {
    /// Catalog file; the bundled catalog when unset
    pub catalog: Option<PathBuf>,
    /// Weights file overriding the configured preset
    pub weights_file: Option<PathBuf>,
    /// `metric=value` slider changes, applied in order
    pub overrides: Vec<WeightOverride>,
    /// Suppress informational logging
    pub quiet: bool,
}
