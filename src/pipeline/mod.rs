//! Pipeline orchestration for ranking commands.
//!
//! This module provides the shared load → weigh → rank → report steps,
//! reducing duplication across CLI command handlers.

mod load;
mod output;
mod report_stage;

pub use load::{load_catalog, load_weights_file, resolve_weights, WeightOverride};
pub use output::{
    auto_detect_format, dashboard_is_interactive, should_use_color, write_output, OutputTarget,
};
pub use report_stage::output_report;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// The top score fell below `--min-top-score`
    pub const THRESHOLD_NOT_MET: i32 = 1;
    /// Catalog validation found errors (or warnings under `--strict`)
    pub const ISSUES_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
