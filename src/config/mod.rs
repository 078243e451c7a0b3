//! Configuration module for franchise-ranker.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named weight presets
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use franchise_ranker::config::{AppConfig, WeightPreset};
//!
//! let mut config = AppConfig::default();
//! config.scoring.preset = WeightPreset::Retention;
//!
//! use franchise_ranker::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.franchise-ranker.yaml` file in your project root or
//! `~/.config/franchise-ranker/`:
//!
//! ```yaml
//! scoring:
//!   preset: reach
//!   region: JP
//! output:
//!   limit: 5
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    WeightPreset, DEFAULT_SLIDER_STEP, DEFAULT_STRONG_THRESHOLD, DEFAULT_TICK_RATE_MS,
};
pub use types::{AppConfig, ExplicitScoring, OutputConfig, ScoringConfig, TuiConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.franchise-ranker.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).map_err(|e| {
        crate::error::RankerError::report(
            "config schema",
            crate::error::ReportErrorKind::JsonSerializationError(e.to_string()),
        )
    })
}
