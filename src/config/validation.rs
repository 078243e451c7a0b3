//! Configuration validation.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, OutputConfig, ScoringConfig, TuiConfig};
use crate::error::{RankerError, Result};
use crate::model::ScoreWeights;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.output.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl AppConfig {
    /// Validate, folding every problem into one [`RankerError::Config`].
    pub fn validated(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(self);
        }
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Err(RankerError::config(details.join("; ")))
    }
}

impl Validatable for ScoreWeights {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (metric, weight) in self.iter() {
            if !weight.is_finite() {
                errors.push(ConfigError::new(
                    format!("weights.{}", metric.key()),
                    "weight must be a finite number",
                ));
            } else if weight < 0.0 {
                errors.push(ConfigError::new(
                    format!("weights.{}", metric.key()),
                    format!("weight must be non-negative, got {weight}"),
                ));
            }
        }
        if errors.is_empty() && self.total() <= 0.0 {
            errors.push(ConfigError::new(
                "weights",
                "weights must not all be zero",
            ));
        }
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(weights) = &self.weights {
            errors.extend(weights.validate().into_iter().map(|mut e| {
                e.field = format!("scoring.{}", e.field);
                e
            }));
        }

        if !(0.0..=100.0).contains(&self.strong_threshold) {
            errors.push(ConfigError::new(
                "scoring.strong_threshold",
                format!(
                    "Threshold must be between 0 and 100, got {}",
                    self.strong_threshold
                ),
            ));
        }

        if self.cache_capacity == 0 {
            errors.push(ConfigError::new(
                "scoring.cache_capacity",
                "Cache capacity must be at least 1",
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.limit == Some(0) {
            errors.push(ConfigError::new("output.limit", "Limit must be at least 1"));
        }
        if let Some(file) = &self.file {
            if file.as_os_str().is_empty() {
                errors.push(ConfigError::new("output.file", "Output path is empty"));
            }
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let valid_themes = ["dark", "light"];
        if !valid_themes.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    valid_themes.join(", ")
                ),
            ));
        }

        if self.tick_rate_ms < 10 {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                format!("Tick rate must be at least 10ms, got {}", self.tick_rate_ms),
            ));
        }

        if !(self.slider_step > 0.0 && self.slider_step <= 0.5) {
            errors.push(ConfigError::new(
                "tui.slider_step",
                format!(
                    "Slider step must be in (0, 0.5], got {}",
                    self.slider_step
                ),
            ));
        }
        errors
    }
}
