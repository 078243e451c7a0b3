//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ExplicitScoring};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".franchise-ranker.yaml",
    ".franchise-ranker.yml",
    "franchise-ranker.yaml",
    "franchise-ranker.yml",
];

/// Directory under the user config dir holding the global config file.
const CONFIG_DIR_NAME: &str = "franchise-ranker";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/franchise-ranker/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = find_git_root().as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = user_config_dir().as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    dirs::home_dir().as_deref().and_then(find_config_in_dir)
}

/// Per-user configuration directory, if the platform has one.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file parses as YAML null; treat it as "all defaults".
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a config built
    /// from command-line flags can be layered over the file config.
    #[allow(clippy::float_cmp)]
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Scoring config
        if other.scoring.preset != defaults.scoring.preset {
            self.scoring.preset = other.scoring.preset;
            // A preset chosen on top replaces weights inherited from below
            if other.scoring.weights.is_none() {
                self.scoring.weights = None;
            }
        }
        if other.scoring.weights.is_some() {
            self.scoring.weights = other.scoring.weights;
        }
        if other.scoring.region != defaults.scoring.region {
            self.scoring.region = other.scoring.region;
        }
        if other.scoring.strong_threshold != defaults.scoring.strong_threshold {
            self.scoring.strong_threshold = other.scoring.strong_threshold;
        }
        if other.scoring.cache_capacity != defaults.scoring.cache_capacity {
            self.scoring.cache_capacity = other.scoring.cache_capacity;
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.limit.is_some() {
            self.output.limit = other.output.limit;
        }

        // TUI config
        if other.tui.theme != defaults.tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        if other.tui.tick_rate_ms != defaults.tui.tick_rate_ms {
            self.tui.tick_rate_ms = other.tui.tick_rate_ms;
        }
        if other.tui.slider_step != defaults.tui.slider_step {
            self.tui.slider_step = other.tui.slider_step;
        }
    }

    /// Pin scoring values the user named explicitly.
    ///
    /// Applied after [`merge`](Self::merge), which cannot tell an explicit
    /// default (`--region global`) from an unset flag. An explicit preset
    /// also drops weights inherited from the file.
    pub fn apply_explicit(&mut self, explicit: &ExplicitScoring) {
        if let Some(preset) = explicit.preset {
            self.scoring.preset = preset;
            self.scoring.weights = None;
        }
        if let Some(region) = explicit.region {
            self.scoring.region = region;
        }
        if let Some(threshold) = explicit.strong_threshold {
            self.scoring.strong_threshold = threshold;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Franchise Ranker Configuration File
# ===================================
#
# Place it at:
#   - .franchise-ranker.yaml in your project root
#   - ~/.config/franchise-ranker/franchise-ranker.yaml for global config
#
# CLI arguments always override file settings.

# Scoring defaults
scoring:
  # Preset: balanced, retention, reach, binge, equal
  preset: balanced
  # Explicit weights override the preset; they are normalized to sum to 1
  # weights:
  #   completionRate: 0.25
  #   rewatchRate: 0.20
  #   returnRate7d: 0.20
  #   multiRegionStrength: 0.15
  #   audienceBreadth: 0.10
  #   bingeIntensity: 0.10
  # Filter context: Global, US, UK, BR, JP, DE, KR
  region: Global
  # Score at or above which a title counts as a strong contender
  strong_threshold: 70.0
  # Rankings kept in memory by the dashboard
  cache_capacity: 64

# Output configuration
output:
  # Format: auto, tui, table, summary, json, csv, markdown
  format: auto
  # Output file path (omit for stdout)
  # file: ranking.json
  # Disable colored output
  no_color: false
  # Only report the top N titles
  # limit: 5

# Dashboard configuration
tui:
  # Theme: dark, light
  theme: dark
  tick_rate_ms: 250
  slider_step: 0.05
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightPreset;
    use crate::model::{RegionCode, RegionFilter, ScoreWeights};
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".franchise-ranker.yaml");
        std::fs::write(&config_path, "scoring:\n  preset: reach\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(
            &path,
            "scoring:\n  preset: binge\n  region: JP\n  strong_threshold: 65\ntui:\n  theme: light\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.scoring.preset, WeightPreset::Binge);
        assert_eq!(config.scoring.region, RegionFilter::Region(RegionCode::Jp));
        assert_eq!(config.scoring.strong_threshold, 65.0);
        assert_eq!(config.tui.theme, "light");
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_file(Path::new("/nonexistent/franchise-ranker.yaml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::NotFound(_)));
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "scoring: [not, a, map]\n").unwrap();

        let (config, loaded_from) = load_or_default(Some(&path));
        assert_eq!(config, AppConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_merge_prefers_explicit_values() {
        let mut base = AppConfig::default();
        base.scoring.weights = Some(ScoreWeights::equal());
        base.tui.theme = "light".to_string();

        let mut overrides = AppConfig::default();
        overrides.scoring.preset = WeightPreset::Reach;
        overrides.output.limit = Some(3);

        base.merge(&overrides);
        assert_eq!(base.scoring.preset, WeightPreset::Reach);
        assert!(base.scoring.weights.is_none());
        assert_eq!(base.output.limit, Some(3));
        assert_eq!(base.tui.theme, "light");
        assert_eq!(base.resolved_weights(), WeightPreset::Reach.weights());
    }

    #[test]
    fn test_full_example_config_matches_defaults() {
        let example: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(example, AppConfig::default());
    }
}
