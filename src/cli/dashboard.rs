//! Dashboard command handler.
//!
//! Opens the interactive TUI on a terminal; otherwise prints the static
//! report for the requested format.

use super::RankingInputs;
use crate::config::AppConfig;
use crate::pipeline::{
    dashboard_is_interactive, load_catalog, output_report, resolve_weights, OutputTarget,
};
use crate::reports::ReportFormat;
use crate::scoring::rank;
use crate::tui::DashboardApp;
use anyhow::{Context, Result};

/// Run the dashboard command
pub fn run_dashboard(config: &AppConfig, inputs: &RankingInputs) -> Result<()> {
    let catalog = load_catalog(inputs.catalog.as_deref(), inputs.quiet)?;
    let weights = resolve_weights(config, inputs.weights_file.as_deref(), &inputs.overrides)?;

    let target = OutputTarget::from_option(config.output.file.clone());
    if !dashboard_is_interactive(config.output.format, &target) {
        tracing::info!("Not an interactive terminal; printing summary instead");
        let mut static_config = config.clone();
        if static_config.output.format == ReportFormat::Auto {
            static_config.output.format = ReportFormat::Summary;
        }
        let filter = config.scoring.region;
        let rows = rank(catalog.titles(), &weights, filter);
        return output_report(&static_config, &catalog, &rows, &weights, filter, inputs.quiet);
    }

    let mut app = DashboardApp::new(catalog, weights, config);
    crate::tui::run_dashboard(&mut app, config.tui.tick_rate_ms)
        .context("Dashboard terminal error")?;

    let stats = app.cache_stats();
    tracing::debug!(
        "Dashboard closed after {} rankings ({:.0}% cache hits)",
        stats.lookups,
        stats.hit_rate * 100.0
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_dashboard_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        let mut config = AppConfig::default();
        config.output.file = Some(path.clone());
        let inputs = RankingInputs {
            quiet: true,
            ..RankingInputs::default()
        };

        run_dashboard(&config, &inputs).unwrap();
        assert!(!std::fs::read_to_string(path).unwrap().is_empty());
    }
}
