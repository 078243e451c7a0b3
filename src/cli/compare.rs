//! Compare command handler.
//!
//! Implements the `compare` subcommand: how each title's rank moves between
//! the global context and every region.

use super::RankingInputs;
use crate::config::AppConfig;
use crate::pipeline::{
    auto_detect_format, load_catalog, resolve_weights, should_use_color, write_output,
    OutputTarget,
};
use crate::reports::render_comparison;
use crate::scoring::{compare_regions, RankingCache};
use anyhow::Result;

/// Run the compare command
pub fn run_compare(config: &AppConfig, inputs: &RankingInputs) -> Result<()> {
    let catalog = load_catalog(inputs.catalog.as_deref(), inputs.quiet)?;
    let weights = resolve_weights(config, inputs.weights_file.as_deref(), &inputs.overrides)?;

    let cache = RankingCache::new(config.scoring.cache_capacity);
    let comparison = compare_regions(&catalog, &weights, &cache);
    tracing::debug!("Ranking cache: {:?}", cache.stats());

    let target = OutputTarget::from_option(config.output.file.clone());
    let content = render_comparison(
        &comparison,
        &catalog,
        auto_detect_format(config.output.format),
        should_use_color(config.output.no_color, &target),
    )?;
    write_output(&content, &target, inputs.quiet)
}
