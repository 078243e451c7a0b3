//! Report output stage.

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::model::{RegionFilter, ScoreWeights};
use crate::reports::{create_reporter_with_options, RankingReport};
use crate::scoring::RankedTitle;
use anyhow::{Context, Result};

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};

/// Render a ranking with the configured reporter and write it out.
///
/// The summary covers every row; `output.limit` only trims the listed entries.
pub fn output_report(
    config: &AppConfig,
    catalog: &Catalog,
    rows: &[RankedTitle],
    weights: &ScoreWeights,
    filter: RegionFilter,
    quiet: bool,
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format);
    let use_color = should_use_color(config.output.no_color, &output_target);

    let report = RankingReport::build(
        catalog,
        rows,
        weights,
        filter,
        config.scoring.strong_threshold,
        config.output.limit,
    );
    let reporter = create_reporter_with_options(effective_output, use_color)?;
    let content = reporter
        .generate(&report)
        .with_context(|| format!("Failed to render {} report", reporter.format()))?;

    write_output(&content, &output_target, quiet)
}
