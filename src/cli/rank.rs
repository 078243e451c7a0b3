//! Rank command handler.
//!
//! Implements the `rank` subcommand: score the catalog and print a report.

use super::RankingInputs;
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, load_catalog, output_report, resolve_weights};
use crate::scoring::{rank, RankedTitle};
use anyhow::Result;

/// Run the rank command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_rank(
    config: &AppConfig,
    inputs: &RankingInputs,
    min_top_score: Option<f64>,
) -> Result<i32> {
    let catalog = load_catalog(inputs.catalog.as_deref(), inputs.quiet)?;
    let weights = resolve_weights(config, inputs.weights_file.as_deref(), &inputs.overrides)?;
    let filter = config.scoring.region;

    let rows = rank(catalog.titles(), &weights, filter);
    output_report(config, &catalog, &rows, &weights, filter, inputs.quiet)?;

    Ok(determine_exit_code(&rows, min_top_score))
}

/// Exit code for a ranking checked against an optional minimum top score.
fn determine_exit_code(rows: &[RankedTitle], min_top_score: Option<f64>) -> i32 {
    let Some(threshold) = min_top_score else {
        return exit_codes::SUCCESS;
    };
    match rows.first() {
        Some(top) if top.score >= threshold => exit_codes::SUCCESS,
        Some(top) => {
            tracing::error!(
                "Top score {:.1} ({}) is below minimum {:.1}",
                top.score,
                top.title_id,
                threshold
            );
            exit_codes::THRESHOLD_NOT_MET
        }
        None => {
            tracing::error!("Catalog is empty; no top score to check");
            exit_codes::THRESHOLD_NOT_MET
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::{RegionFilter, ScoreWeights};
    use crate::reports::ReportFormat;

    fn builtin_rows() -> Vec<RankedTitle> {
        let catalog = Catalog::builtin().unwrap();
        rank(catalog.titles(), &ScoreWeights::default(), RegionFilter::Global)
    }

    #[test]
    fn test_exit_code_without_threshold() {
        assert_eq!(determine_exit_code(&[], None), exit_codes::SUCCESS);
    }

    #[test]
    fn test_exit_code_threshold() {
        let rows = builtin_rows();
        let top = rows[0].score;
        assert_eq!(determine_exit_code(&rows, Some(top)), exit_codes::SUCCESS);
        assert_eq!(
            determine_exit_code(&rows, Some(top + 0.1)),
            exit_codes::THRESHOLD_NOT_MET
        );
        assert_eq!(
            determine_exit_code(&[], Some(0.0)),
            exit_codes::THRESHOLD_NOT_MET
        );
    }

    #[test]
    fn test_run_rank_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        let mut config = AppConfig::default();
        config.output.format = ReportFormat::Json;
        config.output.file = Some(path.clone());

        let inputs = RankingInputs {
            quiet: true,
            ..RankingInputs::default()
        };
        let code = run_rank(&config, &inputs, Some(0.0)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["entries"][0]["rank"], 1);
    }
}
