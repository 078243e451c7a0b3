//! Inspect command handler.
//!
//! Implements the `inspect` subcommand: the deep dive for one title.

use super::RankingInputs;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::model::{RegionFilter, ScoreWeights, TitleProfile};
use crate::pipeline::{
    auto_detect_format, load_catalog, resolve_weights, should_use_color, write_output,
    OutputTarget,
};
use crate::reports::{render_title_detail, ReportFormat};
use crate::scoring::{rank, RankedTitle};
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectView<'a> {
    title: &'a TitleProfile,
    ranking: &'a RankedTitle,
    filter: RegionFilter,
    weights: ScoreWeights,
}

/// Resolve a title by id or name, suggesting the closest id on a miss.
pub fn find_title<'a>(catalog: &'a Catalog, query: &str) -> Result<&'a TitleProfile> {
    catalog.lookup(query).ok_or_else(|| match catalog.suggest(query) {
        Some(suggestion) => anyhow!("Unknown title '{query}'. Did you mean '{suggestion}'?"),
        None => anyhow!("Unknown title '{query}'"),
    })
}

/// Run the inspect command
pub fn run_inspect(config: &AppConfig, inputs: &RankingInputs, query: &str) -> Result<()> {
    let catalog = load_catalog(inputs.catalog.as_deref(), inputs.quiet)?;
    let weights = resolve_weights(config, inputs.weights_file.as_deref(), &inputs.overrides)?;
    let filter = config.scoring.region;

    let title = find_title(&catalog, query)?;
    let rows = rank(catalog.titles(), &weights, filter);
    let row = rows
        .iter()
        .find(|row| row.title_id == title.id)
        .with_context(|| format!("'{}' missing from ranking", title.id))?;

    let target = OutputTarget::from_option(config.output.file.clone());
    let content = match auto_detect_format(config.output.format) {
        ReportFormat::Json => {
            let view = InspectView {
                title,
                ranking: row,
                filter,
                weights,
            };
            let mut json = serde_json::to_string_pretty(&view)?;
            json.push('\n');
            json
        }
        ReportFormat::Table | ReportFormat::Summary => render_title_detail(
            title,
            row,
            filter,
            should_use_color(config.output.no_color, &target),
        ),
        other => bail!("inspect supports table and json output, not {other}"),
    };

    write_output(&content, &target, inputs.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_title_by_id_and_name() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(find_title(&catalog, "iron-tide").unwrap().id, "iron-tide");
        assert_eq!(find_title(&catalog, "IRON TIDE").unwrap().id, "iron-tide");
    }

    #[test]
    fn test_unknown_title_suggests() {
        let catalog = Catalog::builtin().unwrap();
        let err = find_title(&catalog, "iron-tyde").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'iron-tide'?"), "{err}");
    }

    #[test]
    fn test_inspect_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.json");
        let mut config = AppConfig::default();
        config.output.format = ReportFormat::Json;
        config.output.file = Some(path.clone());
        let inputs = RankingInputs {
            quiet: true,
            ..RankingInputs::default()
        };

        run_inspect(&config, &inputs, "paper-moons").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["ranking"]["titleId"], "paper-moons");
        assert_eq!(value["filter"], "Global");
    }

    #[test]
    fn test_inspect_rejects_csv() {
        let mut config = AppConfig::default();
        config.output.format = ReportFormat::Csv;
        let inputs = RankingInputs {
            quiet: true,
            ..RankingInputs::default()
        };
        assert!(run_inspect(&config, &inputs, "paper-moons").is_err());
    }
}
