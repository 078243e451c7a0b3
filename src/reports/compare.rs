//! Region comparison rendering.

use super::escape::escape_csv;
use super::text::{pad_left, pad_right};
use super::{ansi_color, ReportError, ReportFormat};
use crate::catalog::Catalog;
use crate::model::RegionCode;
use crate::scoring::RegionComparison;

const TITLE_WIDTH: usize = 22;
const CELL_WIDTH: usize = 5;

/// Render a region comparison as a table, JSON or CSV.
pub fn render_comparison(
    comparison: &RegionComparison,
    catalog: &Catalog,
    format: ReportFormat,
    colored: bool,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Auto | ReportFormat::Table | ReportFormat::Summary => {
            Ok(render_table(comparison, catalog, colored))
        }
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(comparison)?;
            json.push('\n');
            Ok(json)
        }
        ReportFormat::Csv => Ok(render_csv(comparison)),
        ReportFormat::Markdown | ReportFormat::Tui => {
            Err(ReportError::UnsupportedFormat(format.to_string()))
        }
    }
}

fn title_name<'a>(catalog: &'a Catalog, index: usize, fallback: &'a str) -> &'a str {
    catalog
        .titles()
        .get(index)
        .map_or(fallback, |t| t.name.as_str())
}

fn render_table(comparison: &RegionComparison, catalog: &Catalog, colored: bool) -> String {
    let color = |text: &str, c: &str| ansi_color(text, c, colored);
    let mut lines = Vec::new();

    lines.push(format!(
        "{}  {}",
        color("Formula:", "cyan"),
        comparison.weights.formula()
    ));
    lines.push(String::new());

    let mut header = format!("{} {}", pad_right("TITLE", TITLE_WIDTH), pad_left("GLOBAL", 6));
    for code in RegionCode::ALL {
        header.push(' ');
        header.push_str(&pad_left(code.code(), CELL_WIDTH));
    }
    header.push_str("  BEST");
    lines.push(color(&header, "bold"));
    lines.push(color(&"─".repeat(header.chars().count()), "dim"));

    for row in &comparison.rows {
        let mut line = format!(
            "{} {}",
            pad_right(title_name(catalog, row.dataset_index, &row.title_id), TITLE_WIDTH),
            pad_left(&format!("#{}", row.global.rank), 6)
        );
        for code in RegionCode::ALL {
            line.push(' ');
            let movement = row.movement(code).unwrap_or(0);
            let cell = pad_left(
                &row.regions
                    .get(&code)
                    .map_or_else(|| "-".to_string(), |p| format!("#{}", p.rank)),
                CELL_WIDTH,
            );
            let styled = match movement {
                m if m > 0 => color(&cell, "green"),
                m if m < 0 => color(&cell, "red"),
                _ => cell,
            };
            line.push_str(&styled);
        }
        let best = row
            .best_region()
            .map_or_else(|| "-".to_string(), |code| code.code().to_string());
        line.push_str(&format!("  {best}"));
        if row.best_movement() > 0 {
            line.push_str(&format!(" (+{})", row.best_movement()));
        }
        lines.push(line);
    }

    lines.join("\n") + "\n"
}

fn render_csv(comparison: &RegionComparison) -> String {
    let mut content = String::from("ID,Global Rank,Global Score");
    for code in RegionCode::ALL {
        content.push_str(&format!(",{code} Rank,{code} Score"));
    }
    content.push_str(",Best Region\n");

    for row in &comparison.rows {
        content.push_str(&format!(
            "{},{},{:.1}",
            escape_csv(&row.title_id),
            row.global.rank,
            row.global.score
        ));
        for code in RegionCode::ALL {
            match row.regions.get(&code) {
                Some(p) => content.push_str(&format!(",{},{:.1}", p.rank, p.score)),
                None => content.push_str(",,"),
            }
        }
        content.push_str(&format!(
            ",{}\n",
            row.best_region().map_or("", |c| c.code())
        ));
    }
    content
}
