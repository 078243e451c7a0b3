//! Single-title deep dive.

use super::text::{bar, pad_left, pad_right};
use super::{ansi_color, score_color};
use crate::model::{ClusterKey, MetricKey, RegionFilter, TitleProfile};
use crate::scoring::RankedTitle;

const LABEL_WIDTH: usize = 22;
const BAR_WIDTH: usize = 20;

/// Render the deep dive for one ranked title.
///
/// Sections: headline, score breakdown (largest contribution first), key
/// drivers summary, raw metrics, cluster distribution, regional completion
/// with over-index flags, and the expansion recommendation.
#[must_use]
pub fn render_title_detail(
    title: &TitleProfile,
    row: &RankedTitle,
    filter: RegionFilter,
    colored: bool,
) -> String {
    let color = |text: &str, c: &str| ansi_color(text, c, colored);
    let mut lines = Vec::new();

    lines.push(color(&title.name, "bold"));
    lines.push(color(
        &format!("{} • {} • {}", title.genre, title.subtitle(), title.origin_region),
        "dim",
    ));
    lines.push(format!(
        "Rank #{} • Score {} • Region context: {}",
        row.rank,
        color(&format!("{:.1}", row.score), score_color(row.score)),
        filter.label()
    ));
    lines.push(String::new());

    lines.push(color("Score Breakdown", "bold"));
    let max_contribution = row
        .contributions
        .values()
        .copied()
        .fold(0.0_f64, f64::max);
    for (metric, contribution) in row.breakdown() {
        let fraction = if max_contribution > 0.0 {
            contribution / max_contribution
        } else {
            0.0
        };
        let marker = if metric == row.top_driver { "*" } else { " " };
        lines.push(format!(
            "{marker} {} {} {} pts  (normalized {:.1})",
            pad_right(metric.label(), LABEL_WIDTH),
            bar(fraction, BAR_WIDTH),
            pad_left(&format!("{contribution:.2}"), 6),
            row.normalized_metrics[metric]
        ));
    }
    lines.push(String::new());

    if !title.key_summary.is_empty() {
        lines.push(color("Key Drivers Summary", "bold"));
        lines.push(title.key_summary.clone());
        lines.push(String::new());
    }

    lines.push(color("Metrics", "bold"));
    for metric in MetricKey::ALL {
        let value = title.metric_value(metric, filter);
        let scoped = if metric.is_region_sensitive() && filter != RegionFilter::Global {
            format!(" ({})", filter)
        } else {
            String::new()
        };
        lines.push(format!(
            "  {} {:>6.1}%{scoped}",
            pad_right(metric.label(), LABEL_WIDTH),
            value * 100.0
        ));
    }
    lines.push(format!(
        "  {} {:>6.1}%",
        pad_right("Avg % Watched", LABEL_WIDTH),
        title.avg_pct_watched * 100.0
    ));
    lines.push(format!(
        "  {} {:>6.1}%",
        pad_right("Save-to-List Rate", LABEL_WIDTH),
        title.save_to_list_rate * 100.0
    ));
    lines.push(format!(
        "  {} {:>6.1} days",
        pad_right("Days Active After", LABEL_WIDTH),
        title.days_active_after
    ));
    lines.push(String::new());

    lines.push(color("Cluster Distribution", "bold"));
    let dominant = title.cluster_distribution.dominant();
    for cluster in ClusterKey::ALL {
        let share = title.cluster_distribution.get(cluster);
        let line = format!(
            "  {} {} {:>3.0}%",
            pad_right(cluster.name(), LABEL_WIDTH),
            bar(share / 100.0, BAR_WIDTH),
            share
        );
        if cluster == dominant {
            lines.push(color(&line, "cyan"));
        } else {
            lines.push(line);
        }
    }
    lines.push(String::new());

    lines.push(color("Region Performance", "bold"));
    for (code, perf) in title.region_data.iter() {
        let flag = if perf.over_index {
            color("over-index", "yellow")
        } else {
            String::new()
        };
        lines.push(
            format!(
                "  {} {} {:>5.1}%  {flag}",
                pad_right(code.code(), 3),
                bar(perf.completion_rate, BAR_WIDTH),
                perf.completion_rate * 100.0
            )
            .trim_end()
            .to_string(),
        );
    }
    lines.push(String::new());

    lines.push(color("Expansion Recommendation", "bold"));
    if title.expansion_suggestions.is_empty() {
        lines.push(color("  No suggestions", "dim"));
    } else {
        lines.push(format!("  {}", title.expansion_suggestions.join(" · ")));
    }
    if !title.expansion_rationale.is_empty() {
        lines.push(format!("  {}", title.expansion_rationale));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::{RegionCode, ScoreWeights};
    use crate::scoring::rank;

    fn detail_for(filter: RegionFilter) -> (String, RankedTitle) {
        let catalog = Catalog::builtin().unwrap();
        let rows = rank(catalog.titles(), &ScoreWeights::default(), filter);
        let row = rows[0].clone();
        let title = row.title(catalog.titles()).unwrap();
        (render_title_detail(title, &row, filter, false), row)
    }

    #[test]
    fn test_detail_sections_present() {
        let (output, _) = detail_for(RegionFilter::Global);
        for section in [
            "Score Breakdown",
            "Metrics",
            "Cluster Distribution",
            "Region Performance",
            "Expansion Recommendation",
        ] {
            assert!(output.contains(section), "missing {section}");
        }
        assert!(output.contains("Rank #1"));
    }

    #[test]
    fn test_breakdown_lists_top_driver_first() {
        let (output, row) = detail_for(RegionFilter::Global);
        let first_breakdown_line = output
            .lines()
            .skip_while(|l| *l != "Score Breakdown")
            .nth(1)
            .unwrap();
        assert!(first_breakdown_line.starts_with('*'));
        assert!(first_breakdown_line.contains(row.top_driver.label()));
    }

    #[test]
    fn test_region_context_shown() {
        let (output, _) = detail_for(RegionFilter::Region(RegionCode::Kr));
        assert!(output.contains("Region context: South Korea"));
        assert!(output.contains("(KR)"));
    }
}
