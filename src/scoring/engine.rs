//! Ranking engine: min-max normalization, weighted composition and ordering.

use super::numeric::{round_to, MetricRange};
use super::weights::normalize;
use crate::model::{MetricKey, MetricMap, RegionFilter, ScoreWeights, TitleProfile};
use serde::{Deserialize, Serialize};

/// Decimal places kept on the total score.
pub const SCORE_PRECISION: u32 = 1;

/// Decimal places kept on normalized values and contributions.
pub const DETAIL_PRECISION: u32 = 2;

/// One row of a ranking.
///
/// Rows refer back to their title by position in the input slice, so a
/// ranking can be cached or sent across threads independently of the
/// catalog that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTitle {
    /// 1-based position in the sorted output
    pub rank: usize,
    /// Index of the title in the ranked slice
    pub dataset_index: usize,
    pub title_id: String,
    /// Total score rounded to one decimal
    pub score: f64,
    /// Sum of the rounded contributions before the score is rounded; the sort key
    pub raw_score: f64,
    /// Per-metric value on the 0-100 scale
    pub normalized_metrics: MetricMap<f64>,
    /// Per-metric normalized value multiplied by its weight
    pub contributions: MetricMap<f64>,
    /// Metric with the largest contribution
    pub top_driver: MetricKey,
}

impl RankedTitle {
    /// Resolve the title this row was computed from.
    #[must_use]
    pub fn title<'a>(&self, titles: &'a [TitleProfile]) -> Option<&'a TitleProfile> {
        titles.get(self.dataset_index)
    }

    /// Contributions sorted from largest to smallest, ties in metric order.
    #[must_use]
    pub fn breakdown(&self) -> Vec<(MetricKey, f64)> {
        let mut items: Vec<(MetricKey, f64)> =
            self.contributions.iter().map(|(m, v)| (m, *v)).collect();
        items.sort_by(|a, b| b.1.total_cmp(&a.1));
        items
    }
}

/// Metric with the strictly largest contribution; the earliest metric in
/// enumeration order wins ties.
#[must_use]
pub fn top_driver(contributions: &MetricMap<f64>) -> MetricKey {
    MetricKey::ALL
        .into_iter()
        .fold(MetricKey::ALL[0], |best, metric| {
            if contributions[metric] > contributions[best] {
                metric
            } else {
                best
            }
        })
}

/// Observed range of every metric across `titles` under `filter`.
#[must_use]
pub fn metric_ranges(titles: &[TitleProfile], filter: RegionFilter) -> MetricMap<MetricRange> {
    MetricMap::from_fn(|metric| {
        MetricRange::of(titles.iter().map(|t| t.metric_value(metric, filter)))
    })
}

/// Score and rank `titles` under `weights` and `filter`.
///
/// Weights are normalized first. Each metric is min-max scaled across the
/// titles as seen through the filter, weighted, and summed. Rows are sorted
/// by descending raw score; the sort is stable, so titles with equal raw
/// scores keep their dataset order and still receive distinct consecutive
/// ranks. An empty slice yields an empty ranking.
#[must_use]
pub fn rank(titles: &[TitleProfile], weights: &ScoreWeights, filter: RegionFilter) -> Vec<RankedTitle> {
    if titles.is_empty() {
        return Vec::new();
    }

    let weights = normalize(weights);
    let ranges = metric_ranges(titles, filter);

    let mut rows: Vec<RankedTitle> = titles
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let normalized =
                MetricMap::from_fn(|metric| ranges[metric].scale(title.metric_value(metric, filter)));
            let contributions = MetricMap::from_fn(|metric| {
                round_to(normalized[metric] * weights[metric], DETAIL_PRECISION)
            });
            let raw_score: f64 = contributions.values().sum();

            RankedTitle {
                rank: 0,
                dataset_index: index,
                title_id: title.id.clone(),
                score: round_to(raw_score, SCORE_PRECISION),
                raw_score,
                normalized_metrics: normalized.map(|v| round_to(*v, DETAIL_PRECISION)),
                top_driver: top_driver(&contributions),
                contributions,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position + 1;
    }

    tracing::debug!(
        titles = rows.len(),
        filter = %filter,
        top = rows.first().map(|r| r.title_id.as_str()).unwrap_or_default(),
        "ranked catalog"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_driver_first_occurrence_wins_ties() {
        let contributions = MetricMap::from_array([5.0, 10.0, 10.0, 1.0, 0.0, 10.0]);
        assert_eq!(top_driver(&contributions), MetricKey::RewatchRate);
    }

    #[test]
    fn test_top_driver_all_zero_is_first_metric() {
        assert_eq!(top_driver(&MetricMap::splat(0.0)), MetricKey::CompletionRate);
    }

    #[test]
    fn test_empty_input_yields_empty_ranking() {
        assert!(rank(&[], &ScoreWeights::default(), RegionFilter::Global).is_empty());
    }

    #[test]
    fn test_negative_weights_keep_scores_in_range() {
        let catalog = crate::catalog::Catalog::builtin().unwrap();
        let weights = ScoreWeights::new([0.5, -0.3, 0.4, 0.2, 0.1, 0.1]);
        for row in rank(catalog.titles(), &weights, RegionFilter::Global) {
            assert!((0.0..=100.05).contains(&row.score), "score {}", row.score);
            assert!(row.contributions.values().all(|c| *c >= 0.0));
            assert!(row.contributions[MetricKey::RewatchRate].abs() < 1e-12);
        }
    }

    #[test]
    fn test_breakdown_sorted_descending() {
        let row = RankedTitle {
            rank: 1,
            dataset_index: 0,
            title_id: "t".into(),
            score: 0.0,
            raw_score: 0.0,
            normalized_metrics: MetricMap::splat(0.0),
            contributions: MetricMap::from_array([1.0, 3.0, 2.0, 0.0, 3.0, 0.5]),
            top_driver: MetricKey::RewatchRate,
        };
        let order: Vec<MetricKey> = row.breakdown().into_iter().map(|(m, _)| m).collect();
        assert_eq!(
            order,
            vec![
                MetricKey::RewatchRate,
                MetricKey::AudienceBreadth,
                MetricKey::ReturnRate7d,
                MetricKey::CompletionRate,
                MetricKey::BingeIntensity,
                MetricKey::MultiRegionStrength,
            ]
        );
    }
}
