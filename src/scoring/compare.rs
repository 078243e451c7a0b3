//! Cross-region comparison: how each title's rank moves between filters.

use super::cache::RankingCache;
use super::engine::RankedTitle;
use crate::catalog::Catalog;
use crate::model::{RegionCode, RegionFilter, ScoreWeights};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Rank and score of one title under one filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub rank: usize,
    pub score: f64,
}

/// A title's placement under every filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionComparisonRow {
    pub title_id: String,
    pub dataset_index: usize,
    pub global: Placement,
    /// Placement per region, in display order
    pub regions: IndexMap<RegionCode, Placement>,
}

impl RegionComparisonRow {
    /// Region with the best (lowest) rank; the first listed region wins ties.
    #[must_use]
    pub fn best_region(&self) -> Option<RegionCode> {
        self.regions
            .iter()
            .min_by_key(|(_, p)| p.rank)
            .map(|(code, _)| *code)
    }

    /// Places gained in `region` relative to the global ranking.
    /// Positive means the title ranks higher there.
    #[must_use]
    pub fn movement(&self, region: RegionCode) -> Option<i64> {
        self.regions
            .get(&region)
            .map(|p| self.global.rank as i64 - p.rank as i64)
    }

    /// Largest upward movement across regions.
    #[must_use]
    pub fn best_movement(&self) -> i64 {
        RegionCode::ALL
            .iter()
            .filter_map(|code| self.movement(*code))
            .max()
            .unwrap_or(0)
    }
}

/// Comparison of one weight vector across the global context and every region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionComparison {
    pub weights: ScoreWeights,
    /// Rows in global rank order
    pub rows: Vec<RegionComparisonRow>,
}

fn placement_by_index(rows: &[RankedTitle], title_count: usize) -> Vec<Placement> {
    let mut placements = vec![
        Placement {
            rank: 0,
            score: 0.0
        };
        title_count
    ];
    for row in rows {
        if let Some(slot) = placements.get_mut(row.dataset_index) {
            *slot = Placement {
                rank: row.rank,
                score: row.score,
            };
        }
    }
    placements
}

/// Rank `catalog` under every filter in parallel and line the results up
/// per title.
#[must_use]
pub fn compare_regions(
    catalog: &Catalog,
    weights: &ScoreWeights,
    cache: &RankingCache,
) -> RegionComparison {
    let rankings: Vec<(RegionFilter, Arc<[RankedTitle]>)> = RegionFilter::ALL
        .par_iter()
        .map(|filter| (*filter, cache.get_or_rank(catalog, weights, *filter)))
        .collect();

    let count = catalog.len();
    let mut global: Option<&Arc<[RankedTitle]>> = None;
    let mut per_region: Vec<(RegionCode, Vec<Placement>)> = Vec::new();
    for (filter, rows) in &rankings {
        match filter.region() {
            None => global = Some(rows),
            Some(code) => per_region.push((code, placement_by_index(rows, count))),
        }
    }

    let rows = global
        .map(|global_rows| {
            global_rows
                .iter()
                .map(|row| RegionComparisonRow {
                    title_id: row.title_id.clone(),
                    dataset_index: row.dataset_index,
                    global: Placement {
                        rank: row.rank,
                        score: row.score,
                    },
                    regions: per_region
                        .iter()
                        .map(|(code, placements)| (*code, placements[row.dataset_index]))
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(titles = count, "compared rankings across regions");
    RegionComparison {
        weights: *weights,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank;

    #[test]
    fn test_comparison_matches_individual_rankings() {
        let catalog = Catalog::builtin().unwrap();
        let weights = ScoreWeights::default();
        let comparison = compare_regions(&catalog, &weights, &RankingCache::default());

        assert_eq!(comparison.rows.len(), catalog.len());
        let jp = rank(
            catalog.titles(),
            &weights,
            RegionFilter::Region(RegionCode::Jp),
        );
        for ranked in &jp {
            let row = comparison
                .rows
                .iter()
                .find(|r| r.dataset_index == ranked.dataset_index)
                .unwrap();
            assert_eq!(row.regions[&RegionCode::Jp].rank, ranked.rank);
            assert_eq!(row.regions[&RegionCode::Jp].score, ranked.score);
        }
    }

    #[test]
    fn test_rows_follow_global_order() {
        let catalog = Catalog::builtin().unwrap();
        let comparison =
            compare_regions(&catalog, &ScoreWeights::default(), &RankingCache::default());
        let ranks: Vec<usize> = comparison.rows.iter().map(|r| r.global.rank).collect();
        let expected: Vec<usize> = (1..=catalog.len()).collect();
        assert_eq!(ranks, expected);
        for row in &comparison.rows {
            assert_eq!(row.regions.len(), RegionCode::ALL.len());
            assert!(row.best_region().is_some());
        }
    }

    #[test]
    fn test_movement_sign() {
        let mut regions = IndexMap::new();
        regions.insert(RegionCode::Us, Placement { rank: 2, score: 80.0 });
        regions.insert(RegionCode::Uk, Placement { rank: 7, score: 40.0 });
        let row = RegionComparisonRow {
            title_id: "t".into(),
            dataset_index: 0,
            global: Placement { rank: 5, score: 60.0 },
            regions,
        };
        assert_eq!(row.movement(RegionCode::Us), Some(3));
        assert_eq!(row.movement(RegionCode::Uk), Some(-2));
        assert_eq!(row.movement(RegionCode::Jp), None);
        assert_eq!(row.best_region(), Some(RegionCode::Us));
        assert_eq!(row.best_movement(), 3);
    }

    #[test]
    fn test_empty_catalog_yields_no_rows() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        let comparison =
            compare_regions(&catalog, &ScoreWeights::default(), &RankingCache::default());
        assert!(comparison.rows.is_empty());
    }
}
