//! Overview statistics derived from a ranking.
//!
//! The strong-contender threshold is a presentation rule supplied by the
//! caller (see `ScoringConfig::strong_threshold`); nothing here hard-codes it.

use super::engine::RankedTitle;
use crate::model::{MetricKey, MetricMap};
use serde::{Deserialize, Serialize};

/// Highest ranked title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCandidate {
    pub title_id: String,
    pub dataset_index: usize,
    pub score: f64,
}

/// Overview cards for a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub title_count: usize,
    pub top: Option<TopCandidate>,
    /// Mean of the rounded scores; 0.0 for an empty ranking
    pub average_score: f64,
    pub strong_threshold: f64,
    /// Titles scoring at or above `strong_threshold`
    pub strong_contenders: usize,
    /// How many titles each metric is the top driver for
    pub driver_counts: MetricMap<usize>,
}

impl RankingSummary {
    /// Summarize `rows`, counting titles at or above `strong_threshold`.
    #[must_use]
    pub fn from_rows(rows: &[RankedTitle], strong_threshold: f64) -> Self {
        let total: f64 = rows.iter().map(|r| r.score).sum();
        let average_score = if rows.is_empty() {
            0.0
        } else {
            total / rows.len() as f64
        };

        let mut driver_counts = MetricMap::splat(0_usize);
        for row in rows {
            driver_counts[row.top_driver] += 1;
        }

        Self {
            title_count: rows.len(),
            top: rows.first().map(|r| TopCandidate {
                title_id: r.title_id.clone(),
                dataset_index: r.dataset_index,
                score: r.score,
            }),
            average_score,
            strong_threshold,
            strong_contenders: rows.iter().filter(|r| r.score >= strong_threshold).count(),
            driver_counts,
        }
    }

    /// Metric that drives the most titles; earliest metric wins ties.
    #[must_use]
    pub fn dominant_driver(&self) -> Option<MetricKey> {
        if self.title_count == 0 {
            return None;
        }
        MetricKey::ALL.into_iter().reduce(|best, metric| {
            if self.driver_counts[metric] > self.driver_counts[best] {
                metric
            } else {
                best
            }
        })
    }
}
