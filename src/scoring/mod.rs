//! Scoring: weight rebalancing, ranking, summaries and comparison.
//!
//! The core ([`normalize`], [`rebalance`], [`rank`]) is pure and
//! deterministic. [`RankingCache`] memoizes rankings keyed by dataset
//! version, weights and filter; [`compare_regions`] fans a ranking out over
//! every region in parallel.

mod cache;
mod compare;
mod engine;
mod numeric;
mod summary;
mod weights;

pub use cache::{CacheStats, RankingCache, DEFAULT_CAPACITY};
pub use compare::{compare_regions, Placement, RegionComparison, RegionComparisonRow};
pub use engine::{
    metric_ranges, rank, top_driver, RankedTitle, DETAIL_PRECISION, SCORE_PRECISION,
};
pub use numeric::{clamp, round_to, MetricRange, MIDPOINT, SCALE_MAX};
pub use summary::{RankingSummary, TopCandidate};
pub use weights::{normalize, rebalance};
