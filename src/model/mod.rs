//! Data contracts shared by the catalog, scoring engine, reports and TUI.
//!
//! Every mapping keyed by metric or region is total by construction
//! ([`MetricMap`], [`RegionData`]), so the engine never has to handle a
//! missing entry at ranking time.

mod metric;
mod region;
mod title;
mod weights;

pub use metric::{MetricKey, MetricMap, ParseMetricError};
pub use region::{ParseRegionError, RegionCode, RegionData, RegionFilter, RegionPerformance};
pub use title::{ClusterDistribution, ClusterKey, TitleProfile};
pub use weights::ScoreWeights;
