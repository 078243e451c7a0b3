//! Title profiles: the read-only reference records being ranked.

use super::metric::MetricKey;
use super::region::{RegionData, RegionFilter};
use serde::{Deserialize, Serialize};

/// Audience segment used in cluster distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterKey {
    CasualBrowsers,
    BingeWatchers,
    FranchiseSuperfans,
    Samplers,
}

impl ClusterKey {
    pub const ALL: [Self; 4] = [
        Self::CasualBrowsers,
        Self::BingeWatchers,
        Self::FranchiseSuperfans,
        Self::Samplers,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CasualBrowsers => "Casual Browsers",
            Self::BingeWatchers => "Binge Watchers",
            Self::FranchiseSuperfans => "Franchise Superfans",
            Self::Samplers => "Samplers",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CasualBrowsers => "Low completion, low rewatch, broad light sampling.",
            Self::BingeWatchers => "High binge intensity and fast title turnover.",
            Self::FranchiseSuperfans => {
                "High completion, high rewatch, high post-finish engagement."
            }
            Self::Samplers => "Moderate metrics with broad cross-genre behavior.",
        }
    }
}

/// Share of the audience (in percent) falling in each segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterDistribution {
    pub casual_browsers: f64,
    pub binge_watchers: f64,
    pub franchise_superfans: f64,
    pub samplers: f64,
}

impl ClusterDistribution {
    #[must_use]
    pub const fn get(&self, cluster: ClusterKey) -> f64 {
        match cluster {
            ClusterKey::CasualBrowsers => self.casual_browsers,
            ClusterKey::BingeWatchers => self.binge_watchers,
            ClusterKey::FranchiseSuperfans => self.franchise_superfans,
            ClusterKey::Samplers => self.samplers,
        }
    }

    /// Sum of all segment percentages (about 100 for well-formed data).
    #[must_use]
    pub fn total(&self) -> f64 {
        ClusterKey::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Segment with the largest share; the first listed segment wins ties.
    #[must_use]
    pub fn dominant(&self) -> ClusterKey {
        ClusterKey::ALL
            .into_iter()
            .fold(ClusterKey::CasualBrowsers, |best, cluster| {
                if self.get(cluster) > self.get(best) {
                    cluster
                } else {
                    best
                }
            })
    }
}

/// A catalog entry.
///
/// Descriptive fields and annotations are carried for display only; scoring
/// reads the six metric fields and the regional completion rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleProfile {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub origin_region: String,
    pub release_year: u16,
    pub season_count: u16,

    pub completion_rate: f64,
    pub avg_pct_watched: f64,
    pub rewatch_rate: f64,
    #[serde(rename = "returnRate7d")]
    pub return_rate_7d: f64,
    pub days_active_after: f64,
    pub binge_intensity: f64,
    pub save_to_list_rate: f64,
    pub multi_region_strength: f64,
    pub audience_breadth: f64,

    pub cluster_distribution: ClusterDistribution,
    pub region_data: RegionData,

    #[serde(default)]
    pub expansion_suggestions: Vec<String>,
    #[serde(default)]
    pub expansion_rationale: String,
    #[serde(default)]
    pub key_summary: String,
}

impl TitleProfile {
    /// Scalar value of a metric, ignoring the region filter.
    #[must_use]
    pub const fn base_metric(&self, metric: MetricKey) -> f64 {
        match metric {
            MetricKey::CompletionRate => self.completion_rate,
            MetricKey::RewatchRate => self.rewatch_rate,
            MetricKey::ReturnRate7d => self.return_rate_7d,
            MetricKey::MultiRegionStrength => self.multi_region_strength,
            MetricKey::AudienceBreadth => self.audience_breadth,
            MetricKey::BingeIntensity => self.binge_intensity,
        }
    }

    /// Effective value of a metric under a filter context.
    ///
    /// Only completion rate is region-sensitive; every other metric reads the
    /// scalar field directly.
    #[must_use]
    pub const fn metric_value(&self, metric: MetricKey, filter: RegionFilter) -> f64 {
        match (metric, filter) {
            (MetricKey::CompletionRate, RegionFilter::Region(code)) => {
                self.region_data.get(code).completion_rate
            }
            _ => self.base_metric(metric),
        }
    }

    /// First expansion suggestion, used as the headline in tables.
    #[must_use]
    pub fn headline_suggestion(&self) -> &str {
        self.expansion_suggestions
            .first()
            .map_or("-", String::as_str)
    }

    /// "2021 • 3 seasons" style subtitle.
    #[must_use]
    pub fn subtitle(&self) -> String {
        let plural = if self.season_count == 1 { "" } else { "s" };
        format!("{} • {} season{plural}", self.release_year, self.season_count)
    }
}
