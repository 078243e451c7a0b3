//! Region codes, the filter context, and per-region performance.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported market.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionCode {
    Us,
    Uk,
    Br,
    Jp,
    De,
    Kr,
}

impl RegionCode {
    /// All regions in display order.
    pub const ALL: [Self; 6] = [Self::Us, Self::Uk, Self::Br, Self::Jp, Self::De, Self::Kr];

    /// Two-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Uk => "UK",
            Self::Br => "BR",
            Self::Jp => "JP",
            Self::De => "DE",
            Self::Kr => "KR",
        }
    }

    /// Human-readable country name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Us => "United States",
            Self::Uk => "United Kingdom",
            Self::Br => "Brazil",
            Self::Jp => "Japan",
            Self::De => "Germany",
            Self::Kr => "South Korea",
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a region or filter name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region '{0}' (expected global, US, UK, BR, JP, DE or KR)")]
pub struct ParseRegionError(pub String);

impl FromStr for RegionCode {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "UK" | "GB" => Ok(Self::Uk),
            "BR" => Ok(Self::Br),
            "JP" => Ok(Self::Jp),
            "DE" => Ok(Self::De),
            "KR" => Ok(Self::Kr),
            _ => Err(ParseRegionError(s.to_string())),
        }
    }
}

/// Scope used to resolve region-sensitive metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionFilter {
    #[default]
    Global,
    Region(RegionCode),
}

impl RegionFilter {
    /// Global followed by every region, in display order.
    pub const ALL: [Self; 7] = [
        Self::Global,
        Self::Region(RegionCode::Us),
        Self::Region(RegionCode::Uk),
        Self::Region(RegionCode::Br),
        Self::Region(RegionCode::Jp),
        Self::Region(RegionCode::De),
        Self::Region(RegionCode::Kr),
    ];

    /// Region named by this filter, if any.
    #[must_use]
    pub const fn region(self) -> Option<RegionCode> {
        match self {
            Self::Global => None,
            Self::Region(code) => Some(code),
        }
    }

    /// Human-readable name of the context.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Region(code) => code.label(),
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next filter in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous filter in display order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("Global"),
            Self::Region(code) => f.write_str(code.code()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("global") {
            return Ok(Self::Global);
        }
        s.parse().map(Self::Region)
    }
}

impl TryFrom<String> for RegionFilter {
    type Error = ParseRegionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegionFilter> for String {
    fn from(filter: RegionFilter) -> Self {
        filter.to_string()
    }
}

impl JsonSchema for RegionFilter {
    fn schema_name() -> String {
        "RegionFilter".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

/// Local performance of a title in one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPerformance {
    pub completion_rate: f64,
    /// Whether the title over-indexes locally compared to its global audience
    pub over_index: bool,
}

/// Per-region performance for every supported region.
///
/// One field per region keeps the map total: a document missing a region
/// fails to deserialize instead of producing a misleading score later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionData {
    #[serde(rename = "US")]
    pub us: RegionPerformance,
    #[serde(rename = "UK")]
    pub uk: RegionPerformance,
    #[serde(rename = "BR")]
    pub br: RegionPerformance,
    #[serde(rename = "JP")]
    pub jp: RegionPerformance,
    #[serde(rename = "DE")]
    pub de: RegionPerformance,
    #[serde(rename = "KR")]
    pub kr: RegionPerformance,
}

impl RegionData {
    #[must_use]
    pub const fn get(&self, region: RegionCode) -> &RegionPerformance {
        match region {
            RegionCode::Us => &self.us,
            RegionCode::Uk => &self.uk,
            RegionCode::Br => &self.br,
            RegionCode::Jp => &self.jp,
            RegionCode::De => &self.de,
            RegionCode::Kr => &self.kr,
        }
    }

    /// Iterate `(region, performance)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionCode, &RegionPerformance)> {
        RegionCode::ALL.into_iter().map(move |code| (code, self.get(code)))
    }

    /// Regions where the title over-indexes.
    pub fn over_indexed(&self) -> impl Iterator<Item = RegionCode> + '_ {
        self.iter()
            .filter(|(_, perf)| perf.over_index)
            .map(|(code, _)| code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parse() {
        assert_eq!("global".parse(), Ok(RegionFilter::Global));
        assert_eq!("GLOBAL".parse(), Ok(RegionFilter::Global));
        assert_eq!("jp".parse(), Ok(RegionFilter::Region(RegionCode::Jp)));
        assert!("FR".parse::<RegionFilter>().is_err());
    }

    #[test]
    fn test_filter_cycle_wraps() {
        assert_eq!(RegionFilter::Global.prev(), RegionFilter::Region(RegionCode::Kr));
        assert_eq!(RegionFilter::Region(RegionCode::Kr).next(), RegionFilter::Global);
        let mut filter = RegionFilter::Global;
        for _ in 0..RegionFilter::ALL.len() {
            filter = filter.next();
        }
        assert_eq!(filter, RegionFilter::Global);
    }

    #[test]
    fn test_filter_serializes_as_string() {
        let json = serde_json::to_string(&RegionFilter::Region(RegionCode::Br)).unwrap();
        assert_eq!(json, "\"BR\"");
        let back: RegionFilter = serde_json::from_str("\"Global\"").unwrap();
        assert_eq!(back, RegionFilter::Global);
    }

    #[test]
    fn test_region_data_requires_every_region() {
        let perf = r#"{"completionRate": 0.5, "overIndex": false}"#;
        let partial = format!(r#"{{"US": {perf}, "UK": {perf}}}"#);
        assert!(serde_json::from_str::<RegionData>(&partial).is_err());
    }
}
