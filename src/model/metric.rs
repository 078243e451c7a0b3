//! Metric keys and the total per-metric map.

use schemars::JsonSchema;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One scored dimension of a title.
///
/// Declaration order is significant: it is the iteration order of every
/// [`MetricMap`] and breaks ties when selecting a top driver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum MetricKey {
    #[serde(rename = "completionRate")]
    CompletionRate,
    #[serde(rename = "rewatchRate")]
    RewatchRate,
    #[serde(rename = "returnRate7d")]
    ReturnRate7d,
    #[serde(rename = "multiRegionStrength")]
    MultiRegionStrength,
    #[serde(rename = "audienceBreadth")]
    AudienceBreadth,
    #[serde(rename = "bingeIntensity")]
    BingeIntensity,
}

impl MetricKey {
    /// Number of metrics in the enumeration.
    pub const COUNT: usize = 6;

    /// All metrics in enumeration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::CompletionRate,
        Self::RewatchRate,
        Self::ReturnRate7d,
        Self::MultiRegionStrength,
        Self::AudienceBreadth,
        Self::BingeIntensity,
    ];

    /// Position of this metric in [`MetricKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire key used in JSON/YAML documents.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CompletionRate => "completionRate",
            Self::RewatchRate => "rewatchRate",
            Self::ReturnRate7d => "returnRate7d",
            Self::MultiRegionStrength => "multiRegionStrength",
            Self::AudienceBreadth => "audienceBreadth",
            Self::BingeIntensity => "bingeIntensity",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompletionRate => "Completion Rate",
            Self::RewatchRate => "Rewatch Rate",
            Self::ReturnRate7d => "7-Day Return Rate",
            Self::MultiRegionStrength => "Multi-Region Strength",
            Self::AudienceBreadth => "Audience Breadth",
            Self::BingeIntensity => "Binge Intensity",
        }
    }

    /// Short symbol used when printing the scoring formula.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::CompletionRate => "C",
            Self::RewatchRate => "R",
            Self::ReturnRate7d => "Ret",
            Self::MultiRegionStrength => "M",
            Self::AudienceBreadth => "A",
            Self::BingeIntensity => "B",
        }
    }

    /// Whether the effective value depends on the region filter.
    #[must_use]
    pub const fn is_region_sensitive(self) -> bool {
        matches!(self, Self::CompletionRate)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a metric name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}' (expected one of: completionRate, rewatchRate, returnRate7d, multiRegionStrength, audienceBreadth, bingeIntensity)")]
pub struct ParseMetricError(pub String);

impl FromStr for MetricKey {
    type Err = ParseMetricError;

    /// Accepts the wire key as well as kebab-case and `snake_case` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "completionrate" | "completion" => Ok(Self::CompletionRate),
            "rewatchrate" | "rewatch" => Ok(Self::RewatchRate),
            "returnrate7d" | "7dayreturnrate" | "return" => Ok(Self::ReturnRate7d),
            "multiregionstrength" | "multiregion" => Ok(Self::MultiRegionStrength),
            "audiencebreadth" | "breadth" => Ok(Self::AudienceBreadth),
            "bingeintensity" | "binge" => Ok(Self::BingeIntensity),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}

/// A value for every metric, stored in enumeration order.
///
/// The map is total by construction, so lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricMap<T>([T; MetricKey::COUNT]);

impl<T> MetricMap<T> {
    /// Build a map by evaluating `f` for each metric in enumeration order.
    pub fn from_fn(mut f: impl FnMut(MetricKey) -> T) -> Self {
        Self(MetricKey::ALL.map(&mut f))
    }

    /// Build a map from values listed in enumeration order.
    pub const fn from_array(values: [T; MetricKey::COUNT]) -> Self {
        Self(values)
    }

    /// Iterate `(metric, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &T)> {
        MetricKey::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate values in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Transform every value, keeping the metric association.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> MetricMap<U> {
        MetricMap::from_fn(|metric| f(&self.0[metric.index()]))
    }

    /// Borrow the underlying array.
    pub const fn as_array(&self) -> &[T; MetricKey::COUNT] {
        &self.0
    }
}

impl<T: Copy> MetricMap<T> {
    /// A map with the same value for every metric.
    pub fn splat(value: T) -> Self {
        Self([value; MetricKey::COUNT])
    }
}

impl<T> Index<MetricKey> for MetricMap<T> {
    type Output = T;

    fn index(&self, metric: MetricKey) -> &T {
        &self.0[metric.index()]
    }
}

impl<T> IndexMut<MetricKey> for MetricMap<T> {
    fn index_mut(&mut self, metric: MetricKey) -> &mut T {
        &mut self.0[metric.index()]
    }
}

impl<T: Serialize> Serialize for MetricMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MetricKey::COUNT))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(metric.key(), value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for MetricMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetricMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for MetricMapVisitor<T> {
            type Value = MetricMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with one entry per metric key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut slots: [Option<T>; MetricKey::COUNT] = Default::default();
                while let Some(name) = access.next_key::<String>()? {
                    let metric = name.parse::<MetricKey>().map_err(de::Error::custom)?;
                    if slots[metric.index()].is_some() {
                        return Err(de::Error::custom(format!("duplicate metric '{metric}'")));
                    }
                    slots[metric.index()] = Some(access.next_value()?);
                }

                let mut values = Vec::with_capacity(MetricKey::COUNT);
                for (metric, slot) in MetricKey::ALL.into_iter().zip(slots) {
                    match slot {
                        Some(value) => values.push(value),
                        None => return Err(de::Error::custom(format!("missing metric '{metric}'"))),
                    }
                }
                let array: [T; MetricKey::COUNT] = values
                    .try_into()
                    .map_err(|_| de::Error::custom("metric map has the wrong number of entries"))?;
                Ok(MetricMap(array))
            }
        }

        deserializer.deserialize_map(MetricMapVisitor(PhantomData))
    }
}

impl<T: JsonSchema> JsonSchema for MetricMap<T> {
    fn schema_name() -> String {
        format!("MetricMap_of_{}", T::schema_name())
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <std::collections::BTreeMap<String, T>>::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, metric) in MetricKey::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!("completionRate".parse(), Ok(MetricKey::CompletionRate));
        assert_eq!("return-rate-7d".parse(), Ok(MetricKey::ReturnRate7d));
        assert_eq!("multi_region_strength".parse(), Ok(MetricKey::MultiRegionStrength));
        assert_eq!("Binge Intensity".parse(), Ok(MetricKey::BingeIntensity));
        assert!("popularity".parse::<MetricKey>().is_err());
    }

    #[test]
    fn test_serialized_key_matches_wire_key() {
        for metric in MetricKey::ALL {
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.key()));
        }
    }

    #[test]
    fn test_metric_map_serializes_as_object() {
        let map = MetricMap::from_fn(|m| m.index());
        let json = serde_json::to_value(map).unwrap();
        assert_eq!(json["completionRate"], 0);
        assert_eq!(json["bingeIntensity"], 5);
    }

    #[test]
    fn test_metric_map_requires_every_metric() {
        let err = serde_json::from_str::<MetricMap<f64>>(r#"{"completionRate": 1.0}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing metric"), "{err}");
    }

    #[test]
    fn test_metric_map_round_trip() {
        let map = MetricMap::from_array([0.1, 0.2, 0.3, 0.15, 0.15, 0.1]);
        let json = serde_json::to_string(&map).unwrap();
        let back: MetricMap<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
