//! Numeric helpers shared by the rebalancer and the ranking engine.

/// Normalized value assigned when every title ties on a metric.
pub const MIDPOINT: f64 = 50.0;

/// Upper bound of the normalized scale.
pub const SCALE_MAX: f64 = 100.0;

/// Clamp `value` into `[min, max]`. NaN maps to `min`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Round to `precision` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Observed range of a metric across the current dataset and filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Range of the given values. An empty input yields an inverted range
    /// (`+inf..-inf`) that callers must not scale against.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        values.into_iter().fold(
            Self {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |range, v| Self {
                min: range.min.min(v),
                max: range.max.max(v),
            },
        )
    }

    /// True when every value in the range is identical.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_flat(&self) -> bool {
        self.max == self.min
    }

    /// Min-max scale `value` onto `0..=100`; a flat range maps to the midpoint.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        if self.is_flat() {
            return MIDPOINT;
        }
        (value - self.min) / (self.max - self.min) * SCALE_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds_and_nan() {
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-0.2, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.4, 0.0, 1.0), 0.4);
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(66.666_666, 2), 66.67);
    }

    #[test]
    fn test_scale_endpoints() {
        let range = MetricRange::of([10.0, 50.0, 90.0]);
        assert_eq!(range.scale(10.0), 0.0);
        assert_eq!(range.scale(50.0), 50.0);
        assert_eq!(range.scale(90.0), 100.0);
    }

    #[test]
    fn test_flat_range_uses_midpoint() {
        let range = MetricRange::of([0.7, 0.7, 0.7]);
        assert!(range.is_flat());
        assert_eq!(range.scale(0.7), MIDPOINT);
    }
}
