//! Core value types shared by every analyzer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics as _;
use std::borrow::Cow;
use std::fmt;

/// A single metric sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl fmt::Display for TimeSeriesPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:.3}", self.timestamp.to_rfc3339(), self.value)
    }
}

/// Borrow the series in ascending timestamp order, sorting a copy only when needed
pub fn ordered(series: &[TimeSeriesPoint]) -> Cow<'_, [TimeSeriesPoint]> {
    if is_ordered(series) {
        Cow::Borrowed(series)
    } else {
        let mut sorted = series.to_vec();
        sorted.sort_by_key(|p| p.timestamp);
        Cow::Owned(sorted)
    }
}

/// Check whether timestamps are non-decreasing
pub fn is_ordered(series: &[TimeSeriesPoint]) -> bool {
    series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}

/// Extract the values of a series
pub fn values_of(series: &[TimeSeriesPoint]) -> Vec<f64> {
    series.iter().map(|p| p.value).collect()
}

/// Population summary statistics of a set of values
///
/// `stddev` uses the population divisor `n`. An empty input yields the
/// all-zero value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Statistics {
    /// Compute population statistics over `values`
    pub fn population(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mean = values.mean();
        let stddev = if values.len() == 1 {
            0.0
        } else {
            values.population_std_dev()
        };

        Self {
            mean,
            stddev: if stddev.is_finite() { stddev } else { 0.0 },
            min: values.min(),
            max: values.max(),
            count: values.len(),
        }
    }

    /// Compute population statistics over the values of a series
    pub fn of_series(series: &[TimeSeriesPoint]) -> Self {
        Self::population(&values_of(series))
    }

    /// `mean ± k·stddev`
    pub fn normal_range(&self, k: f64) -> NormalRange {
        NormalRange {
            lower: self.mean - k * self.stddev,
            upper: self.mean + k * self.stddev,
        }
    }

    /// Population variance
    pub fn variance(&self) -> f64 {
        self.stddev * self.stddev
    }
}

/// Default multiplier for reporting a normal range
pub const DEFAULT_NORMAL_RANGE_K: f64 = 2.0;

/// Closed interval of values considered normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub lower: f64,
    pub upper: f64,
}

impl NormalRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Local statistics of a window of points
///
/// Shares the population formulas of [`Statistics`].
pub fn calculate_window_stats(window: &[TimeSeriesPoint]) -> Statistics {
    Statistics::of_series(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn test_population_statistics() {
        let stats = Statistics::population(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.stddev, 2.0, epsilon = 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.count, 8);
        assert_relative_eq!(stats.variance(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(Statistics::population(&[]), Statistics::default());

        let single = Statistics::population(&[3.5]);
        assert_eq!(single.mean, 3.5);
        assert_eq!(single.stddev, 0.0);
        assert_eq!(single.count, 1);
    }

    #[test]
    fn test_normal_range() {
        let stats = Statistics::population(&[1.0, 3.0]);
        let range = stats.normal_range(DEFAULT_NORMAL_RANGE_K);
        assert_relative_eq!(range.lower, 0.0);
        assert_relative_eq!(range.upper, 4.0);
        assert!(range.contains(2.0));
        assert!(!range.contains(4.5));
    }

    #[test]
    fn test_ordered_sorts_only_when_needed() {
        let sorted = vec![
            TimeSeriesPoint::new(at(0), 1.0),
            TimeSeriesPoint::new(at(5), 2.0),
        ];
        assert!(matches!(ordered(&sorted), Cow::Borrowed(_)));

        let shuffled = vec![
            TimeSeriesPoint::new(at(10), 3.0),
            TimeSeriesPoint::new(at(0), 1.0),
            TimeSeriesPoint::new(at(5), 2.0),
        ];
        let fixed = ordered(&shuffled);
        assert!(matches!(fixed, Cow::Owned(_)));
        assert_eq!(values_of(&fixed), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_window_stats_matches_population() {
        let window: Vec<_> = (0..4).map(|i| TimeSeriesPoint::new(at(i * 5), i as f64)).collect();
        let stats = calculate_window_stats(&window);
        assert_relative_eq!(stats.mean, 1.5);
        assert_relative_eq!(stats.stddev, 1.25f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_point_serializes_camel_case() {
        let point = TimeSeriesPoint::new(at(0), 1.5);
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["value"], 1.5);
        assert!(json["timestamp"].is_string());
    }
}
