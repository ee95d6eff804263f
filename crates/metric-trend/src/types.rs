//! Result types of trend analysis

use chrono::{DateTime, Utc};
use metric_core::TimeSeriesPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a fitted linear trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        };
        f.write_str(s)
    }
}

/// How well the linear fit explains the series, bucketed from r²
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        };
        f.write_str(s)
    }
}

/// Ordinary least squares fit of value against sample index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// In `[0, 1]`
    pub r_squared: f64,
    /// Change of the fitted line over the series, relative to its start
    pub percent_change: f64,
}

impl LinearTrend {
    /// Fitted value at sample index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Named seasonal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalPattern {
    Hourly,
    Daily,
    Weekly,
}

impl fmt::Display for SeasonalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        };
        f.write_str(s)
    }
}

/// Seasonality verdict
///
/// When nothing is detected the period and strength are zero and there is no
/// pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub detected: bool,
    /// Cycle length in samples
    pub period: usize,
    /// Autocorrelation at the period, in `[-1, 1]`
    pub strength: f64,
    pub pattern: Option<SeasonalPattern>,
}

impl Seasonality {
    pub fn none() -> Self {
        Self {
            detected: false,
            period: 0,
            strength: 0.0,
            pattern: None,
        }
    }
}

impl Default for Seasonality {
    fn default() -> Self {
        Self::none()
    }
}

/// Direction of a level shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    LevelShiftUp,
    LevelShiftDown,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelShiftUp => f.write_str("level_shift_up"),
            Self::LevelShiftDown => f.write_str("level_shift_down"),
        }
    }
}

/// A detected shift in the local mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePoint {
    pub timestamp: DateTime<Utc>,
    /// Mean of the window before the change
    pub old_value: f64,
    /// Mean of the window after the change
    pub new_value: f64,
    /// In `[0, 0.99]`
    pub confidence: f64,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
}

impl fmt::Display for ChangePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {:.3} -> {:.3} (confidence {:.2})",
            self.change_type,
            self.timestamp.to_rfc3339(),
            self.old_value,
            self.new_value,
            self.confidence
        )
    }
}

/// Prediction band around one forecast value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub timestamp: DateTime<Utc>,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Linear extrapolation beyond the end of the series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub values: Vec<TimeSeriesPoint>,
    /// One interval per value, widening with the horizon
    pub confidence: Vec<ConfidenceInterval>,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything the trend analyzer reports for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub linear_trend: LinearTrend,
    pub seasonality: Seasonality,
    pub change_points: Vec<ChangePoint>,
    pub forecast: Forecast,
}
