//! Parameters for trend analysis
//!
//! Every threshold is a named default that callers may override. Sizes that
//! depend on sample spacing (seasonal candidates, forecast horizon) are derived
//! from a [`SampleInterval`] by [`TrendParameters::for_interval`].

use crate::types::SeasonalPattern;
use metric_core::{Error, Result, SampleInterval};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Linear fit classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearParameters {
    /// `|slope| / scale` below this reads as stable, where scale is `|mean|`
    /// (or 1 for a zero mean)
    pub direction_epsilon: f64,
    /// r² at or above this is a strong trend
    pub strong_r_squared: f64,
    /// r² at or above this (and below strong) is moderate
    pub moderate_r_squared: f64,
}

impl Default for LinearParameters {
    fn default() -> Self {
        Self {
            direction_epsilon: 1e-4,
            strong_r_squared: 0.7,
            moderate_r_squared: 0.4,
        }
    }
}

/// A period to test for seasonality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalCandidate {
    /// Cycle length in samples
    pub period: usize,
    pub pattern: SeasonalPattern,
}

/// Autocorrelation-based seasonality detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityParameters {
    /// Series shorter than this are never seasonal
    pub min_samples: usize,
    /// Periods tested, each only when the series covers two full cycles
    pub candidates: Vec<SeasonalCandidate>,
    /// Minimum autocorrelation for a detection
    pub threshold: f64,
    /// Require the autocorrelation at a period to exceed that at half the
    /// period. Without this a slow cycle also correlates strongly at every
    /// short lag and the shortest candidate wins.
    pub half_period_peak_check: bool,
}

impl SeasonalityParameters {
    /// Hour, day and week candidates at the given spacing
    ///
    /// Cycles shorter than one sample are left out.
    pub fn for_interval(interval: SampleInterval) -> Self {
        let mut candidates = vec![
            SeasonalCandidate {
                period: interval.samples_per_hour(),
                pattern: SeasonalPattern::Hourly,
            },
            SeasonalCandidate {
                period: interval.samples_per_day(),
                pattern: SeasonalPattern::Daily,
            },
            SeasonalCandidate {
                period: interval.samples_per_week(),
                pattern: SeasonalPattern::Weekly,
            },
        ];
        candidates.retain(|c| c.period > 0);

        Self {
            min_samples: 48,
            candidates,
            threshold: 0.3,
            half_period_peak_check: true,
        }
    }
}

impl Default for SeasonalityParameters {
    fn default() -> Self {
        Self::for_interval(SampleInterval::default())
    }
}

/// Sliding two-window change-point test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangePointParameters {
    /// Samples on each side of a candidate index
    pub window: usize,
    /// t-statistic that must be exceeded
    pub t_threshold: f64,
    /// Confidence is `min(max_confidence, t / confidence_divisor)`
    pub confidence_divisor: f64,
    pub max_confidence: f64,
}

impl Default for ChangePointParameters {
    fn default() -> Self {
        Self {
            window: 10,
            t_threshold: 2.0,
            confidence_divisor: 4.0,
            max_confidence: 0.99,
        }
    }
}

/// Linear extrapolation with a widening band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParameters {
    /// Number of steps beyond the last sample
    pub horizon: usize,
    /// Normal quantile scaling the residual standard deviation
    pub z: f64,
    /// Step `i` widens the band by a factor `1 + growth·i`
    pub growth: f64,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self {
            horizon: 12,
            z: 1.96,
            growth: 0.1,
        }
    }
}

impl ForecastParameters {
    /// One hour ahead at the given spacing
    pub fn for_interval(interval: SampleInterval) -> Self {
        Self {
            horizon: interval.samples_per_hour().max(1),
            ..Default::default()
        }
    }

    /// Two-sided normal quantile for a confidence level in `(0, 1)`
    ///
    /// A level of 0.95 gives z ≈ 1.96.
    pub fn with_confidence_level(mut self, level: f64) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "Confidence level {level} must be in (0, 1)"
            )));
        }
        let normal = Normal::new(0.0, 1.0).map_err(|e| Error::Other(e.into()))?;
        self.z = normal.inverse_cdf(0.5 + level / 2.0);
        Ok(self)
    }

    /// Half-width of the band at step `i` (1-based)
    pub fn margin(&self, residual_stddev: f64, step: usize) -> f64 {
        self.z * residual_stddev * (1.0 + self.growth * step as f64)
    }
}

/// Parameters for the full trend pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendParameters {
    pub interval: SampleInterval,
    pub linear: LinearParameters,
    pub seasonality: SeasonalityParameters,
    pub change_points: ChangePointParameters,
    pub forecast: ForecastParameters,
}

impl Default for TrendParameters {
    fn default() -> Self {
        Self::for_interval(SampleInterval::default())
    }
}

impl TrendParameters {
    pub fn for_interval(interval: SampleInterval) -> Self {
        Self {
            interval,
            linear: LinearParameters::default(),
            seasonality: SeasonalityParameters::for_interval(interval),
            change_points: ChangePointParameters::default(),
            forecast: ForecastParameters::for_interval(interval),
        }
    }

    /// Fewer, more certain findings
    pub fn strict() -> Self {
        let mut params = Self::default();
        params.seasonality.threshold = 0.5;
        params.change_points.t_threshold = 3.0;
        params
    }

    /// More, less certain findings
    pub fn relaxed() -> Self {
        let mut params = Self::default();
        params.seasonality.threshold = 0.2;
        params.change_points.t_threshold = 1.5;
        params
    }

    pub fn validate(&self) -> Result<()> {
        let lp = &self.linear;
        if !(lp.direction_epsilon >= 0.0) {
            return Err(Error::InvalidParameter(
                "Direction epsilon must be non-negative".to_string(),
            ));
        }
        if !(lp.moderate_r_squared <= lp.strong_r_squared) {
            return Err(Error::InvalidParameter(format!(
                "Moderate r² {} exceeds strong r² {}",
                lp.moderate_r_squared, lp.strong_r_squared
            )));
        }
        if self.seasonality.candidates.iter().any(|c| c.period == 0) {
            return Err(Error::InvalidParameter(
                "Seasonal periods must be positive".to_string(),
            ));
        }
        if self.change_points.window == 0 {
            return Err(Error::InvalidParameter(
                "Change-point window must be positive".to_string(),
            ));
        }
        if !(self.change_points.confidence_divisor > 0.0) {
            return Err(Error::InvalidParameter(
                "Confidence divisor must be positive".to_string(),
            ));
        }
        if !(self.forecast.z >= 0.0 && self.forecast.growth >= 0.0) {
            return Err(Error::InvalidParameter(
                "Forecast z and growth must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_follow_interval() {
        let params = TrendParameters::default();
        let periods: Vec<usize> = params.seasonality.candidates.iter().map(|c| c.period).collect();
        assert_eq!(periods, vec![12, 288, 2016]);
        assert_eq!(params.forecast.horizon, 12);

        let minute = TrendParameters::for_interval(SampleInterval::from_minutes(1).unwrap());
        let periods: Vec<usize> = minute.seasonality.candidates.iter().map(|c| c.period).collect();
        assert_eq!(periods, vec![60, 1440, 10080]);
        assert_eq!(minute.forecast.horizon, 60);
    }

    #[test]
    fn test_confidence_level_to_z() {
        let p = ForecastParameters::default().with_confidence_level(0.95).unwrap();
        assert_relative_eq!(p.z, 1.959964, epsilon = 1e-5);
        let p = ForecastParameters::default().with_confidence_level(0.99).unwrap();
        assert_relative_eq!(p.z, 2.575829, epsilon = 1e-5);
        assert!(ForecastParameters::default().with_confidence_level(1.0).is_err());
    }

    #[test]
    fn test_margin_grows() {
        let p = ForecastParameters::default();
        assert_relative_eq!(p.margin(2.0, 1), 1.96 * 2.0 * 1.1);
        assert!(p.margin(2.0, 5) > p.margin(2.0, 4));
        assert_eq!(p.margin(0.0, 7), 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(TrendParameters::default().validate().is_ok());
        assert!(TrendParameters::strict().validate().is_ok());
        let mut bad = TrendParameters::default();
        bad.change_points.window = 0;
        assert!(bad.validate().is_err());
    }
}
