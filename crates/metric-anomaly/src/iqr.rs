//! Interquartile-range fences

use crate::traits::DetectionMethod;
use crate::types::{Anomaly, AnomalyKind};
use metric_core::{values_of, Statistics, TimeSeriesPoint};
use metric_distribution::percentile_sorted;

/// Tukey fences `q1 − m·iqr`, `q3 + m·iqr` with `m = 1.5 + (1 − sensitivity)`
///
/// The score is the distance past the fence in units of `m·iqr`. When the
/// quartiles coincide that unit is zero, so the distance is taken relative to
/// the fence itself instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct IqrMethod;

/// Fences computed from the quartiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    pub fn from_sorted(sorted: &[f64], sensitivity: f64) -> Self {
        let q1 = percentile_sorted(sorted, 25.0);
        let q3 = percentile_sorted(sorted, 75.0);
        let spread = IqrMethod::multiplier(sensitivity) * (q3 - q1);
        Self {
            q1,
            q3,
            lower: q1 - spread,
            upper: q3 + spread,
        }
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Score in `[0, 1]` for a value outside the fences, `None` inside
    pub fn score(&self, value: f64) -> Option<f64> {
        let (bound, distance, unit) = if value < self.lower {
            (self.lower, self.lower - value, self.q1 - self.lower)
        } else if value > self.upper {
            (self.upper, value - self.upper, self.upper - self.q3)
        } else {
            return None;
        };

        let score = if unit > 0.0 {
            distance / unit
        } else if bound != 0.0 {
            distance / bound.abs()
        } else {
            1.0
        };
        Some(score.min(1.0))
    }
}

impl IqrMethod {
    pub fn multiplier(sensitivity: f64) -> f64 {
        1.5 + (1.0 - sensitivity)
    }
}

impl DetectionMethod for IqrMethod {
    fn kind(&self) -> AnomalyKind {
        AnomalyKind::Iqr
    }

    fn detect(&self, series: &[TimeSeriesPoint], _stats: &Statistics, sensitivity: f64) -> Vec<Anomaly> {
        if series.is_empty() {
            return Vec::new();
        }
        let mut sorted = values_of(series);
        sorted.sort_by(f64::total_cmp);
        let fences = IqrFences::from_sorted(&sorted, sensitivity);

        series
            .iter()
            .filter_map(|p| {
                fences.score(p.value).map(|score| Anomaly {
                    timestamp: p.timestamp,
                    value: p.value,
                    score,
                    kind: AnomalyKind::Iqr,
                    message: format!(
                        "Value {:.2} is outside IQR bounds [{:.2}, {:.2}]",
                        p.value, fences.lower, fences.upper
                    ),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use metric_core::test_data;

    fn detect(values: &[f64], sensitivity: f64) -> Vec<Anomaly> {
        let series = test_data::series_from(values);
        IqrMethod.detect(&series, &Statistics::of_series(&series), sensitivity)
    }

    #[test]
    fn test_fences() {
        let sorted: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        let fences = IqrFences::from_sorted(&sorted, 1.0);
        assert_relative_eq!(fences.q1, 3.0);
        assert_relative_eq!(fences.q3, 7.0);
        assert_relative_eq!(fences.lower, -3.0);
        assert_relative_eq!(fences.upper, 13.0);
        assert_eq!(fences.score(5.0), None);
        assert_relative_eq!(fences.score(16.0).unwrap(), 0.5);
        assert_relative_eq!(fences.score(-9.0).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_iqr_uses_relative_distance() {
        let mut values = vec![10.0; 30];
        values[7] = 14.0;
        let found = detect(&values, 0.5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 14.0);
        assert_relative_eq!(found[0].score, 0.4, epsilon = 1e-12);

        let mut around_zero = vec![0.0; 30];
        around_zero[3] = -2.0;
        let found = detect(&around_zero, 0.5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].score, 1.0);
    }

    #[test]
    fn test_lower_sensitivity_widens_fences() {
        assert_relative_eq!(IqrMethod::multiplier(1.0), 1.5);
        assert_relative_eq!(IqrMethod::multiplier(0.0), 2.5);

        let mut values: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        values.push(15.0);
        // q1 = 3.25, q3 = 7.75: upper fence 14.5 at s = 1, 19 at s = 0
        assert_eq!(detect(&values, 1.0).len(), 1);
        assert!(detect(&values, 0.0).is_empty());
    }
}
