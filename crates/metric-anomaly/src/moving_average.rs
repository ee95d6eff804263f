//! Trailing moving-average deviation

use crate::traits::DetectionMethod;
use crate::types::{Anomaly, AnomalyKind};
use metric_core::{calculate_window_stats, Statistics, TimeSeriesPoint};

/// Default trailing window: one hour of 5 minute samples
pub const DEFAULT_WINDOW: usize = 12;

/// Compares each point against the mean of the `window` points before it
///
/// A point is flagged when it deviates by more than `2 − 1.5·sensitivity`
/// window standard deviations. Windows with zero spread are skipped.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverageMethod {
    window: usize,
}

impl Default for MovingAverageMethod {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl MovingAverageMethod {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn threshold(sensitivity: f64) -> f64 {
        2.0 - 1.5 * sensitivity
    }
}

impl DetectionMethod for MovingAverageMethod {
    fn kind(&self) -> AnomalyKind {
        AnomalyKind::MovingAverage
    }

    fn detect(&self, series: &[TimeSeriesPoint], _stats: &Statistics, sensitivity: f64) -> Vec<Anomaly> {
        let w = self.window;
        if w == 0 || series.len() <= w {
            return Vec::new();
        }
        let threshold = Self::threshold(sensitivity);

        (w..series.len())
            .filter_map(|i| {
                let local = calculate_window_stats(&series[i - w..i]);
                let point = &series[i];
                let diff = (point.value - local.mean).abs();
                if local.stddev <= 0.0 || diff <= threshold * local.stddev {
                    return None;
                }
                Some(Anomaly {
                    timestamp: point.timestamp,
                    value: point.value,
                    score: (diff / (3.0 * local.stddev)).min(1.0),
                    kind: AnomalyKind::MovingAverage,
                    message: format!(
                        "Value {:.2} deviates from moving average {:.2} by {:.1} std devs",
                        point.value,
                        local.mean,
                        diff / local.stddev
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

    fn detect(values: &[f64], window: usize, sensitivity: f64) -> Vec<Anomaly> {
        let series = test_data::series_from(values);
        MovingAverageMethod::new(window).detect(&series, &Statistics::of_series(&series), sensitivity)
    }

    #[test]
    fn test_flat_windows_are_skipped() {
        let mut values = vec![10.0; 30];
        values[20] = 50.0;
        // The window before the spike has zero spread, and later windows
        // containing the spike put ordinary points well inside the threshold.
        assert!(detect(&values, 12, 0.5).is_empty());
    }

    #[test]
    fn test_jump_after_alternating_window() {
        let mut values: Vec<f64> = (0..12).map(|i| if i % 2 == 0 { 9.0 } else { 11.0 }).collect();
        values.push(16.0);
        let found = detect(&values, 12, 0.5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].timestamp, test_data::timestamp(12));
        // mean 10, stddev 1, diff 6
        assert_relative_eq!(found[0].score, 1.0);

        let mut mild = values.clone();
        mild[12] = 12.0;
        let found = detect(&mild, 12, 0.5);
        assert_relative_eq!(found[0].score, 2.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_short_series() {
        assert!(detect(&[1.0, 5.0, 1.0], 12, 1.0).is_empty());
        assert!(detect(&[1.0, 5.0, 1.0], 0, 1.0).is_empty());
        assert_relative_eq!(MovingAverageMethod::threshold(1.0), 0.5);
    }
}
