//! Global z-score detection

use crate::traits::DetectionMethod;
use crate::types::{Anomaly, AnomalyKind};
use metric_core::{Statistics, TimeSeriesPoint};

/// Flags points more than `3 − 2·sensitivity` global standard deviations
/// from the mean
///
/// Skipped entirely when the series has zero spread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScoreMethod;

impl ZScoreMethod {
    pub fn threshold(sensitivity: f64) -> f64 {
        3.0 - 2.0 * sensitivity
    }
}

impl DetectionMethod for ZScoreMethod {
    fn kind(&self) -> AnomalyKind {
        AnomalyKind::ZScore
    }

    fn detect(&self, series: &[TimeSeriesPoint], stats: &Statistics, sensitivity: f64) -> Vec<Anomaly> {
        if stats.stddev <= 0.0 {
            return Vec::new();
        }
        let threshold = Self::threshold(sensitivity);

        series
            .iter()
            .filter_map(|p| {
                let z = ((p.value - stats.mean) / stats.stddev).abs();
                (z > threshold).then(|| Anomaly {
                    timestamp: p.timestamp,
                    value: p.value,
                    score: (z / 3.0).min(1.0),
                    kind: AnomalyKind::ZScore,
                    message: format!(
                        "Value {:.2} is {:.1} standard deviations from mean",
                        p.value, z
                    ),
                })
            })
            .collect()
    }
}
