//! Core traits for anomaly detection

use crate::types::{Anomaly, AnomalyKind};
use metric_core::{Statistics, TimeSeriesPoint};

/// A single anomaly detection method
///
/// Methods are independent: each scores the same series on its own and the
/// detector merges their candidates afterwards. Implementations receive the
/// series in ascending timestamp order together with its global statistics.
pub trait DetectionMethod: Send + Sync {
    /// Label attached to anomalies from this method
    fn kind(&self) -> AnomalyKind;

    /// Emit candidate anomalies for `sensitivity ∈ [0, 1]`
    ///
    /// Higher sensitivity lowers the threshold and flags more points.
    fn detect(&self, series: &[TimeSeriesPoint], stats: &Statistics, sensitivity: f64) -> Vec<Anomaly>;
}
