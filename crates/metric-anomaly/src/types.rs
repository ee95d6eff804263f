//! Anomaly value types

use chrono::{DateTime, Utc};
use metric_core::{NormalRange, Statistics};
use serde::Serialize;
use std::fmt;

/// Which detection produced an anomaly
///
/// Serializes to the labels callers match on: `z-score`, `iqr`,
/// `moving-average` and `multi-detection (k methods)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum AnomalyKind {
    ZScore,
    Iqr,
    MovingAverage,
    /// Several methods agreed on the same timestamp
    MultiDetection { methods: usize },
}

impl AnomalyKind {
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiDetection { .. })
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZScore => f.write_str("z-score"),
            Self::Iqr => f.write_str("iqr"),
            Self::MovingAverage => f.write_str("moving-average"),
            Self::MultiDetection { methods } => write!(f, "multi-detection ({methods} methods)"),
        }
    }
}

impl From<AnomalyKind> for String {
    fn from(kind: AnomalyKind) -> Self {
        kind.to_string()
    }
}

/// A detected anomaly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Severity in `[0, 1]`
    pub score: f64,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub message: String,
}

impl Anomaly {
    pub fn is_severe(&self, threshold: f64) -> bool {
        self.score > threshold
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] score={:.2}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.kind,
            self.score,
            self.message
        )
    }
}

/// Result of running the detector over a series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReport {
    /// Global statistics of the series
    pub statistics: Statistics,
    /// Merged anomalies, highest score first
    pub anomalies: Vec<Anomaly>,
    pub normal_range: NormalRange,
    pub severe_count: usize,
    pub moderate_count: usize,
}

impl AnomalyReport {
    pub fn most_significant(&self) -> Option<&Anomaly> {
        self.anomalies.first()
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(AnomalyKind::ZScore.to_string(), "z-score");
        assert_eq!(
            AnomalyKind::MultiDetection { methods: 3 }.to_string(),
            "multi-detection (3 methods)"
        );
        assert_eq!(AnomalyKind::MovingAverage.to_string(), "moving-average");
        assert!(AnomalyKind::MultiDetection { methods: 2 }.is_multi());
    }

    #[test]
    fn test_serialized_type_field() {
        let anomaly = Anomaly {
            timestamp: metric_core::test_data::timestamp(0),
            value: 5.0,
            score: 0.5,
            kind: AnomalyKind::Iqr,
            message: "m".to_string(),
        };
        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["type"], "iqr");
        assert_eq!(json["score"], 0.5);
    }
}
