//! Normalizing raw query samples into an ordered series

use crate::types::TimeSeriesPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A sample as returned by the metrics store, value possibly absent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

impl RawSample {
    pub fn new(timestamp: DateTime<Utc>, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }
}

/// What to do with missing or non-finite samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Leave the sample out of the series
    #[default]
    Drop,
    /// Substitute `0.0`. Biases every downstream statistic; kept only for
    /// compatibility with callers that relied on it.
    ZeroFill,
}

/// Turn raw samples into an ascending, duplicate-free series
///
/// Samples sharing an exact timestamp collapse to the last one seen.
pub fn extract_series(raw: &[RawSample], policy: MissingValuePolicy) -> Vec<TimeSeriesPoint> {
    let mut series: Vec<TimeSeriesPoint> = Vec::with_capacity(raw.len());
    let mut missing = 0usize;

    for sample in raw {
        match (sample.value.filter(|v| v.is_finite()), policy) {
            (Some(value), _) => series.push(TimeSeriesPoint::new(sample.timestamp, value)),
            (None, MissingValuePolicy::ZeroFill) => {
                missing += 1;
                series.push(TimeSeriesPoint::new(sample.timestamp, 0.0));
            }
            (None, MissingValuePolicy::Drop) => missing += 1,
        }
    }

    // Stable sort keeps arrival order among equal timestamps, so the last
    // duplicate is the one retained below.
    series.sort_by_key(|p| p.timestamp);

    let before = series.len();
    let mut deduped: Vec<TimeSeriesPoint> = Vec::with_capacity(series.len());
    for point in series {
        match deduped.last_mut() {
            Some(last) if last.timestamp == point.timestamp => *last = point,
            _ => deduped.push(point),
        }
    }

    if missing > 0 || deduped.len() != before {
        debug!(
            missing,
            ?policy,
            duplicates = before - deduped.len(),
            "normalized raw samples"
        );
    }

    deduped
}
