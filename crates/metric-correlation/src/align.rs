//! Timestamp alignment of two series

use chrono::{DateTime, Utc};
use metric_core::TimeSeriesPoint;
use std::collections::BTreeMap;

/// Two series restricted to their shared timestamps
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aligned {
    pub timestamps: Vec<DateTime<Utc>>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl Aligned {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Intersect two series on exact timestamp equality
///
/// The result is ascending by timestamp. No interpolation or tolerance is
/// applied, so series sampled on different grids yield an empty result. If a
/// series repeats a timestamp, its last value wins.
pub fn align_time_series(a: &[TimeSeriesPoint], b: &[TimeSeriesPoint]) -> Aligned {
    let left: BTreeMap<DateTime<Utc>, f64> = a.iter().map(|p| (p.timestamp, p.value)).collect();
    let right: BTreeMap<DateTime<Utc>, f64> = b.iter().map(|p| (p.timestamp, p.value)).collect();

    let mut aligned = Aligned::default();
    for (ts, &l) in &left {
        if let Some(&r) = right.get(ts) {
            aligned.timestamps.push(*ts);
            aligned.left.push(l);
            aligned.right.push(r);
        }
    }
    aligned
}
