//! Segment records

use serde::{Deserialize, Serialize};

/// Pre-aggregated statistics of one segment (one facet value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub name: String,
    pub avg: f64,
    /// Number of samples behind the aggregate
    pub count: u64,
    pub stddev: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p90: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p95: Option<f64>,
}

impl SegmentStats {
    pub fn new(name: impl Into<String>, avg: f64, count: u64, stddev: f64) -> Self {
        Self {
            name: name.into(),
            avg,
            count,
            stddev,
            min: None,
            max: None,
            p50: None,
            p90: None,
            p95: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// A segment with its position among its peers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSegment {
    #[serde(flatten)]
    pub stats: SegmentStats,
    /// 1 for the highest average
    pub rank: usize,
    /// `avg / top avg`; absent when the top average is not positive
    pub relative: Option<f64>,
    /// Share of the total sample count, in percent; absent when the total is 0
    pub percent_of_total: Option<f64>,
}
