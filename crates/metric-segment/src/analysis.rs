//! Cross-segment statistics

use crate::types::SegmentStats;
use metric_core::{ensure_finite, require_len, Error, Result, Statistics};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Thresholds for segment comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentParameters {
    /// Outlier when `|avg − mean| > k·stddev` across segment averages
    pub outlier_k: f64,
    /// Top segment share of total count (percent) that counts as concentrated
    pub concentration_percent: f64,
    /// CV (percent) across averages above which variation is high
    pub high_variation_cv: f64,
    /// CV (percent) across averages below which variation is low
    pub low_variation_cv: f64,
    /// `max/min` average ratio that counts as a large gap
    pub large_gap_ratio: f64,
    /// More segments than this suggests grouping them
    pub many_segments: usize,
}

impl Default for SegmentParameters {
    fn default() -> Self {
        Self {
            outlier_k: 2.0,
            concentration_percent: 50.0,
            high_variation_cv: 50.0,
            low_variation_cv: 20.0,
            large_gap_ratio: 2.0,
            many_segments: 10,
        }
    }
}

impl SegmentParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.outlier_k > 0.0) {
            return Err(Error::InvalidParameter(
                "Outlier multiplier must be positive".to_string(),
            ));
        }
        if !(self.concentration_percent >= 0.0 && self.concentration_percent <= 100.0) {
            return Err(Error::InvalidParameter(format!(
                "Concentration percent {} must be in [0, 100]",
                self.concentration_percent
            )));
        }
        if !(self.low_variation_cv <= self.high_variation_cv) {
            return Err(Error::InvalidParameter(
                "Low variation CV exceeds high variation CV".to_string(),
            ));
        }
        Ok(())
    }
}

/// Share of total volume held by the highest-average segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopShare {
    pub name: String,
    pub percent: f64,
    pub concentrated: bool,
}

/// How segment averages differ from each other
///
/// Mean and standard deviation are taken over the per-segment averages with
/// equal weight per segment, not per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentAnalysis {
    pub overall_mean: f64,
    /// Population standard deviation of the averages
    pub overall_stddev: f64,
    /// `stddev / |mean| · 100`, 0 for a zero mean
    pub coefficient_of_variation: f64,
    /// Names of outlying segments, in input order
    pub outliers: Vec<String>,
    pub min_segment_avg: f64,
    pub max_segment_avg: f64,
    pub range: f64,
    /// `max / min`; absent when the smallest average is not positive
    pub range_ratio: Option<f64>,
    /// Absent when every count is 0
    pub top_share: Option<TopShare>,
}

#[instrument(skip(segments, params), fields(n = segments.len()))]
pub fn analyze_segment_differences(
    segments: &[SegmentStats],
    params: &SegmentParameters,
) -> Result<SegmentAnalysis> {
    require_len(1, segments.len())?;
    ensure_finite(segments.iter().map(|s| s.avg), "segment averages")?;

    let averages: Vec<f64> = segments.iter().map(|s| s.avg).collect();
    let stats = Statistics::population(&averages);
    let (mean, stddev) = (stats.mean, stats.stddev);

    let coefficient_of_variation = if mean != 0.0 {
        stddev / mean.abs() * 100.0
    } else {
        0.0
    };

    let outliers: Vec<String> = if stddev > 0.0 {
        segments
            .iter()
            .filter(|s| (s.avg - mean).abs() > params.outlier_k * stddev)
            .map(|s| s.name.clone())
            .collect()
    } else {
        Vec::new()
    };

    let range_ratio = (stats.min > 0.0).then(|| stats.max / stats.min);

    let total: u64 = segments.iter().map(|s| s.count).sum();
    let top_share = segments
        .iter()
        .max_by(|a, b| a.avg.total_cmp(&b.avg).then_with(|| b.name.cmp(&a.name)))
        .filter(|_| total > 0)
        .map(|top| {
            let percent = top.count as f64 / total as f64 * 100.0;
            TopShare {
                name: top.name.clone(),
                percent,
                concentrated: percent > params.concentration_percent,
            }
        });

    debug!(
        mean,
        stddev,
        outliers = outliers.len(),
        "Segment differences analyzed"
    );

    Ok(SegmentAnalysis {
        overall_mean: mean,
        overall_stddev: stddev,
        coefficient_of_variation,
        outliers,
        min_segment_avg: stats.min,
        max_segment_avg: stats.max,
        range: stats.max - stats.min,
        range_ratio,
        top_share,
    })
}
