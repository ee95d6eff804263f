//! Moment statistics over sorted values
//!
//! Variance, skewness and kurtosis use the population divisor `n`; kurtosis is
//! reported as excess kurtosis.

use metric_core::{ensure_finite, Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full descriptive statistics of a sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionStats {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub stddev: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl DistributionStats {
    /// Compute statistics over unsorted values
    pub fn compute(values: &[f64]) -> Result<Self> {
        ensure_finite(values.iter().copied(), "distribution values")?;
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted).checked()
    }

    /// Compute statistics over values already sorted ascending
    ///
    /// An empty slice yields the all-zero value. Zero spread forces skewness
    /// and kurtosis to 0. Deviations are scaled by the largest one before
    /// raising them to higher powers, so skewness and kurtosis stay finite for
    /// any finite input; only the variance itself can overflow.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        if sorted.is_empty() {
            return Self::default();
        }

        let n = sorted.len() as f64;
        let mut mean = sorted.iter().sum::<f64>() / n;
        if !mean.is_finite() {
            mean = sorted.iter().map(|x| x / n).sum();
        }

        let scale = sorted
            .iter()
            .map(|x| (x - mean).abs())
            .fold(0.0, f64::max);

        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        if scale > 0.0 && scale.is_finite() {
            for &x in sorted {
                let d = (x - mean) / scale;
                let d2 = d * d;
                m2 += d2;
                m3 += d2 * d;
                m4 += d2 * d2;
            }
        }
        let scaled_variance = (m2 / n).max(0.0);
        let stddev = scale * scaled_variance.sqrt();
        let variance = stddev * stddev;

        let (skewness, kurtosis) = if scaled_variance > 0.0 {
            (
                (m3 / n) / (scaled_variance * scaled_variance.sqrt()),
                (m4 / n) / (scaled_variance * scaled_variance) - 3.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            mean,
            median: percentile_sorted(sorted, 50.0),
            mode: mode(sorted),
            stddev,
            variance,
            skewness,
            kurtosis,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            count: sorted.len(),
        }
    }

    /// Reject statistics whose spread overflowed `f64`
    pub fn checked(self) -> Result<Self> {
        if self.mean.is_finite() && self.stddev.is_finite() && self.variance.is_finite() {
            Ok(self)
        } else {
            Err(Error::InvalidInput(format!(
                "Values in [{:e}, {:e}] are too far apart to describe",
                self.min, self.max
            )))
        }
    }

    /// Coefficient of variation in percent; 0 when the mean is 0
    pub fn coefficient_of_variation(&self) -> f64 {
        coefficient_of_variation(self.stddev, self.mean)
    }
}

/// `stddev / |mean| · 100`, falling back to 0 for a zero mean
pub fn coefficient_of_variation(stddev: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        0.0
    } else {
        stddev / mean.abs() * 100.0
    }
}

/// Percentile `p ∈ [0, 100]` of sorted values by linear interpolation
///
/// The rank is `p/100 · (n−1)`; the result interpolates between the floor and
/// ceiling ranks. Returns 0 for an empty slice.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = lower + 1;
    if upper >= sorted.len() {
        return sorted[lower];
    }
    sorted[lower] + (rank - lower as f64) * (sorted[upper] - sorted[lower])
}

/// Checked variant of [`percentile_sorted`]
pub fn percentile(sorted: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(Error::InvalidParameter(format!(
            "Percentile {p} must be in [0, 100]"
        )));
    }
    if sorted.is_empty() {
        return Err(Error::insufficient(1, 0));
    }
    Ok(percentile_sorted(sorted, p))
}

/// Most frequent value; ties resolve to the lowest value
pub fn mode(values: &[f64]) -> f64 {
    let mut counts: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(OrderedFloat(v)).or_insert(0) += 1;
    }

    let mut best: Option<(f64, usize)> = None;
    // Ascending key order: only a strictly larger count replaces the leader.
    for (value, count) in counts {
        match best {
            Some((_, c)) if count <= c => {}
            _ => best = Some((value.into_inner(), count)),
        }
    }
    best.map(|(v, _)| v).unwrap_or(0.0)
}
