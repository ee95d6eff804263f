//! Equal-width histograms

use metric_core::{ensure_finite, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bucket count used by the distribution analyzer
pub const DEFAULT_BUCKETS: usize = 10;

/// A single histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Left edge (inclusive)
    pub bucket_start: f64,
    /// Right edge (exclusive, except for the last bucket)
    pub bucket_end: f64,
    /// Number of values in this bucket
    pub count: usize,
    /// Share of all values, in percent
    pub percentage: f64,
}

impl HistogramBucket {
    pub fn width(&self) -> f64 {
        self.bucket_end - self.bucket_start
    }
}

impl fmt::Display for HistogramBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}): count={}, {:.1}%",
            self.bucket_start, self.bucket_end, self.count, self.percentage
        )
    }
}

/// Equal-width buckets spanning `[min, max]`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    buckets: Vec<HistogramBucket>,
    total_count: usize,
}

impl Histogram {
    pub fn buckets(&self) -> &[HistogramBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// The most populated bucket; ties go to the leftmost
    pub fn modal_bucket(&self) -> Option<&HistogramBucket> {
        self.buckets
            .iter()
            .fold(None, |best: Option<&HistogramBucket>, b| match best {
                Some(current) if current.count >= b.count => Some(current),
                _ => Some(b),
            })
    }
}

/// Build a histogram with `num_buckets` equal-width buckets over `[min, max]`
///
/// Every bucket is half-open `[start, end)` except the last, which is closed
/// so that `max` is counted. When all values are equal the buckets are
/// degenerate and every value lands in the closed last bucket. Bucket counts
/// always sum to `values.len()`.
pub fn create_histogram(values: &[f64], num_buckets: usize) -> Result<Histogram> {
    if num_buckets == 0 {
        return Err(Error::InvalidParameter(
            "Histogram needs at least one bucket".to_string(),
        ));
    }
    ensure_finite(values.iter().copied(), "histogram values")?;
    if values.is_empty() {
        return Ok(Histogram::default());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = num_buckets as f64;
    let width = (max - min) / n;
    let last = num_buckets - 1;

    // A span past f64::MAX is interpolated between the endpoints instead.
    let edge = |i: usize| {
        if i == 0 {
            min
        } else if i == num_buckets {
            max
        } else if width.is_finite() {
            min + i as f64 * width
        } else {
            let t = i as f64 / n;
            min * (1.0 - t) + max * t
        }
    };
    let mut counts = vec![0usize; num_buckets];

    for &v in values {
        let mut idx = if width > 0.0 && width.is_finite() {
            (((v - min) / width).floor() as usize).min(last)
        } else {
            last
        };
        // Reconcile the arithmetic guess with the stored edges.
        while idx > 0 && v < edge(idx) {
            idx -= 1;
        }
        while idx < last && v >= edge(idx + 1) {
            idx += 1;
        }
        counts[idx] += 1;
    }

    let total = values.len();
    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            bucket_start: edge(i),
            bucket_end: edge(i + 1),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    Ok(Histogram {
        buckets,
        total_count: total,
    })
}
