//! Lagged cross-correlation

use crate::pearson::pearson_correlation;
use metric_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default lag search radius, in samples
pub const DEFAULT_MAX_LAG: usize = 5;

/// Correlation after shifting one series by `lag` samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagCorrelation {
    /// Positive: `b` lags behind `a`. Negative: `a` lags behind `b`.
    pub lag: i32,
    pub coefficient: f64,
    /// Number of overlapping samples, always at least 2
    pub overlap: usize,
}

/// Pearson correlation at every non-zero lag in `[-max_lag, max_lag]`
///
/// For a positive lag `k`, `a` loses its last `k` samples and `b` its first
/// `k`, pairing `a[i]` with `b[i + k]`. Negative lags mirror this. Lags that
/// leave fewer than two overlapping samples are skipped. Results are ordered by
/// lag ascending.
pub fn calculate_lag_correlations(a: &[f64], b: &[f64], max_lag: usize) -> Result<Vec<LagCorrelation>> {
    if a.len() != b.len() {
        return Err(Error::size_mismatch(a.len(), b.len(), "lag correlation"));
    }

    let n = a.len();
    let mut out = Vec::new();
    for k in (1..=max_lag).rev() {
        if n >= k + 2 {
            out.push(LagCorrelation {
                lag: -(k as i32),
                coefficient: pearson_correlation(&a[k..], &b[..n - k])?,
                overlap: n - k,
            });
        }
    }
    for k in 1..=max_lag {
        if n >= k + 2 {
            out.push(LagCorrelation {
                lag: k as i32,
                coefficient: pearson_correlation(&a[..n - k], &b[k..])?,
                overlap: n - k,
            });
        }
    }
    Ok(out)
}

/// Pick the dominant lag, starting from the unshifted coefficient
///
/// A shifted lag replaces the current best only with a strictly larger
/// `|coefficient|`, scanning in ascending lag order, so ties keep lag 0 or the
/// most negative tied lag.
pub fn dominant_lag(lag_zero: f64, lags: &[LagCorrelation]) -> (i32, f64) {
    lags.iter().fold((0, lag_zero), |(best_lag, best), lc| {
        if lc.coefficient.abs() > best.abs() {
            (lc.lag, lc.coefficient)
        } else {
            (best_lag, best)
        }
    })
}
