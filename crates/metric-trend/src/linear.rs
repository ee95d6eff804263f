//! Least-squares linear trend

use crate::params::LinearParameters;
use crate::types::{LinearTrend, TrendDirection, TrendStrength};
use metric_core::{ensure_finite, require_len, Result};

/// Fit `value = slope·index + intercept` over sample indices `0..n`
///
/// The x axis is the sample index, not wall-clock time. r² is 0 for a
/// constant series and otherwise clamped to `[0, 1]`. `percent_change`
/// compares the fitted line at both ends; it is 0 when the fit starts at
/// (numerically) zero.
pub fn calculate_linear_trend(values: &[f64], params: &LinearParameters) -> Result<LinearTrend> {
    require_len(2, values.len())?;
    ensure_finite(values.iter().copied(), "trend values")?;

    let n = values.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sx2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sx += x;
        sy += y;
        sxy += x * y;
        sx2 += x * x;
    }

    let slope = (n * sxy - sx * sy) / (n * sx2 - sx * sx);
    let intercept = (sy - slope * sx) / n;
    let mean = sy / n;

    let (mut ss_total, mut ss_residual) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let fitted = slope * i as f64 + intercept;
        ss_total += (y - mean) * (y - mean);
        ss_residual += (y - fitted) * (y - fitted);
    }
    let r_squared = if ss_total > 0.0 {
        (1.0 - ss_residual / ss_total).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let first = intercept;
    let last = slope * (n - 1.0) + intercept;
    let magnitude = values.iter().map(|v| v.abs()).sum::<f64>() / n;
    let percent_change = if first.abs() <= f64::EPSILON * magnitude {
        0.0
    } else {
        (last - first) / first * 100.0
    };

    Ok(LinearTrend {
        slope,
        intercept,
        direction: direction(slope, mean, params.direction_epsilon),
        strength: strength(r_squared, params),
        r_squared,
        percent_change,
    })
}

fn direction(slope: f64, mean: f64, epsilon: f64) -> TrendDirection {
    let scale = if mean.abs() > 0.0 { mean.abs() } else { 1.0 };
    if slope.abs() / scale < epsilon {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

fn strength(r_squared: f64, params: &LinearParameters) -> TrendStrength {
    if r_squared >= params.strong_r_squared {
        TrendStrength::Strong
    } else if r_squared >= params.moderate_r_squared {
        TrendStrength::Moderate
    } else {
        TrendStrength::Weak
    }
}

/// Population standard deviation of the residuals around `trend`
pub fn residual_stddev(values: &[f64], trend: &LinearTrend) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let ss: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let r = y - trend.predict(i as f64);
            r * r
        })
        .sum();
    (ss / values.len() as f64).sqrt()
}
