//! Level-shift detection with a sliding two-window t-statistic

use crate::params::ChangePointParameters;
use crate::types::{ChangePoint, ChangeType};
use metric_core::{calculate_window_stats, ensure_finite, require_len, Result, TimeSeriesPoint};
use tracing::{debug, instrument};

/// Two-sample t-statistic between adjacent windows of equal size
///
/// Uses the pooled population standard deviation. Identical flat windows give
/// 0; flat windows at different levels give infinity.
pub fn window_t_statistic(before: &[TimeSeriesPoint], after: &[TimeSeriesPoint]) -> f64 {
    let b = calculate_window_stats(before);
    let a = calculate_window_stats(after);
    let delta = (b.mean - a.mean).abs();
    let pooled = ((b.variance() + a.variance()) / 2.0).sqrt();
    if pooled == 0.0 {
        return if delta > 0.0 { f64::INFINITY } else { 0.0 };
    }
    delta / (pooled * (2.0 / before.len() as f64).sqrt())
}

/// Scan `i ∈ [window, n − window)` comparing `[i − window, i)` with
/// `[i, i + window)`
///
/// After a hit the scan jumps `window / 2` samples ahead so one shift is not
/// reported at every index near it. This is a heuristic: two shifts closer
/// than that can merge, and the reported index is the first one over the
/// threshold rather than the exact break.
#[instrument(skip(series, params), fields(n = series.len(), window = params.window))]
pub fn detect_change_points(
    series: &[TimeSeriesPoint],
    params: &ChangePointParameters,
) -> Result<Vec<ChangePoint>> {
    let w = params.window.max(1);
    require_len(2 * w, series.len())?;
    ensure_finite(series.iter().map(|p| p.value), "change-point series")?;

    let mut found = Vec::new();
    let mut i = w;
    while i < series.len() - w {
        let before = &series[i - w..i];
        let after = &series[i..i + w];
        let t = window_t_statistic(before, after);

        if t > params.t_threshold {
            let old_value = calculate_window_stats(before).mean;
            let new_value = calculate_window_stats(after).mean;
            let change_type = if new_value > old_value {
                ChangeType::LevelShiftUp
            } else {
                ChangeType::LevelShiftDown
            };
            let point = ChangePoint {
                timestamp: series[i].timestamp,
                old_value,
                new_value,
                confidence: (t / params.confidence_divisor).min(params.max_confidence),
                change_type,
            };
            debug!(index = i, t, %point, "Change point");
            found.push(point);
            i += w / 2 + 1;
        } else {
            i += 1;
        }
    }

    Ok(found)
}
