//! Ranking segments by average

use crate::types::{RankedSegment, SegmentStats};
use metric_core::{ensure_finite, Result};

/// Rank by average, highest first
///
/// Equal averages keep a stable order by name. `relative` compares each
/// average to the top one and `percent_of_total` each count to the sum of
/// counts.
pub fn rank_segments(segments: &[SegmentStats]) -> Result<Vec<RankedSegment>> {
    ensure_finite(segments.iter().map(|s| s.avg), "segment averages")?;

    let mut sorted: Vec<&SegmentStats> = segments.iter().collect();
    sorted.sort_by(|a, b| b.avg.total_cmp(&a.avg).then_with(|| a.name.cmp(&b.name)));

    let top = sorted.first().map(|s| s.avg).unwrap_or(0.0);
    let total: u64 = segments.iter().map(|s| s.count).sum();

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedSegment {
            stats: s.clone(),
            rank: i + 1,
            relative: (top > 0.0).then(|| s.avg / top),
            percent_of_total: (total > 0).then(|| s.count as f64 / total as f64 * 100.0),
        })
        .collect())
}
