//! Segment comparison entry point

use crate::analysis::{analyze_segment_differences, SegmentAnalysis, SegmentParameters};
use crate::insights::{generate_insights, SegmentInsight};
use crate::rank::rank_segments;
use crate::types::{RankedSegment, SegmentStats};
use metric_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReport {
    /// Highest average first
    pub segments: Vec<RankedSegment>,
    pub analysis: SegmentAnalysis,
    pub insights: Vec<SegmentInsight>,
}

/// Ranks segments and summarises how they differ
#[derive(Debug, Clone, Default)]
pub struct SegmentComparator {
    params: SegmentParameters,
}

impl SegmentComparator {
    pub fn new(params: SegmentParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SegmentParameters {
        &self.params
    }

    #[instrument(skip(self, segments), fields(n = segments.len()))]
    pub fn compare(&self, segments: &[SegmentStats]) -> Result<SegmentReport> {
        let analysis = analyze_segment_differences(segments, &self.params)?;
        let ranked = rank_segments(segments)?;
        let insights = generate_insights(&ranked, &analysis, &self.params);
        debug!(insights = insights.len(), "Segment comparison complete");

        Ok(SegmentReport {
            segments: ranked,
            analysis,
            insights,
        })
    }
}
