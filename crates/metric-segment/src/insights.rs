//! Findings worth surfacing from a segment comparison

use crate::analysis::{SegmentAnalysis, SegmentParameters};
use crate::types::RankedSegment;
use serde::{Deserialize, Serialize};

/// A typed finding; rendering it as text is left to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentInsight {
    TopPerformer { name: String, avg: f64 },
    /// Only reported when the top average is positive
    BottomPerformer { name: String, avg: f64, percent_below_top: f64 },
    HighVariation { cv: f64 },
    LowVariation { cv: f64 },
    Outliers { names: Vec<String> },
    Concentration { name: String, percent: f64 },
    LargeGap { range_ratio: f64 },
    ManySegments { count: usize },
}

/// Derive insights from ranked segments and their analysis
pub fn generate_insights(
    ranked: &[RankedSegment],
    analysis: &SegmentAnalysis,
    params: &SegmentParameters,
) -> Vec<SegmentInsight> {
    let mut insights = Vec::new();
    let Some(top) = ranked.first() else {
        return insights;
    };

    insights.push(SegmentInsight::TopPerformer {
        name: top.stats.name.clone(),
        avg: top.stats.avg,
    });

    if let Some(bottom) = ranked.last().filter(|_| ranked.len() > 1) {
        if top.stats.avg > 0.0 {
            insights.push(SegmentInsight::BottomPerformer {
                name: bottom.stats.name.clone(),
                avg: bottom.stats.avg,
                percent_below_top: (top.stats.avg - bottom.stats.avg) / top.stats.avg * 100.0,
            });
        }
    }

    let cv = analysis.coefficient_of_variation;
    if cv > params.high_variation_cv {
        insights.push(SegmentInsight::HighVariation { cv });
    } else if cv < params.low_variation_cv {
        insights.push(SegmentInsight::LowVariation { cv });
    }

    if !analysis.outliers.is_empty() {
        insights.push(SegmentInsight::Outliers {
            names: analysis.outliers.clone(),
        });
    }

    if let Some(share) = analysis.top_share.as_ref().filter(|s| s.concentrated) {
        insights.push(SegmentInsight::Concentration {
            name: share.name.clone(),
            percent: share.percent,
        });
    }

    if let Some(range_ratio) = analysis.range_ratio.filter(|r| *r > params.large_gap_ratio) {
        insights.push(SegmentInsight::LargeGap { range_ratio });
    }

    if ranked.len() > params.many_segments {
        insights.push(SegmentInsight::ManySegments {
            count: ranked.len(),
        });
    }

    insights
}
