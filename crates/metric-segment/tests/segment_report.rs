//! Segment comparison end to end

use approx::assert_relative_eq;
use metric_segment::{SegmentComparator, SegmentInsight, SegmentParameters, SegmentStats};
use proptest::prelude::*;

fn regions() -> Vec<SegmentStats> {
    vec![
        SegmentStats::new("ap-south", 40.0, 500, 8.0),
        SegmentStats::new("us-east", 400.0, 8_000, 15.0).with_range(10.0, 900.0),
        SegmentStats::new("eu-west", 60.0, 1_000, 10.0),
        SegmentStats::new("sa-east", 50.0, 500, 9.0),
    ]
}

#[test]
fn test_report_insights() {
    let report = SegmentComparator::default().compare(&regions()).unwrap();

    assert_eq!(report.segments[0].stats.name, "us-east");
    assert_eq!(report.segments[3].stats.name, "ap-south");
    assert_relative_eq!(report.segments[0].percent_of_total.unwrap(), 80.0);

    let insights = &report.insights;
    assert!(matches!(
        &insights[0],
        SegmentInsight::TopPerformer { name, .. } if name == "us-east"
    ));
    assert!(insights.iter().any(|i| matches!(
        i,
        SegmentInsight::BottomPerformer { percent_below_top, .. } if (*percent_below_top - 90.0).abs() < 1e-9
    )));
    assert!(insights
        .iter()
        .any(|i| matches!(i, SegmentInsight::HighVariation { .. })));
    assert!(insights
        .iter()
        .any(|i| matches!(i, SegmentInsight::Concentration { percent, .. } if (*percent - 80.0).abs() < 1e-9)));
    assert!(insights
        .iter()
        .any(|i| matches!(i, SegmentInsight::LargeGap { range_ratio } if (*range_ratio - 10.0).abs() < 1e-9)));
    assert!(!insights
        .iter()
        .any(|i| matches!(i, SegmentInsight::ManySegments { .. })));
}

#[test]
fn test_single_segment() {
    let report = SegmentComparator::default()
        .compare(&[SegmentStats::new("only", 3.0, 10, 1.0)])
        .unwrap();
    assert_eq!(report.segments.len(), 1);
    assert_eq!(report.segments[0].relative, Some(1.0));
    assert_eq!(report.analysis.overall_stddev, 0.0);
    assert!(report.analysis.outliers.is_empty());
    assert_eq!(report.insights.len(), 3); // top, low variation, concentration
}

#[test]
fn test_empty_is_insufficient() {
    let err = SegmentComparator::default().compare(&[]).unwrap_err();
    assert!(err.is_insufficient_data());
}

#[test]
fn test_invalid_parameters() {
    let params = SegmentParameters {
        outlier_k: 0.0,
        ..Default::default()
    };
    assert!(SegmentComparator::new(params).is_err());
}

#[test]
fn test_serialized_field_names() {
    let report = SegmentComparator::default().compare(&regions()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let top = &json["segments"][0];
    assert_eq!(top["name"], "us-east");
    assert_eq!(top["rank"], 1);
    assert!(top.get("percentOfTotal").is_some());
    assert_eq!(top["min"], 10.0);
    assert!(json["segments"][1].get("min").is_none());

    let analysis = &json["analysis"];
    assert!(analysis.get("coefficientOfVariation").is_some());
    assert!(analysis.get("rangeRatio").is_some());
    assert_eq!(json["insights"][0]["kind"], "top_performer");
}

proptest! {
    #[test]
    fn prop_ranking_invariants(
        input in prop::collection::vec((0.0f64..1000.0, 0u64..10_000), 1..30)
    ) {
        let segments: Vec<SegmentStats> = input
            .iter()
            .enumerate()
            .map(|(i, (avg, count))| SegmentStats::new(format!("s{i}"), *avg, *count, 0.0))
            .collect();
        let report = SegmentComparator::default().compare(&segments).unwrap();

        let ranks: Vec<usize> = report.segments.iter().map(|s| s.rank).collect();
        prop_assert_eq!(ranks, (1..=segments.len()).collect::<Vec<_>>());
        prop_assert!(report.segments.windows(2).all(|w| w[0].stats.avg >= w[1].stats.avg));

        let shares: Vec<f64> = report.segments.iter().filter_map(|s| s.percent_of_total).collect();
        if !shares.is_empty() {
            prop_assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-6);
        }
        for s in &report.segments {
            if let Some(r) = s.relative {
                prop_assert!((0.0..=1.0 + 1e-12).contains(&r));
            }
        }
        prop_assert!(report.analysis.coefficient_of_variation >= 0.0);
        prop_assert!(report.analysis.min_segment_avg <= report.analysis.max_segment_avg);
    }
}
