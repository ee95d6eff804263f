//! Cross-method merging of candidate anomalies

use crate::types::{Anomaly, AnomalyKind};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Merge candidates that share a timestamp and boost agreement
///
/// Candidates are grouped by exact timestamp. A singleton passes through
/// unchanged; a group of `k` becomes one anomaly scored
/// `min(1, max_score · sqrt(k))`, carrying the value of the first candidate in
/// the group. The output is ordered by score descending, then by timestamp
/// ascending.
pub fn deduplicate_and_score(anomalies: Vec<Anomaly>) -> Vec<Anomaly> {
    let mut groups: BTreeMap<DateTime<Utc>, Vec<Anomaly>> = BTreeMap::new();
    for anomaly in anomalies {
        groups.entry(anomaly.timestamp).or_default().push(anomaly);
    }

    let mut merged: Vec<Anomaly> = groups
        .into_iter()
        .filter_map(|(timestamp, mut group)| {
            if group.len() == 1 {
                return group.pop();
            }
            let k = group.len();
            let max_score = group.iter().map(|a| a.score).fold(0.0, f64::max);
            Some(Anomaly {
                timestamp,
                value: group[0].value,
                score: (max_score * (k as f64).sqrt()).min(1.0),
                kind: AnomalyKind::MultiDetection { methods: k },
                message: format!("Detected by {k} methods"),
            })
        })
        .collect();

    // Groups come out in timestamp order, so a stable sort keeps ties ascending.
    merged.sort_by(|a, b| b.score.total_cmp(&a.score));
    merged
}

/// Count anomalies above the severe and moderate score thresholds
///
/// Returns `(severe, moderate)`; a severe anomaly is not also counted as
/// moderate.
pub fn severity_counts(anomalies: &[Anomaly], severe: f64, moderate: f64) -> (usize, usize) {
    anomalies.iter().fold((0, 0), |(s, m), a| {
        if a.score > severe {
            (s + 1, m)
        } else if a.score > moderate {
            (s, m + 1)
        } else {
            (s, m)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use metric_core::test_data::timestamp;
    use proptest::prelude::*;

    fn candidate(index: usize, score: f64, kind: AnomalyKind) -> Anomaly {
        Anomaly {
            timestamp: timestamp(index),
            value: index as f64,
            score,
            kind,
            message: String::new(),
        }
    }

    #[test]
    fn test_singletons_pass_through() {
        let input = vec![candidate(3, 0.4, AnomalyKind::Iqr)];
        assert_eq!(deduplicate_and_score(input.clone()), input);
    }

    #[test]
    fn test_group_is_boosted() {
        let merged = deduplicate_and_score(vec![
            candidate(5, 0.3, AnomalyKind::ZScore),
            candidate(5, 0.4, AnomalyKind::Iqr),
            candidate(9, 0.45, AnomalyKind::Iqr),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].timestamp, timestamp(5));
        assert_relative_eq!(merged[0].score, 0.4 * 2f64.sqrt());
        assert_eq!(merged[0].kind, AnomalyKind::MultiDetection { methods: 2 });
        assert_eq!(merged[0].message, "Detected by 2 methods");
        assert_eq!(merged[1].kind, AnomalyKind::Iqr);
    }

    #[test]
    fn test_boost_is_capped() {
        let merged = deduplicate_and_score(vec![
            candidate(1, 0.9, AnomalyKind::ZScore),
            candidate(1, 0.8, AnomalyKind::Iqr),
            candidate(1, 0.7, AnomalyKind::MovingAverage),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].score, 1.0);
    }

    #[test]
    fn test_ties_ordered_by_timestamp() {
        let merged = deduplicate_and_score(vec![
            candidate(8, 0.5, AnomalyKind::Iqr),
            candidate(2, 0.5, AnomalyKind::Iqr),
            candidate(5, 0.9, AnomalyKind::Iqr),
        ]);
        let order: Vec<_> = merged.iter().map(|a| a.timestamp).collect();
        assert_eq!(order, vec![timestamp(5), timestamp(2), timestamp(8)]);
    }

    #[test]
    fn test_severity_counts() {
        let anomalies = vec![
            candidate(0, 0.95, AnomalyKind::Iqr),
            candidate(1, 0.81, AnomalyKind::Iqr),
            candidate(2, 0.6, AnomalyKind::Iqr),
            candidate(3, 0.5, AnomalyKind::Iqr),
        ];
        assert_eq!(severity_counts(&anomalies, 0.8, 0.5), (2, 1));
    }

    proptest! {
        #[test]
        fn prop_merge_never_lowers_or_exceeds(
            raw in prop::collection::vec((0usize..10, 0.0f64..=1.0), 0..60),
        ) {
            let input: Vec<Anomaly> = raw
                .iter()
                .map(|&(i, s)| candidate(i, s, AnomalyKind::ZScore))
                .collect();
            let merged = deduplicate_and_score(input.clone());

            for a in &merged {
                prop_assert!(a.score <= 1.0);
                let best = input
                    .iter()
                    .filter(|c| c.timestamp == a.timestamp)
                    .map(|c| c.score)
                    .fold(0.0, f64::max);
                prop_assert!(a.score >= best);
            }
            let distinct: std::collections::BTreeSet<_> = input.iter().map(|a| a.timestamp).collect();
            prop_assert_eq!(merged.len(), distinct.len());
            prop_assert!(merged.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
