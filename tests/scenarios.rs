//! Behaviour of the engine on small hand-built series

use approx::assert_relative_eq;
use metric_analysis::metric_anomaly::Method;
use metric_analysis::metric_core::test_data;
use metric_analysis::{
    pearson_correlation, AnalysisEngine, AnomalyParameters, DistributionType, EngineParameters,
    MissingValuePolicy, NamedSeries, RawSample, TrendDirection,
};

#[test]
fn scenario_a_constant_series() {
    let engine = AnalysisEngine::default();
    let series = test_data::flat(5, 10.0);

    let report = engine.distribution(&series).unwrap();
    assert_eq!(report.stats.stddev, 0.0);
    assert_eq!(report.stats.skewness, 0.0);
    assert_eq!(report.stats.kurtosis, 0.0);
    assert_eq!(report.distribution_type, DistributionType::Normal);

    let other = NamedSeries::new("other", test_data::flat(5, 3.0));
    let params = EngineParameters {
        correlation: metric_analysis::metric_correlation::CorrelationParameters {
            min_correlation: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let found = AnalysisEngine::new(params)
        .unwrap()
        .correlations(&series, &[other])
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].coefficient, 0.0);
    assert_eq!(found[0].lagged_coeff, 0.0);
}

#[test]
fn scenario_b_perfect_anticorrelation() {
    let a = [1.0, 2.0, 3.0, 4.0, 5.0];
    let b = [5.0, 4.0, 3.0, 2.0, 1.0];
    assert_eq!(pearson_correlation(&a, &b).unwrap(), -1.0);

    let engine = AnalysisEngine::default();
    let found = engine
        .correlations(
            &test_data::series_from(&a),
            &[NamedSeries::new("mirror", test_data::series_from(&b))],
        )
        .unwrap();
    assert_eq!(found[0].relationship.to_string(), "very strong negative");
}

#[test]
fn scenario_c_pure_ramp() {
    let engine = AnalysisEngine::default();
    let report = engine.trend(&test_data::ramp(100, 0.0, 1.0)).unwrap();
    assert_eq!(report.linear_trend.direction, TrendDirection::Increasing);
    assert_relative_eq!(report.linear_trend.r_squared, 1.0, epsilon = 1e-12);
    // The fitted line starts at zero
    assert_eq!(report.linear_trend.percent_change, 0.0);

    let shifted = engine.trend(&test_data::ramp(100, 100.0, 1.0)).unwrap();
    assert_relative_eq!(shifted.linear_trend.percent_change, 99.0, epsilon = 1e-9);
}

#[test]
fn scenario_d_single_spike() {
    let engine = AnalysisEngine::default();
    let series = test_data::flat_with_spike(60, 10.0, 37, 95.0);
    let report = engine.anomalies(&series).unwrap();
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].timestamp, test_data::timestamp(37));
    assert!(report.anomalies[0].kind.is_multi());

    // Holding the method fixed, a larger spike scores higher
    let params = EngineParameters {
        anomaly: AnomalyParameters {
            methods: vec![Method::Iqr],
            ..Default::default()
        },
        ..Default::default()
    };
    let engine = AnalysisEngine::new(params).unwrap();
    let scores: Vec<f64> = [12.0, 14.0, 16.0, 18.0]
        .iter()
        .map(|&spike| {
            let report = engine
                .anomalies(&test_data::flat_with_spike(40, 10.0, 20, spike))
                .unwrap();
            assert_eq!(report.anomalies.len(), 1);
            assert_eq!(report.anomalies[0].timestamp, test_data::timestamp(20));
            report.anomalies[0].score
        })
        .collect();
    assert!(scores.windows(2).all(|w| w[1] > w[0]), "{scores:?}");
}

#[test]
fn missing_samples_are_dropped_unless_zero_filled() {
    let raw: Vec<RawSample> = (0..10)
        .map(|i| {
            let value = if i % 3 == 0 { None } else { Some(10.0) };
            RawSample::new(test_data::timestamp(i), value)
        })
        .collect();

    let engine = AnalysisEngine::default();
    let dropped = engine.extract(&raw);
    assert_eq!(dropped.len(), 6);
    assert_eq!(engine.baseline(&dropped).unwrap().avg, 10.0);

    let legacy = AnalysisEngine::new(
        EngineParameters::default().with_missing_values(MissingValuePolicy::ZeroFill),
    )
    .unwrap();
    let filled = legacy.extract(&raw);
    assert_eq!(filled.len(), 10);
    assert_relative_eq!(legacy.baseline(&filled).unwrap().avg, 6.0, epsilon = 1e-12);
}

#[test]
fn empty_input_is_insufficient_everywhere() {
    let engine = AnalysisEngine::default();
    assert!(engine.baseline(&[]).unwrap_err().is_insufficient_data());
    assert!(engine.anomalies(&[]).unwrap_err().is_insufficient_data());
    assert!(engine.trend(&[]).unwrap_err().is_insufficient_data());
    assert!(engine.segments(&[]).unwrap_err().is_insufficient_data());
    assert!(engine.correlations(&[], &[]).unwrap_err().is_insufficient_data());
}

#[test]
fn grouped_baseline_through_engine() {
    let engine = AnalysisEngine::default();
    let low = test_data::flat(10, 10.0);
    let high = test_data::flat(10, 30.0);
    let result = engine
        .grouped_baseline([("low", low.as_slice()), ("high", high.as_slice())])
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["kind"], "grouped");
    assert_eq!(json["groups"][0]["name"], "low");
}
