//! # Metric Analysis
//!
//! Statistical analysis of metric time series. Each concern lives in its own
//! crate and is re-exported here:
//!
//! - [`metric_core`]: points, summary statistics, errors, sample interval,
//!   raw-sample extraction
//! - [`metric_distribution`]: percentiles, histograms, distribution shape and
//!   baselines
//! - [`metric_anomaly`]: z-score, IQR and moving-average detection with
//!   cross-method scoring
//! - [`metric_correlation`]: timestamp alignment, Pearson and lagged
//!   correlation
//! - [`metric_trend`]: linear trend, seasonality, change points and forecast
//! - [`metric_segment`]: ranking and comparison of pre-aggregated segments
//!
//! [`AnalysisEngine`] bundles all of them behind one set of
//! [`EngineParameters`] derived from a [`SampleInterval`].
//!
//! Everything is pure computation over caller-owned data: no I/O and no
//! global state. Results are plain values that serialize with the field names
//! callers expect (`rSquared`, `laggedCoeff`, ...).
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use metric_analysis::{AnalysisEngine, RawSample};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let raw: Vec<RawSample> = (0..48)
//!     .map(|i| {
//!         let value = if i == 7 { None } else { Some(50.0 + (i % 4) as f64) };
//!         RawSample::new(t0 + Duration::minutes(5 * i), value)
//!     })
//!     .collect();
//!
//! let engine = AnalysisEngine::default();
//! let series = engine.extract(&raw);
//! assert_eq!(series.len(), 47);
//!
//! let baseline = engine.baseline(&series).unwrap();
//! assert!(baseline.avg > 50.0 && baseline.avg < 54.0);
//!
//! let trend = engine.trend(&series).unwrap();
//! assert_eq!(trend.forecast.len(), 12);
//! ```

pub mod engine;

pub use engine::{AnalysisEngine, EngineParameters};

pub use metric_anomaly;
pub use metric_core;
pub use metric_correlation;
pub use metric_distribution;
pub use metric_segment;
pub use metric_trend;

pub use metric_anomaly::{Anomaly, AnomalyDetector, AnomalyKind, AnomalyParameters, AnomalyReport};
pub use metric_core::{
    calculate_window_stats, extract_series, Error, MissingValuePolicy, RawSample, Result,
    SampleInterval, Statistics, TimeSeriesPoint,
};
pub use metric_correlation::{
    align_time_series, calculate_lag_correlations, pearson_correlation, CorrelationAnalyzer,
    MetricCorrelation, NamedSeries,
};
pub use metric_distribution::{
    calculate_baseline, calculate_grouped_baseline, Baseline, BaselineResult,
    DistributionAnalyzer, DistributionReport, DistributionType,
};
pub use metric_segment::{
    analyze_segment_differences, rank_segments, SegmentAnalysis, SegmentComparator,
    SegmentReport, SegmentStats,
};
pub use metric_trend::{
    ChangePoint, Forecast, LinearTrend, Seasonality, TrendAnalyzer, TrendDirection, TrendReport,
};
