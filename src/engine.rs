//! One configured entry point for every analysis

use metric_anomaly::{AnomalyDetector, AnomalyParameters, AnomalyReport};
use metric_core::{
    extract_series, MissingValuePolicy, RawSample, Result, SampleInterval, TimeSeriesPoint,
};
use metric_correlation::{CorrelationAnalyzer, CorrelationParameters, MetricCorrelation, NamedSeries};
use metric_distribution::{
    calculate_baseline, calculate_grouped_baseline, Baseline, BaselineParameters, BaselineResult,
    DistributionAnalyzer, DistributionParameters, DistributionReport,
};
use metric_segment::{SegmentComparator, SegmentParameters, SegmentReport, SegmentStats};
use metric_trend::{TrendAnalyzer, TrendParameters, TrendReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Parameters for every analyzer, derived from one sample interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParameters {
    pub interval: SampleInterval,
    pub missing_values: MissingValuePolicy,
    pub baseline: BaselineParameters,
    pub distribution: DistributionParameters,
    pub anomaly: AnomalyParameters,
    pub correlation: CorrelationParameters,
    pub trend: TrendParameters,
    pub segment: SegmentParameters,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self::for_interval(SampleInterval::default())
    }
}

impl EngineParameters {
    /// Window sizes, horizon and seasonal periods for the given spacing
    pub fn for_interval(interval: SampleInterval) -> Self {
        Self {
            interval,
            missing_values: MissingValuePolicy::default(),
            baseline: BaselineParameters::default(),
            distribution: DistributionParameters::default(),
            anomaly: AnomalyParameters::for_interval(interval),
            correlation: CorrelationParameters::default(),
            trend: TrendParameters::for_interval(interval),
            segment: SegmentParameters::default(),
        }
    }

    pub fn with_missing_values(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_values = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.baseline.validate()?;
        self.distribution.validate()?;
        self.anomaly.validate()?;
        self.correlation.validate()?;
        self.trend.validate()?;
        self.segment.validate()
    }
}

/// Stateless analysis engine
///
/// Holds validated analyzers only; every call works on caller-owned input, so
/// one engine can be shared across threads.
#[derive(Debug)]
pub struct AnalysisEngine {
    params: EngineParameters,
    distribution: DistributionAnalyzer,
    anomaly: AnomalyDetector,
    correlation: CorrelationAnalyzer,
    trend: TrendAnalyzer,
    segment: SegmentComparator,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self {
            params: EngineParameters::default(),
            distribution: DistributionAnalyzer::default(),
            anomaly: AnomalyDetector::default(),
            correlation: CorrelationAnalyzer::default(),
            trend: TrendAnalyzer::default(),
            segment: SegmentComparator::default(),
        }
    }
}

impl AnalysisEngine {
    pub fn new(params: EngineParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            distribution: DistributionAnalyzer::new(params.distribution)?,
            anomaly: AnomalyDetector::new(params.anomaly.clone())?,
            correlation: CorrelationAnalyzer::new(params.correlation)?,
            trend: TrendAnalyzer::new(params.trend.clone())?,
            segment: SegmentComparator::new(params.segment)?,
            params,
        })
    }

    pub fn for_interval(interval: SampleInterval) -> Result<Self> {
        Self::new(EngineParameters::for_interval(interval))
    }

    pub fn params(&self) -> &EngineParameters {
        &self.params
    }

    /// Ordered, duplicate-free series under the configured missing-value policy
    #[instrument(skip(self, raw), fields(n = raw.len()))]
    pub fn extract(&self, raw: &[RawSample]) -> Vec<TimeSeriesPoint> {
        let series = extract_series(raw, self.params.missing_values);
        debug!(kept = series.len(), "Extracted series");
        series
    }

    pub fn baseline(&self, series: &[TimeSeriesPoint]) -> Result<Baseline> {
        calculate_baseline(series, &self.params.baseline)
    }

    pub fn grouped_baseline<'a, N: Into<String>>(
        &self,
        groups: impl IntoIterator<Item = (N, &'a [TimeSeriesPoint])>,
    ) -> Result<BaselineResult> {
        calculate_grouped_baseline(groups, &self.params.baseline)
    }

    pub fn distribution(&self, series: &[TimeSeriesPoint]) -> Result<DistributionReport> {
        self.distribution.analyze_series(series)
    }

    pub fn anomalies(&self, series: &[TimeSeriesPoint]) -> Result<AnomalyReport> {
        self.anomaly.detect(series)
    }

    pub fn correlations(
        &self,
        primary: &[TimeSeriesPoint],
        candidates: &[NamedSeries],
    ) -> Result<Vec<MetricCorrelation>> {
        self.correlation.find_correlations(primary, candidates)
    }

    pub fn trend(&self, series: &[TimeSeriesPoint]) -> Result<TrendReport> {
        self.trend.analyze(series)
    }

    pub fn segments(&self, segments: &[SegmentStats]) -> Result<SegmentReport> {
        self.segment.compare(segments)
    }
}
