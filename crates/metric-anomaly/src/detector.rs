//! Multi-method anomaly detector

use crate::dedup::{deduplicate_and_score, severity_counts};
use crate::iqr::IqrMethod;
use crate::moving_average::MovingAverageMethod;
use crate::traits::DetectionMethod;
use crate::types::AnomalyReport;
use crate::zscore::ZScoreMethod;
use metric_core::{
    ensure_finite, ordered, Error, Result, SampleInterval, Statistics, TimeSeriesPoint,
    DEFAULT_NORMAL_RANGE_K,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, trace};

/// Built-in detection methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    ZScore,
    Iqr,
    MovingAverage,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::ZScore, Method::Iqr, Method::MovingAverage];
}

/// Parameters for anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyParameters {
    /// `0` flags only extreme points, `1` flags the most
    pub sensitivity: f64,
    pub methods: Vec<Method>,
    /// Trailing window of the moving-average method, in samples
    pub moving_average_window: usize,
    /// Scores above this count as severe
    pub severe_score: f64,
    /// Scores above this (and not severe) count as moderate
    pub moderate_score: f64,
    /// Reported normal range is `mean ± k·stddev`
    pub normal_range_k: f64,
}

impl Default for AnomalyParameters {
    fn default() -> Self {
        Self {
            sensitivity: 0.5,
            methods: Method::ALL.to_vec(),
            moving_average_window: crate::moving_average::DEFAULT_WINDOW,
            severe_score: 0.8,
            moderate_score: 0.5,
            normal_range_k: DEFAULT_NORMAL_RANGE_K,
        }
    }
}

impl AnomalyParameters {
    /// Only clear outliers
    pub fn strict() -> Self {
        Self {
            sensitivity: 0.2,
            ..Default::default()
        }
    }

    /// Flag smaller deviations too
    pub fn relaxed() -> Self {
        Self {
            sensitivity: 0.8,
            ..Default::default()
        }
    }

    /// Defaults with a one hour moving-average window at `interval`
    pub fn for_interval(interval: SampleInterval) -> Self {
        Self {
            moving_average_window: interval.samples_per_hour().max(2),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sensitivity) {
            return Err(Error::InvalidParameter(format!(
                "Sensitivity {} must be in [0, 1]",
                self.sensitivity
            )));
        }
        if self.methods.is_empty() {
            return Err(Error::InvalidParameter(
                "At least one detection method is required".to_string(),
            ));
        }
        if self.methods.contains(&Method::MovingAverage) && self.moving_average_window < 2 {
            return Err(Error::InvalidParameter(format!(
                "Moving-average window {} must be at least 2",
                self.moving_average_window
            )));
        }
        if self.moderate_score > self.severe_score {
            return Err(Error::InvalidParameter(
                "Moderate score threshold exceeds severe threshold".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runs every configured method and merges their findings
pub struct AnomalyDetector {
    params: AnomalyParameters,
    methods: Vec<Box<dyn DetectionMethod>>,
}

impl fmt::Debug for AnomalyDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnomalyDetector")
            .field("params", &self.params)
            .field(
                "methods",
                &self.methods.iter().map(|m| m.kind().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl AnomalyDetector {
    pub fn new(params: AnomalyParameters) -> Result<Self> {
        params.validate()?;
        let methods = params
            .methods
            .iter()
            .map(|m| -> Box<dyn DetectionMethod> {
                match m {
                    Method::ZScore => Box::new(ZScoreMethod),
                    Method::Iqr => Box::new(IqrMethod),
                    Method::MovingAverage => {
                        Box::new(MovingAverageMethod::new(params.moving_average_window))
                    }
                }
            })
            .collect();
        Ok(Self { params, methods })
    }

    /// Create with strict parameters
    pub fn strict() -> Result<Self> {
        Self::new(AnomalyParameters::strict())
    }

    /// Create with relaxed parameters
    pub fn relaxed() -> Result<Self> {
        Self::new(AnomalyParameters::relaxed())
    }

    pub fn params(&self) -> &AnomalyParameters {
        &self.params
    }

    /// Detect anomalies in a series
    ///
    /// The series is ordered by timestamp first if needed.
    #[instrument(skip(self, series), fields(n = series.len(), sensitivity = self.params.sensitivity))]
    pub fn detect(&self, series: &[TimeSeriesPoint]) -> Result<AnomalyReport> {
        if series.is_empty() {
            return Err(Error::insufficient(1, 0));
        }
        ensure_finite(series.iter().map(|p| p.value), "anomaly series")?;

        let series = ordered(series);
        let statistics = Statistics::of_series(&series);

        let mut candidates = Vec::new();
        for method in &self.methods {
            let found = method.detect(&series, &statistics, self.params.sensitivity);
            trace!(method = %method.kind(), candidates = found.len(), "Method finished");
            candidates.extend(found);
        }

        let anomalies = deduplicate_and_score(candidates);
        let (severe_count, moderate_count) =
            severity_counts(&anomalies, self.params.severe_score, self.params.moderate_score);
        debug!(
            anomalies = anomalies.len(),
            severe_count, moderate_count, "Anomaly detection complete"
        );

        Ok(AnomalyReport {
            normal_range: statistics.normal_range(self.params.normal_range_k),
            statistics,
            anomalies,
            severe_count,
            moderate_count,
        })
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            params: AnomalyParameters::default(),
            methods: vec![
                Box::new(ZScoreMethod),
                Box::new(IqrMethod),
                Box::new(MovingAverageMethod::default()),
            ],
        }
    }
}

/// Builder for detectors, including ones with custom methods
pub struct AnomalyDetectorBuilder {
    params: AnomalyParameters,
    extra: Vec<Box<dyn DetectionMethod>>,
}

impl Default for AnomalyDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyDetectorBuilder {
    pub fn new() -> Self {
        Self {
            params: AnomalyParameters::default(),
            extra: Vec::new(),
        }
    }

    /// Sets the sensitivity, clamped to `[0, 1]`
    pub fn sensitivity(mut self, sensitivity: f64) -> Self {
        self.params.sensitivity = sensitivity.clamp(0.0, 1.0);
        self
    }

    /// Replaces the built-in method set
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.params.methods = methods.into_iter().collect();
        self
    }

    pub fn moving_average_window(mut self, window: usize) -> Self {
        self.params.moving_average_window = window;
        self
    }

    /// Adds a method alongside the built-in ones
    pub fn with_method(mut self, method: impl DetectionMethod + 'static) -> Self {
        self.extra.push(Box::new(method));
        self
    }

    pub fn build(self) -> Result<AnomalyDetector> {
        let extra_only = self.params.methods.is_empty() && !self.extra.is_empty();
        let mut detector = if extra_only {
            // Validate everything except the method list, which is custom.
            let mut probe = self.params.clone();
            probe.methods = vec![Method::Iqr];
            probe.validate()?;
            AnomalyDetector {
                params: self.params,
                methods: Vec::new(),
            }
        } else {
            AnomalyDetector::new(self.params)?
        };
        detector.methods.extend(self.extra);
        Ok(detector)
    }
}
