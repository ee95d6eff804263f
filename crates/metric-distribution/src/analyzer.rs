//! Distribution analysis with variability insights

use crate::histogram::{create_histogram, Histogram, HistogramBucket, DEFAULT_BUCKETS};
use crate::shape::{DistributionType, ShapeThresholds};
use crate::stats::DistributionStats;
use metric_core::{ensure_finite, require_len, values_of, Error, Result, TimeSeriesPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Parameters for distribution analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParameters {
    /// Number of equal-width histogram buckets
    pub buckets: usize,
    /// CV (percent) above which variability is very high
    pub very_high_cv: f64,
    /// CV (percent) above which variability is high
    pub high_cv: f64,
    /// CV (percent) below which variability is low
    pub low_cv: f64,
    /// Mean and median differ notably when `|mean − median| > factor·stddev`
    pub central_tendency_factor: f64,
    pub shape: ShapeThresholds,
}

impl Default for DistributionParameters {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            very_high_cv: 100.0,
            high_cv: 50.0,
            low_cv: 20.0,
            central_tendency_factor: 0.2,
            shape: ShapeThresholds::default(),
        }
    }
}

impl DistributionParameters {
    pub fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            return Err(Error::InvalidParameter(
                "Histogram needs at least one bucket".to_string(),
            ));
        }
        if !(self.low_cv <= self.high_cv && self.high_cv <= self.very_high_cv) {
            return Err(Error::InvalidParameter(format!(
                "CV bands must be ordered: low {} <= high {} <= very high {}",
                self.low_cv, self.high_cv, self.very_high_cv
            )));
        }
        if self.central_tendency_factor < 0.0 {
            return Err(Error::InvalidParameter(
                "Central tendency factor must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Band a coefficient of variation
    pub fn variability(&self, cv: f64) -> Variability {
        if cv > self.very_high_cv {
            Variability::VeryHigh
        } else if cv > self.high_cv {
            Variability::High
        } else if cv < self.low_cv {
            Variability::Low
        } else {
            Variability::Moderate
        }
    }
}

/// Variability band derived from the coefficient of variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variability {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl fmt::Display for Variability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::VeryHigh => "very high",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

/// Relationship between mean and median
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralTendency {
    /// Mean and median agree within the configured band
    Symmetric,
    /// Mean pulled above the median by high values
    MeanAboveMedian,
    /// Mean pulled below the median by low values
    MeanBelowMedian,
}

/// Full distribution characterization of a set of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionReport {
    pub stats: DistributionStats,
    pub distribution_type: DistributionType,
    pub histogram: Histogram,
    pub coefficient_of_variation: f64,
    pub variability: Variability,
    pub central_tendency: CentralTendency,
    pub modal_bucket: Option<HistogramBucket>,
}

/// Distribution analyzer
#[derive(Debug, Clone, Default)]
pub struct DistributionAnalyzer {
    params: DistributionParameters,
}

impl DistributionAnalyzer {
    pub fn new(params: DistributionParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DistributionParameters {
        &self.params
    }

    /// Characterize the values of a series
    pub fn analyze_series(&self, series: &[TimeSeriesPoint]) -> Result<DistributionReport> {
        self.analyze(&values_of(series))
    }

    /// Characterize a set of values
    #[instrument(skip(self, values), fields(n = values.len()))]
    pub fn analyze(&self, values: &[f64]) -> Result<DistributionReport> {
        require_len(1, values.len())?;
        ensure_finite(values.iter().copied(), "distribution values")?;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DistributionStats::from_sorted(&sorted).checked()?;

        let distribution_type = self.params.shape.classify(&stats);
        let histogram = create_histogram(&sorted, self.params.buckets)?;
        let cv = stats.coefficient_of_variation();
        let variability = self.params.variability(cv);

        let gap = stats.mean - stats.median;
        let central_tendency = if gap.abs() <= self.params.central_tendency_factor * stats.stddev {
            CentralTendency::Symmetric
        } else if gap > 0.0 {
            CentralTendency::MeanAboveMedian
        } else {
            CentralTendency::MeanBelowMedian
        };

        debug!(
            %distribution_type,
            cv,
            %variability,
            ?central_tendency,
            "Distribution characterized"
        );

        let modal_bucket = histogram.modal_bucket().copied();
        Ok(DistributionReport {
            stats,
            distribution_type,
            histogram,
            coefficient_of_variation: cv,
            variability,
            central_tendency,
            modal_bucket,
        })
    }
}
