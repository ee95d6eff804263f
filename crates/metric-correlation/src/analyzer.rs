//! Correlation of a primary metric against candidate metrics

use crate::align::align_time_series;
use crate::lag::{calculate_lag_correlations, dominant_lag, DEFAULT_MAX_LAG};
use crate::pearson::pearson_correlation;
use chrono::Duration;
use metric_core::{Error, Result, SampleInterval, TimeSeriesPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Strength band of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn of(coefficient: f64) -> Self {
        match coefficient.abs() {
            a if a >= 0.9 => Self::VeryStrong,
            a if a >= 0.7 => Self::Strong,
            a if a >= 0.5 => Self::Moderate,
            a if a >= 0.3 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        }
    }
}

/// Strength and sign of a correlation, e.g. `strong negative`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Relationship {
    pub strength: Strength,
    pub positive: bool,
}

impl Relationship {
    pub fn of(coefficient: f64) -> Self {
        Self {
            strength: Strength::of(coefficient),
            positive: coefficient >= 0.0,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { "positive" } else { "negative" };
        write!(f, "{} {}", self.strength.label(), sign)
    }
}

impl From<Relationship> for String {
    fn from(r: Relationship) -> Self {
        r.to_string()
    }
}

/// Correlation of one candidate metric with the primary metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCorrelation {
    pub metric: String,
    /// Coefficient at lag 0
    pub coefficient: f64,
    /// Dominant lag in samples; positive means the candidate lags behind
    pub lag: i32,
    /// Coefficient at the dominant lag
    pub lagged_coeff: f64,
    /// Number of aligned samples
    pub data_points: usize,
    /// Band of the lag-0 coefficient
    pub relationship: Relationship,
}

impl MetricCorrelation {
    /// Dominant lag as wall-clock time at the given sample interval
    pub fn lag_offset(&self, interval: SampleInterval) -> Duration {
        interval.steps(i64::from(self.lag))
    }
}

/// A named series to correlate against the primary metric
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Parameters for correlation analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationParameters {
    /// Lag search radius, in samples
    pub max_lag: usize,
    /// Candidates with `|coefficient|` below this are dropped
    pub min_correlation: f64,
}

impl Default for CorrelationParameters {
    fn default() -> Self {
        Self {
            max_lag: DEFAULT_MAX_LAG,
            min_correlation: 0.7,
        }
    }
}

impl CorrelationParameters {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_correlation) {
            return Err(Error::InvalidParameter(format!(
                "Minimum correlation {} must be in [0, 1]",
                self.min_correlation
            )));
        }
        Ok(())
    }
}

/// Correlation analyzer
#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalyzer {
    params: CorrelationParameters,
}

impl CorrelationAnalyzer {
    pub fn new(params: CorrelationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CorrelationParameters {
        &self.params
    }

    /// Correlate one candidate with the primary series
    ///
    /// Fails with insufficient data when fewer than two timestamps align.
    pub fn correlate(&self, primary: &[TimeSeriesPoint], candidate: &NamedSeries) -> Result<MetricCorrelation> {
        let aligned = align_time_series(primary, &candidate.points);
        if aligned.len() < 2 {
            return Err(Error::insufficient(2, aligned.len()));
        }

        let coefficient = pearson_correlation(&aligned.left, &aligned.right)?;
        let lags = calculate_lag_correlations(&aligned.left, &aligned.right, self.params.max_lag)?;
        let (lag, lagged_coeff) = dominant_lag(coefficient, &lags);

        Ok(MetricCorrelation {
            metric: candidate.name.clone(),
            coefficient,
            lag,
            lagged_coeff,
            data_points: aligned.len(),
            relationship: Relationship::of(coefficient),
        })
    }

    /// Rank candidates by strength of correlation with the primary series
    ///
    /// Candidates sharing fewer than two timestamps with the primary series
    /// are skipped, as are those below `min_correlation`. Output is ordered by
    /// `|coefficient|` descending, ties by metric name.
    #[instrument(skip(self, primary, candidates), fields(n = primary.len(), candidates = candidates.len()))]
    pub fn find_correlations(
        &self,
        primary: &[TimeSeriesPoint],
        candidates: &[NamedSeries],
    ) -> Result<Vec<MetricCorrelation>> {
        if primary.len() < 2 {
            return Err(Error::insufficient(2, primary.len()));
        }

        #[cfg(feature = "parallel")]
        let evaluated: Vec<Result<Option<MetricCorrelation>>> = candidates
            .par_iter()
            .map(|c| self.evaluate(primary, c))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let evaluated: Vec<Result<Option<MetricCorrelation>>> =
            candidates.iter().map(|c| self.evaluate(primary, c)).collect();

        let mut found = Vec::new();
        for result in evaluated {
            if let Some(c) = result? {
                found.push(c);
            }
        }

        found.sort_by(|a, b| {
            b.coefficient
                .abs()
                .total_cmp(&a.coefficient.abs())
                .then_with(|| a.metric.cmp(&b.metric))
        });
        debug!(kept = found.len(), "Correlation ranking complete");
        Ok(found)
    }

    fn evaluate(&self, primary: &[TimeSeriesPoint], candidate: &NamedSeries) -> Result<Option<MetricCorrelation>> {
        match self.correlate(primary, candidate) {
            Ok(c) if c.coefficient.abs() < self.params.min_correlation => {
                debug!(metric = %c.metric, coefficient = c.coefficient, "Below minimum correlation");
                Ok(None)
            }
            Ok(c) => Ok(Some(c)),
            Err(e) if e.is_insufficient_data() => {
                debug!(metric = %candidate.name, "Skipping candidate without overlap");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
