//! Baselines: summary statistics plus percentiles, optionally per group

use crate::stats::percentile_sorted;
use metric_core::{
    ensure_finite, values_of, Error, NormalRange, Result, Statistics, TimeSeriesPoint,
    DEFAULT_NORMAL_RANGE_K,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Parameters for baseline calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineParameters {
    /// Percentiles to report, each in `[0, 100]`
    pub percentiles: Vec<f64>,
    /// Normal range is `avg ± k·stddev`
    pub normal_range_k: f64,
    /// Group variation is high when `max |avg − mean| / mean` exceeds this
    pub high_variation_ratio: f64,
    /// Baselines over fewer samples are flagged as unreliable
    pub min_reliable_count: usize,
}

impl Default for BaselineParameters {
    fn default() -> Self {
        Self {
            percentiles: vec![50.0, 90.0, 95.0, 99.0],
            normal_range_k: DEFAULT_NORMAL_RANGE_K,
            high_variation_ratio: 0.5,
            min_reliable_count: 100,
        }
    }
}

impl BaselineParameters {
    pub fn with_percentiles(percentiles: Vec<f64>) -> Self {
        Self {
            percentiles,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(p) = self.percentiles.iter().find(|p| !(0.0..=100.0).contains(*p)) {
            return Err(Error::InvalidParameter(format!(
                "Percentile {p} must be in [0, 100]"
            )));
        }
        if !(self.normal_range_k >= 0.0) {
            return Err(Error::InvalidParameter(
                "Normal range multiplier must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single reported percentile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value: f64,
}

impl PercentileValue {
    /// Label in the `p95` form callers key on
    pub fn label(&self) -> String {
        format!("p{}", self.percentile)
    }
}

/// Baseline of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub avg: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub percentiles: Vec<PercentileValue>,
    pub normal_range: NormalRange,
    /// Fewer samples than [`BaselineParameters::min_reliable_count`]
    pub low_sample_size: bool,
}

impl Baseline {
    /// Value of a reported percentile, if it was requested
    pub fn percentile(&self, p: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|pv| pv.percentile == p)
            .map(|pv| pv.value)
    }
}

/// Baseline of one named group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBaseline {
    pub name: String,
    #[serde(flatten)]
    pub baseline: Baseline,
}

/// Spread of group averages around their unweighted mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupVariation {
    pub mean_of_means: f64,
    pub max_deviation: f64,
    /// `max_deviation / mean_of_means`; absent for a non-positive mean
    pub relative_deviation: Option<f64>,
    pub high_variation: bool,
}

/// Baseline result, with or without grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaselineResult {
    Ungrouped(Baseline),
    Grouped {
        groups: Vec<GroupBaseline>,
        /// Only computed for two or more groups
        variation: Option<GroupVariation>,
    },
}

/// Compute the baseline of a series
#[instrument(skip(series, params), fields(n = series.len()))]
pub fn calculate_baseline(series: &[TimeSeriesPoint], params: &BaselineParameters) -> Result<Baseline> {
    params.validate()?;
    if series.is_empty() {
        return Err(Error::insufficient(1, 0));
    }
    let mut values = values_of(series);
    ensure_finite(values.iter().copied(), "baseline values")?;
    values.sort_by(f64::total_cmp);

    let stats = Statistics::population(&values);
    let percentiles = params
        .percentiles
        .iter()
        .map(|&p| PercentileValue {
            percentile: p,
            value: percentile_sorted(&values, p),
        })
        .collect();

    let low_sample_size = stats.count < params.min_reliable_count;
    if low_sample_size {
        debug!(count = stats.count, "Baseline computed over a small sample");
    }

    Ok(Baseline {
        avg: stats.mean,
        stddev: stats.stddev,
        min: stats.min,
        max: stats.max,
        count: stats.count,
        percentiles,
        normal_range: stats.normal_range(params.normal_range_k),
        low_sample_size,
    })
}

/// Compute per-group baselines and the variation of their averages
///
/// Groups with no samples are skipped. Fails with insufficient data when no
/// group has samples.
pub fn calculate_grouped_baseline<'a, N>(
    groups: impl IntoIterator<Item = (N, &'a [TimeSeriesPoint])>,
    params: &BaselineParameters,
) -> Result<BaselineResult>
where
    N: Into<String>,
{
    let mut baselines = Vec::new();
    for (name, series) in groups {
        let name = name.into();
        if series.is_empty() {
            debug!(group = %name, "Skipping empty group");
            continue;
        }
        baselines.push(GroupBaseline {
            baseline: calculate_baseline(series, params)?,
            name,
        });
    }
    if baselines.is_empty() {
        return Err(Error::insufficient(1, 0));
    }

    let variation = (baselines.len() > 1).then(|| {
        let avgs: Vec<f64> = baselines.iter().map(|g| g.baseline.avg).collect();
        group_variation(&avgs, params.high_variation_ratio)
    });

    Ok(BaselineResult::Grouped {
        groups: baselines,
        variation,
    })
}

fn group_variation(avgs: &[f64], high_ratio: f64) -> GroupVariation {
    let mean = avgs.iter().sum::<f64>() / avgs.len() as f64;
    let max_deviation = avgs
        .iter()
        .map(|a| (a - mean).abs())
        .fold(0.0, f64::max);
    let relative_deviation = (mean > 0.0).then(|| max_deviation / mean);

    GroupVariation {
        mean_of_means: mean,
        max_deviation,
        relative_deviation,
        high_variation: relative_deviation.is_some_and(|r| r > high_ratio),
    }
}
