//! Full trend pipeline over one series

use crate::changepoint::detect_change_points;
use crate::forecast::generate_forecast;
use crate::linear::calculate_linear_trend;
use crate::params::TrendParameters;
use crate::seasonality::detect_seasonality;
use crate::types::{Seasonality, TrendReport};
use metric_core::{ensure_finite, ordered, require_len, values_of, Result, TimeSeriesPoint};
use tracing::{debug, instrument};

/// Fits a trend, looks for seasonality and level shifts, and forecasts
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    params: TrendParameters,
}

impl TrendAnalyzer {
    pub fn new(params: TrendParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn strict() -> Result<Self> {
        Self::new(TrendParameters::strict())
    }

    pub fn relaxed() -> Result<Self> {
        Self::new(TrendParameters::relaxed())
    }

    pub fn params(&self) -> &TrendParameters {
        &self.params
    }

    /// Analyze a series of at least two points
    ///
    /// Seasonality reads as not detected and the change-point list is empty
    /// when the series is too short for them; the linear fit and forecast are
    /// always present.
    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn analyze(&self, series: &[TimeSeriesPoint]) -> Result<TrendReport> {
        require_len(2, series.len())?;
        ensure_finite(series.iter().map(|p| p.value), "trend series")?;
        let series = ordered(series);
        let values = values_of(&series);

        let linear_trend = calculate_linear_trend(&values, &self.params.linear)?;

        let seasonality = match detect_seasonality(&values, &self.params.seasonality) {
            Err(e) if e.is_insufficient_data() => {
                debug!(%e, "Skipping seasonality");
                Seasonality::none()
            }
            other => other?,
        };

        let change_points = match detect_change_points(&series, &self.params.change_points) {
            Err(e) if e.is_insufficient_data() => {
                debug!(%e, "Skipping change points");
                Vec::new()
            }
            other => other?,
        };

        let forecast =
            generate_forecast(&series, &linear_trend, &self.params.forecast, self.params.interval)?;

        debug!(
            direction = %linear_trend.direction,
            r_squared = linear_trend.r_squared,
            seasonal = seasonality.detected,
            change_points = change_points.len(),
            "Trend analysis complete"
        );

        Ok(TrendReport {
            linear_trend,
            seasonality,
            change_points,
            forecast,
        })
    }
}
