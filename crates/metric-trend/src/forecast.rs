//! Linear extrapolation beyond the end of a series

use crate::linear::residual_stddev;
use crate::params::ForecastParameters;
use crate::types::{ConfidenceInterval, Forecast, LinearTrend};
use metric_core::{require_len, values_of, Result, SampleInterval, TimeSeriesPoint};
use tracing::{instrument, trace};

/// Extend `trend` `params.horizon` steps past the last sample
///
/// Step `i` (1-based) sits at index `n + i − 1` and at `last + i·interval`.
/// The band is `±z·σ·(1 + growth·i)` with σ the population standard deviation
/// of the in-sample residuals. It widens linearly with the horizon as a simple
/// uncertainty model rather than a proper prediction interval.
#[instrument(skip(series, trend, params), fields(n = series.len(), horizon = params.horizon))]
pub fn generate_forecast(
    series: &[TimeSeriesPoint],
    trend: &LinearTrend,
    params: &ForecastParameters,
    interval: SampleInterval,
) -> Result<Forecast> {
    require_len(1, series.len())?;
    let last = series[series.len() - 1].timestamp;
    let n = series.len();
    let sigma = residual_stddev(&values_of(series), trend);
    trace!(sigma, "Residual standard deviation");

    let mut forecast = Forecast {
        values: Vec::with_capacity(params.horizon),
        confidence: Vec::with_capacity(params.horizon),
    };
    for step in 1..=params.horizon {
        let timestamp = last + interval.steps(step as i64);
        let value = trend.predict((n + step - 1) as f64);
        let margin = params.margin(sigma, step);
        forecast.values.push(TimeSeriesPoint::new(timestamp, value));
        forecast.confidence.push(ConfidenceInterval {
            timestamp,
            lower: value - margin,
            upper: value + margin,
        });
    }

    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::calculate_linear_trend;
    use crate::params::LinearParameters;
    use approx::assert_relative_eq;
    use metric_core::test_data;

    fn fit(series: &[TimeSeriesPoint]) -> LinearTrend {
        calculate_linear_trend(&values_of(series), &LinearParameters::default()).unwrap()
    }

    #[test]
    fn test_exact_ramp_has_zero_width() {
        let series = test_data::ramp(20, 5.0, 2.0);
        let trend = fit(&series);
        let forecast =
            generate_forecast(&series, &trend, &ForecastParameters::default(), SampleInterval::default())
                .unwrap();

        assert_eq!(forecast.len(), 12);
        // Last sample is 5 + 2·19 = 43; one step further is 45
        assert_relative_eq!(forecast.values[0].value, 45.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.values[11].value, 67.0, epsilon = 1e-9);
        assert_eq!(forecast.values[0].timestamp, test_data::timestamp(20));
        assert_eq!(forecast.values[11].timestamp, test_data::timestamp(31));
        for ci in &forecast.confidence {
            assert_relative_eq!(ci.width(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_band_widens() {
        let series = test_data::noise(100, 10.0, 2.0, 3);
        let trend = fit(&series);
        let params = ForecastParameters {
            horizon: 24,
            ..Default::default()
        };
        let forecast =
            generate_forecast(&series, &trend, &params, SampleInterval::default()).unwrap();

        assert_eq!(forecast.confidence.len(), 24);
        let widths: Vec<f64> = forecast.confidence.iter().map(ConfidenceInterval::width).collect();
        assert!(widths[0] > 0.0);
        assert!(widths.windows(2).all(|w| w[1] >= w[0]));

        let sigma = residual_stddev(&values_of(&series), &trend);
        assert_relative_eq!(widths[0], 2.0 * 1.96 * sigma * 1.1, epsilon = 1e-9);
        for (point, ci) in forecast.values.iter().zip(&forecast.confidence) {
            assert_eq!(point.timestamp, ci.timestamp);
            assert!(ci.lower <= point.value && point.value <= ci.upper);
        }
    }

    #[test]
    fn test_zero_horizon() {
        let series = test_data::ramp(5, 0.0, 1.0);
        let params = ForecastParameters {
            horizon: 0,
            ..Default::default()
        };
        let forecast =
            generate_forecast(&series, &fit(&series), &params, SampleInterval::default()).unwrap();
        assert!(forecast.is_empty());
    }
}
