//! Seasonality detection by autocorrelation at fixed candidate periods

use crate::params::SeasonalityParameters;
use crate::types::Seasonality;
use metric_core::{ensure_finite, require_len, Result};
use tracing::{debug, instrument, trace};

/// Sample autocorrelation at `lag`
///
/// `Σ_{i≥lag} (x_i − μ)(x_{i−lag} − μ) / Σ (x_i − μ)²`. The normalisation
/// uses the full series, so longer lags are damped by `(n − lag) / n`.
/// Returns 0 for a constant series or when `lag >= n`.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if n == 0 || lag >= n {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;

    let denominator: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    if denominator == 0.0 {
        return 0.0;
    }

    let numerator: f64 = values[lag..]
        .iter()
        .zip(values)
        .map(|(a, b)| (a - mean) * (b - mean))
        .sum();

    numerator / denominator
}

/// Pick the candidate period with the highest autocorrelation
///
/// A candidate is only tested when the series spans two full cycles. With
/// the half-period peak check on, a period whose autocorrelation does not
/// exceed that at half the period is skipped: it sits on the slope of a
/// longer cycle rather than on a peak of its own.
#[instrument(skip(values, params), fields(n = values.len()))]
pub fn detect_seasonality(values: &[f64], params: &SeasonalityParameters) -> Result<Seasonality> {
    require_len(params.min_samples, values.len())?;
    ensure_finite(values.iter().copied(), "seasonality values")?;

    let mut best = Seasonality::none();
    for candidate in &params.candidates {
        let period = candidate.period;
        if period == 0 || values.len() < 2 * period {
            trace!(period, "Series too short for candidate period");
            continue;
        }

        let acf = autocorrelation(values, period);
        if params.half_period_peak_check && period / 2 > 0 {
            let half = autocorrelation(values, period / 2);
            if acf <= half {
                trace!(period, acf, half, "Not a peak, skipping");
                continue;
            }
        }

        trace!(period, acf, "Candidate autocorrelation");
        if acf > best.strength {
            best = Seasonality {
                detected: false,
                period,
                strength: acf,
                pattern: Some(candidate.pattern),
            };
        }
    }

    if best.pattern.is_some() && best.strength >= params.threshold {
        best.detected = true;
        debug!(period = best.period, strength = best.strength, "Seasonality detected");
        Ok(best)
    } else {
        Ok(Seasonality::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SeasonalCandidate;
    use crate::types::SeasonalPattern;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn wave(len: usize, period: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 50.0 + 10.0 * (2.0 * PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn test_autocorrelation_edges() {
        assert_eq!(autocorrelation(&[], 1), 0.0);
        assert_eq!(autocorrelation(&[3.0; 10], 2), 0.0);
        assert_eq!(autocorrelation(&[1.0, 2.0, 3.0], 3), 0.0);
        assert_relative_eq!(autocorrelation(&[1.0, 2.0, 3.0, 4.0], 0), 1.0);
    }

    #[test]
    fn test_autocorrelation_of_clean_cycle() {
        // Four full cycles: cos(2π)·(1 − 1/4)
        let values = wave(48, 12);
        assert_relative_eq!(autocorrelation(&values, 12), 0.75, epsilon = 1e-9);
        assert!(autocorrelation(&values, 6) < -0.5);
    }

    #[test]
    fn test_hourly_cycle() {
        let values = wave(48, 12);
        let found = detect_seasonality(&values, &SeasonalityParameters::default()).unwrap();
        assert!(found.detected);
        assert_eq!(found.period, 12);
        assert_eq!(found.pattern, Some(SeasonalPattern::Hourly));
    }

    #[test]
    fn test_daily_cycle_is_not_mistaken_for_hourly() {
        let values = wave(4 * 288, 288);
        let found = detect_seasonality(&values, &SeasonalityParameters::default()).unwrap();
        assert!(found.detected);
        assert_eq!(found.period, 288);
        assert_eq!(found.pattern, Some(SeasonalPattern::Daily));

        // Without the peak check the hourly lag sits high on the daily slope
        let params = SeasonalityParameters {
            half_period_peak_check: false,
            ..Default::default()
        };
        let found = detect_seasonality(&values, &params).unwrap();
        assert_eq!(found.period, 12);
    }

    #[test]
    fn test_flat_series_is_not_seasonal() {
        let found = detect_seasonality(&[7.0; 100], &SeasonalityParameters::default()).unwrap();
        assert_eq!(found, Seasonality::none());
    }

    #[test]
    fn test_threshold() {
        let params = SeasonalityParameters {
            threshold: 0.8,
            ..Default::default()
        };
        // 0.75 at four cycles falls short
        let found = detect_seasonality(&wave(48, 12), &params).unwrap();
        assert!(!found.detected);
    }

    #[test]
    fn test_custom_candidates() {
        let params = SeasonalityParameters {
            candidates: vec![SeasonalCandidate {
                period: 7,
                pattern: SeasonalPattern::Weekly,
            }],
            ..Default::default()
        };
        let found = detect_seasonality(&wave(70, 7), &params).unwrap();
        assert!(found.detected);
        assert_eq!(found.period, 7);
    }

    #[test]
    fn test_too_short() {
        let err = detect_seasonality(&wave(47, 12), &SeasonalityParameters::default()).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
