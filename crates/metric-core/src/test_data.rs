//! Synthetic series generators for tests
//!
//! Every generator is seeded so results are reproducible across runs.

use crate::types::TimeSeriesPoint;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Fixed origin for generated timestamps
pub fn origin() -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200, 0).single().unwrap_or_default()
}

/// Timestamp of sample `index` at a 5 minute spacing
pub fn timestamp(index: usize) -> DateTime<Utc> {
    origin() + Duration::minutes(5 * index as i64)
}

/// Build a 5-minute-spaced series from raw values
pub fn series_from(values: &[f64]) -> Vec<TimeSeriesPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSeriesPoint::new(timestamp(i), v))
        .collect()
}

/// `len` samples of a constant level
pub fn flat(len: usize, level: f64) -> Vec<TimeSeriesPoint> {
    series_from(&vec![level; len])
}

/// A flat series with one value replaced at `index`
pub fn flat_with_spike(len: usize, level: f64, index: usize, spike: f64) -> Vec<TimeSeriesPoint> {
    let mut values = vec![level; len];
    if index < len {
        values[index] = spike;
    }
    series_from(&values)
}

/// `start, start + step, ...`
pub fn ramp(len: usize, start: f64, step: f64) -> Vec<TimeSeriesPoint> {
    let values: Vec<f64> = (0..len).map(|i| start + step * i as f64).collect();
    series_from(&values)
}

/// A sinusoid of the given period (in samples) with optional gaussian noise
pub fn sinusoid(len: usize, period: usize, level: f64, amplitude: f64, noise: f64, seed: u64) -> Vec<TimeSeriesPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, noise.max(0.0)).ok();
    let values: Vec<f64> = (0..len)
        .map(|i| {
            let phase = 2.0 * std::f64::consts::PI * i as f64 / period as f64;
            let jitter = normal.map(|n| n.sample(&mut rng)).unwrap_or(0.0);
            level + amplitude * phase.sin() + jitter
        })
        .collect();
    series_from(&values)
}

/// A level shift from `before` to `after` at index `at`, with gaussian noise
pub fn step(len: usize, at: usize, before: f64, after: f64, noise: f64, seed: u64) -> Vec<TimeSeriesPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, noise.max(0.0)).ok();
    let values: Vec<f64> = (0..len)
        .map(|i| {
            let level = if i < at { before } else { after };
            level + normal.map(|n| n.sample(&mut rng)).unwrap_or(0.0)
        })
        .collect();
    series_from(&values)
}

/// Gaussian white noise around a level
pub fn noise(len: usize, level: f64, sigma: f64, seed: u64) -> Vec<TimeSeriesPoint> {
    step(len, len, level, level, sigma, seed)
}
