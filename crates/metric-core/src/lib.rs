//! Core types for metric time-series analysis
//!
//! This crate provides the foundation shared by the analysis crates:
//!
//! - [`TimeSeriesPoint`] and population [`Statistics`]
//! - A unified [`Error`] type with a typed insufficient-data condition
//! - [`SampleInterval`], from which window sizes, forecast horizons and
//!   seasonality candidates are derived
//! - [`extract_series`], which turns raw store samples into an ordered,
//!   duplicate-free series
//!
//! Every function here is pure: no I/O, no shared state.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use metric_core::{extract_series, MissingValuePolicy, RawSample, Statistics};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let raw = vec![
//!     RawSample::new(t0, Some(1.0)),
//!     RawSample::new(t0 + Duration::minutes(5), None),
//!     RawSample::new(t0 + Duration::minutes(10), Some(3.0)),
//! ];
//!
//! let series = extract_series(&raw, MissingValuePolicy::Drop);
//! let stats = Statistics::of_series(&series);
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.mean, 2.0);
//! ```

pub mod error;
pub mod extract;
pub mod sampling;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data;

// Re-export core types
pub use error::{ensure_finite, require_len, Error, Result};
pub use extract::{extract_series, MissingValuePolicy, RawSample};
pub use sampling::SampleInterval;
pub use types::{
    calculate_window_stats, is_ordered, ordered, values_of, NormalRange, Statistics,
    TimeSeriesPoint, DEFAULT_NORMAL_RANGE_K,
};
