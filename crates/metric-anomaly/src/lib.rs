//! Anomaly detection for metric time series
//!
//! Several independent [`DetectionMethod`]s score the same series:
//!
//! - [`ZScoreMethod`]: distance from the global mean in standard deviations
//! - [`IqrMethod`]: Tukey fences around the quartiles
//! - [`MovingAverageMethod`]: deviation from a trailing window mean
//!
//! [`deduplicate_and_score`] merges candidates that fall on the same
//! timestamp and boosts their score by `sqrt(k)` for `k` agreeing methods.
//! All methods map a single `sensitivity ∈ [0, 1]` to their own threshold.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use metric_anomaly::AnomalyDetector;
//! use metric_core::TimeSeriesPoint;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let series: Vec<_> = (0..40)
//!     .map(|i| {
//!         let value = if i == 30 { 90.0 } else { 10.0 };
//!         TimeSeriesPoint::new(t0 + Duration::minutes(5 * i), value)
//!     })
//!     .collect();
//!
//! let report = AnomalyDetector::default().detect(&series).unwrap();
//! assert_eq!(report.anomalies.len(), 1);
//! assert_eq!(report.anomalies[0].value, 90.0);
//! ```

pub mod dedup;
pub mod detector;
pub mod iqr;
pub mod moving_average;
pub mod traits;
pub mod types;
pub mod zscore;

pub use dedup::{deduplicate_and_score, severity_counts};
pub use detector::{AnomalyDetector, AnomalyDetectorBuilder, AnomalyParameters, Method};
pub use iqr::{IqrFences, IqrMethod};
pub use moving_average::MovingAverageMethod;
pub use traits::DetectionMethod;
pub use types::{Anomaly, AnomalyKind, AnomalyReport};
pub use zscore::ZScoreMethod;
