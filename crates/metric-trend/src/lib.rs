//! Trend analysis for metric time series
//!
//! [`TrendAnalyzer::analyze`] runs four steps over one series:
//!
//! 1. [`calculate_linear_trend`]: least squares against sample index, with
//!    direction, r² and a strength band
//! 2. [`detect_seasonality`]: autocorrelation at hourly, daily and weekly
//!    periods derived from the [`SampleInterval`](metric_core::SampleInterval)
//! 3. [`detect_change_points`]: a sliding two-window t-statistic
//! 4. [`generate_forecast`]: the fitted line extended past the end of the
//!    series with a band that widens linearly
//!
//! Every threshold lives in [`TrendParameters`].
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use metric_core::TimeSeriesPoint;
//! use metric_trend::{TrendAnalyzer, TrendDirection};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let series: Vec<_> = (0..60)
//!     .map(|i| TimeSeriesPoint::new(t0 + Duration::minutes(5 * i), 100.0 + 2.0 * i as f64))
//!     .collect();
//!
//! let report = TrendAnalyzer::default().analyze(&series).unwrap();
//! assert_eq!(report.linear_trend.direction, TrendDirection::Increasing);
//! assert!(report.linear_trend.r_squared > 0.99);
//! assert_eq!(report.forecast.len(), 12);
//! ```

pub mod analyzer;
pub mod changepoint;
pub mod forecast;
pub mod linear;
pub mod params;
pub mod seasonality;
pub mod types;

pub use analyzer::TrendAnalyzer;
pub use changepoint::{detect_change_points, window_t_statistic};
pub use forecast::generate_forecast;
pub use linear::{calculate_linear_trend, residual_stddev};
pub use params::{
    ChangePointParameters, ForecastParameters, LinearParameters, SeasonalCandidate,
    SeasonalityParameters, TrendParameters,
};
pub use seasonality::{autocorrelation, detect_seasonality};
pub use types::{
    ChangePoint, ChangeType, ConfidenceInterval, Forecast, LinearTrend, SeasonalPattern,
    Seasonality, TrendDirection, TrendReport, TrendStrength,
};
