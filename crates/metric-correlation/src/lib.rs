//! Correlation analysis between metric time series
//!
//! Series are first aligned on exact timestamp equality
//! ([`align_time_series`]); the aligned values are then correlated with
//! [`pearson_correlation`] at lag 0 and at every lag up to a search radius
//! ([`calculate_lag_correlations`]).
//!
//! Lag sign convention: a positive lag means the second series lags behind
//! the first. Callers convert lags to wall-clock offsets with
//! [`MetricCorrelation::lag_offset`].
//!
//! With the `parallel` feature, [`CorrelationAnalyzer::find_correlations`]
//! evaluates candidates on the rayon thread pool; the ranking is identical
//! either way.

pub mod align;
pub mod analyzer;
pub mod lag;
pub mod pearson;

pub use align::{align_time_series, Aligned};
pub use analyzer::{
    CorrelationAnalyzer, CorrelationParameters, MetricCorrelation, NamedSeries, Relationship,
    Strength,
};
pub use lag::{calculate_lag_correlations, dominant_lag, LagCorrelation, DEFAULT_MAX_LAG};
pub use pearson::pearson_correlation;
