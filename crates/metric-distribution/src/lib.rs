//! Descriptive statistics and distribution characterization
//!
//! - [`DistributionStats`]: population moments, median, mode
//! - [`create_histogram`]: equal-width buckets whose counts always sum to the
//!   input length
//! - [`detect_distribution_type`]: shape classification by skewness and
//!   excess kurtosis
//! - [`DistributionAnalyzer`]: all of the above plus coefficient-of-variation
//!   insights
//! - [`calculate_baseline`] / [`calculate_grouped_baseline`]: summary
//!   statistics with percentiles and a normal range
//!
//! # Example
//!
//! ```rust
//! use metric_distribution::{DistributionAnalyzer, DistributionType, Variability};
//!
//! let report = DistributionAnalyzer::default().analyze(&[10.0; 5]).unwrap();
//! assert_eq!(report.stats.stddev, 0.0);
//! assert_eq!(report.distribution_type, DistributionType::Normal);
//! assert_eq!(report.variability, Variability::Low);
//! ```

pub mod analyzer;
pub mod baseline;
pub mod histogram;
pub mod shape;
pub mod stats;

pub use analyzer::{
    CentralTendency, DistributionAnalyzer, DistributionParameters, DistributionReport,
    Variability,
};
pub use baseline::{
    calculate_baseline, calculate_grouped_baseline, Baseline, BaselineParameters, BaselineResult,
    GroupBaseline, GroupVariation, PercentileValue,
};
pub use histogram::{create_histogram, Histogram, HistogramBucket, DEFAULT_BUCKETS};
pub use shape::{detect_distribution_type, DistributionType, ShapeThresholds};
pub use stats::{
    coefficient_of_variation, mode, percentile, percentile_sorted, DistributionStats,
};
