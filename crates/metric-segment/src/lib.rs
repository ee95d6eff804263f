//! Comparison of pre-aggregated metric segments
//!
//! A segment is one value of a facet (a region, a host, an endpoint) with its
//! own average, count and spread. [`rank_segments`] orders segments by
//! average; [`analyze_segment_differences`] looks at the spread of the
//! averages themselves, weighting every segment equally.
//!
//! # Example
//!
//! ```rust
//! use metric_segment::{SegmentComparator, SegmentStats};
//!
//! let segments = vec![
//!     SegmentStats::new("us-east", 120.0, 5_000, 15.0),
//!     SegmentStats::new("eu-west", 80.0, 3_000, 10.0),
//!     SegmentStats::new("ap-south", 40.0, 2_000, 8.0),
//! ];
//!
//! let report = SegmentComparator::default().compare(&segments).unwrap();
//! assert_eq!(report.segments[0].stats.name, "us-east");
//! assert_eq!(report.analysis.overall_mean, 80.0);
//! assert_eq!(report.analysis.range_ratio, Some(3.0));
//! ```

pub mod analysis;
pub mod comparator;
pub mod insights;
pub mod rank;
pub mod types;

pub use analysis::{analyze_segment_differences, SegmentAnalysis, SegmentParameters, TopShare};
pub use comparator::{SegmentComparator, SegmentReport};
pub use insights::{generate_insights, SegmentInsight};
pub use rank::rank_segments;
pub use types::{RankedSegment, SegmentStats};
