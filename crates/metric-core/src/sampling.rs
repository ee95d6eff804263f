//! Fixed sample spacing assumed by periodicity and forecast logic

use crate::error::{Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing between consecutive samples of a series
///
/// Defaults to 5 minutes. Window sizes, forecast horizons and seasonality
/// candidates are all expressed in samples of this interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SampleInterval {
    seconds: i64,
}

impl SampleInterval {
    /// Create an interval, rejecting zero or negative spacing
    pub fn new(interval: Duration) -> Result<Self> {
        let seconds = interval.num_seconds();
        if seconds <= 0 {
            return Err(Error::InvalidParameter(format!(
                "Sample interval must be positive, got {seconds}s"
            )));
        }
        Ok(Self { seconds })
    }

    pub fn from_minutes(minutes: i64) -> Result<Self> {
        Self::new(Duration::minutes(minutes))
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }

    /// Interval length in (fractional) minutes
    pub fn minutes(&self) -> f64 {
        self.seconds as f64 / 60.0
    }

    /// Whole number of samples that fit in `span`
    pub fn samples_in(&self, span: Duration) -> usize {
        let span = span.num_seconds();
        if span <= 0 {
            0
        } else {
            (span / self.seconds) as usize
        }
    }

    /// Duration of `steps` samples
    pub fn steps(&self, steps: i64) -> Duration {
        Duration::seconds(self.seconds * steps)
    }

    /// Samples per hour (12 at the default interval)
    pub fn samples_per_hour(&self) -> usize {
        self.samples_in(Duration::hours(1))
    }

    /// Samples per day (288 at the default interval)
    pub fn samples_per_day(&self) -> usize {
        self.samples_in(Duration::days(1))
    }

    /// Samples per week (2016 at the default interval)
    pub fn samples_per_week(&self) -> usize {
        self.samples_in(Duration::weeks(1))
    }
}

impl Default for SampleInterval {
    fn default() -> Self {
        Self { seconds: 5 * 60 }
    }
}

impl TryFrom<i64> for SampleInterval {
    type Error = Error;

    fn try_from(seconds: i64) -> Result<Self> {
        Self::new(Duration::seconds(seconds))
    }
}

impl From<SampleInterval> for i64 {
    fn from(interval: SampleInterval) -> Self {
        interval.seconds
    }
}

impl fmt::Display for SampleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds % 60 == 0 {
            write!(f, "{} minutes", self.seconds / 60)
        } else {
            write!(f, "{} seconds", self.seconds)
        }
    }
}
