//! Distribution shape classification from skewness and kurtosis

use crate::stats::DistributionStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionType {
    Normal,
    RightSkewed,
    LeftSkewed,
    /// Heavy tails
    Leptokurtic,
    /// Light tails
    Platykurtic,
    NonNormal,
}

impl DistributionType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::RightSkewed => "right-skewed",
            Self::LeftSkewed => "left-skewed",
            Self::Leptokurtic => "leptokurtic",
            Self::Platykurtic => "platykurtic",
            Self::NonNormal => "non-normal",
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thresholds for shape classification
///
/// Values between the normal band and the skew/kurtosis bands are
/// deliberately left ambiguous and classify as non-normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeThresholds {
    /// `|skewness|` below this (together with kurtosis) reads as normal
    pub normal_skewness: f64,
    /// `|kurtosis|` below this (together with skewness) reads as normal
    pub normal_kurtosis: f64,
    /// `|skewness|` above this reads as skewed
    pub skewness: f64,
    /// `|kurtosis|` above this reads as lepto-/platykurtic
    pub kurtosis: f64,
}

impl Default for ShapeThresholds {
    fn default() -> Self {
        Self {
            normal_skewness: 0.5,
            normal_kurtosis: 0.5,
            skewness: 1.0,
            kurtosis: 1.0,
        }
    }
}

/// Classify with the default thresholds
pub fn detect_distribution_type(stats: &DistributionStats) -> DistributionType {
    ShapeThresholds::default().classify(stats)
}

impl ShapeThresholds {
    /// Checks run in a fixed order; the first match wins.
    pub fn classify(&self, stats: &DistributionStats) -> DistributionType {
        let (skew, kurt) = (stats.skewness, stats.kurtosis);

        if skew.abs() < self.normal_skewness && kurt.abs() < self.normal_kurtosis {
            DistributionType::Normal
        } else if skew > self.skewness {
            DistributionType::RightSkewed
        } else if skew < -self.skewness {
            DistributionType::LeftSkewed
        } else if kurt > self.kurtosis {
            DistributionType::Leptokurtic
        } else if kurt < -self.kurtosis {
            DistributionType::Platykurtic
        } else {
            DistributionType::NonNormal
        }
    }
}
