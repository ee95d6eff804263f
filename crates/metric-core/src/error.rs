//! Error types for metric time-series analysis
//!
//! Provides a unified error type for all metric-analysis crates.

use thiserror::Error;

/// Core error type for analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to an analyzer
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed input data (a caller bug, not a data condition)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an insufficient-data error
    pub fn insufficient(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error is the "not enough samples" condition
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

/// Fail with [`Error::InsufficientData`] when `actual < expected`
pub fn require_len(expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(Error::insufficient(expected, actual));
    }
    Ok(())
}

/// Fail with [`Error::InvalidInput`] when any value is NaN or infinite
pub fn ensure_finite(values: impl IntoIterator<Item = f64>, context: &str) -> Result<()> {
    if values.into_iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}
