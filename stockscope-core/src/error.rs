//! Engine error types.
//!
//! Every calculator and the snapshot builder report failures through
//! [`EngineError`]. Each variant names the indicator that failed so a caller
//! can decide whether to retry with more history or degrade.

use thiserror::Error;

/// What is wrong with a malformed bar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesDefect {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} is negative ({value})")]
    Negative { field: &'static str, value: f64 },

    #[error("low {low} is above high {high}")]
    LowAboveHigh { low: f64, high: f64 },

    #[error("timestamp does not increase over the previous bar")]
    NonIncreasingTimestamp,
}

/// Errors raised while computing indicators or building a snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed input. Not retryable.
    #[error("invalid series at bar {index}: {defect}")]
    InvalidSeries { index: usize, defect: SeriesDefect },

    /// The series is shorter than the lookback an indicator needs.
    #[error("insufficient data for {indicator}: required {required} bars, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    /// A calculator produced a non-finite value. Always a bug.
    #[error("computation failed for {indicator}: {detail}")]
    Computation {
        indicator: &'static str,
        detail: String,
    },
}

impl EngineError {
    /// Name of the indicator that failed, if the error is tied to one.
    pub fn indicator(&self) -> Option<&'static str> {
        match self {
            EngineError::InvalidSeries { .. } => None,
            EngineError::InsufficientData { indicator, .. }
            | EngineError::Computation { indicator, .. } => Some(indicator),
        }
    }

    /// Whether retrying with a longer history could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::InsufficientData { .. })
    }
}

/// Return `value` unchanged, or a [`EngineError::Computation`] naming `field`.
pub(crate) fn ensure_finite(
    indicator: &'static str,
    field: &str,
    value: f64,
) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::Computation {
            indicator,
            detail: format!("{field} evaluated to {value}"),
        })
    }
}
