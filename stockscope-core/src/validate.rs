//! Series validation — runs before any calculator sees the data.
//!
//! Structural checks (finite, non-negative fields, `low <= high`, strictly
//! increasing timestamps) come first, so a malformed series is reported as
//! malformed even when it is also too short.

use crate::domain::PriceBar;
use crate::error::{EngineError, SeriesDefect};

/// Minimum number of bars an indicator (or indicator set) needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub indicator: &'static str,
    pub bars: usize,
}

impl Requirement {
    pub const fn new(indicator: &'static str, bars: usize) -> Self {
        Self { indicator, bars }
    }

    /// Fail with `InsufficientData` if `actual` is below the requirement.
    pub fn check(&self, actual: usize) -> Result<(), EngineError> {
        if actual < self.bars {
            return Err(EngineError::InsufficientData {
                indicator: self.indicator,
                required: self.bars,
                actual,
            });
        }
        Ok(())
    }
}

/// Check a single bar in isolation.
pub fn check_bar(bar: &PriceBar) -> Result<(), SeriesDefect> {
    for (field, value) in bar.fields() {
        if !value.is_finite() {
            return Err(SeriesDefect::NonFinite { field });
        }
        if value < 0.0 {
            return Err(SeriesDefect::Negative { field, value });
        }
    }
    if bar.low > bar.high {
        return Err(SeriesDefect::LowAboveHigh {
            low: bar.low,
            high: bar.high,
        });
    }
    Ok(())
}

/// Validate structure and length of a series.
pub fn validate_series(bars: &[PriceBar], requirement: Requirement) -> Result<(), EngineError> {
    for (index, bar) in bars.iter().enumerate() {
        check_bar(bar).map_err(|defect| EngineError::InvalidSeries { index, defect })?;

        if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
            return Err(EngineError::InvalidSeries {
                index,
                defect: SeriesDefect::NonIncreasingTimestamp,
            });
        }
    }

    requirement.check(bars.len())
}
