//! Calculator trait.
//!
//! Calculators are pure functions: bar history in, indicator value out.
//! They hold only their parameters, so one instance can be shared across
//! threads and reused for any number of series.

use crate::domain::PriceBar;
use crate::error::EngineError;
use crate::validate::Requirement;

/// A stateless indicator calculator.
///
/// `compute` must only read `bars`; it never depends on anything but the
/// slice and the calculator's parameters. Values at bar t never depend on
/// bars after t.
pub trait Calculator: Send + Sync {
    /// Value produced for the latest bar.
    type Output;

    /// Indicator name used in errors (e.g. "RSI", "MACD").
    fn name(&self) -> &'static str;

    /// Minimum number of bars needed to produce an output.
    fn required_bars(&self) -> usize;

    /// Compute the indicator at the latest bar.
    fn compute(&self, bars: &[PriceBar]) -> Result<Self::Output, EngineError>;

    fn requirement(&self) -> Requirement {
        Requirement::new(self.name(), self.required_bars())
    }

    /// Fail with `InsufficientData` when `bars` is too short.
    fn ensure_len(&self, bars: &[PriceBar]) -> Result<(), EngineError> {
        self.requirement().check(bars.len())
    }
}
