//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the last `period` closes.
//! Requires `period` bars; first value belongs to bar period-1.

use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Rolling SMA for every bar from index period-1 onward.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<f64>, EngineError> {
        self.ensure_len(bars)?;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        Ok(sma_of_series(&closes, self.period))
    }
}

impl Calculator for Sma {
    type Output = f64;

    fn name(&self) -> &'static str {
        "SMA"
    }

    fn required_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<f64, EngineError> {
        self.ensure_len(bars)?;
        let window = &bars[bars.len() - self.period..];
        Ok(window.iter().map(|b| b.close).sum::<f64>() / self.period as f64)
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rolling mean of an arbitrary series.
///
/// Returns `values.len() - period + 1` values (empty if the input is shorter
/// than `period`). Each window sum is recomputed from scratch, so the result
/// is the exact mean of its window rather than a running-sum approximation.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    values.windows(period).map(mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let bars = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = Sma::new(5).series(&bars).unwrap();

        assert_eq!(result.len(), 3);
        // mean(10,11,12,13,14) = 12.0
        assert_approx(result[0], 12.0, DEFAULT_EPSILON);
        assert_approx(result[1], 13.0, DEFAULT_EPSILON);
        assert_approx(result[2], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_latest_matches_last_window() {
        let closes: Vec<f64> = (10..=24).map(f64::from).collect();
        let bars = make_series(&closes);
        assert_eq!(Sma::new(5).compute(&bars).unwrap(), 22.0);
    }

    #[test]
    fn sma_1_is_close() {
        let bars = make_series(&[100.0, 200.0, 300.0]);
        let result = Sma::new(1).series(&bars).unwrap();
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sma_too_few_bars() {
        let bars = make_series(&[10.0, 11.0]);
        let err = Sma::new(5).compute(&bars).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientData {
                indicator: "SMA",
                required: 5,
                actual: 2,
            }
        );
    }

    #[test]
    fn sma_of_series_short_input_is_empty() {
        assert!(sma_of_series(&[1.0, 2.0], 3).is_empty());
        assert!(sma_of_series(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }
}
