//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = close[t] * k + EMA[t-1] * (1 - k), k = 2 / (period + 1).
//! Seed: EMA[period-1] = SMA of the first `period` closes.

use super::sma::mean;
use super::Calculator;
use crate::domain::{closes, PriceBar};
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing multiplier `2 / (period + 1)`.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    /// EMA for every bar from index period-1 onward.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<f64>, EngineError> {
        self.ensure_len(bars)?;
        Ok(ema_of_series(&closes(bars), self.period))
    }
}

impl Calculator for Ema {
    type Output = f64;

    fn name(&self) -> &'static str {
        "EMA"
    }

    fn required_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<f64, EngineError> {
        let series = self.series(bars)?;
        series
            .last()
            .copied()
            .ok_or(EngineError::InsufficientData {
                indicator: self.name(),
                required: self.period,
                actual: bars.len(),
            })
    }
}

/// EMA of a pre-extracted series.
///
/// Used directly by composed indicators (MACD and its signal line). Returns
/// `values.len() - period + 1` values, empty if the input is too short.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = mean(&values[..period]);

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        let ema = value * k + prev * (1.0 - k);
        result.push(ema);
        prev = ema;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_close() {
        let bars = make_series(&[100.0, 200.0, 300.0]);
        let result = Ema::new(1).series(&bars).unwrap();
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn ema_3_known_values() {
        // k = 2/(3+1) = 0.5
        // Seed at index 2: SMA(10,11,12) = 11.0
        // EMA[3] = 0.5*13 + 0.5*11.0 = 12.0
        // EMA[4] = 0.5*14 + 0.5*12.0 = 13.0
        let bars = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = Ema::new(3).series(&bars).unwrap();

        assert_eq!(result.len(), 3);
        assert_approx(result[0], 11.0, DEFAULT_EPSILON);
        assert_approx(result[1], 12.0, DEFAULT_EPSILON);
        assert_approx(result[2], 13.0, DEFAULT_EPSILON);
        assert_approx(Ema::new(3).compute(&bars).unwrap(), 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_multiplier() {
        assert_eq!(Ema::new(12).multiplier(), 2.0 / 13.0);
        assert_eq!(Ema::new(1).multiplier(), 1.0);
    }

    #[test]
    fn ema_is_bit_identical_on_recompute() {
        let bars = make_series(&[44.0, 44.34, 44.09, 43.61, 44.33, 44.83, 45.10, 45.42]);
        let ema = Ema::new(4);
        let a = ema.series(&bars).unwrap();
        let b = ema.series(&bars).unwrap();
        let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn ema_too_few_bars() {
        let bars = make_series(&[10.0, 11.0]);
        assert!(matches!(
            Ema::new(3).compute(&bars),
            Err(EngineError::InsufficientData {
                indicator: "EMA",
                required: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn ema_of_series_matches_calculator() {
        let bars = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(
            Ema::new(3).series(&bars).unwrap(),
            ema_of_series(&closes, 3)
        );
    }
}
