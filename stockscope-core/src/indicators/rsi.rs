//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and average losses:
//! avg[t] = (avg[t-1] * (period - 1) + current) / period,
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Requires period + 1 bars (period close-to-close deltas).
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; both zero → 50.

use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }

    /// RSI for every bar from index `period` onward.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<f64>, EngineError> {
        self.ensure_len(bars)?;

        let period = self.period as f64;
        let mut gains = Vec::with_capacity(bars.len() - 1);
        let mut losses = Vec::with_capacity(bars.len() - 1);
        for pair in bars.windows(2) {
            let delta = pair[1].close - pair[0].close;
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }

        // Seed: simple mean of the first `period` gains and losses
        let mut avg_gain = gains[..self.period].iter().sum::<f64>() / period;
        let mut avg_loss = losses[..self.period].iter().sum::<f64>() / period;

        let mut result = Vec::with_capacity(bars.len() - self.period);
        result.push(rsi_from_averages(avg_gain, avg_loss));

        for (gain, loss) in gains[self.period..].iter().zip(&losses[self.period..]) {
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            result.push(rsi_from_averages(avg_gain, avg_loss));
        }

        Ok(result)
    }
}

impl Calculator for Rsi {
    type Output = f64;

    fn name(&self) -> &'static str {
        "RSI"
    }

    fn required_bars(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<f64, EngineError> {
        let series = self.series(bars)?;
        series.last().copied().ok_or(EngineError::InsufficientData {
            indicator: self.name(),
            required: self.required_bars(),
            actual: bars.len(),
        })
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        (100.0 - 100.0 / (1.0 + avg_gain / avg_loss)).clamp(0.0, 100.0)
    }
}
