//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N). Requires `period` bars.

use super::sma::mean;
use super::Calculator;
use crate::domain::{closes, PriceBar};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Band values at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self { period, multiplier }
    }

    /// Bands for every bar from index period-1 onward.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<BollingerBands>, EngineError> {
        self.ensure_len(bars)?;
        Ok(closes(bars)
            .windows(self.period)
            .map(|window| self.bands(window))
            .collect())
    }

    fn bands(&self, window: &[f64]) -> BollingerBands {
        let middle = mean(window);
        let variance = window
            .iter()
            .map(|close| {
                let diff = close - middle;
                diff * diff
            })
            .sum::<f64>()
            / window.len() as f64;
        let offset = self.multiplier * variance.sqrt();

        BollingerBands {
            upper: middle + offset,
            middle,
            lower: middle - offset,
        }
    }
}

impl Default for Bollinger {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Calculator for Bollinger {
    type Output = BollingerBands;

    fn name(&self) -> &'static str {
        "Bollinger"
    }

    fn required_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<BollingerBands, EngineError> {
        self.ensure_len(bars)?;
        let window = closes(&bars[bars.len() - self.period..]);
        Ok(self.bands(&window))
    }
}
