//! Stochastic Oscillator.
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over
//! `k_period` bars, 50 when the range is flat. %D = SMA(%K, d_period).
//! Both clamped to [0, 100]. Requires k_period + d_period - 1 bars.

use super::sma::mean;
use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        assert!(k_period >= 1, "Stochastic %K period must be >= 1");
        assert!(d_period >= 1, "Stochastic %D period must be >= 1");
        Self { k_period, d_period }
    }

    /// %K for every bar from index k_period-1 onward.
    pub fn k_series(&self, bars: &[PriceBar]) -> Result<Vec<f64>, EngineError> {
        if bars.len() < self.k_period {
            return Err(EngineError::InsufficientData {
                indicator: self.name(),
                required: self.k_period,
                actual: bars.len(),
            });
        }
        Ok(bars.windows(self.k_period).map(percent_k).collect())
    }

    /// (%K, %D) for every bar where %D is defined.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<StochasticValue>, EngineError> {
        self.ensure_len(bars)?;
        let k = self.k_series(bars)?;
        Ok(k.windows(self.d_period)
            .map(|window| StochasticValue {
                k: window[window.len() - 1],
                d: mean(window).clamp(0.0, 100.0),
            })
            .collect())
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new(14, 3)
    }
}

impl Calculator for Stochastic {
    type Output = StochasticValue;

    fn name(&self) -> &'static str {
        "Stochastic"
    }

    fn required_bars(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<StochasticValue, EngineError> {
        self.ensure_len(bars)?;
        // Only the trailing window that feeds the latest %D is needed
        let tail = &bars[bars.len() - self.required_bars()..];
        let series = self.series(tail)?;
        series.last().copied().ok_or(EngineError::InsufficientData {
            indicator: self.name(),
            required: self.required_bars(),
            actual: bars.len(),
        })
    }
}

/// %K of the last bar in `window`.
fn percent_k(window: &[PriceBar]) -> f64 {
    let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let highest = window
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = highest - lowest;
    if range == 0.0 {
        return 50.0;
    }
    let close = window[window.len() - 1].close;
    (100.0 * (close - lowest) / range).clamp(0.0, 100.0)
}
