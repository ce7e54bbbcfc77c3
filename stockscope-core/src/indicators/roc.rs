//! Price change (rate of change) over a fixed lookback.
//!
//! change = (close[t] - close[t-lookback]) / close[t-lookback] * 100
//!
//! Reported in percent. A zero reference close yields 0.0. Requires
//! `lookback + 1` bars.

use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct PriceChange {
    lookback: usize,
}

impl PriceChange {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 1, "price change lookback must be >= 1");
        Self { lookback }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Percent change for every bar from index `lookback` onward.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<f64>, EngineError> {
        self.ensure_len(bars)?;
        Ok(bars
            .windows(self.lookback + 1)
            .map(|w| percent_change(w[0].close, w[self.lookback].close))
            .collect())
    }
}

impl Calculator for PriceChange {
    type Output = f64;

    fn name(&self) -> &'static str {
        "PriceChange"
    }

    fn required_bars(&self) -> usize {
        self.lookback + 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<f64, EngineError> {
        self.ensure_len(bars)?;
        let current = bars[bars.len() - 1].close;
        let reference = bars[bars.len() - 1 - self.lookback].close;
        Ok(percent_change(reference, current))
    }
}

fn percent_change(reference: f64, current: f64) -> f64 {
    if reference == 0.0 {
        warn!(current, "zero reference close, reporting 0% change");
        return 0.0;
    }
    (current - reference) / reference * 100.0
}
