//! Average True Range (ATR).
//!
//! True Range: TR[0] = high[0] - low[0];
//! TR[t] = max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the Wilder-smoothed TR: seed = mean of the first `period` TR
//! values, then avg = (prev * (period - 1) + TR) / period.
//! Requires `period` bars.

use super::sma::mean;
use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }

    /// ATR for every bar from index period-1 onward.
    pub fn series(&self, bars: &[PriceBar]) -> Result<Vec<f64>, EngineError> {
        self.ensure_len(bars)?;
        Ok(wilder_smooth(&true_range(bars), self.period))
    }
}

impl Calculator for Atr {
    type Output = f64;

    fn name(&self) -> &'static str {
        "ATR"
    }

    fn required_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<f64, EngineError> {
        let series = self.series(bars)?;
        series.last().copied().ok_or(EngineError::InsufficientData {
            indicator: self.name(),
            required: self.period,
            actual: bars.len(),
        })
    }
}

/// True Range series, one value per bar.
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    let Some(first) = bars.first() else {
        return Vec::new();
    };

    let mut tr = Vec::with_capacity(bars.len());
    tr.push(first.high - first.low);

    for pair in bars.windows(2) {
        let (prev, bar) = (&pair[0], &pair[1]);
        let h = bar.high;
        let l = bar.low;
        let pc = prev.close;
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

/// Wilder smoothing: seed with the mean of the first `period` values, then
/// avg = (prev * (period - 1) + value) / period.
///
/// Returns `values.len() - period + 1` values, empty if the input is too short.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let p = period as f64;
    let seed = mean(&values[..period]);

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        let smoothed = (prev * (p - 1.0) + value) / p;
        result.push(smoothed);
        prev = smoothed;
    }

    result
}
