//! Moving Average Convergence Divergence (MACD).
//!
//! line = EMA(close, fast) - EMA(close, slow), aligned on bar index from the
//! slow EMA's first value; signal = EMA(line, signal); histogram = line - signal.
//! Requires slow + signal bars.

use super::ema::ema_of_series;
use super::Calculator;
use crate::domain::{closes, PriceBar};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Latest MACD values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD line and signal line, both ending at the latest bar.
///
/// `line[i]` belongs to bar `slow - 1 + i`; `signal` is shorter by
/// `signal_period - 1` and aligned to the end of `line`.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must exceed fast period");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        Self { fast, slow, signal }
    }

    pub fn series(&self, bars: &[PriceBar]) -> Result<MacdSeries, EngineError> {
        self.ensure_len(bars)?;

        let closes = closes(bars);
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);

        // fast[0] belongs to bar fast-1, slow[0] to bar slow-1
        let offset = self.slow - self.fast;
        let line: Vec<f64> = fast[offset..]
            .iter()
            .zip(&slow)
            .map(|(f, s)| f - s)
            .collect();
        let signal = ema_of_series(&line, self.signal);

        Ok(MacdSeries { line, signal })
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Calculator for Macd {
    type Output = MacdOutput;

    fn name(&self) -> &'static str {
        "MACD"
    }

    fn required_bars(&self) -> usize {
        self.slow + self.signal
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<MacdOutput, EngineError> {
        let series = self.series(bars)?;
        match (series.line.last(), series.signal.last()) {
            (Some(&line), Some(&signal)) => Ok(MacdOutput {
                line,
                signal,
                histogram: line - signal,
            }),
            _ => Err(EngineError::InsufficientData {
                indicator: self.name(),
                required: self.required_bars(),
                actual: bars.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, Ema, DEFAULT_EPSILON};

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn macd_short_series_names_macd() {
        let bars = make_series(&wave(34));
        assert_eq!(
            Macd::default().compute(&bars).unwrap_err(),
            EngineError::InsufficientData {
                indicator: "MACD",
                required: 35,
                actual: 34,
            }
        );
    }

    #[test]
    fn macd_line_is_fast_minus_slow() {
        let bars = make_series(&wave(60));
        let out = Macd::default().compute(&bars).unwrap();
        let fast = Ema::new(12).compute(&bars).unwrap();
        let slow = Ema::new(26).compute(&bars).unwrap();
        assert_approx(out.line, fast - slow, DEFAULT_EPSILON);
        assert_approx(out.histogram, out.line - out.signal, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_series_alignment() {
        let bars = make_series(&wave(60));
        let series = Macd::default().series(&bars).unwrap();
        assert_eq!(series.line.len(), 60 - 26 + 1);
        assert_eq!(series.signal.len(), series.line.len() - 9 + 1);
        assert_eq!(
            series.signal,
            ema_of_series(&series.line, 9),
            "signal must be the EMA of the line"
        );
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let bars = make_series(&[42.0; 40]);
        let out = Macd::default().compute(&bars).unwrap();
        assert_approx(out.line, 0.0, DEFAULT_EPSILON);
        assert_approx(out.signal, 0.0, DEFAULT_EPSILON);
        assert_approx(out.histogram, 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_uptrend_is_positive() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let bars = make_series(&closes);
        let out = Macd::default().compute(&bars).unwrap();
        assert!(out.line > 0.0);
        assert!(out.signal > 0.0);
    }
}
