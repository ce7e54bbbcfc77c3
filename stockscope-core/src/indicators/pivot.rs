//! Floor-trader pivot points from the latest bar's high, low and close.
//!
//! ```text
//! P  = (H + L + C) / 3
//! R1 = 2P - L        S1 = 2P - H
//! R2 = P + (H - L)   S2 = P - (H - L)
//! ```

use super::Calculator;
use crate::domain::PriceBar;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub s1: f64,
    pub s2: f64,
}

impl PivotPoints {
    pub fn from_hlc(high: f64, low: f64, close: f64) -> Self {
        let pivot = (high + low + close) / 3.0;
        let range = high - low;
        Self {
            pivot,
            r1: 2.0 * pivot - low,
            r2: pivot + range,
            s1: 2.0 * pivot - high,
            s2: pivot - range,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pivot;

impl Calculator for Pivot {
    type Output = PivotPoints;

    fn name(&self) -> &'static str {
        "Pivot"
    }

    fn required_bars(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[PriceBar]) -> Result<PivotPoints, EngineError> {
        let bar = bars.last().ok_or(EngineError::InsufficientData {
            indicator: self.name(),
            required: 1,
            actual: 0,
        })?;
        Ok(PivotPoints::from_hlc(bar.high, bar.low, bar.close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc, DEFAULT_EPSILON};

    #[test]
    fn pivot_known_values() {
        let p = PivotPoints::from_hlc(110.0, 90.0, 100.0);
        assert_eq!(p.pivot, 100.0);
        assert_eq!(p.r1, 110.0);
        assert_eq!(p.s1, 90.0);
        assert_eq!(p.r2, 120.0);
        assert_eq!(p.s2, 80.0);
    }

    #[test]
    fn pivot_r1_plus_s1_identity() {
        let (h, l, c) = (57.3, 49.8, 52.1);
        let p = PivotPoints::from_hlc(h, l, c);
        assert_approx(p.r1 + p.s1, 4.0 * p.pivot - h - l, DEFAULT_EPSILON);
    }

    #[test]
    fn pivot_uses_latest_bar() {
        let bars = make_ohlc(&[(1.0, 2.0, 0.5, 1.5), (100.0, 110.0, 90.0, 100.0)]);
        let p = Pivot.compute(&bars).unwrap();
        assert_eq!(p, PivotPoints::from_hlc(110.0, 90.0, 100.0));
    }

    #[test]
    fn pivot_empty_series() {
        assert!(matches!(
            Pivot.compute(&[]),
            Err(EngineError::InsufficientData {
                indicator: "Pivot",
                ..
            })
        ));
    }
}
