//! Indicator calculators.
//!
//! Every calculator implements [`Calculator`]. Series helpers (`*_of_series`,
//! `series`) return only the defined values: an output of length
//! `len - required + 1` whose first element belongs to bar `required - 1`.
//! No warmup NaNs are emitted; a too-short input is an error instead.

pub mod atr;
pub mod bollinger;
pub mod calculator;
pub mod ema;
pub mod levels;
pub mod macd;
pub mod pivot;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;

pub use atr::{true_range, wilder_smooth, Atr};
pub use bollinger::{Bollinger, BollingerBands};
pub use calculator::Calculator;
pub use ema::{ema_of_series, Ema};
pub use levels::{LevelFinder, SupportResistance};
pub use macd::{Macd, MacdOutput};
pub use pivot::{Pivot, PivotPoints};
pub use roc::PriceChange;
pub use rsi::Rsi;
pub use sma::{mean, sma_of_series, Sma};
pub use stochastic::{Stochastic, StochasticValue};
pub use volume::{VolumeAverage, VolumeStats};

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for first bar), high = max(open,close) + 1.0,
/// low = min(open,close) - 1.0, volume = 1000, one bar per day.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| PriceBar {
            timestamp: base + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
