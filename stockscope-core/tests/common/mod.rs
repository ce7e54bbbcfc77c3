//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use stockscope_core::{PriceBar, PriceSeries};

/// N daily bars of a deterministic pseudo-random walk (simple LCG).
pub fn walk_bars(n: usize) -> Vec<PriceBar> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price = f64::max(price + change, 10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 2.0;
        let low = open.min(close) - 2.0;

        bars.push(PriceBar::new(
            base + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            1000.0 + i as f64 * 100.0,
        ));
    }

    bars
}

/// Bars from closes: open = previous close, high/low one point outside the
/// body, constant volume.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar::new(
                base + Duration::days(i as i64),
                open,
                open.max(close) + 1.0,
                (open.min(close) - 1.0).max(0.0),
                close,
                1000.0,
            )
        })
        .collect()
}

pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}",
        (actual - expected).abs()
    );
}
