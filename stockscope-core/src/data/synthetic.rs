//! Deterministic synthetic price source.
//!
//! A seeded random walk of weekday bars. The RNG seed is the BLAKE3 hash of
//! the upper-cased symbol and the source seed, so the same symbol always
//! produces the same history and different symbols diverge.

use super::provider::{PriceSource, SourceError};
use crate::domain::{PriceBar, PriceSeries};
use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    bars: usize,
    seed: u64,
    start: NaiveDate,
}

impl SyntheticSource {
    pub fn new(bars: usize, seed: u64) -> Self {
        Self {
            bars,
            seed,
            start: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or_default(),
        }
    }

    pub fn starting(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn generate(&self, symbol: &str) -> PriceSeries {
        let mut hasher = blake3::Hasher::new();
        hasher.update(symbol.trim().to_uppercase().as_bytes());
        hasher.update(&self.seed.to_le_bytes());
        let mut rng = StdRng::from_seed(*hasher.finalize().as_bytes());

        let mut bars = Vec::with_capacity(self.bars);
        let mut price = rng.gen_range(50.0..500.0_f64);
        let mut current = self.start;

        while bars.len() < self.bars {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64) as f64;

            let timestamp = Utc.from_utc_datetime(&current.and_time(chrono::NaiveTime::MIN));
            bars.push(PriceBar::new(timestamp, open, high, low, close, volume));

            price = close;
            current += chrono::Duration::days(1);
        }

        PriceSeries::new(bars)
    }
}

impl PriceSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str) -> Result<PriceSeries, SourceError> {
        if symbol.trim().is_empty() {
            return Err(SourceError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(self.generate(symbol))
    }
}
