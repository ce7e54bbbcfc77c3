//! Technical snapshot — every indicator for one symbol at its latest bar.
//!
//! A [`TechnicalSnapshot`] is built once per request by [`SnapshotBuilder`]
//! and never mutated afterwards. Raw numeric fields are authoritative;
//! [`DisplayValues`] holds strings derived from them by the [`format`]
//! adapter.

pub mod builder;
pub mod format;

pub use builder::{compute_snapshot, SnapshotBuilder};
pub use format::{currency_symbol, DisplayFormatter, Grouping};

use crate::indicators::{BollingerBands, PivotPoints, StochasticValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    pub current_price: f64,
    pub currency: String,
    pub is_domestic_market: bool,
    pub last_updated: DateTime<Utc>,

    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub ema_12: f64,
    pub ema_26: f64,
    pub bollinger: BollingerBands,
    pub stochastic: StochasticValue,
    pub atr: f64,

    pub volume: f64,
    pub volume_sma_20: f64,
    pub volume_ratio: f64,
    pub price_change_1d: f64,
    pub price_change_5d: f64,

    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
    pub pivot_points: PivotPoints,

    pub display: DisplayValues,
}

/// Display strings for the snapshot's numeric fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayValues {
    pub current_price: String,
    pub rsi: String,
    pub macd: String,
    pub macd_signal: String,
    pub macd_histogram: String,
    pub sma_20: String,
    pub sma_50: String,
    pub ema_12: String,
    pub ema_26: String,
    pub bollinger_upper: String,
    pub bollinger_middle: String,
    pub bollinger_lower: String,
    pub stochastic_k: String,
    pub stochastic_d: String,
    pub atr: String,
    pub volume: String,
    pub volume_sma_20: String,
    pub volume_ratio: String,
    pub price_change_1d: String,
    pub price_change_5d: String,
    pub support_levels: Vec<String>,
    pub resistance_levels: Vec<String>,
    pub pivot: String,
    pub r1: String,
    pub r2: String,
    pub s1: String,
    pub s2: String,
}
