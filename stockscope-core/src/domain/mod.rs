//! Domain types for StockScope

pub mod bar;

pub use bar::{closes, PriceBar, PriceSeries};
