//! StockScope Core — technical indicator engine.
//!
//! Turns an OHLCV price history into one immutable [`TechnicalSnapshot`]:
//! - Series validation (finite, non-negative fields, ordered timestamps, length)
//! - Stateless indicator calculators (SMA, EMA, RSI, MACD, Bollinger,
//!   Stochastic, ATR, volume, price change, support/resistance, pivots)
//! - Snapshot building with locale-aware display strings
//! - Engine configuration (TOML) and content fingerprints
//! - A single-flight snapshot cache and a parallel batch entry point
//! - Price sources (CSV files, seeded synthetic walk)
//!
//! ```no_run
//! use stockscope_core::data::{PriceSource, SyntheticSource};
//! use stockscope_core::compute_snapshot;
//!
//! let series = SyntheticSource::new(120, 42).fetch("AAPL").unwrap();
//! let snapshot = compute_snapshot(&series, "AAPL", false, "USD").unwrap();
//! println!("RSI {}", snapshot.display.rsi);
//! ```

pub mod batch;
pub mod cache;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod snapshot;
pub mod validate;

pub use batch::{compute_snapshots, compute_snapshots_cached, SnapshotRequest};
pub use cache::{CacheKey, SnapshotCache};
pub use config::{ConfigError, EngineConfig};
pub use domain::{PriceBar, PriceSeries};
pub use error::{EngineError, SeriesDefect};
pub use fingerprint::SeriesFingerprint;
pub use snapshot::{compute_snapshot, DisplayValues, SnapshotBuilder, TechnicalSnapshot};
pub use validate::{validate_series, Requirement};
