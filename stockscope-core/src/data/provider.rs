//! Price source trait and structured error types.
//!
//! The PriceSource trait abstracts over where bars come from (CSV files, a
//! seeded generator, a network provider elsewhere) so the CLI and tests can
//! swap implementations.

use crate::domain::PriceSeries;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("row {row}: unrecognised timestamp '{value}' (expected RFC 3339 or YYYY-MM-DD)")]
    Timestamp { row: usize, value: String },
}

/// Trait for price history sources.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Full daily history for `symbol`, oldest bar first.
    fn fetch(&self, symbol: &str) -> Result<PriceSeries, SourceError>;
}
