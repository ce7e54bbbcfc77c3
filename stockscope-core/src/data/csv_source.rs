//! CSV price source.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with the header
//! `timestamp,open,high,low,close,volume`. Timestamps are RFC 3339
//! (`2024-01-02T15:30:00Z`) or plain dates (`2024-01-02`, midnight UTC).
//! Rows are kept in file order; ordering problems are left to series
//! validation so they are reported with the offending bar index.

use super::provider::{PriceSource, SourceError};
use crate::domain::{PriceBar, PriceSeries};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.trim().to_uppercase()))
    }
}

impl PriceSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, symbol: &str) -> Result<PriceSeries, SourceError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(SourceError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let file = File::open(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let series = read_series(file, &path)?;
        debug!(symbol, bars = series.len(), path = %path.display(), "loaded csv series");
        Ok(series)
    }
}

/// Parse a CSV price history. `origin` only labels errors.
pub fn read_series<R: Read>(reader: R, origin: &Path) -> Result<PriceSeries, SourceError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut bars = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|source| SourceError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| SourceError::Timestamp {
            row: index + 1,
            value: row.timestamp.clone(),
        })?;
        bars.push(PriceBar::new(
            timestamp, row.open, row.high, row.low, row.close, row.volume,
        ));
    }
    Ok(PriceSeries::new(bars))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
