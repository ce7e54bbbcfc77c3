//! Price history sources.
//!
//! The engine itself never fetches data; callers obtain a [`PriceSeries`]
//! from a [`PriceSource`] and hand it to the snapshot builder.
//!
//! [`PriceSeries`]: crate::domain::PriceSeries

pub mod csv_source;
pub mod provider;
pub mod synthetic;

pub use csv_source::{read_series, CsvSource};
pub use provider::{PriceSource, SourceError};
pub use synthetic::SyntheticSource;
