//! Series fingerprinting — deterministic identity of a price history.
//!
//! Two series hash equal only when every bar's timestamp and OHLCV fields are
//! bit-identical. Used to key cached snapshots so a revised or extended
//! history never reuses a stale result.

use crate::domain::PriceBar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 hash of a price series (hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesFingerprint(pub String);

impl SeriesFingerprint {
    pub fn of(bars: &[PriceBar]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(bars.len() as u64).to_le_bytes());
        for bar in bars {
            hasher.update(&bar.timestamp.timestamp().to_le_bytes());
            hasher.update(&bar.timestamp.timestamp_subsec_nanos().to_le_bytes());
            for (_, value) in bar.fields() {
                hasher.update(&value.to_bits().to_le_bytes());
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;

    #[test]
    fn identical_series_hash_equal() {
        let a = make_series(&[10.0, 11.0, 12.0]);
        let b = make_series(&[10.0, 11.0, 12.0]);
        assert_eq!(SeriesFingerprint::of(&a), SeriesFingerprint::of(&b));
        assert_eq!(SeriesFingerprint::of(&a).as_str().len(), 64);
    }

    #[test]
    fn any_field_change_changes_hash() {
        let base = make_series(&[10.0, 11.0, 12.0]);
        let original = SeriesFingerprint::of(&base);

        let mut volume = base.clone();
        volume[1].volume += 1.0;
        assert_ne!(SeriesFingerprint::of(&volume), original);

        let mut time = base.clone();
        time[2].timestamp += chrono::Duration::seconds(1);
        assert_ne!(SeriesFingerprint::of(&time), original);
    }

    #[test]
    fn sub_millisecond_timestamp_changes_hash() {
        let base = make_series(&[10.0, 11.0, 12.0]);
        let mut shifted = base.clone();
        shifted[2].timestamp += chrono::Duration::microseconds(500);
        assert_ne!(SeriesFingerprint::of(&shifted), SeriesFingerprint::of(&base));

        let mut nudged = base.clone();
        nudged[0].timestamp += chrono::Duration::nanoseconds(1);
        assert_ne!(SeriesFingerprint::of(&nudged), SeriesFingerprint::of(&base));
    }

    #[test]
    fn extension_changes_hash() {
        let short = make_series(&[10.0, 11.0]);
        let long = make_series(&[10.0, 11.0, 12.0]);
        assert_ne!(SeriesFingerprint::of(&short), SeriesFingerprint::of(&long));
    }
}
