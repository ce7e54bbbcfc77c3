//! Batch snapshot computation over many symbols.
//!
//! Each request is independent; results come back in request order with one
//! `Result` per request, so one bad series never hides the others.

use crate::cache::{CacheKey, SnapshotCache};
use crate::domain::PriceSeries;
use crate::error::EngineError;
use crate::snapshot::{SnapshotBuilder, TechnicalSnapshot};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// One symbol's input to a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRequest {
    pub symbol: String,
    pub series: PriceSeries,
    pub is_domestic_market: bool,
    pub currency: String,
}

impl SnapshotRequest {
    pub fn new(
        symbol: impl Into<String>,
        series: PriceSeries,
        is_domestic_market: bool,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            series,
            is_domestic_market,
            currency: currency.into(),
        }
    }

    pub fn build(&self, builder: &SnapshotBuilder) -> Result<TechnicalSnapshot, EngineError> {
        builder.build(
            &self.series,
            &self.symbol,
            self.is_domestic_market,
            &self.currency,
        )
    }
}

/// Compute every request in parallel.
pub fn compute_snapshots(
    builder: &SnapshotBuilder,
    requests: &[SnapshotRequest],
) -> Vec<Result<TechnicalSnapshot, EngineError>> {
    debug!(requests = requests.len(), "computing snapshot batch");
    requests
        .par_iter()
        .map(|request| request.build(builder))
        .collect()
}

/// Compute every request in parallel, reusing and filling `cache`.
pub fn compute_snapshots_cached(
    builder: &SnapshotBuilder,
    cache: &SnapshotCache,
    requests: &[SnapshotRequest],
) -> Vec<Result<Arc<TechnicalSnapshot>, EngineError>> {
    debug!(requests = requests.len(), "computing cached snapshot batch");
    requests
        .par_iter()
        .map(|request| {
            let key = CacheKey::new(request, builder.config());
            cache.get_or_compute(key, || request.build(builder))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;

    fn request(symbol: &str, len: usize) -> SnapshotRequest {
        let closes: Vec<f64> = (0..len).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        SnapshotRequest::new(symbol, PriceSeries::new(make_series(&closes)), false, "USD")
    }

    #[test]
    fn results_follow_request_order() {
        let builder = SnapshotBuilder::default();
        let requests = vec![request("aaa", 60), request("bbb", 10), request("ccc", 80)];
        let results = compute_snapshots(&builder, &requests);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().symbol, "AAA");
        assert!(matches!(
            results[1],
            Err(EngineError::InsufficientData { actual: 10, .. })
        ));
        assert_eq!(results[2].as_ref().unwrap().symbol, "CCC");
    }

    #[test]
    fn batch_matches_single_builds() {
        let builder = SnapshotBuilder::default();
        let requests = vec![request("x", 70), request("y", 90)];
        let results = compute_snapshots(&builder, &requests);
        for (request, result) in requests.iter().zip(results) {
            assert_eq!(result.unwrap(), request.build(&builder).unwrap());
        }
    }

    #[test]
    fn cached_batch_reuses_entries() {
        let builder = SnapshotBuilder::default();
        let cache = SnapshotCache::new();
        let requests = vec![request("x", 70), request("x", 70)];
        let results = compute_snapshots_cached(&builder, &cache, &requests);

        let first = results[0].as_ref().unwrap();
        let second = results[1].as_ref().unwrap();
        assert!(Arc::ptr_eq(first, second));
        assert_eq!(cache.len(), 1);
    }
}
