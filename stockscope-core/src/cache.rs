//! Snapshot cache keyed by symbol, series content and configuration.
//!
//! At most one computation runs per key at a time: concurrent callers for
//! the same key wait on that key's slot and then share the stored
//! `Arc<TechnicalSnapshot>`. Different keys never block each other beyond
//! the brief map lookup. Failed computations are not stored, so the next
//! caller retries.

use crate::batch::SnapshotRequest;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::fingerprint::SeriesFingerprint;
use crate::snapshot::{SnapshotBuilder, TechnicalSnapshot};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: String,
    pub series: SeriesFingerprint,
    pub config: String,
    pub is_domestic_market: bool,
    pub currency: String,
}

impl CacheKey {
    pub fn new(request: &SnapshotRequest, config: &EngineConfig) -> Self {
        Self {
            symbol: request.symbol.trim().to_uppercase(),
            series: SeriesFingerprint::of(request.series.bars()),
            config: config.fingerprint(),
            is_domestic_market: request.is_domestic_market,
            currency: request.currency.to_uppercase(),
        }
    }
}

type Slot = Arc<Mutex<Option<Arc<TechnicalSnapshot>>>>;

#[derive(Debug, Default)]
pub struct SnapshotCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for `key`, computing it with `compute` if
    /// absent.
    pub fn get_or_compute<F>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<TechnicalSnapshot>, EngineError>
    where
        F: FnOnce() -> Result<TechnicalSnapshot, EngineError>,
    {
        loop {
            let slot = {
                let mut slots = self.slots.lock();
                Arc::clone(slots.entry(key.clone()).or_default())
            };

            // The map lock is released; only callers of this key wait here
            let mut guard = slot.lock();
            if let Some(snapshot) = guard.as_ref() {
                trace!(symbol = %key.symbol, "snapshot cache hit");
                return Ok(Arc::clone(snapshot));
            }

            // A failed or invalidated computation may have dropped this slot
            // from the map while we waited; start over on the live one.
            let live = self
                .slots
                .lock()
                .get(&key)
                .is_some_and(|s| Arc::ptr_eq(s, &slot));
            if !live {
                trace!(symbol = %key.symbol, "snapshot slot retired, retrying");
                continue;
            }

            return match compute() {
                Ok(snapshot) => {
                    let snapshot = Arc::new(snapshot);
                    *guard = Some(Arc::clone(&snapshot));
                    debug!(symbol = %key.symbol, "snapshot cached");
                    Ok(snapshot)
                }
                Err(err) => {
                    drop(guard);
                    let mut slots = self.slots.lock();
                    if slots.get(&key).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
                        let empty = slot.try_lock().is_some_and(|g| g.is_none());
                        if empty {
                            slots.remove(&key);
                        }
                    }
                    Err(err)
                }
            };
        }
    }

    /// Build through the cache.
    pub fn snapshot(
        &self,
        builder: &SnapshotBuilder,
        request: &SnapshotRequest,
    ) -> Result<Arc<TechnicalSnapshot>, EngineError> {
        let key = CacheKey::new(request, builder.config());
        self.get_or_compute(key, || request.build(builder))
    }

    /// Number of stored snapshots. Computations still in progress are not
    /// counted.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.try_lock().is_some_and(|g| g.is_some()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry for `symbol`. Returns how many were removed.
    pub fn invalidate_symbol(&self, symbol: &str) -> usize {
        let symbol = symbol.trim().to_uppercase();
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|key, _| key.symbol != symbol);
        before - slots.len()
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}
