//! Process-wide boundary cache keyed by postal code.
//!
//! Each key holds a `OnceCell`, so concurrent first requests for the same
//! postal code share one generation instead of racing to insert.

use std::future::Future;
use std::sync::Arc;

use hashbrown::HashMap;
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

use crate::models::{BoundaryRecord, CacheStats};

type Slot = Arc<OnceCell<Arc<BoundaryRecord>>>;

/// In-memory cache with no eviction and no TTL.
///
/// Keys are used verbatim; callers pass canonical 6-digit codes.
#[derive(Default)]
pub struct BoundaryCache {
    entries: RwLock<HashMap<String, Slot>>,
}

impl BoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, postal_code: &str) -> Option<Arc<BoundaryRecord>> {
        let entries = self.entries.read().await;
        entries.get(postal_code).and_then(|slot| slot.get().cloned())
    }

    /// Store `record`, replacing any existing entry wholesale
    pub async fn put(&self, postal_code: &str, record: Arc<BoundaryRecord>) {
        let mut entries = self.entries.write().await;
        entries.insert(postal_code.to_string(), Arc::new(OnceCell::from(record)));
    }

    /// Return the cached record or compute it, at most once per key at a time.
    ///
    /// Concurrent callers for the same key wait on the first caller's
    /// computation. A failed computation leaves nothing cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        postal_code: &str,
        compute: F,
    ) -> Result<Arc<BoundaryRecord>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<BoundaryRecord, E>>,
    {
        let slot = self.slot(postal_code).await;

        if let Some(record) = slot.get() {
            debug!("Boundary cache hit for {}", postal_code);
            return Ok(Arc::clone(record));
        }

        let result = slot
            .get_or_try_init(|| async { compute().await.map(Arc::new) })
            .await
            .map(Arc::clone);

        if result.is_err() {
            self.discard_empty(postal_code, &slot).await;
        }

        result
    }

    /// Drop one entry, or every entry when `postal_code` is `None`.
    ///
    /// Returns the number of completed entries removed; slots still
    /// generating are dropped but not counted, matching `stats`.
    pub async fn invalidate(&self, postal_code: Option<&str>) -> usize {
        let mut entries = self.entries.write().await;
        match postal_code {
            Some(code) => entries
                .remove(code)
                .map(|slot| usize::from(slot.initialized()))
                .unwrap_or(0),
            None => {
                let removed = entries.values().filter(|slot| slot.initialized()).count();
                entries.clear();
                removed
            }
        }
    }

    /// Size and sorted keys of the completed entries
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();

        CacheStats {
            size: keys.len(),
            keys,
        }
    }

    /// Every completed record
    pub async fn snapshot(&self) -> Vec<Arc<BoundaryRecord>> {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter_map(|slot| slot.get().cloned())
            .collect()
    }

    async fn slot(&self, postal_code: &str) -> Slot {
        if let Some(slot) = self.entries.read().await.get(postal_code) {
            return Arc::clone(slot);
        }

        let mut entries = self.entries.write().await;
        debug!("Boundary cache miss for {}", postal_code);
        Arc::clone(
            entries
                .entry(postal_code.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        )
    }

    /// Remove `slot` if it is still the entry for `postal_code`, holds nothing
    /// and no other caller is waiting on or generating into it.
    async fn discard_empty(&self, postal_code: &str, slot: &Slot) {
        let mut entries = self.entries.write().await;
        let stale = entries
            .get(postal_code)
            .map(|current| {
                // One reference in the map, one held by this caller
                Arc::ptr_eq(current, slot)
                    && !current.initialized()
                    && Arc::strong_count(current) == 2
            })
            .unwrap_or(false);
        if stale {
            entries.remove(postal_code);
        }
    }
}
