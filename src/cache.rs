//! In-memory cache of completed yacht records.
//!
//! Caches the final merged record keyed by the normalised yacht name
//! (trimmed, lowercased). Uses [`moka`] for async-friendly caching with
//! capacity-bounded eviction. Entries have no TTL — yacht specifications
//! change on refit timescales, so records live until evicted or until the
//! host clears the cache.
//!
//! The cache is owned by the enhancer rather than being process-global:
//! two enhancers never share entries, and dropping the enhancer drops its
//! cache.

use moka::future::Cache;

use crate::name_normalize::cache_key;
use crate::types::YachtData;

/// Read-through cache mapping normalised yacht name to its merged record.
#[derive(Debug)]
pub struct RecordCache {
    inner: Cache<String, YachtData>,
}

impl RecordCache {
    /// Create a cache bounded to `capacity` records.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Look up a cached record by yacht name (normalised internally).
    ///
    /// Returns `Some(record)` on cache hit, `None` on miss.
    pub async fn get(&self, name: &str) -> Option<YachtData> {
        self.inner.get(&cache_key(name)).await
    }

    /// Insert a completed record under its normalised name.
    pub async fn insert(&self, name: &str, record: YachtData) {
        self.inner.insert(cache_key(name), record).await;
    }

    /// Drop every cached record.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate number of cached records. Eventually consistent;
    /// call [`RecordCache::sync`] first when an exact count matters.
    pub fn len(&self) -> u64 {
        self.inner.entry_count()
    }

    /// True when no records are cached (approximate, like [`RecordCache::len`]).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush pending cache maintenance so `len` reflects recent inserts.
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}
