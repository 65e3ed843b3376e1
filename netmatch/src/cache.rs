//! Bounded memo of query results.
//!
//! A fixed-capacity LRU keyed by the normalized [`Query`]. Entries are kept in
//! recency order inside an `IndexMap`: a hit moves its entry to the back and
//! inserts past capacity evict from the front. The map sits behind a mutex so
//! one engine can serve several threads; lookups and inserts are each atomic,
//! the computation between them runs unlocked.

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::query::{MatchResult, Query};

/// Default number of cached queries.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Counters exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: IndexMap<Query, Arc<MatchResult>>,
    hits: u64,
    misses: u64,
}

#[derive(Debug)]
pub struct MatchCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MatchCache {
    /// A capacity of zero disables caching: every lookup misses.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                entries: IndexMap::with_capacity(capacity),
                ..CacheInner::default()
            }),
        }
    }

    // Entries are plain values; a panic elsewhere cannot leave them half-written.
    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&self, key: &Query) -> Option<Arc<MatchResult>> {
        let mut inner = self.lock();
        match inner.entries.get_index_of(key) {
            Some(idx) => {
                let last = inner.entries.len() - 1;
                inner.entries.move_index(idx, last);
                inner.hits += 1;
                inner.entries.get_index(last).map(|(_, v)| Arc::clone(v))
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Store `value` under `key`, evicting least recently used entries past
    /// capacity.
    pub fn insert(&self, key: Query, value: Arc<MatchResult>) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.lock();
        // Re-inserting an existing key keeps its old slot, so move it back.
        let (idx, _) = inner.entries.insert_full(key, value);
        let last = inner.entries.len() - 1;
        inner.entries.move_index(idx, last);
        while inner.entries.len() > self.capacity {
            inner.entries.shift_remove_index(0);
        }
    }

    pub fn contains(&self, key: &Query) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries. Hit/miss counters are kept.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            len: inner.entries.len(),
            capacity: self.capacity,
        }
    }
}
