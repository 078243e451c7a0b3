//! Memoized rankings.
//!
//! Ranking is pure in (dataset version, weights, filter), so a result can be
//! reused whenever all three match exactly. Weights are keyed by their bit
//! patterns; two vectors that differ only in the last ulp rank separately.

use super::engine::{rank, RankedTitle};
use crate::catalog::Catalog;
use crate::model::{MetricKey, RegionFilter, ScoreWeights};
use indexmap::IndexMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Default number of rankings kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 64;

/// Everything a ranking depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    catalog_version: u64,
    weights: [u64; MetricKey::COUNT],
    filter: RegionFilter,
}

impl CacheKey {
    fn new(catalog: &Catalog, weights: &ScoreWeights, filter: RegionFilter) -> Self {
        Self {
            catalog_version: catalog.version(),
            weights: weights.bit_pattern(),
            filter,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub lookups: usize,
    pub hits: usize,
    pub misses: usize,
    /// Hit rate (0.0 - 1.0)
    pub hit_rate: f64,
    pub entries: usize,
}

/// Bounded, thread-safe cache of rankings with oldest-first eviction.
#[derive(Debug)]
pub struct RankingCache {
    capacity: usize,
    entries: RwLock<IndexMap<CacheKey, Arc<[RankedTitle]>>>,
    lookups: AtomicUsize,
    hits: AtomicUsize,
}

impl Default for RankingCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RankingCache {
    /// Create a cache holding at most `capacity` rankings (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(IndexMap::new()),
            lookups: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached ranking for these inputs, computing it on a miss.
    pub fn get_or_rank(
        &self,
        catalog: &Catalog,
        weights: &ScoreWeights,
        filter: RegionFilter,
    ) -> Arc<[RankedTitle]> {
        let key = CacheKey::new(catalog, weights, filter);
        self.lookups.fetch_add(1, Ordering::Relaxed);

        if let Ok(entries) = self.entries.read() {
            if let Some(rows) = entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Arc::clone(rows);
            }
        }

        let rows: Arc<[RankedTitle]> = rank(catalog.titles(), weights, filter).into();
        self.store(key, Arc::clone(&rows));
        rows
    }

    fn store(&self, key: CacheKey, rows: Arc<[RankedTitle]>) {
        if let Ok(mut entries) = self.entries.write() {
            while entries.len() >= self.capacity && !entries.contains_key(&key) {
                entries.shift_remove_index(0);
            }
            entries.insert(key, rows);
        }
    }

    /// Number of cached rankings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached ranking and reset the counters.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        self.lookups.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let lookups = self.lookups.load(Ordering::Relaxed);
        let hits = self.hits.load(Ordering::Relaxed);
        CacheStats {
            lookups,
            hits,
            misses: lookups.saturating_sub(hits),
            hit_rate: if lookups > 0 {
                hits as f64 / lookups as f64
            } else {
                0.0
            },
            entries: self.len(),
        }
    }
}
