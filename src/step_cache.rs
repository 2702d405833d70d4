//! Memoized Collatz step counts behind a policy chosen once at startup.

use tracing::debug;

use crate::collatz::collatz_steps;
use crate::config::CachePolicy;
use crate::evict_policy::{EvictPolicy, LfuPolicy, LruPolicy};
use crate::{Key, Steps};

/// Hit/miss counters for one run. With no policy every lookup is a miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn miss_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.misses as f64 / n as f64,
        }
    }
}

enum ActiveCache {
    None,
    Lru(LruPolicy),
    Lfu(LfuPolicy),
}

pub struct StepCache {
    active: ActiveCache,
    stats: CacheStats,
}

impl StepCache {
    pub fn new(policy: CachePolicy, capacity: usize) -> Self {
        let active = match policy {
            CachePolicy::None => ActiveCache::None,
            CachePolicy::Lru => ActiveCache::Lru(LruPolicy::new(capacity)),
            CachePolicy::Lfu => ActiveCache::Lfu(LfuPolicy::new(capacity)),
        };
        Self {
            active,
            stats: CacheStats::default(),
        }
    }

    pub fn get_or_compute(&mut self, key: Key) -> Steps {
        self.lookup_or_compute(key).0
    }

    /// Like [`StepCache::get_or_compute`], also reporting whether the value was cached.
    pub fn lookup_or_compute(&mut self, key: Key) -> (Steps, bool) {
        let cached = match &mut self.active {
            ActiveCache::None => None,
            ActiveCache::Lru(cache) => cache.lookup(key),
            ActiveCache::Lfu(cache) => cache.lookup(key),
        };
        if let Some(steps) = cached {
            self.stats.hits += 1;
            debug!(key, steps, "cache hit");
            return (steps, true);
        }

        self.stats.misses += 1;
        let steps = collatz_steps(key);
        debug!(key, steps, "cache miss");
        match &mut self.active {
            ActiveCache::None => {}
            ActiveCache::Lru(cache) => cache.insert(key, steps),
            ActiveCache::Lfu(cache) => cache.insert(key, steps),
        }
        (steps, false)
    }

    pub fn policy(&self) -> CachePolicy {
        match self.active {
            ActiveCache::None => CachePolicy::None,
            ActiveCache::Lru(_) => CachePolicy::Lru,
            ActiveCache::Lfu(_) => CachePolicy::Lfu,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        match &self.active {
            ActiveCache::None => 0,
            ActiveCache::Lru(cache) => cache.len(),
            ActiveCache::Lfu(cache) => cache.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.active {
            ActiveCache::None => 0,
            ActiveCache::Lru(cache) => cache.capacity(),
            ActiveCache::Lfu(cache) => cache.capacity(),
        }
    }
}
