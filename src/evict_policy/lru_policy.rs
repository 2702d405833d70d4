use std::collections::VecDeque;

use tracing::trace;

use crate::{Key, Steps};

use super::{CacheEntry, EvictPolicy};

// LRU (Least Recently Used) Policy implementation
// Front of `entries` is the most recently used entry, back is the next victim.
pub struct LruPolicy {
    capacity: usize,
    entries: VecDeque<CacheEntry>,
}

impl EvictPolicy for LruPolicy {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    fn lookup(&mut self, key: Key) -> Option<Steps> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        if pos != 0 {
            let entry = self.entries.remove(pos)?;
            self.entries.push_front(entry);
            trace!(key, from = pos, "promoted to most recently used");
        }
        self.entries.front().map(|e| e.steps)
    }

    fn insert(&mut self, key: Key, steps: Steps) {
        debug_assert!(
            self.entries.iter().all(|e| e.key != key),
            "key {key} inserted twice"
        );
        self.entries.push_front(CacheEntry { key, steps });
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                trace!(key = evicted.key, "evicted least recently used");
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
