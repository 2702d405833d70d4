use tracing::trace;

use super::{CacheEntry, EvictPolicy};
use crate::{Key, Steps};

struct LfuEntry {
    entry: CacheEntry,
    frequency: u64,
}

// LFU (Least Frequently Used) Policy implementation
// New entries go behind the leading frequency-1 run; the head is evicted.
// Hits bump the frequency in place and never move an entry.
pub struct LfuPolicy {
    capacity: usize,
    entries: Vec<LfuEntry>,
}

impl EvictPolicy for LfuPolicy {
    fn new(capacity: usize) -> Self {
        LfuPolicy {
            capacity,
            entries: Vec::new(),
        }
    }

    fn lookup(&mut self, key: Key) -> Option<Steps> {
        let hit = self.entries.iter_mut().find(|e| e.entry.key == key)?;
        hit.frequency += 1;
        trace!(key, frequency = hit.frequency, "frequency bumped");
        Some(hit.entry.steps)
    }

    fn insert(&mut self, key: Key, steps: Steps) {
        debug_assert!(
            self.entries.iter().all(|e| e.entry.key != key),
            "key {key} inserted twice"
        );

        // Scan from the head while frequency <= 1.
        let pos = self
            .entries
            .iter()
            .position(|e| e.frequency > 1)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            LfuEntry {
                entry: CacheEntry { key, steps },
                frequency: 1,
            },
        );

        if self.entries.len() > self.capacity {
            let evicted = self.entries.remove(0);
            trace!(
                key = evicted.entry.key,
                frequency = evicted.frequency,
                "evicted least frequently used"
            );
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn layout(cache: &LfuPolicy) -> Vec<(Key, u64)> {
        cache
            .entries
            .iter()
            .map(|e| (e.entry.key, e.frequency))
            .collect()
    }

    fn frequency_of(cache: &LfuPolicy, key: Key) -> Option<u64> {
        cache
            .entries
            .iter()
            .find(|e| e.entry.key == key)
            .map(|e| e.frequency)
    }

    #[test]
    fn hit_keeps_position() {
        let mut cache = LfuPolicy::new(4);
        cache.insert(1, 10);
        cache.insert(2, 20);
        assert_eq!(cache.lookup(1), Some(10));
        assert_eq!(layout(&cache), vec![(1, 2), (2, 1)]);

        assert_eq!(cache.lookup(2), Some(20));
        assert_eq!(cache.lookup(2), Some(20));
        assert_eq!(layout(&cache), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn newcomer_behind_hot_head_is_evicted() {
        let mut cache = LfuPolicy::new(2);
        cache.insert(1, 10);
        cache.insert(2, 20);
        cache.lookup(1);
        cache.insert(3, 30);

        assert_eq!(layout(&cache), vec![(1, 2), (2, 1)]);
        assert_eq!(cache.lookup(3), None);
        assert_eq!(cache.lookup(1), Some(10));
        assert_eq!(cache.lookup(2), Some(20));
    }

    #[test]
    fn unsorted_list_evicts_head_not_minimum() {
        let mut cache = LfuPolicy::new(3);
        cache.insert(1, 0);
        cache.insert(2, 0);
        cache.lookup(1);
        cache.insert(3, 0);
        assert_eq!(layout(&cache), vec![(3, 1), (1, 2), (2, 1)]);

        cache.insert(4, 0);
        assert_eq!(layout(&cache), vec![(4, 1), (1, 2), (2, 1)]);
        assert_eq!(cache.lookup(3), None);
    }

    #[test]
    fn ties_evict_earliest_inserted() {
        let mut cache = LfuPolicy::new(3);
        cache.insert(1, 0);
        cache.insert(2, 0);
        cache.insert(3, 0);
        cache.insert(4, 0);
        assert_eq!(layout(&cache), vec![(2, 1), (3, 1), (4, 1)]);

        cache.insert(5, 0);
        assert_eq!(layout(&cache), vec![(3, 1), (4, 1), (5, 1)]);
    }

    #[test]
    fn new_entries_queue_behind_leading_frequency_one_run() {
        let mut cache = LfuPolicy::new(4);
        cache.insert(1, 0);
        cache.insert(2, 0);
        cache.lookup(2);
        cache.insert(3, 0);
        cache.insert(4, 0);
        assert_eq!(layout(&cache), vec![(1, 1), (3, 1), (4, 1), (2, 2)]);

        cache.insert(5, 0);
        assert_eq!(layout(&cache), vec![(3, 1), (4, 1), (5, 1), (2, 2)]);
    }

    #[test]
    fn frequencies_never_decrease() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut cache = LfuPolicy::new(8);
        let mut seen: Vec<(Key, u64)> = Vec::new();

        for _ in 0..2_000 {
            let key: Key = rng.gen_range(1..=20);
            if cache.lookup(key).is_none() {
                cache.insert(key, 0);
            }
            for &(key, before) in &seen {
                if let Some(now) = frequency_of(&cache, key) {
                    assert!(now >= before, "frequency of {key} dropped");
                }
            }
            seen = layout(&cache);
            assert!(cache.len() <= 8);
        }
    }

    #[test]
    fn newcomer_is_the_victim_when_every_resident_is_hot() {
        let mut cache = LfuPolicy::new(2);
        cache.insert(1, 0);
        cache.insert(2, 0);
        cache.lookup(1);
        cache.lookup(2);

        cache.insert(3, 0);
        assert_eq!(layout(&cache), vec![(1, 2), (2, 2)]);
        assert_eq!(cache.lookup(3), None);
    }

    #[test]
    fn repeated_lookup_is_stable() {
        let mut cache = LfuPolicy::new(2);
        cache.insert(9, 19);
        for _ in 0..5 {
            assert_eq!(cache.lookup(9), Some(19));
        }
        assert_eq!(frequency_of(&cache, 9), Some(6));
    }
}
