use crate::{Key, Steps};

mod lfu_policy;
mod lru_policy;
pub use lfu_policy::LfuPolicy;
pub use lru_policy::LruPolicy;

/// A memoized step count. Never recomputed once cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: Key,
    pub steps: Steps,
}

// Bounded, fixed-capacity step cache.
//
// `insert` is only called after `lookup` returned `None` for the same key.
pub trait EvictPolicy {
    fn new(capacity: usize) -> Self;
    fn lookup(&mut self, key: Key) -> Option<Steps>;
    fn insert(&mut self, key: Key, steps: Steps);
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
}
