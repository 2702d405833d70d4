//! Collatz step counter with an optional LRU/LFU memo cache.

pub mod collatz;
pub mod config;
pub mod evict_policy;
pub mod report;
pub mod sampler;
pub mod step_cache;

pub type Key = u64;
pub type Steps = u32;
