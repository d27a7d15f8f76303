//! TTL cache for Nimbus weather payloads.
//!
//! Generic in-memory store with per-entry expiration and a periodic sweep.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
