//! In-memory TTL cache.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use nimbus_core::constants::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};

/// Expiry horizon used when `now + ttl` is not representable.
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// Sweep period used in place of a zero interval.
const FALLBACK_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL used by [`TtlCache::set_default`]
    pub default_ttl: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,               // 15 minutes
            sweep_interval: DEFAULT_SWEEP_INTERVAL, // 30 minutes
        }
    }
}

/// Keyed store with per-entry expiration.
///
/// Thread-safe. Keys are used exactly as given. An expired entry may still be
/// held until the next sweep but is never returned by [`TtlCache::get`].
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    config: CacheConfig,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a cache with the given default TTL and the default sweep interval.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_config(CacheConfig {
            default_ttl,
            ..CacheConfig::default()
        })
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Gets a live value by key.
    ///
    /// Returns None if never set or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.value.clone())
    }

    /// Inserts or overwrites `key`, expiring `ttl` from now.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            expires_at: now.checked_add(ttl).unwrap_or(now + MAX_TTL),
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// Inserts with the configured default TTL.
    pub fn set_default(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.config.default_ttl);
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries.write().remove(key).map(|e| e.value)
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }

    /// Number of held entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(now)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    /// Spawns the periodic sweep on the current tokio runtime.
    ///
    /// The task holds a weak reference and exits once the cache is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let mut period = self.config.sweep_interval;
        if period.is_zero() {
            warn!("Zero sweep interval, using {:?}", FALLBACK_SWEEP_INTERVAL);
            period = FALLBACK_SWEEP_INTERVAL;
        }

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // Skip the first tick (immediate)
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(cache) = weak.upgrade() else {
                    debug!("Cache dropped, stopping sweeper");
                    break;
                };
                let removed = cache.cleanup_expired();
                if removed > 0 {
                    debug!(removed, remaining = cache.len(), "Swept expired cache entries");
                }
            }
        })
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries held, expired-but-unswept included
    pub total_entries: usize,
    /// Entries past their expiry awaiting the sweep
    pub expired_entries: usize,
    /// Entries `get` would still return
    pub valid_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_cache_set_get() {
        let cache = TtlCache::new(HOUR);
        cache.set("London", "payload".to_string(), HOUR);
        assert_eq!(cache.get("London").as_deref(), Some("payload"));
    }

    #[test]
    fn test_cache_keys_case_sensitive() {
        let cache = TtlCache::new(HOUR);
        cache.set_default("London", 1u32);
        assert!(cache.get("london").is_none());
        assert!(cache.get(" London").is_none());
        assert_eq!(cache.get("London"), Some(1));
    }

    #[test]
    fn test_cache_miss() {
        let cache: TtlCache<String> = TtlCache::default();
        assert!(cache.get("Nowhere").is_none());
    }

    #[test]
    fn test_cache_overwrite_resets_expiry() {
        let cache = TtlCache::new(HOUR);
        cache.set("Rome", 1u32, Duration::from_millis(1));
        cache.set("Rome", 2u32, HOUR);
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("Rome"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let cache = TtlCache::new(Duration::from_secs(u64::MAX));
        cache.set_default("London", 1u32);
        cache.set("Paris", 2u32, Duration::MAX);
        assert_eq!(cache.get("London"), Some(1));
        assert_eq!(cache.get("Paris"), Some(2));
        assert_eq!(cache.stats().valid_entries, 2);
    }

    #[test]
    fn test_cache_remove() {
        let cache = TtlCache::new(HOUR);
        cache.set_default("Paris", 7u32);
        assert_eq!(cache.remove("Paris"), Some(7));
        assert!(cache.get("Paris").is_none());
    }

    #[test]
    fn test_cache_clear() {
        let cache = TtlCache::new(HOUR);
        cache.set_default("Paris", 1u32);
        cache.set_default("Oslo", 2u32);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_held_but_not_returned() {
        let cache = TtlCache::new(HOUR);
        cache.set("Lima", 1u32, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get("Lima").is_none());
        assert_eq!(cache.len(), 1);

        let stats = cache.stats();
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.valid_entries, 0);
    }

    #[test]
    fn test_cache_cleanup_expired() {
        let cache = TtlCache::new(HOUR);
        cache.set("Lima", 1u32, Duration::from_millis(1));
        cache.set_default("Quito", 2u32);
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("Quito").is_some());
    }

    #[test]
    fn test_concurrent_writers_single_value() {
        let cache = Arc::new(TtlCache::new(HOUR));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        cache.set_default("Oslo", format!("payload-{}", i));
                        let _ = cache.get("Oslo");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
        let value = cache.get("Oslo").unwrap();
        assert!(value.starts_with("payload-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired() {
        let cache = Arc::new(TtlCache::with_config(CacheConfig {
            default_ttl: HOUR,
            sweep_interval: Duration::from_millis(50),
        }));
        let handle = cache.spawn_sweeper();

        cache.set("Lima", 1u32, Duration::ZERO);
        cache.set_default("Quito", 2u32);
        assert_eq!(cache.len(), 2);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.len(), 1);

        drop(cache);
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_sweep_interval_falls_back() {
        let cache = Arc::new(TtlCache::with_config(CacheConfig {
            default_ttl: HOUR,
            sweep_interval: Duration::ZERO,
        }));
        let handle = cache.spawn_sweeper();

        cache.set("Lima", 1u32, Duration::ZERO);
        tokio::time::sleep(FALLBACK_SWEEP_INTERVAL * 3).await;

        assert!(!handle.is_finished());
        assert!(cache.is_empty());
        handle.abort();
    }
}
