//! In-memory cache implementation using dashmap.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use cronhub_core::config::cache::MemoryCacheConfig;
use cronhub_core::result::AppResult;
use cronhub_core::traits::cache::CacheProvider;

/// One stored entry with its expiry deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache provider.
///
/// Entries carry their own expiry deadline and are evicted lazily on
/// access. `set_nx` goes through the dashmap entry API so that exactly
/// one of several concurrent callers wins, which the cache lock backend
/// depends on.
#[derive(Debug)]
pub struct MemoryCacheProvider {
    /// The underlying map.
    entries: DashMap<String, CacheEntry>,
    /// Maximum number of entries before writes start evicting expired ones.
    max_capacity: u64,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            max_capacity: config.max_capacity,
        }
    }

    /// Drop every expired entry. Called when the map grows past capacity.
    fn evict_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        // Clone out of the shard guard before any removal to avoid
        // re-entering the same shard while it is read-locked.
        let found = self
            .entries
            .get(key)
            .map(|entry| (entry.value.clone(), entry.is_expired()));
        match found {
            Some((value, false)) => Ok(Some(value)),
            Some((_, true)) => {
                self.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        if self.entries.len() as u64 >= self.max_capacity {
            self.evict_expired();
        }
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(CacheEntry::new(value, ttl));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry::new(value, ttl));
                Ok(true)
            }
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1000 })
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_set_nx() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "val", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
        assert_eq!(provider.get("nx_key").await.unwrap().as_deref(), Some("val"));
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_missing() {
        let provider = make_provider();
        provider
            .set("gone", "v", Duration::from_secs(0))
            .await
            .unwrap();
        assert_eq!(provider.get("gone").await.unwrap(), None);
        assert!(!provider.exists("gone").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_nx_wins_over_expired_entry() {
        let provider = make_provider();
        provider
            .set("nx_exp", "old", Duration::from_secs(0))
            .await
            .unwrap();
        let won = provider
            .set_nx("nx_exp", "new", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(won);
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
