//! Cache-entry lock backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use cronhub_core::result::AppResult;
use cronhub_core::traits::cache::CacheProvider;
use cronhub_core::traits::lock::LockBackend;

/// Lock backend over any [`CacheProvider`].
///
/// Acquisition is the provider's atomic set-if-not-exists on a key derived
/// from the job code. The TTL bounds the lock lifetime so a crashed holder
/// cannot deadlock the job forever.
#[derive(Debug, Clone)]
pub struct CacheLockBackend {
    cache: Arc<dyn CacheProvider>,
    ttl: Duration,
}

impl CacheLockBackend {
    /// Create a new cache lock backend with the given maximum lock lifetime.
    pub fn new(cache: Arc<dyn CacheProvider>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    fn key(code: &str) -> String {
        format!("lock:{code}")
    }
}

#[async_trait]
impl LockBackend for CacheLockBackend {
    async fn acquire(&self, code: &str) -> AppResult<bool> {
        let acquired = self
            .cache
            .set_nx(&Self::key(code), &Utc::now().to_rfc3339(), self.ttl)
            .await?;
        debug!(code, acquired, "Cache lock attempt");
        Ok(acquired)
    }

    async fn release(&self, code: &str) -> AppResult<()> {
        self.cache.delete(&Self::key(code)).await?;
        debug!(code, "Cache lock released");
        Ok(())
    }

    async fn is_locked(&self, code: &str) -> AppResult<bool> {
        self.cache.exists(&Self::key(code)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cronhub_cache::memory::MemoryCacheProvider;
    use cronhub_core::config::cache::MemoryCacheConfig;

    fn make_backend() -> CacheLockBackend {
        let provider = Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig {
            max_capacity: 100,
        }));
        CacheLockBackend::new(provider, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_acquire_release_cycle() {
        let backend = make_backend();
        assert!(backend.acquire("job_a").await.unwrap());
        assert!(backend.is_locked("job_a").await.unwrap());
        assert!(!backend.acquire("job_a").await.unwrap());
        backend.release("job_a").await.unwrap();
        assert!(!backend.is_locked("job_a").await.unwrap());
        assert!(backend.acquire("job_a").await.unwrap());
    }

    #[tokio::test]
    async fn test_codes_are_independent() {
        let backend = make_backend();
        assert!(backend.acquire("job_a").await.unwrap());
        assert!(backend.acquire("job_b").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_acquires_one_winner() {
        let backend = Arc::new(make_backend());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let backend = Arc::clone(&backend);
            handles.push(tokio::spawn(
                async move { backend.acquire("contended").await },
            ));
        }
        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }
}
