//! Lock manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use cronhub_core::config::lock::LockConfig;
use cronhub_core::error::AppError;
use cronhub_core::result::AppResult;
use cronhub_core::traits::cache::CacheProvider;
use cronhub_core::traits::lock::LockBackend;

use crate::cache::CacheLockBackend;
use crate::database::DatabaseLockBackend;
use crate::file::FileLockBackend;

/// Lock manager that wraps the configured lock backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct LockManager {
    /// The inner lock backend.
    inner: Arc<dyn LockBackend>,
}

impl LockManager {
    /// Create a new lock manager from configuration.
    ///
    /// The database pool and cache provider are supplied by the caller so
    /// the manager never opens connections of its own; only the backend
    /// named in the configuration is used.
    pub fn new(
        config: &LockConfig,
        pool: PgPool,
        cache: Arc<dyn CacheProvider>,
    ) -> AppResult<Self> {
        let inner: Arc<dyn LockBackend> = match config.backend.as_str() {
            "database" => {
                info!("Initializing database lock backend");
                Arc::new(DatabaseLockBackend::new(pool))
            }
            "cache" => {
                info!(
                    ttl_seconds = config.cache_ttl_seconds,
                    "Initializing cache lock backend"
                );
                Arc::new(CacheLockBackend::new(
                    cache,
                    Duration::from_secs(config.cache_ttl_seconds),
                ))
            }
            "file" => {
                info!(dir = %config.file_dir, "Initializing file lock backend");
                Arc::new(FileLockBackend::new(&config.file_dir))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown lock backend: '{other}'. Supported: database, cache, file"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a lock manager from an existing backend (for testing).
    pub fn from_backend(backend: Arc<dyn LockBackend>) -> Self {
        Self { inner: backend }
    }
}

#[async_trait]
impl LockBackend for LockManager {
    async fn acquire(&self, code: &str) -> AppResult<bool> {
        self.inner.acquire(code).await
    }

    async fn release(&self, code: &str) -> AppResult<()> {
        self.inner.release(code).await
    }

    async fn is_locked(&self, code: &str) -> AppResult<bool> {
        self.inner.is_locked(code).await
    }
}
