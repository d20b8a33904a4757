//! Database-record lock backend.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use cronhub_core::error::{AppError, ErrorKind};
use cronhub_core::result::AppResult;
use cronhub_core::traits::lock::LockBackend;

/// Lock backend over the `cron_lock` table.
///
/// One row per code with a boolean `locked` flag. Acquisition is a single
/// upsert guarded by `WHERE cron_lock.locked = FALSE`, so Postgres row
/// atomicity decides the winner; if no row exists yet it is created
/// already locked as part of the same statement.
#[derive(Debug, Clone)]
pub struct DatabaseLockBackend {
    pool: PgPool,
}

impl DatabaseLockBackend {
    /// Create a new database lock backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LockBackend for DatabaseLockBackend {
    async fn acquire(&self, code: &str) -> AppResult<bool> {
        let acquired: Option<String> = sqlx::query_scalar(
            "INSERT INTO cron_lock (code, locked, locked_at) VALUES ($1, TRUE, NOW()) \
             ON CONFLICT (code) DO UPDATE SET locked = TRUE, locked_at = NOW() \
             WHERE cron_lock.locked = FALSE \
             RETURNING code",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Lock, "Failed to acquire lock row", e))?;

        let got_it = acquired.is_some();
        debug!(code, acquired = got_it, "Database lock attempt");
        Ok(got_it)
    }

    async fn release(&self, code: &str) -> AppResult<()> {
        sqlx::query("UPDATE cron_lock SET locked = FALSE, locked_at = NULL WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Lock, "Failed to release lock row", e)
            })?;
        debug!(code, "Database lock released");
        Ok(())
    }

    async fn is_locked(&self, code: &str) -> AppResult<bool> {
        let locked: Option<bool> =
            sqlx::query_scalar("SELECT locked FROM cron_lock WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Lock, "Failed to read lock row", e)
                })?;
        Ok(locked.unwrap_or(false))
    }
}
