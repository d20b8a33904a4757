//! Run-history repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use cronhub_core::error::{AppError, ErrorKind};
use cronhub_core::result::AppResult;
use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::types::query::RunQuery;
use cronhub_core::types::run_record::{NewRunRecord, RunRecord};

/// Repository over the `cron_run_log` table.
#[derive(Debug, Clone)]
pub struct RunLogRepository {
    pool: PgPool,
}

impl RunLogRepository {
    /// Create a new run-log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the filtered SELECT for a [`RunQuery`].
    fn select_query(query: &RunQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, code, start_time, end_time, is_success, message, \
             ran_at_time, failure_reported FROM cron_run_log WHERE 1=1",
        );
        if !query.code.is_empty() {
            builder.push(" AND code = ").push_bind(query.code.clone());
        }
        if let Some(success) = query.success {
            builder.push(" AND is_success = ").push_bind(success);
        }
        if let Some(reported) = query.reported {
            builder
                .push(" AND failure_reported = ")
                .push_bind(reported);
        }
        if let Some(day) = query.day {
            builder
                .push(" AND (start_time AT TIME ZONE 'UTC')::date = ")
                .push_bind(day);
        }
        if let Some(ran_at) = query.ran_at_time {
            builder.push(" AND ran_at_time = ").push_bind(ran_at);
        }
        builder.push(" ORDER BY start_time DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }
        builder
    }
}

#[async_trait]
impl RunHistoryStore for RunLogRepository {
    async fn append(&self, record: NewRunRecord) -> AppResult<RunRecord> {
        sqlx::query_as::<_, RunRecord>(
            "INSERT INTO cron_run_log \
             (code, start_time, end_time, is_success, message, ran_at_time) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&record.code)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.is_success)
        .bind(&record.message)
        .bind(record.ran_at_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append run record", e))
    }

    async fn query(&self, query: &RunQuery) -> AppResult<Vec<RunRecord>> {
        Self::select_query(query)
            .build_query_as::<RunRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to query run records", e)
            })
    }

    async fn latest(&self, code: &str) -> AppResult<Option<RunRecord>> {
        sqlx::query_as::<_, RunRecord>(
            "SELECT * FROM cron_run_log WHERE code = $1 \
             ORDER BY start_time DESC LIMIT 1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch latest run record", e)
        })
    }

    async fn mark_reported(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE cron_run_log SET failure_reported = TRUE WHERE id = ANY($1)",
        )
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark failures reported", e)
        })?;
        Ok(result.rows_affected())
    }
}
