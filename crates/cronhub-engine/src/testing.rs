//! In-memory doubles for the storage and notification traits, backed by
//! plain mutex-guarded vectors. Compiled for this crate's tests only.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use cronhub_core::result::AppResult;
use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::traits::notify::Notifier;
use cronhub_core::types::query::RunQuery;
use cronhub_core::types::report::FailureReport;
use cronhub_core::types::run_record::{NewRunRecord, RunRecord};
use cronhub_core::AppError;

/// Run-history store over an in-process vector.
#[derive(Debug, Default)]
pub struct MemoryRunStore {
    records: Mutex<Vec<RunRecord>>,
}

impl MemoryRunStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<RunRecord>>> {
        self.records
            .lock()
            .map_err(|_| AppError::internal("run store mutex poisoned"))
    }

    fn matches(record: &RunRecord, query: &RunQuery) -> bool {
        if !query.code.is_empty() && record.code != query.code {
            return false;
        }
        if let Some(success) = query.success {
            if record.is_success != success {
                return false;
            }
        }
        if let Some(reported) = query.reported {
            if record.failure_reported != reported {
                return false;
            }
        }
        if let Some(day) = query.day {
            if record.start_time.date_naive() != day {
                return false;
            }
        }
        if let Some(time) = query.ran_at_time {
            if record.ran_at_time != Some(time) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl RunHistoryStore for MemoryRunStore {
    async fn append(&self, record: NewRunRecord) -> AppResult<RunRecord> {
        let stored = RunRecord {
            id: Uuid::new_v4(),
            code: record.code,
            start_time: record.start_time,
            end_time: record.end_time,
            is_success: record.is_success,
            message: record.message,
            ran_at_time: record.ran_at_time,
            failure_reported: false,
        };
        self.guard()?.push(stored.clone());
        Ok(stored)
    }

    async fn query(&self, query: &RunQuery) -> AppResult<Vec<RunRecord>> {
        let mut matched: Vec<RunRecord> = self
            .guard()?
            .iter()
            .filter(|r| Self::matches(r, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn latest(&self, code: &str) -> AppResult<Option<RunRecord>> {
        Ok(self
            .query(&RunQuery::for_code(code).limit(1))
            .await?
            .into_iter()
            .next())
    }

    async fn mark_reported(&self, ids: &[Uuid]) -> AppResult<u64> {
        let mut records = self.guard()?;
        let mut updated = 0;
        for record in records.iter_mut() {
            if ids.contains(&record.id) && !record.failure_reported {
                record.failure_reported = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

/// Notifier that records every report it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<FailureReport>>,
    fail_next: Mutex<bool>,
}

impl RecordingNotifier {
    /// Create a notifier that accepts every report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `send` calls return an error.
    pub fn fail_sends(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_next.lock() {
            *flag = fail;
        }
    }

    /// All reports delivered so far.
    pub fn sent(&self) -> Vec<FailureReport> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, report: &FailureReport) -> AppResult<()> {
        let failing = self
            .fail_next
            .lock()
            .map(|flag| *flag)
            .map_err(|_| AppError::internal("notifier mutex poisoned"))?;
        if failing {
            return Err(AppError::notification("notification transport refused"));
        }
        self.sent
            .lock()
            .map_err(|_| AppError::internal("notifier mutex poisoned"))?
            .push(report.clone());
        Ok(())
    }
}
