//! Run-history store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::query::RunQuery;
use crate::types::run_record::{NewRunRecord, RunRecord};

/// Append/query store for immutable run records.
///
/// Many processes append concurrently; no operation spans more than one
/// record except `mark_reported`, which flips the reported flag for a set
/// of ids in a single statement.
#[async_trait]
pub trait RunHistoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append one run record, returning the stored row.
    async fn append(&self, record: NewRunRecord) -> AppResult<RunRecord>;

    /// Query records matching the filters, most recent first.
    async fn query(&self, query: &RunQuery) -> AppResult<Vec<RunRecord>>;

    /// The most recent record for a code, if any.
    async fn latest(&self, code: &str) -> AppResult<Option<RunRecord>>;

    /// Set `failure_reported = true` on every listed record.
    /// Returns the number of records updated.
    async fn mark_reported(&self, ids: &[Uuid]) -> AppResult<u64>;
}
