//! Run record entity model.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One execution attempt of a cron job.
///
/// Rows are append-only: a record is written once after the attempt
/// completes and never changes, except for the one-shot
/// `failure_reported` flip performed by the failed-runs notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RunRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Job identity this record belongs to.
    pub code: String,
    /// When the job body started.
    pub start_time: DateTime<Utc>,
    /// When the job body finished.
    pub end_time: DateTime<Utc>,
    /// Whether the attempt succeeded.
    pub is_success: bool,
    /// Job output on success, error detail on failure.
    pub message: String,
    /// The listed time-of-day this run covered (fixed-times jobs only).
    pub ran_at_time: Option<NaiveTime>,
    /// Whether this failure has been included in a notification batch.
    pub failure_reported: bool,
}

impl RunRecord {
    /// Wall-clock duration of the attempt.
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

/// Data required to append a new run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRunRecord {
    /// Job identity.
    pub code: String,
    /// When the job body started.
    pub start_time: DateTime<Utc>,
    /// When the job body finished.
    pub end_time: DateTime<Utc>,
    /// Whether the attempt succeeded.
    pub is_success: bool,
    /// Job output or error detail.
    pub message: String,
    /// The listed time-of-day this run covered, if any.
    pub ran_at_time: Option<NaiveTime>,
}
