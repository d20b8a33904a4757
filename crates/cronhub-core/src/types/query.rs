//! Typed query object for run-history lookups.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Filters for querying run records.
///
/// Every field is optional except `code`; stores combine the set filters
/// with AND semantics. Results are ordered most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunQuery {
    /// Job identity to query. Empty string matches all jobs.
    pub code: String,
    /// Filter on the success flag.
    pub success: Option<bool>,
    /// Filter on the failure-reported flag.
    pub reported: Option<bool>,
    /// Only records whose start time falls on this calendar day (UTC).
    pub day: Option<NaiveDate>,
    /// Only records covering this listed time-of-day.
    pub ran_at_time: Option<NaiveTime>,
    /// Maximum number of records to return.
    pub limit: Option<u32>,
}

impl RunQuery {
    /// Query for all records of one job.
    pub fn for_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Query for a job's failures that have not yet been reported.
    pub fn unreported_failures(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            success: Some(false),
            reported: Some(false),
            ..Self::default()
        }
    }

    /// Restrict to records covering `time` on `day`.
    pub fn covering(mut self, day: NaiveDate, time: NaiveTime) -> Self {
        self.day = Some(day);
        self.ran_at_time = Some(time);
        self
    }

    /// Restrict the number of returned records.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
