//! Built-in failure aggregation job.
//!
//! Watches a set of job codes and, once a code has accumulated enough
//! unreported failures, delivers the whole batch as one notification and
//! flips the reported flag on every included record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use cronhub_core::result::AppResult;
use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::traits::job::CronJob;
use cronhub_core::traits::notify::Notifier;
use cronhub_core::types::query::RunQuery;
use cronhub_core::types::report::FailureReport;
use cronhub_core::types::schedule::Schedule;

/// Well-known code of the built-in failed-runs notification job.
pub const FAILED_RUNS_JOB_CODE: &str = "cronhub.failed_runs";

/// Aggregates unreported failures and notifies once a threshold is hit.
///
/// Notification and marking are ordered so a delivery error leaves every
/// record unreported; the next invocation retries the same batch plus any
/// new failures. Delivery is therefore at-least-once.
pub struct FailedRunsNotificationJob {
    targets: Vec<String>,
    min_failures: usize,
    history: Arc<dyn RunHistoryStore>,
    notifier: Arc<dyn Notifier>,
}

impl FailedRunsNotificationJob {
    /// Create the aggregation job watching `targets`.
    pub fn new(
        targets: Vec<String>,
        min_failures: usize,
        history: Arc<dyn RunHistoryStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            targets,
            min_failures,
            history,
            notifier,
        }
    }

    /// Aggregate one code: notify and mark if the threshold is reached.
    /// Returns the number of records reported.
    async fn aggregate(&self, code: &str) -> AppResult<usize> {
        let mut records = self
            .history
            .query(&RunQuery::unreported_failures(code))
            .await?;
        if records.len() < self.min_failures {
            debug!(
                code,
                failures = records.len(),
                threshold = self.min_failures,
                "Below failure threshold, not notifying"
            );
            return Ok(0);
        }

        // Oldest first so the notification reads chronologically.
        records.reverse();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        let report = FailureReport {
            code: code.to_string(),
            records,
        };
        self.notifier.send(&report).await?;
        let marked = self.history.mark_reported(&ids).await?;
        info!(code, count = marked, "Reported failure batch");
        Ok(marked as usize)
    }
}

impl std::fmt::Debug for FailedRunsNotificationJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailedRunsNotificationJob")
            .field("targets", &self.targets)
            .field("min_failures", &self.min_failures)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CronJob for FailedRunsNotificationJob {
    fn code(&self) -> &str {
        FAILED_RUNS_JOB_CODE
    }

    fn schedule(&self) -> Schedule {
        // Always due: the threshold itself throttles notifications.
        Schedule::every(std::time::Duration::ZERO)
    }

    async fn execute(&self) -> AppResult<String> {
        let mut reported = 0;
        let mut errors = Vec::new();
        for code in &self.targets {
            match self.aggregate(code).await {
                Ok(count) => reported += count,
                Err(e) => {
                    warn!(code, error = %e, "Failure aggregation failed for job");
                    errors.push(format!("{code}: {e}"));
                }
            }
        }
        if errors.is_empty() {
            Ok(format!("reported {reported} failure(s)"))
        } else {
            Err(cronhub_core::AppError::notification(errors.join("; ")))
        }
    }
}
