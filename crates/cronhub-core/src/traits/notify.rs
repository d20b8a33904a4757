//! Failure notification delivery trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::report::FailureReport;

/// Delivers a batch of unreported failures as one notification.
///
/// An error from `send` means the batch must not be marked reported, so
/// the next aggregation retries the same records.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver one failure report.
    async fn send(&self, report: &FailureReport) -> AppResult<()>;
}
