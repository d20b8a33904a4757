//! Cron job implementation trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::schedule::Schedule;

/// A named unit of recurring work.
///
/// `execute` returns the message stored in the run record on success; an
/// error (or a panic, which the runner contains) becomes a failure record.
#[async_trait]
pub trait CronJob: Send + Sync + 'static {
    /// Stable identity used for locking and history grouping.
    fn code(&self) -> &str;

    /// Declared due-time schedule.
    fn schedule(&self) -> Schedule;

    /// Run the job body once.
    async fn execute(&self) -> AppResult<String>;
}
