//! Declared job configuration for the CLI entry point.

use serde::{Deserialize, Serialize};

/// One job declaration from the `[[jobs]]` config section.
///
/// Exactly one of `every_minutes` or `run_at_times` must be set; that
/// choice selects the due-time policy for the job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Stable job identity used for locking and history grouping.
    pub code: String,
    /// Shell command executed as the job body.
    pub command: String,
    /// Minimum-interval policy: run at most once per this many minutes.
    #[serde(default)]
    pub every_minutes: Option<u64>,
    /// Retry sooner than `every_minutes` after a failed run.
    #[serde(default)]
    pub retry_after_minutes: Option<u64>,
    /// Fixed-times-of-day policy: `"HH:MM"` entries, one run per time per day.
    #[serde(default)]
    pub run_at_times: Vec<String>,
}
