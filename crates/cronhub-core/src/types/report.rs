//! Per-job outcomes, batch reports, and the failure notification payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::run_record::RunRecord;

/// Options controlling one batch invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Bypass the due-time policy unconditionally.
    pub force: bool,
    /// Evaluate due-ness and locking but never run the body or write a record.
    pub dry_run: bool,
    /// Suppress the textual report. Records are still written.
    pub silent: bool,
}

/// Terminal outcome of one (job, invocation) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The body ran and returned a message.
    RanSuccess,
    /// The body ran and failed; the error is recorded.
    RanFailure,
    /// Another holder owns the lock; nothing was done.
    SkippedLocked,
    /// The due-time policy said not now.
    SkippedNotDue,
    /// Dry-run mode: the decision was evaluated but nothing executed.
    SkippedDryRun {
        /// Whether the job would have run.
        would_run: bool,
    },
    /// The job declaration is invalid (e.g. empty code).
    ConfigError,
}

impl RunOutcome {
    /// The status marker used in report lines.
    fn marker(&self) -> &'static str {
        match self {
            Self::RanSuccess => "\u{2714}",
            Self::SkippedDryRun { would_run: true } => "\u{2714}",
            Self::RanFailure | Self::ConfigError => "\u{2718}",
            Self::SkippedLocked
            | Self::SkippedNotDue
            | Self::SkippedDryRun { would_run: false } => " ",
        }
    }
}

/// Outcome of one job within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    /// Job identity.
    pub code: String,
    /// Terminal outcome.
    pub outcome: RunOutcome,
    /// Detail for the caller (skip reason, error message).
    pub detail: Option<String>,
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.outcome.marker(), self.code)?;
        if let Some(detail) = &self.detail {
            write!(f, " {detail}")?;
        }
        Ok(())
    }
}

/// Result of one batch invocation: per-job outcomes plus the identities
/// that could not be resolved against the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per resolvable job, in invocation order.
    pub entries: Vec<JobReport>,
    /// Identities with no registered implementation.
    pub unresolved: Vec<String>,
}

impl BatchReport {
    /// Whether any job in the batch failed or was unresolvable.
    pub fn has_errors(&self) -> bool {
        !self.unresolved.is_empty()
            || self.entries.iter().any(|e| {
                matches!(e.outcome, RunOutcome::RanFailure | RunOutcome::ConfigError)
            })
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        if !self.unresolved.is_empty() {
            writeln!(
                f,
                "Unknown cron jobs: {}. Make sure these are valid cron job codes.",
                self.unresolved.join(", ")
            )?;
        }
        Ok(())
    }
}

/// The batch of unreported failures handed to a notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReport {
    /// Job identity the failures belong to.
    pub code: String,
    /// All unreported failure records, oldest first.
    pub records: Vec<RunRecord>,
}
