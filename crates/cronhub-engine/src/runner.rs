//! Job runner — orchestrates lock, due check, execution, and recording.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::traits::job::CronJob;
use cronhub_core::traits::lock::LockBackend;
use cronhub_core::types::report::{BatchReport, JobReport, RunOptions, RunOutcome};
use cronhub_core::types::run_record::NewRunRecord;

use crate::registry::JobRegistry;
use crate::schedule::{self, DueDecision};

/// Runs batches of cron jobs.
///
/// For each job: acquire the lock, consult the due-time policy, execute
/// the body, record the outcome, release the lock. Every per-job failure
/// is contained; one job can never abort its siblings.
pub struct JobRunner {
    registry: Arc<JobRegistry>,
    lock: Arc<dyn LockBackend>,
    history: Arc<dyn RunHistoryStore>,
}

impl JobRunner {
    /// Create a new job runner.
    pub fn new(
        registry: Arc<JobRegistry>,
        lock: Arc<dyn LockBackend>,
        history: Arc<dyn RunHistoryStore>,
    ) -> Self {
        Self {
            registry,
            lock,
            history,
        }
    }

    /// Process a batch of job identities and report per-job outcomes.
    pub async fn run_batch(&self, codes: &[String], options: RunOptions) -> BatchReport {
        self.run_batch_at(codes, options, None).await
    }

    /// Like [`run_batch`](Self::run_batch) with an injectable clock.
    pub(crate) async fn run_batch_at(
        &self,
        codes: &[String],
        options: RunOptions,
        now: Option<DateTime<Utc>>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for code in codes {
            match self.registry.resolve(code) {
                None => {
                    warn!(code, "No cron job registered under this name");
                    report.unresolved.push(code.clone());
                }
                Some(job) => {
                    let now = now.unwrap_or_else(Utc::now);
                    report.entries.push(self.process_job(job, options, now).await);
                }
            }
        }
        report
    }

    /// Run one job through the full lock/due/execute/record cycle.
    async fn process_job(
        &self,
        job: Arc<dyn CronJob>,
        options: RunOptions,
        now: DateTime<Utc>,
    ) -> JobReport {
        let code = job.code().to_string();
        if code.is_empty() {
            info!("Cron job does not have a code, skipping");
            return JobReport {
                code,
                outcome: RunOutcome::ConfigError,
                detail: Some("job does not have a code".to_string()),
            };
        }

        match self.lock.acquire(&code).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(code, "Lock held elsewhere, skipping");
                return JobReport {
                    code,
                    outcome: RunOutcome::SkippedLocked,
                    detail: None,
                };
            }
            Err(e) => {
                warn!(code, error = %e, "Lock backend unavailable, skipping this attempt");
                return JobReport {
                    code,
                    outcome: RunOutcome::SkippedLocked,
                    detail: Some(format!("lock backend unavailable: {e}")),
                };
            }
        }

        // Lock held from here on: run the guarded section, then release on
        // every path, even if recording failed.
        let report = self.run_locked(&code, job, options, now).await;
        if let Err(e) = self.lock.release(&code).await {
            warn!(code, error = %e, "Failed to release lock");
        }
        report
    }

    /// The guarded section: due decision, body execution, recording.
    async fn run_locked(
        &self,
        code: &str,
        job: Arc<dyn CronJob>,
        options: RunOptions,
        now: DateTime<Utc>,
    ) -> JobReport {
        let decision = if options.force {
            DueDecision {
                due: true,
                ran_at_time: None,
            }
        } else {
            match schedule::evaluate(&job.schedule(), self.history.as_ref(), code, now).await {
                Ok(decision) => decision,
                Err(e) => {
                    warn!(code, error = %e, "Could not evaluate due-time policy, skipping");
                    return JobReport {
                        code: code.to_string(),
                        outcome: RunOutcome::SkippedNotDue,
                        detail: Some(format!("history unavailable: {e}")),
                    };
                }
            }
        };

        if options.dry_run {
            info!(code, would_run = decision.due, "Dry run, not executing");
            return JobReport {
                code: code.to_string(),
                outcome: RunOutcome::SkippedDryRun {
                    would_run: decision.due,
                },
                detail: None,
            };
        }

        if !decision.due {
            debug!(code, "Not due, skipping");
            return JobReport {
                code: code.to_string(),
                outcome: RunOutcome::SkippedNotDue,
                detail: None,
            };
        }

        info!(code, "Running cron job");
        let started = Instant::now();
        // The body runs in its own task so a panic is contained and
        // surfaces as a failure record instead of unwinding the batch.
        let body = tokio::spawn({
            let job = Arc::clone(&job);
            async move { job.execute().await }
        });
        let (is_success, message) = match body.await {
            Ok(Ok(message)) => (true, message),
            Ok(Err(e)) => (false, e.to_string()),
            Err(join_err) if join_err.is_panic() => {
                (false, format!("job panicked: {join_err}"))
            }
            Err(join_err) => (false, format!("job was cancelled: {join_err}")),
        };
        let elapsed = chrono::Duration::from_std(started.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());

        if is_success {
            info!(code, "Cron job finished");
        } else {
            error!(code, message, "Cron job failed");
        }

        let record = NewRunRecord {
            code: code.to_string(),
            start_time: now,
            end_time: now + elapsed,
            is_success,
            message: message.clone(),
            ran_at_time: decision.ran_at_time,
        };
        if let Err(e) = self.history.append(record).await {
            error!(code, error = %e, "Failed to write run record");
        }

        JobReport {
            code: code.to_string(),
            outcome: if is_success {
                RunOutcome::RanSuccess
            } else {
                RunOutcome::RanFailure
            },
            detail: if is_success { None } else { Some(message) },
        }
    }
}
