//! Due-time policy evaluation.

use chrono::{DateTime, NaiveTime, Utc};

use cronhub_core::result::AppResult;
use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::types::query::RunQuery;
use cronhub_core::types::schedule::Schedule;

/// The policy's decision for one job at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDecision {
    /// Whether the job should run now.
    pub due: bool,
    /// For fixed-times jobs, the listed time-of-day this run covers.
    pub ran_at_time: Option<NaiveTime>,
}

impl DueDecision {
    /// A decision that the job is not due.
    pub fn not_due() -> Self {
        Self {
            due: false,
            ran_at_time: None,
        }
    }
}

/// Decide whether a job is due at `now` given its schedule and history.
pub async fn evaluate(
    schedule: &Schedule,
    history: &dyn RunHistoryStore,
    code: &str,
    now: DateTime<Utc>,
) -> AppResult<DueDecision> {
    match schedule {
        Schedule::Every { every, retry_after } => {
            let Some(last) = history.latest(code).await? else {
                // Never run before.
                return Ok(DueDecision {
                    due: true,
                    ran_at_time: None,
                });
            };

            // After a failure the retry override, when declared, shortens
            // the wait before the next attempt.
            let threshold = if last.is_success {
                *every
            } else {
                retry_after.unwrap_or(*every)
            };

            let elapsed = now - last.start_time;
            let due = elapsed
                >= chrono::Duration::from_std(threshold)
                    .unwrap_or_else(|_| chrono::Duration::MAX);
            Ok(DueDecision {
                due,
                ran_at_time: None,
            })
        }
        Schedule::AtTimes(times) => {
            let today = now.date_naive();
            let time_now = now.time();

            // Only the most recent listed time that has already passed is
            // a candidate; earlier slots missed today stay skipped.
            let Some(candidate) = times.iter().copied().filter(|t| *t <= time_now).max() else {
                return Ok(DueDecision::not_due());
            };

            let covered = history
                .query(&RunQuery::for_code(code).covering(today, candidate).limit(1))
                .await?;
            if covered.is_empty() {
                Ok(DueDecision {
                    due: true,
                    ran_at_time: Some(candidate),
                })
            } else {
                Ok(DueDecision::not_due())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDateTime;

    use cronhub_core::types::run_record::NewRunRecord;

    use super::*;
    use crate::testing::MemoryRunStore;

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    async fn record_run(
        store: &MemoryRunStore,
        code: &str,
        start: DateTime<Utc>,
        is_success: bool,
        ran_at: Option<NaiveTime>,
    ) {
        store
            .append(NewRunRecord {
                code: code.to_string(),
                start_time: start,
                end_time: start,
                is_success,
                message: String::new(),
                ran_at_time: ran_at,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_every_due_when_never_run() {
        let store = MemoryRunStore::new();
        let schedule = Schedule::every_minutes(5);
        let decision = evaluate(&schedule, &store, "job", at("2014-01-01 00:00:00"))
            .await
            .unwrap();
        assert!(decision.due);
    }

    #[tokio::test]
    async fn test_every_not_due_before_interval() {
        let store = MemoryRunStore::new();
        record_run(&store, "job", at("2014-01-01 00:00:00"), true, None).await;
        let schedule = Schedule::every_minutes(5);
        let decision = evaluate(&schedule, &store, "job", at("2014-01-01 00:04:59"))
            .await
            .unwrap();
        assert!(!decision.due);
    }

    #[tokio::test]
    async fn test_every_due_at_exact_boundary() {
        let store = MemoryRunStore::new();
        record_run(&store, "job", at("2014-01-01 00:00:00"), true, None).await;
        let schedule = Schedule::every_minutes(5);
        let decision = evaluate(&schedule, &store, "job", at("2014-01-01 00:05:00"))
            .await
            .unwrap();
        assert!(decision.due);
    }

    #[tokio::test]
    async fn test_every_retry_after_failure() {
        let store = MemoryRunStore::new();
        record_run(&store, "job", at("2014-01-01 00:00:00"), false, None).await;
        let schedule = Schedule::Every {
            every: Duration::from_secs(5 * 60),
            retry_after: Some(Duration::from_secs(60)),
        };
        let early = evaluate(&schedule, &store, "job", at("2014-01-01 00:00:30"))
            .await
            .unwrap();
        assert!(!early.due);
        let after_retry = evaluate(&schedule, &store, "job", at("2014-01-01 00:01:00"))
            .await
            .unwrap();
        assert!(after_retry.due);
    }

    #[tokio::test]
    async fn test_at_times_runs_once_per_slot() {
        let store = MemoryRunStore::new();
        let schedule = Schedule::at_times(vec![time("00:00"), time("00:05")]);

        let first = evaluate(&schedule, &store, "job", at("2014-01-01 00:00:01"))
            .await
            .unwrap();
        assert!(first.due);
        assert_eq!(first.ran_at_time, Some(time("00:00")));
        record_run(
            &store,
            "job",
            at("2014-01-01 00:00:01"),
            true,
            first.ran_at_time,
        )
        .await;

        let between = evaluate(&schedule, &store, "job", at("2014-01-01 00:04:50"))
            .await
            .unwrap();
        assert!(!between.due);

        let second = evaluate(&schedule, &store, "job", at("2014-01-01 00:05:01"))
            .await
            .unwrap();
        assert!(second.due);
        assert_eq!(second.ran_at_time, Some(time("00:05")));
    }

    #[tokio::test]
    async fn test_at_times_not_due_before_first_slot() {
        let store = MemoryRunStore::new();
        let schedule = Schedule::at_times(vec![time("06:00")]);
        let decision = evaluate(&schedule, &store, "job", at("2014-01-01 05:59:59"))
            .await
            .unwrap();
        assert!(!decision.due);
    }

    #[tokio::test]
    async fn test_at_times_skips_missed_earlier_slots() {
        let store = MemoryRunStore::new();
        let schedule = Schedule::at_times(vec![time("01:00"), time("02:00"), time("03:00")]);
        // Process was down for the first two slots; only the latest runs.
        let decision = evaluate(&schedule, &store, "job", at("2014-01-01 03:10:00"))
            .await
            .unwrap();
        assert!(decision.due);
        assert_eq!(decision.ran_at_time, Some(time("03:00")));
    }

    #[tokio::test]
    async fn test_at_times_due_again_next_day() {
        let store = MemoryRunStore::new();
        let schedule = Schedule::at_times(vec![time("00:00")]);
        record_run(
            &store,
            "job",
            at("2014-01-01 00:00:01"),
            true,
            Some(time("00:00")),
        )
        .await;
        let decision = evaluate(&schedule, &store, "job", at("2014-01-02 00:00:01"))
            .await
            .unwrap();
        assert!(decision.due);
    }
}
