//! Due-time schedule declarations.

use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A job's declared schedule, selecting one of the two due-time policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Schedule {
    /// Minimum-interval policy: due once `every` has elapsed since the
    /// start of the most recent run (boundary inclusive).
    Every {
        /// Minimum gap between run starts.
        every: Duration,
        /// If the last run failed, retry after this shorter gap instead.
        retry_after: Option<Duration>,
    },
    /// Fixed-times-of-day policy: one run per listed time per day.
    AtTimes(Vec<NaiveTime>),
}

impl Schedule {
    /// Minimum-interval schedule without a failure retry override.
    pub fn every(every: Duration) -> Self {
        Self::Every {
            every,
            retry_after: None,
        }
    }

    /// Minimum-interval schedule expressed in minutes.
    pub fn every_minutes(minutes: u64) -> Self {
        Self::every(Duration::from_secs(minutes * 60))
    }

    /// Fixed-times-of-day schedule. Times are kept sorted so the policy
    /// can find the most recent due slot by scanning from the end.
    pub fn at_times(mut times: Vec<NaiveTime>) -> Self {
        times.sort();
        Self::AtTimes(times)
    }
}
