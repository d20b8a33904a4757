//! Watch-mode scheduler configuration.

use serde::{Deserialize, Serialize};

/// Settings for the long-running `watch` loop that invokes the configured
/// job batch on a fixed interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Interval in seconds between batch invocations.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    60
}
