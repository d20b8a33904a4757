//! Explicit job registry.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use cronhub_core::traits::job::CronJob;

/// Mapping from job identity to implementation, populated at process
/// startup by the entry point and handed to the runner.
///
/// The registration name is what batch invocations resolve against; it is
/// normally the job's own `code()`, but the two are kept separate so a
/// misdeclared job (empty code) can still be registered and rejected with
/// a configuration error at run time rather than disappearing silently.
#[derive(Default)]
pub struct JobRegistry {
    jobs: HashMap<String, Arc<dyn CronJob>>,
}

impl std::fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job under an explicit name.
    pub fn register_as(&mut self, name: impl Into<String>, job: Arc<dyn CronJob>) {
        let name = name.into();
        info!(name, "Registered cron job");
        self.jobs.insert(name, job);
    }

    /// Register a job under its own code.
    pub fn register(&mut self, job: Arc<dyn CronJob>) {
        self.register_as(job.code().to_string(), job);
    }

    /// Resolve a name to a registered job.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn CronJob>> {
        self.jobs.get(name).cloned()
    }

    /// All registered names, sorted for stable batch ordering.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.jobs.keys().cloned().collect();
        names.sort();
        names
    }
}
