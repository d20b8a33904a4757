//! # cronhub-engine
//!
//! The scheduling engine for Cronhub:
//!
//! - A due-time policy that decides from run history whether a job
//!   should run now
//! - A job registry mapping identities to implementations
//! - The job runner orchestrating lock → due check → execute → record →
//!   release for a batch of jobs
//! - Built-in jobs: the failed-runs notifier and the config-declared
//!   shell command job

pub mod jobs;
pub mod registry;
pub mod runner;
pub mod schedule;
#[cfg(test)]
mod testing;

pub use registry::JobRegistry;
pub use runner::JobRunner;
