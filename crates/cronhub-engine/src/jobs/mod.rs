//! Built-in job implementations.

pub mod command;
pub mod failed_runs;

pub use command::CommandJob;
pub use failed_runs::FailedRunsNotificationJob;
