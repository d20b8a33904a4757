//! Domain types shared across the Cronhub crates.

pub mod duration;
pub mod query;
pub mod report;
pub mod run_record;
pub mod schedule;

pub use duration::humanize_duration;
pub use query::RunQuery;
pub use report::{BatchReport, FailureReport, JobReport, RunOptions, RunOutcome};
pub use run_record::{NewRunRecord, RunRecord};
pub use schedule::Schedule;
