//! # cronhub-database
//!
//! PostgreSQL connection management, migrations, and the run-history
//! repository for Cronhub.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::run_log::RunLogRepository;
