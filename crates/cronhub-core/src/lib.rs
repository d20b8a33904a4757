//! # cronhub-core
//!
//! Core crate for Cronhub. Contains the provider traits, configuration
//! schemas, domain types (run records, schedules, reports), and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Cronhub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
