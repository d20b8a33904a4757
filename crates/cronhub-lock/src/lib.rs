//! # cronhub-lock
//!
//! Mutual-exclusion backends for Cronhub. Three implementations of the
//! [`LockBackend`] trait sit behind one manager:
//!
//! - **database**: a boolean row per job code, acquired with a
//!   conditional single-row update
//! - **cache**: an atomic set-if-not-exists cache key with a TTL
//! - **file**: an OS advisory exclusive lock on a per-code file
//!
//! The backend is selected at runtime based on configuration.
//!
//! [`LockBackend`]: cronhub_core::traits::lock::LockBackend

pub mod cache;
pub mod database;
pub mod file;
pub mod manager;

pub use cache::CacheLockBackend;
pub use database::DatabaseLockBackend;
pub use file::FileLockBackend;
pub use manager::LockManager;
