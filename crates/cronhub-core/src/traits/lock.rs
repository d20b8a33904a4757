//! Mutual-exclusion backend trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Exclusive try-lock keyed by job code.
///
/// At most one live holder exists per code at any instant, system-wide.
/// Acquisition is non-blocking: a denied attempt returns `false`
/// immediately rather than queueing. Errors mean the backend itself is
/// unavailable, which callers treat as "could not run this attempt".
#[async_trait]
pub trait LockBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Attempt to transition the code's lock from free to held, atomically.
    /// Returns `true` iff the caller now holds the lock.
    async fn acquire(&self, code: &str) -> AppResult<bool>;

    /// Unconditionally clear the held state. Must be called on every exit
    /// path of the guarded section.
    async fn release(&self, code: &str) -> AppResult<()>;

    /// Check whether the code is currently held.
    async fn is_locked(&self, code: &str) -> AppResult<bool>;
}
