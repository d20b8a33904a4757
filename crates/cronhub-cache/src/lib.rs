//! # cronhub-cache
//!
//! Cache provider implementations for Cronhub:
//!
//! - **memory**: In-process cache over [dashmap](https://crates.io/crates/dashmap)
//!   with per-entry expiry
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. The cache
//! lock backend builds on the provider's atomic `set_nx`.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
