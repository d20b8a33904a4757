//! Provider and collaborator traits implemented across the Cronhub crates.

pub mod cache;
pub mod history;
pub mod job;
pub mod lock;
pub mod notify;

pub use cache::CacheProvider;
pub use history::RunHistoryStore;
pub use job::CronJob;
pub use lock::LockBackend;
pub use notify::Notifier;
