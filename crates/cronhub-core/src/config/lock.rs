//! Lock backend configuration.

use serde::{Deserialize, Serialize};

/// Mutual-exclusion backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Lock backend type: `"database"`, `"cache"`, or `"file"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Maximum lifetime of a cache-backed lock in seconds.
    ///
    /// The TTL is the safety net against a crashed holder: a lock that is
    /// never released expires after this long.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Directory for file-backed lock files.
    #[serde(default = "default_file_dir")]
    pub file_dir: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            cache_ttl_seconds: default_cache_ttl(),
            file_dir: default_file_dir(),
        }
    }
}

fn default_backend() -> String {
    "cache".to_string()
}

// 24 hours, matching the longest run any job is expected to make.
fn default_cache_ttl() -> u64 {
    24 * 60 * 60
}

fn default_file_dir() -> String {
    std::env::temp_dir().to_string_lossy().into_owned()
}
