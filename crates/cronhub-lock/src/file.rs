//! File lock backend.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use fs4::fs_std::FileExt;
use tracing::debug;

use cronhub_core::error::{AppError, ErrorKind};
use cronhub_core::result::AppResult;
use cronhub_core::traits::lock::LockBackend;

/// Lock backend using OS advisory exclusive locks.
///
/// Each code maps to `<dir>/<code>.lock`; acquisition is a non-blocking
/// `try_lock_exclusive` on that file. The open handle is kept until
/// release so the OS drops the lock automatically if the process dies.
#[derive(Debug)]
pub struct FileLockBackend {
    dir: PathBuf,
    /// Handles for locks held by this process.
    held: DashMap<String, File>,
}

impl FileLockBackend {
    /// Create a new file lock backend rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            held: DashMap::new(),
        }
    }

    fn lock_path(&self, code: &str) -> PathBuf {
        // Codes may contain separators; flatten them so every lock file
        // stays inside the configured directory.
        let name: String = code
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{name}.lock"))
    }

    fn open_lock_file(&self, code: &str) -> AppResult<File> {
        let path = self.lock_path(code);
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Lock,
                    format!("Failed to open lock file {}", path.display()),
                    e,
                )
            })
    }
}

#[async_trait]
impl LockBackend for FileLockBackend {
    async fn acquire(&self, code: &str) -> AppResult<bool> {
        if self.held.contains_key(code) {
            return Ok(false);
        }

        let file = self.open_lock_file(code)?;
        let acquired = file.try_lock_exclusive().map_err(|e| {
            AppError::with_source(ErrorKind::Lock, "Failed to try file lock", e)
        })?;

        if acquired {
            self.held.insert(code.to_string(), file);
        }
        debug!(code, acquired, "File lock attempt");
        Ok(acquired)
    }

    async fn release(&self, code: &str) -> AppResult<()> {
        if let Some((_, file)) = self.held.remove(code) {
            FileExt::unlock(&file).map_err(|e| {
                AppError::with_source(ErrorKind::Lock, "Failed to unlock file", e)
            })?;
            debug!(code, "File lock released");
        }
        Ok(())
    }

    async fn is_locked(&self, code: &str) -> AppResult<bool> {
        if self.held.contains_key(code) {
            return Ok(true);
        }
        // Probe with a fresh handle; releasing the probe lock immediately
        // leaves the observed state unchanged.
        let file = self.open_lock_file(code)?;
        let acquired = file.try_lock_exclusive().map_err(|e| {
            AppError::with_source(ErrorKind::Lock, "Failed to probe file lock", e)
        })?;
        if acquired {
            FileExt::unlock(&file).map_err(|e| {
                AppError::with_source(ErrorKind::Lock, "Failed to unlock probe", e)
            })?;
        }
        Ok(!acquired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_release_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileLockBackend::new(dir.path());
        assert!(backend.acquire("file_job").await.unwrap());
        assert!(backend.is_locked("file_job").await.unwrap());
        assert!(!backend.acquire("file_job").await.unwrap());
        backend.release("file_job").await.unwrap();
        assert!(!backend.is_locked("file_job").await.unwrap());
        assert!(backend.acquire("file_job").await.unwrap());
    }

    #[tokio::test]
    async fn test_two_backends_share_exclusion() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileLockBackend::new(dir.path());
        let second = FileLockBackend::new(dir.path());

        assert!(first.acquire("shared").await.unwrap());
        assert!(!second.acquire("shared").await.unwrap());
        first.release("shared").await.unwrap();
        assert!(second.acquire("shared").await.unwrap());
    }

    #[tokio::test]
    async fn test_release_without_hold_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileLockBackend::new(dir.path());
        backend.release("never_held").await.unwrap();
    }

    #[tokio::test]
    async fn test_code_with_separator_stays_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileLockBackend::new(dir.path());
        assert!(backend.acquire("group/job").await.unwrap());
        assert!(dir.path().join("group_job.lock").exists());
        backend.release("group/job").await.unwrap();
    }
}
