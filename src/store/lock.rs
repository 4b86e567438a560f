//! Exclusive access to a store for the duration of one run.
//!
//! The lock is a sidecar file next to the store (`codedoc.toml.lock`) holding
//! an advisory exclusive lock. It is released and removed on drop.

use crate::error::ConfigurationError;
use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Holds the exclusive lock on a store
#[derive(Debug)]
pub struct StoreLock {
    /// Lock file handle
    lock_file: File,
    /// Path to the lock file (for cleanup and messages)
    lock_path: PathBuf,
}

impl StoreLock {
    /// Acquire the lock for `store_path` without waiting
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::StoreLocked`] if another run holds the
    /// lock, or an I/O error if the lock file cannot be created.
    pub fn acquire(store_path: &Path) -> Result<Self> {
        let lock_path = lock_path_for(store_path);
        let file = File::create(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        check_lock_outcome(file.try_lock_exclusive(), store_path, &lock_path)?;

        let mut file_ref = &file;
        let _ = writeln!(file_ref, "pid={}", std::process::id());
        debug!(lock = %lock_path.display(), "Store lock acquired");
        Ok(Self {
            lock_file: file,
            lock_path,
        })
    }

    /// Path of the sidecar lock file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock_file);

        if let Err(e) = fs::remove_file(&self.lock_path) {
            warn!(
                "Failed to remove lock file during cleanup {}: {}",
                self.lock_path.display(),
                e
            );
        }
    }
}

/// Turn the result of a lock attempt into a contention or I/O error
fn check_lock_outcome(
    outcome: io::Result<bool>,
    store_path: &Path,
    lock_path: &Path,
) -> Result<()> {
    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => Err(ConfigurationError::StoreLocked(store_path.to_path_buf()).into()),
        Err(e) => Err(e).with_context(|| format!("Failed to lock {}", lock_path.display())),
    }
}

/// Sidecar lock path: the store path with `.lock` appended
fn lock_path_for(store_path: &Path) -> PathBuf {
    let mut name = OsString::from(store_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}
