//! Process Lock
//!
//! Advisory exclusive lock on a companion file, via fs2.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{Result, StoreError};

/// Exclusive lock shared by every process pointing at the same lock file
///
/// Locks belong to the open file handle, so two `ProcessLock`s on the same
/// path exclude each other even inside one process.
#[derive(Debug)]
pub struct ProcessLock {
    /// Path of the lock file
    path: PathBuf,

    /// Open handle the OS lock is attached to
    file: File,
}

impl ProcessLock {
    /// Open (creating if needed) the lock file at `path`
    ///
    /// Fails with `LockAcquisition` if the directory is not writable.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| StoreError::LockAcquisition {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Block until this handle holds the exclusive lock
    ///
    /// Waits indefinitely. Callers within one process must serialize their
    /// use of a single handle (the Store's thread lock does this).
    pub fn acquire(&self) -> Result<ProcessLockGuard<'_>> {
        FileExt::lock_exclusive(&self.file).map_err(|source| StoreError::LockAcquisition {
            path: self.path.clone(),
            source,
        })?;

        tracing::trace!(path = %self.path.display(), "process lock acquired");
        Ok(ProcessLockGuard { lock: self })
    }

    /// Try to take the lock without blocking
    ///
    /// Returns `Ok(None)` if another handle currently holds it.
    pub fn try_acquire(&self) -> Result<Option<ProcessLockGuard<'_>>> {
        match FileExt::try_lock_exclusive(&self.file) {
            Ok(()) => Ok(Some(ProcessLockGuard { lock: self })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(source) => Err(StoreError::LockAcquisition {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Get the lock file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Holds the process lock; releases it when dropped
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ProcessLockGuard<'a> {
    lock: &'a ProcessLock,
}

impl Drop for ProcessLockGuard<'_> {
    fn drop(&mut self) {
        // Closing the handle would also release it, but the handle outlives the guard
        if let Err(e) = FileExt::unlock(&self.lock.file) {
            tracing::warn!(path = %self.lock.path.display(), error = %e, "failed to release process lock");
        } else {
            tracing::trace!(path = %self.lock.path.display(), "process lock released");
        }
    }
}
