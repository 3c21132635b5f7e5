//! Exclusive section
//!
//! Scoped acquisition of both lock levels around one read-modify-write cycle.

use parking_lot::{Mutex, MutexGuard};

use crate::codec::Mapping;
use crate::error::Result;
use crate::lock::{ProcessLock, ProcessLockGuard};

use super::DatabaseFile;

/// Proof of exclusive access to the database file
///
/// Fields drop in declaration order, so the process lock is released before
/// the thread lock.
pub(crate) struct ExclusiveSection<'a> {
    _process: ProcessLockGuard<'a>,
    _thread: MutexGuard<'a, ()>,
    file: &'a DatabaseFile,
}

impl<'a> ExclusiveSection<'a> {
    /// Take the thread lock, then the process lock. Blocks on both.
    pub fn enter(
        thread_lock: &'a Mutex<()>,
        process_lock: &'a ProcessLock,
        file: &'a DatabaseFile,
    ) -> Result<Self> {
        let thread = thread_lock.lock();
        let process = process_lock.acquire()?;

        Ok(Self {
            _process: process,
            _thread: thread,
            file,
        })
    }

    /// Whether the database file is present
    pub fn exists(&self) -> bool {
        self.file.exists()
    }

    /// Materialize the full mapping from disk
    pub fn load(&self) -> Result<Mapping> {
        self.file.read()
    }

    /// Write the full mapping back to disk
    pub fn flush(&self, mapping: &Mapping) -> Result<()> {
        self.file.write(mapping)
    }
}
