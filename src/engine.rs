//! Engine Module
//!
//! The store engine: key-value operations over one JSON database file.
//!
//! ## Responsibilities
//! - Bootstrap the database file (create `{}` if absent)
//! - Run every operation as a whole-file read-modify-write cycle
//! - Serialize callers across threads and across processes
//! - Report every failure through `StoreError`

use std::path::Path;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{self, Mapping};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::lock::ProcessLock;
use crate::storage::{DatabaseFile, ExclusiveSection};

/// A JSON key-value store backed by a single file
///
/// ## Concurrency Model: Fully Serialized
///
/// Every operation, reads included, runs inside an `ExclusiveSection`:
///   thread_lock (this instance) → process_lock (`{db_path}.lock`)
///
/// - Threads sharing one `Store` (via `Arc`) are serialized by `thread_lock`
/// - Processes (or other `Store`s) on the same path are serialized by the
///   lock file
/// - Nothing is cached: each operation re-reads the file, so writes from any
///   process are visible to the next call
#[derive(Debug)]
pub struct Store {
    /// Store configuration
    config: Config,

    /// The database file (sole source of truth)
    file: DatabaseFile,

    /// Cross-process lock handle owned by this instance
    process_lock: ProcessLock,

    /// Serializes operations issued by threads of this process
    thread_lock: Mutex<()>,
}

impl Store {
    /// Open the store at `path`, creating the file with `{}` if absent
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().db_path(path.as_ref()).build();
        Self::with_config(config)
    }

    /// Open the store with an explicit config
    ///
    /// Fails with `LockAcquisition` if the lock file cannot be created or
    /// locked (unwritable directory, filesystem without lock support).
    pub fn with_config(config: Config) -> Result<Self> {
        let process_lock = ProcessLock::open(&config.lock_path())?;
        let file = DatabaseFile::new(&config);

        let store = Self {
            config,
            file,
            process_lock,
            thread_lock: Mutex::new(()),
        };
        store.init()?;

        tracing::debug!(path = %store.path().display(), "store opened");
        Ok(store)
    }

    /// Ensure the database file exists. Idempotent.
    ///
    /// Check-and-create runs under the process lock so two processes cannot
    /// both create the file.
    pub fn init(&self) -> Result<()> {
        let result = self.enter().and_then(|section| {
            if !section.exists() {
                tracing::info!(path = %self.path().display(), "creating empty database file");
                section.flush(&Mapping::new())?;
            }
            Ok(())
        });

        self.report("init", result)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set `key` to `value`, replacing any previous value
    ///
    /// The key is coerced to its string form (`1` and `"1"` are the same key).
    pub fn set<K: ToString, V: Serialize>(&self, key: K, value: V) -> Result<()> {
        let key = key.to_string();

        let result = serde_json::to_value(value)
            .map_err(StoreError::from)
            .and_then(|value| {
                let section = self.enter()?;
                let mut mapping = section.load()?;
                mapping.insert(key.clone(), value);
                section.flush(&mapping)
            });

        tracing::debug!(key = %key, ok = result.is_ok(), "set");
        self.report("set", result)
    }

    /// Remove `key`
    ///
    /// Unlike the read operations, a missing key is an error
    /// (`StoreError::KeyNotFound`) so callers can tell "nothing to delete"
    /// from a successful delete.
    pub fn remove<K: ToString>(&self, key: K) -> Result<()> {
        let key = key.to_string();

        let result = self.enter().and_then(|section| {
            let mut mapping = section.load()?;
            if mapping.remove(&key).is_none() {
                return Err(StoreError::KeyNotFound(key.clone()));
            }
            section.flush(&mapping)
        });

        tracing::debug!(key = %key, ok = result.is_ok(), "remove");
        self.report("remove", result)
    }

    /// Replace the whole mapping with an empty one. Irreversible.
    pub fn truncate(&self) -> Result<()> {
        let result = self
            .enter()
            .and_then(|section| section.flush(&Mapping::new()));

        tracing::debug!(ok = result.is_ok(), "truncate");
        self.report("truncate", result)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get the value for `key`, or `None` if absent
    pub fn get<K: ToString>(&self, key: K) -> Result<Option<Value>> {
        let key = key.to_string();
        let mut mapping = self.load()?;
        Ok(mapping.remove(&key))
    }

    /// Get the value for `key` deserialized as `T`
    pub fn get_as<K: ToString, T: DeserializeOwned>(&self, key: K) -> Result<Option<T>> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Snapshot of all keys, in insertion order
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_iter().map(|(k, _)| k).collect())
    }

    /// Snapshot of all values, in insertion order
    pub fn values(&self) -> Result<Vec<Value>> {
        Ok(self.load()?.into_iter().map(|(_, v)| v).collect())
    }

    /// Snapshot of all (key, value) pairs, in insertion order
    pub fn items(&self) -> Result<Vec<(String, Value)>> {
        Ok(self.load()?.into_iter().collect())
    }

    /// Serialized mapping with keys sorted ascending (deterministic)
    pub fn dumps(&self) -> Result<String> {
        codec::to_sorted_json_string(&self.load()?)
    }

    /// Serialized mapping in stored order
    pub fn to_json(&self) -> Result<String> {
        codec::to_json_string(&self.load()?)
    }

    /// Number of keys
    pub fn size(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Number of keys (same as `size`)
    pub fn len(&self) -> Result<usize> {
        self.size()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == 0)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the database file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Get the lock file path
    pub fn lock_path(&self) -> &Path {
        self.process_lock.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn enter(&self) -> Result<ExclusiveSection<'_>> {
        ExclusiveSection::enter(&self.thread_lock, &self.process_lock, &self.file)
    }

    /// Read-only cycle: full load under exclusive access
    fn load(&self) -> Result<Mapping> {
        self.enter()?.load()
    }

    /// Log a failed mutation at the operation boundary and pass it on
    fn report<T>(&self, op: &'static str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if !e.is_key_not_found() {
                tracing::error!(op, path = %self.path().display(), error = %e, "error while writing to database");
            }
        }
        result
    }
}
