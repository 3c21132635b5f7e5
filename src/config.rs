//! Configuration for jsonkv
//!
//! Centralized configuration with sensible defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the database file. Companion files live next to it:
    ///   {db_path}        (the JSON mapping)
    ///   {db_path}.lock   (cross-process lock)
    ///   {db_path}.tmp    (only with WriteStrategy::AtomicRename)
    pub db_path: PathBuf,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// How a flush replaces the file content
    pub write_strategy: WriteStrategy,

    /// fsync the database file after every flush
    pub sync_writes: bool,
}

/// Write strategy used when flushing the mapping to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteStrategy {
    /// Truncate and rewrite the file in place.
    /// A crash mid-write can leave a corrupt file (reported as a parse error).
    #[default]
    Overwrite,

    /// Write to `{db_path}.tmp`, fsync it, then rename over the database file
    AtomicRename,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./jsonkv.json"),
            write_strategy: WriteStrategy::Overwrite,
            sync_writes: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the lock file guarding the database (`{db_path}.lock`)
    pub fn lock_path(&self) -> PathBuf {
        with_suffix(&self.db_path, ".lock")
    }

    /// Path of the staging file used by atomic writes (`{db_path}.tmp`)
    pub fn temp_path(&self) -> PathBuf {
        with_suffix(&self.db_path, ".tmp")
    }
}

/// Append a suffix to the full file name ("db.json" → "db.json.lock")
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the write strategy
    pub fn write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.config.write_strategy = strategy;
        self
    }

    /// Enable or disable fsync after each flush
    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.config.sync_writes = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
