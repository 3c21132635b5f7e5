//! Database file
//!
//! Raw read/write of the JSON mapping. Callers must hold an ExclusiveSection.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::codec::{self, Mapping};
use crate::config::{Config, WriteStrategy};
use crate::error::{Result, StoreError};

/// The on-disk database file and how it is rewritten
#[derive(Debug)]
pub(crate) struct DatabaseFile {
    path: PathBuf,
    temp_path: PathBuf,
    write_strategy: WriteStrategy,
    sync_writes: bool,
}

impl DatabaseFile {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.db_path.clone(),
            temp_path: config.temp_path(),
            write_strategy: config.write_strategy,
            sync_writes: config.sync_writes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the whole file
    ///
    /// Corrupt content (including invalid UTF-8) surfaces as `Parse` and is
    /// left untouched on disk.
    pub fn read(&self) -> Result<Mapping> {
        let bytes = fs::read(&self.path)?;

        codec::parse_mapping(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the whole file content with `mapping`
    pub fn write(&self, mapping: &Mapping) -> Result<()> {
        let text = codec::to_json_string(mapping)?;

        match self.write_strategy {
            WriteStrategy::Overwrite => self.write_in_place(text.as_bytes()),
            WriteStrategy::AtomicRename => self.write_and_rename(text.as_bytes()),
        }
    }

    fn write_in_place(&self, bytes: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        file.write_all(bytes)?;
        if self.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }

    fn write_and_rename(&self, bytes: &[u8]) -> Result<()> {
        // Staging file is private to the lock holder, so a fixed name is safe
        let mut file = File::create(&self.temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&self.temp_path, &self.path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}
