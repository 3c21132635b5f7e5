//! Error types for jsonkv
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for jsonkv operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Locking Errors
    // -------------------------------------------------------------------------
    #[error("Failed to lock {}: {source}", .path.display())]
    LockAcquisition {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    #[error("Database file {} is not a valid JSON object: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Non-existent key {0:?} in database")]
    KeyNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True if this is the `KeyNotFound` raised by `remove`
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound(_))
    }
}
