//! # jsonkv
//!
//! A persistent key-value store backed by a single JSON file:
//! - Whole-file read-modify-write for every operation
//! - Thread-safe within a process (one lock per `Store`)
//! - Process-safe across processes (`{db_path}.lock` file lock)
//! - Optional write-to-temp-then-rename flushes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Store API                            │
//! │     set / get / remove / keys / values / items / dumps      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Exclusive Section                          │
//! │        thread lock (Mutex) ──▶ process lock (flock)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    load     │          │    flush    │
//!   │ (parse all) │          │ (write all) │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │  db.json     │
//!               └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use jsonkv::Store;
//!
//! let store = Store::open("db.json")?;
//! store.set("a", 1)?;
//! assert_eq!(store.get("a")?, Some(serde_json::json!(1)));
//! # Ok::<(), jsonkv::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod lock;
mod storage;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, WriteStrategy};
pub use engine::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of jsonkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
