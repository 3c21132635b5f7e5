//! Lock Module
//!
//! Cross-process mutual exclusion over the database file.
//!
//! ## Responsibilities
//! - Own one lock-file handle per Store (no process-wide singletons)
//! - Block until exclusive access is granted (no timeout)
//! - Release on guard drop, on every exit path
//!
//! ## Lock File
//! ```text
//! {db_path}.lock   content never read, only its flock state matters
//! ```
//! The file is created on first open and survives releases.

mod process;

pub use process::{ProcessLock, ProcessLockGuard};
