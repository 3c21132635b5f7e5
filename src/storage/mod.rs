//! Storage Module
//!
//! Whole-file persistence of the mapping, reachable only under exclusive access.
//!
//! ## Responsibilities
//! - Read and parse the entire database file
//! - Serialize and write back the entire mapping
//! - Compose the thread lock and process lock into one scoped section
//!
//! ## Lock Order
//! ```text
//! acquire:  thread lock ──▶ process lock
//! release:  process lock ──▶ thread lock   (guard drop, every exit path)
//! ```

mod file;
mod section;

pub(crate) use file::DatabaseFile;
pub(crate) use section::ExclusiveSection;
