//! Mapping codec
//!
//! Parsing and serialization of the database file content.
//!
//! ## Text Format
//! One JSON object per file, written with spaced separators and non-ASCII
//! characters escaped as `\uXXXX`:
//! ```text
//! {"a": 1, "b": [1, 2, 3], "c": {"x": null}, "cl\u00e9": "\u2713"}
//! ```
//! The sorted form orders keys ascending at every nesting level.
//! Numbers keep their exact text, so integers beyond 64 bits survive rewrites.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};

use crate::error::Result;

/// In-memory form of the whole database (insertion ordered)
pub type Mapping = Map<String, Value>;

// =============================================================================
// Parsing
// =============================================================================

/// Parse file content into a mapping
///
/// Empty, truncated, non-UTF-8, or non-object content is an error.
pub fn parse_mapping(bytes: impl AsRef<[u8]>) -> std::result::Result<Mapping, serde_json::Error> {
    serde_json::from_slice(bytes.as_ref())
}

// =============================================================================
// Serialization
// =============================================================================

/// Serialize a mapping in insertion order
pub fn to_json_string(mapping: &Mapping) -> Result<String> {
    write_spaced(mapping)
}

/// Serialize a mapping with keys sorted ascending, recursively
///
/// Output is deterministic for equal mappings regardless of insertion order.
pub fn to_sorted_json_string(mapping: &Mapping) -> Result<String> {
    write_spaced(&sort_mapping(mapping))
}

/// Copy of `mapping` with keys in ascending order at every level
pub fn sort_mapping(mapping: &Mapping) -> Mapping {
    let mut entries: Vec<(&String, &Value)> = mapping.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), sort_value(value)))
        .collect()
}

fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(inner) => Value::Object(sort_mapping(inner)),
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

fn write_spaced<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;

    String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Compact JSON with a space after `,` and `:`, ASCII-only output
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;

            // Astral characters become a surrogate pair
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
