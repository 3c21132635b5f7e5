//! Tests for the mapping codec
//!
//! These tests verify:
//! - Parsing valid and corrupt file content
//! - Spaced serialization format
//! - Insertion order vs sorted output
//! - ASCII escaping and number fidelity

use jsonkv::codec::{self, Mapping};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn mapping(value: Value) -> Mapping {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_empty_object() {
    let parsed = codec::parse_mapping("{}").unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_parse_nested_values() {
    let parsed = codec::parse_mapping(r#"{"a": 1, "b": {"c": [true, null, "x"]}}"#).unwrap();

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed["b"], json!({"c": [true, null, "x"]}));
}

#[test]
fn test_parse_zero_length_fails() {
    assert!(codec::parse_mapping("").is_err());
}

#[test]
fn test_parse_truncated_fails() {
    assert!(codec::parse_mapping(r#"{"a": 1, "b": [1, 2"#).is_err());
}

#[test]
fn test_parse_invalid_utf8_fails() {
    assert!(codec::parse_mapping(b"{\"a\": \"\xff\"}").is_err());
}

#[test]
fn test_parse_keeps_big_integer_text() {
    let text = r#"{"big": 123456789012345678901234567890, "neg": -98765432109876543210}"#;

    let parsed = codec::parse_mapping(text).unwrap();

    assert_eq!(codec::to_json_string(&parsed).unwrap(), text);
}

#[test]
fn test_parse_non_object_fails() {
    assert!(codec::parse_mapping("[1, 2, 3]").is_err());
    assert!(codec::parse_mapping("42").is_err());
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_empty_mapping_serializes_to_braces() {
    assert_eq!(codec::to_json_string(&Mapping::new()).unwrap(), "{}");
    assert_eq!(codec::to_sorted_json_string(&Mapping::new()).unwrap(), "{}");
}

#[test]
fn test_spaced_separators() {
    let map = mapping(json!({"a": 1, "b": [1, 2, 3], "c": {"d": null}}));

    assert_eq!(
        codec::to_json_string(&map).unwrap(),
        r#"{"a": 1, "b": [1, 2, 3], "c": {"d": null}}"#
    );
}

#[test]
fn test_insertion_order_preserved() {
    let mut map = Mapping::new();
    map.insert("zeta".to_string(), json!(1));
    map.insert("alpha".to_string(), json!(2));

    assert_eq!(codec::to_json_string(&map).unwrap(), r#"{"zeta": 1, "alpha": 2}"#);
}

#[test]
fn test_sorted_output_orders_keys() {
    let mut map = Mapping::new();
    map.insert("b".to_string(), json!(2));
    map.insert("a".to_string(), json!(1));
    map.insert("B".to_string(), json!(0));

    assert_eq!(
        codec::to_sorted_json_string(&map).unwrap(),
        r#"{"B": 0, "a": 1, "b": 2}"#
    );
}

#[test]
fn test_sorted_output_is_recursive() {
    let mut inner = Mapping::new();
    inner.insert("y".to_string(), json!(1));
    inner.insert("x".to_string(), json!(2));

    let mut map = Mapping::new();
    map.insert("outer".to_string(), Value::Array(vec![Value::Object(inner.clone())]));
    map.insert("nested".to_string(), Value::Object(inner));

    assert_eq!(
        codec::to_sorted_json_string(&map).unwrap(),
        r#"{"nested": {"x": 2, "y": 1}, "outer": [{"x": 2, "y": 1}]}"#
    );
}

#[test]
fn test_sorted_output_parses_back_equal() {
    let map = mapping(json!({"k3": "v", "k1": [1, {"b": 1, "a": 2}], "k2": 2.5}));

    let text = codec::to_sorted_json_string(&map).unwrap();
    let parsed = codec::parse_mapping(&text).unwrap();

    assert_eq!(parsed, map);
}

#[test]
fn test_non_ascii_escaped() {
    let map = mapping(json!({"clé": "✓", "emoji": "😀"}));

    assert_eq!(
        codec::to_json_string(&map).unwrap(),
        r#"{"cl\u00e9": "\u2713", "emoji": "\ud83d\ude00"}"#
    );
}

#[test]
fn test_unicode_strings_round_trip() {
    let map = mapping(json!({"clé": "värde ✓", "quote": "a \"b\""}));

    let text = codec::to_json_string(&map).unwrap();

    assert_eq!(codec::parse_mapping(&text).unwrap(), map);
}
