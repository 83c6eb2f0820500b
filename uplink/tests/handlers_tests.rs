// Tests for CLI handler helpers

use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;
use uplink::{format_label_map, load_config, parse_protocol};
use uplink_topology::model::Protocol;

// ============================================================================
// Protocol parsing
// ============================================================================

#[test]
fn test_parse_protocol_known() {
    assert_eq!(parse_protocol("lldp"), Some(Protocol::Lldp));
    assert_eq!(parse_protocol("cdp"), Some(Protocol::Cdp));
    assert_eq!(parse_protocol("bridge"), Some(Protocol::Bridge));
}

#[test]
fn test_parse_protocol_case_insensitive() {
    assert_eq!(parse_protocol("LLDP"), Some(Protocol::Lldp));
    assert_eq!(parse_protocol("Bridge"), Some(Protocol::Bridge));
}

#[test]
fn test_parse_protocol_unknown() {
    assert_eq!(parse_protocol("ospf"), None);
    assert_eq!(parse_protocol(""), None);
}

// ============================================================================
// Config loading
// ============================================================================

#[test]
fn test_load_config_explicit_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "max_hops": 2 }}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.max_hops, 2);
    assert_eq!(config.context, "provision");
}

#[test]
fn test_load_config_explicit_path_must_exist() {
    let path = "/nonexistent/uplink/config.json".to_string();
    assert!(load_config(Some(&path)).is_err());
}

// ============================================================================
// Output formatting
// ============================================================================

#[test]
fn test_format_label_map_sorted() {
    let map = HashMap::from([
        ("h2".to_string(), "sw".to_string()),
        ("h1".to_string(), "sw".to_string()),
    ]);

    let out = format_label_map(&map);
    assert_eq!(out, "  h1 -> sw\n  h2 -> sw\n");
}

#[test]
fn test_format_label_map_empty() {
    assert_eq!(format_label_map(&HashMap::new()), "");
}
