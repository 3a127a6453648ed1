//! Tests for key lookup strategies
//!
//! Keys are opaque small integers: not necessarily contiguous, sorted, or
//! equal to their bucket position.

#[path = "../common/mod.rs"]
mod common;

use common::Fixture;
use mapbuffer::{Config, KeyLookup, MapBuffer, MapBufferError};

// =============================================================================
// Helper Functions
// =============================================================================

fn with_lookup(bytes: Vec<u8>, lookup: KeyLookup) -> MapBuffer {
    let config = Config::builder().key_lookup(lookup).build();
    MapBuffer::with_config(bytes, config).unwrap()
}

/// Keys 10, 3, 7 in that order: none sits at its own index
fn sparse_bytes() -> Vec<u8> {
    Fixture::new()
        .int(10, 100)
        .int(3, 30)
        .string(7, "seven")
        .build()
}

// =============================================================================
// Auto Lookup Tests
// =============================================================================

#[test]
fn test_auto_positional_keys() {
    let map = MapBuffer::new(Fixture::new().int(0, 1).int(1, 2).int(2, 3).build()).unwrap();

    assert_eq!(map.get_int(0).unwrap(), 1);
    assert_eq!(map.get_int(1).unwrap(), 2);
    assert_eq!(map.get_int(2).unwrap(), 3);
}

#[test]
fn test_auto_sparse_unsorted_keys() {
    let map = MapBuffer::new(sparse_bytes()).unwrap();

    assert_eq!(map.get_int(10).unwrap(), 100);
    assert_eq!(map.get_int(3).unwrap(), 30);
    assert_eq!(map.get_string(7).unwrap(), "seven");
}

#[test]
fn test_auto_falls_back_when_position_holds_other_key() {
    // Bucket 1 holds key 0, bucket 0 holds key 1
    let map = MapBuffer::new(Fixture::new().int(1, 11).int(0, 22).build()).unwrap();

    assert_eq!(map.get_int(1).unwrap(), 11);
    assert_eq!(map.get_int(0).unwrap(), 22);
}

#[test]
fn test_missing_key() {
    let map = MapBuffer::new(sparse_bytes()).unwrap();

    assert!(matches!(
        map.get_int(4),
        Err(MapBufferError::KeyNotFound { key: 4 })
    ));
    assert!(matches!(
        map.get_string(u16::MAX),
        Err(MapBufferError::KeyNotFound { key: u16::MAX })
    ));
}

#[test]
fn test_missing_key_in_empty_map() {
    let map = MapBuffer::new(Fixture::new().build()).unwrap();
    assert!(matches!(
        map.get_double(0),
        Err(MapBufferError::KeyNotFound { key: 0 })
    ));
}

#[test]
fn test_contains_key() {
    let map = MapBuffer::new(sparse_bytes()).unwrap();

    assert!(map.contains_key(10).unwrap());
    assert!(map.contains_key(7).unwrap());
    assert!(!map.contains_key(0).unwrap());
    assert!(!map.contains_key(11).unwrap());
}

// =============================================================================
// Positional Lookup Tests
// =============================================================================

#[test]
fn test_positional_matching_keys() {
    let map = with_lookup(
        Fixture::new().int(0, 5).string(1, "one").build(),
        KeyLookup::Positional,
    );

    assert_eq!(map.get_int(0).unwrap(), 5);
    assert_eq!(map.get_string(1).unwrap(), "one");
}

#[test]
fn test_positional_rejects_displaced_keys() {
    let map = with_lookup(sparse_bytes(), KeyLookup::Positional);

    assert!(matches!(
        map.get_int(10),
        Err(MapBufferError::KeyNotFound { key: 10 })
    ));
    assert!(matches!(
        map.get_int(3),
        Err(MapBufferError::KeyNotFound { key: 3 })
    ));
    assert!(!map.contains_key(7).unwrap());
}

// =============================================================================
// Scan Lookup Tests
// =============================================================================

#[test]
fn test_scan_sparse_keys() {
    let map = with_lookup(sparse_bytes(), KeyLookup::Scan);

    assert_eq!(map.get_int(10).unwrap(), 100);
    assert_eq!(map.get_int(3).unwrap(), 30);
    assert_eq!(map.get_string(7).unwrap(), "seven");
    assert!(matches!(
        map.get_int(0),
        Err(MapBufferError::KeyNotFound { key: 0 })
    ));
}

#[test]
fn test_scan_returns_first_duplicate() {
    let map = with_lookup(
        Fixture::new().int(5, 1).int(5, 2).build(),
        KeyLookup::Scan,
    );
    assert_eq!(map.get_int(5).unwrap(), 1);
}

#[test]
fn test_auto_prefers_positional_duplicate() {
    // Key 1 is stored twice: at index 0 and at its own index 1
    let bytes = Fixture::new().int(1, 10).int(1, 20).build();

    let auto = MapBuffer::new(bytes.clone()).unwrap();
    let scan = with_lookup(bytes, KeyLookup::Scan);

    assert_eq!(auto.get_int(1).unwrap(), 20);
    assert_eq!(scan.get_int(1).unwrap(), 10);
}

#[test]
fn test_strategies_agree_on_positional_buffers() {
    let bytes = Fixture::new()
        .int(0, -7)
        .double(1, 2.5)
        .string(2, "two")
        .null(3)
        .build();

    for lookup in [KeyLookup::Auto, KeyLookup::Positional, KeyLookup::Scan] {
        let map = with_lookup(bytes.clone(), lookup);
        assert_eq!(map.get_int(0).unwrap(), -7);
        assert_eq!(map.get_double(1).unwrap(), 2.5);
        assert_eq!(map.get_string(2).unwrap(), "two");
        assert!(map.is_null(3).unwrap());
    }
}
