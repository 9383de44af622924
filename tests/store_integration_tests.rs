//! Integration Tests for the Store
//!
//! Exercises the public store API end to end with explicit logical time.

use std::sync::Arc;

use mini_kv::kv::{ManualClock, Value};
use mini_kv::{Lookup, SharedStore, Store, StoreError};
use serde_json::json;

// == Expiry ==

#[test]
fn test_alive_until_boundary_scenario() {
    let mut store = Store::new();
    store.write("a", json!("alive"), Some(10.0), Some(100.0));

    assert_eq!(store.read("a", Some(109.999)), Lookup::Present(json!("alive")));
    assert_eq!(store.read("a", Some(110.0)), Lookup::Absent);
    assert_eq!(store.keys(Some(110.0)), Vec::<String>::new());
}

#[test]
fn test_overwrite_extends_lifetime() {
    let mut store = Store::new();
    store.write("k", json!(1), Some(10.0), Some(0.0));
    store.write("k", json!(2), Some(100.0), Some(5.0));

    assert_eq!(store.read("k", Some(10.0)), Lookup::Present(json!(2)));
    assert_eq!(store.read("k", Some(104.999)), Lookup::Present(json!(2)));
    assert_eq!(store.read("k", Some(105.0)), Lookup::Absent);
}

#[test]
fn test_two_lazily_expired_keys() {
    let mut store = Store::new();
    store.write("short", json!(1), Some(1.0), Some(0.0));
    store.write("long", json!(2), Some(3.0), Some(0.0));

    assert_eq!(store.keys(Some(2.0)), vec!["long"]);
    assert_eq!(store.keys(Some(3.0)), Vec::<String>::new());
    // Nothing was swept.
    assert_eq!(store.len(), 2);
}

// == Compare And Set ==

#[test]
fn test_cas_lock_handoff() {
    let mut store = Store::new();

    // Acquire a lease that expires at t=30.
    assert!(store.compare_and_set("lease", &Lookup::Absent, json!("w1"), Some(0.0)));
    store.write("lease", json!("w1"), Some(30.0), Some(0.0));

    // A second worker cannot take it while live.
    assert!(!store.compare_and_set("lease", &Lookup::Absent, json!("w2"), Some(29.0)));

    // Once expired, it can.
    assert!(store.compare_and_set("lease", &Lookup::Absent, json!("w2"), Some(30.0)));
    assert_eq!(store.read("lease", Some(1e6)), Lookup::Present(json!("w2")));
}

#[test]
fn test_cas_with_clock_fallback() {
    let clock = Arc::new(ManualClock::new(0.0));
    let mut store = Store::with_clock(clock.clone());

    store.write("k", json!("v"), Some(5.0), None);
    assert!(!store.compare_and_set("k", &Lookup::Absent, json!("x"), None));

    clock.set(5.0);
    assert!(store.compare_and_set("k", &Lookup::Absent, json!("x"), None));
}

// == Snapshots ==

#[test]
fn test_export_import_round_trip() {
    let mut source = Store::new();
    source.write("a", json!(1), None, None);
    source.write("b", json!({"x": [1, 2, 3]}), None, None);

    let mut target = Store::new();
    target.import(&source.export(Some(0.0))).unwrap();

    assert_eq!(target.read("a", None), Lookup::Present(json!(1)));
    assert_eq!(target.read("b", None), Lookup::Present(json!({"x": [1, 2, 3]})));
    assert_eq!(target.keys(None), vec!["a", "b"]);
}

#[test]
fn test_export_is_canonical() {
    let mut first = Store::new();
    first.write("z", json!(0.1), None, None);
    first.write("m", json!(null), None, None);
    first.write("a", json!({"b": 1, "a": 2}), None, None);

    let mut second = Store::new();
    second.write("a", json!({"a": 2, "b": 1}), None, None);
    second.write("z", json!(0.1), None, None);
    second.write("m", Value::Null, None, None);

    let exported = first.export(None);
    assert_eq!(exported, second.export(None));
    assert_eq!(exported, r#"{"a":{"a":2,"b":1},"m":null,"z":0.1}"#);
}

#[test]
fn test_export_excludes_expired() {
    let mut store = Store::new();
    store.write("keep", json!(1), None, None);
    store.write("drop", json!(2), Some(0.5), Some(10.0));

    assert_eq!(store.export(Some(10.5)), r#"{"keep":1}"#);
}

#[test]
fn test_malformed_import_leaves_store_intact() {
    let mut store = Store::new();
    store.write("a", json!(1), Some(100.0), Some(0.0));
    store.write("b", json!(2), None, None);

    let result = store.import("{\"a\": 1,}");
    assert!(matches!(result, Err(StoreError::MalformedSnapshot(_))));

    assert_eq!(store.keys(Some(50.0)), vec!["a", "b"]);
    // The surviving TTL still applies.
    assert_eq!(store.keys(Some(100.0)), vec!["b"]);
}

// == Shared Handle ==

#[test]
fn test_shared_store_independent_instances() {
    let one = SharedStore::default();
    let two = SharedStore::default();

    one.write("k", json!(1), None, None);
    assert!(two.read("k", None).is_absent());
    assert_eq!(one.stats().writes, 1);
    assert_eq!(two.stats().writes, 0);
}
