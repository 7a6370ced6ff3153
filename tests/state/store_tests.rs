//! Panel state persistence tests

#[path = "../support/mod.rs"]
mod support;

use chatdock_core::{KeyValueStorage, MemoryStorage, PanelState, StateStore};
use support::FailingStorage;

const KEY: &str = "bookbot_widget_ui_v1";

fn defaults() -> PanelState {
    PanelState {
        open: false,
        x: None,
        y: None,
        w: 360.0,
        h: 520.0,
    }
}

#[test]
fn test_load_without_record_returns_defaults() {
    let store = StateStore::new(MemoryStorage::new(), KEY);
    assert_eq!(store.load(), defaults());
}

#[test]
fn test_round_trip_preserves_geometry() {
    let states = [
        PanelState {
            open: true,
            x: Some(40.0),
            y: Some(64.5),
            w: 300.0,
            h: 380.0,
        },
        PanelState {
            open: false,
            x: None,
            y: None,
            w: 720.0,
            h: 900.0,
        },
        PanelState {
            open: true,
            x: Some(0.0),
            y: Some(8.0),
            w: 361.25,
            h: 521.75,
        },
    ];

    for state in states {
        let mut store = StateStore::new(MemoryStorage::new(), KEY);
        store.save(&state);
        assert_eq!(store.load(), state);
    }
}

#[test]
fn test_corrupt_record_returns_defaults() {
    for corrupt in ["{not json", "\"a string\"", "[1,2,3]", r#"{"w":"wide"}"#, ""] {
        let storage = MemoryStorage::new().with_entry(KEY, corrupt);
        let store = StateStore::new(storage, KEY);
        assert_eq!(store.load(), defaults(), "record {corrupt:?}");
    }
}

#[test]
fn test_unavailable_storage_returns_defaults() {
    let store = StateStore::new(FailingStorage, KEY);
    assert_eq!(store.load(), defaults());
}

#[test]
fn test_save_failure_is_swallowed() {
    let mut store = StateStore::new(FailingStorage, KEY);
    let state = PanelState {
        open: true,
        ..defaults()
    };
    store.save(&state);
    assert_eq!(store.load(), defaults());
}

#[test]
fn test_save_overwrites_whole_record() {
    let mut store = StateStore::new(MemoryStorage::new(), KEY);
    store.save(&PanelState {
        open: true,
        x: Some(10.0),
        y: Some(20.0),
        w: 400.0,
        h: 500.0,
    });
    store.save(&defaults());

    let raw = store.storage().get(KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["x"], serde_json::Value::Null);
    assert_eq!(value["open"], false);
    assert_eq!(store.load(), defaults());
}

#[test]
fn test_records_below_floor_are_raised() {
    let storage = MemoryStorage::new().with_entry(KEY, r#"{"w":50,"h":50}"#);
    let state = StateStore::new(storage, KEY).load();
    assert_eq!(state.w, 300.0);
    assert_eq!(state.h, 380.0);
}

#[test]
fn test_custom_defaults_are_used() {
    let custom = PanelState {
        w: 420.0,
        h: 600.0,
        ..defaults()
    };
    let store = StateStore::new(MemoryStorage::new(), KEY).with_defaults(custom.clone());
    assert_eq!(store.load(), custom);
}
