//! ResourceStore tests: formatting, atomicity, checkpoint round-trips.

mod common;

use ptcg_etl::models::Checkpoint;
use ptcg_etl::transform::transform;
use ptcg_etl::EtlError;
use serde_json::json;
use std::fs;

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[test]
fn write_pretty_prints_with_two_space_indent() {
    let (store, _tmp) = common::setup_store();
    store.write("out.json", &json!({"a": [1, 2]})).unwrap();

    let text = fs::read_to_string(store.path_for("out.json")).unwrap();
    assert!(text.starts_with("{\n  \"a\""));
    assert!(text.contains("\n    1,"));
}

#[test]
fn non_ascii_characters_are_kept_literal() {
    let (store, _tmp) = common::setup_store();
    store
        .write("out.json", &json!({"name": "Pokémon", "value": "×2"}))
        .unwrap();

    let text = fs::read_to_string(store.path_for("out.json")).unwrap();
    assert!(text.contains("Pokémon"));
    assert!(text.contains("×2"));
    assert!(!text.contains("\\u"));
}

// ---------------------------------------------------------------------------
// Read / write / exists
// ---------------------------------------------------------------------------

#[test]
fn write_then_read_round_trips() {
    let (store, _tmp) = common::setup_store();
    let data = json!(["Lightning", "Fighting"]);
    store.write("types.json", &data).unwrap();

    assert!(store.exists("types.json"));
    assert_eq!(store.read("types.json").unwrap(), data);

    let typed: Vec<String> = store.read_as("types.json").unwrap();
    assert_eq!(typed, vec!["Lightning", "Fighting"]);
}

#[test]
fn exists_is_false_for_missing_resource() {
    let (store, _tmp) = common::setup_store();
    assert!(!store.exists("nope.json"));
}

#[test]
fn read_missing_resource_is_io_error() {
    let (store, _tmp) = common::setup_store();
    assert!(matches!(store.read("nope.json"), Err(EtlError::Io(_))));
}

#[test]
fn overwrite_replaces_content_and_leaves_no_temp_files() {
    let (store, _tmp) = common::setup_store();
    store.write("out.json", &json!({"v": 1})).unwrap();
    store.write("out.json", &json!({"v": 2})).unwrap();

    assert_eq!(store.read("out.json").unwrap(), json!({"v": 2}));

    let entries: Vec<_> = fs::read_dir(store.root()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

// ---------------------------------------------------------------------------
// Checkpoint round-trip
// ---------------------------------------------------------------------------

#[test]
fn checkpoint_round_trips_through_snapshot_file() {
    let (store, _tmp) = common::setup_store();
    let checkpoint = Checkpoint {
        page: 3,
        data: vec![transform(&common::pikachu_raw()).unwrap()],
    };
    store.write("cards.json", &checkpoint).unwrap();

    let loaded: Checkpoint = store.read_as("cards.json").unwrap();
    assert_eq!(loaded.page, 3);
    assert_eq!(loaded.data.len(), 1);
    assert_eq!(loaded.data[0].name, "Pikachu");
}

#[test]
fn snapshot_file_has_page_then_data_layout() {
    let (store, _tmp) = common::setup_store();
    store.write("cards.json", &Checkpoint::new()).unwrap();

    let text = fs::read_to_string(store.path_for("cards.json")).unwrap();
    let page_pos = text.find("\"page\"").unwrap();
    let data_pos = text.find("\"data\"").unwrap();
    assert!(page_pos < data_pos);
}
