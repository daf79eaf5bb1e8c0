//! Integration tests for file-backed state persistence.

use std::fs;

use blade_model::{Blade, DamageStatus, Turbine};
use blade_persistence::{
    FileStore, PersistenceError, StateStore, StoreConfig, load_state, save_state,
};
use tempfile::tempdir;

const LEGACY_DOCUMENT: &str = r#"{
    "turbines": [{
        "id": 9, "name": "Turbine 9", "serialNo": "SN-9",
        "blades": [{
            "id": "9-1", "serialNo": "B-9",
            "damages": [
                {"id": 1, "category": "Cat 3", "status": "open", "description": "",
                 "radius": 4, "side": "leading_edge", "turbineId": 9,
                 "turbineSerialNo": "SN-9", "bladeSerialNo": "B-9"},
                {"id": 2, "category": "Cat 3", "status": "in_progress", "description": "",
                 "radius": 6, "side": "trailing_edge", "turbineId": 9,
                 "turbineSerialNo": "SN-9", "bladeSerialNo": "B-9",
                 "materialsUsed": [{"material": "Gelcoat", "quantity": 1.5}]}
            ]
        }]
    }],
    "selectedTurbineId": null,
    "selectedBladeId": null
}"#;

#[test]
fn migrated_status_is_persisted_on_next_save() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::new(dir.path(), "bladeTrackerState");
    fs::write(config.slot_path(), LEGACY_DOCUMENT).unwrap();
    let mut store = FileStore::new(config.slot_path());

    let state = load_state(&store).unwrap();
    let statuses: Vec<DamageStatus> = state.damages().map(|l| l.damage.status).collect();
    assert_eq!(statuses, vec![DamageStatus::Pending, DamageStatus::InProgress]);

    save_state(&mut store, &state).unwrap();
    let saved = fs::read_to_string(config.slot_path()).unwrap();
    assert!(saved.contains("\"status\":\"pending\""));
    assert!(!saved.contains("\"open\""));
    // Legacy material fields are rewritten to the current names.
    assert!(saved.contains("\"name\":\"Gelcoat\""));
    assert!(saved.contains("\"qty\":1.5"));
}

#[test]
fn file_round_trip_preserves_tree_and_cursor() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("state.json"));

    let mut turbine = Turbine::new(5, "SN-5");
    let blade = Blade::new(turbine.next_blade_id(), "B-5");
    turbine.blades.push(blade);
    let mut state = blade_model::TrackerState::default();
    state.turbines.push(turbine);
    state.selected_turbine_id = Some(5);
    state.selected_blade_id = Some("5-1".into());

    save_state(&mut store, &state).unwrap();
    let loaded = load_state(&store).unwrap();

    assert_eq!(loaded, state);
}

#[test]
fn corrupt_file_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "not json at all").unwrap();
    let store = FileStore::new(&path);

    let error = load_state(&store).unwrap_err();
    assert!(matches!(error, PersistenceError::Deserialization { .. }));
    assert!(error.suggestion().is_some());
    assert!(error.user_message().contains("could not be read"));
}

#[test]
fn unreadable_slot_reports_io_error() {
    let dir = tempdir().unwrap();
    // A directory cannot be read as a document.
    let store = FileStore::new(dir.path());
    let error = store.read().unwrap_err();
    assert!(matches!(error, PersistenceError::Io { operation: "read", .. }));
}

#[test]
fn blank_numbers_from_browser_documents_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(
        &path,
        r#"{"turbines": [{"id": 2, "name": "Turbine 2", "serialNo": "SN-2", "blades": [
            {"id": "2-1", "serialNo": "A", "damages": [
                {"id": 5, "category": "Cat 3", "status": "open", "description": "",
                 "radius": null, "side": "", "turbineId": 2,
                 "turbineSerialNo": "SN-2", "bladeSerialNo": "A",
                 "logs": [{"id": 50, "date": "2024-03-01", "hours": null,
                           "weather": "Rainy", "description": "Checked"}]},
                {"id": 6, "category": "Cat 1", "status": "closed", "description": "",
                 "radius": 12.5, "side": "leading_edge", "turbineId": 2,
                 "turbineSerialNo": "SN-2", "bladeSerialNo": "A"}
            ]}
        ]}], "selectedTurbineId": 2, "selectedBladeId": "2-1"}"#,
    )
    .unwrap();
    let mut store = FileStore::new(&path);

    let state = load_state(&store).unwrap();
    assert_eq!(state.damage_count(), 2);
    let blank = state.find_damage(5).unwrap().damage;
    assert_eq!(blank.status, DamageStatus::Pending);
    assert!(blank.radius.is_nan());
    assert!(blank.logs[0].hours.is_nan());
    assert_eq!(state.find_damage(6).unwrap().damage.radius, 12.5);

    save_state(&mut store, &state).unwrap();
    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"radius\":null"));
    assert!(saved.contains("\"hours\":null"));
    assert!(load_state(&store).is_ok());
}
