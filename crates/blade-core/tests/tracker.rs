//! Tests for the tracker facade.
//!
//! Covers the add-damage scenario end to end, saving after every change,
//! atomicity when a save fails, and reopening a file-backed slot.

use blade_core::{
    Clock, DamageOutcome, ManualClock, MaterialInput, NewDamage, QuickDamage, RepairLogInput, Tracker,
    TrackerError,
};
use blade_model::{BladeId, DamageStatus, Weather};
use blade_persistence::{FileStore, MemoryStore, PersistenceError, StateStore};
use chrono::{Duration, TimeZone, Utc};

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap())
}

fn tracker() -> Tracker<MemoryStore> {
    Tracker::with_clock(MemoryStore::new(), Box::new(clock())).unwrap()
}

fn new_damage(damage_id: i64, turbine_id: i64, blade_serial: &str) -> NewDamage {
    NewDamage {
        damage_id,
        turbine_id,
        turbine_serial_no: format!("SN-{turbine_id}"),
        blade_serial_no: blade_serial.to_string(),
        category: "Cat 2".to_string(),
        description: String::new(),
        radius: 1.5,
        side: "leading_edge".to_string(),
    }
}

/// A slot that accepts reads but refuses every write.
struct ReadOnlyStore {
    document: Option<String>,
}

impl StateStore for ReadOnlyStore {
    fn read(&self) -> blade_persistence::Result<Option<String>> {
        Ok(self.document.clone())
    }

    fn write(&mut self, _document: &str) -> blade_persistence::Result<()> {
        Err(PersistenceError::Io {
            operation: "write",
            path: "read-only".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn describe(&self) -> String {
        "read-only".to_string()
    }
}

// =========================================================================
// Add-damage flow
// =========================================================================

#[test]
fn test_turbine_creation_scenario() {
    let mut tracker = tracker();

    let outcome = tracker.add_or_update_damage(new_damage(101, 7, "B-A")).unwrap();
    assert_eq!(
        outcome,
        DamageOutcome::TurbineCreated {
            turbine_id: 7,
            blade_id: BladeId::from("7-1"),
        }
    );
    let state = tracker.state();
    assert_eq!(state.turbines.len(), 1);
    assert_eq!(state.turbines[0].name, "Turbine 7");
    assert_eq!(state.turbines[0].serial_no, "SN-7");
    assert_eq!(state.turbines[0].blades.len(), 1);
    assert_eq!(state.turbines[0].blades[0].id.as_str(), "7-1");
    assert_eq!(state.turbines[0].blades[0].serial_no, "B-A");
    assert_eq!(state.damage_count(), 0);

    let outcome = tracker.add_or_update_damage(new_damage(101, 7, "B-A")).unwrap();
    assert!(matches!(
        outcome,
        DamageOutcome::DamageAdded {
            damage_id: 101,
            blade_created: false,
            ..
        }
    ));
    let damage = tracker.state().find_damage(101).unwrap().damage;
    assert_eq!(damage.status, DamageStatus::Pending);
    assert_eq!(damage.category, "Cat 2");

    let error = tracker.add_or_update_damage(new_damage(101, 7, "B-B")).unwrap_err();
    assert!(matches!(error, TrackerError::DuplicateDamageId(101)));
    assert_eq!(tracker.state().turbines[0].blades.len(), 1);
}

#[test]
fn test_add_damage_repairs_selection() {
    let mut tracker = tracker();
    tracker.add_or_update_damage(new_damage(1, 3, "A")).unwrap();

    let selected = tracker.selected();
    assert_eq!(selected.turbine.map(|turbine| turbine.id), Some(3));
    assert_eq!(
        selected.blade.map(|blade| blade.id.as_str()),
        Some("3-1")
    );
}

#[test]
fn test_select_turbine_clears_blade() {
    let mut tracker = tracker();
    tracker.add_or_update_damage(new_damage(1, 1, "A")).unwrap();
    tracker.add_or_update_damage(new_damage(2, 2, "A")).unwrap();
    assert!(tracker.state().selected_blade_id.is_some());

    tracker.select_turbine(2).unwrap();
    assert_eq!(tracker.state().selected_turbine_id, Some(2));
    assert_eq!(tracker.state().selected_blade_id, None);

    assert!(tracker.ensure_selection().unwrap());
    assert_eq!(
        tracker.state().selected_blade_id,
        Some(BladeId::from("2-1"))
    );
    assert!(!tracker.ensure_selection().unwrap());
}

// =========================================================================
// Persistence on every change
// =========================================================================

#[test]
fn test_every_change_is_saved() {
    let mut tracker = tracker();
    tracker.add_or_update_damage(new_damage(1, 1, "A")).unwrap();
    tracker.add_or_update_damage(new_damage(1, 1, "A")).unwrap();
    let writes = tracker.store().write_count();

    tracker.toggle_damage_status(1).unwrap();
    tracker
        .add_material(1, MaterialInput::new("Epoxy", 2.0, "kg"))
        .unwrap();
    tracker
        .add_repair_log(
            1,
            RepairLogInput {
                date: None,
                hours: 2.0,
                weather: Weather::Sunny,
                description: "Sanded".to_string(),
            },
        )
        .unwrap();

    assert_eq!(tracker.store().write_count(), writes + 3);
    let saved = tracker.store().document().unwrap();
    assert!(saved.contains("\"in_progress\""));
    assert!(saved.contains("\"Epoxy\""));
    assert!(saved.contains("\"Sanded\""));
}

#[test]
fn test_rejected_operation_does_not_save() {
    let mut tracker = tracker();
    tracker.add_or_update_damage(new_damage(1, 1, "A")).unwrap();
    let writes = tracker.store().write_count();
    let before = tracker.state().clone();

    let error = tracker
        .add_material(1, MaterialInput::new("Epoxy", 0.0, "kg"))
        .unwrap_err();

    assert!(matches!(error, TrackerError::InvalidMaterial(_)));
    assert_eq!(error.user_message(), "Please enter a valid quantity greater than 0");
    assert_eq!(tracker.store().write_count(), writes);
    assert_eq!(tracker.state(), &before);
}

#[test]
fn test_failed_save_leaves_state_unchanged() {
    let document = r#"{
        "turbines": [{"id": 1, "name": "Turbine 1", "serialNo": "SN-1", "blades": [
            {"id": "1-1", "serialNo": "A", "damages": []}
        ]}],
        "selectedTurbineId": 1,
        "selectedBladeId": "1-1"
    }"#;
    let store = ReadOnlyStore {
        document: Some(document.to_string()),
    };
    let mut tracker = Tracker::with_clock(store, Box::new(clock())).unwrap();
    let before = tracker.state().clone();

    let error = tracker.quick_add_damage(QuickDamage::default()).unwrap_err();

    assert!(matches!(error, TrackerError::Persistence(_)));
    assert_eq!(tracker.state(), &before);
}

#[test]
fn test_quick_add_ids_follow_clock() {
    let clock = clock();
    let mut tracker = Tracker::with_clock(MemoryStore::new(), Box::new(clock.clone())).unwrap();
    tracker.add_or_update_damage(new_damage(1, 1, "A")).unwrap();

    let first = tracker.quick_add_damage(QuickDamage::default()).unwrap();
    clock.advance(Duration::seconds(5));
    let second = tracker.quick_add_damage(QuickDamage::default()).unwrap();

    assert_eq!(first, clock.timestamp_millis() - 5_000);
    assert_eq!(second, clock.timestamp_millis());
    assert_eq!(tracker.state().find_damage(first).unwrap().damage.category, "Cat 3");
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn test_open_migrates_and_repairs_selection() {
    let document = r#"{
        "turbines": [{"id": 4, "name": "Turbine 4", "serialNo": "SN-4", "blades": [
            {"id": "4-1", "serialNo": "A", "damages": [
                {"id": 40, "category": "Cat 1", "status": "open", "description": "",
                 "radius": 3.0, "side": "leading_edge", "turbineId": 4,
                 "turbineSerialNo": "SN-4", "bladeSerialNo": "A"}
            ]}
        ]}],
        "selectedTurbineId": null,
        "selectedBladeId": null
    }"#;

    let tracker = Tracker::open(MemoryStore::with_document(document)).unwrap();

    let damage = tracker.state().find_damage(40).unwrap().damage;
    assert_eq!(damage.status, DamageStatus::Pending);
    assert_eq!(tracker.state().selected_turbine_id, Some(4));
    assert_eq!(tracker.state().selected_blade_id, Some(BladeId::from("4-1")));
    assert_eq!(tracker.store().write_count(), 1);
    let saved = tracker.store().document().unwrap();
    assert!(saved.contains("\"pending\""));
    assert!(!saved.contains("\"open\""));
}

#[test]
fn test_open_empty_slot_does_not_save() {
    let tracker = Tracker::open(MemoryStore::new()).unwrap();
    assert!(tracker.state().turbines.is_empty());
    assert_eq!(tracker.store().write_count(), 0);
}

#[test]
fn test_corrupt_document_is_fatal() {
    let result = Tracker::open(MemoryStore::with_document("{ not json"));
    assert!(matches!(
        result,
        Err(TrackerError::Persistence(PersistenceError::Deserialization { .. }))
    ));
}

#[test]
fn test_reopen_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bladeTrackerState.json");

    {
        let mut tracker =
            Tracker::with_clock(FileStore::new(&path), Box::new(clock())).unwrap();
        tracker.add_or_update_damage(new_damage(5, 2, "A")).unwrap();
        tracker.add_or_update_damage(new_damage(5, 2, "A")).unwrap();
        tracker
            .add_material(5, MaterialInput::new("Filler", 0.5, "kg"))
            .unwrap();
    }

    let tracker = Tracker::open(FileStore::new(&path)).unwrap();
    let damage = tracker.state().find_damage(5).unwrap().damage;
    assert_eq!(damage.materials_used.len(), 1);
    assert_eq!(
        damage.materials_used[0].added_at,
        Some(clock().now())
    );
}
