//! State loading operations.

use blade_model::TrackerState;
use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::migrate::migrate_document;
use crate::store::StateStore;

/// Load the state from `store`.
///
/// An empty slot yields the default empty state. A document that is not
/// valid JSON, or does not match the state layout, is an error: there is no
/// partial recovery.
pub fn load_state<S: StateStore + ?Sized>(store: &S) -> Result<TrackerState> {
    let Some(document) = store.read()? else {
        tracing::info!("No saved state in {}, starting empty", store.describe());
        return Ok(TrackerState::default());
    };

    let state = parse_state(&document)?;
    tracing::info!(
        turbines = state.turbines.len(),
        damages = state.damage_count(),
        "Loaded state from {}",
        store.describe()
    );
    Ok(state)
}

/// Parse a state document, applying the migration pass first.
pub fn parse_state(document: &str) -> Result<TrackerState> {
    let mut raw: Value = serde_json::from_str(document)
        .map_err(|e| PersistenceError::Deserialization { source: e })?;

    let migrated = migrate_document(&mut raw);
    if migrated > 0 {
        tracing::debug!(migrated, "Rewrote legacy damage statuses");
    }

    serde_json::from_value(raw).map_err(|e| PersistenceError::Deserialization { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use blade_model::DamageStatus;

    const LEGACY_DOCUMENT: &str = r#"{
        "turbines": [{
            "id": 3, "name": "Turbine 3", "serialNo": "SN-3",
            "blades": [{
                "id": "3-1", "serialNo": "B-1",
                "damages": [{
                    "id": 11, "category": "Cat 4", "status": "open", "description": "Crack",
                    "radius": 20.5, "side": "leading_edge", "turbineId": 3,
                    "turbineSerialNo": "SN-3", "bladeSerialNo": "B-1",
                    "notes": [], "logs": [], "materialsUsed": []
                }]
            }]
        }],
        "selectedTurbineId": 3,
        "selectedBladeId": "3-1"
    }"#;

    #[test]
    fn test_empty_slot_loads_default_state() {
        let store = MemoryStore::new();
        let state = load_state(&store).unwrap();
        assert_eq!(state, TrackerState::default());
    }

    #[test]
    fn test_legacy_open_status_loads_as_pending() {
        let store = MemoryStore::with_document(LEGACY_DOCUMENT);
        let state = load_state(&store).unwrap();
        let damage = state.find_damage(11).unwrap().damage;
        assert_eq!(damage.status, DamageStatus::Pending);
        assert_eq!(state.selected_blade_id.as_ref().map(|id| id.as_str()), Some("3-1"));
    }

    #[test]
    fn test_malformed_document_fails() {
        let store = MemoryStore::with_document("{\"turbines\": [");
        let result = load_state(&store);
        assert!(matches!(
            result,
            Err(PersistenceError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_wrong_shape_fails() {
        let result = parse_state(r#"{"turbines": {"id": 1}}"#);
        assert!(matches!(
            result,
            Err(PersistenceError::Deserialization { .. })
        ));
    }
}
