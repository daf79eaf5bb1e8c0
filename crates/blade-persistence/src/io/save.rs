//! State saving operations.

use blade_model::TrackerState;

use crate::error::{PersistenceError, Result};
use crate::store::StateStore;

/// Serialize the full state tree and write it to `store`.
///
/// Called after every successful mutation; there is no batching.
pub fn save_state<S: StateStore + ?Sized>(store: &mut S, state: &TrackerState) -> Result<()> {
    let document = serialize_state(state)?;
    store.write(&document)?;
    tracing::debug!(bytes = document.len(), "Saved state to {}", store.describe());
    Ok(())
}

/// Serialize a state tree to its JSON document.
pub fn serialize_state(state: &TrackerState) -> Result<String> {
    serde_json::to_string(state).map_err(|e| PersistenceError::Serialization { source: e })
}
