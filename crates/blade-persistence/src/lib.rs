//! Persistent storage for blade tracker state.
//!
//! The whole tracker state lives in one JSON document written to a single
//! storage slot. Every load runs the legacy migration pass before the
//! document is turned into typed records.
//!
//! # Document Layout
//!
//! ```text
//! {
//!   "turbines": [ { "id", "name", "serialNo", "blades": [ ... ] } ],
//!   "selectedTurbineId": number | null,
//!   "selectedBladeId": string | null
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use blade_persistence::{FileStore, StoreConfig, load_state, save_state};
//!
//! let mut store = FileStore::new(StoreConfig::default().slot_path());
//! let mut state = load_state(&store)?;
//! state.selected_turbine_id = None;
//! save_state(&mut store, &state)?;
//! ```
//!
//! # Architecture
//!
//! - `store/` - Storage slots (file-backed, in-memory)
//! - `io/` - Document load/save on top of a slot
//! - `migrate.rs` - Rewrites applied to raw documents before parsing
//! - `config.rs` - Slot location settings
//! - `error.rs` - Error types with user-friendly messages
//!
//! Separate processes sharing one slot overwrite each other: the last save wins
//! and no conflict is detected.

mod config;
mod error;
mod io;
mod migrate;
mod store;

pub use config::{DEFAULT_SLOT, StoreConfig};
pub use error::{PersistenceError, Result};
pub use io::{load_state, parse_state, save_state, serialize_state};
pub use migrate::{LEGACY_OPEN_STATUS, migrate_document, migrate_legacy_status};
pub use store::{FileStore, MemoryStore, StateStore};
