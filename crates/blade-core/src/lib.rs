//! Blade damage tracking.
//!
//! This crate holds the behaviour behind the tracker:
//!
//! - **Selection**: the current turbine and blade, held as ids and re-resolved
//!   on every read ([`selection`])
//! - **Operations**: validated state transitions for damages, repair logs and
//!   material usages ([`operations`])
//! - **Reporting**: grouped material totals and per-blade CSV export
//!   ([`report`], [`export`])
//!
//! [`Tracker`] ties these to a [`StateStore`](blade_persistence::StateStore)
//! and saves after every successful change.

pub mod clock;
pub mod error;
pub mod export;
pub mod operations;
pub mod report;
pub mod selection;
mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TrackerError};
pub use export::{DEFAULT_EXPORT_FILE_NAME, ExportError, export_materials_csv};
pub use operations::{
    DEFAULT_QUICK_CATEGORY, DamageEdit, DamageOutcome, MaterialInput, NewDamage, QuickDamage,
    RepairLogInput,
};
pub use report::{
    MaterialEntry, MaterialGroup, UNKNOWN_UNIT, summarize, summarize_at, summarize_state,
    summarize_state_at,
};
pub use selection::{Selection, ensure_selection, resolve_selected};
pub use tracker::Tracker;
