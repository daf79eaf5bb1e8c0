//! Data model for the blade damage tracker.
//!
//! The model is a single owned tree: [`TrackerState`] holds turbines, each
//! turbine holds up to [`MAX_BLADES_PER_TURBINE`] blades, each blade holds
//! damages, and each damage holds repair logs and material usages.

pub mod entities;
pub mod enums;
pub mod error;
pub mod state;
pub mod stats;

pub use entities::{
    Blade, BladeId, Damage, DamageId, LogId, MAX_BLADES_PER_TURBINE, MaterialUsage, RepairLog,
    Turbine, TurbineId,
};
pub use enums::{DamageStatus, Weather};
pub use error::{ModelError, Result};
pub use state::{DamageLocation, TrackerState};
pub use stats::{BladeStatusCounts, filter_blades, filter_turbines};
