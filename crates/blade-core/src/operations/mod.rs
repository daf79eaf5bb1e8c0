//! State transitions applied to a [`TrackerState`](blade_model::TrackerState).
//!
//! Each operation validates before it writes, so a rejected call leaves the
//! state it was given untouched. Persistence is handled by the
//! [`Tracker`](crate::Tracker), not here.

mod damage;
mod logs;
mod materials;

pub use damage::{
    DamageEdit, DamageOutcome, NewDamage, QuickDamage, add_or_update_damage, edit_damage,
    quick_add_damage, toggle_damage_status,
};
pub use logs::{RepairLogInput, add_repair_log, edit_repair_log, remove_repair_log};
pub use materials::{MaterialInput, add_material, remove_material};

/// Category used when a quick-added damage leaves it blank.
pub const DEFAULT_QUICK_CATEGORY: &str = "Cat 3";

/// First id at or above `candidate` for which `in_use` is false, or `None`
/// when every id up to `i64::MAX` is taken.
///
/// Timestamp-derived ids collide when two records are created within the
/// same millisecond; bumping keeps them unique.
fn next_free_id(candidate: i64, in_use: impl Fn(i64) -> bool) -> Option<i64> {
    let mut id = candidate;
    while in_use(id) {
        id = id.checked_add(1)?;
    }
    Some(id)
}
