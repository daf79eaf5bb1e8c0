//! Read-side counts and list filters used by list views.

use serde::Serialize;

use crate::entities::{Blade, Turbine};
use crate::enums::DamageStatus;

/// Damage counts for one blade, broken down by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BladeStatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl BladeStatusCounts {
    pub fn for_blade(blade: &Blade) -> Self {
        blade
            .damages
            .iter()
            .fold(Self::default(), |mut counts, damage| {
                counts.total += 1;
                match damage.status {
                    DamageStatus::Pending => counts.pending += 1,
                    DamageStatus::InProgress => counts.in_progress += 1,
                    DamageStatus::Closed => counts.closed += 1,
                }
                counts
            })
    }
}

/// Turbines whose name or serial contains `query` (case-insensitive).
///
/// An empty query matches everything.
pub fn filter_turbines<'a>(turbines: &'a [Turbine], query: &str) -> Vec<&'a Turbine> {
    let needle = query.trim().to_lowercase();
    turbines
        .iter()
        .filter(|turbine| {
            needle.is_empty()
                || turbine.name.to_lowercase().contains(&needle)
                || turbine.serial_no.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Blades whose serial contains `query` (case-insensitive).
pub fn filter_blades<'a>(blades: &'a [Blade], query: &str) -> Vec<&'a Blade> {
    let needle = query.trim().to_lowercase();
    blades
        .iter()
        .filter(|blade| needle.is_empty() || blade.serial_no.to_lowercase().contains(&needle))
        .collect()
}
