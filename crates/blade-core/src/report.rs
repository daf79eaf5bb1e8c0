//! Materials report: per-material totals across a set of damages.
//!
//! Usages are grouped by their trimmed, case-folded `(name, unit)` pair.
//! Groups keep the casing of the first usage seen and are ordered by name,
//! then unit. Entries within a group are ordered most recent first; a usage
//! without an `addedAt` stamp counts as "now" at the time of the call, so
//! legacy entries float to the top and their relative order depends on when
//! the report is built.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use blade_model::{BladeId, Damage, DamageId, DamageStatus, TrackerState, TurbineId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Unit shown for a group whose first usage has no unit.
pub const UNKNOWN_UNIT: &str = "?";

/// One usage inside a [`MaterialGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEntry {
    pub qty: f64,
    pub unit: String,
    pub damage_id: DamageId,
    pub added_at: Option<DateTime<Utc>>,
    /// Owning turbine, known when summarizing a whole [`TrackerState`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbine_id: Option<TurbineId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blade_id: Option<BladeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialGroup {
    /// Material name exactly as first seen; only the grouping key is trimmed.
    pub name: String,
    /// First-seen unit, or [`UNKNOWN_UNIT`] when blank.
    pub unit: String,
    pub total_qty: f64,
    pub count: usize,
    pub damage_ids: BTreeSet<DamageId>,
    pub statuses: BTreeSet<DamageStatus>,
    pub entries: Vec<MaterialEntry>,
}

type GroupKey = (String, String);

fn group_key(name: &str, unit: &str) -> GroupKey {
    (name.trim().to_lowercase(), unit.trim().to_lowercase())
}

/// Summarize the usages of `damages`, treating missing stamps as the current
/// wall-clock time.
pub fn summarize<'a>(
    damages: impl IntoIterator<Item = &'a Damage>,
    status_filter: Option<DamageStatus>,
) -> Vec<MaterialGroup> {
    summarize_at(damages, status_filter, Utc::now())
}

/// Like [`summarize`], with an explicit "now" for unstamped usages.
pub fn summarize_at<'a>(
    damages: impl IntoIterator<Item = &'a Damage>,
    status_filter: Option<DamageStatus>,
    now: DateTime<Utc>,
) -> Vec<MaterialGroup> {
    group(
        damages.into_iter().map(|damage| (damage, None)),
        status_filter,
        now,
    )
}

/// Summarize every damage in the forest; entries carry their owners.
pub fn summarize_state(
    state: &TrackerState,
    status_filter: Option<DamageStatus>,
) -> Vec<MaterialGroup> {
    summarize_state_at(state, status_filter, Utc::now())
}

pub fn summarize_state_at(
    state: &TrackerState,
    status_filter: Option<DamageStatus>,
    now: DateTime<Utc>,
) -> Vec<MaterialGroup> {
    group(
        state.damages().map(|location| {
            (
                location.damage,
                Some((location.turbine.id, location.blade.id.clone())),
            )
        }),
        status_filter,
        now,
    )
}

fn group<'a>(
    damages: impl Iterator<Item = (&'a Damage, Option<(TurbineId, BladeId)>)>,
    status_filter: Option<DamageStatus>,
    now: DateTime<Utc>,
) -> Vec<MaterialGroup> {
    let mut groups: Vec<(GroupKey, MaterialGroup)> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for (damage, owner) in damages {
        if status_filter.is_some_and(|status| status != damage.status) {
            continue;
        }
        for usage in &damage.materials_used {
            let key = group_key(&usage.name, &usage.unit);
            let position = *index.entry(key.clone()).or_insert_with(|| {
                let unit = usage.unit.trim();
                groups.push((
                    key,
                    MaterialGroup {
                        name: usage.name.clone(),
                        unit: if unit.is_empty() {
                            UNKNOWN_UNIT.to_string()
                        } else {
                            unit.to_string()
                        },
                        total_qty: 0.0,
                        count: 0,
                        damage_ids: BTreeSet::new(),
                        statuses: BTreeSet::new(),
                        entries: Vec::new(),
                    },
                ));
                groups.len() - 1
            });

            let group = &mut groups[position].1;
            group.total_qty += usage.qty;
            group.count += 1;
            group.damage_ids.insert(damage.id);
            group.statuses.insert(damage.status);
            group.entries.push(MaterialEntry {
                qty: usage.qty,
                unit: usage.unit.clone(),
                damage_id: damage.id,
                added_at: usage.added_at,
                turbine_id: owner.as_ref().map(|(turbine_id, _)| *turbine_id),
                blade_id: owner.as_ref().map(|(_, blade_id)| blade_id.clone()),
            });
        }
    }

    for (_, group) in &mut groups {
        group
            .entries
            .sort_by_key(|entry| Reverse(entry.added_at.unwrap_or(now)));
    }
    groups.sort_by(|(left, _), (right, _)| left.cmp(right));
    groups.into_iter().map(|(_, group)| group).collect()
}
