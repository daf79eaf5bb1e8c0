//! Root state document and forest-wide queries.

use serde::{Deserialize, Serialize};

use crate::entities::{Blade, BladeId, Damage, DamageId, Turbine, TurbineId};

/// The whole tracker state: every turbine plus the selection cursor.
///
/// The cursor holds ids only. Lookups always go back through the live
/// collections, so an id pointing at a missing entity resolves to nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    #[serde(default)]
    pub turbines: Vec<Turbine>,
    #[serde(default)]
    pub selected_turbine_id: Option<TurbineId>,
    #[serde(default)]
    pub selected_blade_id: Option<BladeId>,
}

/// A damage together with the turbine and blade that own it.
#[derive(Debug, Clone, Copy)]
pub struct DamageLocation<'a> {
    pub turbine: &'a Turbine,
    pub blade: &'a Blade,
    pub damage: &'a Damage,
}

impl TrackerState {
    pub fn turbine(&self, id: TurbineId) -> Option<&Turbine> {
        self.turbines.iter().find(|turbine| turbine.id == id)
    }

    pub fn turbine_mut(&mut self, id: TurbineId) -> Option<&mut Turbine> {
        self.turbines.iter_mut().find(|turbine| turbine.id == id)
    }

    /// Every damage in collection order, with its owners.
    pub fn damages(&self) -> impl Iterator<Item = DamageLocation<'_>> {
        self.turbines.iter().flat_map(|turbine| {
            turbine.blades.iter().flat_map(move |blade| {
                blade.damages.iter().map(move |damage| DamageLocation {
                    turbine,
                    blade,
                    damage,
                })
            })
        })
    }

    pub fn find_damage(&self, id: DamageId) -> Option<DamageLocation<'_>> {
        self.damages().find(|location| location.damage.id == id)
    }

    pub fn find_damage_mut(&mut self, id: DamageId) -> Option<&mut Damage> {
        self.turbines
            .iter_mut()
            .flat_map(|turbine| turbine.blades.iter_mut())
            .find_map(|blade| blade.damage_mut(id))
    }

    /// Whether `id` is used by any damage other than `excluding`.
    pub fn damage_id_in_use(&self, id: DamageId, excluding: Option<DamageId>) -> bool {
        self.damages()
            .any(|location| Some(location.damage.id) != excluding && location.damage.id == id)
    }

    pub fn damage_count(&self) -> usize {
        self.damages().count()
    }
}
