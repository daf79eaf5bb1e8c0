//! The owned tracker: live state, its storage slot and a clock.
//!
//! Every mutation is applied to a copy of the state, the copy is saved, and
//! only then does it replace the live state. A rejected operation or a failed
//! save therefore leaves both the live state and the stored document as they
//! were.

use blade_model::{
    BladeId, DamageId, DamageStatus, LogId, MaterialUsage, RepairLog, TrackerState, TurbineId,
};
use blade_persistence::{StateStore, load_state, save_state};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TrackerError};
use crate::export::export_materials_csv;
use crate::operations::{
    self, DamageEdit, DamageOutcome, MaterialInput, NewDamage, QuickDamage, RepairLogInput,
};
use crate::report::{MaterialGroup, summarize_state};
use crate::selection::{self, Selection};

pub struct Tracker<S: StateStore> {
    state: TrackerState,
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: StateStore> Tracker<S> {
    /// Load the state from `store` using the system clock.
    pub fn open(store: S) -> Result<Self> {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Load the state from `store` and repair the selection cursor.
    ///
    /// The repaired cursor is written back only when it actually changed.
    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Result<Self> {
        let mut state = load_state(&store)?;
        let repaired = selection::ensure_selection(&mut state);
        let mut tracker = Self {
            state,
            store,
            clock,
        };
        if repaired {
            save_state(&mut tracker.store, &tracker.state)?;
        }
        Ok(tracker)
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn selected(&self) -> Selection<'_> {
        selection::resolve_selected(&self.state)
    }

    fn commit<T>(
        &mut self,
        action: &'static str,
        apply: impl FnOnce(&mut TrackerState, &dyn Clock) -> Result<T>,
    ) -> Result<T> {
        let mut working = self.state.clone();
        let value = match apply(&mut working, self.clock.as_ref()) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(action, %error, "Operation rejected");
                return Err(error);
            }
        };
        if let Err(error) = save_state(&mut self.store, &working) {
            tracing::error!(action, %error, "Failed to save state");
            return Err(error.into());
        }
        self.state = working;
        tracing::info!(action, "State saved");
        Ok(value)
    }

    pub fn select_turbine(&mut self, turbine_id: TurbineId) -> Result<()> {
        self.commit("select_turbine", |state, _| {
            selection::select_turbine(state, turbine_id);
            Ok(())
        })
    }

    pub fn select_blade(&mut self, blade_id: BladeId) -> Result<()> {
        self.commit("select_blade", |state, _| {
            selection::select_blade(state, blade_id);
            Ok(())
        })
    }

    pub fn jump_to(&mut self, turbine_id: TurbineId, blade_id: BladeId) -> Result<()> {
        self.commit("jump_to", |state, _| {
            selection::jump_to(state, turbine_id, blade_id);
            Ok(())
        })
    }

    /// Repair the cursor; returns whether it changed. Saves only on change.
    pub fn ensure_selection(&mut self) -> Result<bool> {
        let mut working = self.state.clone();
        if !selection::ensure_selection(&mut working) {
            return Ok(false);
        }
        self.commit("ensure_selection", |state, _| {
            *state = working;
            Ok(true)
        })
    }

    pub fn add_or_update_damage(&mut self, input: NewDamage) -> Result<DamageOutcome> {
        self.commit("add_or_update_damage", |state, _| {
            let outcome = operations::add_or_update_damage(state, input)?;
            selection::ensure_selection(state);
            Ok(outcome)
        })
    }

    pub fn quick_add_damage(&mut self, input: QuickDamage) -> Result<DamageId> {
        self.commit("quick_add_damage", |state, clock| {
            operations::quick_add_damage(state, clock, input)
        })
    }

    pub fn toggle_damage_status(&mut self, damage_id: DamageId) -> Result<DamageStatus> {
        self.commit("toggle_damage_status", |state, _| {
            operations::toggle_damage_status(state, damage_id)
        })
    }

    pub fn edit_damage(&mut self, damage_id: DamageId, edit: DamageEdit) -> Result<()> {
        self.commit("edit_damage", |state, _| {
            operations::edit_damage(state, damage_id, edit)?;
            selection::ensure_selection(state);
            Ok(())
        })
    }

    pub fn add_material(&mut self, damage_id: DamageId, input: MaterialInput) -> Result<()> {
        self.commit("add_material", |state, clock| {
            operations::add_material(state, clock, damage_id, input)
        })
    }

    pub fn remove_material(
        &mut self,
        damage_id: DamageId,
        name: &str,
        qty: f64,
        unit: &str,
    ) -> Result<MaterialUsage> {
        self.commit("remove_material", |state, _| {
            operations::remove_material(state, damage_id, name, qty, unit)
        })
    }

    pub fn add_repair_log(&mut self, damage_id: DamageId, input: RepairLogInput) -> Result<LogId> {
        self.commit("add_repair_log", |state, clock| {
            operations::add_repair_log(state, clock, damage_id, input)
        })
    }

    pub fn edit_repair_log(
        &mut self,
        damage_id: DamageId,
        log_id: LogId,
        input: RepairLogInput,
    ) -> Result<()> {
        self.commit("edit_repair_log", |state, _| {
            operations::edit_repair_log(state, damage_id, log_id, input)
        })
    }

    pub fn remove_repair_log(&mut self, damage_id: DamageId, log_id: LogId) -> Result<RepairLog> {
        self.commit("remove_repair_log", |state, _| {
            operations::remove_repair_log(state, damage_id, log_id)
        })
    }

    /// Materials report over the whole forest.
    pub fn materials_summary(&self, status_filter: Option<DamageStatus>) -> Vec<MaterialGroup> {
        summarize_state(&self.state, status_filter)
    }

    /// CSV of the material usages on `blade_id`, or on the selected blade.
    pub fn export_blade_csv(&self, blade_id: Option<&BladeId>) -> Result<String> {
        let blade = match blade_id {
            Some(id) => self
                .state
                .turbines
                .iter()
                .find_map(|turbine| turbine.blade(id))
                .ok_or_else(|| TrackerError::BladeNotFound(id.clone()))?,
            None => self.selected().blade.ok_or(TrackerError::NoBladeSelected)?,
        };
        Ok(export_materials_csv(blade)?)
    }
}
