use blade_model::{
    Blade, BladeId, Damage, DamageId, DamageStatus, MAX_BLADES_PER_TURBINE, TrackerState,
    Turbine, TurbineId,
};

use super::{DEFAULT_QUICK_CATEGORY, next_free_id};
use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use crate::selection::resolve_selected;

/// Input for the full add-damage flow.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDamage {
    pub damage_id: DamageId,
    pub turbine_id: TurbineId,
    pub turbine_serial_no: String,
    pub blade_serial_no: String,
    pub category: String,
    pub description: String,
    pub radius: f64,
    pub side: String,
}

/// Input for adding a damage to the selected blade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuickDamage {
    pub category: String,
    pub description: String,
    pub radius: f64,
    pub side: String,
}

/// Field changes for an existing damage. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageEdit {
    pub id: Option<DamageId>,
    pub category: Option<String>,
    pub status: Option<DamageStatus>,
    pub description: Option<String>,
    pub radius: Option<f64>,
    pub side: Option<String>,
}

/// What the add-damage flow did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The turbine did not exist. It was created together with the named
    /// blade, and the damage was NOT attached; the caller submits again to
    /// attach it.
    TurbineCreated {
        turbine_id: TurbineId,
        blade_id: BladeId,
    },
    /// The damage was appended to the blade.
    DamageAdded {
        damage_id: DamageId,
        blade_id: BladeId,
        blade_created: bool,
    },
}

fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(TrackerError::InvalidDamage(format!(
            "radius must be a non-negative number, got {radius}"
        )));
    }
    Ok(())
}

/// Find or create the turbine and blade named by `input`, then attach a
/// pending damage.
///
/// When the turbine has to be created the call stops after registering the
/// turbine and its blade; the damage is not attached. This mirrors how the
/// tracker has always behaved and is kept on purpose.
pub fn add_or_update_damage(state: &mut TrackerState, input: NewDamage) -> Result<DamageOutcome> {
    validate_radius(input.radius)?;

    let Some(index) = state
        .turbines
        .iter()
        .position(|turbine| turbine.id == input.turbine_id)
    else {
        let mut turbine = Turbine::new(input.turbine_id, input.turbine_serial_no.clone());
        let blade_id = turbine.next_blade_id();
        turbine
            .blades
            .push(Blade::new(blade_id.clone(), input.blade_serial_no.clone()));
        state.turbines.push(turbine);
        tracing::info!(turbine = input.turbine_id, blade = %blade_id, "Created turbine");
        return Ok(DamageOutcome::TurbineCreated {
            turbine_id: input.turbine_id,
            blade_id,
        });
    };

    let existing = state.turbines[index]
        .blade_by_serial(&input.blade_serial_no)
        .map(|blade| blade.id.clone());
    if existing.is_none() && state.turbines[index].is_full() {
        return Err(TrackerError::BladeLimitExceeded {
            turbine_id: input.turbine_id,
            max: MAX_BLADES_PER_TURBINE,
        });
    }
    if state.damage_id_in_use(input.damage_id, None) {
        return Err(TrackerError::DuplicateDamageId(input.damage_id));
    }

    let turbine = &mut state.turbines[index];
    let (blade_id, blade_created) = match existing {
        Some(id) => (id, false),
        None => {
            let id = turbine.next_blade_id();
            turbine
                .blades
                .push(Blade::new(id.clone(), input.blade_serial_no.clone()));
            tracing::info!(turbine = turbine.id, blade = %id, "Created blade");
            (id, true)
        }
    };

    let blade = turbine
        .blade_mut(&blade_id)
        .ok_or_else(|| TrackerError::BladeNotFound(blade_id.clone()))?;
    blade.damages.push(Damage {
        id: input.damage_id,
        category: input.category,
        status: DamageStatus::Pending,
        description: input.description,
        radius: input.radius,
        side: input.side,
        turbine_id: input.turbine_id,
        turbine_serial_no: input.turbine_serial_no,
        blade_serial_no: input.blade_serial_no,
        notes: Vec::new(),
        logs: Vec::new(),
        materials_used: Vec::new(),
    });

    Ok(DamageOutcome::DamageAdded {
        damage_id: input.damage_id,
        blade_id,
        blade_created,
    })
}

/// Append a damage to the selected blade, with an id taken from the clock.
pub fn quick_add_damage(
    state: &mut TrackerState,
    clock: &dyn Clock,
    input: QuickDamage,
) -> Result<DamageId> {
    validate_radius(input.radius)?;

    let selection = resolve_selected(state);
    let turbine = selection.turbine.ok_or(TrackerError::NoTurbineSelected)?;
    let blade = selection.blade.ok_or(TrackerError::NoBladeSelected)?;
    let turbine_id = turbine.id;
    let turbine_serial_no = turbine.serial_no.clone();
    let blade_id = blade.id.clone();
    let blade_serial_no = blade.serial_no.clone();

    let damage_id = next_free_id(clock.timestamp_millis(), |id| {
        state.damage_id_in_use(id, None)
    })
    .ok_or_else(|| TrackerError::InvalidDamage("No free damage ID left".to_string()))?;
    let category = match input.category.trim() {
        "" => DEFAULT_QUICK_CATEGORY.to_string(),
        category => category.to_string(),
    };

    let blade = state
        .turbine_mut(turbine_id)
        .and_then(|turbine| turbine.blade_mut(&blade_id))
        .ok_or(TrackerError::NoBladeSelected)?;
    blade.damages.push(Damage {
        id: damage_id,
        category,
        status: DamageStatus::Pending,
        description: input.description.trim().to_string(),
        radius: input.radius,
        side: input.side,
        turbine_id,
        turbine_serial_no,
        blade_serial_no,
        notes: Vec::new(),
        logs: Vec::new(),
        materials_used: Vec::new(),
    });
    Ok(damage_id)
}

/// Advance a damage of the selected blade to its next status.
///
/// Only damages on the selected blade can be toggled.
pub fn toggle_damage_status(state: &mut TrackerState, damage_id: DamageId) -> Result<DamageStatus> {
    let selection = resolve_selected(state);
    let turbine_id = selection
        .turbine
        .ok_or(TrackerError::NoTurbineSelected)?
        .id;
    let blade_id = selection
        .blade
        .ok_or(TrackerError::NoBladeSelected)?
        .id
        .clone();

    let damage = state
        .turbine_mut(turbine_id)
        .and_then(|turbine| turbine.blade_mut(&blade_id))
        .and_then(|blade| blade.damage_mut(damage_id))
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    damage.status = damage.status.next();
    Ok(damage.status)
}

/// Apply `edit` to a damage anywhere in the forest.
///
/// A new id must not be used by any other damage. All checks run before any
/// field is written.
pub fn edit_damage(state: &mut TrackerState, damage_id: DamageId, edit: DamageEdit) -> Result<()> {
    if state.find_damage(damage_id).is_none() {
        return Err(TrackerError::DamageNotFound(damage_id));
    }
    if let Some(new_id) = edit.id {
        if new_id != damage_id && state.damage_id_in_use(new_id, Some(damage_id)) {
            return Err(TrackerError::DuplicateDamageId(new_id));
        }
    }
    if let Some(radius) = edit.radius {
        validate_radius(radius)?;
    }

    let damage = state
        .find_damage_mut(damage_id)
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    if let Some(id) = edit.id {
        damage.id = id;
    }
    if let Some(category) = edit.category {
        damage.category = category;
    }
    if let Some(status) = edit.status {
        damage.status = status;
    }
    if let Some(description) = edit.description {
        damage.description = description;
    }
    if let Some(radius) = edit.radius {
        damage.radius = radius;
    }
    if let Some(side) = edit.side {
        damage.side = side;
    }
    Ok(())
}
