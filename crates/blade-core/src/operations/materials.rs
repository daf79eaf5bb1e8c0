use blade_model::{DamageId, MaterialUsage, TrackerState};

use crate::clock::Clock;
use crate::error::{Result, TrackerError};

/// A material quantity to record against a damage.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInput {
    pub name: String,
    pub qty: f64,
    pub unit: String,
}

impl MaterialInput {
    pub fn new(name: impl Into<String>, qty: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty,
            unit: unit.into(),
        }
    }
}

fn validate(input: &MaterialInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(TrackerError::InvalidMaterial(
            "Please enter a material name".to_string(),
        ));
    }
    if !input.qty.is_finite() || input.qty <= 0.0 {
        return Err(TrackerError::InvalidMaterial(
            "Please enter a valid quantity greater than 0".to_string(),
        ));
    }
    if input.unit.trim().is_empty() {
        return Err(TrackerError::InvalidMaterial(
            "Please enter a unit of measurement".to_string(),
        ));
    }
    Ok(())
}

/// Record a material usage, stamped with the current time.
pub fn add_material(
    state: &mut TrackerState,
    clock: &dyn Clock,
    damage_id: DamageId,
    input: MaterialInput,
) -> Result<()> {
    validate(&input)?;
    let damage = state
        .find_damage_mut(damage_id)
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    damage.materials_used.push(MaterialUsage {
        name: input.name.trim().to_string(),
        qty: input.qty,
        unit: input.unit.trim().to_string(),
        added_at: Some(clock.now()),
    });
    Ok(())
}

/// Remove the first usage whose `(name, qty, unit)` equals the given triple.
///
/// Identical usages cannot be told apart; whichever comes first goes.
pub fn remove_material(
    state: &mut TrackerState,
    damage_id: DamageId,
    name: &str,
    qty: f64,
    unit: &str,
) -> Result<MaterialUsage> {
    let damage = state
        .find_damage_mut(damage_id)
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    let position = damage
        .materials_used
        .iter()
        .position(|usage| usage.matches(name, qty, unit))
        .ok_or_else(|| TrackerError::MaterialNotFound {
            damage_id,
            name: name.to_string(),
            qty,
            unit: unit.to_string(),
        })?;
    Ok(damage.materials_used.remove(position))
}
