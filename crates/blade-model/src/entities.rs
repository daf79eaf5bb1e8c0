//! Turbine, blade and damage records.
//!
//! The tree is owned top-down: a turbine owns its blades, a blade owns its
//! damages, and a damage owns its repair logs and material usages. Field
//! names follow the persisted JSON layout (`camelCase`).

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{DamageStatus, Weather};

/// A turbine can hold at most this many blades.
pub const MAX_BLADES_PER_TURBINE: usize = 3;

/// Turbine number, supplied by the user.
pub type TurbineId = i64;

/// Damage number; unique across every blade of every turbine.
pub type DamageId = i64;

/// Repair log id, derived from its creation timestamp.
pub type LogId = i64;

/// Blade identifier of the form `"{turbine_id}-{position}"`.
///
/// Assigned once when the blade is created and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BladeId(String);

impl BladeId {
    /// Build the id for the blade at 1-based `position` on `turbine_id`.
    pub fn for_position(turbine_id: TurbineId, position: usize) -> Self {
        Self(format!("{turbine_id}-{position}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BladeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BladeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for BladeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads `null` as NaN.
///
/// Documents written by the browser app hold `null` where a number field was
/// left blank (NaN serializes to `null`). serde_json writes NaN back as `null`,
/// so such values survive a load/save cycle unchanged.
fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turbine {
    pub id: TurbineId,
    pub name: String,
    pub serial_no: String,
    #[serde(default)]
    pub blades: Vec<Blade>,
}

impl Turbine {
    /// Create an empty turbine named `"Turbine {id}"`.
    pub fn new(id: TurbineId, serial_no: impl Into<String>) -> Self {
        Self {
            id,
            name: format!("Turbine {id}"),
            serial_no: serial_no.into(),
            blades: Vec::new(),
        }
    }

    pub fn blade(&self, id: &BladeId) -> Option<&Blade> {
        self.blades.iter().find(|blade| &blade.id == id)
    }

    pub fn blade_mut(&mut self, id: &BladeId) -> Option<&mut Blade> {
        self.blades.iter_mut().find(|blade| &blade.id == id)
    }

    /// Blade serial numbers are unique within a turbine.
    pub fn blade_by_serial(&self, serial_no: &str) -> Option<&Blade> {
        self.blades.iter().find(|blade| blade.serial_no == serial_no)
    }

    pub fn is_full(&self) -> bool {
        self.blades.len() >= MAX_BLADES_PER_TURBINE
    }

    /// Id the next blade added to this turbine will receive.
    pub fn next_blade_id(&self) -> BladeId {
        BladeId::for_position(self.id, self.blades.len() + 1)
    }

    pub fn pending_count(&self) -> usize {
        self.blades
            .iter()
            .map(|blade| blade.count_with_status(DamageStatus::Pending))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blade {
    pub id: BladeId,
    pub serial_no: String,
    #[serde(default)]
    pub damages: Vec<Damage>,
}

impl Blade {
    pub fn new(id: BladeId, serial_no: impl Into<String>) -> Self {
        Self {
            id,
            serial_no: serial_no.into(),
            damages: Vec::new(),
        }
    }

    pub fn damage(&self, id: DamageId) -> Option<&Damage> {
        self.damages.iter().find(|damage| damage.id == id)
    }

    pub fn damage_mut(&mut self, id: DamageId) -> Option<&mut Damage> {
        self.damages.iter_mut().find(|damage| damage.id == id)
    }

    pub fn count_with_status(&self, status: DamageStatus) -> usize {
        self.damages
            .iter()
            .filter(|damage| damage.status == status)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damage {
    pub id: DamageId,
    pub category: String,
    pub status: DamageStatus,
    pub description: String,
    /// Distance from the blade root, in meters.
    #[serde(deserialize_with = "nan_if_null")]
    pub radius: f64,
    /// Blade side, e.g. `leading_edge` or `trailing_edge`.
    pub side: String,
    /// Snapshot of the parent turbine number at creation time.
    pub turbine_id: TurbineId,
    /// Snapshot of the parent turbine serial at creation time.
    pub turbine_serial_no: String,
    /// Snapshot of the parent blade serial at creation time.
    pub blade_serial_no: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub logs: Vec<RepairLog>,
    #[serde(default)]
    pub materials_used: Vec<MaterialUsage>,
}

impl Damage {
    pub fn log(&self, id: LogId) -> Option<&RepairLog> {
        self.logs.iter().find(|log| log.id == id)
    }

    pub fn log_mut(&mut self, id: LogId) -> Option<&mut RepairLog> {
        self.logs.iter_mut().find(|log| log.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairLog {
    pub id: LogId,
    pub date: NaiveDate,
    #[serde(deserialize_with = "nan_if_null")]
    pub hours: f64,
    pub weather: Weather,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    #[serde(alias = "material")]
    pub name: String,
    #[serde(alias = "quantity")]
    pub qty: f64,
    #[serde(default)]
    pub unit: String,
    /// Absent on records written before usage timestamps existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl MaterialUsage {
    /// Exact `(name, qty, unit)` match, used when removing a usage.
    pub fn matches(&self, name: &str, qty: f64, unit: &str) -> bool {
        self.name == name && self.qty == qty && self.unit == unit
    }
}
