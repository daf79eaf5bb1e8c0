//! Tracker error types.
//!
//! Every rejected operation leaves the state unchanged. The presentation
//! layer shows [`TrackerError::user_message`] as a transient notification.

use blade_model::{BladeId, DamageId, LogId, TurbineId};
use blade_persistence::PersistenceError;
use thiserror::Error;

use crate::export::ExportError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("damage id {0} is already in use")]
    DuplicateDamageId(DamageId),

    #[error("turbine {turbine_id} already has {max} blades")]
    BladeLimitExceeded { turbine_id: TurbineId, max: usize },

    #[error("no turbine selected")]
    NoTurbineSelected,

    #[error("no blade selected")]
    NoBladeSelected,

    #[error("invalid damage: {0}")]
    InvalidDamage(String),

    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    #[error("material not found on damage {damage_id}: {qty} {unit} {name}")]
    MaterialNotFound {
        damage_id: DamageId,
        name: String,
        qty: f64,
        unit: String,
    },

    #[error("invalid repair log: {0}")]
    InvalidRepairLog(String),

    #[error("damage {0} not found")]
    DamageNotFound(DamageId),

    #[error("repair log {log_id} not found on damage {damage_id}")]
    LogNotFound { damage_id: DamageId, log_id: LogId },

    #[error("blade {0} not found")]
    BladeNotFound(BladeId),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl TrackerError {
    /// Short message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::DuplicateDamageId(_) => "This ID is already in use".to_string(),
            Self::BladeLimitExceeded { max, .. } => {
                format!("This turbine already has {max} blades")
            }
            Self::NoTurbineSelected => "Select a turbine first".to_string(),
            Self::NoBladeSelected => "Select a blade first".to_string(),
            Self::InvalidDamage(reason)
            | Self::InvalidMaterial(reason)
            | Self::InvalidRepairLog(reason) => reason.clone(),
            Self::MaterialNotFound { .. } => "Material not found".to_string(),
            Self::DamageNotFound(_) => "Damage not found".to_string(),
            Self::LogNotFound { .. } => "Log not found".to_string(),
            Self::BladeNotFound(_) => "Blade not found".to_string(),
            Self::Export(ExportError::NothingToExport) => "No materials to export".to_string(),
            Self::Export(_) => "Could not export materials".to_string(),
            Self::Persistence(error) => error.user_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
