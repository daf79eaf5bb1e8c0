use blade_model::{DamageId, LogId, RepairLog, TrackerState, Weather};
use chrono::NaiveDate;

use super::next_free_id;
use crate::clock::Clock;
use crate::error::{Result, TrackerError};

/// Fields of a repair log entry. A missing date means "today" on add and
/// "unchanged" on edit.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairLogInput {
    pub date: Option<NaiveDate>,
    pub hours: f64,
    pub weather: Weather,
    pub description: String,
}

fn validate(input: &RepairLogInput) -> Result<()> {
    if !input.hours.is_finite() || input.hours < 0.0 {
        return Err(TrackerError::InvalidRepairLog(
            "Hours must be zero or more".to_string(),
        ));
    }
    if input.description.trim().is_empty() {
        return Err(TrackerError::InvalidRepairLog(
            "Please enter a log description".to_string(),
        ));
    }
    Ok(())
}

/// Append a repair log; its id comes from the clock.
pub fn add_repair_log(
    state: &mut TrackerState,
    clock: &dyn Clock,
    damage_id: DamageId,
    input: RepairLogInput,
) -> Result<LogId> {
    validate(&input)?;
    let damage = state
        .find_damage_mut(damage_id)
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    let id = next_free_id(clock.timestamp_millis(), |id| damage.log(id).is_some())
        .ok_or_else(|| TrackerError::InvalidRepairLog("No free log ID left".to_string()))?;
    damage.logs.push(RepairLog {
        id,
        date: input.date.unwrap_or_else(|| clock.today()),
        hours: input.hours,
        weather: input.weather,
        description: input.description.trim().to_string(),
    });
    Ok(id)
}

pub fn edit_repair_log(
    state: &mut TrackerState,
    damage_id: DamageId,
    log_id: LogId,
    input: RepairLogInput,
) -> Result<()> {
    validate(&input)?;
    let damage = state
        .find_damage_mut(damage_id)
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    let log = damage
        .log_mut(log_id)
        .ok_or(TrackerError::LogNotFound { damage_id, log_id })?;
    if let Some(date) = input.date {
        log.date = date;
    }
    log.hours = input.hours;
    log.weather = input.weather;
    log.description = input.description.trim().to_string();
    Ok(())
}

pub fn remove_repair_log(
    state: &mut TrackerState,
    damage_id: DamageId,
    log_id: LogId,
) -> Result<RepairLog> {
    let damage = state
        .find_damage_mut(damage_id)
        .ok_or(TrackerError::DamageNotFound(damage_id))?;
    let position = damage
        .logs
        .iter()
        .position(|log| log.id == log_id)
        .ok_or(TrackerError::LogNotFound { damage_id, log_id })?;
    Ok(damage.logs.remove(position))
}
