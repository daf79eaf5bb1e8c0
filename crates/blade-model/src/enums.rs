//! Enumerations for damage lifecycle and repair conditions.
//!
//! Both enums serialize to the exact strings used by the persisted state
//! document, so they can be read back from older state blobs unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Lifecycle status of a recorded damage.
///
/// Transitions cycle `Pending -> InProgress -> Closed -> Pending`.
/// Older state documents may still carry the retired `"open"` value; that is
/// rewritten to `"pending"` by the persistence layer before it reaches this type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DamageStatus {
    #[default]
    Pending,
    InProgress,
    Closed,
}

impl DamageStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [DamageStatus; 3] = [
        DamageStatus::Pending,
        DamageStatus::InProgress,
        DamageStatus::Closed,
    ];

    /// Wire value as stored in the state document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageStatus::Pending => "pending",
            DamageStatus::InProgress => "in_progress",
            DamageStatus::Closed => "closed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DamageStatus::Pending => "Pending",
            DamageStatus::InProgress => "In Progress",
            DamageStatus::Closed => "Closed",
        }
    }

    /// The status that follows this one in the toggle cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            DamageStatus::Pending => DamageStatus::InProgress,
            DamageStatus::InProgress => DamageStatus::Closed,
            DamageStatus::Closed => DamageStatus::Pending,
        }
    }
}

impl fmt::Display for DamageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamageStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending" => Ok(DamageStatus::Pending),
            "in_progress" => Ok(DamageStatus::InProgress),
            "closed" => Ok(DamageStatus::Closed),
            _ => Err(ModelError::InvalidStatus(s.to_string())),
        }
    }
}

/// Weather recorded against a repair session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Windy,
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Sunny,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Windy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
            Weather::Windy => "Windy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|weather| weather.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidWeather(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_cycle_has_period_three() {
        for status in DamageStatus::ALL {
            assert_eq!(status.next().next().next(), status);
        }
        assert_eq!(DamageStatus::Pending.next(), DamageStatus::InProgress);
        assert_eq!(DamageStatus::InProgress.next(), DamageStatus::Closed);
        assert_eq!(DamageStatus::Closed.next(), DamageStatus::Pending);
    }

    #[test]
    fn status_parses_loose_spellings() {
        assert_eq!("In Progress".parse::<DamageStatus>(), Ok(DamageStatus::InProgress));
        assert_eq!("in-progress".parse::<DamageStatus>(), Ok(DamageStatus::InProgress));
        assert_eq!(" CLOSED ".parse::<DamageStatus>(), Ok(DamageStatus::Closed));
        assert!("open".parse::<DamageStatus>().is_err());
    }

    #[test]
    fn weather_parses_case_insensitively() {
        assert_eq!("windy".parse::<Weather>(), Ok(Weather::Windy));
        assert_eq!(
            "foggy".parse::<Weather>(),
            Err(ModelError::InvalidWeather("foggy".to_string()))
        );
    }
}
