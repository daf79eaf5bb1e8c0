//! Storage slot configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Slot name used when none is configured.
pub const DEFAULT_SLOT: &str = "bladeTrackerState";

/// Where the state document is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the slot file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Slot name; the document is written to `<data_dir>/<slot>.json`.
    #[serde(default = "default_slot")]
    pub slot: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot: default_slot(),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            slot: slot.into(),
        }
    }

    /// Full path of the slot file.
    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.slot, "bladeTrackerState");
        assert_eq!(config.slot_path(), PathBuf::from("./bladeTrackerState.json"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"data_dir": "/var/lib/tracker"}"#).unwrap();
        assert_eq!(
            config.slot_path(),
            PathBuf::from("/var/lib/tracker/bladeTrackerState.json")
        );
    }
}
