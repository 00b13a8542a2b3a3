//! Axe and log settings
//!
//! Loaded from a JSON scene config; every field falls back to the tuning
//! constants when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a stuck axe's motion is constrained while joined to a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StickMode {
    /// Lock rotation on all three axes, translation stays free
    #[default]
    FreezeRotation,
    /// Take the axe out of the simulation entirely until released
    Kinematic,
}

impl StickMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StickMode::FreezeRotation => "freeze_rotation",
            StickMode::Kinematic => "kinematic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "freeze_rotation" | "freeze" | "rotation" => Some(StickMode::FreezeRotation),
            "kinematic" => Some(StickMode::Kinematic),
            _ => None,
        }
    }
}

/// Axe-side tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxeSettings {
    /// Impact speed at or above which the log splits
    pub break_threshold: f32,
    /// Lateral offset of each half from the log center
    pub log_half_offset: f32,
    /// Height above the log at which halves spawn
    pub log_spawn_height: f32,
    /// Outward impulse magnitude applied to each half
    pub split_impulse: f32,
    /// Motion constraint applied while stuck
    pub stick_mode: StickMode,
}

impl Default for AxeSettings {
    fn default() -> Self {
        Self {
            break_threshold: AXE_BREAK_THRESHOLD,
            log_half_offset: LOG_HALF_OFFSET,
            log_spawn_height: LOG_SPAWN_HEIGHT,
            split_impulse: SPLIT_IMPULSE,
            stick_mode: StickMode::default(),
        }
    }
}

/// Log-side tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Ground impact speed at or above which a log holding an axe splits
    pub ground_break_threshold: f32,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            ground_break_threshold: GROUND_BREAK_THRESHOLD,
        }
    }
}

/// Config load failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Full scene configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub axe: AxeSettings,
    pub log: LogSettings,
}

impl SceneConfig {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded scene config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Scene config saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.axe.break_threshold, 6.0);
        assert_eq!(config.axe.log_half_offset, 0.2);
        assert_eq!(config.axe.log_spawn_height, 0.2);
        assert_eq!(config.axe.split_impulse, 2.0);
        assert_eq!(config.axe.stick_mode, StickMode::FreezeRotation);
        assert_eq!(config.log.ground_break_threshold, 5.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            SceneConfig::from_json(r#"{ "axe": { "break_threshold": 9.5, "stick_mode": "kinematic" } }"#)
                .unwrap();
        assert_eq!(config.axe.break_threshold, 9.5);
        assert_eq!(config.axe.stick_mode, StickMode::Kinematic);
        assert_eq!(config.axe.log_half_offset, LOG_HALF_OFFSET);
        assert_eq!(config.log, LogSettings::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config JSON"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        use std::error::Error;

        let path = std::env::temp_dir().join("log_splitter_missing_config_does_not_exist.json");
        let err = SceneConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("failed to read config"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("log_splitter_missing_config_does_not_exist.json");
        let config = SceneConfig::load_or_default(&path);
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("log_splitter_cfg_{}.json", std::process::id()));
        let mut config = SceneConfig::default();
        config.log.ground_break_threshold = 3.25;
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_stick_mode_from_str() {
        assert_eq!(StickMode::from_str("Kinematic"), Some(StickMode::Kinematic));
        assert_eq!(StickMode::from_str("freeze"), Some(StickMode::FreezeRotation));
        assert_eq!(StickMode::from_str("wobbly"), None);
        assert_eq!(StickMode::Kinematic.as_str(), "kinematic");
    }
}
