//! Run settings
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ALIENS_INITIAL_SPEED;

/// Valid formation speeds; the step cadence is `40 / speed` ticks
pub const FORMATION_SPEED_RANGE: std::ops::RangeInclusive<u8> = 1..=40;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON")]
    Parse(#[from] serde_json::Error),
    #[error("formation_speed must be within 1..=40, got {0}")]
    FormationSpeed(u8),
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    Volume { name: &'static str, value: f32 },
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Formation speed applied at every game start
    pub formation_speed: u8,
    pub audio: AudioSettings,
    /// Drive the ship with the demo autopilot
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            formation_speed: ALIENS_INITIAL_SPEED,
            audio: AudioSettings::default(),
            autopilot: true,
        }
    }
}

impl Settings {
    /// Read and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !FORMATION_SPEED_RANGE.contains(&self.formation_speed) {
            return Err(SettingsError::FormationSpeed(self.formation_speed));
        }
        for (name, value) in [
            ("master_volume", self.audio.master_volume),
            ("sfx_volume", self.audio.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::Volume { name, value });
            }
        }
        Ok(())
    }
}
