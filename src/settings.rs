//! Player preferences
//!
//! Audio preferences plus an optional gameplay tuning override, stored as
//! JSON next to the binary. Session state is never written here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Why settings could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings tuning rejected: {0}")]
    Tuning(#[from] TuningError),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    /// Replaces the built-in tuning when present
    pub tuning: Option<Tuning>,
    /// Fixed seed for reproducible sessions; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            tuning: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Tuning for the next session (validated override or defaults)
    pub fn effective_tuning(&self) -> Tuning {
        self.tuning.clone().unwrap_or_default()
    }

    /// Read and validate settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        if let Some(tuning) = &settings.tuning {
            tuning.validate()?;
        }
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
