//! Flight settings with persistence
//!
//! Settings are saved to `~/.config/drone/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use drone_core::TimeConfig;
use drone_game::{ConfigError, DroneConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors while reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid drone config: {0}")]
    Invalid(#[from] ConfigError),
}

/// All flight settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightSettings {
    pub drone: DroneConfig,
    pub simulation: SimulationSettings,
}

impl FlightSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("drone"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found or invalid
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read and validate a settings file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings text
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.drone.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        let dir = Self::config_dir().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&dir.join("settings.toml"))
    }

    /// Save settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless flight run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulated seconds to fly
    pub duration: f32,
    /// Height of the drone center at spawn (cm)
    pub spawn_height: f32,
    /// Log a snapshot every this many fixed steps (0 = never)
    pub report_interval: u64,
    /// Frame timing
    pub time: TimeConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration: 12.0,
            spawn_height: 250.0,
            report_interval: 30,
            time: TimeConfig::default(),
        }
    }
}
