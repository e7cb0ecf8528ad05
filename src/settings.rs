//! Game settings
//!
//! Loaded from an optional JSON file at startup; every field falls back to
//! its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Level ===
    /// Grid width in tiles (at least 6)
    pub map_width: i32,
    /// Grid height in tiles (at least 6)
    pub map_height: i32,
    /// Generation seed; 0 draws a fresh level every run
    pub seed: u64,

    // === Characters ===
    pub lives: u32,
    /// Walking speed (units/s)
    pub speed: f32,
    /// Jump take-off velocity (units/s)
    pub jump_impulse: f32,

    // === Driver ===
    /// Elapsed time fed to each headless frame (seconds)
    pub frame_time: f32,
    /// Stop the headless loop after this many frames
    pub max_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            seed: DEFAULT_SEED,

            lives: DEFAULT_LIVES,
            speed: DEFAULT_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,

            frame_time: 1.0 / 60.0,
            max_frames: 600,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{} ({}); using default settings", err, path.display());
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
