//! Game settings and preferences
//!
//! Data model for the front-end menu (volume sliders, difficulty buttons,
//! effects toggle). Persisted separately from the high score. The
//! simulation itself does not read these; they exist for the embedding
//! front-end.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty selection from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Visuals ===
    /// Starfield/particle decoration toggle
    pub visual_effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            sfx_volume: 0.6,
            music_volume: 0.5,
            visual_effects: true,
        }
    }
}

impl Settings {
    /// Set the SFX volume, clamped to the valid range
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Set the music volume, clamped to the valid range
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path)
            && let Ok(settings) = serde_json::from_str(&json)
        {
            log::info!("loaded settings");
            return settings;
        }
        log::info!("using default settings");
        Self::default()
    }

    /// Save settings as JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("settings saved");
        Ok(())
    }
}
