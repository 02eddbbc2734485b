//! Game settings and preferences
//!
//! Presentation options only; gameplay constants live in `consts`.
//! Stored as JSON next to the game, falling back to defaults on any problem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::DEFAULT_HIGHSCORE_FILE;
use crate::sim::Rules;

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "SKY_HOP_SETTINGS";
/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "sky-hop.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the best score is kept
    pub highscore_path: PathBuf,
    /// Fixed RNG seed; `None` picks one from the clock per session
    pub seed: Option<u64>,

    // === Audio ===
    /// Ring the terminal bell for sound effects
    pub sound: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Draw with colors (off for monochrome terminals)
    pub color: bool,

    // === Rules ===
    /// Touching a mob ends the run
    pub lethal_mobs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
            seed: None,
            sound: true,
            show_fps: true,
            color: true,
            lethal_mobs: true,
        }
    }
}

impl Settings {
    /// Settings file location: `SKY_HOP_SETTINGS` or the default file name
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from `path`, using defaults when missing or malformed
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                log::info!("Using default settings ({} not found)", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Session rules derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            lethal_mobs: self.lethal_mobs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7, "sound": false }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.sound);
        assert!(settings.show_fps);
        assert_eq!(settings.highscore_path, PathBuf::from(DEFAULT_HIGHSCORE_FILE));
    }

    #[test]
    fn test_missing_and_malformed_files_use_defaults() {
        let dir = std::env::temp_dir();
        let missing = dir.join(format!("sky-hop-settings-missing-{}.json", std::process::id()));
        assert_eq!(Settings::load(&missing), Settings::default());

        let broken = dir.join(format!("sky-hop-settings-broken-{}.json", std::process::id()));
        fs::write(&broken, "{ nope").unwrap();
        assert_eq!(Settings::load(&broken), Settings::default());
        fs::remove_file(&broken).unwrap();
    }

    #[test]
    fn test_rules_follow_settings() {
        let settings = Settings {
            lethal_mobs: false,
            ..Default::default()
        };
        assert!(!settings.rules().lethal_mobs);
    }
}
