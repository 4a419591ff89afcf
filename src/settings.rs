//! Game settings
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! partial file (or no file at all) still yields a playable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FROG_SPEED, GRID_SIZE, START_LIVES};
use crate::error::GameResult;
use crate::platform::input::Action;
use crate::sim::actor::Direction;

/// Key names bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    /// Leaves the title screen
    pub start: String,
    /// Leaves the paused screen with a fresh frog
    #[serde(rename = "continue")]
    pub resume: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "up".to_string(),
            down: "down".to_string(),
            left: "left".to_string(),
            right: "right".to_string(),
            start: "s".to_string(),
            resume: "c".to_string(),
        }
    }
}

impl KeyBindings {
    /// Key name bound to an action
    pub fn key_for(&self, action: Action) -> &str {
        match action {
            Action::Move(Direction::Up) => &self.up,
            Action::Move(Direction::Down) => &self.down,
            Action::Move(Direction::Left) => &self.left,
            Action::Move(Direction::Right) => &self.right,
            Action::Start => &self.start,
            Action::Continue => &self.resume,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size of one grid cell in pixels
    pub grid_size: f32,
    /// Seconds the frog takes to slide one cell
    pub frog_speed: f32,
    /// Lives at the start of a level
    pub lives: u8,
    pub keys: KeyBindings,
    /// Level file loaded when a game starts
    pub level_path: PathBuf,
    /// Object table (hitboxes and sprite sizes)
    pub objects_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            frog_speed: FROG_SPEED,
            lives: START_LIVES,
            keys: KeyBindings::default(),
            level_path: PathBuf::from("assets/levels/default.json"),
            objects_path: PathBuf::from("assets/objects.json"),
        }
    }
}

impl Settings {
    /// Parse settings, filling anything missing with defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            log::warn!("grid_size {} is not usable, using {}", self.grid_size, defaults.grid_size);
            self.grid_size = defaults.grid_size;
        }
        if !(self.frog_speed.is_finite() && self.frog_speed > 0.0) {
            log::warn!("frog_speed {} is not usable, using {}", self.frog_speed, defaults.frog_speed);
            self.frog_speed = defaults.frog_speed;
        }
        if self.lives == 0 {
            log::warn!("A level needs at least one life, using {}", defaults.lives);
            self.lives = defaults.lives;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lives, 3);
        assert_eq!(settings.keys.start, "s");
        assert_eq!(settings.keys.resume, "c");
    }

    #[test]
    fn test_partial_document() {
        let settings = Settings::from_json(r#"{ "lives": 5, "keys": { "continue": "space" } }"#).unwrap();
        assert_eq!(settings.lives, 5);
        assert_eq!(settings.keys.resume, "space");
        assert_eq!(settings.keys.up, "up");
        assert_eq!(settings.grid_size, GRID_SIZE);
    }

    #[test]
    fn test_unusable_values_fall_back() {
        let settings = Settings::from_json(r#"{ "lives": 0, "frog_speed": -1.0, "grid_size": 0 }"#).unwrap();
        assert_eq!(settings.lives, START_LIVES);
        assert_eq!(settings.frog_speed, FROG_SPEED);
        assert_eq!(settings.grid_size, GRID_SIZE);
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(Settings::from_json("{ lives: 3 }").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("no/such/settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_key_for_action() {
        let keys = KeyBindings::default();
        assert_eq!(keys.key_for(Action::Move(Direction::Left)), "left");
        assert_eq!(keys.key_for(Action::Start), "s");
        assert_eq!(keys.key_for(Action::Continue), "c");
    }
}
