//! Frogger - A lane-crossing arcade game core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (lanes, hazards, the frog, session states)
//! - `descriptor`: Level and object-table documents, validated into a `LevelConfig`
//! - `platform`: Draw and input seams the host window implements
//! - `settings`: User-tunable values loaded from JSON
//! - `error`: Load and parse errors
//!
//! The crate never opens a window or loads an image. A host feeds it
//! `update(controls, dt)` once per frame and replays the draw calls it emits.

pub mod descriptor;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use descriptor::{FileLevelSource, JsonLevelSource, LevelConfig, LevelSource};
pub use error::{GameError, GameResult, LevelError};
pub use platform::{Action, Canvas, Controls, KeyTracker, RecordingCanvas};
pub use settings::{KeyBindings, Settings};
pub use sim::{Direction, GameSession, Level, LevelEvent, Outcome, SessionState};

/// Game configuration constants
pub mod consts {
    /// Side of one grid cell in pixels
    pub const GRID_SIZE: f32 = 64.0;
    /// Seconds the frog takes to slide one cell
    pub const FROG_SPEED: f32 = 0.25;
    /// Lives at the start of a level
    pub const START_LIVES: u8 = 3;

    /// Frog sprite rotation per facing, degrees counter-clockwise
    pub const FROG_NORTH: f32 = 0.0;
    pub const FROG_WEST: f32 = 90.0;
    pub const FROG_SOUTH: f32 = 180.0;
    pub const FROG_EAST: f32 = 270.0;

    /// Window size before a level is loaded (16 x 13 cells)
    pub const GAME_WIDTH: f32 = 1024.0;
    pub const GAME_HEIGHT: f32 = 832.0;

    /// Frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Sprites the core refers to by name
    pub const FROG_IMAGE: &str = "frog.png";
    pub const FROG_HEAD: &str = "froghead.png";
    pub const SAFE_IMAGE: &str = "safe.png";
}
