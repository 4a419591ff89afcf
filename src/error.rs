//! Error types for level loading and the game driver.
//!
//! Descriptor problems are fatal at load time. Everything that can go wrong
//! while a level is running is a normal game outcome, not an error.

use std::io;
use std::path::PathBuf;

/// Errors raised while reading or validating a level.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("Malformed descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("World size must be non-zero, found {width}x{height}")]
    EmptyWorld { width: u32, height: u32 },

    #[error("Expected {expected} lanes (one per row), found {found}")]
    LaneCount { expected: usize, found: usize },

    #[error("Start cell ({x}, {y}) lies outside the world")]
    StartOutOfBounds { x: u32, y: u32 },

    #[error("Object type '{0}' has no entry in the object table")]
    UnknownObject(String),

    #[error("Lane {lane} has a non-finite speed")]
    InvalidSpeed { lane: usize },

    #[error("Invalid hitbox for '{0}'")]
    InvalidHitbox(String),
}

/// Top-level error type for the game driver.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
