//! Platform collaborators
//!
//! The simulation never talks to a window, a keyboard or a GPU directly.
//! It goes through these narrow interfaces instead:
//! - `input`: key-down edge queries for the session and the frog
//! - `canvas`: draw calls for lanes, obstacles, the frog and labels

pub mod canvas;
pub mod input;

pub use canvas::{Anchor, Canvas, DrawCall, Label, RecordingCanvas};
pub use input::{Action, Controls, KeyTracker};
