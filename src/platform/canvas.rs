//! Draw interface
//!
//! The core only exposes geometry: where each sprite sits, how it is turned
//! and which image it uses. Whatever owns the window implements [`Canvas`].

use glam::Vec2;

use crate::sim::geom::Rect;

/// How a label's position relates to its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    /// Position is the right edge, vertically centred
    Right,
}

/// A line of text on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vec2,
    pub font_size: f32,
    pub anchor: Anchor,
}

impl Label {
    pub fn centered(text: impl Into<String>, position: Vec2, font_size: f32) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
            anchor: Anchor::Center,
        }
    }
}

/// Rendering collaborator
pub trait Canvas {
    /// A background strip (lane tile) filling `bounds`
    fn draw_tile(&mut self, source: &str, bounds: Rect);
    /// A sprite centred on `center`, rotated `angle` degrees counter-clockwise
    fn draw_image(&mut self, source: &str, center: Vec2, size: Vec2, angle: f32);
    fn draw_label(&mut self, label: &Label);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Tile { source: String, bounds: Rect },
    Image { source: String, center: Vec2, size: Vec2, angle: f32 },
    Label(Label),
}

/// A canvas that remembers what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Image calls using the given source
    pub fn images(&self, source: &str) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Image { source: s, .. } if s == source))
            .collect()
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Label(label) => Some(label),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_tile(&mut self, source: &str, bounds: Rect) {
        self.calls.push(DrawCall::Tile {
            source: source.to_string(),
            bounds,
        });
    }

    fn draw_image(&mut self, source: &str, center: Vec2, size: Vec2, angle: f32) {
        self.calls.push(DrawCall::Image {
            source: source.to_string(),
            center,
            size,
            angle,
        });
    }

    fn draw_label(&mut self, label: &Label) {
        self.calls.push(DrawCall::Label(label.clone()));
    }
}
