//! The frog
//!
//! The frog's logical position jumps a whole cell the moment a move is
//! accepted; collisions always use it. What the player sees lags behind
//! through a [`Slide`], which eases the sprite from the old cell to the new
//! one over a fixed duration.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::{FROG_EAST, FROG_IMAGE, FROG_NORTH, FROG_SOUTH, FROG_WEST};
use crate::error::GameError;
use crate::platform::canvas::Canvas;

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which pending moves are checked each tick
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step in pixel space (y up)
    pub fn step(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    /// Sprite rotation for a frog facing this way
    pub fn angle(self) -> f32 {
        match self {
            Direction::Up => FROG_NORTH,
            Direction::Down => FROG_SOUTH,
            Direction::Left => FROG_WEST,
            Direction::Right => FROG_EAST,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}

/// A slide between two adjacent cells, advanced explicitly each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub start: Vec2,
    pub target: Vec2,
    elapsed: f32,
    duration: f32,
}

impl Slide {
    pub fn new(start: Vec2, target: Vec2, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    /// Feed elapsed time; returns true once the slide has arrived
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Progress in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// How far the sprite still trails the logical position
    pub fn offset(&self) -> Vec2 {
        (self.start - self.target) * (1.0 - self.fraction())
    }
}

/// The player-controlled frog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frog {
    /// Logical centre in pixels
    pub pos: Vec2,
    pub facing: Direction,
    /// Sprite size in pixels
    pub size: Vec2,
    /// Collision box relative to the sprite's bottom-left corner
    local_hitbox: Rect,
    slide: Option<Slide>,
}

impl Frog {
    pub fn new(pos: Vec2, cell_size: f32, local_hitbox: Rect) -> Self {
        Self {
            pos,
            facing: Direction::Up,
            size: Vec2::splat(cell_size),
            local_hitbox,
            slide: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// World-space collision box at the logical position
    pub fn hitbox(&self) -> Rect {
        Rect::place_within(self.local_hitbox, self.bounds(), false)
    }

    pub fn slide(&self) -> Option<&Slide> {
        self.slide.as_ref()
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    /// Commit to `target` and start easing the sprite there from the current cell
    pub fn slide_to(&mut self, target: Vec2, duration: f32) {
        let slide = Slide::new(self.pos, target, duration);
        self.pos = target;
        self.slide = (!slide.is_finished()).then_some(slide);
    }

    /// Advance the in-flight slide, dropping it once it arrives
    pub fn advance_slide(&mut self, dt: f32) {
        if let Some(slide) = self.slide.as_mut() {
            if slide.advance(dt) {
                self.slide = None;
            }
        }
    }

    /// Where the sprite is drawn this frame
    pub fn visual_position(&self) -> Vec2 {
        match &self.slide {
            Some(slide) => self.pos + slide.offset(),
            None => self.pos,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_image(FROG_IMAGE, self.visual_position(), self.size, self.facing.angle());
    }
}
