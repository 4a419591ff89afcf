//! Objects placed in lanes: cars, logs and hedge markers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::descriptor::LaneType;
use crate::platform::canvas::Canvas;

/// What an obstacle is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Kills on contact (road lanes)
    Car,
    /// Carries the frog (water lanes)
    Log,
    /// Claimable hedge slot
    Exit,
    /// Passable hedge slot
    Opening,
    /// Anything else (decoration)
    Plain,
    /// Rescued frog shown on a claimed exit
    Safe,
}

impl ObstacleKind {
    /// Classify a descriptor object by the lane it sits in
    pub fn classify(lane: LaneType, name: &str) -> Self {
        match lane {
            LaneType::Road => ObstacleKind::Car,
            LaneType::Water => ObstacleKind::Log,
            LaneType::Hedge => match name {
                "exit" => ObstacleKind::Exit,
                "open" | "opening" => ObstacleKind::Opening,
                _ => ObstacleKind::Plain,
            },
            LaneType::Grass => ObstacleKind::Plain,
        }
    }

    /// Hedge markers stay put even in a lane with a speed
    pub fn is_moving(self) -> bool {
        !matches!(self, ObstacleKind::Exit | ObstacleKind::Opening | ObstacleKind::Safe)
    }
}

/// A sprite with a hitbox, owned by its lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Image file name
    pub image: String,
    /// Centre in pixels
    pub pos: Vec2,
    /// Sprite size in pixels
    pub size: Vec2,
    /// Rotation in degrees (180 for objects drifting left)
    pub angle: f32,
    /// Set once on a claimed exit
    pub occupied: bool,
    local_hitbox: Rect,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, image: impl Into<String>, pos: Vec2, size: Vec2, local_hitbox: Rect) -> Self {
        Self {
            kind,
            image: image.into(),
            pos,
            size,
            angle: 0.0,
            occupied: false,
            local_hitbox,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// World-space collision box
    pub fn hitbox(&self) -> Rect {
        let flipped = (self.angle.rem_euclid(360.0) - 180.0).abs() < f32::EPSILON;
        Rect::place_within(self.local_hitbox, self.bounds(), flipped)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_image(&self.image, self.pos, self.size, self.angle);
    }
}
