//! Lanes
//!
//! A lane is one row of the world. It owns a background strip one cell high
//! and the obstacles placed in it, moves them every tick, and answers the
//! hazard question that belongs to its kind:
//! - Grass: nothing, always safe
//! - Road: does the frog touch a car?
//! - Water: is the frog's centre on a log (and does the log carry it off-screen)?
//! - Hedge: may the frog enter this slot, and does that claim an exit?

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Direction, Frog};
use super::geom::Rect;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::consts::SAFE_IMAGE;
use crate::descriptor::{LaneDescriptor, LaneType, LevelConfig};
use crate::error::LevelError;
use crate::platform::canvas::Canvas;

/// Result of checking a frog against a water lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterOutcome {
    Safe,
    Drowned,
}

/// Result of probing a hedge slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HedgeProbe {
    /// An unclaimed exit, now claimed
    ReachedExit,
    /// An opening, or not a hedge at all
    Passable,
    /// Solid hedge, a claimed exit, or an exit entered moving down
    Blocked,
}

/// Kind-specific lane state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaneKind {
    Grass,
    Road,
    Water,
    /// Indices of claimed exits, in claim order
    Hedge { claimed: Vec<usize> },
}

impl LaneKind {
    fn new(lane_type: LaneType) -> Self {
        match lane_type {
            LaneType::Grass => LaneKind::Grass,
            LaneType::Road => LaneKind::Road,
            LaneType::Water => LaneKind::Water,
            LaneType::Hedge => LaneKind::Hedge { claimed: Vec::new() },
        }
    }

    pub fn lane_type(&self) -> LaneType {
        match self {
            LaneKind::Grass => LaneType::Grass,
            LaneKind::Road => LaneType::Road,
            LaneKind::Water => LaneType::Water,
            LaneKind::Hedge { .. } => LaneType::Hedge,
        }
    }

    /// Background tile image
    pub fn tile_image(&self) -> &'static str {
        match self {
            LaneKind::Grass => "grass.png",
            LaneKind::Road => "road.png",
            LaneKind::Water => "water.png",
            LaneKind::Hedge { .. } => "hedge.png",
        }
    }
}

/// Move `x` back into `[min, max]`, keeping the distance it overshot by
pub fn wrap_position(x: f32, min: f32, max: f32) -> f32 {
    if x >= min && x <= max {
        return x;
    }
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    min + (x - min).rem_euclid(span)
}

/// One row of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    row: usize,
    kind: LaneKind,
    strip: Rect,
    /// Drift speed in pixels per second
    speed: Option<f32>,
    /// Offscreen travel beyond each side, in pixels
    buffer: f32,
    world_width: f32,
    cell_size: f32,
    obstacles: Vec<Obstacle>,
    safe: Vec<Obstacle>,
}

impl Lane {
    /// Build row `row` from its descriptor
    pub fn new(config: &LevelConfig, row: usize, desc: &LaneDescriptor) -> Result<Self, LevelError> {
        let cell = config.cell_size();
        let y = (row as f32 + 0.5) * cell;
        let angle = if desc.speed.is_some_and(|s| s < 0.0) { 180.0 } else { 0.0 };

        let obstacles = desc
            .objects
            .iter()
            .map(|placement| {
                let info = config
                    .image(&placement.kind)
                    .ok_or_else(|| LevelError::UnknownObject(placement.kind.clone()))?;
                let kind = ObstacleKind::classify(desc.kind, &placement.kind);
                let pos = Vec2::new((placement.position + 0.5) * cell, y);
                Ok(Obstacle::new(
                    kind,
                    format!("{}.png", placement.kind),
                    pos,
                    info.size_px(cell),
                    info.local_hitbox(),
                )
                .with_angle(angle))
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Ok(Self {
            row,
            kind: LaneKind::new(desc.kind),
            strip: Rect::new(0.0, row as f32 * cell, config.world_width(), cell),
            speed: desc.speed,
            buffer: config.offscreen(),
            world_width: config.world_width(),
            cell_size: cell,
            obstacles,
            safe: Vec::new(),
        })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn kind(&self) -> &LaneKind {
        &self.kind
    }

    pub fn lane_type(&self) -> LaneType {
        self.kind.lane_type()
    }

    /// Background strip, one cell high and the width of the world
    pub fn strip(&self) -> Rect {
        self.strip
    }

    pub fn speed(&self) -> Option<f32> {
        self.speed
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Rescued frogs sitting on claimed exits
    pub fn safe_markers(&self) -> &[Obstacle] {
        &self.safe
    }

    /// Does the frog's hitbox overlap this lane's strip?
    pub fn overlaps(&self, frog: &Frog) -> bool {
        self.strip.intersects(&frog.hitbox())
    }

    /// Leftmost and rightmost x a moving obstacle reaches before wrapping
    pub fn travel_bounds(&self) -> (f32, f32) {
        (-self.buffer, self.world_width + self.buffer)
    }

    /// Drift every moving obstacle by `speed * dt`, wrapping at the buffer edges
    pub fn update(&mut self, dt: f32) {
        let Some(speed) = self.speed else {
            return;
        };
        let (min, max) = self.travel_bounds();
        for obstacle in self.obstacles.iter_mut().filter(|o| o.kind.is_moving()) {
            let x = obstacle.pos.x + speed * dt;
            obstacle.pos.x = wrap_position(x, min, max);
            if obstacle.pos.x != x {
                log::debug!("Lane {}: {} wrapped {} -> {}", self.row, obstacle.image, x, obstacle.pos.x);
            }
        }
    }

    /// Road hazard: does the frog's hitbox touch any car?
    pub fn collide_car(&self, frog: &Frog) -> bool {
        if !matches!(self.kind, LaneKind::Road) {
            return false;
        }
        let hitbox = frog.hitbox();
        self.obstacles.iter().any(|car| car.hitbox().intersects(&hitbox))
    }

    /// Water hazard.
    ///
    /// The frog is supported when its centre lies inside a log's hitbox, or
    /// while it is mid-slide. A supported frog drifts with the lane and drowns
    /// if that carries it outside `[0, world_width]`. An unsupported frog
    /// drowns straight away.
    pub fn on_log(&self, frog: &mut Frog, world_width: f32, in_motion: bool, dt: f32) -> WaterOutcome {
        if !matches!(self.kind, LaneKind::Water) {
            return WaterOutcome::Safe;
        }

        let supported = in_motion
            || self
                .obstacles
                .iter()
                .any(|log| log.kind == ObstacleKind::Log && log.hitbox().contains(frog.pos));
        if !supported {
            return WaterOutcome::Drowned;
        }

        frog.pos.x += self.speed.unwrap_or(0.0) * dt;
        if frog.pos.x < 0.0 || frog.pos.x > world_width {
            WaterOutcome::Drowned
        } else {
            WaterOutcome::Safe
        }
    }

    /// Hedge rule for a frog arriving at `pos` while moving `direction`.
    ///
    /// Claiming an exit marks it occupied and drops a safe marker on it.
    /// Non-hedge lanes never block.
    pub fn can_continue(&mut self, pos: Vec2, direction: Direction) -> HedgeProbe {
        let total = self.total_exits();
        let LaneKind::Hedge { claimed } = &mut self.kind else {
            return HedgeProbe::Passable;
        };

        let slot = self.obstacles.iter().position(|o| {
            matches!(o.kind, ObstacleKind::Exit | ObstacleKind::Opening) && o.hitbox().contains(pos)
        });
        let Some(index) = slot else {
            return HedgeProbe::Blocked;
        };

        let marker = &mut self.obstacles[index];
        if marker.kind == ObstacleKind::Opening {
            return HedgeProbe::Passable;
        }
        if marker.occupied || direction == Direction::Down {
            return HedgeProbe::Blocked;
        }

        marker.occupied = true;
        claimed.push(index);
        let safe_hitbox = Rect::new(0.0, 0.0, self.cell_size, self.cell_size);
        self.safe.push(Obstacle::new(
            ObstacleKind::Safe,
            SAFE_IMAGE,
            marker.pos,
            Vec2::splat(self.cell_size),
            safe_hitbox,
        ));
        log::info!("Exit {} claimed in row {} ({}/{})", index, self.row, claimed.len(), total);
        HedgeProbe::ReachedExit
    }

    /// Number of exits this lane was built with
    pub fn total_exits(&self) -> usize {
        self.obstacles.iter().filter(|o| o.kind == ObstacleKind::Exit).count()
    }

    /// Number of exits claimed so far
    pub fn occupied_count(&self) -> usize {
        match &self.kind {
            LaneKind::Hedge { claimed } => claimed.len(),
            _ => 0,
        }
    }

    /// True while this lane still has a free exit
    pub fn exits_remaining(&self) -> bool {
        self.occupied_count() < self.total_exits()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_tile(self.kind.tile_image(), self.strip);
        for obstacle in &self.obstacles {
            obstacle.draw(canvas);
        }
        for marker in &self.safe {
            marker.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CELL: f32 = 64.0;

    const OBJECTS: &str = r#"{
        "images": {
            "car": { "hitbox": [0, 0, 64, 64] },
            "log": { "hitbox": [0, 0, 192, 64], "size": [3, 1] },
            "exit": { "hitbox": [0, 0, 64, 64] },
            "open": { "hitbox": [0, 0, 64, 64] }
        }
    }"#;

    /// A one-row level of width 10 with an offscreen buffer of 2
    fn single_lane(lane: &str) -> Lane {
        let level = format!(
            r#"{{ "size": [10, 1], "offscreen": 2, "start": [0, 0], "lanes": [{}] }}"#,
            lane
        );
        let config = LevelConfig::from_json(&level, OBJECTS, CELL).unwrap();
        Lane::new(&config, 0, &config.lanes()[0]).unwrap()
    }

    fn frog_at(x: f32, y: f32) -> Frog {
        Frog::new(Vec2::new(x, y), CELL, Rect::new(0.0, 0.0, CELL, CELL))
    }

    #[test]
    fn test_obstacle_placement() {
        let lane = single_lane(r#"{ "type": "road", "speed": -50, "objects": [ { "type": "car", "position": 3 } ] }"#);
        let car = &lane.obstacles()[0];
        assert_eq!(car.kind, ObstacleKind::Car);
        assert_eq!(car.pos, Vec2::new(224.0, 32.0));
        assert_eq!(car.angle, 180.0);
        assert_eq!(car.image, "car.png");
        assert_eq!(lane.strip(), Rect::new(0.0, 0.0, 640.0, 64.0));
    }

    #[test]
    fn test_update_moves_by_distance() {
        let mut lane = single_lane(r#"{ "type": "road", "speed": 50, "objects": [ { "type": "car", "position": 3 } ] }"#);
        lane.update(0.5);
        assert!((lane.obstacles()[0].pos.x - 249.0).abs() < 1e-4);
    }

    #[test]
    fn test_lane_without_speed_is_static() {
        let mut lane = single_lane(r#"{ "type": "grass", "objects": [ { "type": "car", "position": 3 } ] }"#);
        lane.update(10.0);
        assert_eq!(lane.obstacles()[0].pos.x, 224.0);
    }

    #[test]
    fn test_wrap_left_preserves_overflow() {
        // Bounds are [-128, 768]; a car at -120 moving 50 px left overshoots by 42
        let mut lane = single_lane(r#"{ "type": "road", "speed": -50, "objects": [ { "type": "car", "position": -2.375 } ] }"#);
        assert_eq!(lane.obstacles()[0].pos.x, -120.0);
        lane.update(1.0);
        assert!((lane.obstacles()[0].pos.x - (768.0 - 42.0)).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_right_preserves_overflow() {
        let mut lane = single_lane(r#"{ "type": "road", "speed": 50, "objects": [ { "type": "car", "position": 11.5 } ] }"#);
        assert_eq!(lane.obstacles()[0].pos.x, 768.0);
        lane.update(0.5);
        assert!((lane.obstacles()[0].pos.x - (-128.0 + 25.0)).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_position_inside_is_untouched() {
        assert_eq!(wrap_position(-128.0, -128.0, 768.0), -128.0);
        assert_eq!(wrap_position(768.0, -128.0, 768.0), 768.0);
        assert_eq!(wrap_position(10.0, -128.0, 768.0), 10.0);
    }

    #[test]
    fn test_collide_car() {
        let lane = single_lane(r#"{ "type": "road", "speed": 50, "objects": [ { "type": "car", "position": 3 } ] }"#);
        assert!(lane.collide_car(&frog_at(224.0, 32.0)));
        assert!(lane.collide_car(&frog_at(200.0, 32.0)));
        // Touching edges only
        assert!(!lane.collide_car(&frog_at(160.0, 32.0)));
        assert!(!lane.collide_car(&frog_at(32.0, 32.0)));
    }

    #[test]
    fn test_grass_is_always_safe() {
        let lane = single_lane(r#"{ "type": "grass", "objects": [ { "type": "car", "position": 3 } ] }"#);
        let mut frog = frog_at(224.0, 32.0);
        assert!(!lane.collide_car(&frog));
        assert_eq!(lane.on_log(&mut frog, 640.0, false, 0.1), WaterOutcome::Safe);
    }

    #[test]
    fn test_on_log_carries_frog() {
        let lane = single_lane(r#"{ "type": "water", "speed": 100, "objects": [ { "type": "log", "position": 2 } ] }"#);
        // The log is three cells wide, centred on 160: [64, 256]
        let mut frog = frog_at(160.0, 32.0);
        assert_eq!(lane.on_log(&mut frog, 640.0, false, 0.1), WaterOutcome::Safe);
        assert!((frog.pos.x - 170.0).abs() < 1e-4);
    }

    #[test]
    fn test_off_log_drowns() {
        let lane = single_lane(r#"{ "type": "water", "speed": 100, "objects": [ { "type": "log", "position": 2 } ] }"#);
        let mut frog = frog_at(32.0, 32.0);
        assert_eq!(lane.on_log(&mut frog, 640.0, false, 0.1), WaterOutcome::Drowned);
        // Untouched: nothing carried it
        assert_eq!(frog.pos.x, 32.0);
    }

    #[test]
    fn test_sliding_frog_is_carried_without_log() {
        let lane = single_lane(r#"{ "type": "water", "speed": -100, "objects": [] }"#);
        let mut frog = frog_at(32.0, 32.0);
        assert_eq!(lane.on_log(&mut frog, 640.0, true, 0.1), WaterOutcome::Safe);
        assert!((frog.pos.x - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_log_carries_frog_off_world() {
        let lane = single_lane(r#"{ "type": "water", "speed": 100, "objects": [ { "type": "log", "position": 8 } ] }"#);
        let mut frog = frog_at(636.0, 32.0);
        assert_eq!(lane.on_log(&mut frog, 640.0, false, 0.1), WaterOutcome::Drowned);
    }

    #[test]
    fn test_hedge_claims_exit_once() {
        let mut lane = single_lane(
            r#"{ "type": "hedge", "objects": [ { "type": "exit", "position": 1 }, { "type": "open", "position": 5 } ] }"#,
        );
        assert_eq!(lane.total_exits(), 1);
        assert_eq!(lane.occupied_count(), 0);

        let exit = Vec2::new(96.0, 32.0);
        assert_eq!(lane.can_continue(exit, Direction::Up), HedgeProbe::ReachedExit);
        assert!(lane.obstacles()[0].occupied);
        assert_eq!(lane.safe_markers().len(), 1);
        assert_eq!(lane.safe_markers()[0].pos, exit);
        assert_eq!(lane.occupied_count(), 1);

        // Claimed exits stay claimed and block
        assert_eq!(lane.can_continue(exit, Direction::Up), HedgeProbe::Blocked);
        assert_eq!(lane.occupied_count(), 1);
        assert_eq!(lane.safe_markers().len(), 1);
        assert!(!lane.exits_remaining());
    }

    #[test]
    fn test_hedge_blocks_downward_entry_and_solid_hedge() {
        let mut lane = single_lane(
            r#"{ "type": "hedge", "objects": [ { "type": "exit", "position": 1 }, { "type": "open", "position": 5 } ] }"#,
        );
        assert_eq!(lane.can_continue(Vec2::new(96.0, 32.0), Direction::Down), HedgeProbe::Blocked);
        assert_eq!(lane.occupied_count(), 0);
        assert_eq!(lane.can_continue(Vec2::new(352.0, 32.0), Direction::Up), HedgeProbe::Passable);
        assert_eq!(lane.can_continue(Vec2::new(352.0, 32.0), Direction::Down), HedgeProbe::Passable);
        assert_eq!(lane.can_continue(Vec2::new(224.0, 32.0), Direction::Up), HedgeProbe::Blocked);
    }

    #[test]
    fn test_non_hedge_never_blocks() {
        let mut lane = single_lane(r#"{ "type": "grass" }"#);
        assert_eq!(lane.can_continue(Vec2::new(96.0, 32.0), Direction::Up), HedgeProbe::Passable);
        assert_eq!(lane.total_exits(), 0);
        assert!(!lane.exits_remaining());
    }

    #[test]
    fn test_hedge_markers_do_not_drift() {
        let mut lane = single_lane(r#"{ "type": "hedge", "speed": 40, "objects": [ { "type": "exit", "position": 1 } ] }"#);
        lane.update(1.0);
        assert_eq!(lane.obstacles()[0].pos.x, 96.0);
    }

    #[test]
    fn test_draw_order() {
        use crate::platform::canvas::{DrawCall, RecordingCanvas};

        let mut lane = single_lane(r#"{ "type": "hedge", "objects": [ { "type": "exit", "position": 1 } ] }"#);
        lane.can_continue(Vec2::new(96.0, 32.0), Direction::Up);
        let mut canvas = RecordingCanvas::new();
        lane.draw(&mut canvas);

        assert_eq!(canvas.calls.len(), 3);
        assert!(matches!(&canvas.calls[0], DrawCall::Tile { source, .. } if source == "hedge.png"));
        assert_eq!(canvas.images("exit.png").len(), 1);
        assert_eq!(canvas.images(SAFE_IMAGE).len(), 1);
    }

    proptest! {
        #[test]
        fn frame_rate_invariant(speed in -400.0f32..400.0, start in -2.0f32..11.0) {
            let lane_json = format!(
                r#"{{ "type": "road", "speed": {}, "objects": [ {{ "type": "car", "position": {} }} ] }}"#,
                speed, start
            );
            let mut coarse = single_lane(&lane_json);
            let mut fine = coarse.clone();

            coarse.update(1.0);
            for _ in 0..10 {
                fine.update(0.1);
            }

            let a = coarse.obstacles()[0].pos.x;
            let b = fine.obstacles()[0].pos.x;
            // Positions on either side of the seam are the same point
            let span = 896.0;
            let diff = (a - b).abs();
            prop_assert!(diff < 0.05 || (span - diff).abs() < 0.05, "coarse {} fine {}", a, b);
        }

        #[test]
        fn wrap_keeps_overflow(overflow in 0.01f32..800.0) {
            let (min, max) = (-128.0, 768.0);
            let left = wrap_position(min - overflow, min, max);
            prop_assert!((left - (max - overflow)).abs() < 1e-3);
            let right = wrap_position(max + overflow, min, max);
            prop_assert!((right - (min + overflow)).abs() < 1e-3);
        }

        #[test]
        fn centred_on_log_never_drowns(offset in 1.0f32..191.0, dt in 0.0f32..0.05) {
            // Log spans [64, 256] in a world 640 wide
            let lane = single_lane(r#"{ "type": "water", "speed": 100, "objects": [ { "type": "log", "position": 2 } ] }"#);
            let mut frog = frog_at(64.0 + offset, 32.0);
            prop_assert_eq!(lane.on_log(&mut frog, 640.0, false, dt), WaterOutcome::Safe);
        }

        #[test]
        fn off_every_log_always_drowns(x in 0.0f32..63.0, dt in 0.0f32..0.1) {
            let lane = single_lane(
                r#"{ "type": "water", "speed": 100, "objects": [ { "type": "log", "position": 2 }, { "type": "log", "position": 7 } ] }"#,
            );
            let mut frog = frog_at(x, 32.0);
            prop_assert_eq!(lane.on_log(&mut frog, 640.0, false, dt), WaterOutcome::Drowned);
        }
    }
}
