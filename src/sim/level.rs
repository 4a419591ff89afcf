//! A single level
//!
//! The level owns the lane stack, the frog and the lives pool. Each tick it:
//! 1. advances the frog's slide, or resolves at most one new move
//! 2. drifts every lane's obstacles
//! 3. checks water lanes under the frog (carry or drown)
//! 4. checks road lanes under the frog (car hits)
//!
//! At most one [`LevelEvent`] comes out of a tick, in that order of priority.

use glam::Vec2;

use super::actor::{Direction, Frog};
use super::lane::{HedgeProbe, Lane, WaterOutcome};
use crate::consts::FROG_HEAD;
use crate::descriptor::{LaneType, LevelConfig};
use crate::error::LevelError;
use crate::platform::canvas::{Anchor, Canvas, Label};
use crate::platform::input::{Action, Controls};
use crate::settings::Settings;

/// Something the session has to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    /// The frog claimed an exit and was retired
    InExit,
    /// The frog died and lives remain
    LifeLost,
    /// The frog died and that was the last life
    NoLivesLeft,
}

/// Lane stack, frog and lives for one play session
#[derive(Debug, Clone)]
pub struct Level {
    config: LevelConfig,
    lanes: Vec<Lane>,
    frog: Option<Frog>,
    lives: u8,
    max_lives: u8,
    frog_speed: f32,
}

impl Level {
    pub fn new(config: LevelConfig, settings: &Settings) -> Result<Self, LevelError> {
        let lanes = config
            .lanes()
            .iter()
            .enumerate()
            .map(|(row, desc)| Lane::new(&config, row, desc))
            .collect::<Result<Vec<_>, _>>()?;
        let frog = Self::spawn_frog(&config);

        log::info!(
            "Level ready: {} lanes, {} exits, {} lives",
            lanes.len(),
            lanes.iter().map(Lane::total_exits).sum::<usize>(),
            settings.lives
        );

        Ok(Self {
            config,
            lanes,
            frog: Some(frog),
            lives: settings.lives,
            max_lives: settings.lives,
            frog_speed: settings.frog_speed,
        })
    }

    fn spawn_frog(config: &LevelConfig) -> Frog {
        Frog::new(config.start_position(), config.cell_size(), config.frog_hitbox())
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// The frog, or `None` while dead or retired into an exit
    pub fn frog(&self) -> Option<&Frog> {
        self.frog.as_ref()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width()
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height()
    }

    /// Window size: the world plus one row for the lives meter
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.world_width(), self.world_height() + self.config.cell_size())
    }

    /// Put a fresh frog on the start cell
    pub fn reconstruct_frog(&mut self) {
        self.frog = Some(Self::spawn_frog(&self.config));
    }

    /// True while any hedge still has an unclaimed exit
    pub fn exits_remaining(&self) -> bool {
        self.lanes
            .iter()
            .filter(|lane| lane.lane_type() == LaneType::Hedge)
            .any(Lane::exits_remaining)
    }

    /// Every exit of every hedge is claimed
    pub fn is_won(&self) -> bool {
        !self.exits_remaining()
    }

    /// Advance the level by one tick
    pub fn update(&mut self, controls: &dyn Controls, dt: f32) -> Option<LevelEvent> {
        if let Some(frog) = self.frog.as_mut() {
            if frog.is_sliding() {
                frog.advance_slide(dt);
            } else if let Some(direction) = Direction::ALL
                .into_iter()
                .find(|d| controls.pressed(Action::Move(*d)))
            {
                if let Some(event) = self.resolve_move(direction) {
                    return Some(event);
                }
            }
        }

        for lane in &mut self.lanes {
            lane.update(dt);
        }

        if let Some(event) = self.check_water(dt) {
            return Some(event);
        }
        self.check_roads()
    }

    /// Try to move the frog one cell. Facing always changes.
    fn resolve_move(&mut self, direction: Direction) -> Option<LevelEvent> {
        let cell = self.config.cell_size();
        let (width, height) = (self.world_width(), self.world_height());
        let duration = self.frog_speed;
        let frog = self.frog.as_mut()?;

        frog.facing = direction;
        let candidate = frog.pos + direction.step() * cell;
        if candidate.x < 0.0 || candidate.x > width || candidate.y < 0.0 || candidate.y > height {
            log::debug!("Move {} rejected: outside the world", direction);
            return None;
        }

        let mut probe = HedgeProbe::Passable;
        for lane in self
            .lanes
            .iter_mut()
            .filter(|lane| lane.lane_type() == LaneType::Hedge && lane.strip().contains(candidate))
        {
            probe = lane.can_continue(candidate, direction);
            if probe != HedgeProbe::Passable {
                break;
            }
        }

        match probe {
            HedgeProbe::ReachedExit => {
                log::info!("Frog reached an exit at ({}, {})", candidate.x, candidate.y);
                self.frog = None;
                Some(LevelEvent::InExit)
            }
            HedgeProbe::Blocked => {
                log::debug!("Move {} rejected: blocked by hedge", direction);
                None
            }
            HedgeProbe::Passable => {
                frog.slide_to(candidate, duration);
                None
            }
        }
    }

    fn check_water(&mut self, dt: f32) -> Option<LevelEvent> {
        let width = self.world_width();
        let frog = self.frog.as_mut()?;
        let in_motion = frog.is_sliding();

        let mut drowned = false;
        for lane in self.lanes.iter().filter(|lane| lane.lane_type() == LaneType::Water) {
            if lane.overlaps(frog) && lane.on_log(frog, width, in_motion, dt) == WaterOutcome::Drowned {
                drowned = true;
                break;
            }
        }

        if drowned {
            log::debug!("Frog drowned");
            Some(self.lose_life())
        } else {
            None
        }
    }

    fn check_roads(&mut self) -> Option<LevelEvent> {
        let frog = self.frog.as_ref()?;
        let hit = self
            .lanes
            .iter()
            .filter(|lane| lane.lane_type() == LaneType::Road)
            .any(|lane| lane.overlaps(frog) && lane.collide_car(frog));

        if hit {
            log::debug!("Frog hit by a car");
            Some(self.lose_life())
        } else {
            None
        }
    }

    fn lose_life(&mut self) -> LevelEvent {
        self.frog = None;
        self.lives = self.lives.saturating_sub(1);
        log::info!("Life lost, {} left", self.lives);
        if self.lives > 0 {
            LevelEvent::LifeLost
        } else {
            LevelEvent::NoLivesLeft
        }
    }

    /// Centres of the lives-meter icons, one per remaining life
    pub fn lives_icons(&self) -> Vec<Vec2> {
        let cell = self.config.cell_size();
        let y = self.world_height() + cell / 2.0;
        // Lost lives disappear from the right
        (self.max_lives - self.lives..self.max_lives)
            .map(|i| Vec2::new(self.world_width() - cell / 2.0 - i as f32 * cell, y))
            .collect()
    }

    fn lives_label(&self) -> Label {
        let cell = self.config.cell_size();
        Label {
            text: "lives:".to_string(),
            position: Vec2::new(
                self.world_width() - self.max_lives as f32 * cell,
                self.world_height() + cell / 2.0,
            ),
            font_size: 48.0,
            anchor: Anchor::Right,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for lane in &self.lanes {
            lane.draw(canvas);
        }
        if let Some(frog) = &self.frog {
            frog.draw(canvas);
        }
        let icon = Vec2::splat(self.config.cell_size());
        for center in self.lives_icons() {
            canvas.draw_image(FROG_HEAD, center, icon, 0.0);
        }
        canvas.draw_label(&self.lives_label());
    }
}
