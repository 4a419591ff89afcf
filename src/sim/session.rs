//! Top-level session state machine
//!
//! ```text
//! Inactive -> Loading -> Active <-> Paused -> Continue -> Active
//!                          |
//!                          +-> Complete
//! ```
//!
//! The states are checked in a fixed order inside one `update`, so a single
//! call can pass through several of them: pressing start loads the level and
//! lands in `Active`, and leaving `Paused` goes through `Continue` straight
//! back to `Active`.

use glam::Vec2;

use super::level::{Level, LevelEvent};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::descriptor::LevelSource;
use crate::error::LevelError;
use crate::platform::canvas::{Canvas, Label};
use crate::platform::input::{Action, Controls};
use crate::settings::Settings;

const TITLE_FONT: f32 = 124.0;
const MESSAGE_FONT: f32 = 64.0;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Title screen, waiting for the start key
    Inactive,
    /// Building the level
    Loading,
    /// Normal play
    Active,
    /// Frog lost or rescued, waiting for the continue key
    Paused,
    /// Fresh frog placed, resuming next
    Continue,
    /// Game over, won or lost
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Owns the level and decides what happens between frogs
pub struct GameSession<S: LevelSource> {
    settings: Settings,
    source: S,
    state: SessionState,
    level: Option<Level>,
    title: Option<Label>,
    message: Option<Label>,
    outcome: Option<Outcome>,
    viewport: Vec2,
}

impl<S: LevelSource> GameSession<S> {
    pub fn new(settings: Settings, source: S) -> Self {
        let mut session = Self {
            settings,
            source,
            state: SessionState::Inactive,
            level: None,
            title: None,
            message: None,
            outcome: None,
            viewport: Vec2::new(GAME_WIDTH, GAME_HEIGHT),
        };
        session.show_title();
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Set once the session reaches `Complete`
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Window size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn title(&self) -> Option<&Label> {
        self.title.as_ref()
    }

    pub fn message(&self) -> Option<&Label> {
        self.message.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Drop the level and go back to the title screen
    pub fn restart(&mut self) {
        self.level = None;
        self.outcome = None;
        self.viewport = Vec2::new(GAME_WIDTH, GAME_HEIGHT);
        self.transition(SessionState::Inactive);
        self.show_title();
    }

    /// Advance one frame. Only a failed level load is an error.
    pub fn update(&mut self, controls: &dyn Controls, dt: f32) -> Result<(), LevelError> {
        if self.state == SessionState::Inactive && controls.pressed(Action::Start) {
            self.transition(SessionState::Loading);
        }

        if self.state != SessionState::Inactive {
            self.title = None;
        }

        if self.state == SessionState::Active {
            self.update_active(controls, dt);
        }

        if self.state == SessionState::Loading {
            self.load_level()?;
        }

        if self.state == SessionState::Paused {
            let prompt = format!("press '{}' to continue", self.settings.keys.resume);
            self.message = Some(self.banner(prompt));
            if controls.pressed(Action::Continue) {
                self.transition(SessionState::Continue);
                if let Some(level) = self.level.as_mut() {
                    level.reconstruct_frog();
                }
            }
        }

        if self.state == SessionState::Continue {
            self.message = None;
            self.transition(SessionState::Active);
        }

        if self.state == SessionState::Complete {
            let text = match self.outcome {
                Some(Outcome::Won) => "you win",
                _ => "you lose",
            };
            self.message = Some(self.banner(text));
        }

        Ok(())
    }

    fn update_active(&mut self, controls: &dyn Controls, dt: f32) {
        self.message = None;
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let event = level.update(controls, dt);
        let won = level.is_won();

        match event {
            Some(LevelEvent::LifeLost) => self.transition(SessionState::Paused),
            Some(LevelEvent::InExit) if won => {
                self.outcome = Some(Outcome::Won);
                self.transition(SessionState::Complete);
            }
            Some(LevelEvent::InExit) => self.transition(SessionState::Paused),
            Some(LevelEvent::NoLivesLeft) => {
                self.outcome = Some(Outcome::Lost);
                self.transition(SessionState::Complete);
            }
            None => {}
        }
    }

    fn load_level(&mut self) -> Result<(), LevelError> {
        self.title = None;
        self.message = None;

        let config = self.source.load(self.settings.grid_size)?;
        let level = Level::new(config, &self.settings)?;
        self.viewport = level.viewport_size();
        log::info!("Viewport {}x{}", self.viewport.x, self.viewport.y);

        self.level = Some(level);
        self.outcome = None;
        self.transition(SessionState::Active);
        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            log::info!("Session {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    fn show_title(&mut self) {
        let center = self.viewport / 2.0;
        self.title = Some(Label::centered("frogger!", center, TITLE_FONT));
        let prompt = format!("press '{}' to start", self.settings.keys.start);
        self.message = Some(Label::centered(
            prompt,
            center - Vec2::new(0.0, self.settings.grid_size),
            MESSAGE_FONT,
        ));
    }

    /// Message strip across the middle of the screen
    fn banner(&self, text: impl Into<String>) -> Label {
        let position = self.viewport / 2.0 - Vec2::new(0.0, self.settings.grid_size / 2.0);
        Label::centered(text, position, MESSAGE_FONT)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.state {
            SessionState::Inactive => {
                if let Some(title) = &self.title {
                    canvas.draw_label(title);
                }
                if let Some(message) = &self.message {
                    canvas.draw_label(message);
                }
            }
            SessionState::Loading | SessionState::Active | SessionState::Continue => {
                if let Some(level) = &self.level {
                    level.draw(canvas);
                }
            }
            SessionState::Paused | SessionState::Complete => {
                if let Some(level) = &self.level {
                    level.draw(canvas);
                }
                if let Some(message) = &self.message {
                    canvas.draw_label(message);
                }
            }
        }
    }
}
