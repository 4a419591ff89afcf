//! Simulation module
//!
//! All gameplay logic lives here. It is frame-driven and free of I/O:
//! - Time only advances through `update(controls, dt)`
//! - Lanes and obstacles keep their descriptor order
//! - Drawing and input go through the `platform` traits

pub mod actor;
pub mod geom;
pub mod lane;
pub mod level;
pub mod obstacle;
pub mod session;

pub use actor::{Direction, Frog, Slide};
pub use geom::Rect;
pub use lane::{HedgeProbe, Lane, LaneKind, WaterOutcome, wrap_position};
pub use level::{Level, LevelEvent};
pub use obstacle::{Obstacle, ObstacleKind};
pub use session::{GameSession, Outcome, SessionState};
