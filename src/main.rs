//! Frogger headless runner
//!
//! Plays a scripted list of moves against the configured level and logs
//! what happens. Usage:
//!
//! ```text
//! frogger [settings.json] [up,up,left,up,...]
//! ```
//!
//! Run with `RUST_LOG=info` (or `debug`) to see the session transitions.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Frogger (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core has no browser front end
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use frogger::consts::FRAME_DT;
    use frogger::sim::Frog;
    use frogger::{
        Action, Direction, FileLevelSource, GameResult, GameSession, KeyBindings, KeyTracker, Level,
        SessionState, Settings,
    };

    const SETTINGS_PATH: &str = "settings.json";
    /// Ten seconds at 60 Hz; no slide takes that long
    const MAX_IDLE_FRAMES: u32 = 600;

    pub fn run() -> GameResult<()> {
        let mut args = std::env::args().skip(1);
        let settings_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_PATH));
        let moves = match args.next() {
            Some(script) => parse_moves(&script)?,
            None => Vec::new(),
        };

        let settings = Settings::load(&settings_path);
        let mut runner = Runner::new(settings);
        runner.play(&moves)?;
        runner.report();
        Ok(())
    }

    /// Comma-separated direction names
    fn parse_moves(script: &str) -> GameResult<Vec<Direction>> {
        script
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(|token| token.parse::<Direction>())
            .collect()
    }

    struct Runner {
        session: GameSession<FileLevelSource>,
        keys: KeyTracker,
        bindings: KeyBindings,
        frames: u64,
    }

    impl Runner {
        fn new(settings: Settings) -> Self {
            let source = FileLevelSource::new(&settings.level_path, &settings.objects_path);
            let bindings = settings.keys.clone();
            Self {
                session: GameSession::new(settings, source),
                keys: KeyTracker::new(bindings.clone()),
                bindings,
                frames: 0,
            }
        }

        fn frame(&mut self, held: &[&str]) -> GameResult<()> {
            self.keys.begin_frame(held.iter().copied());
            self.session.update(&self.keys, FRAME_DT)?;
            self.frames += 1;
            Ok(())
        }

        /// Tap a key for one frame
        fn tap(&mut self, action: Action) -> GameResult<()> {
            let key = self.bindings.key_for(action).to_string();
            self.frame(&[key.as_str()])?;
            self.frame(&[])
        }

        /// Idle until the frog has landed
        fn settle(&mut self) -> GameResult<()> {
            for _ in 0..MAX_IDLE_FRAMES {
                let sliding = self
                    .session
                    .level()
                    .and_then(Level::frog)
                    .is_some_and(Frog::is_sliding);
                if !sliding {
                    break;
                }
                self.frame(&[])?;
            }
            Ok(())
        }

        fn play(&mut self, moves: &[Direction]) -> GameResult<()> {
            self.tap(Action::Start)?;

            for &direction in moves {
                match self.session.state() {
                    SessionState::Complete => break,
                    SessionState::Paused => self.tap(Action::Continue)?,
                    _ => {}
                }
                log::debug!("Move {}", direction);
                self.tap(Action::Move(direction))?;
                self.settle()?;
            }
            Ok(())
        }

        fn report(&self) {
            let lives = self.session.level().map_or(0, Level::lives);
            match self.session.outcome() {
                Some(outcome) => log::info!(
                    "Finished after {} frames: {:?} with {} lives left",
                    self.frames,
                    outcome,
                    lives
                ),
                None => log::info!(
                    "Script ended after {} frames in {:?} with {} lives left",
                    self.frames,
                    self.session.state(),
                    lives
                ),
            }
        }
    }

}
