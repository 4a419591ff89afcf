//! Input edges
//!
//! Every action is edge-triggered: it fires on the frame a key goes down and
//! not again until the key has been released. Holding a key never repeats a
//! move or skips through several session states in one go.

use std::collections::HashSet;

use crate::settings::KeyBindings;
use crate::sim::actor::Direction;

/// Something the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Start,
    Continue,
}

/// Key-down edge queries, polled once per tick
pub trait Controls {
    /// True only on the frame the action's key went down
    fn pressed(&self, action: Action) -> bool;
}

/// Derives key-down edges from the set of keys held each frame
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    bindings: KeyBindings,
    held: HashSet<String>,
    previous: HashSet<String>,
}

impl KeyTracker {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            previous: HashSet::new(),
        }
    }

    /// Record the keys held down this frame
    pub fn begin_frame<I, K>(&mut self, held: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.previous = std::mem::take(&mut self.held);
        self.held = held.into_iter().map(Into::into).collect();
    }

    pub fn is_key_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Up last frame, down this frame
    pub fn key_pressed(&self, key: &str) -> bool {
        self.held.contains(key) && !self.previous.contains(key)
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

impl Controls for KeyTracker {
    fn pressed(&self, action: Action) -> bool {
        self.key_pressed(self.bindings.key_for(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fires_once_while_held() {
        let mut keys = KeyTracker::new(KeyBindings::default());
        keys.begin_frame(["up"]);
        assert!(keys.pressed(Action::Move(Direction::Up)));

        keys.begin_frame(["up"]);
        assert!(keys.is_key_down("up"));
        assert!(!keys.pressed(Action::Move(Direction::Up)));

        keys.begin_frame(Vec::<String>::new());
        keys.begin_frame(["up"]);
        assert!(keys.pressed(Action::Move(Direction::Up)));
    }

    #[test]
    fn test_uses_bindings() {
        let bindings = KeyBindings {
            start: "enter".to_string(),
            ..KeyBindings::default()
        };
        let mut keys = KeyTracker::new(bindings);
        keys.begin_frame(["s"]);
        assert!(!keys.pressed(Action::Start));
        keys.begin_frame(["s", "enter"]);
        assert!(keys.pressed(Action::Start));
        assert!(!keys.pressed(Action::Continue));
    }

    #[test]
    fn test_default_tracker_sees_nothing() {
        let keys = KeyTracker::default();
        assert!(!keys.pressed(Action::Start));
        assert!(!keys.is_key_down("s"));
    }
}
