//! Held-key tracking and the per-tick player intent derived from it.

use std::collections::HashSet;

use super::queue::InputEvent;

/// Browser `keyCode` values for the default bindings.
pub mod keys {
    pub const SHIFT: u32 = 16;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
    pub const X: u32 = 88;
}

/// Set of currently held keys, folded from key events.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<u32>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one input event. Custom events are ignored here.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.held.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
            }
            InputEvent::ReleaseAll => self.held.clear(),
            InputEvent::Custom { .. } => {}
        }
    }

    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    fn any(&self, codes: &[u32]) -> bool {
        codes.iter().any(|c| self.is_held(*c))
    }
}

/// What the player wants to do this tick, independent of key bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
    pub throw: bool,
}

impl PlayerIntent {
    /// Map held keys through the default bindings.
    pub fn from_keys(keys: &KeyState) -> Self {
        Self {
            left: keys.any(&[keys::LEFT, keys::A]),
            right: keys.any(&[keys::RIGHT, keys::D]),
            jump: keys.any(&[keys::SPACE, keys::UP, keys::W]),
            crouch: keys.any(&[keys::DOWN, keys::S]),
            throw: keys.any(&[keys::X, keys::SHIFT]),
        }
    }

    /// Net horizontal input: −1, 0 or +1. Opposing keys cancel.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_then_up() {
        let mut state = KeyState::new();
        state.apply(&InputEvent::KeyDown { key_code: keys::RIGHT });
        assert!(PlayerIntent::from_keys(&state).right);
        state.apply(&InputEvent::KeyUp { key_code: keys::RIGHT });
        assert!(!PlayerIntent::from_keys(&state).right);
    }

    #[test]
    fn alternate_bindings_map_to_same_intent() {
        let mut state = KeyState::new();
        state.apply(&InputEvent::KeyDown { key_code: keys::W });
        state.apply(&InputEvent::KeyDown { key_code: keys::A });
        let intent = PlayerIntent::from_keys(&state);
        assert!(intent.jump);
        assert!(intent.left);
        assert_eq!(intent.horizontal(), -1.0);
    }

    #[test]
    fn opposing_directions_cancel() {
        let intent = PlayerIntent { left: true, right: true, ..Default::default() };
        assert_eq!(intent.horizontal(), 0.0);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut state = KeyState::new();
        state.apply(&InputEvent::KeyDown { key_code: keys::X });
        state.apply(&InputEvent::KeyDown { key_code: keys::DOWN });
        state.apply(&InputEvent::ReleaseAll);
        assert_eq!(PlayerIntent::from_keys(&state), PlayerIntent::default());
    }
}
