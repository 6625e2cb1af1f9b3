//! Player input and movement
//!
//! Held movement keys are tracked as a small set; each locomotion tick
//! applies a fixed step per held key, per axis, then clamps to the room.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Logical keys the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Interact,
    Restart,
}

impl Key {
    /// Unit displacement for movement keys, `None` for action keys
    pub fn direction(&self) -> Option<Vec2> {
        match self {
            Key::Up => Some(Vec2::NEG_Y),
            Key::Down => Some(Vec2::Y),
            Key::Left => Some(Vec2::NEG_X),
            Key::Right => Some(Vec2::X),
            Key::Interact | Key::Restart => None,
        }
    }
}

/// Currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Record a key press or release. Action keys are ignored.
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Interact | Key::Restart => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Interact | Key::Restart => false,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Step the player one locomotion tick.
///
/// Each held key clamps on its own, so opposite keys cancel and diagonals
/// move at full per-axis speed.
pub fn step_player(pos: Vec2, keys: &HeldKeys) -> Vec2 {
    let min = ROOM_MARGIN;
    let max = ROOM_SIZE - ROOM_MARGIN;
    let mut next = pos;

    if keys.up {
        next.y = (next.y - PLAYER_STEP).max(min);
    }
    if keys.down {
        next.y = (next.y + PLAYER_STEP).min(max);
    }
    if keys.left {
        next.x = (next.x - PLAYER_STEP).max(min);
    }
    if keys.right {
        next.x = (next.x + PLAYER_STEP).min(max);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> HeldKeys {
        let mut held = HeldKeys::default();
        for &key in keys {
            held.set(key, true);
        }
        held
    }

    #[test]
    fn test_single_key_step() {
        let pos = step_player(Vec2::new(100.0, 100.0), &held(&[Key::Right]));
        assert_eq!(pos, Vec2::new(103.0, 100.0));
    }

    #[test]
    fn test_diagonal_is_uncapped() {
        let pos = step_player(Vec2::new(100.0, 100.0), &held(&[Key::Down, Key::Right]));
        assert_eq!(pos, Vec2::new(103.0, 103.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let pos = step_player(Vec2::new(100.0, 100.0), &held(&[Key::Left, Key::Right]));
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_clamped_to_room() {
        let pos = step_player(Vec2::new(21.0, 579.0), &held(&[Key::Left, Key::Down]));
        assert_eq!(pos, Vec2::new(ROOM_MARGIN, ROOM_SIZE - ROOM_MARGIN));
    }

    #[test]
    fn test_action_keys_not_held() {
        let mut keys = HeldKeys::default();
        keys.set(Key::Interact, true);
        keys.set(Key::Restart, true);
        assert!(!keys.any());
        assert!(!keys.is_held(Key::Interact));

        keys.set(Key::Up, true);
        assert!(keys.is_held(Key::Up));
        keys.set(Key::Up, false);
        assert!(!keys.any());
    }
}
