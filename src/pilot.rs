//! Demo autopilot
//!
//! Plays the game the way a presentation layer would: it only reads
//! [`Snapshot`]s and answers with [`InputEvent`]s. Walks to the console,
//! memorizes the playback, repeats it, then heads for the door, backing
//! off whenever the bot gets close.

use crate::consts::*;
use crate::sim::{GamePhase, HackStage, HeldKeys, InputEvent, Key, Snapshot, Symbol};

/// Axis offsets smaller than this are treated as aligned
const DEADZONE: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Pilot {
    /// Clearance kept beyond the detection radius
    margin: f32,
    held: HeldKeys,
    /// Challenge the recording belongs to
    challenge_id: Option<u64>,
    recorded: Vec<Symbol>,
    last_highlight: Option<Symbol>,
}

impl Pilot {
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            held: HeldKeys::default(),
            challenge_id: None,
            recorded: Vec::new(),
            last_highlight: None,
        }
    }

    /// Decide this frame's inputs
    pub fn drive(&mut self, snap: &Snapshot) -> Vec<InputEvent> {
        let mut out = Vec::new();
        match snap.phase {
            GamePhase::Detected => {
                self.release_all(&mut out);
                out.push(InputEvent::Restart);
            }
            GamePhase::LevelComplete => {
                self.release_all(&mut out);
                out.push(InputEvent::NextLevel);
            }
            GamePhase::Hacking => {
                self.release_all(&mut out);
                self.hack(snap, &mut out);
            }
            GamePhase::Active => self.walk(snap, &mut out),
        }
        out
    }

    fn walk(&mut self, snap: &Snapshot, out: &mut Vec<InputEvent>) {
        if !snap.door_unlocked && snap.console_in_range {
            self.release_all(out);
            out.push(InputEvent::KeyUp(Key::Interact));
            return;
        }

        let goal = if snap.door_unlocked { DOOR_POS } else { CONSOLE_POS };
        let threat = snap.player.distance(snap.bot);
        let desired = if threat < snap.detection_radius + self.margin {
            snap.player - snap.bot
        } else {
            goal - snap.player
        };

        let mut wanted = HeldKeys::default();
        if desired.x > DEADZONE {
            wanted.right = true;
        } else if desired.x < -DEADZONE {
            wanted.left = true;
        }
        if desired.y > DEADZONE {
            wanted.down = true;
        } else if desired.y < -DEADZONE {
            wanted.up = true;
        }
        self.apply(wanted, out);
    }

    fn hack(&mut self, snap: &Snapshot, out: &mut Vec<InputEvent>) {
        let Some(view) = snap.hack.as_ref() else {
            return;
        };

        if self.challenge_id != Some(view.challenge_id) {
            self.challenge_id = Some(view.challenge_id);
            self.recorded.clear();
            self.last_highlight = None;
        }

        match view.stage {
            HackStage::Playback => {
                if let Some(symbol) = view.highlight {
                    if self.last_highlight.is_none() {
                        self.recorded.push(symbol);
                    }
                }
                self.last_highlight = view.highlight;
            }
            HackStage::AwaitingInput => {
                // Fall back to a guess if a highlight was missed
                let symbol = self
                    .recorded
                    .get(view.progress)
                    .copied()
                    .unwrap_or(Symbol::Red);
                out.push(InputEvent::PressSymbol(symbol.index()));
            }
            HackStage::Solved | HackStage::Failed => {}
        }
    }

    /// Emit key transitions from the current held set to `wanted`
    fn apply(&mut self, wanted: HeldKeys, out: &mut Vec<InputEvent>) {
        for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
            match (self.held.is_held(key), wanted.is_held(key)) {
                (false, true) => out.push(InputEvent::KeyDown(key)),
                (true, false) => out.push(InputEvent::KeyUp(key)),
                _ => {}
            }
        }
        self.held = wanted;
    }

    fn release_all(&mut self, out: &mut Vec<InputEvent>) {
        self.apply(HeldKeys::default(), out);
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new(40.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, GameState, SimClock, advance, handle_input};
    use glam::Vec2;

    fn frame(state: &mut GameState, clock: &mut SimClock, pilot: &mut Pilot) {
        let snap = Snapshot::capture(state);
        for input in pilot.drive(&snap) {
            handle_input(state, input);
        }
        advance(state, clock, 0.016);
    }

    #[test]
    fn test_restarts_after_detection() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Detected;
        let mut pilot = Pilot::default();
        let inputs = pilot.drive(&Snapshot::capture(&state));
        assert_eq!(inputs, vec![InputEvent::Restart]);
    }

    #[test]
    fn test_heads_for_console() {
        let state = GameState::new(1);
        let mut pilot = Pilot::new(0.0);
        let inputs = pilot.drive(&Snapshot::capture(&state));
        assert!(inputs.contains(&InputEvent::KeyDown(Key::Right)));
        assert!(inputs.contains(&InputEvent::KeyDown(Key::Down)));

        // Same situation next frame: nothing new to press
        assert!(pilot.drive(&Snapshot::capture(&state)).is_empty());
    }

    #[test]
    fn test_backs_away_from_bot() {
        let mut state = GameState::new(1);
        state.player = Vec2::new(200.0, 200.0);
        state.bot.pos = Vec2::new(300.0, 200.0);
        let mut pilot = Pilot::new(40.0);
        let inputs = pilot.drive(&Snapshot::capture(&state));
        assert!(inputs.contains(&InputEvent::KeyDown(Key::Left)));
        assert!(!inputs.contains(&InputEvent::KeyDown(Key::Right)));
    }

    #[test]
    fn test_memorizes_and_solves_hack() {
        let mut state = GameState::new(11);
        state.player = CONSOLE_POS + Vec2::new(0.0, 20.0);
        state.bot.pos = Vec2::new(210.0, 160.0);
        let mut clock = SimClock::new();
        let mut pilot = Pilot::default();

        for _ in 0..600 {
            frame(&mut state, &mut clock, &mut pilot);
            if state.door_unlocked {
                break;
            }
        }

        assert!(state.door_unlocked);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::HackStarted { .. })));
        assert!(events.contains(&GameEvent::HackSucceeded));
    }
}
