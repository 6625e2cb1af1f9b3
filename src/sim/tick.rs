//! Fixed timestep simulation tick and input handling
//!
//! The phase controller lives here: tick functions advance the bot and the
//! player while the game is Active, `evaluate` applies at most one
//! proximity-driven transition afterwards, and `handle_input` applies the
//! event-driven transitions (interact, hack input, next level, restart).

use serde::{Deserialize, Serialize};

use super::clock::{SimClock, TimerKind};
use super::detection::{DetectionCause, is_detected};
use super::hack::{HackChallenge, PressOutcome, Symbol};
use super::locomotion::{Key, step_player};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::within;

/// Discrete input forwarded by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    /// Interact and restart fire on release
    KeyUp(Key),
    /// Console button by id (0-2); other ids are ignored
    PressSymbol(usize),
    /// Restart button
    Restart,
    /// Next-level button on the level-complete overlay
    NextLevel,
}

/// Advance the bot by one patrol tick
pub fn patrol_tick(state: &mut GameState) {
    if state.phase != GamePhase::Active {
        return;
    }

    // Work on a copy so the whole step reads last tick's state
    let mut bot = state.bot;
    let (pattern, settings) = (state.pattern, state.settings);
    bot.advance(pattern, &settings, state.rng());
    state.bot = bot;
    state.patrol_ticks += 1;
}

/// Advance the player by one locomotion tick
pub fn locomotion_tick(state: &mut GameState) {
    if state.phase != GamePhase::Active {
        return;
    }

    state.player = step_player(state.player, &state.held);
    state.locomotion_ticks += 1;
}

/// Proximity checks after movement: detection first, then the exit door.
/// Applies at most one transition.
pub fn evaluate(state: &mut GameState) {
    if state.phase != GamePhase::Active {
        return;
    }

    if is_detected(state.player, state.bot.pos, state.settings.detection_radius) {
        log::info!(
            "Detected on level {} at ({:.0}, {:.0})",
            state.level,
            state.player.x,
            state.player.y
        );
        enter_detected(state, DetectionCause::Spotted);
        return;
    }

    if state.door_unlocked && within(state.player, DOOR_POS, DOOR_RANGE) {
        log::info!("Level {} complete", state.level);
        state.phase = GamePhase::LevelComplete;
        state.push_event(GameEvent::LevelComplete { level: state.level });
    }
}

/// Advance the simulation by a wall-clock delta (seconds).
///
/// Returns the number of timer periods that fired.
pub fn advance(state: &mut GameState, clock: &mut SimClock, dt: f32) -> u32 {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    if let Some(challenge) = state.challenge.as_mut() {
        challenge.advance(dt * 1000.0);
    }

    clock.feed(dt);
    let mut fired = 0;
    while fired < MAX_SUBSTEPS {
        match clock.next_due() {
            Some(TimerKind::Patrol) => patrol_tick(state),
            Some(TimerKind::Locomotion) => locomotion_tick(state),
            None => break,
        }
        evaluate(state);
        fired += 1;
    }

    if fired == MAX_SUBSTEPS {
        clock.discard_backlog();
    }
    fired
}

/// Apply one input event
pub fn handle_input(state: &mut GameState, input: InputEvent) {
    match input {
        InputEvent::KeyDown(key) => {
            if key.direction().is_some() && state.phase == GamePhase::Active {
                state.held.set(key, true);
            }
        }
        InputEvent::KeyUp(key) => match key {
            Key::Interact => {
                interact(state);
            }
            Key::Restart => restart(state),
            _ => state.held.set(key, false),
        },
        InputEvent::PressSymbol(index) => match Symbol::from_index(index) {
            Some(symbol) => press_symbol(state, symbol),
            None => log::debug!("Ignoring unknown console button {}", index),
        },
        InputEvent::Restart => restart(state),
        InputEvent::NextLevel => {
            next_level(state);
        }
    }
}

/// Open the console if the player is standing at it.
///
/// Returns true if a hacking challenge started.
pub fn interact(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Active {
        log::debug!("Interact ignored in {:?}", state.phase);
        return false;
    }
    if !within(state.player, CONSOLE_POS, CONSOLE_RANGE) {
        return false;
    }

    let id = state.next_challenge_id();
    let length = state.settings.sequence_length;
    let challenge = HackChallenge::generate(id, length, state.rng());
    log::info!("Hack {} started, sequence length {}", id, length);

    state.challenge = Some(challenge);
    state.phase = GamePhase::Hacking;
    state.push_event(GameEvent::HackStarted {
        challenge_id: id,
        length,
    });
    true
}

/// Enter a console symbol. Silently ignored outside the input window.
pub fn press_symbol(state: &mut GameState, symbol: Symbol) {
    if state.phase != GamePhase::Hacking {
        return;
    }
    let Some(challenge) = state.challenge.as_mut() else {
        return;
    };

    match challenge.press(symbol) {
        PressOutcome::Ignored | PressOutcome::Progress => {}
        PressOutcome::Failed => {
            log::info!("Hack {} failed", challenge.id());
            state.challenge = None;
            enter_detected(state, DetectionCause::HackFailed);
        }
        PressOutcome::Solved => {
            log::info!("Hack {} solved, door unlocked", challenge.id());
            state.challenge = None;
            state.door_unlocked = true;
            state.phase = GamePhase::Active;
            state.push_event(GameEvent::HackSucceeded);
        }
    }
}

/// Bank the level score and move on. Only valid from LevelComplete.
///
/// Returns true if the level advanced.
pub fn next_level(state: &mut GameState) -> bool {
    if state.phase != GamePhase::LevelComplete {
        log::debug!("Next level ignored in {:?}", state.phase);
        return false;
    }

    let score = state.level_score();
    state.total_score += score;
    log::info!(
        "Level {} banked {} points (total {})",
        state.level,
        score,
        state.total_score
    );
    let level = state.level + 1;
    state.start_level(level);
    true
}

/// Full reset to level 1, from any phase
pub fn restart(state: &mut GameState) {
    log::info!("Restarting from level {} ({:?})", state.level, state.phase);
    state.restart();
}

fn enter_detected(state: &mut GameState, cause: DetectionCause) {
    state.phase = GamePhase::Detected;
    state.detections += 1;
    state.push_event(GameEvent::Detected { cause });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::MovementPattern;
    use crate::sim::hack::HackStage;
    use glam::Vec2;

    /// Game with the player parked at the console and the bot far away
    fn at_console(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.player = CONSOLE_POS + Vec2::new(0.0, 30.0);
        state.bot.pos = Vec2::new(210.0, 160.0);
        state
    }

    fn finish_playback(state: &mut GameState, clock: &mut SimClock) {
        while state
            .challenge
            .as_ref()
            .is_some_and(|c| c.stage() == HackStage::Playback)
        {
            advance(state, clock, 0.05);
        }
    }

    fn solve(state: &mut GameState) {
        let target = state.challenge.as_ref().unwrap().target().to_vec();
        for symbol in target {
            handle_input(state, InputEvent::PressSymbol(symbol.index()));
        }
    }

    #[test]
    fn test_patrol_frozen_outside_active() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Detected;
        let before = state.bot;
        patrol_tick(&mut state);
        locomotion_tick(&mut state);
        assert_eq!(state.bot, before);
        assert_eq!(state.patrol_ticks, 0);
        assert_eq!(state.locomotion_ticks, 0);
    }

    #[test]
    fn test_walk_into_patrol_is_detected() {
        let mut state = GameState::new(1);
        let mut clock = SimClock::new();
        assert_eq!(state.pattern, MovementPattern::Horizontal);

        // Step into the bot's lane and walk toward it
        state.player = Vec2::new(100.0, 200.0);
        handle_input(&mut state, InputEvent::KeyDown(Key::Right));
        for _ in 0..600 {
            advance(&mut state, &mut clock, 1.0 / 60.0);
            if state.phase != GamePhase::Active {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::Detected);
        assert!(state.player.distance(state.bot.pos) < state.settings.detection_radius);
        assert_eq!(state.detections, 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Detected { cause: DetectionCause::Spotted })
        );
    }

    #[test]
    fn test_detection_boundary() {
        let mut state = GameState::new(1);
        state.bot.pos = Vec2::new(300.0, 200.0);
        state.player = Vec2::new(380.0, 200.0);
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Active);

        state.player = Vec2::new(379.99, 200.0);
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Detected);
    }

    #[test]
    fn test_key_down_ignored_outside_active() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Detected;
        handle_input(&mut state, InputEvent::KeyDown(Key::Left));
        assert!(!state.held.any());
    }

    #[test]
    fn test_interact_out_of_range() {
        let mut state = GameState::new(1);
        handle_input(&mut state, InputEvent::KeyUp(Key::Interact));
        assert_eq!(state.phase, GamePhase::Active);
        assert!(state.challenge.is_none());
    }

    #[test]
    fn test_hack_then_exit() {
        let mut state = at_console(7);
        let mut clock = SimClock::new();

        handle_input(&mut state, InputEvent::KeyUp(Key::Interact));
        assert_eq!(state.phase, GamePhase::Hacking);
        assert_eq!(state.challenge.as_ref().unwrap().target_len(), 3);

        // World is frozen while hacking
        let bot_before = state.bot.pos;
        finish_playback(&mut state, &mut clock);
        assert_eq!(state.bot.pos, bot_before);

        solve(&mut state);
        assert!(state.door_unlocked);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(state.challenge.is_none());

        state.player = DOOR_POS + Vec2::new(-49.0, 0.0);
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_detection_wins_over_door() {
        let mut state = GameState::new(1);
        state.drain_events();
        state.door_unlocked = true;
        state.player = DOOR_POS;
        state.bot.pos = DOOR_POS + Vec2::new(-10.0, 0.0);

        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Detected);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Detected { cause: DetectionCause::Spotted }]
        );

        // Already resolved; a second pass changes nothing
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Detected);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_door_locked_without_hack() {
        let mut state = GameState::new(1);
        state.player = DOOR_POS;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_wrong_symbol_is_detection() {
        let mut state = at_console(7);
        let mut clock = SimClock::new();
        interact(&mut state);
        finish_playback(&mut state, &mut clock);

        let first = state.challenge.as_ref().unwrap().target()[0];
        let wrong = Symbol::ALL[(first.index() + 1) % 3];
        handle_input(&mut state, InputEvent::PressSymbol(wrong.index()));

        assert_eq!(state.phase, GamePhase::Detected);
        assert!(state.challenge.is_none());
        assert!(!state.door_unlocked);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Detected { cause: DetectionCause::HackFailed })
        );
    }

    #[test]
    fn test_symbols_ignored_during_playback() {
        let mut state = at_console(7);
        interact(&mut state);
        let target = state.challenge.as_ref().unwrap().target().to_vec();
        for symbol in target {
            handle_input(&mut state, InputEvent::PressSymbol(symbol.index()));
        }
        assert_eq!(state.phase, GamePhase::Hacking);
        assert!(state.challenge.as_ref().unwrap().progress().is_empty());

        handle_input(&mut state, InputEvent::PressSymbol(9));
        assert_eq!(state.phase, GamePhase::Hacking);
    }

    #[test]
    fn test_restart_mid_playback_drops_challenge() {
        let mut state = at_console(7);
        let mut clock = SimClock::new();
        interact(&mut state);
        let first_id = state.challenge.as_ref().unwrap().id();
        advance(&mut state, &mut clock, 0.05);

        handle_input(&mut state, InputEvent::KeyUp(Key::Restart));
        assert_eq!(state.phase, GamePhase::Active);
        assert!(state.challenge.is_none());

        // New attempt starts from a clean timeline
        state.player = CONSOLE_POS;
        state.bot.pos = Vec2::new(210.0, 160.0);
        interact(&mut state);
        let challenge = state.challenge.as_ref().unwrap();
        assert_ne!(challenge.id(), first_id);
        assert_eq!(challenge.highlight(), Some(challenge.target()[0]));
        assert!(challenge.progress().is_empty());
    }

    #[test]
    fn test_next_level_scoring() {
        let mut state = GameState::new(1);
        assert!(!next_level(&mut state));

        state.phase = GamePhase::LevelComplete;
        assert!(next_level(&mut state));
        assert_eq!(state.total_score, 950);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.pattern, MovementPattern::Vertical);

        // Double click on the overlay only counts once
        handle_input(&mut state, InputEvent::NextLevel);
        assert_eq!(state.level, 2);

        state.start_level(6);
        state.total_score = 0;
        state.phase = GamePhase::LevelComplete;
        handle_input(&mut state, InputEvent::NextLevel);
        assert_eq!(state.total_score, 900);
        assert_eq!(state.level, 7);
    }

    #[test]
    fn test_restart_from_every_phase() {
        for phase in [
            GamePhase::Active,
            GamePhase::Detected,
            GamePhase::Hacking,
            GamePhase::LevelComplete,
        ] {
            let mut state = GameState::new(3);
            state.start_level(8);
            state.total_score = 4200;
            state.player = Vec2::new(450.0, 450.0);
            state.bot.pos = Vec2::new(222.0, 333.0);
            state.door_unlocked = true;
            state.phase = phase;

            handle_input(&mut state, InputEvent::Restart);
            handle_input(&mut state, InputEvent::Restart);

            assert_eq!(state.level, 1);
            assert_eq!(state.total_score, 0);
            assert_eq!(state.player, Vec2::new(100.0, 100.0));
            assert_eq!(state.bot.pos, Vec2::new(300.0, 200.0));
            assert!(!state.door_unlocked);
            assert_eq!(state.phase, GamePhase::Active);
        }
    }

    #[test]
    fn test_advance_clamps_large_delta() {
        let mut state = GameState::new(1);
        let mut clock = SimClock::new();
        let fired = advance(&mut state, &mut clock, 5.0);
        assert!(fired <= MAX_SUBSTEPS);
        // 100 ms of patrol at 20 Hz
        assert!(state.patrol_ticks <= 2);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        a.start_level(5);
        b.start_level(5);
        let mut clock_a = SimClock::new();
        let mut clock_b = SimClock::new();
        for _ in 0..300 {
            advance(&mut a, &mut clock_a, 0.016);
            advance(&mut b, &mut clock_b, 0.016);
        }
        assert_eq!(a.bot, b.bot);
        assert_eq!(a.phase, b.phase);
    }
}
