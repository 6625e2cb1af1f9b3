//! Game state and core simulation types
//!
//! Everything the presentation layer can observe lives here; it is only
//! ever mutated by the tick functions and input handlers in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::detection::DetectionCause;
use super::difficulty::{self, DifficultySettings, MovementPattern};
use super::hack::HackChallenge;
use super::locomotion::HeldKeys;
use super::patrol::PatrolState;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player and bot move, detection armed
    Active,
    /// Spotted or failed a hack; waiting for restart
    Detected,
    /// Hacking console open, world frozen
    Hacking,
    /// Reached the unlocked door; waiting for next level or restart
    LevelComplete,
}

/// Notable transitions, queued for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted {
        level: u32,
        pattern: MovementPattern,
    },
    Detected {
        cause: DetectionCause,
    },
    HackStarted {
        challenge_id: u64,
        length: usize,
    },
    HackSucceeded,
    LevelComplete {
        level: u32,
    },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    pub total_score: u64,
    pub phase: GamePhase,
    /// Pattern and tuning resolved for the current level
    pub pattern: MovementPattern,
    pub settings: DifficultySettings,
    pub player: Vec2,
    pub bot: PatrolState,
    pub held: HeldKeys,
    pub door_unlocked: bool,
    /// Present iff phase is Hacking
    pub challenge: Option<HackChallenge>,
    /// Patrol ticks simulated this level
    pub patrol_ticks: u64,
    /// Locomotion ticks simulated this level
    pub locomotion_ticks: u64,
    /// Times the player was caught this session (survives restarts)
    pub detections: u32,
    events: Vec<GameEvent>,
    next_challenge_id: u64,
}

impl GameState {
    /// Create a new game at level 1 with the given seed
    pub fn new(seed: u64) -> Self {
        let (pattern, settings) = difficulty::resolve(1);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            total_score: 0,
            phase: GamePhase::Active,
            pattern,
            settings,
            player: PLAYER_START,
            bot: PatrolState::new(&settings),
            held: HeldKeys::default(),
            door_unlocked: false,
            challenge: None,
            patrol_ticks: 0,
            locomotion_ticks: 0,
            detections: 0,
            events: Vec::new(),
            next_challenge_id: 1,
        };
        state.start_level(1);
        state
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Allocate a challenge id
    pub fn next_challenge_id(&mut self) -> u64 {
        let id = self.next_challenge_id;
        self.next_challenge_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Reset all per-level state and re-derive difficulty for `level`
    pub fn start_level(&mut self, level: u32) {
        let (pattern, settings) = difficulty::resolve(level);
        self.level = level;
        self.pattern = pattern;
        self.settings = settings;
        self.player = PLAYER_START;
        self.bot = PatrolState::new(&settings);
        self.door_unlocked = false;
        self.challenge = None;
        self.patrol_ticks = 0;
        self.locomotion_ticks = 0;
        self.phase = GamePhase::Active;

        log::info!(
            "Level {}: {} (speed {:.1}, detection {}, sequence {}, patrol area {})",
            level,
            pattern.as_str(),
            settings.speed,
            settings.detection_radius,
            settings.sequence_length,
            settings.patrol_area
        );
        self.push_event(GameEvent::LevelStarted { level, pattern });
    }

    /// Back to level 1 with no score
    pub fn restart(&mut self) {
        self.total_score = 0;
        self.start_level(1);
        self.push_event(GameEvent::Restarted);
    }

    /// Score the next-level action would award right now
    pub fn level_score(&self) -> u64 {
        difficulty::level_score(self.level)
    }
}
