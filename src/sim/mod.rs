//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timesteps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod detection;
pub mod difficulty;
pub mod hack;
pub mod locomotion;
pub mod patrol;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use clock::{FixedTimer, SimClock, TimerKind};
pub use detection::{DetectionCause, is_detected};
pub use difficulty::{DifficultyPhase, DifficultySettings, MovementPattern, level_score, resolve};
pub use hack::{HackChallenge, HackStage, PressOutcome, Symbol};
pub use locomotion::{HeldKeys, Key, step_player};
pub use patrol::{OrbitPath, PatrolState};
pub use snapshot::{HackView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{
    InputEvent, advance, evaluate, handle_input, interact, locomotion_tick, next_level,
    patrol_tick, press_symbol, restart,
};
