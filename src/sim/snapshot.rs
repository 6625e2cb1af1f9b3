//! Read-only render snapshot
//!
//! Everything a presentation layer needs for one frame, captured by value.

use glam::Vec2;
use serde::Serialize;

use super::difficulty::{DifficultyPhase, MovementPattern, difficulty_phase};
use super::hack::{HackStage, Symbol};
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::within;

/// Console overlay view, present while hacking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HackView {
    pub challenge_id: u64,
    pub stage: HackStage,
    /// Symbols entered so far
    pub progress: usize,
    pub target_len: usize,
    /// Button lit by playback
    pub highlight: Option<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub total_score: u64,

    pub player: Vec2,
    pub bot: Vec2,
    pub door_unlocked: bool,
    /// Player may open the console ("Press E to hack")
    pub console_in_range: bool,

    pub pattern: MovementPattern,
    pub pattern_description: &'static str,
    pub speed_mode: bool,
    pub speed: f32,
    pub detection_radius: f32,
    pub sequence_length: usize,
    pub difficulty: DifficultyPhase,
    /// Vision cone rotation in degrees
    pub heading: f32,

    pub hack: Option<HackView>,

    /// Points the next-level action would award
    pub level_score: u64,
    /// Total after banking `level_score`
    pub projected_total: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let hack = state.challenge.as_ref().map(|c| HackView {
            challenge_id: c.id(),
            stage: c.stage(),
            progress: c.progress().len(),
            target_len: c.target_len(),
            highlight: c.highlight(),
        });
        let level_score = state.level_score();

        Self {
            phase: state.phase,
            level: state.level,
            total_score: state.total_score,
            player: state.player,
            bot: state.bot.pos,
            door_unlocked: state.door_unlocked,
            console_in_range: within(state.player, CONSOLE_POS, CONSOLE_RANGE),
            pattern: state.pattern,
            pattern_description: state.pattern.description(),
            speed_mode: state.pattern.is_speed(),
            speed: state.settings.speed,
            detection_radius: state.settings.detection_radius,
            sequence_length: state.settings.sequence_length,
            difficulty: difficulty_phase(state.level),
            heading: state.bot.heading_degrees(state.pattern),
            hack,
            level_score,
            projected_total: state.total_score + level_score,
        }
    }

    /// Highlighted console button, if any
    pub fn active_symbol(&self) -> Option<Symbol> {
        self.hack.as_ref().and_then(|h| h.highlight)
    }
}
