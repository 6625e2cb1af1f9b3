//! Level-indexed difficulty
//!
//! Pure lookup from level number to patrol pattern and tuning values.
//! Levels 1-5 are the learning phase with one new pattern per level; from
//! level 6 on a fixed six-step cycle alternates chaos and speed patterns.

use serde::{Deserialize, Serialize};

/// Security bot movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovementPattern {
    Horizontal,
    Vertical,
    Diagonal,
    Circular,
    Random,
    SpeedHorizontal,
    SpeedVertical,
    SpeedDiagonal,
}

/// Learning phase, one pattern per level
const LEARNING_PATTERNS: [MovementPattern; 5] = [
    MovementPattern::Horizontal,
    MovementPattern::Vertical,
    MovementPattern::Diagonal,
    MovementPattern::Circular,
    MovementPattern::Random,
];

/// Advanced phase cycle, starting at level 6
const ADVANCED_CYCLE: [MovementPattern; 6] = [
    MovementPattern::Random,
    MovementPattern::SpeedHorizontal,
    MovementPattern::Random,
    MovementPattern::SpeedVertical,
    MovementPattern::Random,
    MovementPattern::SpeedDiagonal,
];

/// Last level of the learning phase
pub const LEARNING_LAST_LEVEL: u32 = 5;

/// Speed multiplier for `speed-*` patterns
pub const SPEED_PATTERN_BOOST: f32 = 2.5;
/// Absolute cap on bot speed (units per patrol tick)
pub const MAX_BOT_SPEED: f32 = 12.0;

impl MovementPattern {
    /// Stable identifier, as shown to the player
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementPattern::Horizontal => "horizontal",
            MovementPattern::Vertical => "vertical",
            MovementPattern::Diagonal => "diagonal",
            MovementPattern::Circular => "circular",
            MovementPattern::Random => "random",
            MovementPattern::SpeedHorizontal => "speed-horizontal",
            MovementPattern::SpeedVertical => "speed-vertical",
            MovementPattern::SpeedDiagonal => "speed-diagonal",
        }
    }

    /// HUD description
    pub fn description(&self) -> &'static str {
        match self {
            MovementPattern::Horizontal => "Linear Patrol",
            MovementPattern::Vertical => "Vertical Sweep",
            MovementPattern::Diagonal => "Diagonal Path",
            MovementPattern::Circular => "Orbital Pattern",
            MovementPattern::Random => "Chaos Mode",
            MovementPattern::SpeedHorizontal => "SPEED BLITZ - Horizontal",
            MovementPattern::SpeedVertical => "SPEED BLITZ - Vertical",
            MovementPattern::SpeedDiagonal => "SPEED BLITZ - Diagonal",
        }
    }

    /// True for the high-speed linear variants
    pub fn is_speed(&self) -> bool {
        self.as_str().starts_with("speed-")
    }
}

/// Per-level tuning, derived once when the level starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Bot displacement per patrol tick
    pub speed: f32,
    /// Proximity below which the player is spotted
    pub detection_radius: f32,
    /// Hacking sequence length
    pub sequence_length: usize,
    /// Patrol extent; the orbital pattern uses half of it as radius
    pub patrol_area: f32,
}

/// Pattern for a level (levels start at 1)
pub fn pattern_for_level(level: u32) -> MovementPattern {
    let level = level.max(1);
    if level <= LEARNING_LAST_LEVEL {
        learning_pattern(level)
    } else {
        advanced_pattern(level)
    }
}

fn learning_pattern(level: u32) -> MovementPattern {
    LEARNING_PATTERNS[(level - 1) as usize]
}

fn advanced_pattern(level: u32) -> MovementPattern {
    let cycle_position = (level - (LEARNING_LAST_LEVEL + 1)) % ADVANCED_CYCLE.len() as u32;
    ADVANCED_CYCLE[cycle_position as usize]
}

/// Base speed before the speed-pattern boost
fn base_speed(level: u32) -> f32 {
    if level <= LEARNING_LAST_LEVEL {
        (2.0 + (level - 1) as f32 * 0.5).min(4.0)
    } else {
        2.0 + ((level - 1) / 2) as f32 * 0.8
    }
}

/// Resolve pattern and settings for a level
pub fn resolve(level: u32) -> (MovementPattern, DifficultySettings) {
    let level = level.max(1);
    let pattern = pattern_for_level(level);

    let mut speed = base_speed(level);
    if pattern.is_speed() {
        speed *= SPEED_PATTERN_BOOST;
    }

    let settings = DifficultySettings {
        speed: speed.min(MAX_BOT_SPEED),
        detection_radius: 80u32.saturating_sub((level - 1) / 2 * 5).max(50) as f32,
        sequence_length: (3 + level / 2).min(10) as usize,
        patrol_area: (150 + (level - 1) * 15).min(280) as f32,
    };

    (pattern, settings)
}

/// Points awarded for clearing `level`
pub fn level_score(level: u32) -> u64 {
    let base = 1000u64.saturating_sub(level as u64 * 50).max(300);
    let bonus = if level > LEARNING_LAST_LEVEL { 200 } else { 0 };
    base + bonus
}

/// Progression label for the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyPhase {
    /// "Learning Phase" or "Advanced Phase"
    pub label: &'static str,
    /// Advanced cycle number (1-based), absent while learning
    pub cycle: Option<u32>,
    /// "Multi-Dir" or "Speed" in the advanced phase
    pub focus: Option<&'static str>,
}

pub fn difficulty_phase(level: u32) -> DifficultyPhase {
    let level = level.max(1);
    if level <= LEARNING_LAST_LEVEL {
        return DifficultyPhase {
            label: "Learning Phase",
            cycle: None,
            focus: None,
        };
    }

    let offset = level - (LEARNING_LAST_LEVEL + 1);
    DifficultyPhase {
        label: "Advanced Phase",
        cycle: Some(offset / ADVANCED_CYCLE.len() as u32 + 1),
        focus: Some(if offset % 2 == 0 { "Multi-Dir" } else { "Speed" }),
    }
}
