//! Proximity detection
//!
//! The bot spots the player when they are strictly closer than the
//! detection radius. Exactly at the radius the player is still hidden.

use glam::Vec2;

use crate::within;

/// Why a run ended in the Detected phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DetectionCause {
    /// Player walked into the bot's detection radius
    Spotted,
    /// Wrong symbol entered at the hacking console
    HackFailed,
}

/// Check player proximity against the bot
#[inline]
pub fn is_detected(player: Vec2, bot: Vec2, detection_radius: f32) -> bool {
    within(player, bot, detection_radius)
}
