//! Cyber Heist - a single-room stealth heist
//!
//! Core modules:
//! - `sim`: Deterministic simulation (patrol, detection, hacking, game phase)
//! - `settings`: Player configuration (seed, key bindings, demo tuning)
//! - `pilot`: Demo autopilot driven purely by render snapshots

pub mod pilot;
pub mod settings;
pub mod sim;

pub use pilot::Pilot;
pub use settings::{KeyBindings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Room is square, origin top-left
    pub const ROOM_SIZE: f32 = 600.0;
    /// Player keeps this distance from every room edge
    pub const ROOM_MARGIN: f32 = 20.0;

    /// Security bot patrol tick (20 Hz)
    pub const PATROL_DT: f32 = 0.05;
    /// Player locomotion tick (60 Hz)
    pub const LOCOMOTION_DT: f32 = 1.0 / 60.0;
    /// Maximum timer periods fired per clock advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 16;
    /// Largest wall-clock delta accepted by one clock advance (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player displacement per held key per locomotion tick
    pub const PLAYER_STEP: f32 = 3.0;
    pub const PLAYER_START: Vec2 = Vec2::new(100.0, 100.0);
    pub const BOT_START: Vec2 = Vec2::new(300.0, 200.0);

    /// Bounded patrol box for linear, diagonal and chaos patterns
    pub const PATROL_MIN: Vec2 = Vec2::new(200.0, 150.0);
    pub const PATROL_MAX: Vec2 = Vec2::new(500.0, 450.0);
    /// Fixed center of the orbital pattern
    pub const ORBIT_CENTER: Vec2 = Vec2::new(350.0, 300.0);

    pub const CONSOLE_POS: Vec2 = Vec2::new(400.0, 300.0);
    pub const CONSOLE_RANGE: f32 = 60.0;
    pub const DOOR_POS: Vec2 = Vec2::new(550.0, 250.0);
    pub const DOOR_RANGE: f32 = 50.0;
}

/// True if `a` and `b` are strictly closer than `range`
#[inline]
pub fn within(a: Vec2, b: Vec2, range: f32) -> bool {
    a.distance(b) < range
}
