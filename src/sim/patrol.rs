//! Security bot patrol
//!
//! One call to [`PatrolState::advance`] moves the bot by one patrol tick.
//! The new position is computed entirely from the previous tick's state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::difficulty::{DifficultySettings, MovementPattern};
use crate::consts::*;

/// Chance per tick that the chaos pattern picks a new heading
pub const RANDOM_TURN_CHANCE: f64 = 0.08;
/// Per-axis scale of the diagonal step
pub const DIAGONAL_FACTOR: f32 = 0.7;
/// Orbital phase advance per tick, per unit of speed
pub const ORBIT_RATE: f32 = 0.02;

/// Circle followed by the orbital pattern, fixed for the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPath {
    pub center: Vec2,
    pub radius: f32,
}

impl OrbitPath {
    pub fn for_settings(settings: &DifficultySettings) -> Self {
        Self {
            center: ORBIT_CENTER,
            radius: settings.patrol_area / 2.0,
        }
    }
}

/// Transient bot motion state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolState {
    pub pos: Vec2,
    /// Direction sign, always +1 or -1
    pub direction: f32,
    /// Angular phase in radians (orbital and chaos patterns)
    pub angle: f32,
    pub orbit: OrbitPath,
}

impl PatrolState {
    /// Bot at its spawn point, heading positive, zero phase
    pub fn new(settings: &DifficultySettings) -> Self {
        Self {
            pos: BOT_START,
            direction: 1.0,
            angle: 0.0,
            orbit: OrbitPath::for_settings(settings),
        }
    }

    /// Advance one patrol tick
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        pattern: MovementPattern,
        settings: &DifficultySettings,
        rng: &mut R,
    ) {
        let speed = settings.speed;
        match pattern {
            MovementPattern::Horizontal | MovementPattern::SpeedHorizontal => {
                self.bounce_step(Vec2::new(speed, 0.0));
            }
            MovementPattern::Vertical | MovementPattern::SpeedVertical => {
                self.bounce_step(Vec2::new(0.0, speed));
            }
            MovementPattern::Diagonal | MovementPattern::SpeedDiagonal => {
                let step = speed * DIAGONAL_FACTOR;
                self.bounce_step(Vec2::new(step, step));
            }
            MovementPattern::Circular => {
                self.angle += speed * ORBIT_RATE;
                self.pos = self.orbit.center
                    + Vec2::new(self.angle.cos(), self.angle.sin()) * self.orbit.radius;
            }
            MovementPattern::Random => self.wander(speed, rng),
        }
    }

    /// Facing in degrees, for the vision cone
    pub fn heading_degrees(&self, pattern: MovementPattern) -> f32 {
        let forward = self.direction > 0.0;
        match pattern {
            MovementPattern::Horizontal | MovementPattern::SpeedHorizontal => {
                if forward { 0.0 } else { 180.0 }
            }
            MovementPattern::Vertical | MovementPattern::SpeedVertical => {
                if forward { 90.0 } else { 270.0 }
            }
            MovementPattern::Diagonal | MovementPattern::SpeedDiagonal => {
                if forward { 45.0 } else { 225.0 }
            }
            // Tangent to the orbit
            MovementPattern::Circular => self.angle.to_degrees() + 90.0,
            MovementPattern::Random => self.angle.to_degrees(),
        }
    }

    /// Linear move along `step * direction`; on touching or crossing the box,
    /// flip direction and step back from the previous position instead.
    fn bounce_step(&mut self, step: Vec2) {
        let next = self.pos + step * self.direction;
        if !breaches_patrol_box(next, step) {
            self.pos = next;
            return;
        }

        self.direction = -self.direction;
        self.pos += step * self.direction;
        log::debug!(
            "Patrol bounce at ({:.1}, {:.1}), direction {}",
            self.pos.x,
            self.pos.y,
            self.direction
        );
    }

    /// Chaos pattern: drift along the current heading, clamped (not reflected)
    /// to the patrol box. The heading picked this tick applies from the next.
    fn wander<R: Rng + ?Sized>(&mut self, speed: f32, rng: &mut R) {
        let heading = self.angle;

        if rng.random_bool(RANDOM_TURN_CHANCE) {
            self.direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.angle = rng.random_range(0.0..TAU);
            log::debug!("Chaos pattern turned to {:.2} rad", self.angle);
        }

        let drift = Vec2::new(heading.cos(), heading.sin()) * speed;
        self.pos = (self.pos + drift).clamp(PATROL_MIN, PATROL_MAX);
    }
}

/// Touching or crossing a bound on any axis the step moves along
fn breaches_patrol_box(pos: Vec2, step: Vec2) -> bool {
    let x_out = pos.x <= PATROL_MIN.x || pos.x >= PATROL_MAX.x;
    let y_out = pos.y <= PATROL_MIN.y || pos.y >= PATROL_MAX.y;
    (step.x != 0.0 && x_out) || (step.y != 0.0 && y_out)
}
