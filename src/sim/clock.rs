//! Fixed-rate simulation timers
//!
//! The bot and the player run on independent fixed periods. Wall-clock frame
//! deltas are fed into both accumulators and due periods are handed out in
//! the order they fell due.

use crate::consts::*;

/// Which timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Patrol,
    Locomotion,
}

/// Accumulator for one fixed period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimer {
    period: f32,
    accumulator: f32,
}

impl FixedTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
        }
    }

    pub fn feed(&mut self, dt: f32) {
        self.accumulator += dt;
    }

    pub fn is_due(&self) -> bool {
        self.accumulator >= self.period
    }

    /// How long ago the earliest pending period fell due
    fn overdue(&self) -> f32 {
        self.accumulator - self.period
    }

    fn consume(&mut self) {
        self.accumulator -= self.period;
    }

    /// Drop whole periods still pending, keep the fractional remainder
    fn discard_backlog(&mut self) {
        self.accumulator %= self.period;
    }
}

/// Patrol (20 Hz) and locomotion (60 Hz) timers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    pub patrol: FixedTimer,
    pub locomotion: FixedTimer,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            patrol: FixedTimer::new(PATROL_DT),
            locomotion: FixedTimer::new(LOCOMOTION_DT),
        }
    }

    /// Feed a frame delta (seconds) into both timers
    pub fn feed(&mut self, dt: f32) {
        self.patrol.feed(dt);
        self.locomotion.feed(dt);
    }

    /// Pop the most overdue period, patrol first on ties
    pub fn next_due(&mut self) -> Option<TimerKind> {
        let kind = match (self.patrol.is_due(), self.locomotion.is_due()) {
            (false, false) => return None,
            (true, false) => TimerKind::Patrol,
            (false, true) => TimerKind::Locomotion,
            (true, true) => {
                if self.patrol.overdue() >= self.locomotion.overdue() {
                    TimerKind::Patrol
                } else {
                    TimerKind::Locomotion
                }
            }
        };

        match kind {
            TimerKind::Patrol => self.patrol.consume(),
            TimerKind::Locomotion => self.locomotion.consume(),
        }
        Some(kind)
    }

    pub fn discard_backlog(&mut self) {
        self.patrol.discard_backlog();
        self.locomotion.discard_backlog();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut SimClock) -> Vec<TimerKind> {
        std::iter::from_fn(|| clock.next_due()).collect()
    }

    #[test]
    fn test_nothing_due_before_period() {
        let mut clock = SimClock::new();
        clock.feed(0.01);
        assert_eq!(clock.next_due(), None);
    }

    #[test]
    fn test_rates_over_one_second() {
        let mut clock = SimClock::new();
        let mut fired = Vec::new();
        // 100 frames of 10 ms
        for _ in 0..100 {
            clock.feed(0.01);
            fired.extend(drain(&mut clock));
        }
        let patrol = fired.iter().filter(|k| **k == TimerKind::Patrol).count();
        let locomotion = fired.len() - patrol;
        assert!((19..=20).contains(&patrol), "patrol fired {}", patrol);
        assert!((59..=60).contains(&locomotion), "locomotion fired {}", locomotion);
    }

    #[test]
    fn test_interleaves_by_due_time() {
        let mut clock = SimClock::new();
        clock.feed(PATROL_DT);
        let order = drain(&mut clock);
        // Locomotion at 16.7 and 33.3 ms falls due before patrol at 50 ms
        assert_eq!(order[..2], [TimerKind::Locomotion, TimerKind::Locomotion]);
        assert_eq!(order.iter().filter(|k| **k == TimerKind::Patrol).count(), 1);
        assert!((2..=3).contains(&order.iter().filter(|k| **k == TimerKind::Locomotion).count()));
    }

    #[test]
    fn test_discard_backlog() {
        let mut clock = SimClock::new();
        clock.feed(1.0);
        clock.discard_backlog();
        assert!(!clock.patrol.is_due());
        assert!(!clock.locomotion.is_due());
    }
}
