//! Console hacking challenge
//!
//! Memorize-and-repeat: a random symbol sequence is played back on a fixed
//! schedule, then the player must enter it exactly. One wrong symbol fails
//! the attempt outright.
//!
//! Playback is a precomputed list of cues on a single timeline owned by the
//! challenge. Dropping the challenge drops its pending cues with it, so an
//! abandoned attempt can never light up a button in a later one.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Time between the starts of consecutive highlighted symbols
pub const PLAYBACK_INTERVAL_MS: f32 = 600.0;
/// How long each symbol stays highlighted
pub const HIGHLIGHT_MS: f32 = 400.0;

/// One of the three console buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Red,
    Blue,
    Green,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Red, Symbol::Blue, Symbol::Green];

    /// Map a button id (0-2) to a symbol
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Symbol::Red => 0,
            Symbol::Blue => 1,
            Symbol::Green => 2,
        }
    }
}

/// Challenge lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HackStage {
    /// Sequence is being shown, input ignored
    Playback,
    /// Waiting for the player to repeat the sequence
    AwaitingInput,
    /// Full sequence entered correctly
    Solved,
    /// A wrong symbol was entered
    Failed,
}

/// Result of a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Not accepting input right now
    Ignored,
    /// Correct symbol, more to go
    Progress,
    /// Correct symbol completing the sequence
    Solved,
    /// Wrong symbol
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Highlight(Symbol),
    Clear,
    OpenInput,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledCue {
    at_ms: f32,
    cue: Cue,
}

/// Ordered playback schedule with its own clock
#[derive(Debug, Clone, PartialEq)]
struct PlaybackTimeline {
    elapsed_ms: f32,
    cues: VecDeque<ScheduledCue>,
}

impl PlaybackTimeline {
    fn for_sequence(sequence: &[Symbol]) -> Self {
        let mut cues = VecDeque::with_capacity(sequence.len() * 2 + 1);
        for (i, &symbol) in sequence.iter().enumerate() {
            let start = i as f32 * PLAYBACK_INTERVAL_MS;
            cues.push_back(ScheduledCue {
                at_ms: start,
                cue: Cue::Highlight(symbol),
            });
            cues.push_back(ScheduledCue {
                at_ms: start + HIGHLIGHT_MS,
                cue: Cue::Clear,
            });
        }
        // Input opens as the last highlight goes out
        let open_at = cues.back().map_or(0.0, |c| c.at_ms);
        cues.push_back(ScheduledCue {
            at_ms: open_at,
            cue: Cue::OpenInput,
        });
        Self {
            elapsed_ms: 0.0,
            cues,
        }
    }

    /// Advance the clock and pop every cue that is now due
    fn advance(&mut self, dt_ms: f32) -> Vec<Cue> {
        self.elapsed_ms += dt_ms;
        let mut due = Vec::new();
        while let Some(next) = self.cues.front() {
            if next.at_ms > self.elapsed_ms {
                break;
            }
            due.push(next.cue);
            self.cues.pop_front();
        }
        due
    }

    fn total_ms(&self) -> f32 {
        self.cues.back().map_or(self.elapsed_ms, |c| c.at_ms)
    }
}

/// A single hacking attempt
#[derive(Debug, Clone, PartialEq)]
pub struct HackChallenge {
    /// Unique per attempt within a game
    id: u64,
    target: Vec<Symbol>,
    progress: Vec<Symbol>,
    stage: HackStage,
    highlight: Option<Symbol>,
    timeline: PlaybackTimeline,
}

impl HackChallenge {
    /// Build a challenge from a known sequence and start playback
    pub fn with_sequence(id: u64, target: Vec<Symbol>) -> Self {
        let timeline = PlaybackTimeline::for_sequence(&target);
        let mut challenge = Self {
            id,
            target,
            progress: Vec::new(),
            stage: HackStage::Playback,
            highlight: None,
            timeline,
        };
        // The first symbol lights up immediately
        challenge.advance(0.0);
        challenge
    }

    /// Random sequence of `length` symbols, uniform over the three buttons
    pub fn generate<R: Rng + ?Sized>(id: u64, length: usize, rng: &mut R) -> Self {
        let target = (0..length)
            .map(|_| Symbol::ALL[rng.random_range(0..Symbol::ALL.len())])
            .collect();
        Self::with_sequence(id, target)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn stage(&self) -> HackStage {
        self.stage
    }

    pub fn target(&self) -> &[Symbol] {
        &self.target
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn progress(&self) -> &[Symbol] {
        &self.progress
    }

    /// Button lit by playback right now
    pub fn highlight(&self) -> Option<Symbol> {
        self.highlight
    }

    /// Length of the playback phase in milliseconds
    pub fn playback_duration_ms(&self) -> f32 {
        self.timeline.total_ms()
    }

    /// Advance playback by `dt_ms`. No effect once input has opened.
    pub fn advance(&mut self, dt_ms: f32) {
        if self.stage != HackStage::Playback {
            return;
        }
        for cue in self.timeline.advance(dt_ms) {
            match cue {
                Cue::Highlight(symbol) => self.highlight = Some(symbol),
                Cue::Clear => self.highlight = None,
                Cue::OpenInput => {
                    self.highlight = None;
                    self.stage = HackStage::AwaitingInput;
                }
            }
        }
    }

    /// Enter one symbol
    pub fn press(&mut self, symbol: Symbol) -> PressOutcome {
        if self.stage != HackStage::AwaitingInput {
            return PressOutcome::Ignored;
        }

        let index = self.progress.len();
        self.progress.push(symbol);

        if self.target.get(index) != Some(&symbol) {
            self.stage = HackStage::Failed;
            return PressOutcome::Failed;
        }

        if self.progress.len() == self.target.len() {
            self.stage = HackStage::Solved;
            PressOutcome::Solved
        } else {
            PressOutcome::Progress
        }
    }
}
