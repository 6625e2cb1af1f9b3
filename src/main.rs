//! Cyber Heist entry point
//!
//! Native headless session: the demo pilot plays against the simulation for
//! a fixed wall-clock budget and the run is summarized in the log.

use std::path::Path;

use cyber_heist::Pilot;
use cyber_heist::Settings;
use cyber_heist::sim::{GameEvent, GameState, SimClock, Snapshot, advance, handle_input};

fn main() {
    env_logger::init();

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    let seed = settings.seed_or_clock();
    log::info!("Cyber Heist (headless) starting with seed {}", seed);

    let mut state = GameState::new(seed);
    let mut clock = SimClock::new();
    let mut pilot = Pilot::new(settings.pilot_margin);

    let dt = settings.frame_dt();
    let frames = (settings.demo_seconds.max(0.0) / dt).ceil() as u64;
    let mut best_level = state.level;
    let mut best_score = state.total_score;
    let mut hacks = 0u32;

    for _ in 0..frames {
        let snapshot = Snapshot::capture(&state);
        for input in pilot.drive(&snapshot) {
            handle_input(&mut state, input);
        }
        advance(&mut state, &mut clock, dt);

        for event in state.drain_events() {
            log::debug!("{:?}", event);
            if event == GameEvent::HackSucceeded {
                hacks += 1;
            }
        }
        best_level = best_level.max(state.level);
        best_score = best_score.max(state.total_score);
    }

    let snapshot = Snapshot::capture(&state);
    log::info!(
        "Session over after {:.0}s (seed {}): best level {}, best score {}, {} hacks, {} detections",
        settings.demo_seconds,
        state.seed,
        best_level,
        best_score,
        hacks,
        state.detections
    );
    log::debug!(
        "Final level ran {} patrol and {} locomotion ticks",
        state.patrol_ticks,
        state.locomotion_ticks
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize final snapshot: {}", e),
    }
}
