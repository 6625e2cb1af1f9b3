//! Game settings and preferences
//!
//! Loaded from an optional JSON file; anything missing or unreadable falls
//! back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::sim::{InputEvent, Key};

/// Raw key names (as reported by the platform) mapped to logical keys.
///
/// This is the entry point for a presentation layer: feed it platform key
/// events through [`KeyBindings::key_event`] and forward the result to
/// `handle_input`. The headless demo pilot skips it and emits core input
/// directly. Names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, Key>", into = "HashMap<String, Key>")]
pub struct KeyBindings {
    keys: HashMap<String, Key>,
}

impl From<HashMap<String, Key>> for KeyBindings {
    fn from(raw: HashMap<String, Key>) -> Self {
        let keys = raw
            .into_iter()
            .map(|(name, key)| (name.to_lowercase(), key))
            .collect();
        Self { keys }
    }
}

impl From<KeyBindings> for HashMap<String, Key> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.keys
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = [
            ("w", Key::Up),
            ("s", Key::Down),
            ("a", Key::Left),
            ("d", Key::Right),
            ("arrowup", Key::Up),
            ("arrowdown", Key::Down),
            ("arrowleft", Key::Left),
            ("arrowright", Key::Right),
            ("e", Key::Interact),
            ("escape", Key::Restart),
        ]
        .into_iter()
        .map(|(name, key)| (name.to_string(), key))
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    /// Look up a raw key name, case-insensitively
    pub fn resolve(&self, raw: &str) -> Option<Key> {
        self.keys.get(&raw.to_lowercase()).copied()
    }

    /// Bind (or rebind) a raw key name
    pub fn bind(&mut self, raw: &str, key: Key) {
        self.keys.insert(raw.to_lowercase(), key);
    }

    /// Translate a platform key event into core input
    pub fn key_event(&self, raw: &str, pressed: bool) -> Option<InputEvent> {
        let key = self.resolve(raw)?;
        Some(if pressed {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        })
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; derived from the clock when absent
    pub seed: Option<u64>,
    pub bindings: KeyBindings,

    // === Headless demo ===
    /// Session length in seconds
    pub demo_seconds: f32,
    /// Frame delta fed to the simulation clock, in milliseconds
    pub frame_ms: f32,
    /// Clearance the demo pilot keeps beyond the detection radius
    pub pilot_margin: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            bindings: KeyBindings::default(),
            demo_seconds: 60.0,
            frame_ms: 16.0,
            pilot_margin: 40.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Configured seed, or one derived from the system clock
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }

    /// Frame delta in seconds; non-positive values fall back to the default
    pub fn frame_dt(&self) -> f32 {
        if self.frame_ms > 0.0 {
            self.frame_ms / 1000.0
        } else {
            Self::default().frame_ms / 1000.0
        }
    }
}
