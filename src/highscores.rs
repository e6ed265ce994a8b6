//! High score persistence
//!
//! A single integer stored under `invaders-hiscore`. Missing, corrupt or
//! unreachable storage reads as 0.

use crate::platform::KeyValueStore;

/// The best score seen on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub value: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "invaders-hiscore";

    /// Load from the store, falling back to 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        let value = match store.get(Self::STORAGE_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring corrupt high score {:?}", raw);
                0
            }),
            None => 0,
        };
        log::info!("High score: {}", value);
        Self { value }
    }

    /// Raise the high score if `score` beats it. Returns true when raised.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Write to the store. Failures are logged and otherwise ignored.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Err(e) = store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            log::warn!("Could not save high score: {}", e);
        }
    }
}
