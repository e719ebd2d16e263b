//! Best score per balloon variant
//!
//! Persisted as a single decimal integer under a fixed key. A missing or
//! malformed value reads as zero.

use crate::platform::KeyValueStore;
use crate::sim::BalloonVariant;

/// Best score for one game, mirrored to storage on improvement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    best: u64,
}

impl HighScore {
    /// Storage key for the rectangle balloon
    pub const RECT_KEY: &'static str = "balloon_flight_high_score";
    /// Storage key for the circle balloon
    pub const CIRCLE_KEY: &'static str = "balloon_flight_circle_high_score";

    pub fn key_for(variant: BalloonVariant) -> &'static str {
        match variant {
            BalloonVariant::Rect => Self::RECT_KEY,
            BalloonVariant::Circle => Self::CIRCLE_KEY,
        }
    }

    /// Read the stored best for `variant`
    pub fn load(store: &impl KeyValueStore, variant: BalloonVariant) -> Self {
        let key = Self::key_for(variant);
        let best = match store.get(key) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed high score {:?} under {}", raw, key);
                0
            }),
            None => 0,
        };
        log::info!("High score for {}: {}", variant.as_str(), best);
        Self { key, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true when it set a new record.
    ///
    /// The in-memory best always updates; a failed write is logged and
    /// otherwise ignored.
    pub fn submit(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.set(self.key, &score.to_string()) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("New high score {} not saved: {}", score, e),
        }
        true
    }
}
