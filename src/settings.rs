//! Player preferences
//!
//! Persisted as JSON in storage, separately from high scores.

use serde::{Deserialize, Serialize};

use crate::consts::SWIPE_THRESHOLD;
use crate::platform::KeyValueStore;
use crate::sim::BalloonVariant;
use crate::tuning::Tuning;

/// The three games in the cabinet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameKind {
    #[default]
    LaneRunner,
    BalloonRect,
    BalloonCircle,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::LaneRunner => "runner",
            GameKind::BalloonRect => "balloon",
            GameKind::BalloonCircle => "balloon-circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_start_matches('#').to_lowercase().as_str() {
            "runner" | "lane-runner" => Some(GameKind::LaneRunner),
            "balloon" | "balloon-rect" => Some(GameKind::BalloonRect),
            "balloon-circle" | "circle" => Some(GameKind::BalloonCircle),
            _ => None,
        }
    }

    /// Balloon variant, if this is one of the balloon games
    pub fn balloon_variant(&self) -> Option<BalloonVariant> {
        match self {
            GameKind::LaneRunner => None,
            GameKind::BalloonRect => Some(BalloonVariant::Rect),
            GameKind::BalloonCircle => Some(BalloonVariant::Circle),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game launched when the page has no `#game` hash
    pub game: GameKind,
    /// Horizontal travel (px) a touch must cover to change lanes
    pub swipe_threshold: f32,
    /// Attract mode: the games play themselves
    pub autopilot: bool,
    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameKind::default(),
            swipe_threshold: SWIPE_THRESHOLD,
            autopilot: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pocket_arcade_settings";

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Self>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return Self {
                        tuning: settings.tuning.sanitized(),
                        ..settings
                    };
                }
                Err(e) => log::warn!("Discarding unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings not serialisable: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
