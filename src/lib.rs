//! Pocket Arcade - three tiny canvas arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lane runner, balloon flight, collisions)
//! - `renderer`: Display lists and the canvas 2D painter
//! - `platform`: Browser/native platform abstraction (storage, input)
//! - `highscores`: Persisted best score per balloon variant
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::{GameKind, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per repaint)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the fixed-step driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default viewport, 9:16 portrait like a phone screen
    pub const DEFAULT_WIDTH: f32 = 405.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Minimum horizontal travel for a touch gesture to count as a swipe (px)
    pub const SWIPE_THRESHOLD: f32 = 50.0;
}

/// Size of the drawing surface in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Portrait viewport filling 90% of the window height at a 9:16 ratio
    pub fn portrait_for_window(window_height: f32) -> Self {
        let height = window_height * 0.9;
        Self::new(height * 9.0 / 16.0, height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(consts::DEFAULT_WIDTH, consts::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_viewport_ratio() {
        let vp = Viewport::portrait_for_window(800.0);
        assert!((vp.height - 720.0).abs() < 0.001);
        assert!((vp.width - 405.0).abs() < 0.001);
        assert_eq!(vp, Viewport::default());
    }
}
