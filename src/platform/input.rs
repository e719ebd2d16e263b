//! Input translation
//!
//! Maps raw browser events onto game commands. Kept free of `web_sys` so the
//! rules can be tested natively.

use crate::consts::SWIPE_THRESHOLD;
use crate::sim::LaneShift;

/// What a key press means to the games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Lane runner steering
    Shift(LaneShift),
    /// Balloon start/flap/restart
    Tap,
}

/// Translate a `KeyboardEvent.key` value
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" => Some(KeyAction::Shift(LaneShift::Left)),
        "ArrowRight" => Some(KeyAction::Shift(LaneShift::Right)),
        " " | "ArrowUp" | "Enter" => Some(KeyAction::Tap),
        _ => None,
    }
}

/// Turns a touch-start/touch-end pair into at most one lane change
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start_x: None,
            threshold,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. Travel must exceed the threshold.
    pub fn end(&mut self, x: f32) -> Option<LaneShift> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx > self.threshold {
            Some(LaneShift::Right)
        } else if dx < -self.threshold {
            Some(LaneShift::Left)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action("ArrowLeft"), Some(KeyAction::Shift(LaneShift::Left)));
        assert_eq!(key_action("ArrowRight"), Some(KeyAction::Shift(LaneShift::Right)));
        assert_eq!(key_action(" "), Some(KeyAction::Tap));
        assert_eq!(key_action("a"), None);
    }

    #[test]
    fn test_swipe_needs_more_than_threshold() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0);
        assert_eq!(swipe.end(150.0), None);

        swipe.begin(100.0);
        assert_eq!(swipe.end(150.5), Some(LaneShift::Right));

        swipe.begin(100.0);
        assert_eq!(swipe.end(40.0), Some(LaneShift::Left));
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut swipe = SwipeTracker::new(10.0);
        assert_eq!(swipe.end(500.0), None);

        swipe.begin(0.0);
        assert_eq!(swipe.end(20.0), Some(LaneShift::Right));
        // The gesture was consumed
        assert_eq!(swipe.end(40.0), None);
    }
}
