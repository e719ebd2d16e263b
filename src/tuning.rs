//! Data-driven game balance
//!
//! Every gameplay constant lives here with its default. Tunings deserialize
//! with `#[serde(default)]`, so a JSON override only needs the fields it
//! changes.

use serde::{Deserialize, Serialize};

/// `value` when it is a usable size or speed, otherwise `fallback`
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

/// Lane runner balance (distances in px, speeds in px per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub num_lanes: u8,
    pub start_lane: u8,
    /// Scroll speed of the road, the player's apparent speed
    pub road_speed: f32,
    /// Chance per tick that a new car appears
    pub spawn_chance: f64,
    /// Added to road speed for cars in oncoming lanes
    pub oncoming_speed_bonus: f32,
    /// Added to road speed for cars travelling with the player
    pub same_direction_speed_delta: f32,
    /// Lanes below this index carry oncoming traffic
    pub oncoming_lanes: u8,
    /// Car width as a fraction of the lane width
    pub car_width_ratio: f32,
    pub car_height: f32,
    /// Gap between the player's bumper and the bottom of the screen
    pub player_bottom_margin: f32,
    pub marking_spacing: f32,
    pub marking_length: f32,
    pub marking_width: f32,
    /// Road speed to distance conversion (km per px)
    pub km_per_px: f64,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            num_lanes: 4,
            start_lane: 2,
            road_speed: 5.0,
            spawn_chance: 0.03,
            oncoming_speed_bonus: 3.0,
            same_direction_speed_delta: -2.0,
            oncoming_lanes: 2,
            car_width_ratio: 0.6,
            car_height: 100.0,
            player_bottom_margin: 20.0,
            marking_spacing: 100.0,
            marking_length: 50.0,
            marking_width: 5.0,
            km_per_px: 0.001,
        }
    }
}

impl RunnerTuning {
    /// Replace values that would stall or break the road with defaults.
    /// Zero spacing would make marking recycling loop forever.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            num_lanes: if self.num_lanes == 0 { defaults.num_lanes } else { self.num_lanes },
            spawn_chance: if self.spawn_chance.is_finite() {
                self.spawn_chance.clamp(0.0, 1.0)
            } else {
                defaults.spawn_chance
            },
            car_width_ratio: positive_or(self.car_width_ratio, defaults.car_width_ratio),
            car_height: positive_or(self.car_height, defaults.car_height),
            marking_spacing: positive_or(self.marking_spacing, defaults.marking_spacing),
            marking_length: positive_or(self.marking_length, defaults.marking_length),
            marking_width: positive_or(self.marking_width, defaults.marking_width),
            ..self
        }
    }
}

/// Balloon flight balance (distances in px, speeds in px per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonTuning {
    pub gravity: f32,
    /// Velocity set by a tap (negative is up)
    pub flap_impulse: f32,
    /// Horizontal centre of the balloon
    pub balloon_x: f32,
    pub rect_width: f32,
    pub rect_height: f32,
    pub circle_radius: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub scroll_speed: f32,
    /// A new pair spawns once the newest one is this far from the right edge
    pub spawn_distance: f32,
    /// Minimum distance between the gap and the top/bottom of the screen
    pub gap_margin: f32,
}

impl Default for BalloonTuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            flap_impulse: -8.0,
            balloon_x: 80.0,
            rect_width: 30.0,
            rect_height: 40.0,
            circle_radius: 20.0,
            obstacle_width: 60.0,
            gap_height: 150.0,
            scroll_speed: 2.0,
            spawn_distance: 200.0,
            gap_margin: 50.0,
        }
    }
}

impl BalloonTuning {
    /// Replace values that would stall the scroll or pile up obstacles with
    /// defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            rect_width: positive_or(self.rect_width, defaults.rect_width),
            rect_height: positive_or(self.rect_height, defaults.rect_height),
            circle_radius: positive_or(self.circle_radius, defaults.circle_radius),
            obstacle_width: positive_or(self.obstacle_width, defaults.obstacle_width),
            gap_height: positive_or(self.gap_height, defaults.gap_height),
            scroll_speed: positive_or(self.scroll_speed, defaults.scroll_speed),
            spawn_distance: positive_or(self.spawn_distance, defaults.spawn_distance),
            ..self
        }
    }
}

/// Balance for every game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub runner: RunnerTuning,
    pub balloon: BalloonTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn sanitized(self) -> Self {
        Self {
            runner: self.runner.sanitized(),
            balloon: self.balloon.sanitized(),
        }
    }
}
