//! Lane runner: dodge traffic on a four-lane road
//!
//! The player's car sits near the bottom of the screen and hops between
//! lanes. Road markings and traffic scroll downward to fake forward motion.
//! Oncoming cars (left lanes) rush past; cars travelling the same way (right
//! lanes) are slower than the road and get overtaken for points.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Simulation;
use super::events::{GameEvent, GamePhase};
use super::geom::{Rect, spans_overlap};
use crate::Viewport;
use crate::tuning::RunnerTuning;

/// Lookahead for the autopilot, in px above the player's bumper
const AUTOPILOT_LOOKAHEAD: f32 = 260.0;

/// One-lane move requested by a key press or swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct RunnerInput {
    pub shift: Option<LaneShift>,
    /// Demo mode - steer around traffic automatically
    pub autopilot: bool,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lane: u8,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A traffic car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub lane: u8,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed in px per tick
    pub speed: f32,
    /// Paint hue in degrees
    pub hue: f32,
    /// Already counted as overtaken
    pub scored: bool,
}

impl Car {
    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A dash of the lane dividers. Only its vertical offset matters; every
/// divider draws the same dash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadMarking {
    pub y: f32,
}

/// Complete lane runner state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerState {
    pub seed: u64,
    pub tuning: RunnerTuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub player: Player,
    /// Traffic in spawn order
    pub cars: Vec<Car>,
    /// Bottom-most marking first, each next one `marking_spacing` higher
    pub markings: VecDeque<RoadMarking>,
    pub score: u64,
    /// Distance driven in km
    pub distance: f64,
    pub time_ticks: u64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl RunnerState {
    /// New run with default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, RunnerTuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: RunnerTuning) -> Self {
        let tuning = tuning.sanitized();
        let lane_width = viewport.width / tuning.num_lanes.max(1) as f32;
        let size = Vec2::new(lane_width * tuning.car_width_ratio, tuning.car_height);
        let start_lane = tuning.start_lane.min(tuning.num_lanes.saturating_sub(1));

        let mut state = Self {
            seed,
            viewport,
            phase: GamePhase::Playing,
            player: Player {
                lane: start_lane,
                pos: Vec2::new(0.0, viewport.height - size.y - tuning.player_bottom_margin),
                size,
            },
            cars: Vec::new(),
            markings: VecDeque::new(),
            score: 0,
            distance: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };
        state.player.pos.x = state.lane_slot_x(start_lane);
        state.reset_markings();

        log::info!("Lane runner started (seed {})", seed);
        state
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn lane_width(&self) -> f32 {
        self.viewport.width / self.tuning.num_lanes.max(1) as f32
    }

    /// Left edge of a car centred in `lane`
    pub fn lane_slot_x(&self, lane: u8) -> f32 {
        let lane_width = self.lane_width();
        lane as f32 * lane_width + (lane_width - self.player.size.x) / 2.0
    }

    fn max_lane(&self) -> u8 {
        self.tuning.num_lanes.saturating_sub(1)
    }

    fn reset_markings(&mut self) {
        self.markings.clear();
        let spacing = self.tuning.marking_spacing;
        let mut y = (self.viewport.height / spacing).floor() * spacing;
        while y >= 0.0 {
            self.markings.push_back(RoadMarking { y });
            y -= spacing;
        }
    }

    /// Move one lane over, clamped to the road. Returns whether the car moved.
    pub fn shift_lane(&mut self, shift: LaneShift) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let lane = match shift {
            LaneShift::Left => self.player.lane.saturating_sub(1),
            LaneShift::Right => (self.player.lane + 1).min(self.max_lane()),
        };
        let moved = lane != self.player.lane;
        self.player.lane = lane;
        self.player.pos.x = self.lane_slot_x(lane);
        moved
    }

    /// Place a car just above the screen in `lane`
    pub fn spawn_car_in_lane(&mut self, lane: u8) -> u32 {
        let lane = lane.min(self.max_lane());
        let road_speed = self.tuning.road_speed;
        let speed = if lane < self.tuning.oncoming_lanes {
            road_speed + self.tuning.oncoming_speed_bonus
        } else {
            road_speed + self.tuning.same_direction_speed_delta
        };
        let hue = self.rng.random_range(0.0..360.0);
        let id = self.next_entity_id();
        let size = self.player.size;
        self.cars.push(Car {
            id,
            lane,
            pos: Vec2::new(self.lane_slot_x(lane), -size.y),
            size,
            speed,
            hue,
            scored: false,
        });
        log::debug!("Car {} spawned in lane {} at speed {}", id, lane, speed);
        id
    }

    fn update_road(&mut self) {
        let speed = self.tuning.road_speed;
        let spacing = self.tuning.marking_spacing;
        for mark in self.markings.iter_mut() {
            mark.y += speed;
        }

        while self.markings.front().is_some_and(|m| m.y > self.viewport.height) {
            self.markings.pop_front();
        }
        if self.markings.is_empty() {
            self.markings.push_back(RoadMarking { y: 0.0 });
        }
        while let Some(back) = self.markings.back().copied() {
            if back.y <= 0.0 {
                break;
            }
            self.markings.push_back(RoadMarking { y: back.y - spacing });
        }
    }

    fn maybe_spawn_car(&mut self) {
        let chance = self.tuning.spawn_chance.clamp(0.0, 1.0);
        if self.rng.random_bool(chance) {
            let lane = self.rng.random_range(0..self.tuning.num_lanes.max(1));
            self.spawn_car_in_lane(lane);
        }
    }

    fn update_cars(&mut self) {
        let player_y = self.player.pos.y;
        let oncoming_lanes = self.tuning.oncoming_lanes;

        for car in self.cars.iter_mut() {
            car.pos.y += car.speed;

            if car.lane >= oncoming_lanes && !car.scored && car.pos.y > player_y {
                car.scored = true;
                self.score += 1;
                self.events.push(GameEvent::Scored {
                    entity: car.id,
                    total: self.score,
                });
            }
        }

        let height = self.viewport.height;
        self.cars.retain(|car| car.pos.y <= height);
    }

    fn check_collisions(&mut self) {
        let player = &self.player;
        let crashed = self.cars.iter().any(|car| {
            car.lane == player.lane
                && spans_overlap(
                    player.pos.y,
                    player.pos.y + player.size.y,
                    car.pos.y,
                    car.pos.y + car.size.y,
                )
        });

        if crashed {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::Crashed);
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!(
                "Lane runner over: score {}, distance {:.2} km",
                self.score,
                self.distance
            );
        }
    }

    /// Lane change that keeps the player clear of the nearest threat
    pub fn autopilot_shift(&self) -> Option<LaneShift> {
        let top = self.player.pos.y - AUTOPILOT_LOOKAHEAD;
        let bottom = self.player.pos.y + self.player.size.y;
        let lane_is_clear = |lane: u8| {
            !self
                .cars
                .iter()
                .any(|car| car.lane == lane && spans_overlap(top, bottom, car.pos.y, car.pos.y + car.size.y))
        };

        let current = self.player.lane;
        if lane_is_clear(current) {
            return None;
        }

        // Nearest clear lane wins, left first on ties
        (1..=self.max_lane()).find_map(|offset| {
            if current >= offset && lane_is_clear(current - offset) {
                Some(LaneShift::Left)
            } else if current + offset <= self.max_lane() && lane_is_clear(current + offset) {
                Some(LaneShift::Right)
            } else {
                None
            }
        })
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Advance the lane runner by one tick
pub fn tick(state: &mut RunnerState, input: &RunnerInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(shift) = input.shift {
        state.shift_lane(shift);
    }
    if input.autopilot {
        if let Some(shift) = state.autopilot_shift() {
            state.shift_lane(shift);
        }
    }

    state.time_ticks += 1;
    state.update_road();
    state.maybe_spawn_car();
    state.update_cars();
    state.check_collisions();
    state.distance += state.tuning.road_speed as f64 * state.tuning.km_per_px;
}

impl Simulation for RunnerState {
    type Input = RunnerInput;

    fn step(&mut self, input: &RunnerInput) {
        tick(self, input);
    }

    fn clear_one_shots(input: &mut RunnerInput) {
        input.shift = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quiet_road(seed: u64) -> RunnerState {
        let tuning = RunnerTuning {
            spawn_chance: 0.0,
            ..Default::default()
        };
        RunnerState::with_tuning(seed, Viewport::default(), tuning)
    }

    fn idle() -> RunnerInput {
        RunnerInput::default()
    }

    #[test]
    fn test_zero_marking_spacing_keeps_road_bounded() {
        let settings: crate::Settings =
            serde_json::from_str(r#"{ "tuning": { "runner": { "marking_spacing": 0 } } }"#).unwrap();
        let mut state = RunnerState::with_tuning(3, Viewport::default(), settings.tuning.runner);

        assert_eq!(state.tuning.marking_spacing, 100.0);
        for _ in 0..120 {
            tick(&mut state, &idle());
        }
        assert!(!state.markings.is_empty());
        assert!(state.markings.len() <= 10);
    }

    #[test]
    fn test_random_spawns_follow_chance_lanes_and_speeds() {
        let mut state = RunnerState::new(2024, Viewport::default());
        let rounds = 10_000;
        for _ in 0..rounds {
            state.maybe_spawn_car();
        }

        // 0.03 per tick gives 300 expected, sd about 17
        let spawned = state.cars.len();
        assert!((220..=380).contains(&spawned), "spawned {}", spawned);

        let mut per_lane = [0usize; 4];
        for car in &state.cars {
            per_lane[car.lane as usize] += 1;
            assert_eq!(car.pos.y, -state.player.size.y);
            assert_eq!(car.pos.x, state.lane_slot_x(car.lane));
            let expected = if car.lane < 2 { 8.0 } else { 3.0 };
            assert_eq!(car.speed, expected, "lane {}", car.lane);
        }
        assert!(per_lane.iter().all(|&n| n > 30), "lanes {:?}", per_lane);
    }

    #[test]
    fn test_player_starts_centred_in_third_lane() {
        let state = RunnerState::new(1, Viewport::default());
        let lane_width = 405.0 / 4.0;
        let width = lane_width * 0.6;

        assert_eq!(state.player.lane, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((state.player.size.x - width).abs() < 0.001);
        assert!((state.player.pos.x - (2.0 * lane_width + (lane_width - width) / 2.0)).abs() < 0.001);
        assert!((state.player.pos.y - (720.0 - 100.0 - 20.0)).abs() < 0.001);
    }

    #[test]
    fn test_right_moves_clamp_at_last_lane() {
        let mut state = quiet_road(1);
        assert!(state.shift_lane(LaneShift::Right));
        assert!(!state.shift_lane(LaneShift::Right));
        assert_eq!(state.player.lane, 3);
        assert!((state.player.pos.x - state.lane_slot_x(3)).abs() < 0.001);
    }

    #[test]
    fn test_left_moves_clamp_at_first_lane() {
        let mut state = quiet_road(1);
        for _ in 0..5 {
            state.shift_lane(LaneShift::Left);
        }
        assert_eq!(state.player.lane, 0);
        assert!((state.player.pos.x - state.lane_slot_x(0)).abs() < 0.001);
    }

    #[test]
    fn test_lane_dependent_speeds() {
        let mut state = quiet_road(1);
        state.spawn_car_in_lane(0);
        state.spawn_car_in_lane(1);
        state.spawn_car_in_lane(2);
        state.spawn_car_in_lane(3);

        let speeds: Vec<f32> = state.cars.iter().map(|c| c.speed).collect();
        assert_eq!(speeds, vec![8.0, 8.0, 3.0, 3.0]);
        assert!(state.cars.iter().all(|c| c.pos.y == -100.0));
        let ids: Vec<u32> = state.cars.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_overtaken_car_scores_once() {
        let mut state = quiet_road(2);
        let id = state.spawn_car_in_lane(3);
        let player_y = state.player.pos.y;
        state.cars[0].pos.y = player_y - 2.0;

        tick(&mut state, &idle());
        assert_eq!(state.score, 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Scored { entity: id, total: 1 }]
        );

        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.score, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_oncoming_car_never_scores() {
        let mut state = quiet_road(3);
        state.spawn_car_in_lane(0);
        for _ in 0..200 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.score, 0);
        assert!(state.cars.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_adjacent_offscreen_cars_all_removed() {
        let mut state = quiet_road(4);
        for lane in [0, 1, 0] {
            state.spawn_car_in_lane(lane);
        }
        for car in state.cars.iter_mut() {
            car.pos.y = 715.0;
        }
        state.spawn_car_in_lane(1);

        tick(&mut state, &idle());
        assert_eq!(state.cars.len(), 1);
        assert_eq!(state.cars[0].id, 4);
    }

    #[test]
    fn test_same_lane_contact_ends_run() {
        let mut state = quiet_road(5);
        state.spawn_car_in_lane(2);
        // Bumper to bumper after this tick's move
        state.cars[0].pos.y = state.player.pos.y - 100.0 - 3.0;

        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Crashed));
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        let distance = state.distance;
        let ticks = state.time_ticks;
        tick(&mut state, &idle());
        assert_eq!(state.distance, distance);
        assert_eq!(state.time_ticks, ticks);
        assert!(!state.shift_lane(LaneShift::Left));
        assert_eq!(state.player.lane, 2);
    }

    #[test]
    fn test_other_lane_traffic_is_harmless() {
        let mut state = quiet_road(6);
        state.spawn_car_in_lane(1);
        state.cars[0].pos.y = state.player.pos.y;
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_distance_accumulates() {
        let mut state = quiet_road(7);
        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert!((state.distance - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_markings_recycle_in_order() {
        let mut state = quiet_road(8);
        let spacing = state.tuning.marking_spacing;

        for _ in 0..500 {
            tick(&mut state, &idle());

            let front = state.markings.front().unwrap();
            let back = state.markings.back().unwrap();
            assert!(front.y <= state.viewport.height);
            assert!(back.y <= 0.0 && back.y > -spacing);
            for pair in state.markings.iter().collect::<Vec<_>>().windows(2) {
                assert!((pair[0].y - pair[1].y - spacing).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_autopilot_dodges_car_ahead() {
        let mut state = quiet_road(9);
        state.spawn_car_in_lane(2);
        state.cars[0].pos.y = state.player.pos.y - 150.0;
        state.spawn_car_in_lane(1);
        state.cars[1].pos.y = state.player.pos.y - 150.0;

        assert_eq!(state.autopilot_shift(), Some(LaneShift::Right));
        let input = RunnerInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.lane, 3);
        assert_eq!(state.autopilot_shift(), None);
    }

    #[test]
    fn test_fixed_step_keeps_autopilot_but_drops_shift() {
        use super::super::clock::FixedStep;

        let mut state = quiet_road(11);
        let mut clock = FixedStep::new(0.01);
        let mut input = RunnerInput {
            shift: Some(LaneShift::Right),
            autopilot: true,
        };
        assert_eq!(clock.advance(&mut state, &mut input, 0.035), 3);
        assert_eq!(state.player.lane, 3);
        assert_eq!(input.shift, None);
        assert!(input.autopilot);
    }

    #[test]
    fn test_determinism() {
        let mut a = RunnerState::new(4242, Viewport::default());
        let mut b = RunnerState::new(4242, Viewport::default());
        for i in 0..400 {
            let input = RunnerInput {
                shift: if i % 37 == 0 { Some(LaneShift::Left) } else { None },
                autopilot: true,
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.cars.len(), b.cars.len());
        assert_eq!(a.player.lane, b.player.lane);
        assert_eq!(a.phase, b.phase);
    }

    fn arb_shift() -> impl Strategy<Value = Option<LaneShift>> {
        prop_oneof![
            Just(None),
            Just(Some(LaneShift::Left)),
            Just(Some(LaneShift::Right)),
        ]
    }

    proptest! {
        #[test]
        fn lane_stays_on_road(shifts in proptest::collection::vec(arb_shift(), 0..64)) {
            let mut state = quiet_road(10);
            for shift in shifts.into_iter().flatten() {
                state.shift_lane(shift);
                prop_assert!(state.player.lane <= 3);
            }
        }

        #[test]
        fn score_never_decreases(seed in 0u64..1_000, shifts in proptest::collection::vec(arb_shift(), 300)) {
            let mut state = RunnerState::new(seed, Viewport::default());
            let mut last = 0;
            let mut scored = std::collections::HashSet::new();
            for shift in shifts {
                tick(&mut state, &RunnerInput { shift, autopilot: false });
                prop_assert!(state.score >= last);
                last = state.score;
                for event in state.drain_events() {
                    if let GameEvent::Scored { entity, .. } = event {
                        prop_assert!(scored.insert(entity));
                    }
                }
            }
        }
    }
}
