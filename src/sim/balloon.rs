//! Balloon flight: tap to rise, fall under gravity, thread the gaps
//!
//! Both variants share this module. They differ only in the balloon's shape,
//! which also picks the contact test (AABB for the rectangle, radius-expanded
//! bounds for the circle).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Simulation;
use super::events::{GameEvent, GamePhase};
use super::geom::{Rect, circle_rect_overlap};
use crate::Viewport;
use crate::tuning::BalloonTuning;

/// Which of the two balloon games is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BalloonVariant {
    #[default]
    Rect,
    Circle,
}

impl BalloonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalloonVariant::Rect => "rect",
            BalloonVariant::Circle => "circle",
        }
    }
}

/// Balloon geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BalloonShape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl BalloonShape {
    pub fn for_variant(variant: BalloonVariant, tuning: &BalloonTuning) -> Self {
        match variant {
            BalloonVariant::Rect => BalloonShape::Rect {
                width: tuning.rect_width,
                height: tuning.rect_height,
            },
            BalloonVariant::Circle => BalloonShape::Circle {
                radius: tuning.circle_radius,
            },
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    /// Centre of the balloon
    pub pos: Vec2,
    /// Vertical velocity in px per tick (negative is up)
    pub vel: f32,
    pub shape: BalloonShape,
}

impl Balloon {
    /// Axis-aligned bounds (the bounding square for a circle)
    pub fn bounds(&self) -> Rect {
        match self.shape {
            BalloonShape::Rect { width, height } => Rect::from_center(self.pos, Vec2::new(width, height)),
            BalloonShape::Circle { radius } => Rect::from_center(self.pos, Vec2::splat(radius * 2.0)),
        }
    }

    /// Contact with a solid block
    pub fn hits(&self, block: &Rect) -> bool {
        match self.shape {
            BalloonShape::Rect { .. } => self.bounds().overlaps(block),
            BalloonShape::Circle { radius } => circle_rect_overlap(self.pos, radius, block),
        }
    }
}

/// A top and bottom block sharing a vertical gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    pub scored: bool,
}

impl ObstaclePair {
    /// Trailing edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    pub fn top_block(&self) -> Rect {
        Rect::from_xywh(self.x, 0.0, self.width, self.gap_top().max(0.0))
    }

    /// The bottom block reaches the floor of a screen `height` tall
    pub fn bottom_block(&self, height: f32) -> Rect {
        let top = self.gap_bottom();
        Rect::from_xywh(self.x, top, self.width, (height - top).max(0.0))
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct BalloonInput {
    /// Tap, click or space: start, flap or dismiss the end screen
    pub tap: bool,
    /// Demo mode - flap automatically to follow the gaps
    pub autopilot: bool,
}

/// Complete balloon flight state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalloonState {
    pub seed: u64,
    pub variant: BalloonVariant,
    pub tuning: BalloonTuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub balloon: Balloon,
    /// Obstacles in spawn order, which is also left-to-right order
    pub obstacles: Vec<ObstaclePair>,
    pub score: u64,
    pub time_ticks: u64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl BalloonState {
    pub fn new(seed: u64, viewport: Viewport, variant: BalloonVariant) -> Self {
        Self::with_tuning(seed, viewport, variant, BalloonTuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, variant: BalloonVariant, tuning: BalloonTuning) -> Self {
        let tuning = tuning.sanitized();
        let balloon = Balloon {
            pos: Vec2::new(tuning.balloon_x, viewport.height / 2.0),
            vel: 0.0,
            shape: BalloonShape::for_variant(variant, &tuning),
        };
        Self {
            seed,
            variant,
            viewport,
            phase: GamePhase::Idle,
            balloon,
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to the title screen with a fresh balloon. The RNG keeps running so
    /// consecutive runs see different gaps.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Idle;
        self.balloon.pos = Vec2::new(self.tuning.balloon_x, self.viewport.height / 2.0);
        self.balloon.vel = 0.0;
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
    }

    /// Handle a tap according to the current phase
    pub fn tap(&mut self) {
        match self.phase {
            GamePhase::Idle => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Started);
                log::info!("Balloon flight ({}) started", self.variant.as_str());
                self.flap();
            }
            GamePhase::Playing => self.flap(),
            GamePhase::GameOver => self.restart(),
        }
    }

    /// Upward impulse; replaces the current velocity
    pub fn flap(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.balloon.vel = self.tuning.flap_impulse;
        self.events.push(GameEvent::Flap);
    }

    /// The drawing surface changed size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.phase == GamePhase::Idle {
            self.balloon.pos.y = viewport.height / 2.0;
        }
    }

    /// Add an obstacle pair with its left edge at `x`
    pub fn spawn_obstacle_at(&mut self, x: f32, gap_center: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(ObstaclePair {
            id,
            x,
            width: self.tuning.obstacle_width,
            gap_center,
            gap_height: self.tuning.gap_height,
            scored: false,
        });
        log::debug!("Obstacle {} spawned, gap centre {:.1}", id, gap_center);
        id
    }

    fn random_gap_center(&mut self) -> f32 {
        let half_gap = self.tuning.gap_height / 2.0;
        let lo = self.tuning.gap_margin + half_gap;
        let hi = self.viewport.height - self.tuning.gap_margin - half_gap;
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            self.viewport.height / 2.0
        }
    }

    fn maybe_spawn_obstacle(&mut self) {
        let threshold = self.viewport.width - self.tuning.spawn_distance;
        let due = self.obstacles.last().is_none_or(|last| last.x < threshold);
        if due {
            let gap_center = self.random_gap_center();
            self.spawn_obstacle_at(self.viewport.width, gap_center);
        }
    }

    fn update_obstacles(&mut self) {
        let speed = self.tuning.scroll_speed;
        let leading_edge = self.balloon.bounds().right();

        for obstacle in self.obstacles.iter_mut() {
            obstacle.x -= speed;

            if !obstacle.scored && leading_edge > obstacle.right() {
                obstacle.scored = true;
                self.score += 1;
                self.events.push(GameEvent::Scored {
                    entity: obstacle.id,
                    total: self.score,
                });
            }
        }

        self.obstacles.retain(|o| o.right() > 0.0);
    }

    /// Whether the balloon touches a block or has left the screen vertically
    pub fn is_crashed(&self) -> bool {
        let bounds = self.balloon.bounds();
        if bounds.top() <= 0.0 || bounds.bottom() >= self.viewport.height {
            return true;
        }

        let height = self.viewport.height;
        self.obstacles
            .iter()
            .any(|o| self.balloon.hits(&o.top_block()) || self.balloon.hits(&o.bottom_block(height)))
    }

    fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Crashed);
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Balloon flight ({}) over: score {}",
            self.variant.as_str(),
            self.score
        );
    }

    /// Whether the demo pilot wants to flap this tick
    pub fn autopilot_wants_flap(&self) -> bool {
        let left = self.balloon.bounds().left();
        let target = self
            .obstacles
            .iter()
            .find(|o| o.right() >= left)
            .map(|o| o.gap_center + o.gap_height / 6.0)
            .unwrap_or(self.viewport.height / 2.0);

        self.balloon.pos.y > target && self.balloon.vel >= 0.0
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Advance the balloon game by one tick
pub fn tick(state: &mut BalloonState, input: &BalloonInput) {
    if input.tap {
        state.tap();
    }
    if input.autopilot {
        match state.phase {
            GamePhase::Idle => state.tap(),
            GamePhase::Playing if state.autopilot_wants_flap() => state.flap(),
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let balloon = &mut state.balloon;
    balloon.pos.y += balloon.vel;
    balloon.vel += state.tuning.gravity;

    state.maybe_spawn_obstacle();
    state.update_obstacles();

    if state.is_crashed() {
        state.end_run();
    }
}

impl Simulation for BalloonState {
    type Input = BalloonInput;

    fn step(&mut self, input: &BalloonInput) {
        tick(self, input);
    }

    fn clear_one_shots(input: &mut BalloonInput) {
        input.tap = false;
    }
}
