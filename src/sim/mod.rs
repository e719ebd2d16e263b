//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per call)
//! - Seeded RNG only
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering or platform dependencies

pub mod balloon;
pub mod clock;
pub mod events;
pub mod geom;
pub mod runner;

pub use balloon::{Balloon, BalloonInput, BalloonShape, BalloonState, BalloonVariant, ObstaclePair};
pub use clock::{FixedStep, Simulation};
pub use events::{GameEvent, GamePhase};
pub use geom::{Rect, circle_rect_overlap};
pub use runner::{Car, LaneShift, Player, RoadMarking, RunnerInput, RunnerState};
