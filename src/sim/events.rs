//! Gameplay events emitted by a tick
//!
//! The simulation never touches the HUD or storage directly. It records what
//! happened and the front-end drains the queue after each frame.

use serde::{Deserialize, Serialize};

/// Something the front-end may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (balloon leaves Idle)
    Started,
    /// The balloon received an upward impulse. The web front-end has no
    /// sound, so only tests and the native demo observe it.
    Flap,
    /// An obstacle or car was passed; `total` is the new score
    Scored { entity: u32, total: u64 },
    /// The player hit something or left the screen. Always followed by
    /// `GameOver`, which is what the front-end acts on.
    Crashed,
    /// The run ended with this score
    GameOver { score: u64 },
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, nothing advances
    GameOver,
}
