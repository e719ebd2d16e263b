//! Rendering module
//!
//! Each frame a game state is turned into a display list of flat 2D shapes.
//! On the web the list is replayed onto a canvas 2D context; natively it is
//! only inspected by tests.

pub mod palette;
pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{balloon_scene, runner_scene};
pub use shapes::DrawCmd;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
