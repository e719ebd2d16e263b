//! Canvas 2D painter (web only)

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::palette;
use super::shapes::DrawCmd;

/// Replays display lists onto a `<canvas>` 2D context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Grab the 2D context of `canvas`, if the browser provides one
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    pub fn paint(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCmd::FillRect { rect, color } => {
                    self.ctx.set_fill_style_str(&palette::css(*color));
                    self.ctx.fill_rect(
                        rect.left() as f64,
                        rect.top() as f64,
                        rect.width() as f64,
                        rect.height() as f64,
                    );
                }
                DrawCmd::FillCircle { center, radius, color } => {
                    self.ctx.set_fill_style_str(&palette::css(*color));
                    self.ctx.begin_path();
                    if let Err(e) = self.ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU) {
                        log::warn!("Canvas arc failed: {:?}", e);
                        continue;
                    }
                    self.ctx.fill();
                }
            }
        }
    }
}
