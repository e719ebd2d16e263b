//! Display list primitives

use glam::Vec2;

use super::palette::Color;
use crate::sim::Rect;

/// One immediate-mode drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole surface
    Clear { width: f32, height: f32 },
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
}

impl DrawCmd {
    pub fn rect(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        DrawCmd::FillRect {
            rect: Rect::from_xywh(x, y, width, height),
            color,
        }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        DrawCmd::FillCircle {
            center,
            radius,
            color,
        }
    }

    /// Skip shapes with nothing to paint
    pub fn is_visible(&self) -> bool {
        match self {
            DrawCmd::Clear { .. } => true,
            DrawCmd::FillRect { rect, color } => rect.width() > 0.0 && rect.height() > 0.0 && color[3] > 0.0,
            DrawCmd::FillCircle { radius, color, .. } => *radius > 0.0 && color[3] > 0.0,
        }
    }
}
