//! Axis-aligned geometry and contact tests
//!
//! Every game uses the same closed-interval convention: shapes that merely
//! touch are in contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Rectangle centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Grow the rectangle by `amount` on every side
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Closed containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Closed overlap test (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Circle against rectangle using the rectangle grown by the radius.
///
/// Equivalent to testing the circle's bounding square, which keeps both
/// balloon shapes on the same contact rule.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rect.expand(radius).contains(center)
}

/// Vertical span overlap, used for same-lane vehicle contact
pub fn spans_overlap(a_top: f32, a_bottom: f32, b_top: f32, b_bottom: f32) -> bool {
    a_top <= b_bottom && b_top <= a_bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_accessors() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.width(), 30.0);
        assert_eq!(r.height(), 40.0);

        let c = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(c, Rect::from_xywh(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_touching_rects_overlap() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));

        let c = Rect::from_xywh(10.01, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_circle_rect_boundary() {
        let wall = Rect::from_xywh(100.0, 0.0, 60.0, 200.0);
        // Circle edge exactly on the wall's left edge
        assert!(circle_rect_overlap(Vec2::new(80.0, 50.0), 20.0, &wall));
        assert!(!circle_rect_overlap(Vec2::new(79.9, 50.0), 20.0, &wall));
        // Below the wall
        assert!(!circle_rect_overlap(Vec2::new(130.0, 221.0), 20.0, &wall));
        assert!(circle_rect_overlap(Vec2::new(130.0, 220.0), 20.0, &wall));
    }

    #[test]
    fn test_spans_overlap() {
        assert!(spans_overlap(0.0, 100.0, 100.0, 200.0));
        assert!(!spans_overlap(0.0, 99.0, 100.0, 200.0));
        assert!(spans_overlap(50.0, 60.0, 0.0, 200.0));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        // Whole pixels keep the arithmetic exact so boundary contacts show up
        (-500i32..500, -500i32..500, 0i32..200, 0i32..200)
            .prop_map(|(x, y, w, h)| Rect::from_xywh(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn circle_matches_bounding_square(
            cx in -300i32..300,
            cy in -300i32..300,
            r in 1i32..50,
            rect in arb_rect(),
        ) {
            let (cx, cy, r) = (cx as f32, cy as f32, r as f32);
            let square = Rect::from_center(Vec2::new(cx, cy), Vec2::splat(r * 2.0));
            prop_assert_eq!(circle_rect_overlap(Vec2::new(cx, cy), r, &rect), square.overlaps(&rect));
        }
    }
}
