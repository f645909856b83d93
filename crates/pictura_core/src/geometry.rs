//! Geometric primitives

use serde::{Deserialize, Serialize};

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle stored as its four edges
///
/// A rect is empty unless `left < right` and `top < bottom`; NaN edges
/// therefore always read as empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const EMPTY: Rect = Rect::from_ltrb(0.0, 0.0, 0.0, 0.0);

    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_ltrb(x, y, x + width, y + height)
    }

    pub fn from_size(size: Size) -> Self {
        Self::from_ltrb(0.0, 0.0, size.width, size.height)
    }

    /// Smallest rect containing both points
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self::from_ltrb(
            p1.x.min(p2.x),
            p1.y.min(p2.y),
            p1.x.max(p2.x),
            p1.y.max(p2.y),
        )
    }

    /// Bounding box of a circle
    pub fn from_circle(center: Point, radius: f32) -> Self {
        let r = radius.abs();
        Self::from_ltrb(center.x - r, center.y - r, center.x + r, center.y + r)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Swap edges so that `left <= right` and `top <= bottom`
    pub fn sorted(&self) -> Self {
        Self::from_ltrb(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// True when `other` lies entirely inside this rect. Empty rects contain
    /// nothing and are contained by nothing.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Overlap of two rects, or `None` when it is empty
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let result = Rect::from_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!result.is_empty()).then_some(result)
    }

    /// Smallest rect containing both; empty operands are ignored
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::from_ltrb(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Grow the rect on all sides (negative values shrink it)
    pub fn outset(&self, dx: f32, dy: f32) -> Self {
        Self::from_ltrb(
            self.left - dx,
            self.top - dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Expand edges outward to whole numbers
    pub fn round_out(&self) -> Self {
        Self::from_ltrb(
            self.left.floor(),
            self.top.floor(),
            self.right.ceil(),
            self.bottom.ceil(),
        )
    }
}

/// Corner radius for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius::uniform(0.0);

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn max(&self) -> f32 {
        self.top_left
            .max(self.top_right)
            .max(self.bottom_right)
            .max(self.bottom_left)
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

/// A rounded rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct RRect {
    pub rect: Rect,
    pub radius: CornerRadius,
}

impl RRect {
    pub fn new(rect: Rect, radius: impl Into<CornerRadius>) -> Self {
        Self {
            rect: rect.sorted(),
            radius: radius.into(),
        }
    }

    /// Elliptical corners are approximated by the larger of the two radii
    pub fn from_rect_xy(rect: Rect, rx: f32, ry: f32) -> Self {
        Self::new(rect, rx.abs().max(ry.abs()))
    }

    /// The rounding never reaches outside the rect, so its bounds are the rect
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    pub fn is_rect(&self) -> bool {
        self.radius.max() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_construction() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r, Rect::from_ltrb(10.0, 20.0, 40.0, 60.0));
        assert_eq!(r.width(), 30.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.center(), Point::new(25.0, 40.0));

        let p = Rect::from_points(Point::new(5.0, 9.0), Point::new(1.0, 3.0));
        assert_eq!(p, Rect::from_ltrb(1.0, 3.0, 5.0, 9.0));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::from_ltrb(10.0, 10.0, 10.0, 20.0).is_empty());
        assert!(Rect::from_ltrb(f32::NAN, 0.0, 10.0, 10.0).is_empty());
        assert!(!Rect::from_ltrb(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::from_ltrb(40.0, 20.0, 70.0, 50.0);
        let b = Rect::from_ltrb(30.0, 30.0, 60.0, 60.0);
        assert_eq!(a.intersect(&b), Some(Rect::from_ltrb(40.0, 30.0, 60.0, 50.0)));

        let far = Rect::from_ltrb(100.0, 100.0, 110.0, 110.0);
        assert_eq!(a.intersect(&far), None);

        // Touching edges do not overlap
        let touching = Rect::from_ltrb(70.0, 20.0, 80.0, 50.0);
        assert_eq!(a.intersect(&touching), None);
    }

    #[test]
    fn test_rect_union_ignores_empty() {
        let a = Rect::from_ltrb(10.0, 10.0, 20.0, 20.0);
        let b = Rect::from_ltrb(30.0, 30.0, 70.0, 70.0);
        assert_eq!(a.union(&b), Rect::from_ltrb(10.0, 10.0, 70.0, 70.0));
        assert_eq!(Rect::EMPTY.union(&a), a);
        assert_eq!(a.union(&Rect::EMPTY), a);
        assert_eq!(a.union(&Rect::from_ltrb(100.0, 0.0, 100.0, 5.0)), a);
    }

    #[test]
    fn test_rect_containment() {
        let outer = Rect::from_ltrb(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::from_ltrb(10.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&Rect::EMPTY));
        assert!(outer.contains(Point::new(0.0, 0.0)));
        assert!(!outer.contains(Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_rect_outset_and_round_out() {
        let r = Rect::from_ltrb(1.5, 2.5, 3.5, 4.5).outset(1.0, 2.0);
        assert_eq!(r, Rect::from_ltrb(0.5, 0.5, 4.5, 6.5));
        assert_eq!(r.round_out(), Rect::from_ltrb(0.0, 0.0, 5.0, 7.0));
    }

    #[test]
    fn test_rrect_bounds() {
        let rr = RRect::from_rect_xy(Rect::from_ltrb(20.0, 10.0, 0.0, 0.0), 3.0, 5.0);
        assert_eq!(rr.bounds(), Rect::from_ltrb(0.0, 0.0, 20.0, 10.0));
        assert_eq!(rr.radius, CornerRadius::uniform(5.0));
        assert!(!rr.is_rect());
        assert!(RRect::new(rr.rect, 0.0).is_rect());
    }
}
