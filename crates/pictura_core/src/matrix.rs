//! 2D affine transformation

use crate::geometry::{Point, Rect};

/// Sines and cosines this close to zero are snapped so that quarter turns
/// map axis-aligned rects to axis-aligned rects exactly.
const NEARLY_ZERO: f32 = 1.0 / 4096.0;

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Matrix {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self {
            elements: [a, b, c, d, tx, ty],
        }
    }

    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin; positive angles turn +x toward +y
    pub fn rotate_degrees(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let snap = |v: f32| if v.abs() <= NEARLY_ZERO { 0.0 } else { v };
        let (s, c) = (snap(radians.sin()), snap(radians.cos()));
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Rotation about `(px, py)`
    pub fn rotate_degrees_about(degrees: f32, px: f32, py: f32) -> Self {
        Self::translate(px, py)
            .concat(&Self::rotate_degrees(degrees))
            .concat(&Self::translate(-px, -py))
    }

    /// `x' = x + kx * y`, `y' = ky * x + y`
    pub const fn skew(kx: f32, ky: f32) -> Self {
        Self::new(1.0, ky, kx, 1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when the matrix only scales and translates
    pub fn is_scale_translate(&self) -> bool {
        self.elements[1] == 0.0 && self.elements[2] == 0.0
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn concat(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Matrix::new(
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * tx2 + c1 * ty2 + tx1,
            b1 * tx2 + d1 * ty2 + ty1,
        )
    }

    pub fn invert(&self) -> Option<Matrix> {
        let [a, b, c, d, tx, ty] = self.elements;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Matrix::new(
            d * inv,
            -b * inv,
            -c * inv,
            a * inv,
            (c * ty - d * tx) * inv,
            (b * tx - a * ty) * inv,
        ))
    }

    pub fn map_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Bounds of the four mapped corners
    pub fn map_rect(&self, rect: Rect) -> Rect {
        if self.is_scale_translate() {
            let [sx, _, _, sy, tx, ty] = self.elements;
            return Rect::from_ltrb(
                rect.left * sx + tx,
                rect.top * sy + ty,
                rect.right * sx + tx,
                rect.bottom * sy + ty,
            )
            .sorted();
        }

        let corners = [
            self.map_point(Point::new(rect.left, rect.top)),
            self.map_point(Point::new(rect.right, rect.top)),
            self.map_point(Point::new(rect.right, rect.bottom)),
            self.map_point(Point::new(rect.left, rect.bottom)),
        ];
        let mut mapped = Rect::from_points(corners[0], corners[1]);
        for corner in &corners[2..] {
            mapped.left = mapped.left.min(corner.x);
            mapped.top = mapped.top.min(corner.y);
            mapped.right = mapped.right.max(corner.x);
            mapped.bottom = mapped.bottom.max(corner.y);
        }
        mapped
    }
}
