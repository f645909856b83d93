//! Path building and representation

use smallvec::SmallVec;

use crate::geometry::{Point, RRect, Rect};
use crate::matrix::Matrix;

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        control: Point,
        end: Point,
    },
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Circular arc; angles in degrees
    ArcTo {
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
    },
    Close,
}

/// How the interior of a path is determined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillType {
    #[default]
    Winding,
    EvenOdd,
    /// Everything outside the winding interior
    InverseWinding,
    /// Everything outside the even-odd interior
    InverseEvenOdd,
}

impl FillType {
    pub fn is_inverse(&self) -> bool {
        matches!(self, FillType::InverseWinding | FillType::InverseEvenOdd)
    }
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
    fill_type: FillType,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(rect: Rect) -> Self {
        PathBuilder::new()
            .move_to(rect.left, rect.top)
            .line_to(rect.right, rect.top)
            .line_to(rect.right, rect.bottom)
            .line_to(rect.left, rect.bottom)
            .close()
            .build()
    }

    /// Ellipse inscribed in `oval`, as four cubics
    pub fn oval(oval: Rect) -> Self {
        // Magic number for cubic Bézier circle approximation
        const K: f32 = 0.552_284_8;
        let oval = oval.sorted();
        let c = oval.center();
        let (rx, ry) = (oval.width() / 2.0, oval.height() / 2.0);
        let (kx, ky) = (rx * K, ry * K);

        PathBuilder::new()
            .move_to(c.x + rx, c.y)
            .cubic_to(c.x + rx, c.y + ky, c.x + kx, c.y + ry, c.x, c.y + ry)
            .cubic_to(c.x - kx, c.y + ry, c.x - rx, c.y + ky, c.x - rx, c.y)
            .cubic_to(c.x - rx, c.y - ky, c.x - kx, c.y - ry, c.x, c.y - ry)
            .cubic_to(c.x + kx, c.y - ry, c.x + rx, c.y - ky, c.x + rx, c.y)
            .close()
            .build()
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::oval(Rect::from_circle(center, radius))
    }

    pub fn rrect(rrect: &RRect) -> Self {
        if rrect.is_rect() {
            return Self::rect(rrect.rect);
        }
        let r = rrect.rect;
        let radius = rrect.radius;
        let limit = r.width().min(r.height()) / 2.0;
        let [tl, tr, br, bl] = [
            radius.top_left,
            radius.top_right,
            radius.bottom_right,
            radius.bottom_left,
        ]
        .map(|v| v.clamp(0.0, limit));

        PathBuilder::new()
            .move_to(r.left + tl, r.top)
            .line_to(r.right - tr, r.top)
            .quad_to(r.right, r.top, r.right, r.top + tr)
            .line_to(r.right, r.bottom - br)
            .quad_to(r.right, r.bottom, r.right - br, r.bottom)
            .line_to(r.left + bl, r.bottom)
            .quad_to(r.left, r.bottom, r.left, r.bottom - bl)
            .line_to(r.left, r.top + tl)
            .quad_to(r.left, r.top, r.left + tl, r.top)
            .close()
            .build()
    }

    pub fn line(from: Point, to: Point) -> Self {
        PathBuilder::new()
            .move_to(from.x, from.y)
            .line_to(to.x, to.y)
            .build()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    pub fn set_fill_type(&mut self, fill_type: FillType) {
        self.fill_type = fill_type;
    }

    pub fn with_fill_type(mut self, fill_type: FillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    /// Control-point bounds; curves never leave the hull of their points,
    /// so this is conservative. Arcs contribute their full circle.
    pub fn bounds(&self) -> Rect {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut include = |p: Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::QuadTo { control, end } => {
                    include(control);
                    include(end);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                }
                PathCommand::ArcTo { center, radius, .. } => {
                    let r = Rect::from_circle(center, radius);
                    include(r.origin());
                    include(Point::new(r.right, r.bottom));
                }
                PathCommand::Close => {}
            }
        }

        let bounds = Rect::from_ltrb(min_x, min_y, max_x, max_y);
        if bounds.is_finite() {
            bounds
        } else {
            Rect::EMPTY
        }
    }

    /// Copy of this path with every point mapped through `matrix`. Arcs keep
    /// their radius scaled by the larger axis scale.
    pub fn transformed(&self, matrix: &Matrix) -> Self {
        let [a, b, c, d, _, _] = matrix.elements;
        let radius_scale = (a * a + b * b).sqrt().max((c * c + d * d).sqrt());
        let map = |p: Point| matrix.map_point(p);
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(map(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(map(p)),
                PathCommand::QuadTo { control, end } => PathCommand::QuadTo {
                    control: map(control),
                    end: map(end),
                },
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => PathCommand::CubicTo {
                    control1: map(control1),
                    control2: map(control2),
                    end: map(end),
                },
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    sweep_angle,
                } => PathCommand::ArcTo {
                    center: map(center),
                    radius: radius * radius_scale,
                    start_angle,
                    sweep_angle,
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self {
            commands,
            fill_type: self.fill_type,
        }
    }
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self { path: Path::new() }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.path.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.path.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.path.commands.push(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            end: Point::new(x, y),
        });
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.path.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end: Point::new(x, y),
        });
        self
    }

    pub fn arc_to(mut self, cx: f32, cy: f32, radius: f32, start: f32, sweep: f32) -> Self {
        self.path.commands.push(PathCommand::ArcTo {
            center: Point::new(cx, cy),
            radius,
            start_angle: start,
            sweep_angle: sweep,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn fill_type(mut self, fill_type: FillType) -> Self {
        self.path.fill_type = fill_type;
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
