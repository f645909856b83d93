//! Gradient shaders carried by a paint

use crate::color::Color;
use crate::geometry::Point;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Source of per-pixel color for a paint
#[derive(Clone, Debug, PartialEq)]
pub enum Shader {
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: Point,
        radius: f32,
        stops: Vec<GradientStop>,
    },
    /// Angles in degrees
    SweepGradient {
        center: Point,
        start_angle: f32,
        end_angle: f32,
        stops: Vec<GradientStop>,
    },
}

impl Shader {
    /// Create a simple linear gradient between two colors
    pub fn linear(start: Point, end: Point, from: Color, to: Color) -> Self {
        Shader::LinearGradient {
            start,
            end,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    /// Create a simple radial gradient between two colors
    pub fn radial(center: Point, radius: f32, from: Color, to: Color) -> Self {
        Shader::RadialGradient {
            center,
            radius,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Shader::LinearGradient { stops, .. }
            | Shader::RadialGradient { stops, .. }
            | Shader::SweepGradient { stops, .. } => stops,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.stops().iter().all(|stop| stop.color.is_opaque())
    }
}
