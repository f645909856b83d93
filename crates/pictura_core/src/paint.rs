//! Paint - how a draw call colors the pixels it touches
//!
//! Besides color and stroke parameters a paint can carry effects that spread
//! a draw beyond its geometry (stroke width, mask blur, image filters). The
//! [`Paint::compute_fast_bounds`] family accounts for all of them so that a
//! recorder can bound a draw without rasterizing it.

use crate::color::Color;
use crate::geometry::Rect;
use crate::shader::Shader;

/// Gaussian blurs are treated as reaching three standard deviations
const BLUR_SIGMA_SCALE: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
    StrokeAndFill,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Blend mode used when compositing a draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

/// Coverage filter applied to the shape before coloring
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskFilter {
    Blur { sigma: f32 },
}

impl MaskFilter {
    fn outset(&self) -> f32 {
        match self {
            MaskFilter::Blur { sigma } => sigma.abs() * BLUR_SIGMA_SCALE,
        }
    }
}

/// Filter applied to the rendered draw as an image
#[derive(Clone, Debug, PartialEq)]
pub enum ImageFilter {
    Blur {
        sigma_x: f32,
        sigma_y: f32,
    },
    /// Draws a blurred, offset, tinted copy beneath the source
    DropShadow {
        dx: f32,
        dy: f32,
        sigma_x: f32,
        sigma_y: f32,
        color: Color,
    },
    Offset {
        dx: f32,
        dy: f32,
    },
    /// 4x5 row-major color matrix (RGBA + offset)
    ColorMatrix([f32; 20]),
}

impl ImageFilter {
    /// A filter that can turn transparent pixels opaque has no knowable extent
    pub fn can_compute_fast_bounds(&self) -> bool {
        match self {
            ImageFilter::ColorMatrix(m) => m[19] <= 0.0,
            _ => true,
        }
    }

    /// Bounds of the filter output given bounds of its input
    pub fn map_bounds(&self, src: Rect) -> Rect {
        match *self {
            ImageFilter::Blur { sigma_x, sigma_y } => src.outset(
                sigma_x.abs() * BLUR_SIGMA_SCALE,
                sigma_y.abs() * BLUR_SIGMA_SCALE,
            ),
            ImageFilter::DropShadow {
                dx,
                dy,
                sigma_x,
                sigma_y,
                ..
            } => {
                let shadow = src.offset(dx, dy).outset(
                    sigma_x.abs() * BLUR_SIGMA_SCALE,
                    sigma_y.abs() * BLUR_SIGMA_SCALE,
                );
                src.union(&shadow)
            }
            ImageFilter::Offset { dx, dy } => src.offset(dx, dy),
            ImageFilter::ColorMatrix(_) => src,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    /// Zero means a hairline: one device pixel regardless of transform
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub stroke_miter: f32,
    pub anti_alias: bool,
    pub blend_mode: BlendMode,
    pub shader: Option<Shader>,
    pub mask_filter: Option<MaskFilter>,
    pub image_filter: Option<ImageFilter>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_miter: 4.0,
            anti_alias: true,
            blend_mode: BlendMode::SrcOver,
            shader: None,
            mask_filter: None,
            image_filter: None,
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::new().with_color(color)
    }
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    /// Switch to stroking with the given width
    pub fn stroked(mut self, width: f32) -> Self {
        self.style = PaintStyle::Stroke;
        self.stroke_width = width;
        self
    }

    pub fn with_stroke_cap(mut self, cap: StrokeCap) -> Self {
        self.stroke_cap = cap;
        self
    }

    pub fn with_stroke_join(mut self, join: StrokeJoin) -> Self {
        self.stroke_join = join;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn with_shader(mut self, shader: Shader) -> Self {
        self.shader = Some(shader);
        self
    }

    pub fn with_mask_filter(mut self, filter: MaskFilter) -> Self {
        self.mask_filter = Some(filter);
        self
    }

    pub fn with_image_filter(mut self, filter: ImageFilter) -> Self {
        self.image_filter = Some(filter);
        self
    }

    /// False when an attached effect makes the drawn extent unknowable
    pub fn can_compute_fast_bounds(&self) -> bool {
        self.image_filter
            .as_ref()
            .map_or(true, ImageFilter::can_compute_fast_bounds)
    }

    /// Conservative bounds of a draw of `raw` with this paint
    pub fn compute_fast_bounds(&self, raw: Rect) -> Rect {
        self.fast_bounds(raw, self.style != PaintStyle::Fill)
    }

    /// Like [`compute_fast_bounds`](Self::compute_fast_bounds) but always
    /// treating the geometry as stroked, for primitives such as lines that
    /// have no interior.
    pub fn compute_fast_stroke_bounds(&self, raw: Rect) -> Rect {
        self.fast_bounds(raw, true)
    }

    fn fast_bounds(&self, raw: Rect, stroked: bool) -> Rect {
        let mut bounds = raw.sorted();
        if stroked {
            let radius = self.stroke_radius();
            bounds = bounds.outset(radius, radius);
        }
        if let Some(mask) = &self.mask_filter {
            let outset = mask.outset();
            bounds = bounds.outset(outset, outset);
        }
        if let Some(filter) = &self.image_filter {
            bounds = filter.map_bounds(bounds);
        }
        bounds
    }

    /// How far a stroke can reach past its geometry
    fn stroke_radius(&self) -> f32 {
        let half = self.stroke_width.abs() / 2.0;
        if half == 0.0 {
            // hairline
            return 1.0;
        }
        let mut multiplier: f32 = 1.0;
        if self.stroke_join == StrokeJoin::Miter {
            multiplier = multiplier.max(self.stroke_miter);
        }
        if self.stroke_cap == StrokeCap::Square {
            multiplier = multiplier.max(std::f32::consts::SQRT_2);
        }
        half * multiplier
    }
}
