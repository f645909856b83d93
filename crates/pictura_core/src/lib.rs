//! Pictura core graphics types
//!
//! The value and handle types a 2D canvas consumes, and the canvas itself as
//! an abstract capability.
//!
//! # Contents
//!
//! - Geometry: points, rectangles, rounded rectangles, affine matrices
//! - Paint: color, stroke parameters, shaders, mask and image filters
//! - Paths, images, fonts and text blobs
//! - The [`Canvas`] trait and [`CanvasState`], the save/restore bookkeeping
//!   that answers "what is the current transform and clip"

pub mod canvas;
pub mod color;
pub mod geometry;
pub mod image;
pub mod matrix;
pub mod paint;
pub mod path;
pub mod shader;
pub mod state;
pub mod text;

pub use canvas::{Canvas, CanvasExt, ClipOp};
pub use color::Color;
pub use geometry::{CornerRadius, Point, RRect, Rect, Size};
pub use image::{FilterMode, Image, ImageId, MipmapMode, SamplingOptions};
pub use matrix::Matrix;
pub use paint::{BlendMode, ImageFilter, MaskFilter, Paint, PaintStyle, StrokeCap, StrokeJoin};
pub use path::{FillType, Path, PathBuilder, PathCommand};
pub use shader::{GradientStop, Shader};
pub use state::CanvasState;
pub use text::{Font, GlyphId, GlyphRun, TextBlob};
