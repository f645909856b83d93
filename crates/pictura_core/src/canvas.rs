//! Canvas - the drawing capability
//!
//! Anything that can receive draw calls implements [`Canvas`]: a raster
//! surface, a GPU command encoder, or a recorder that captures the calls for
//! later replay. Code written against `&mut dyn Canvas` works with all of
//! them.
//!
//! # Example
//!
//! ```ignore
//! fn paint(canvas: &mut dyn Canvas) {
//!     canvas.save();
//!     canvas.translate(10.0, 20.0);
//!     canvas.draw_rect(Rect::from_xywh(0.0, 0.0, 100.0, 50.0), &Color::BLUE.into());
//!     canvas.restore();
//! }
//! ```

use std::sync::Arc;

use crate::geometry::{Point, RRect, Rect};
use crate::image::{Image, SamplingOptions};
use crate::matrix::Matrix;
use crate::paint::Paint;
use crate::path::Path;
use crate::text::{Font, GlyphId, TextBlob};

/// How a clip shape combines with the current clip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClipOp {
    #[default]
    Intersect,
    Difference,
}

/// Unified drawing interface
///
/// Transform calls pre-concatenate onto the current matrix: the newest call
/// applies to local coordinates first. Angles are in degrees.
pub trait Canvas {
    // ─────────────────────────────────────────────────────────────────────────
    // State
    // ─────────────────────────────────────────────────────────────────────────

    fn save(&mut self);

    /// Save and redirect drawing into an offscreen layer that is composited
    /// with `paint` on the matching restore
    fn save_layer(&mut self, bounds: Option<Rect>, paint: Option<&Paint>);

    fn restore(&mut self);

    fn restore_to_count(&mut self, count: usize);

    fn save_count(&self) -> usize;

    fn translate(&mut self, dx: f32, dy: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    fn rotate(&mut self, degrees: f32);

    fn rotate_about(&mut self, degrees: f32, px: f32, py: f32);

    fn skew(&mut self, sx: f32, sy: f32);

    fn concat(&mut self, matrix: &Matrix);

    fn set_matrix(&mut self, matrix: &Matrix);

    fn reset_matrix(&mut self);

    fn clip_rect(&mut self, rect: Rect, op: ClipOp);

    fn clip_path(&mut self, path: &Path, op: ClipOp);

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    fn total_matrix(&self) -> Matrix;

    /// Conservative device-space bounds of the current clip
    fn device_clip_bounds(&self) -> Rect;

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    fn draw_line(&mut self, p0: Point, p1: Point, paint: &Paint);

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    fn draw_arc(
        &mut self,
        oval: Rect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
        paint: &Paint,
    );

    fn draw_oval(&mut self, oval: Rect, paint: &Paint);

    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    fn draw_rrect(&mut self, rrect: &RRect, paint: &Paint);

    fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint);

    fn draw_path(&mut self, path: &Path, paint: &Paint);

    /// Fill the entire clip with `paint`
    fn draw_paint(&mut self, paint: &Paint);

    fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint);

    /// Draw the `src` region of `image` scaled into `dst`
    fn draw_image(
        &mut self,
        image: &Arc<Image>,
        src: Rect,
        dst: Rect,
        sampling: SamplingOptions,
        paint: Option<&Paint>,
    );

    /// Draw glyphs at per-glyph positions; extra positions are ignored
    fn draw_glyphs(&mut self, glyphs: &[GlyphId], positions: &[Point], font: &Font, paint: &Paint);
}

/// Convenience methods for any Canvas
pub trait CanvasExt: Canvas {
    /// Run `f` between a save and its matching restore
    fn with_save<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let count = self.save_count();
        self.save();
        let result = f(self);
        self.restore_to_count(count);
        result
    }

    /// Draw the whole image into `dst`
    fn draw_image_rect(&mut self, image: &Arc<Image>, dst: Rect, sampling: SamplingOptions) {
        self.draw_image(image, image.bounds(), dst, sampling, None);
    }

    /// Draw the whole image at its natural size with its top-left at `(x, y)`
    fn draw_image_at(&mut self, image: &Arc<Image>, x: f32, y: f32, sampling: SamplingOptions) {
        let dst = image.bounds().offset(x, y);
        self.draw_image(image, image.bounds(), dst, sampling, None);
    }
}

// Blanket implementation for all Canvas implementers
impl<T: Canvas + ?Sized> CanvasExt for T {}
