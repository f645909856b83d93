//! Recording canvas - a Canvas that captures calls into a builder
//!
//! Every call appends one op through [`DisplayListBuilder::push_op`]. State
//! calls additionally update the canvas's own transform/clip bookkeeping;
//! drawing calls fold a conservative device-space extent into the builder's
//! running bounds:
//!
//! 1. local bounds of the primitive (unbounded draws use the clip instead)
//! 2. expanded by the paint's fast bounds
//! 3. mapped through the current transform
//! 4. intersected with the current device clip
//! 5. unioned into the running bounds

use std::sync::Arc;

use pictura_core::{
    Canvas, CanvasState, ClipOp, Font, GlyphId, Image, Matrix, Paint, Path, Point, RRect, Rect,
    SamplingOptions, TextBlob,
};

use crate::builder::{DisplayListBuilder, OpIndex};
use crate::op::*;

/// A canvas that records into a bound [`DisplayListBuilder`]
///
/// Calls made while no builder is bound are dropped.
#[derive(Debug)]
pub struct RecordingCanvas {
    builder: Option<DisplayListBuilder>,
    state: CanvasState,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            builder: None,
            state: CanvasState::new(Rect::EMPTY),
        }
    }

    /// Bind `builder`, installing its cull rect as the initial clip. Returns
    /// the previously bound builder, if any.
    pub fn bind(&mut self, builder: DisplayListBuilder) -> Option<DisplayListBuilder> {
        self.state.reset(builder.cull_rect());
        self.builder.replace(builder)
    }

    pub fn unbind(&mut self) -> Option<DisplayListBuilder> {
        self.state.reset(Rect::EMPTY);
        self.builder.take()
    }

    pub fn is_bound(&self) -> bool {
        self.builder.is_some()
    }

    pub fn builder(&self) -> Option<&DisplayListBuilder> {
        self.builder.as_ref()
    }

    /// Handle of the most recently recorded op
    pub fn last_op_index(&self) -> Option<OpIndex> {
        self.builder.as_ref().and_then(DisplayListBuilder::last_op_index)
    }

    fn push<T: OpPayload>(&mut self, op: T) -> bool {
        match self.builder.as_mut() {
            Some(builder) => {
                builder.push_op(op);
                true
            }
            None => {
                tracing::warn!(kind = ?T::KIND, "recording canvas used without a builder");
                false
            }
        }
    }

    /// Fold a primitive with local-space bounds `local` into the running bounds
    fn accumulate_local(&mut self, local: Rect, paint: Option<&Paint>) {
        let bounds = match paint {
            Some(paint) if !paint.can_compute_fast_bounds() => return self.accumulate_unbounded(),
            Some(paint) => paint.compute_fast_bounds(local),
            None => local,
        };
        self.accumulate_device(self.state.matrix().map_rect(bounds));
    }

    /// Stroke-only primitives: geometry without interior
    fn accumulate_stroke(&mut self, local: Rect, paint: &Paint) {
        if !paint.can_compute_fast_bounds() {
            return self.accumulate_unbounded();
        }
        let bounds = paint.compute_fast_stroke_bounds(local);
        self.accumulate_device(self.state.matrix().map_rect(bounds));
    }

    /// Draws whose extent is not cheaply knowable cover the whole clip
    fn accumulate_unbounded(&mut self) {
        self.accumulate_device(self.state.device_clip_bounds());
    }

    fn accumulate_device(&mut self, device: Rect) {
        let Some(visible) = device.intersect(&self.state.device_clip_bounds()) else {
            return;
        };
        if let Some(builder) = self.builder.as_mut() {
            builder.accumulate_bounds(visible);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        if self.push(SaveOp) {
            self.state.save();
        }
    }

    fn save_layer(&mut self, bounds: Option<Rect>, paint: Option<&Paint>) {
        if !self.push(SaveLayerOp {
            bounds,
            paint: paint.cloned(),
        }) {
            return;
        }
        // Only an image filter can put pixels on screen by itself; otherwise
        // the layer's content is bounded by the draws inside it.
        if let Some(paint) = paint.filter(|p| p.image_filter.is_some()) {
            match bounds {
                Some(bounds) => self.accumulate_local(bounds, Some(paint)),
                None => self.accumulate_unbounded(),
            }
        }
        self.state.save();
    }

    fn restore(&mut self) {
        if self.state.save_count() <= 1 {
            tracing::warn!("restore without matching save not recorded");
            return;
        }
        if self.push(RestoreOp) {
            self.state.restore();
        }
    }

    fn restore_to_count(&mut self, count: usize) {
        if self.push(RestoreToCountOp { count }) {
            self.state.restore_to_count(count);
        }
    }

    fn save_count(&self) -> usize {
        self.state.save_count()
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        if self.push(TranslateOp { dx, dy }) {
            self.state.translate(dx, dy);
        }
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        if self.push(ScaleOp { sx, sy }) {
            self.state.scale(sx, sy);
        }
    }

    fn rotate(&mut self, degrees: f32) {
        if self.push(RotateOp { degrees }) {
            self.state.rotate(degrees);
        }
    }

    fn rotate_about(&mut self, degrees: f32, px: f32, py: f32) {
        if self.push(RotateAboutOp { degrees, px, py }) {
            self.state.rotate_about(degrees, px, py);
        }
    }

    fn skew(&mut self, sx: f32, sy: f32) {
        if self.push(SkewOp { sx, sy }) {
            self.state.skew(sx, sy);
        }
    }

    fn concat(&mut self, matrix: &Matrix) {
        if self.push(ConcatOp { matrix: *matrix }) {
            self.state.concat(matrix);
        }
    }

    fn set_matrix(&mut self, matrix: &Matrix) {
        if self.push(SetMatrixOp { matrix: *matrix }) {
            self.state.set_matrix(matrix);
        }
    }

    fn reset_matrix(&mut self) {
        if self.push(ResetMatrixOp) {
            self.state.reset_matrix();
        }
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOp) {
        if self.push(ClipRectOp { rect, op }) {
            self.state.clip_rect(rect, op);
        }
    }

    fn clip_path(&mut self, path: &Path, op: ClipOp) {
        if self.push(ClipPathOp {
            path: path.clone(),
            op,
        }) {
            self.state.clip_path(path, op);
        }
    }

    fn total_matrix(&self) -> Matrix {
        self.state.matrix()
    }

    fn device_clip_bounds(&self) -> Rect {
        self.state.device_clip_bounds()
    }

    fn draw_line(&mut self, p0: Point, p1: Point, paint: &Paint) {
        if self.push(DrawLineOp {
            p0,
            p1,
            paint: paint.clone(),
        }) {
            self.accumulate_stroke(Rect::from_points(p0, p1), paint);
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        if self.push(DrawCircleOp {
            center,
            radius,
            paint: paint.clone(),
        }) {
            self.accumulate_local(Rect::from_circle(center, radius), Some(paint));
        }
    }

    fn draw_arc(
        &mut self,
        oval: Rect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
        paint: &Paint,
    ) {
        if self.push(DrawArcOp {
            oval,
            start_degrees,
            sweep_degrees,
            use_center,
            paint: paint.clone(),
        }) {
            // The whole oval is a safe stand-in for any arc of it
            self.accumulate_local(oval.sorted(), Some(paint));
        }
    }

    fn draw_oval(&mut self, oval: Rect, paint: &Paint) {
        if self.push(DrawOvalOp {
            oval,
            paint: paint.clone(),
        }) {
            self.accumulate_local(oval.sorted(), Some(paint));
        }
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        if self.push(DrawRectOp {
            rect,
            paint: paint.clone(),
        }) {
            self.accumulate_local(rect.sorted(), Some(paint));
        }
    }

    fn draw_rrect(&mut self, rrect: &RRect, paint: &Paint) {
        if self.push(DrawRRectOp {
            rrect: *rrect,
            paint: paint.clone(),
        }) {
            self.accumulate_local(rrect.bounds(), Some(paint));
        }
    }

    fn draw_round_rect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint) {
        if self.push(DrawRoundRectOp {
            rect,
            rx,
            ry,
            paint: paint.clone(),
        }) {
            self.accumulate_local(rect.sorted(), Some(paint));
        }
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        if !self.push(DrawPathOp {
            path: path.clone(),
            paint: paint.clone(),
        }) {
            return;
        }
        if path.fill_type().is_inverse() {
            self.accumulate_unbounded();
        } else {
            self.accumulate_local(path.bounds(), Some(paint));
        }
    }

    fn draw_paint(&mut self, paint: &Paint) {
        if self.push(DrawPaintOp {
            paint: paint.clone(),
        }) {
            self.accumulate_unbounded();
        }
    }

    fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint) {
        if self.push(DrawTextBlobOp {
            blob: blob.clone(),
            x,
            y,
            paint: paint.clone(),
        }) {
            if blob.bounds().is_empty() {
                return;
            }
            // One unit of slack for antialiasing at the glyph edges
            let local = blob.bounds().offset(x, y).outset(1.0, 1.0);
            self.accumulate_local(local, Some(paint));
        }
    }

    fn draw_image(
        &mut self,
        image: &Arc<Image>,
        src: Rect,
        dst: Rect,
        sampling: SamplingOptions,
        paint: Option<&Paint>,
    ) {
        if self.push(DrawImageOp {
            image: Arc::clone(image),
            src,
            dst,
            sampling,
            paint: paint.cloned(),
        }) {
            self.accumulate_local(dst.sorted(), paint);
        }
    }

    fn draw_glyphs(&mut self, glyphs: &[GlyphId], positions: &[Point], font: &Font, paint: &Paint) {
        let count = glyphs.len().min(positions.len());
        if self.push(DrawGlyphsOp {
            glyphs: glyphs[..count].to_vec(),
            positions: positions[..count].to_vec(),
            font: font.clone(),
            paint: paint.clone(),
        }) {
            self.accumulate_unbounded();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictura_core::{Color, ImageFilter, MaskFilter};

    fn bound_canvas(cull: Rect) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        canvas.bind(DisplayListBuilder::new(cull));
        canvas
    }

    fn bounds(canvas: &RecordingCanvas) -> Rect {
        canvas.builder().map(DisplayListBuilder::bounds).unwrap_or(Rect::EMPTY)
    }

    fn hundred() -> Rect {
        Rect::from_ltrb(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_bind_installs_cull_as_clip() {
        let canvas = bound_canvas(hundred());
        assert_eq!(canvas.device_clip_bounds(), hundred());
        assert!(canvas.total_matrix().is_identity());
        assert_eq!(canvas.save_count(), 1);
    }

    #[test]
    fn test_unbound_canvas_records_nothing() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0), &Paint::new());
        canvas.save();
        assert_eq!(canvas.save_count(), 1);
        assert!(canvas.last_op_index().is_none());
        assert!(canvas.unbind().is_none());
    }

    #[test]
    fn test_state_ops_never_touch_bounds() {
        let mut canvas = bound_canvas(hundred());
        canvas.save();
        canvas.translate(10.0, 10.0);
        canvas.scale(2.0, 2.0);
        canvas.rotate(45.0);
        canvas.clip_rect(Rect::from_ltrb(0.0, 0.0, 5.0, 5.0), ClipOp::Intersect);
        canvas.restore();
        assert!(bounds(&canvas).is_empty());
        assert_eq!(canvas.builder().map(|b| b.op_count()), Some(6));
    }

    #[test]
    fn test_transform_applies_to_bounds() {
        let mut canvas = bound_canvas(hundred());
        canvas.translate(10.0, 5.0);
        canvas.scale(2.0, 2.0);
        canvas.draw_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0), &Paint::new());
        assert_eq!(bounds(&canvas), Rect::from_ltrb(10.0, 5.0, 30.0, 25.0));
    }

    #[test]
    fn test_stroke_and_blur_expand_bounds() {
        let mut canvas = bound_canvas(hundred());
        let stroke = Paint::new()
            .stroked(4.0)
            .with_stroke_join(pictura_core::StrokeJoin::Round);
        canvas.draw_rect(Rect::from_ltrb(20.0, 20.0, 30.0, 30.0), &stroke);
        assert_eq!(bounds(&canvas), Rect::from_ltrb(18.0, 18.0, 32.0, 32.0));

        let blur = Paint::new().with_mask_filter(MaskFilter::Blur { sigma: 1.0 });
        canvas.draw_circle(Point::new(50.0, 50.0), 5.0, &blur);
        assert_eq!(bounds(&canvas), Rect::from_ltrb(18.0, 18.0, 58.0, 58.0));
    }

    #[test]
    fn test_draws_outside_clip_contribute_nothing() {
        let mut canvas = bound_canvas(hundred());
        canvas.draw_rect(Rect::from_ltrb(200.0, 200.0, 300.0, 300.0), &Paint::new());
        assert!(bounds(&canvas).is_empty());
        assert_eq!(canvas.builder().map(|b| b.op_count()), Some(1));
    }

    #[test]
    fn test_unbounded_filter_covers_clip() {
        let mut m = [0.0; 20];
        m[19] = 1.0;
        let paint = Paint::new().with_image_filter(ImageFilter::ColorMatrix(m));
        let mut canvas = bound_canvas(hundred());
        canvas.draw_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), &paint);
        assert_eq!(bounds(&canvas), hundred());
    }

    #[test]
    fn test_glyphs_use_clip_bounds() {
        let mut canvas = bound_canvas(hundred());
        canvas.clip_rect(Rect::from_ltrb(10.0, 10.0, 20.0, 20.0), ClipOp::Intersect);
        canvas.draw_glyphs(
            &[1, 2, 3],
            &[Point::new(0.0, 0.0), Point::new(5.0, 0.0)],
            &Font::default(),
            &Paint::new(),
        );
        assert_eq!(bounds(&canvas), Rect::from_ltrb(10.0, 10.0, 20.0, 20.0));

        // Mismatched arrays are truncated to the shorter one
        let index = canvas.last_op_index().unwrap();
        match canvas.builder().and_then(|b| b.op(index)) {
            Some(DisplayOp::DrawGlyphs(op)) => {
                assert_eq!(op.glyphs, vec![1, 2]);
                assert_eq!(op.positions.len(), 2);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_text_blob_is_offset_and_outset() {
        let blob = TextBlob::from_glyphs(Font::new("mono", 10.0), &[7], 10.0);
        let mut canvas = bound_canvas(hundred());
        canvas.draw_text_blob(&blob, 20.0, 50.0, &Paint::new());
        assert_eq!(bounds(&canvas), Rect::from_ltrb(19.0, 39.0, 31.0, 56.0));
    }

    #[test]
    fn test_empty_text_blob_adds_no_bounds() {
        let mut canvas = bound_canvas(hundred());
        canvas.draw_text_blob(&TextBlob::new(Vec::new()), 20.0, 50.0, &Paint::new());
        assert!(bounds(&canvas).is_empty());
        assert_eq!(canvas.builder().map(|b| b.op_count()), Some(1));
    }

    #[test]
    fn test_line_is_bounded_as_stroke() {
        let mut canvas = bound_canvas(hundred());
        canvas.draw_line(
            Point::new(10.0, 50.0),
            Point::new(90.0, 50.0),
            &Paint::new().stroked(2.0).with_stroke_join(pictura_core::StrokeJoin::Bevel),
        );
        assert_eq!(bounds(&canvas), Rect::from_ltrb(9.0, 49.0, 91.0, 51.0));
    }

    #[test]
    fn test_save_layer_bounds() {
        let mut canvas = bound_canvas(hundred());
        canvas.save_layer(None, Some(&Paint::from(Color::RED.with_alpha(0.5))));
        assert!(bounds(&canvas).is_empty());
        assert_eq!(canvas.save_count(), 2);

        let shadow = Paint::new().with_image_filter(ImageFilter::Offset { dx: 5.0, dy: 0.0 });
        canvas.save_layer(Some(Rect::from_ltrb(10.0, 10.0, 20.0, 20.0)), Some(&shadow));
        assert_eq!(bounds(&canvas), Rect::from_ltrb(15.0, 10.0, 25.0, 20.0));
        canvas.restore_to_count(1);
        assert_eq!(canvas.save_count(), 1);
    }

    #[test]
    fn test_restore_underflow_is_not_recorded() {
        let mut canvas = bound_canvas(hundred());
        canvas.restore();
        assert_eq!(canvas.builder().map(|b| b.op_count()), Some(0));
    }
}
