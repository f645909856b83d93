//! Test canvas that logs every call it receives

#![allow(dead_code)]

use std::sync::Arc;

use pictura_core::{
    Canvas, CanvasState, ClipOp, Color, Font, GlyphId, Image, Matrix, Paint, Path, Point, RRect,
    Rect, SamplingOptions, TextBlob,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Save,
    SaveLayer,
    Restore,
    RestoreToCount(usize),
    Translate(f32, f32),
    Scale(f32, f32),
    Rotate(f32),
    Skew(f32, f32),
    Concat,
    SetMatrix,
    ResetMatrix,
    ClipRect(Rect),
    ClipPath,
    Line(Color),
    Circle(Color),
    Arc(Color),
    Oval(Color),
    Rect(Rect, Color),
    RRect(Color),
    RoundRect(Color),
    Path(Color),
    Paint(Color),
    TextBlob(f32, f32),
    Image(Rect),
    Glyphs(usize),
}

pub struct LogCanvas {
    pub calls: Vec<Call>,
    state: CanvasState,
}

impl LogCanvas {
    pub fn new(clip: Rect) -> Self {
        Self {
            calls: Vec::new(),
            state: CanvasState::new(clip),
        }
    }

    pub fn draw_calls(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| {
                !matches!(
                    call,
                    Call::Save
                        | Call::Restore
                        | Call::RestoreToCount(_)
                        | Call::Translate(..)
                        | Call::Scale(..)
                        | Call::Rotate(_)
                        | Call::Skew(..)
                        | Call::Concat
                        | Call::SetMatrix
                        | Call::ResetMatrix
                        | Call::ClipRect(_)
                        | Call::ClipPath
                )
            })
            .collect()
    }
}

impl Canvas for LogCanvas {
    fn save(&mut self) {
        self.calls.push(Call::Save);
        self.state.save();
    }

    fn save_layer(&mut self, _bounds: Option<Rect>, _paint: Option<&Paint>) {
        self.calls.push(Call::SaveLayer);
        self.state.save();
    }

    fn restore(&mut self) {
        self.calls.push(Call::Restore);
        self.state.restore();
    }

    fn restore_to_count(&mut self, count: usize) {
        self.calls.push(Call::RestoreToCount(count));
        self.state.restore_to_count(count);
    }

    fn save_count(&self) -> usize {
        self.state.save_count()
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.calls.push(Call::Translate(dx, dy));
        self.state.translate(dx, dy);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.calls.push(Call::Scale(sx, sy));
        self.state.scale(sx, sy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.calls.push(Call::Rotate(degrees));
        self.state.rotate(degrees);
    }

    fn rotate_about(&mut self, degrees: f32, px: f32, py: f32) {
        self.calls.push(Call::Rotate(degrees));
        self.state.rotate_about(degrees, px, py);
    }

    fn skew(&mut self, sx: f32, sy: f32) {
        self.calls.push(Call::Skew(sx, sy));
        self.state.skew(sx, sy);
    }

    fn concat(&mut self, matrix: &Matrix) {
        self.calls.push(Call::Concat);
        self.state.concat(matrix);
    }

    fn set_matrix(&mut self, matrix: &Matrix) {
        self.calls.push(Call::SetMatrix);
        self.state.set_matrix(matrix);
    }

    fn reset_matrix(&mut self) {
        self.calls.push(Call::ResetMatrix);
        self.state.reset_matrix();
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOp) {
        self.calls.push(Call::ClipRect(rect));
        self.state.clip_rect(rect, op);
    }

    fn clip_path(&mut self, path: &Path, op: ClipOp) {
        self.calls.push(Call::ClipPath);
        self.state.clip_path(path, op);
    }

    fn total_matrix(&self) -> Matrix {
        self.state.matrix()
    }

    fn device_clip_bounds(&self) -> Rect {
        self.state.device_clip_bounds()
    }

    fn draw_line(&mut self, _p0: Point, _p1: Point, paint: &Paint) {
        self.calls.push(Call::Line(paint.color));
    }

    fn draw_circle(&mut self, _center: Point, _radius: f32, paint: &Paint) {
        self.calls.push(Call::Circle(paint.color));
    }

    fn draw_arc(&mut self, _oval: Rect, _start: f32, _sweep: f32, _center: bool, paint: &Paint) {
        self.calls.push(Call::Arc(paint.color));
    }

    fn draw_oval(&mut self, _oval: Rect, paint: &Paint) {
        self.calls.push(Call::Oval(paint.color));
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.calls.push(Call::Rect(rect, paint.color));
    }

    fn draw_rrect(&mut self, _rrect: &RRect, paint: &Paint) {
        self.calls.push(Call::RRect(paint.color));
    }

    fn draw_round_rect(&mut self, _rect: Rect, _rx: f32, _ry: f32, paint: &Paint) {
        self.calls.push(Call::RoundRect(paint.color));
    }

    fn draw_path(&mut self, _path: &Path, paint: &Paint) {
        self.calls.push(Call::Path(paint.color));
    }

    fn draw_paint(&mut self, paint: &Paint) {
        self.calls.push(Call::Paint(paint.color));
    }

    fn draw_text_blob(&mut self, _blob: &TextBlob, x: f32, y: f32, _paint: &Paint) {
        self.calls.push(Call::TextBlob(x, y));
    }

    fn draw_image(
        &mut self,
        _image: &Arc<Image>,
        _src: Rect,
        dst: Rect,
        _sampling: SamplingOptions,
        _paint: Option<&Paint>,
    ) {
        self.calls.push(Call::Image(dst));
    }

    fn draw_glyphs(&mut self, glyphs: &[GlyphId], _positions: &[Point], _font: &Font, _paint: &Paint) {
        self.calls.push(Call::Glyphs(glyphs.len()));
    }
}
