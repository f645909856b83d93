//! Save/restore bookkeeping shared by canvas implementations
//!
//! Every canvas has to answer two questions at any point: what is the total
//! transform, and what device-space rectangle can still receive pixels.
//! `CanvasState` keeps one entry per save level and narrows the clip bounds
//! conservatively as clips are applied.

use smallvec::{smallvec, SmallVec};

use crate::canvas::ClipOp;
use crate::geometry::Rect;
use crate::matrix::Matrix;
use crate::path::Path;

#[derive(Clone, Copy, Debug, PartialEq)]
struct StateEntry {
    matrix: Matrix,
    clip_bounds: Rect,
}

#[derive(Clone, Debug)]
pub struct CanvasState {
    stack: SmallVec<[StateEntry; 8]>,
}

impl CanvasState {
    /// Fresh state with an identity transform and `clip` as device clip
    pub fn new(clip: Rect) -> Self {
        Self {
            stack: smallvec![StateEntry {
                matrix: Matrix::IDENTITY,
                clip_bounds: clip,
            }],
        }
    }

    /// Drop every save level and start over with `clip`
    pub fn reset(&mut self, clip: Rect) {
        *self = Self::new(clip);
    }

    fn top(&self) -> &StateEntry {
        // The base entry is never popped
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut StateEntry {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Number of entries on the stack; 1 when nothing is saved
    pub fn save_count(&self) -> usize {
        self.stack.len()
    }

    pub fn save(&mut self) {
        let entry = *self.top();
        self.stack.push(entry);
    }

    /// Pops one level. Returns false, leaving the state untouched, when only
    /// the base entry remains.
    pub fn restore(&mut self) -> bool {
        if self.stack.len() <= 1 {
            tracing::warn!("restore without matching save ignored");
            return false;
        }
        self.stack.pop();
        true
    }

    /// Pops levels until `save_count() == count` (never below 1)
    pub fn restore_to_count(&mut self, count: usize) {
        let target = count.max(1);
        self.stack.truncate(target.min(self.stack.len()));
    }

    pub fn matrix(&self) -> Matrix {
        self.top().matrix
    }

    pub fn device_clip_bounds(&self) -> Rect {
        self.top().clip_bounds
    }

    /// Pre-concatenate: `m` applies to local coordinates before the current
    /// transform
    pub fn concat(&mut self, m: &Matrix) {
        let top = self.top_mut();
        top.matrix = top.matrix.concat(m);
    }

    pub fn set_matrix(&mut self, m: &Matrix) {
        self.top_mut().matrix = *m;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(&Matrix::translate(dx, dy));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&Matrix::scale(sx, sy));
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.concat(&Matrix::rotate_degrees(degrees));
    }

    pub fn rotate_about(&mut self, degrees: f32, px: f32, py: f32) {
        self.concat(&Matrix::rotate_degrees_about(degrees, px, py));
    }

    pub fn skew(&mut self, sx: f32, sy: f32) {
        self.concat(&Matrix::skew(sx, sy));
    }

    pub fn reset_matrix(&mut self) {
        self.set_matrix(&Matrix::IDENTITY);
    }

    /// Intersect clips narrow the bounds to the mapped rect; difference clips
    /// can only remove pixels in ways a rectangle cannot express, so the
    /// bounds are kept as they are.
    pub fn clip_rect(&mut self, rect: Rect, op: ClipOp) {
        if op == ClipOp::Difference {
            return;
        }
        let top = self.top_mut();
        let device = top.matrix.map_rect(rect.sorted());
        top.clip_bounds = top.clip_bounds.intersect(&device).unwrap_or(Rect::EMPTY);
    }

    /// Inverse-filled paths cover everything outside their outline, so like
    /// difference clips they leave the bounds unchanged.
    pub fn clip_path(&mut self, path: &Path, op: ClipOp) {
        if path.fill_type().is_inverse() {
            return;
        }
        self.clip_rect(path.bounds(), op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hundred() -> Rect {
        Rect::from_ltrb(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_clip_narrows_and_restores() {
        let mut state = CanvasState::new(hundred());
        state.save();
        state.clip_rect(Rect::from_ltrb(40.0, 20.0, 70.0, 50.0), ClipOp::Intersect);
        assert_eq!(
            state.device_clip_bounds(),
            Rect::from_ltrb(40.0, 20.0, 70.0, 50.0)
        );
        assert!(state.restore());
        assert_eq!(state.device_clip_bounds(), hundred());
    }

    #[test]
    fn test_clip_is_mapped_through_matrix() {
        let mut state = CanvasState::new(hundred());
        state.translate(10.0, 10.0);
        state.clip_rect(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), ClipOp::Intersect);
        assert_eq!(
            state.device_clip_bounds(),
            Rect::from_ltrb(10.0, 10.0, 30.0, 30.0)
        );
    }

    #[test]
    fn test_disjoint_clip_is_empty() {
        let mut state = CanvasState::new(hundred());
        state.clip_rect(Rect::from_ltrb(200.0, 200.0, 300.0, 300.0), ClipOp::Intersect);
        assert!(state.device_clip_bounds().is_empty());
    }

    #[test]
    fn test_difference_and_inverse_clips_keep_bounds() {
        let mut state = CanvasState::new(hundred());
        state.clip_rect(Rect::from_ltrb(0.0, 0.0, 50.0, 50.0), ClipOp::Difference);
        let inverse = Path::rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0))
            .with_fill_type(crate::path::FillType::InverseWinding);
        state.clip_path(&inverse, ClipOp::Intersect);
        assert_eq!(state.device_clip_bounds(), hundred());
    }

    #[test]
    fn test_restore_never_pops_base() {
        let mut state = CanvasState::new(hundred());
        assert!(!state.restore());
        assert_eq!(state.save_count(), 1);

        state.save();
        state.save();
        state.save();
        state.translate(5.0, 5.0);
        state.restore_to_count(2);
        assert_eq!(state.save_count(), 2);
        assert!(state.matrix().is_identity());

        state.restore_to_count(0);
        assert_eq!(state.save_count(), 1);
    }
}
