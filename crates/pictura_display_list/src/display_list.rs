//! Display list - an immutable, replayable recording
//!
//! Produced by [`DisplayListBuilder::build`](crate::DisplayListBuilder::build).
//! The op sequence is fixed once built; the only mutation allowed is editing
//! the paint of an already-recorded drawing op in place, addressed by the
//! [`OpIndex`] handed out while recording.

use pictura_core::{Canvas, Paint, Rect};

use crate::builder::OpIndex;
use crate::op::DisplayOp;

#[derive(Debug)]
pub struct DisplayList {
    ops: Vec<DisplayOp>,
    byte_count: usize,
    bounds: Rect,
    cull_rect: Rect,
}

impl DisplayList {
    pub(crate) fn new(
        ops: Vec<DisplayOp>,
        byte_count: usize,
        bounds: Rect,
        cull_rect: Rect,
    ) -> Self {
        Self {
            ops,
            byte_count,
            bounds,
            cull_rect,
        }
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Total encoded size of all ops
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Conservative device-space extent of everything the list draws
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cull_rect(&self) -> Rect {
        self.cull_rect
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn op(&self, index: OpIndex) -> Option<&DisplayOp> {
        self.ops.get(index.0)
    }

    /// Ops in recording order with their handles
    pub fn iter(&self) -> impl Iterator<Item = (OpIndex, &DisplayOp)> + '_ {
        self.ops
            .iter()
            .enumerate()
            .map(|(i, op)| (OpIndex(i), op))
    }

    pub fn op_paint(&self, index: OpIndex) -> Option<&Paint> {
        self.op(index).and_then(DisplayOp::paint)
    }

    /// Paint of the op at `index`, for editing in place
    ///
    /// Returns `None` when `index` is out of range or the op carries no
    /// paint. Subsequent replays use the edited paint. Bounds are not
    /// recomputed.
    pub fn op_paint_mut(&mut self, index: OpIndex) -> Option<&mut Paint> {
        let len = self.ops.len();
        let Some(op) = self.ops.get_mut(index.0) else {
            tracing::debug!(index = index.0, len, "paint lookup out of range");
            return None;
        };
        op.paint_mut()
    }

    /// Replay every op, in order, onto `canvas`
    ///
    /// The canvas's save depth and transform are the same afterwards as
    /// before, whatever the recording left unbalanced.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let saved = canvas.save_count();
        canvas.save();
        // Recorded depths are relative to the recording canvas's base level,
        // which maps to the wrapper level here
        let base = canvas.save_count();
        for op in &self.ops {
            match op {
                DisplayOp::RestoreToCount(restore) => {
                    canvas.restore_to_count(restore.rebased(base))
                }
                op => op.dispatch(canvas),
            }
        }
        canvas.restore_to_count(saved);
        tracing::trace!(ops = self.ops.len(), "display list replayed");
    }

    /// Replay only if the list's bounds, mapped to the canvas, can touch its
    /// clip. Returns whether anything was replayed.
    pub fn draw_culled(&self, canvas: &mut dyn Canvas) -> bool {
        let device = canvas.total_matrix().map_rect(self.bounds);
        if device.intersect(&canvas.device_clip_bounds()).is_none() {
            tracing::trace!(bounds = ?self.bounds, "display list culled");
            return false;
        }
        self.draw(canvas);
        true
    }
}
