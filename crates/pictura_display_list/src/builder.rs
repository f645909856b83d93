//! Display list builder - accumulation state for one recording session

use std::mem::size_of;

use pictura_core::Rect;

use crate::display_list::DisplayList;
use crate::op::{DisplayOp, OpPayload};

/// Storage grows in whole pages of this many encoded bytes
pub const PAGE_SIZE: usize = 4096;

/// Handle to one recorded op
///
/// Ops are only ever appended, so an index handed out while recording keeps
/// naming the same op after any amount of storage growth and after the
/// builder has become a [`DisplayList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpIndex(pub(crate) usize);

impl OpIndex {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Mutable state of one recording session
///
/// Owns the op storage and the running bounds. A builder is consumed exactly
/// once by [`build`](Self::build); dropping it instead discards the ops.
#[derive(Debug)]
pub struct DisplayListBuilder {
    ops: Vec<DisplayOp>,
    bytes_used: usize,
    bytes_reserved: usize,
    bounds: Rect,
    cull_rect: Rect,
    last_op: Option<OpIndex>,
}

impl DisplayListBuilder {
    pub fn new(cull_rect: Rect) -> Self {
        Self::with_capacity(cull_rect, 0)
    }

    /// Builder with at least `bytes` of encoded storage reserved up front
    pub fn with_capacity(cull_rect: Rect, bytes: usize) -> Self {
        let mut builder = Self {
            ops: Vec::new(),
            bytes_used: 0,
            bytes_reserved: 0,
            bounds: Rect::EMPTY,
            cull_rect,
            last_op: None,
        };
        if bytes > 0 {
            builder.grow(bytes);
        }
        builder
    }

    /// Append one op. This is the only way ops enter the storage.
    pub fn push_op<T: OpPayload>(&mut self, op: T) -> OpIndex {
        let size = T::ENCODED_SIZE;
        if self.bytes_used + size > self.bytes_reserved {
            self.grow(size);
        }

        let index = OpIndex(self.ops.len());
        self.ops.push(op.into());
        self.bytes_used += size;
        self.last_op = Some(index);
        index
    }

    /// Reserve the next page multiple that fits `needed` more bytes
    fn grow(&mut self, needed: usize) {
        let target = (self.bytes_used + needed).next_multiple_of(PAGE_SIZE);
        let extra_slots = ((target - self.bytes_reserved) / size_of::<DisplayOp>()).max(1);
        self.ops.reserve(extra_slots);
        tracing::trace!(
            from = self.bytes_reserved,
            to = target,
            ops = self.ops.len(),
            "display list storage grown"
        );
        self.bytes_reserved = target;
    }

    /// Union a device-space rect into the running bounds
    pub fn accumulate_bounds(&mut self, device_bounds: Rect) {
        self.bounds = self.bounds.union(&device_bounds);
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cull_rect(&self) -> Rect {
        self.cull_rect
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    pub fn bytes_used(&self) -> usize {
        self.bytes_used
    }

    pub fn bytes_reserved(&self) -> usize {
        self.bytes_reserved
    }

    pub fn last_op_index(&self) -> Option<OpIndex> {
        self.last_op
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn op(&self, index: OpIndex) -> Option<&DisplayOp> {
        self.ops.get(index.0)
    }

    /// Move the storage, counters and bounds into an immutable display list
    pub fn build(self) -> DisplayList {
        tracing::debug!(
            ops = self.ops.len(),
            bytes = self.bytes_used,
            bounds = ?self.bounds,
            "display list built"
        );
        DisplayList::new(self.ops, self.bytes_used, self.bounds, self.cull_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{DrawRectOp, SaveOp, TranslateOp};
    use pictura_core::Paint;

    #[test]
    fn test_first_push_reserves_one_page() {
        let mut builder = DisplayListBuilder::new(Rect::EMPTY);
        assert_eq!(builder.bytes_reserved(), 0);
        assert_eq!(builder.last_op_index(), None);

        let index = builder.push_op(SaveOp);
        assert_eq!(index.index(), 0);
        assert_eq!(builder.bytes_reserved(), PAGE_SIZE);
        assert_eq!(builder.bytes_used(), SaveOp::ENCODED_SIZE);
        assert_eq!(builder.last_op_index(), Some(index));
    }

    #[test]
    fn test_growth_stays_page_aligned_and_never_shrinks() {
        let mut builder = DisplayListBuilder::new(Rect::EMPTY);
        let mut last_reserved = 0;
        for i in 0..2000 {
            builder.push_op(TranslateOp {
                dx: i as f32,
                dy: 0.0,
            });
            assert!(builder.bytes_used() <= builder.bytes_reserved());
            assert_eq!(builder.bytes_reserved() % PAGE_SIZE, 0);
            assert!(builder.bytes_reserved() >= last_reserved);
            last_reserved = builder.bytes_reserved();
        }
        assert_eq!(builder.op_count(), 2000);
        assert!(builder.bytes_reserved() > PAGE_SIZE);
    }

    #[test]
    fn test_with_capacity_preallocates() {
        let builder = DisplayListBuilder::with_capacity(Rect::EMPTY, 5000);
        assert_eq!(builder.bytes_reserved(), 2 * PAGE_SIZE);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_bounds_only_change_when_accumulated() {
        let mut builder = DisplayListBuilder::new(Rect::from_ltrb(0.0, 0.0, 100.0, 100.0));
        builder.push_op(DrawRectOp {
            rect: Rect::from_ltrb(0.0, 0.0, 10.0, 10.0),
            paint: Paint::new(),
        });
        assert!(builder.bounds().is_empty());

        builder.accumulate_bounds(Rect::from_ltrb(1.0, 2.0, 3.0, 4.0));
        builder.accumulate_bounds(Rect::EMPTY);
        assert_eq!(builder.bounds(), Rect::from_ltrb(1.0, 2.0, 3.0, 4.0));
    }
}
