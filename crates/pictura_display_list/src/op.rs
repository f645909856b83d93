//! Recorded op catalog
//!
//! Every canvas call a display list can capture has a payload struct here and
//! a matching [`DisplayOp`] variant. State ops change the transform or clip;
//! drawing ops touch pixels and feed the recorder's bounds.
//!
//! Each op also has a nominal encoded size: a small header plus the payload
//! size rounded up to pointer alignment. Summing `encoded_size()` over a list
//! walks it exactly from 0 to its `byte_count()`.

use std::mem::{align_of, size_of};
use std::sync::Arc;

use pictura_core::{
    Canvas, ClipOp, Font, GlyphId, Image, Matrix, Paint, Path, Point, RRect, Rect,
    SamplingOptions, TextBlob,
};

/// Round `size` up to a multiple of pointer alignment
pub const fn align_to_pointer(size: usize) -> usize {
    let align = align_of::<usize>();
    (size + align - 1) & !(align - 1)
}

/// Tag and size prefix of one recorded op
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpHeader {
    pub kind: OpKind,
    pub payload_size: u32,
}

pub const OP_HEADER_SIZE: usize = align_to_pointer(size_of::<OpHeader>());

/// Behavior shared by every op payload
pub trait Op {
    /// Issue the canvas call this op was recorded from
    fn dispatch(&self, canvas: &mut dyn Canvas);

    fn paint(&self) -> Option<&Paint> {
        None
    }

    fn paint_mut(&mut self) -> Option<&mut Paint> {
        None
    }
}

/// A payload type that can be appended to a display list
pub trait OpPayload: Op + Into<DisplayOp> {
    const KIND: OpKind;

    /// Header plus aligned payload size
    const ENCODED_SIZE: usize = OP_HEADER_SIZE + align_to_pointer(size_of::<Self>());
}

macro_rules! define_ops {
    ($($kind:ident($payload:ident)),+ $(,)?) => {
        /// Tag identifying the kind of a recorded op
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum OpKind {
            $($kind),+
        }

        impl OpKind {
            pub const ALL: &'static [OpKind] = &[$(OpKind::$kind),+];
        }

        /// One recorded canvas call
        #[derive(Clone, Debug, PartialEq)]
        pub enum DisplayOp {
            $($kind($payload)),+
        }

        impl DisplayOp {
            pub fn kind(&self) -> OpKind {
                match self {
                    $(DisplayOp::$kind(_) => OpKind::$kind),+
                }
            }

            /// Header plus aligned payload size
            pub fn encoded_size(&self) -> usize {
                match self {
                    $(DisplayOp::$kind(_) => <$payload as OpPayload>::ENCODED_SIZE),+
                }
            }

            pub fn dispatch(&self, canvas: &mut dyn Canvas) {
                match self {
                    $(DisplayOp::$kind(op) => op.dispatch(canvas)),+
                }
            }

            /// The embedded paint, for kinds that carry one
            pub fn paint(&self) -> Option<&Paint> {
                match self {
                    $(DisplayOp::$kind(op) => op.paint()),+
                }
            }

            pub fn paint_mut(&mut self) -> Option<&mut Paint> {
                match self {
                    $(DisplayOp::$kind(op) => op.paint_mut()),+
                }
            }
        }

        $(
            impl OpPayload for $payload {
                const KIND: OpKind = OpKind::$kind;
            }

            impl From<$payload> for DisplayOp {
                fn from(op: $payload) -> Self {
                    DisplayOp::$kind(op)
                }
            }
        )+
    };
}

define_ops! {
    Save(SaveOp),
    Restore(RestoreOp),
    RestoreToCount(RestoreToCountOp),
    Translate(TranslateOp),
    Scale(ScaleOp),
    Rotate(RotateOp),
    RotateAbout(RotateAboutOp),
    Skew(SkewOp),
    Concat(ConcatOp),
    SetMatrix(SetMatrixOp),
    ResetMatrix(ResetMatrixOp),
    ClipRect(ClipRectOp),
    ClipPath(ClipPathOp),
    DrawLine(DrawLineOp),
    DrawCircle(DrawCircleOp),
    DrawArc(DrawArcOp),
    DrawOval(DrawOvalOp),
    DrawRect(DrawRectOp),
    DrawRRect(DrawRRectOp),
    DrawRoundRect(DrawRoundRectOp),
    DrawPath(DrawPathOp),
    DrawPaint(DrawPaintOp),
    SaveLayer(SaveLayerOp),
    DrawTextBlob(DrawTextBlobOp),
    DrawImage(DrawImageOp),
    DrawGlyphs(DrawGlyphsOp),
}

impl OpKind {
    /// False for pure state changes (transform, clip, save/restore)
    pub fn is_drawing(&self) -> bool {
        !matches!(
            self,
            OpKind::Save
                | OpKind::Restore
                | OpKind::RestoreToCount
                | OpKind::Translate
                | OpKind::Scale
                | OpKind::Rotate
                | OpKind::RotateAbout
                | OpKind::Skew
                | OpKind::Concat
                | OpKind::SetMatrix
                | OpKind::ResetMatrix
                | OpKind::ClipRect
                | OpKind::ClipPath
        )
    }
}

impl DisplayOp {
    /// Aligned payload size, excluding the header
    pub fn payload_size(&self) -> usize {
        self.encoded_size() - OP_HEADER_SIZE
    }

    pub fn header(&self) -> OpHeader {
        OpHeader {
            kind: self.kind(),
            payload_size: self.payload_size() as u32,
        }
    }
}

macro_rules! paint_accessors {
    () => {
        fn paint(&self) -> Option<&Paint> {
            Some(&self.paint)
        }

        fn paint_mut(&mut self) -> Option<&mut Paint> {
            Some(&mut self.paint)
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// State ops
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SaveOp;

impl Op for SaveOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.save();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestoreOp;

impl Op for RestoreOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.restore();
    }
}

/// `count` is the save depth of the recording canvas, whose base depth is 1
#[derive(Clone, Debug, PartialEq)]
pub struct RestoreToCountOp {
    pub count: usize,
}

impl RestoreToCountOp {
    /// The recorded depth moved onto a target whose replay starts at depth
    /// `base`; never below `base`
    pub fn rebased(&self, base: usize) -> usize {
        base + self.count.max(1) - 1
    }
}

impl Op for RestoreToCountOp {
    /// Treats the canvas's base level as the recording base. Replays through
    /// [`DisplayList::draw`](crate::DisplayList::draw) rebase instead.
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.restore_to_count(self.rebased(1));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranslateOp {
    pub dx: f32,
    pub dy: f32,
}

impl Op for TranslateOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.translate(self.dx, self.dy);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOp {
    pub sx: f32,
    pub sy: f32,
}

impl Op for ScaleOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.scale(self.sx, self.sy);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RotateOp {
    pub degrees: f32,
}

impl Op for RotateOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.rotate(self.degrees);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RotateAboutOp {
    pub degrees: f32,
    pub px: f32,
    pub py: f32,
}

impl Op for RotateAboutOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.rotate_about(self.degrees, self.px, self.py);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkewOp {
    pub sx: f32,
    pub sy: f32,
}

impl Op for SkewOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.skew(self.sx, self.sy);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConcatOp {
    pub matrix: Matrix,
}

impl Op for ConcatOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.concat(&self.matrix);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SetMatrixOp {
    pub matrix: Matrix,
}

impl Op for SetMatrixOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.set_matrix(&self.matrix);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResetMatrixOp;

impl Op for ResetMatrixOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.reset_matrix();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipRectOp {
    pub rect: Rect,
    pub op: ClipOp,
}

impl Op for ClipRectOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.clip_rect(self.rect, self.op);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipPathOp {
    pub path: Path,
    pub op: ClipOp,
}

impl Op for ClipPathOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.clip_path(&self.path, self.op);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawing ops
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct DrawLineOp {
    pub p0: Point,
    pub p1: Point,
    pub paint: Paint,
}

impl Op for DrawLineOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_line(self.p0, self.p1, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCircleOp {
    pub center: Point,
    pub radius: f32,
    pub paint: Paint,
}

impl Op for DrawCircleOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_circle(self.center, self.radius, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawArcOp {
    pub oval: Rect,
    pub start_degrees: f32,
    pub sweep_degrees: f32,
    pub use_center: bool,
    pub paint: Paint,
}

impl Op for DrawArcOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_arc(
            self.oval,
            self.start_degrees,
            self.sweep_degrees,
            self.use_center,
            &self.paint,
        );
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawOvalOp {
    pub oval: Rect,
    pub paint: Paint,
}

impl Op for DrawOvalOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_oval(self.oval, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawRectOp {
    pub rect: Rect,
    pub paint: Paint,
}

impl Op for DrawRectOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_rect(self.rect, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawRRectOp {
    pub rrect: RRect,
    pub paint: Paint,
}

impl Op for DrawRRectOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_rrect(&self.rrect, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawRoundRectOp {
    pub rect: Rect,
    pub rx: f32,
    pub ry: f32,
    pub paint: Paint,
}

impl Op for DrawRoundRectOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_round_rect(self.rect, self.rx, self.ry, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawPathOp {
    pub path: Path,
    pub paint: Paint,
}

impl Op for DrawPathOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_path(&self.path, &self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawPaintOp {
    pub paint: Paint,
}

impl Op for DrawPaintOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_paint(&self.paint);
    }

    paint_accessors!();
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaveLayerOp {
    pub bounds: Option<Rect>,
    pub paint: Option<Paint>,
}

impl Op for SaveLayerOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.save_layer(self.bounds, self.paint.as_ref());
    }

    fn paint(&self) -> Option<&Paint> {
        self.paint.as_ref()
    }

    fn paint_mut(&mut self) -> Option<&mut Paint> {
        self.paint.as_mut()
    }
}

/// Owns its own copy of the blob
#[derive(Clone, Debug, PartialEq)]
pub struct DrawTextBlobOp {
    pub blob: TextBlob,
    pub x: f32,
    pub y: f32,
    pub paint: Paint,
}

impl Op for DrawTextBlobOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text_blob(&self.blob, self.x, self.y, &self.paint);
    }

    paint_accessors!();
}

/// Shares the image with its creator
#[derive(Clone, Debug, PartialEq)]
pub struct DrawImageOp {
    pub image: Arc<Image>,
    pub src: Rect,
    pub dst: Rect,
    pub sampling: SamplingOptions,
    pub paint: Option<Paint>,
}

impl Op for DrawImageOp {
    /// An image whose texture is still pending draws nothing this time
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        if !self.image.is_ready() {
            tracing::trace!(image = ?self.image.id(), "image not ready, skipping draw");
            return;
        }
        canvas.draw_image(
            &self.image,
            self.src,
            self.dst,
            self.sampling,
            self.paint.as_ref(),
        );
    }

    fn paint(&self) -> Option<&Paint> {
        self.paint.as_ref()
    }

    fn paint_mut(&mut self) -> Option<&mut Paint> {
        self.paint.as_mut()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawGlyphsOp {
    pub glyphs: Vec<GlyphId>,
    pub positions: Vec<Point>,
    pub font: Font,
    pub paint: Paint,
}

impl Op for DrawGlyphsOp {
    fn dispatch(&self, canvas: &mut dyn Canvas) {
        canvas.draw_glyphs(&self.glyphs, &self.positions, &self.font, &self.paint);
    }

    paint_accessors!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_are_pointer_aligned() {
        let align = align_of::<usize>();
        assert_eq!(OP_HEADER_SIZE % align, 0);
        assert_eq!(SaveOp::ENCODED_SIZE, OP_HEADER_SIZE);
        assert_eq!(RotateOp::ENCODED_SIZE % align, 0);
        assert!(RotateOp::ENCODED_SIZE >= OP_HEADER_SIZE + size_of::<RotateOp>());
        assert_eq!(DrawPathOp::ENCODED_SIZE % align, 0);
    }

    #[test]
    fn test_header_matches_payload() {
        let op: DisplayOp = TranslateOp { dx: 1.0, dy: 2.0 }.into();
        let header = op.header();
        assert_eq!(header.kind, OpKind::Translate);
        assert_eq!(
            header.payload_size as usize,
            align_to_pointer(size_of::<TranslateOp>())
        );
        assert_eq!(op.encoded_size(), TranslateOp::ENCODED_SIZE);
    }

    #[test]
    fn test_restore_to_count_rebases_onto_target_depth() {
        let op = RestoreToCountOp { count: 2 };
        assert_eq!(op.rebased(1), 2);
        assert_eq!(op.rebased(4), 5);
        // Depths below the recording base stay at the target's base
        assert_eq!(RestoreToCountOp { count: 0 }.rebased(3), 3);
    }

    #[test]
    fn test_state_ops_carry_no_paint() {
        let mut ops: Vec<DisplayOp> = vec![
            SaveOp.into(),
            RestoreOp.into(),
            ClipRectOp {
                rect: Rect::from_ltrb(0.0, 0.0, 1.0, 1.0),
                op: ClipOp::Intersect,
            }
            .into(),
            ConcatOp {
                matrix: Matrix::scale(2.0, 2.0),
            }
            .into(),
        ];
        for op in &mut ops {
            assert!(!op.kind().is_drawing());
            assert!(op.paint().is_none());
            assert!(op.paint_mut().is_none());
        }
    }

    #[test]
    fn test_optional_paints() {
        let bare = DisplayOp::from(SaveLayerOp {
            bounds: None,
            paint: None,
        });
        assert!(bare.kind().is_drawing());
        assert!(bare.paint().is_none());

        let with_paint = DisplayOp::from(SaveLayerOp {
            bounds: None,
            paint: Some(Paint::new()),
        });
        assert!(with_paint.paint().is_some());

        let rect = DisplayOp::from(DrawRectOp {
            rect: Rect::from_ltrb(0.0, 0.0, 1.0, 1.0),
            paint: Paint::new(),
        });
        assert_eq!(rect.paint(), Some(&Paint::new()));
    }

    #[test]
    fn test_catalog_is_closed() {
        assert_eq!(OpKind::ALL.len(), 26);
        assert_eq!(
            OpKind::ALL.iter().filter(|kind| kind.is_drawing()).count(),
            13
        );
    }
}
