//! Fonts and pre-positioned text
//!
//! Shaping and glyph rasterization live elsewhere; at this level a font is a
//! description and a [`TextBlob`] is a set of glyph ids with positions and a
//! conservative bounding box.

use crate::geometry::{Point, Rect};

pub type GlyphId = u16;

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub scale_x: f32,
    pub skew_x: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12.0,
            scale_x: 1.0,
            skew_x: 0.0,
        }
    }
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            ..Default::default()
        }
    }

    /// Box any glyph of this font can occupy relative to its origin on the
    /// baseline. Without metrics the estimate is one em above the baseline,
    /// half an em below, and one em of advance, widened for skew.
    pub fn glyph_bounds_estimate(&self) -> Rect {
        let size = self.size.abs();
        let skew = self.skew_x.abs() * size;
        Rect::from_ltrb(
            -skew,
            -size,
            size * self.scale_x.abs() + skew,
            size * 0.5,
        )
    }
}

/// Glyphs sharing one font
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    pub font: Font,
    pub glyphs: Vec<GlyphId>,
    pub positions: Vec<Point>,
}

impl GlyphRun {
    pub fn new(font: Font, glyphs: Vec<GlyphId>, positions: Vec<Point>) -> Self {
        debug_assert_eq!(glyphs.len(), positions.len());
        Self {
            font,
            glyphs,
            positions,
        }
    }

    pub fn bounds(&self) -> Rect {
        let glyph = self.font.glyph_bounds_estimate();
        self.positions
            .iter()
            .take(self.glyphs.len())
            .fold(Rect::EMPTY, |acc, p| acc.union(&glyph.offset(p.x, p.y)))
    }
}

/// Immutable, positioned text; positions are relative to the draw origin
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlob {
    runs: Vec<GlyphRun>,
    bounds: Rect,
}

impl TextBlob {
    pub fn new(runs: Vec<GlyphRun>) -> Self {
        let bounds = runs
            .iter()
            .fold(Rect::EMPTY, |acc, run| acc.union(&run.bounds()));
        Self { runs, bounds }
    }

    /// Single-run blob with glyphs laid out on a horizontal baseline at y = 0
    pub fn from_glyphs(font: Font, glyphs: &[GlyphId], advance: f32) -> Self {
        let positions = (0..glyphs.len())
            .map(|i| Point::new(i as f32 * advance, 0.0))
            .collect();
        Self::new(vec![GlyphRun::new(font, glyphs.to_vec(), positions)])
    }

    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|run| run.glyphs.len()).sum()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}
