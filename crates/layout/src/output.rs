//! Output types from the layout engine.
//!
//! Positions are in points measured from the top-left corner of the page;
//! the renderer flips them into PDF user space.

use crate::fonts::FaceKey;
use crate::text::GlyphInstance;
use decl_style::color::Color;

/// A horizontal run of glyphs sharing one face, size, baseline rise and color.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRun {
    pub x: f32,
    /// Distance from the top of the page to the line baseline.
    pub baseline: f32,
    pub face: FaceKey,
    pub font_size: f32,
    /// Baseline shift for superscript (positive) and subscript (negative) text.
    pub rise: f32,
    pub color: Color,
    pub glyphs: Vec<GlyphInstance>,
    pub width: f32,
}

impl PositionedRun {
    /// The source text the run's glyphs stand for.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    pub width: f32,
    pub height: f32,
    pub runs: Vec<PositionedRun>,
}

impl LaidOutPage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            runs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Page text with runs concatenated in layout order.
    pub fn text(&self) -> String {
        self.runs.iter().map(PositionedRun::text).collect()
    }
}
