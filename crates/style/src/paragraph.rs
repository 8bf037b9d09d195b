//! Flat paragraph style records and the derivation function that builds one
//! record from another.

use crate::color::Color;
use crate::font::{FontStyle, FontWeight};
use crate::text::TextAlign;

/// A fully resolved set of paragraph attributes. Every field is concrete;
/// there is no parent link at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    /// Font size in points.
    pub font_size: f32,
    /// Baseline-to-baseline distance in points.
    pub leading: f32,
    pub alignment: TextAlign,
    pub color: Color,
    pub space_before: f32,
    pub space_after: f32,
}

impl ParagraphStyle {
    /// The body text base: 10pt regular on 12pt leading.
    pub fn normal() -> Self {
        Self {
            name: "Normal".to_string(),
            font_weight: FontWeight::Regular,
            font_style: FontStyle::Normal,
            font_size: 10.0,
            leading: 12.0,
            alignment: TextAlign::Left,
            color: Color::BLACK,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    /// The first-level heading base: 18pt bold on 22pt leading.
    pub fn heading1() -> Self {
        derive_style(
            &Self::normal(),
            "Heading1",
            StyleOverrides::new()
                .font_weight(FontWeight::Bold)
                .font_size(18.0)
                .leading(22.0)
                .space_after(6.0),
        )
    }
}

/// The subset of attributes a derived style replaces. `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_size: Option<f32>,
    pub leading: Option<f32>,
    pub alignment: Option<TextAlign>,
    pub color: Option<Color>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn alignment(mut self, alignment: TextAlign) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn space_before(mut self, space: f32) -> Self {
        self.space_before = Some(space);
        self
    }

    pub fn space_after(mut self, space: f32) -> Self {
        self.space_after = Some(space);
        self
    }
}

/// Builds a new flat style by copying `base` and applying `overrides`.
pub fn derive_style(base: &ParagraphStyle, name: &str, overrides: StyleOverrides) -> ParagraphStyle {
    ParagraphStyle {
        name: name.to_string(),
        font_weight: overrides.font_weight.unwrap_or(base.font_weight),
        font_style: overrides.font_style.unwrap_or(base.font_style),
        font_size: overrides.font_size.unwrap_or(base.font_size),
        leading: overrides.leading.unwrap_or(base.leading),
        alignment: overrides.alignment.unwrap_or(base.alignment),
        color: overrides.color.unwrap_or(base.color),
        space_before: overrides.space_before.unwrap_or(base.space_before),
        space_after: overrides.space_after.unwrap_or(base.space_after),
    }
}
