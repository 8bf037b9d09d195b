use super::shaper::shape_text;
use super::wrapper::{Fragment, Item};
use crate::LayoutError;
use crate::fonts::FontSet;
use decl_markup::{InlineSpan, Script};
use decl_style::font::{FontStyle, FontWeight};
use decl_style::paragraph::ParagraphStyle;

/// Superscript and subscript text is set at this fraction of the paragraph size.
const SCRIPT_SIZE_RATIO: f32 = 0.7;
/// Baseline shift of superscripts, in ems of the paragraph size.
const SUPER_RISE: f32 = 0.33;
/// Baseline shift of subscripts, in ems of the paragraph size.
const SUB_RISE: f32 = -0.2;

/// Turns inline spans into shaped words and spaces for line breaking.
///
/// Runs of whitespace collapse into one space, including runs that cross
/// span boundaries. Text on either side of a span boundary without
/// whitespace between stays in one word.
pub fn build_items(
    spans: &[InlineSpan],
    style: &ParagraphStyle,
    fonts: &FontSet,
) -> Result<Vec<Item>, LayoutError> {
    let mut items: Vec<Item> = Vec::new();

    for span in spans {
        let weight = if span.bold || style.font_weight == FontWeight::Bold {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        };
        let font_style = if span.italic || style.font_style == FontStyle::Italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        };
        let (face_key, face) = fonts.face_for(weight, font_style);
        let (font_size, rise) = match span.script {
            Script::Normal => (style.font_size, 0.0),
            Script::Super => (style.font_size * SCRIPT_SIZE_RATIO, style.font_size * SUPER_RISE),
            Script::Sub => (style.font_size * SCRIPT_SIZE_RATIO, style.font_size * SUB_RISE),
        };
        let fragment = |text: &str| -> Result<Fragment, LayoutError> {
            Ok(Fragment {
                face: face_key,
                font_size,
                rise,
                color: style.color,
                shaped: shape_text(face, text, font_size)?,
            })
        };

        for (is_space, segment) in split_segments(&span.text) {
            if is_space {
                if !matches!(items.last(), Some(Item::Space(_))) {
                    items.push(Item::Space(fragment(" ")?));
                }
                continue;
            }
            let word = fragment(segment)?;
            match items.last_mut() {
                Some(Item::Word(fragments)) => fragments.push(word),
                _ => items.push(Item::Word(vec![word])),
            }
        }
    }

    Ok(items)
}

/// Splits text into alternating whitespace and non-whitespace segments.
fn split_segments(text: &str) -> Vec<(bool, &str)> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let is_space = c.is_ascii_whitespace();
        match current {
            Some(kind) if kind == is_space => {}
            Some(kind) => {
                segments.push((kind, &text[start..idx]));
                start = idx;
                current = Some(is_space);
            }
            None => current = Some(is_space),
        }
    }
    if let Some(kind) = current {
        segments.push((kind, &text[start..]));
    }
    segments
}
