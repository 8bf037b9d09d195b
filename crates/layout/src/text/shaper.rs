use crate::LayoutError;
use crate::fonts::{BuiltinFont, EmbeddedFont, FontError, FontFace};
use crate::metrics;
use rustybuzz::{Feature, UnicodeBuffer};
use std::cell::RefCell;
use std::sync::OnceLock;
use ttf_parser::Tag;

// Reuse buffer to avoid allocations in the tight loop
thread_local! {
    static SCRATCH_BUFFER: RefCell<Option<UnicodeBuffer>> = RefCell::new(Some(UnicodeBuffer::new()));
}

/// A single glyph with its advance in points and the source text it stands for.
///
/// For built-in faces the id is the WinAnsi code of the character. A glyph
/// that continues a cluster carries empty text. `x_offset` and `y_offset`
/// (points, y up) move the glyph away from its pen position without
/// affecting the advance, as combining marks do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphInstance {
    pub id: u16,
    pub advance: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub text: String,
}

impl GlyphInstance {
    pub fn new(id: u16, advance: f32, text: impl Into<String>) -> Self {
        Self {
            id,
            advance,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn is_offset(&self) -> bool {
        self.x_offset != 0.0 || self.y_offset != 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedText {
    pub glyphs: Vec<GlyphInstance>,
    pub width: f32,
}

/// Shapes `text` with `face` at `font_size` points.
pub fn shape_text(face: &FontFace, text: &str, font_size: f32) -> Result<ShapedText, LayoutError> {
    match face {
        FontFace::Builtin(font) => Ok(shape_builtin(*font, text, font_size)),
        FontFace::Embedded(font) => shape_embedded(font, text, font_size),
    }
}

fn shape_builtin(font: BuiltinFont, text: &str, font_size: f32) -> ShapedText {
    let scale = font_size / 1000.0;
    let mut width = 0.0;
    let glyphs = text
        .chars()
        .map(|c| {
            let code = metrics::win_ansi_code(c).unwrap_or(b'?');
            let advance = font.code_width(code) as f32 * scale;
            width += advance;
            GlyphInstance::new(code as u16, advance, c.to_string())
        })
        .collect();
    ShapedText { glyphs, width }
}

fn shape_embedded(font: &EmbeddedFont, text: &str, font_size: f32) -> Result<ShapedText, LayoutError> {
    static FEATURES: OnceLock<Vec<Feature>> = OnceLock::new();
    let features = FEATURES.get_or_init(|| {
        vec![
            Feature::new(Tag::from_bytes(b"liga"), 1, ..),
            Feature::new(Tag::from_bytes(b"kern"), 1, ..),
        ]
    });

    // Stack allocation of Face, safe because the font data outlives it
    let face = font.as_shaping_face().ok_or_else(|| {
        FontError::InvalidData(format!("cannot shape with {}", font.postscript_name))
    })?;
    let scale = font_size / face.units_per_em() as f32;

    let mut buffer =
        SCRATCH_BUFFER.with(|b| b.borrow_mut().take().unwrap_or_else(UnicodeBuffer::new));
    buffer.push_str(text);
    buffer.guess_segment_properties();

    let glyph_buffer = rustybuzz::shape(&face, features, buffer);
    let infos = glyph_buffer.glyph_infos();
    let positions = glyph_buffer.glyph_positions();

    let mut glyphs = Vec::with_capacity(infos.len());
    let mut width = 0.0;
    for (i, (info, pos)) in infos.iter().zip(positions.iter()).enumerate() {
        let cluster = info.cluster as usize;
        let starts_cluster = i == 0 || infos[i - 1].cluster != info.cluster;
        let glyph_text = if starts_cluster {
            let end = infos[i + 1..]
                .iter()
                .map(|next| next.cluster as usize)
                .find(|&next| next > cluster)
                .unwrap_or(text.len());
            text.get(cluster..end).unwrap_or_default().to_string()
        } else {
            String::new()
        };

        let advance = pos.x_advance as f32 * scale;
        width += advance;
        glyphs.push(GlyphInstance {
            id: info.glyph_id as u16,
            advance,
            x_offset: pos.x_offset as f32 * scale,
            y_offset: pos.y_offset as f32 * scale,
            text: glyph_text,
        });
    }

    let recycled_buffer = glyph_buffer.clear();
    SCRATCH_BUFFER.with(|b| *b.borrow_mut() = Some(recycled_buffer));

    Ok(ShapedText { glyphs, width })
}
