use crate::error::RenderError;
use crate::fonts::{GlyphUsage, resource_name};
use decl_layout::{FaceKey, FontFace, FontSet, GlyphInstance, PositionedRun};
use decl_style::color::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use std::collections::BTreeMap;
use std::ops::Range;

/// Differences between the laid-out and the font's own advance below this
/// many points are not worth a TJ adjustment.
const ADVANCE_TOLERANCE: f32 = 0.001;

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FaceKey, f32)>,
    fill_color: Option<Color>,
    rise: f32,
}

/// Accumulates the content stream of one page.
pub struct PageContext<'a> {
    fonts: &'a FontSet,
    usage: &'a mut BTreeMap<FaceKey, GlyphUsage>,
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

impl<'a> PageContext<'a> {
    pub fn new(
        fonts: &'a FontSet,
        usage: &'a mut BTreeMap<FaceKey, GlyphUsage>,
        page_height: f32,
    ) -> Self {
        Self {
            fonts,
            usage,
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn set_font(&mut self, face: FaceKey, size: f32) {
        if self.state.font != Some((face, size)) {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(resource_name(face).as_bytes().to_vec()), size.into()],
            ));
            self.state.font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: &Color) {
        if self.state.fill_color != Some(*color) {
            let [r, g, b] = color.to_unit_rgb();
            self.content
                .operations
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.state.fill_color = Some(*color);
        }
    }

    fn set_rise(&mut self, rise: f32) {
        if self.state.rise != rise {
            self.content
                .operations
                .push(Operation::new("Ts", vec![rise.into()]));
            self.state.rise = rise;
        }
    }

    pub fn draw_run(&mut self, run: &PositionedRun) -> Result<(), RenderError> {
        if run.glyphs.is_empty() || run.text().trim().is_empty() {
            return Ok(());
        }

        let face = self.fonts.face(run.face);
        let natural_widths = natural_widths(face, &run.glyphs)?;

        if let FontFace::Embedded(_) = face {
            let usage = self.usage.entry(run.face).or_default();
            for glyph in &run.glyphs {
                let entry = usage.entry(glyph.id).or_default();
                if entry.is_empty() {
                    entry.push_str(&glyph.text);
                }
            }
        }

        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(run.face, run.font_size);
        self.set_fill_color(&run.color);

        // Td moves relative to the start of the current text line, which
        // text showing does not advance.
        let pdf_y = self.page_height - run.baseline;
        let mut line_origin = (0.0, 0.0);
        let mut pen_x = run.x;
        for segment in segments(&run.glyphs) {
            let first = &run.glyphs[segment.start];
            let (dx, dy) = (first.x_offset, first.y_offset);
            self.set_rise(run.rise + dy);

            let target = (pen_x + dx, pdf_y);
            self.content.operations.push(Operation::new(
                "Td",
                vec![
                    (target.0 - line_origin.0).into(),
                    (target.1 - line_origin.1).into(),
                ],
            ));
            line_origin = target;

            let glyphs = &run.glyphs[segment.clone()];
            self.content.operations.push(encode_glyphs(
                face,
                glyphs,
                run.font_size,
                &natural_widths[segment],
            ));
            pen_x += glyphs.iter().map(|g| g.advance).sum::<f32>();
        }

        self.content.operations.push(Operation::new("ET", vec![]));
        Ok(())
    }
}

/// Splits a run into ranges drawn at the pen position, with every offset
/// glyph in a range of its own.
fn segments(glyphs: &[GlyphInstance]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (idx, glyph) in glyphs.iter().enumerate() {
        if glyph.is_offset() {
            if start < idx {
                ranges.push(start..idx);
            }
            ranges.push(idx..idx + 1);
            start = idx + 1;
        }
    }
    if start < glyphs.len() {
        ranges.push(start..glyphs.len());
    }
    ranges
}

/// The advance each glyph gets from the font program alone, in 1000-unit em.
fn natural_widths(face: &FontFace, glyphs: &[GlyphInstance]) -> Result<Vec<f32>, RenderError> {
    match face {
        FontFace::Builtin(font) => Ok(glyphs
            .iter()
            .map(|g| font.code_width(g.id as u8) as f32)
            .collect()),
        FontFace::Embedded(font) => {
            let ids: Vec<u16> = glyphs.iter().map(|g| g.id).collect();
            Ok(font.glyph_widths(&ids)?.into_iter().map(|(_, w)| w).collect())
        }
    }
}

fn glyph_bytes(face: &FontFace, glyph: &GlyphInstance, out: &mut Vec<u8>) {
    match face {
        FontFace::Builtin(_) => out.push(glyph.id as u8),
        FontFace::Embedded(_) => out.extend_from_slice(&glyph.id.to_be_bytes()),
    }
}

fn string_object(face: &FontFace, bytes: Vec<u8>) -> Object {
    let format = match face {
        FontFace::Builtin(_) => StringFormat::Literal,
        FontFace::Embedded(_) => StringFormat::Hexadecimal,
    };
    Object::String(bytes, format)
}

/// Builds a `Tj` when the font's own advances reproduce the layout, and a
/// `TJ` with positioning adjustments (kerning, justification) otherwise.
fn encode_glyphs(
    face: &FontFace,
    glyphs: &[GlyphInstance],
    font_size: f32,
    natural_widths: &[f32],
) -> Operation {
    let mut elements: Vec<Object> = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for (glyph, natural) in glyphs.iter().zip(natural_widths) {
        glyph_bytes(face, glyph, &mut pending);
        let diff = glyph.advance - natural * font_size / 1000.0;
        if diff.abs() > ADVANCE_TOLERANCE {
            elements.push(string_object(face, std::mem::take(&mut pending)));
            // TJ numbers are in thousandths of an em and move left when positive.
            elements.push((-diff * 1000.0 / font_size).into());
        }
    }
    if !pending.is_empty() {
        elements.push(string_object(face, pending));
    }

    if elements.len() == 1 {
        Operation::new("Tj", elements)
    } else {
        Operation::new("TJ", vec![Object::Array(elements)])
    }
}
