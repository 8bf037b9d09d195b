//! PDF font objects for the faces of a [`FontSet`](decl_layout::FontSet).
//!
//! Built-in faces become simple Type1 fonts with WinAnsiEncoding. Embedded
//! faces become Type0 fonts over a CIDFontType2 descendant, addressed with
//! two-byte glyph ids (Identity-H), with a ToUnicode map so that text can be
//! extracted again.

use crate::error::RenderError;
use decl_layout::{BuiltinFont, EmbeddedFont, FaceKey};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;

/// Maximum entries in one `beginbfchar` block of a CMap.
const BFCHAR_BLOCK: usize = 100;

/// Resource name a face is registered under in the page resources.
pub fn resource_name(key: FaceKey) -> &'static str {
    match key {
        FaceKey::Regular => "F1",
        FaceKey::Bold => "F2",
        FaceKey::Italic => "F3",
    }
}

/// Glyphs drawn with one embedded face, mapped to the text they represent.
pub type GlyphUsage = BTreeMap<u16, String>;

pub fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

pub fn builtin_font_dict(font: BuiltinFont) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font_name(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Writes the full object graph of an embedded face, with its Type0 font
/// dictionary stored at the reserved `font_id`.
pub fn write_embedded_font(
    document: &mut Document,
    font_id: ObjectId,
    font: &EmbeddedFont,
    usage: &GlyphUsage,
) -> Result<(), RenderError> {
    let ps_name = font.postscript_name.as_str();
    let metrics = &font.metrics;
    let scale = |v: i16| -> i64 { (v as f32 * 1000.0 / metrics.units_per_em as f32).round() as i64 };

    let font_file = Stream::new(
        dictionary! {
            "Length1" => font.data.len() as i64,
            "Filter" => "FlateDecode",
        },
        deflate(&font.data)?,
    );
    let font_file_id = document.add_object(font_file);

    // Nonsymbolic, plus the italic flag for slanted faces.
    let flags: i64 = if font.italic { 32 | 64 } else { 32 };
    let descriptor = dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(ps_name.as_bytes().to_vec()),
        "Flags" => flags,
        "FontBBox" => vec![
            scale(metrics.bbox[0]).into(),
            scale(metrics.bbox[1]).into(),
            scale(metrics.bbox[2]).into(),
            scale(metrics.bbox[3]).into(),
        ],
        "ItalicAngle" => if font.italic { -12 } else { 0 },
        "Ascent" => scale(metrics.ascender),
        "Descent" => scale(metrics.descender),
        "CapHeight" => scale(metrics.cap_height),
        "StemV" => if font.bold { 120 } else { 80 },
        "FontFile2" => font_file_id,
    };
    let descriptor_id = document.add_object(descriptor);

    let gids: Vec<u16> = usage.keys().copied().collect();
    let widths = font.glyph_widths(&gids)?;
    let mut w_array = Vec::with_capacity(widths.len() * 2);
    for (gid, width) in widths {
        w_array.push(Object::Integer(gid as i64));
        w_array.push(Object::Array(vec![width.round().into()]));
    }

    let cid_font = dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(ps_name.as_bytes().to_vec()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "W" => w_array,
        "CIDToGIDMap" => "Identity",
    };
    let cid_font_id = document.add_object(cid_font);

    let cmap = to_unicode_cmap(usage);
    let to_unicode_id = document.add_object(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        deflate(cmap.as_bytes())?,
    ));

    let type0 = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(ps_name.as_bytes().to_vec()),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    };
    document
        .objects
        .insert(font_id, Object::Dictionary(type0));

    log::debug!("Embedded {} with {} used glyphs", ps_name, usage.len());
    Ok(())
}

/// Builds a ToUnicode CMap mapping two-byte glyph ids to UTF-16BE text.
pub fn to_unicode_cmap(usage: &GlyphUsage) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &String)> = usage.iter().filter(|(_, text)| !text.is_empty()).collect();
    for block in entries.chunks(BFCHAR_BLOCK) {
        let _ = writeln!(cmap, "{} beginbfchar", block.len());
        for (gid, text) in block {
            let utf16: String = text.encode_utf16().map(|unit| format!("{:04X}", unit)).collect();
            let _ = writeln!(cmap, "<{:04X}> <{}>", gid, utf16);
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}

/// Encodes a PDF text string: plain bytes for ASCII, UTF-16BE with a byte
/// order mark otherwise.
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
