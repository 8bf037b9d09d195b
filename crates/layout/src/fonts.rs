//! Startup-time font resolution.
//!
//! A [`FontSet`] is resolved once from a [`FontConfig`] and then shared
//! read-only by the layout engine and the renderer. Font files directly
//! inside the search directories, every font below the font directories,
//! and optionally the system fonts are indexed with `fontdb`. If the
//! requested family is missing any of its faces, the whole set falls back
//! to the built-in Helvetica family.

use crate::metrics;
use decl_style::font::{FontStyle, FontWeight};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {family} (weight: {weight:?}, style: {style:?})")]
    NotFound {
        family: String,
        weight: FontWeight,
        style: FontStyle,
    },
    #[error("Failed to load font from '{path}': {message}")]
    LoadFailed { path: String, message: String },
    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

/// Where to look for the preferred font family and what to do when it is missing.
///
/// `search_dirs` are scanned for font files at their top level only;
/// `font_dirs` are dedicated font directories and are searched recursively.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub family: String,
    pub search_dirs: Vec<PathBuf>,
    pub font_dirs: Vec<PathBuf>,
    pub system_fonts: bool,
    pub allow_builtin_fallback: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "DejaVu Sans".to_string(),
            search_dirs: vec![PathBuf::from(".")],
            font_dirs: vec![PathBuf::from("assets/fonts")],
            system_fonts: false,
            allow_builtin_fallback: true,
        }
    }
}

impl FontConfig {
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_font_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.font_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_system_fonts(mut self, enable: bool) -> Self {
        self.system_fonts = enable;
        self
    }

    pub fn with_builtin_fallback(mut self, allow: bool) -> Self {
        self.allow_builtin_fallback = allow;
        self
    }
}

/// Identifies one of the three faces of a [`FontSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceKey {
    Regular,
    Bold,
    Italic,
}

impl FaceKey {
    /// Bold takes precedence over italic; the set carries no bold-italic face.
    pub fn for_style(weight: FontWeight, style: FontStyle) -> Self {
        match (weight, style) {
            (FontWeight::Bold, _) => FaceKey::Bold,
            (FontWeight::Regular, FontStyle::Italic) => FaceKey::Italic,
            (FontWeight::Regular, FontStyle::Normal) => FaceKey::Regular,
        }
    }

    fn weight(&self) -> FontWeight {
        match self {
            FaceKey::Bold => FontWeight::Bold,
            FaceKey::Regular | FaceKey::Italic => FontWeight::Regular,
        }
    }

    fn style(&self) -> FontStyle {
        match self {
            FaceKey::Italic => FontStyle::Italic,
            FaceKey::Regular | FaceKey::Bold => FontStyle::Normal,
        }
    }
}

/// Vertical metrics of an embedded face, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    pub bbox: [i16; 4],
}

/// A TrueType/OpenType face loaded from disk, kept whole for embedding.
pub struct EmbeddedFont {
    pub postscript_name: String,
    pub data: Arc<Vec<u8>>,
    pub face_index: u32,
    pub metrics: FontMetrics,
    pub italic: bool,
    pub bold: bool,
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("postscript_name", &self.postscript_name)
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl EmbeddedFont {
    /// Parses the face tables once to validate the data and read its metrics.
    pub fn from_data(
        data: Vec<u8>,
        face_index: u32,
        postscript_name: Option<String>,
        key: FaceKey,
    ) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| FontError::InvalidData(e.to_string()))?;

        let bbox = face.global_bounding_box();
        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
        };

        let postscript_name = postscript_name
            .filter(|name| !name.is_empty())
            .or_else(|| extract_postscript_name(&face))
            .ok_or_else(|| FontError::InvalidData("face has no usable name".to_string()))?;

        Ok(Self {
            postscript_name,
            data: Arc::new(data),
            face_index,
            metrics,
            italic: key == FaceKey::Italic,
            bold: key == FaceKey::Bold,
        })
    }

    /// Creates a lightweight shaping view over the font data.
    pub fn as_shaping_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.face_index)
    }

    /// Horizontal advances of the given glyphs scaled to a 1000-unit em.
    pub fn glyph_widths(&self, glyphs: &[u16]) -> Result<Vec<(u16, f32)>, FontError> {
        let face = ttf_parser::Face::parse(&self.data, self.face_index)
            .map_err(|e| FontError::InvalidData(e.to_string()))?;
        let scale = 1000.0 / face.units_per_em() as f32;
        Ok(glyphs
            .iter()
            .map(|&gid| {
                let advance = face
                    .glyph_hor_advance(ttf_parser::GlyphId(gid))
                    .unwrap_or(0);
                (gid, advance as f32 * scale)
            })
            .collect())
    }
}

/// Tries the PostScript name first, then the full name and the family name.
fn extract_postscript_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    let find = |id: u16| {
        face.names()
            .into_iter()
            .find(|n| n.name_id == id)
            .and_then(|n| n.to_string())
    };

    find(ttf_parser::name_id::POST_SCRIPT_NAME)
        .or_else(|| find(ttf_parser::name_id::FULL_NAME).map(|n| n.replace(' ', "")))
        .or_else(|| find(ttf_parser::name_id::FAMILY).map(|n| n.replace(' ', "")))
}

/// The standard Type1 faces every PDF viewer provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl BuiltinFont {
    pub fn base_font_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Advance width of a WinAnsi code in 1000-unit em. The oblique face
    /// shares the upright widths.
    pub fn code_width(&self, code: u8) -> u16 {
        metrics::helvetica_width(code, *self == BuiltinFont::HelveticaBold)
    }

    /// Advance width of a character after WinAnsi substitution.
    pub fn char_width(&self, c: char) -> u16 {
        self.code_width(metrics::win_ansi_code(c).unwrap_or(b'?'))
    }
}

#[derive(Debug, Clone)]
pub enum FontFace {
    Embedded(Arc<EmbeddedFont>),
    Builtin(BuiltinFont),
}

impl FontFace {
    pub fn name(&self) -> &str {
        match self {
            FontFace::Embedded(font) => &font.postscript_name,
            FontFace::Builtin(font) => font.base_font_name(),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, FontFace::Embedded(_))
    }
}

/// The resolved regular, bold and italic faces of one family.
#[derive(Debug, Clone)]
pub struct FontSet {
    family: String,
    regular: FontFace,
    bold: FontFace,
    italic: FontFace,
}

impl FontSet {
    /// The built-in Helvetica family, which needs no font files.
    pub fn builtin() -> Self {
        Self {
            family: "Helvetica".to_string(),
            regular: FontFace::Builtin(BuiltinFont::Helvetica),
            bold: FontFace::Builtin(BuiltinFont::HelveticaBold),
            italic: FontFace::Builtin(BuiltinFont::HelveticaOblique),
        }
    }

    /// Resolves the configured family, falling back to [`FontSet::builtin`]
    /// when any of its three faces is unavailable and fallback is allowed.
    pub fn resolve(config: &FontConfig) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        for dir in &config.search_dirs {
            load_top_level_fonts(&mut db, dir);
        }
        for dir in &config.font_dirs {
            if dir.is_dir() {
                log::debug!("Indexing fonts below {}", dir.display());
                db.load_fonts_dir(dir);
            } else {
                log::debug!("Font directory {} does not exist, skipping", dir.display());
            }
        }
        if config.system_fonts {
            db.load_system_fonts();
        }
        log::debug!("Font database holds {} faces", db.len());

        match Self::resolve_family(&db, &config.family) {
            Ok(set) => {
                log::info!("Using font family '{}'", set.family);
                Ok(set)
            }
            Err(err) if config.allow_builtin_fallback => {
                log::warn!(
                    "{}. Falling back to Helvetica; Polish characters may not display correctly.",
                    err
                );
                Ok(Self::builtin())
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_family(db: &fontdb::Database, family: &str) -> Result<Self, FontError> {
        let regular = load_face(db, family, FaceKey::Regular)?;
        let bold = load_face(db, family, FaceKey::Bold)?;
        let italic = load_face(db, family, FaceKey::Italic)?;
        Ok(Self {
            family: family.to_string(),
            regular: FontFace::Embedded(Arc::new(regular)),
            bold: FontFace::Embedded(Arc::new(bold)),
            italic: FontFace::Embedded(Arc::new(italic)),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn is_builtin(&self) -> bool {
        !self.regular.is_embedded()
    }

    pub fn face(&self, key: FaceKey) -> &FontFace {
        match key {
            FaceKey::Regular => &self.regular,
            FaceKey::Bold => &self.bold,
            FaceKey::Italic => &self.italic,
        }
    }

    pub fn face_for(&self, weight: FontWeight, style: FontStyle) -> (FaceKey, &FontFace) {
        let key = FaceKey::for_style(weight, style);
        (key, self.face(key))
    }
}

/// Loads the font files directly inside `dir`, without descending into
/// subdirectories.
fn load_top_level_fonts(db: &mut fontdb::Database, dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("Skipping font search directory {}: {}", dir.display(), err);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_font_file = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)));
        if !is_font_file {
            continue;
        }
        log::debug!("Indexing font file {}", path.display());
        if let Err(err) = db.load_font_file(&path) {
            log::warn!("Could not read font file {}: {}", path.display(), err);
        }
    }
}

fn load_face(db: &fontdb::Database, family: &str, key: FaceKey) -> Result<EmbeddedFont, FontError> {
    let not_found = || FontError::NotFound {
        family: family.to_string(),
        weight: key.weight(),
        style: key.style(),
    };

    let query = fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight: map_weight(key.weight()),
        stretch: fontdb::Stretch::Normal,
        style: map_style(key.style()),
    };
    let id = db.query(&query).ok_or_else(not_found)?;
    let info = db.face(id).ok_or_else(not_found)?;

    // fontdb returns the closest face of the family; only exact matches count.
    let style_matches = match key.style() {
        FontStyle::Normal => info.style == fontdb::Style::Normal,
        FontStyle::Italic => info.style != fontdb::Style::Normal,
    };
    if info.weight != map_weight(key.weight()) || !style_matches {
        log::debug!(
            "Closest match for {} {:?} is {} ({:?}, {:?}); rejecting",
            family,
            key,
            info.post_script_name,
            info.weight,
            info.style
        );
        return Err(not_found());
    }

    log::debug!("Matched {} {:?} to {}", family, key, info.post_script_name);
    let postscript_name = info.post_script_name.clone();

    db.with_face_data(id, |data, index| {
        EmbeddedFont::from_data(data.to_vec(), index, Some(postscript_name), key)
    })
    .ok_or_else(|| FontError::LoadFailed {
        path: format!("{:?}", info.source),
        message: "font source could not be read".to_string(),
    })?
}

fn map_weight(w: FontWeight) -> fontdb::Weight {
    fontdb::Weight(w.numeric_value())
}

fn map_style(s: FontStyle) -> fontdb::Style {
    match s {
        FontStyle::Normal => fontdb::Style::Normal,
        FontStyle::Italic => fontdb::Style::Italic,
    }
}
