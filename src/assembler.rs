use crate::config::GeneratorConfig;
use crate::error::DeclarationError;
use crate::input::DeclarationInput;
use crate::template::build_blocks;
use decl_layout::{FontSet, LayoutEngine};
use decl_markup::translate;
use decl_render_lopdf::{DocumentInfo, LopdfRenderer};
use decl_style::catalog::StyleCatalog;
use std::fs;
use std::path::PathBuf;

/// Title stored in the document information dictionary.
pub const DOCUMENT_TITLE: &str = "Oświadczenie o osiągnięciu naukowym";

/// Composes and writes declaration documents.
///
/// Fonts are resolved once on construction, so one assembler can produce
/// any number of files with the same configuration.
pub struct Assembler {
    config: GeneratorConfig,
    fonts: FontSet,
    catalog: StyleCatalog,
}

impl Assembler {
    pub fn new(config: GeneratorConfig) -> Result<Self, DeclarationError> {
        let fonts = FontSet::resolve(&config.fonts)?;
        Ok(Self::with_fonts(config, fonts))
    }

    /// Uses an already resolved font set instead of searching for one.
    pub fn with_fonts(config: GeneratorConfig, fonts: FontSet) -> Self {
        Self {
            config,
            fonts,
            catalog: StyleCatalog::standard(),
        }
    }

    /// Lays out and renders one declaration without touching the filesystem.
    pub fn render_to_bytes(
        &self,
        input: &DeclarationInput,
        translated_title: &str,
    ) -> Result<Vec<u8>, DeclarationError> {
        let blocks = build_blocks(input, translated_title, &self.config.profile);
        let engine = LayoutEngine::new(&self.fonts, &self.catalog, self.config.page);
        let pages = engine.layout(&blocks)?;

        let info = DocumentInfo::new(DOCUMENT_TITLE);
        let bytes = LopdfRenderer::new(&self.fonts).render_document(&info, &pages)?;
        Ok(bytes)
    }

    /// Writes `{output_dir}/{identifier}.pdf`, replacing any existing file,
    /// and returns its path. Nothing is written unless rendering succeeds.
    pub fn assemble(
        &self,
        input: &DeclarationInput,
        translated_title: &str,
    ) -> Result<PathBuf, DeclarationError> {
        input.validate()?;
        let bytes = self.render_to_bytes(input, translated_title)?;

        let path = self.config.output_dir.join(input.output_filename());
        fs::write(&path, &bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// Validates the input, translates the title markup and writes the document.
pub fn create_declaration_pdf(
    input: &DeclarationInput,
    config: GeneratorConfig,
) -> Result<PathBuf, DeclarationError> {
    input.validate()?;
    let translated = translate(&input.title);
    log::debug!("Translated title: {}", translated);
    Assembler::new(config)?.assemble(input, &translated)
}
