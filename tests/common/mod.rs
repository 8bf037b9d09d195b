pub mod pdf_assertions;

use declaration_pdf::{DeclarationError, DeclarationInput, FontConfig, GeneratorConfig};
use lopdf::Document as LopdfDocument;
use std::path::{Path, PathBuf};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Load a generated PDF back from disk
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)?;
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            doc,
        })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Font settings that never find a font file, so output uses the built-in
/// Helvetica faces regardless of the machine running the tests.
pub fn builtin_fonts() -> FontConfig {
    FontConfig::default()
        .with_family("No Such Family")
        .with_search_dirs(Vec::<PathBuf>::new())
        .with_font_dirs(Vec::<PathBuf>::new())
        .with_system_fonts(false)
}

pub fn config_for(dir: &Path) -> GeneratorConfig {
    GeneratorConfig::default()
        .with_output_dir(dir)
        .with_fonts(builtin_fonts())
}

/// Generate a declaration into `dir` with built-in fonts and load it
pub fn generate_in(
    dir: &Path,
    input: &DeclarationInput,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let path = declaration_pdf::create_declaration_pdf(input, config_for(dir))?;
    GeneratedPdf::load(&path)
}

pub fn generate_err(dir: &Path, input: &DeclarationInput) -> DeclarationError {
    match declaration_pdf::create_declaration_pdf(input, config_for(dir)) {
        Ok(path) => panic!("expected an error, got {}", path.display()),
        Err(err) => err,
    }
}
