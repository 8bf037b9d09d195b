use crate::template::DeclarantProfile;
use decl_layout::FontConfig;
use decl_style::dimension::PageLayout;
use std::path::{Path, PathBuf};

/// Settings for generating declarations.
///
/// The defaults reproduce the standard AGH declaration: A4 pages, the
/// DejaVu Sans family looked up next to the working directory and files
/// written to the working directory.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub page: PageLayout,
    pub output_dir: PathBuf,
    pub fonts: FontConfig,
    pub profile: DeclarantProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            page: PageLayout::default(),
            output_dir: PathBuf::from("."),
            fonts: FontConfig::default(),
            profile: DeclarantProfile::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_page(mut self, page: PageLayout) -> Self {
        self.page = page;
        self
    }

    /// Directory the `{identifier}.pdf` files are written to. It must exist.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_fonts(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_profile(mut self, profile: DeclarantProfile) -> Self {
        self.profile = profile;
        self
    }
}
