use crate::error::RenderError;
use decl_layout::LaidOutPage;

/// Document-level metadata written to the PDF info dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            producer: concat!("declaration-pdf ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A trait for document renderers, abstracting the PDF-writing primitives.
pub trait DocumentRenderer {
    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &LaidOutPage) -> Result<(), RenderError>;

    /// Completes the document and returns the serialized file.
    fn finish(self) -> Result<Vec<u8>, RenderError>;
}
