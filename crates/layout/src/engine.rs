use crate::LayoutError;
use crate::algorithms::Paginator;
use crate::block::DocumentBlock;
use crate::fonts::FontSet;
use crate::output::LaidOutPage;
use crate::text::{LineLayout, break_lines, build_items};
use decl_markup::parse_inline;
use decl_style::catalog::StyleCatalog;
use decl_style::dimension::PageLayout;
use decl_style::paragraph::ParagraphStyle;

/// Lays out document blocks onto pages of a fixed geometry.
///
/// The engine borrows the resolved fonts and the style catalog; both are
/// built once at startup and never change.
pub struct LayoutEngine<'a> {
    fonts: &'a FontSet,
    catalog: &'a StyleCatalog,
    page: PageLayout,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(fonts: &'a FontSet, catalog: &'a StyleCatalog, page: PageLayout) -> Self {
        Self {
            fonts,
            catalog,
            page,
        }
    }

    /// Lays out `blocks` in order. Always returns at least one page.
    pub fn layout(&self, blocks: &[DocumentBlock]) -> Result<Vec<LaidOutPage>, LayoutError> {
        self.page.validate()?;

        let mut paginator = Paginator::new(&self.page);
        for block in blocks {
            match block {
                DocumentBlock::Paragraph { style, markup } => {
                    let style = self.catalog.get(*style);
                    let lines = self.break_paragraph(style, markup)?;
                    paginator.place_paragraph(style, &lines);
                }
                DocumentBlock::Spacer { height } => paginator.place_spacer(*height),
            }
        }

        let pages = paginator.finish();
        log::debug!("Laid out {} blocks onto {} page(s)", blocks.len(), pages.len());
        Ok(pages)
    }

    /// Parses, shapes and line-breaks one paragraph against the content width.
    pub fn break_paragraph(
        &self,
        style: &ParagraphStyle,
        markup: &str,
    ) -> Result<Vec<LineLayout>, LayoutError> {
        let spans = parse_inline(markup);
        let items = build_items(&spans, style, self.fonts)?;
        Ok(break_lines(items, self.page.content_width()))
    }
}
