use decl_style::catalog::StyleName;

/// One unit of document content. Blocks are laid out in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBlock {
    /// Inline rich-text markup set in a catalog style.
    Paragraph { style: StyleName, markup: String },
    /// Vertical space in points.
    Spacer { height: f32 },
}

impl DocumentBlock {
    pub fn paragraph(style: StyleName, markup: impl Into<String>) -> Self {
        DocumentBlock::Paragraph {
            style,
            markup: markup.into(),
        }
    }

    pub fn spacer(height: f32) -> Self {
        DocumentBlock::Spacer { height }
    }
}
