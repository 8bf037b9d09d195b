pub mod catalog;
pub mod color;
pub mod dimension;
pub mod font;
pub mod paragraph;
pub mod text;

pub use catalog::{StyleCatalog, StyleName};
pub use color::Color;
pub use dimension::{GeometryError, Margins, PageLayout, PageSize, cm};
pub use font::{FontStyle, FontWeight};
pub use paragraph::{ParagraphStyle, StyleOverrides, derive_style};
pub use text::TextAlign;
