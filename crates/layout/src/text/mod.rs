pub mod builder;
pub mod shaper;
pub mod wrapper;

pub use builder::build_items;
pub use shaper::{GlyphInstance, ShapedText, shape_text};
pub use wrapper::{Fragment, Item, LineLayout, break_lines, finalize_line};
