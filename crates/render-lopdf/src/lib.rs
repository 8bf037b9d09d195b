//! PDF renderer for laid-out declaration pages using lopdf.
//!
//! The whole document is built in memory and serialized at the end, so a
//! failure never leaves a partially written file behind.

mod error;
mod fonts;
mod page;
mod renderer;
mod traits;

pub use error::RenderError;
pub use fonts::{resource_name, to_unicode_cmap};
pub use renderer::LopdfRenderer;
pub use traits::{DocumentInfo, DocumentRenderer};
