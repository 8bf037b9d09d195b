use decl_style::dimension::GeometryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
    #[error(transparent)]
    Font(#[from] FontError),
}

pub mod algorithms;
pub mod block;
pub mod engine;
pub mod fonts;
pub mod metrics;
pub mod output;
pub mod text;

pub use self::block::DocumentBlock;
pub use self::engine::LayoutEngine;
pub use self::fonts::{
    BuiltinFont, EmbeddedFont, FaceKey, FontConfig, FontError, FontFace, FontMetrics, FontSet,
};
pub use self::output::{LaidOutPage, PositionedRun};
pub use self::text::GlyphInstance;

#[cfg(test)]
mod test_utils;
