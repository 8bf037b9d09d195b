use decl_layout::{FontError, LayoutError};
use decl_render_lopdf::RenderError;
use std::fmt;
use thiserror::Error;

/// The user-supplied fields that must not be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Identifier,
    Title,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Identifier => f.write_str("Publication ID"),
            InputField::Title => f.write_str("Title"),
        }
    }
}

/// A comprehensive error type for declaration generation.
#[derive(Error, Debug)]
pub enum DeclarationError {
    #[error("{field} is required")]
    MissingInput { field: InputField },

    #[error("Font resolution failed: {0}")]
    Font(#[from] FontError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
