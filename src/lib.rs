//! Generates the AGH scientific-achievement declaration as a PDF.
//!
//! The pipeline is: collect the publication details, translate the
//! LaTeX-like title markup ([`decl_markup::translate`]), assemble the fixed
//! document ([`Assembler`]), lay it out and write `{identifier}.pdf`.

pub mod assembler;
pub mod config;
pub mod error;
pub mod input;
pub mod prompt;
pub mod template;

pub use assembler::{Assembler, DOCUMENT_TITLE, create_declaration_pdf};
pub use config::GeneratorConfig;
pub use error::{DeclarationError, InputField};
pub use input::DeclarationInput;
pub use prompt::collect_input;
pub use template::{DeclarantProfile, build_blocks};

pub use decl_layout::{FontConfig, FontSet};
pub use decl_markup::translate;
