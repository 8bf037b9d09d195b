//! Markup handling for declaration titles.
//!
//! - [`translate`] rewrites LaTeX-like math escapes (`^{..}`, `_x`, `\psi`,
//!   `\bar{B}`, `$`) into inline rich-text tags.
//! - [`parse_inline`] reads inline rich-text (`<b>`, `<i>`, `<super>`, `<sub>`
//!   and character entities) into formatted spans for layout.

pub mod inline;
pub mod translate;

pub use inline::{InlineSpan, Script, parse_inline};
pub use translate::translate;
