use crate::error::{DeclarationError, InputField};

/// The four values collected for one declaration.
///
/// `journal` and `year` are optional; an empty string means the line is
/// left out of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationInput {
    pub identifier: String,
    pub title: String,
    pub journal: String,
    pub year: String,
}

impl DeclarationInput {
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = journal.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Identifier and title must be non-empty; nothing else is checked.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        if self.identifier.trim().is_empty() {
            return Err(DeclarationError::MissingInput {
                field: InputField::Identifier,
            });
        }
        if self.title.trim().is_empty() {
            return Err(DeclarationError::MissingInput {
                field: InputField::Title,
            });
        }
        Ok(())
    }

    /// The identifier is used verbatim as the file stem.
    pub fn output_filename(&self) -> String {
        format!("{}.pdf", self.identifier)
    }
}
