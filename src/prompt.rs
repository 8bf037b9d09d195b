use crate::error::{DeclarationError, InputField};
use crate::input::DeclarationInput;
use std::io::{BufRead, Write};

const ID_PROMPT: &str = "Enter Publication ID (for filename, e.g., '001'): ";
const TITLE_PROMPT: &str = "Enter the title (use LaTeX-like syntax for symbols):\n> ";
const JOURNAL_PROMPT: &str = "Enter the journal name (optional, press Enter to skip): ";
const YEAR_PROMPT: &str = "Enter the publication year (optional, press Enter to skip): ";

/// Asks for the four declaration fields in order.
///
/// Answers are trimmed, and end of input counts as an empty answer. An
/// empty identifier or title stops the dialogue before the next prompt.
/// The title and journal prompts are each preceded by a blank line.
pub fn collect_input<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<DeclarationInput, DeclarationError> {
    let identifier = ask(reader, writer, ID_PROMPT)?;
    if identifier.is_empty() {
        return Err(DeclarationError::MissingInput {
            field: InputField::Identifier,
        });
    }

    writeln!(writer)?;
    let title = ask(reader, writer, TITLE_PROMPT)?;
    if title.is_empty() {
        return Err(DeclarationError::MissingInput {
            field: InputField::Title,
        });
    }

    writeln!(writer)?;
    let journal = ask(reader, writer, JOURNAL_PROMPT)?;
    let year = ask(reader, writer, YEAR_PROMPT)?;

    Ok(DeclarationInput::new(identifier, title)
        .with_journal(journal)
        .with_year(year))
}

fn ask<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<String, DeclarationError> {
    writer.write_all(prompt.as_bytes())?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
