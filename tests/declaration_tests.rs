mod common;

use common::pdf_assertions::{extract_text, get_page_dimensions, has_embedded_truetype, text_rises};
use common::{GeneratedPdf, TestResult, generate_err, generate_in, init_logging};
use declaration_pdf::{DeclarationError, DeclarationInput, FontConfig, GeneratorConfig, InputField};

#[test]
fn test_minimal_declaration_is_written() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;

    let pdf = generate_in(dir.path(), &DeclarationInput::new("001", "Test"))?;

    assert_eq!(pdf.path, dir.path().join("001.pdf"));
    assert!(pdf.bytes.starts_with(b"%PDF"));
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "ORCID: 0000-0003-2714-2706");
    assert_pdf_contains_text!(pdf, "(data i czytelny podpis)");
    assert_pdf_contains_text!(pdf, "Pouczenia:");
    Ok(())
}

#[test]
fn test_page_is_a4() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let pdf = generate_in(dir.path(), &DeclarationInput::new("a4", "Test"))?;

    let (width, height) = get_page_dimensions(&pdf.doc, 1).expect("page 1 has a MediaBox");
    assert!((width - 595.28).abs() < 0.1, "width was {}", width);
    assert!((height - 841.89).abs() < 0.1, "height was {}", height);
    Ok(())
}

#[test]
fn test_builtin_fallback_uses_helvetica() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let pdf = generate_in(dir.path(), &DeclarationInput::new("fonts", "Test"))?;

    assert_pdf_has_font!(pdf, "Helvetica");
    assert_pdf_has_font!(pdf, "Helvetica-Bold");
    Ok(())
}

#[test]
fn test_journal_and_year_follow_the_authors() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let input = DeclarationInput::new("002", "Some Measurement")
        .with_journal("Physics Letters B")
        .with_year("2024");

    let pdf = generate_in(dir.path(), &input)?;
    let text = extract_text(&pdf.doc);

    let title = text.find("Some Measurement").expect("title present");
    let authors = text.find("R. Aaij").expect("authors present");
    let journal = text.find("Physics Letters B").expect("journal present");
    let year = text.find("2024").expect("year present");
    assert!(title < authors);
    assert!(authors < journal);
    assert!(journal < year);
    Ok(())
}

#[test]
fn test_empty_optional_fields_are_left_out() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let pdf = generate_in(dir.path(), &DeclarationInput::new("003", "Test"))?;

    assert_pdf_not_contains_text!(pdf, "Physics Letters B");
    assert_pdf_not_contains_text!(pdf, "2024");
    Ok(())
}

#[test]
fn test_title_markup_is_translated() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let pdf = generate_in(dir.path(), &DeclarationInput::new("004", "$E=mc^2$ decay"))?;

    // The dollar signs are stripped and the exponent becomes its own run.
    assert_pdf_contains_text!(pdf, "E=mc");
    assert_pdf_not_contains_text!(pdf, "$");
    assert_pdf_not_contains_text!(pdf, "^");
    Ok(())
}

#[test]
fn test_same_identifier_overwrites() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;

    generate_in(dir.path(), &DeclarationInput::new("005", "First title"))?;
    let pdf = generate_in(dir.path(), &DeclarationInput::new("005", "Second title"))?;

    assert_pdf_contains_text!(pdf, "Second title");
    assert_pdf_not_contains_text!(pdf, "First title");
    let entries = std::fs::read_dir(dir.path())?.count();
    assert_eq!(entries, 1);
    Ok(())
}

#[test]
fn test_missing_identifier_writes_nothing() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;

    let err = generate_err(dir.path(), &DeclarationInput::new("", "Test"));
    assert!(matches!(
        err,
        DeclarationError::MissingInput {
            field: InputField::Identifier
        }
    ));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_missing_title_writes_nothing() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;

    let err = generate_err(dir.path(), &DeclarationInput::new("006", "  "));
    assert!(matches!(
        err,
        DeclarationError::MissingInput {
            field: InputField::Title
        }
    ));
    assert!(!dir.path().join("006.pdf").exists());
    Ok(())
}

#[test]
fn test_missing_family_without_fallback_is_an_error() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let config = GeneratorConfig::default()
        .with_output_dir(dir.path())
        .with_fonts(common::builtin_fonts().with_builtin_fallback(false));

    let err = declaration_pdf::create_declaration_pdf(&DeclarationInput::new("007", "Test"), config)
        .unwrap_err();
    assert!(matches!(err, DeclarationError::Font(_)));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

/// Resolves DejaVu Sans from the system fonts; a missing installation is
/// an error rather than a silent Helvetica fallback.
fn dejavu_config(dir: &std::path::Path) -> GeneratorConfig {
    GeneratorConfig::default().with_output_dir(dir).with_fonts(
        FontConfig::default()
            .with_search_dirs(Vec::<std::path::PathBuf>::new())
            .with_font_dirs(Vec::<std::path::PathBuf>::new())
            .with_system_fonts(true)
            .with_builtin_fallback(false),
    )
}

#[test]
fn test_installed_family_is_embedded() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let input = DeclarationInput::new("008", r"\bar{K} meson");

    let path = declaration_pdf::create_declaration_pdf(&input, dejavu_config(dir.path()))
        .map_err(|e| format!("DejaVu Sans must be installed for this test: {}", e))?;
    let pdf = GeneratedPdf::load(&path)?;

    assert_pdf_has_font!(pdf, "DejaVuSans");
    assert_pdf_has_font!(pdf, "DejaVuSans-Bold");
    assert!(has_embedded_truetype(&pdf.doc));
    Ok(())
}

#[test]
fn test_overline_mark_is_raised_above_the_letter() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let input = DeclarationInput::new("009", r"\bar{K} meson");

    let path = declaration_pdf::create_declaration_pdf(&input, dejavu_config(dir.path()))
        .map_err(|e| format!("DejaVu Sans must be installed for this test: {}", e))?;
    let pdf = GeneratedPdf::load(&path)?;

    // Nothing else in the declaration is drawn with a text rise.
    let rises = text_rises(&pdf.doc, 1)?;
    assert!(
        rises.iter().any(|&rise| rise > 0.5),
        "expected a raised combining mark, rises were {:?}",
        rises
    );
    Ok(())
}
