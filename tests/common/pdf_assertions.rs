use lopdf::Document as LopdfDocument;
use std::collections::BTreeSet;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Extract the base font names referenced from page resources
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = BTreeSet::new();

    for page_id in doc.get_pages().values() {
        let Ok(page_dict) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Ok(resources) = page_dict.get(b"Resources") else {
            continue;
        };
        let resources = match resources.as_reference() {
            Ok(id) => doc.get_dictionary(id).ok(),
            Err(_) => resources.as_dict().ok(),
        };
        let Some(font_dict) = resources.and_then(|r| r.get(b"Font").ok()) else {
            continue;
        };
        let font_dict = match font_dict.as_reference() {
            Ok(id) => doc.get_dictionary(id).ok(),
            Err(_) => font_dict.as_dict().ok(),
        };
        let Some(font_dict) = font_dict else {
            continue;
        };

        for (_name, font_ref) in font_dict.iter() {
            let font = match font_ref.as_reference() {
                Ok(id) => doc.get_dictionary(id).ok(),
                Err(_) => font_ref.as_dict().ok(),
            };
            if let Some(font) = font {
                if let Ok(base_font) = font.get(b"BaseFont").and_then(|f| f.as_name()) {
                    fonts.insert(String::from_utf8_lossy(base_font).to_string());
                }
            }
        }
    }

    fonts.into_iter().collect()
}

/// True if any font program is embedded as a TrueType `FontFile2` stream
pub fn has_embedded_truetype(doc: &LopdfDocument) -> bool {
    doc.objects.values().any(|object| {
        object
            .as_dict()
            .map(|dict| dict.has(b"FontFile2"))
            .unwrap_or(false)
    })
}

/// Collect the operands of every `Ts` (text rise) operator on a page
pub fn text_rises(doc: &LopdfDocument, page_num: u32) -> Result<Vec<f32>, lopdf::Error> {
    let Some(page_id) = doc.get_pages().get(&page_num).copied() else {
        return Ok(Vec::new());
    };
    let content = lopdf::content::Content::decode(&doc.get_page_content(page_id)?)?;
    Ok(content
        .operations
        .iter()
        .filter(|op| op.operator == "Ts")
        .filter_map(|op| op.operands.first().and_then(|o| o.as_float().ok()))
        .collect())
}

/// Get the MediaBox width and height of a page
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page_num)?;
    let page = doc.get_dictionary(page_id).ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() != 4 {
        return None;
    }
    let width = media_box[2].as_float().ok()? - media_box[0].as_float().ok()?;
    let height = media_box[3].as_float().ok()? - media_box[1].as_float().ok()?;
    Some((width, height))
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that a font with the given base name is referenced
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $font:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($font)),
            "PDF should reference font '{}', found {:?}",
            $font,
            fonts
        );
    };
}
