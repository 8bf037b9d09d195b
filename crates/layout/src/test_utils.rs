use crate::LayoutError;
use crate::block::DocumentBlock;
use crate::engine::LayoutEngine;
use crate::fonts::FontSet;
use crate::output::{LaidOutPage, PositionedRun};
use decl_style::catalog::StyleCatalog;
use decl_style::dimension::{Margins, PageLayout, PageSize};
use std::path::{Path, PathBuf};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A square-ish page with uniform margins, for predictable content widths.
pub fn test_page(width: f32, height: f32, margin: f32) -> PageLayout {
    PageLayout {
        size: PageSize::Custom { width, height },
        margins: Margins::all(margin),
    }
}

/// Lays out blocks with the built-in Helvetica faces, which need no font files.
pub fn layout_blocks(
    page: PageLayout,
    blocks: &[DocumentBlock],
) -> Result<Vec<LaidOutPage>, LayoutError> {
    init_logging();
    let fonts = FontSet::builtin();
    let catalog = StyleCatalog::standard();
    LayoutEngine::new(&fonts, &catalog, page).layout(blocks)
}

pub fn find_run_with_text<'a>(pages: &'a [LaidOutPage], content: &str) -> Option<&'a PositionedRun> {
    pages
        .iter()
        .flat_map(|page| page.runs.iter())
        .find(|run| run.text().contains(content))
}

/// Distinct baselines on a page, top to bottom.
pub fn line_baselines(page: &LaidOutPage) -> Vec<f32> {
    let mut baselines: Vec<f32> = Vec::new();
    for run in &page.runs {
        if !baselines.iter().any(|b| (b - run.baseline).abs() < 0.01) {
            baselines.push(run.baseline);
        }
    }
    baselines
}

/// Directory holding the installed `DejaVuSans.ttf`, found through the
/// system font index.
pub fn dejavu_dir() -> Option<PathBuf> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    db.faces().find_map(|face| match &face.source {
        fontdb::Source::File(path) if path.file_name().is_some_and(|name| name == "DejaVuSans.ttf") => {
            path.parent().map(Path::to_path_buf)
        }
        _ => None,
    })
}

/// Copies the regular, bold and oblique DejaVu Sans files into `target`.
pub fn copy_dejavu_family(target: &Path) {
    let source = dejavu_dir().expect("DejaVu Sans must be installed for embedded font tests");
    std::fs::create_dir_all(target).unwrap();
    for file in ["DejaVuSans.ttf", "DejaVuSans-Bold.ttf", "DejaVuSans-Oblique.ttf"] {
        std::fs::copy(source.join(file), target.join(file)).unwrap();
    }
}
