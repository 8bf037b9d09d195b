use crate::output::{LaidOutPage, PositionedRun};
use crate::text::{LineLayout, finalize_line};
use decl_style::dimension::PageLayout;
use decl_style::paragraph::ParagraphStyle;

// Small epsilon to absorb floating point inaccuracies in fit checks
const EPSILON: f32 = 0.01;

/// Places paragraph lines and spacers onto pages, top to bottom.
///
/// A spacer that does not fit ends the page; the next page is only started
/// once there is content for it, so trailing spacers never produce an
/// empty page.
pub struct Paginator {
    page_width: f32,
    page_height: f32,
    content_left: f32,
    content_top: f32,
    content_bottom: f32,
    content_width: f32,
    pages: Vec<LaidOutPage>,
    cursor_y: f32,
    break_pending: bool,
}

impl Paginator {
    pub fn new(page: &PageLayout) -> Self {
        let page_width = page.width();
        let page_height = page.height();
        Self {
            page_width,
            page_height,
            content_left: page.margins.left,
            content_top: page.margins.top,
            content_bottom: page_height - page.margins.bottom,
            content_width: page.content_width(),
            pages: vec![LaidOutPage::new(page_width, page_height)],
            cursor_y: page.margins.top,
            break_pending: false,
        }
    }

    fn at_page_top(&self) -> bool {
        self.break_pending || self.cursor_y <= self.content_top + EPSILON
    }

    fn start_new_page(&mut self) {
        log::debug!("Starting page {}", self.pages.len() + 1);
        self.pages
            .push(LaidOutPage::new(self.page_width, self.page_height));
        self.cursor_y = self.content_top;
        self.break_pending = false;
    }

    fn current_page(&mut self) -> &mut LaidOutPage {
        // `pages` starts with one page and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Places the lines of one paragraph. `space_before` is dropped at the top
    /// of a page; lines that do not fit move to the next page.
    pub fn place_paragraph(&mut self, style: &ParagraphStyle, lines: &[LineLayout]) {
        if lines.is_empty() {
            return;
        }
        if !self.at_page_top() {
            self.cursor_y += style.space_before;
        }

        let leading = style.leading;
        let line_count = lines.len();
        for (idx, line) in lines.iter().enumerate() {
            if self.break_pending
                || (self.cursor_y + leading > self.content_bottom + EPSILON && !self.at_page_top())
            {
                self.start_new_page();
            }

            let baseline =
                self.cursor_y + (leading - style.font_size) / 2.0 + 0.8 * style.font_size;
            let runs: Vec<PositionedRun> = finalize_line(
                line,
                self.content_left,
                baseline,
                self.content_width,
                style.alignment,
                idx + 1 == line_count,
            );
            self.current_page().runs.extend(runs);
            self.cursor_y += leading;
        }

        self.cursor_y += style.space_after;
    }

    pub fn place_spacer(&mut self, height: f32) {
        if self.break_pending {
            return;
        }
        if self.cursor_y + height > self.content_bottom + EPSILON {
            if !self.at_page_top() {
                self.break_pending = true;
            }
            return;
        }
        self.cursor_y += height;
    }

    pub fn finish(self) -> Vec<LaidOutPage> {
        self.pages
    }
}
