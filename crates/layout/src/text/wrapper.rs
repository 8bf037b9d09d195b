use super::shaper::ShapedText;
use crate::fonts::FaceKey;
use crate::output::PositionedRun;
use decl_style::color::Color;
use decl_style::text::TextAlign;

/// Slack allowed when comparing a line against the available width.
const WIDTH_EPSILON: f32 = 1e-3;

/// Text shaped with one face at one size and baseline rise.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub face: FaceKey,
    pub font_size: f32,
    pub rise: f32,
    pub color: Color,
    pub shaped: ShapedText,
}

/// A breakable unit of a paragraph. A word may span several fragments
/// (e.g. `mc<super>2</super>`); a line never breaks inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Word(Vec<Fragment>),
    Space(Fragment),
}

impl Item {
    pub fn width(&self) -> f32 {
        match self {
            Item::Word(fragments) => fragments.iter().map(|f| f.shaped.width).sum(),
            Item::Space(fragment) => fragment.shaped.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub items: Vec<Item>,
    /// Natural width, including interior spaces.
    pub width: f32,
}

impl LineLayout {
    fn space_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, Item::Space(_)))
            .count()
    }
}

/// Greedy line breaking at spaces. A word wider than `max_width` is put on
/// a line of its own and overflows. Spaces at either end of a line are dropped.
pub fn break_lines(items: Vec<Item>, max_width: f32) -> Vec<LineLayout> {
    let mut lines = Vec::new();
    let mut current_items: Vec<Item> = Vec::new();
    let mut current_width = 0.0;
    let mut pending_space: Option<Item> = None;

    for item in items {
        if matches!(item, Item::Space(_)) {
            if !current_items.is_empty() {
                pending_space = Some(item);
            }
            continue;
        }

        let space_width = pending_space.as_ref().map_or(0.0, Item::width);
        let word_width = item.width();
        if !current_items.is_empty()
            && current_width + space_width + word_width > max_width + WIDTH_EPSILON
        {
            lines.push(LineLayout {
                items: std::mem::take(&mut current_items),
                width: current_width,
            });
            current_width = 0.0;
            pending_space = None;
        }

        if let Some(space) = pending_space.take() {
            current_width += space.width();
            current_items.push(space);
        }
        current_width += word_width;
        current_items.push(item);
    }

    if !current_items.is_empty() {
        lines.push(LineLayout {
            items: current_items,
            width: current_width,
        });
    }

    lines
}

/// Positions the fragments of one line, starting at `origin_x`.
///
/// Justified lines spread the free width over their interior spaces, except
/// the last line of the paragraph, which is left-aligned. Adjacent fragments
/// sharing face, size, rise and color are merged into one run.
pub fn finalize_line(
    line: &LineLayout,
    origin_x: f32,
    baseline: f32,
    max_width: f32,
    alignment: TextAlign,
    is_last_line: bool,
) -> Vec<PositionedRun> {
    let free = (max_width - line.width).max(0.0);
    let spaces = line.space_count();

    let (offset, space_extra) = match alignment {
        TextAlign::Left => (0.0, 0.0),
        TextAlign::Right => (free, 0.0),
        TextAlign::Center => (free / 2.0, 0.0),
        TextAlign::Justify if !is_last_line && spaces > 0 => (0.0, free / spaces as f32),
        TextAlign::Justify => (0.0, 0.0),
    };

    let mut runs = Vec::new();
    let mut x = origin_x + offset;
    for item in &line.items {
        match item {
            Item::Word(fragments) => {
                for fragment in fragments {
                    push_fragment(&mut runs, fragment, x, baseline, 0.0);
                    x += fragment.shaped.width;
                }
            }
            Item::Space(fragment) => {
                push_fragment(&mut runs, fragment, x, baseline, space_extra);
                x += fragment.shaped.width + space_extra;
            }
        }
    }
    runs
}

fn push_fragment(
    runs: &mut Vec<PositionedRun>,
    fragment: &Fragment,
    x: f32,
    baseline: f32,
    extra: f32,
) {
    let mut glyphs = fragment.shaped.glyphs.clone();
    if extra > 0.0 {
        if let Some(last) = glyphs.last_mut() {
            last.advance += extra;
        }
    }
    let width = fragment.shaped.width + extra;

    if let Some(run) = runs.last_mut() {
        if run.face == fragment.face
            && run.font_size == fragment.font_size
            && run.rise == fragment.rise
            && run.color == fragment.color
        {
            run.glyphs.extend(glyphs);
            run.width += width;
            return;
        }
    }

    runs.push(PositionedRun {
        x,
        baseline,
        face: fragment.face,
        font_size: fragment.font_size,
        rise: fragment.rise,
        color: fragment.color,
        glyphs,
        width,
    });
}
