//! The fixed catalog of named paragraph styles used by the declaration template.

use crate::color::Color;
use crate::font::FontWeight;
use crate::paragraph::{ParagraphStyle, StyleOverrides, derive_style};
use crate::text::TextAlign;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Title,
    BodyJustified,
    BodyLeft,
    BoldLeft,
    BoldRight,
    SmallPrint,
    NormalRight,
}

impl StyleName {
    pub const ALL: [StyleName; 7] = [
        StyleName::Title,
        StyleName::BodyJustified,
        StyleName::BodyLeft,
        StyleName::BoldLeft,
        StyleName::BoldRight,
        StyleName::SmallPrint,
        StyleName::NormalRight,
    ];
}

/// Immutable map from [`StyleName`] to its flat record, built once per run.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: HashMap<StyleName, Arc<ParagraphStyle>>,
}

impl StyleCatalog {
    /// Builds the declaration styles by deriving each one from its parent record.
    pub fn standard() -> Self {
        let normal = ParagraphStyle::normal();
        let heading1 = ParagraphStyle::heading1();

        let title = derive_style(
            &heading1,
            "CustomTitle",
            StyleOverrides::new()
                .font_size(14.0)
                .color(Color::BLACK)
                .space_after(12.0)
                .alignment(TextAlign::Left)
                .font_weight(FontWeight::Bold),
        );
        let body_justified = derive_style(
            &normal,
            "CustomNormalJustified",
            StyleOverrides::new()
                .font_size(11.0)
                .leading(14.0)
                .alignment(TextAlign::Justify),
        );
        let body_left = derive_style(
            &body_justified,
            "CustomNormalLeft",
            StyleOverrides::new().alignment(TextAlign::Left),
        );
        let bold_left = derive_style(
            &body_left,
            "CustomBold",
            StyleOverrides::new().font_weight(FontWeight::Bold),
        );
        let small_print = derive_style(
            &normal,
            "Small",
            StyleOverrides::new()
                .font_size(9.0)
                .leading(11.0)
                .alignment(TextAlign::Justify),
        );
        let bold_right = derive_style(
            &bold_left,
            "RightBold",
            StyleOverrides::new().alignment(TextAlign::Right),
        );
        let normal_right = derive_style(
            &body_left,
            "RightNormal",
            StyleOverrides::new().alignment(TextAlign::Right),
        );

        let styles = HashMap::from([
            (StyleName::Title, Arc::new(title)),
            (StyleName::BodyJustified, Arc::new(body_justified)),
            (StyleName::BodyLeft, Arc::new(body_left)),
            (StyleName::BoldLeft, Arc::new(bold_left)),
            (StyleName::BoldRight, Arc::new(bold_right)),
            (StyleName::SmallPrint, Arc::new(small_print)),
            (StyleName::NormalRight, Arc::new(normal_right)),
        ]);

        Self { styles }
    }

    /// Every [`StyleName`] is present in the standard catalog, so lookups always succeed.
    pub fn get(&self, name: StyleName) -> &Arc<ParagraphStyle> {
        &self.styles[&name]
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
