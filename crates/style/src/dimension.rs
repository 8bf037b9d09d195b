//! Defines page size, margins and the unit helpers used to express them.
use thiserror::Error;

/// Points per centimetre (72 pt per inch, 2.54 cm per inch).
const PT_PER_CM: f32 = 72.0 / 2.54;

/// Converts a length in centimetres to points.
pub fn cm(value: f32) -> f32 {
    value * PT_PER_CM
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Page content area is {width:.2}x{height:.2}pt; margins leave no room for content.")]
    NoContentArea { width: f32, height: f32 },
    #[error("Invalid page dimension: {0}")]
    InvalidDimension(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Returns `(width, height)` in points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.275_6, 841.889_8),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical margins first, then horizontal, like the CSS two-value shorthand.
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// Page geometry handed to the layout engine and the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub size: PageSize,
    pub margins: Margins,
}

impl Default for PageLayout {
    /// A4 with 2 cm top/bottom and 2.5 cm left/right margins.
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margins: Margins::symmetric(cm(2.0), cm(2.5)),
        }
    }
}

impl PageLayout {
    pub fn width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    pub fn content_width(&self) -> f32 {
        self.width() - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.height() - self.margins.top - self.margins.bottom
    }

    /// Checks that the page has finite, non-negative dimensions and a usable content area.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let (width, height) = self.size.dimensions_pt();
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::InvalidDimension(format!(
                "page size {}x{}pt",
                width, height
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(GeometryError::InvalidDimension(format!("margins {:?}", m)));
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(GeometryError::NoContentArea {
                width: self.content_width(),
                height: self.content_height(),
            });
        }
        Ok(())
    }
}
