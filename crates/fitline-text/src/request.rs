#![forbid(unsafe_code)]

//! Layout requests and the identity key that scopes a layout session.

use crate::LayoutError;

/// Default ratio of line height to font size.
pub const DEFAULT_LINE_HEIGHT_RATIO: f32 = 1.2;

/// Inclusive font-size range an auto-shrink search may choose from.
///
/// Always finite, positive, and ordered: the only way to build one is
/// [`FontSizeBounds::new`] (deserialization goes through it too).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFontSizeBounds"))]
pub struct FontSizeBounds {
    min: f32,
    max: f32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFontSizeBounds {
    min: f32,
    max: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFontSizeBounds> for FontSizeBounds {
    type Error = LayoutError;

    fn try_from(raw: RawFontSizeBounds) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl FontSizeBounds {
    /// Build bounds, rejecting non-finite, non-positive, or inverted ranges.
    pub fn new(min: f32, max: f32) -> Result<Self, LayoutError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// A degenerate range pinned at one size.
    pub fn fixed(size: f32) -> Result<Self, LayoutError> {
        Self::new(size, size)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min > 0.0
            && self.min <= self.max;
        if ok {
            Ok(())
        } else {
            Err(LayoutError::InvalidFontBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Smallest size a search may return.
    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn clamp(&self, size: f32) -> f32 {
        size.clamp(self.min, self.max)
    }
}

/// Immutable input to every fitting operation.
///
/// `max_lines == 0` means the line count is unbounded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutRequest {
    pub text: String,
    pub max_width: f32,
    pub max_lines: usize,
    pub font_size_bounds: FontSizeBounds,
    pub line_height_ratio: f32,
}

impl LayoutRequest {
    /// Single-line request with the default line height.
    pub fn new(text: impl Into<String>, max_width: f32, font_size_bounds: FontSizeBounds) -> Self {
        Self {
            text: text.into(),
            max_width,
            max_lines: 1,
            font_size_bounds,
            line_height_ratio: DEFAULT_LINE_HEIGHT_RATIO,
        }
    }

    #[must_use]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    #[must_use]
    pub fn line_height_ratio(mut self, ratio: f32) -> Self {
        self.line_height_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        self.font_size_bounds.validate()?;
        if !self.max_width.is_finite() || self.max_width < 0.0 {
            return Err(LayoutError::InvalidWidth(self.max_width));
        }
        if !self.line_height_ratio.is_finite() || self.line_height_ratio <= 0.0 {
            return Err(LayoutError::InvalidLineHeight(self.line_height_ratio));
        }
        Ok(())
    }

    /// Whether the request caps the number of rendered lines.
    #[inline]
    pub fn is_line_bounded(&self) -> bool {
        self.max_lines > 0
    }

    #[inline]
    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_ratio
    }

    /// Height of the box at `font_size`, or `None` when lines are unbounded.
    pub fn max_height(&self, font_size: f32) -> Option<f32> {
        self.is_line_bounded()
            .then(|| self.max_lines as f32 * self.line_height(font_size))
    }

    /// Identity of a layout session rendering this request at `font_size`.
    pub fn key(&self, font_size: f32) -> LayoutKey {
        LayoutKey::new(&self.text, font_size, self.max_width, self.max_lines)
    }
}

/// The fields whose change invalidates any in-flight layout state.
///
/// Floats are compared by bit pattern so the key is `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    text: String,
    font_size_bits: u32,
    max_width_bits: u32,
    max_lines: usize,
}

impl LayoutKey {
    pub fn new(text: &str, font_size: f32, max_width: f32, max_lines: usize) -> Self {
        Self {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
            max_width_bits: max_width.to_bits(),
            max_lines,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f32 {
        f32::from_bits(self.font_size_bits)
    }

    pub fn max_width(&self) -> f32 {
        f32::from_bits(self.max_width_bits)
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }
}
