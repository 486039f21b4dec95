#![forbid(unsafe_code)]

use std::fmt;

/// Rejected layout input.
///
/// Layout itself never fails; these only come out of constructing or
/// validating a [`LayoutRequest`](crate::LayoutRequest).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// Font-size bounds were non-finite, non-positive, or inverted.
    InvalidFontBounds { min: f32, max: f32 },
    /// Width budget was non-finite or negative.
    InvalidWidth(f32),
    /// Line-height ratio was non-finite or non-positive.
    InvalidLineHeight(f32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFontBounds { min, max } => {
                write!(f, "invalid font size bounds: min={min}, max={max}")
            }
            Self::InvalidWidth(width) => write!(f, "invalid width budget: {width}"),
            Self::InvalidLineHeight(ratio) => write!(f, "invalid line height ratio: {ratio}"),
        }
    }
}

impl std::error::Error for LayoutError {}
