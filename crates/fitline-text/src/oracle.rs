#![forbid(unsafe_code)]

//! The measurement oracle: the host renderer's view of how text occupies space.
//!
//! The fitting engine never measures text itself. It asks an oracle for a
//! natural (unwrapped) width, or for the lines the renderer actually produced
//! under a width constraint, and reacts to the answer.

use smallvec::SmallVec;

/// Ordered line texts reported by the renderer for one layout pass.
///
/// Read-only feedback: the engine inspects it, never edits it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineAssignment {
    lines: SmallVec<[String; 4]>,
}

impl LineAssignment {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LineAssignment {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}

/// Text measurement provided by the host renderer.
///
/// Both methods return `None` while the renderer has not produced a
/// measurement yet; callers treat that as "not laid out" and defer.
pub trait MeasurementOracle {
    /// Natural width of `text` at `font_size`, with no wrapping applied.
    fn measure_natural(&mut self, text: &str, font_size: f32) -> Option<f32>;

    /// Lines the renderer assigns to `text` when constrained to `max_width`.
    ///
    /// `max_lines == 0` leaves the line count unbounded.
    fn layout_lines(
        &mut self,
        text: &str,
        font_size: f32,
        max_width: f32,
        max_lines: usize,
    ) -> Option<LineAssignment>;
}

impl<O: MeasurementOracle + ?Sized> MeasurementOracle for &mut O {
    fn measure_natural(&mut self, text: &str, font_size: f32) -> Option<f32> {
        (**self).measure_natural(text, font_size)
    }

    fn layout_lines(
        &mut self,
        text: &str,
        font_size: f32,
        max_width: f32,
        max_lines: usize,
    ) -> Option<LineAssignment> {
        (**self).layout_lines(text, font_size, max_width, max_lines)
    }
}
