#![forbid(unsafe_code)]

//! A deterministic reference oracle built on Unicode cell widths.
//!
//! Every grapheme advances by `cell_width * font_size * advance_ratio`, with
//! wide (CJK, emoji) graphemes taking two cells. It stands in for a real
//! renderer in tests, benchmarks, and headless hosts.
//!
//! # Example
//! ```
//! use fitline_text::{BreakStrategy, MeasurementOracle, MonospaceOracle};
//!
//! // 10 units per cell at font size 10: a 100-unit box holds 10 cells.
//! let mut oracle = MonospaceOracle::new(1.0).strategy(BreakStrategy::Greedy);
//! let lines = oracle.layout_lines("Hydrogen Peroxide", 10.0, 100.0, 0).unwrap();
//! assert_eq!(lines.lines(), ["Hydrogen P", "eroxide"]);
//! ```

use crate::oracle::{LineAssignment, MeasurementOracle};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How the emulated renderer chooses soft line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakStrategy {
    /// Fill each line grapheme by grapheme, splitting words freely.
    Greedy,
    /// Break at whitespace; split a word only when it alone overflows a line.
    #[default]
    WordFirst,
}

/// Oracle with a fixed advance per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceOracle {
    advance_ratio: f32,
    strategy: BreakStrategy,
}

impl MonospaceOracle {
    /// `advance_ratio` is the width of one cell as a fraction of the font size.
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            strategy: BreakStrategy::default(),
        }
    }

    #[must_use]
    pub fn strategy(mut self, strategy: BreakStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Width of a single cell at `font_size`.
    #[inline]
    pub fn cell_advance(&self, font_size: f32) -> f32 {
        font_size * self.advance_ratio
    }

    /// Whole cells that fit in `max_width` at `font_size` (at least one).
    fn columns(&self, font_size: f32, max_width: f32) -> usize {
        let advance = self.cell_advance(font_size);
        if advance <= 0.0 || !advance.is_finite() {
            return usize::MAX;
        }
        // Absorb float noise such as 100.0 / 10.000001.
        let cols = (max_width / advance + 1e-4).floor();
        if cols < 1.0 { 1 } else { cols as usize }
    }
}

impl Default for MonospaceOracle {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl MeasurementOracle for MonospaceOracle {
    fn measure_natural(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let cells = text.split('\n').map(str::width).max().unwrap_or(0);
        Some(cells as f32 * self.cell_advance(font_size))
    }

    fn layout_lines(
        &mut self,
        text: &str,
        font_size: f32,
        max_width: f32,
        max_lines: usize,
    ) -> Option<LineAssignment> {
        let cols = self.columns(font_size, max_width);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            match self.strategy {
                BreakStrategy::Greedy => wrap_greedy(paragraph, cols, &mut lines),
                BreakStrategy::WordFirst => wrap_word_first(paragraph, cols, &mut lines),
            }
        }
        if max_lines > 0 {
            lines.truncate(max_lines);
        }
        Some(LineAssignment::from_lines(lines))
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Grapheme-by-grapheme fill. A space that would start a wrapped line is
/// swallowed, the way platform renderers hang it off the previous line.
fn wrap_greedy(paragraph: &str, cols: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut width = 0;
    let mut wrapped = false;

    for grapheme in paragraph.graphemes(true) {
        let grapheme_width = grapheme.width();
        if width + grapheme_width > cols && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0;
            wrapped = true;
        }
        if wrapped && current.is_empty() && is_blank(grapheme) {
            continue;
        }
        current.push_str(grapheme);
        width += grapheme_width;
    }

    lines.push(current);
}

/// Word-level fill with grapheme fallback for over-long words.
fn wrap_word_first(paragraph: &str, cols: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut width = 0;

    for run in split_runs(paragraph) {
        let run_width = run.width();
        if width + run_width <= cols {
            current.push_str(run);
            width += run_width;
            continue;
        }

        if is_blank(run) {
            // Whitespace at a soft break hangs off the line and is dropped.
            lines.push(std::mem::take(&mut current).trim_end().to_string());
            width = 0;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current).trim_end().to_string());
            width = 0;
        }

        if run_width <= cols {
            current.push_str(run);
            width = run_width;
            continue;
        }

        for grapheme in run.graphemes(true) {
            let grapheme_width = grapheme.width();
            if width + grapheme_width > cols && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                width = 0;
            }
            current.push_str(grapheme);
            width += grapheme_width;
        }
    }

    if !current.is_empty() || lines.is_empty() || paragraph.is_empty() {
        lines.push(current);
    }
}

/// Split into alternating whitespace / non-whitespace runs.
fn split_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_blank = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let blank = is_blank(grapheme);
        if in_blank.is_some_and(|prev| prev != blank) {
            runs.push(&text[start..idx]);
            start = idx;
        }
        in_blank = Some(blank);
    }
    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}
