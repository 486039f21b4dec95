#![forbid(unsafe_code)]

//! Auto-shrink: the largest font size at which text fits its box.
//!
//! The search starts at the upper bound and steps down by a fixed decrement,
//! the same way a renderer re-measures incrementally, rather than bisecting.
//! At every trial size the rewrap engine settles the text first, so the fit
//! test sees word-safe lines; a size whose settled layout still splits a word
//! does not count as fitting. The last probe is always exactly the lower
//! bound, and the result is never smaller than it: when nothing fits, the
//! floor size is returned with `fits == false`. A search never tries more
//! than [`MAX_PROBES`] sizes, whatever the configured step.

use crate::oracle::MeasurementOracle;
use crate::request::{FontSizeBounds, LayoutRequest};
use crate::rewrap::{RewrapEngine, StableReason, settle};
use fitline_core::FitConfig;

/// Upper limit on the font sizes tried by one search, bounds included.
pub const MAX_PROBES: usize = 64;

/// Result of an auto-shrink search.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrinkOutcome {
    pub font_size: f32,
    /// Word-safe text settled at `font_size`.
    pub display_text: String,
    pub line_count: usize,
    /// Whether `display_text` fits the box at `font_size`.
    pub fits: bool,
    /// Number of font sizes tried.
    pub probes: usize,
}

/// Step-down font-size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkSearch {
    step: f32,
    max_attempts: u32,
    epsilon: f32,
}

impl Default for ShrinkSearch {
    fn default() -> Self {
        Self::with_config(&FitConfig::default())
    }
}

impl ShrinkSearch {
    pub fn new(step: f32) -> Self {
        let defaults = FitConfig::default();
        Self {
            step,
            max_attempts: defaults.max_rewrap_attempts,
            epsilon: defaults.fit_epsilon,
        }
    }

    pub fn with_config(config: &FitConfig) -> Self {
        Self {
            step: config.shrink_step,
            max_attempts: config.max_rewrap_attempts,
            epsilon: config.fit_epsilon,
        }
    }

    /// Rewrap edit cap used at each trial size.
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Font sizes probed for `bounds`, strictly decreasing from `bounds.max()`
    /// and ending at `bounds.min()`.
    ///
    /// A step too small to cover the range in [`MAX_PROBES`] sizes is widened
    /// to do so. A non-positive or non-finite step probes only the two bounds.
    pub fn candidates(&self, bounds: FontSizeBounds) -> Vec<f32> {
        let (min, max) = (bounds.min(), bounds.max());
        let mut sizes = vec![max];
        if max <= min {
            return sizes;
        }
        if self.step > 0.0 && self.step.is_finite() {
            let widest = (max - min) / (MAX_PROBES - 1) as f32;
            let step = self.step.max(widest);
            if step > self.step {
                tracing::debug!(step = self.step, widened = step, "shrink step widened");
            }
            for k in 1..MAX_PROBES - 1 {
                let size = max - step * k as f32;
                if size <= min {
                    break;
                }
                if sizes.last().is_some_and(|&prev| size >= prev) {
                    continue;
                }
                sizes.push(size);
            }
        }
        sizes.push(min);
        sizes
    }

    /// Find the largest candidate size at which `request` fits.
    ///
    /// Returns `None` if the oracle could not lay the text out yet.
    pub fn find_fitting_font_size<O>(
        &self,
        oracle: &mut O,
        request: &LayoutRequest,
    ) -> Option<ShrinkOutcome>
    where
        O: MeasurementOracle + ?Sized,
    {
        let candidates = self.candidates(request.font_size_bounds);
        let total = candidates.len();
        let mut last = None;

        for (probe, font_size) in candidates.into_iter().enumerate() {
            let mut engine = RewrapEngine::new(&request.text, self.max_attempts);
            // Unbounded: a renderer capped at the budget would hide overflow.
            let settled = settle(oracle, &mut engine, font_size, request.max_width, 0)?;

            let line_count = settled.lines.line_count();
            let word_safe = settled.reason == StableReason::Clean;
            let lines_ok = !request.is_line_bounded() || line_count <= request.max_lines;
            let mut width_ok = true;
            if word_safe && lines_ok {
                for line in settled.lines.iter() {
                    let width = oracle.measure_natural(line, font_size)?;
                    if width > request.max_width + self.epsilon {
                        width_ok = false;
                        break;
                    }
                }
            }
            let fits = word_safe && lines_ok && width_ok;

            tracing::trace!(font_size, line_count, fits, "shrink probe");

            let outcome = ShrinkOutcome {
                font_size,
                display_text: settled.display_text,
                line_count,
                fits,
                probes: probe + 1,
            };
            if fits {
                tracing::debug!(font_size, probes = probe + 1, "shrink search fit");
                return Some(outcome);
            }
            last = Some(outcome);
        }

        if let Some(outcome) = &last {
            tracing::debug!(
                font_size = outcome.font_size,
                probes = total,
                "no size fits, clamping to lower bound"
            );
        }
        last
    }
}

/// Convenience wrapper using the default search settings.
pub fn find_fitting_font_size<O>(oracle: &mut O, request: &LayoutRequest) -> Option<ShrinkOutcome>
where
    O: MeasurementOracle + ?Sized,
{
    ShrinkSearch::default().find_fitting_font_size(oracle, request)
}
