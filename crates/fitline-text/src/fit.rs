#![forbid(unsafe_code)]

//! Single-line versus multi-line decision.
//!
//! One natural-width measurement decides whether text renders capped to a
//! single line (no rewrap pass) or hands off to the rewrap engine with the
//! request's line budget. The decision is cached per `(text, font_size,
//! max_width)` and recomputed only when one of those changes.

use crate::oracle::MeasurementOracle;
use crate::request::LayoutRequest;

pub use fitline_core::config::DEFAULT_FIT_EPSILON;

/// How text should be handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Render on one line; no rewrap pass.
    Single,
    /// Render wrapped, at most `max_lines` lines (`0` = unbounded).
    Multi { max_lines: usize },
}

impl LineMode {
    /// Line cap to pass to the renderer.
    pub fn line_cap(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Multi { max_lines } => max_lines,
        }
    }
}

/// Decide between single- and multi-line rendering from one measurement.
///
/// `epsilon` absorbs sub-pixel rounding in the renderer's width report.
/// Returns `None` when the oracle has no measurement yet.
pub fn decide<O>(
    oracle: &mut O,
    text: &str,
    font_size: f32,
    max_width: f32,
    max_lines: usize,
    epsilon: f32,
) -> Option<LineMode>
where
    O: MeasurementOracle + ?Sized,
{
    let natural = oracle.measure_natural(text, font_size)?;
    let mode = if natural <= max_width + epsilon {
        LineMode::Single
    } else {
        LineMode::Multi { max_lines }
    };
    tracing::trace!(natural, max_width, ?mode, "single-line fit decided");
    Some(mode)
}

#[derive(Debug, Clone, PartialEq)]
struct DecisionKey {
    text: String,
    font_size_bits: u32,
    max_width_bits: u32,
}

impl DecisionKey {
    fn matches(&self, text: &str, font_size: f32, max_width: f32) -> bool {
        self.text == text
            && self.font_size_bits == font_size.to_bits()
            && self.max_width_bits == max_width.to_bits()
    }
}

/// Memoizing single-line decider owned by one widget.
#[derive(Debug, Clone)]
pub struct SingleLineFit {
    epsilon: f32,
    cached: Option<(DecisionKey, LineMode)>,
}

impl Default for SingleLineFit {
    fn default() -> Self {
        Self::new(DEFAULT_FIT_EPSILON)
    }
}

impl SingleLineFit {
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            cached: None,
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Cached decision for the request at `font_size`, measuring only when
    /// the text, size, or width changed since the last call.
    pub fn decide<O>(
        &mut self,
        oracle: &mut O,
        request: &LayoutRequest,
        font_size: f32,
    ) -> Option<LineMode>
    where
        O: MeasurementOracle + ?Sized,
    {
        if let Some((key, mode)) = &self.cached {
            if key.matches(&request.text, font_size, request.max_width) {
                // The line budget is not part of the key; refresh it.
                return Some(match mode {
                    LineMode::Single => LineMode::Single,
                    LineMode::Multi { .. } => LineMode::Multi {
                        max_lines: request.max_lines,
                    },
                });
            }
        }

        let mode = decide(
            oracle,
            &request.text,
            font_size,
            request.max_width,
            request.max_lines,
            self.epsilon,
        )?;
        self.cached = Some((
            DecisionKey {
                text: request.text.clone(),
                font_size_bits: font_size.to_bits(),
                max_width_bits: request.max_width.to_bits(),
            },
            mode,
        ));
        Some(mode)
    }

    /// The last decision, if still cached.
    pub fn current(&self) -> Option<LineMode> {
        self.cached.as_ref().map(|(_, mode)| *mode)
    }

    /// Drop the cached decision so the next call measures again.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::LineAssignment;
    use crate::{FontSizeBounds, MonospaceOracle};

    /// Fixed natural width, counting measurement calls.
    struct FixedWidth {
        width: Option<f32>,
        calls: usize,
    }

    impl MeasurementOracle for FixedWidth {
        fn measure_natural(&mut self, _text: &str, _font_size: f32) -> Option<f32> {
            self.calls += 1;
            self.width
        }

        fn layout_lines(
            &mut self,
            text: &str,
            _font_size: f32,
            _max_width: f32,
            _max_lines: usize,
        ) -> Option<LineAssignment> {
            Some(LineAssignment::from_lines([text]))
        }
    }

    fn request(text: &str, width: f32) -> LayoutRequest {
        LayoutRequest::new(text, width, FontSizeBounds::new(8.0, 16.0).unwrap()).max_lines(3)
    }

    #[test]
    fn fits_within_epsilon_is_single() {
        let mut oracle = FixedWidth {
            width: Some(100.4),
            calls: 0,
        };
        assert_eq!(
            decide(&mut oracle, "Oxygen", 12.0, 100.0, 3, 0.5),
            Some(LineMode::Single)
        );
    }

    #[test]
    fn overflow_is_multi_with_budget() {
        let mut oracle = FixedWidth {
            width: Some(100.6),
            calls: 0,
        };
        assert_eq!(
            decide(&mut oracle, "Oxygen", 12.0, 100.0, 3, 0.5),
            Some(LineMode::Multi { max_lines: 3 })
        );
    }

    #[test]
    fn unavailable_measurement_defers() {
        let mut oracle = FixedWidth {
            width: None,
            calls: 0,
        };
        assert_eq!(decide(&mut oracle, "Oxygen", 12.0, 100.0, 3, 0.5), None);
    }

    #[test]
    fn line_cap_per_mode() {
        assert_eq!(LineMode::Single.line_cap(), 1);
        assert_eq!(LineMode::Multi { max_lines: 4 }.line_cap(), 4);
    }

    #[test]
    fn decision_is_cached_until_key_changes() {
        let mut oracle = FixedWidth {
            width: Some(50.0),
            calls: 0,
        };
        let mut fit = SingleLineFit::default();
        let req = request("Helium", 100.0);
        assert_eq!(fit.decide(&mut oracle, &req, 12.0), Some(LineMode::Single));
        assert_eq!(fit.decide(&mut oracle, &req, 12.0), Some(LineMode::Single));
        assert_eq!(oracle.calls, 1);

        fit.decide(&mut oracle, &req, 11.0);
        assert_eq!(oracle.calls, 2);
        fit.decide(&mut oracle, &request("Helium", 90.0), 11.0);
        assert_eq!(oracle.calls, 3);
        fit.decide(&mut oracle, &request("Neon", 90.0), 11.0);
        assert_eq!(oracle.calls, 4);

        fit.invalidate();
        assert_eq!(fit.current(), None);
        fit.decide(&mut oracle, &request("Neon", 90.0), 11.0);
        assert_eq!(oracle.calls, 5);
    }

    #[test]
    fn cached_multi_tracks_line_budget() {
        let mut oracle = FixedWidth {
            width: Some(500.0),
            calls: 0,
        };
        let mut fit = SingleLineFit::new(0.0);
        let req = request("Praseodymium", 100.0);
        assert_eq!(
            fit.decide(&mut oracle, &req, 12.0),
            Some(LineMode::Multi { max_lines: 3 })
        );
        assert_eq!(
            fit.decide(&mut oracle, &req.clone().max_lines(2), 12.0),
            Some(LineMode::Multi { max_lines: 2 })
        );
        assert_eq!(oracle.calls, 1);
    }

    #[test]
    fn monospace_oracle_decides_by_cells() {
        let mut oracle = MonospaceOracle::new(0.5);
        let mut fit = SingleLineFit::default();
        // 6 cells * 5.0 = 30 units.
        assert_eq!(
            fit.decide(&mut oracle, &request("Carbon", 30.0), 10.0),
            Some(LineMode::Single)
        );
        assert_eq!(
            fit.decide(&mut oracle, &request("Carbon", 29.0), 10.0),
            Some(LineMode::Multi { max_lines: 3 })
        );
    }
}
