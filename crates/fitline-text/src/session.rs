#![forbid(unsafe_code)]

//! Per-widget layout session.
//!
//! A [`FitSession`] is the value object a text widget owns. The host feeds it
//! the current request, asks it to measure once, and forwards every layout
//! report from the renderer. Whenever the text, font size, width, or line
//! budget changes the session discards its state and starts measuring again;
//! there is no explicit cancel.
//!
//! ```text
//! update ──► Measuring ──measure──► Single ───────────────► plan
//!                                └► Multi ─on_layout─► Rewrapping ─┐
//!                                                  ▲               │
//!                                                  └───on_layout───┘
//!                                                     ... ► Stable ► plan
//! ```

use crate::fit::{LineMode, SingleLineFit};
use crate::oracle::{LineAssignment, MeasurementOracle};
use crate::request::{LayoutKey, LayoutRequest};
use crate::rewrap::{RewrapEngine, RewrapPhase, StableReason};
use fitline_core::FitConfig;

/// What the host hands to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub display_text: String,
    pub font_size: f32,
    pub mode: LineMode,
    /// Renderer line cap (`1` for single-line, the budget otherwise).
    pub line_cap: usize,
}

#[derive(Debug, Clone)]
struct Active {
    request: LayoutRequest,
    key: LayoutKey,
    font_size: f32,
    mode: Option<LineMode>,
    engine: RewrapEngine,
}

/// Layout state for one text widget.
#[derive(Debug, Clone)]
pub struct FitSession {
    config: FitConfig,
    fit: SingleLineFit,
    active: Option<Active>,
}

impl Default for FitSession {
    fn default() -> Self {
        Self::new(FitConfig::default())
    }
}

impl FitSession {
    pub fn new(config: FitConfig) -> Self {
        Self {
            fit: SingleLineFit::new(config.fit_epsilon),
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Bind the session to `request` rendered at `font_size`.
    ///
    /// Returns `true` when this replaced the previous state.
    pub fn update(&mut self, request: &LayoutRequest, font_size: f32) -> bool {
        let key = request.key(font_size);
        if self.active.as_ref().is_some_and(|active| active.key == key) {
            return false;
        }

        if self.active.is_some() {
            tracing::debug!(
                font_size,
                max_width = request.max_width,
                "layout inputs changed, resetting session"
            );
        }
        self.active = Some(Active {
            request: request.clone(),
            key,
            font_size,
            mode: None,
            engine: RewrapEngine::with_config(&request.text, &self.config),
        });
        true
    }

    /// Take the single-line decision if it has not been taken yet.
    ///
    /// Returns `None` when no request is bound or the oracle has no
    /// measurement yet.
    pub fn measure<O>(&mut self, oracle: &mut O) -> Option<LineMode>
    where
        O: MeasurementOracle + ?Sized,
    {
        let active = self.active.as_mut()?;
        if let Some(mode) = active.mode {
            return Some(mode);
        }
        let mode = self.fit.decide(oracle, &active.request, active.font_size)?;
        active.mode = Some(mode);
        Some(mode)
    }

    /// Forward a renderer layout report.
    ///
    /// Returns the rewritten display text when the renderer must lay out
    /// again. Reports are ignored before the decision and in single-line mode.
    pub fn on_layout(&mut self, lines: &LineAssignment) -> Option<&str> {
        let active = self.active.as_mut()?;
        match active.mode {
            Some(LineMode::Multi { .. }) => active
                .engine
                .on_layout(lines)
                .map(|state| state.display_text()),
            Some(LineMode::Single) | None => None,
        }
    }

    pub fn mode(&self) -> Option<LineMode> {
        self.active.as_ref().and_then(|active| active.mode)
    }

    /// Current phase of the measure / rewrap cycle.
    pub fn phase(&self) -> RewrapPhase {
        match &self.active {
            None => RewrapPhase::Measuring,
            Some(active) => match active.mode {
                None => RewrapPhase::Measuring,
                Some(LineMode::Single) => RewrapPhase::Stable(StableReason::Clean),
                Some(LineMode::Multi { .. }) => active.engine.phase(),
            },
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self.phase(), RewrapPhase::Stable(_))
    }

    pub fn attempts(&self) -> u32 {
        self.active
            .as_ref()
            .map_or(0, |active| active.engine.attempts())
    }

    /// What to render now. `None` until the single-line decision is taken.
    pub fn plan(&self) -> Option<RenderPlan> {
        let active = self.active.as_ref()?;
        let mode = active.mode?;
        let display_text = match mode {
            LineMode::Single => active.request.text.clone(),
            LineMode::Multi { .. } => active.engine.display_text().to_string(),
        };
        Some(RenderPlan {
            display_text,
            font_size: active.font_size,
            mode,
            line_cap: mode.line_cap(),
        })
    }

    /// Drive measurement and layout synchronously until stable.
    ///
    /// For hosts whose oracle answers immediately. Returns `None` if no
    /// request is bound or the oracle cannot measure yet.
    pub fn run_to_stable<O>(&mut self, oracle: &mut O) -> Option<RenderPlan>
    where
        O: MeasurementOracle + ?Sized,
    {
        let mode = self.measure(oracle)?;
        if let LineMode::Multi { max_lines } = mode {
            let active = self.active.as_mut()?;
            while !active.engine.is_stable() {
                let lines = oracle.layout_lines(
                    active.engine.display_text(),
                    active.font_size,
                    active.request.max_width,
                    max_lines,
                )?;
                active.engine.on_layout(&lines);
            }
        }
        self.plan()
    }
}
