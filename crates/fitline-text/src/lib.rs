#![forbid(unsafe_code)]

//! Word-safe text fitting for fixed boxes.
//!
//! Given a string, a box (width, line budget, font-size bounds), and a
//! [`MeasurementOracle`] reporting how the host renderer actually lays text
//! out, this crate picks a font size and rewrites whitespace so that no
//! rendered line boundary falls inside a word:
//!
//! - [`fit`] - single-line versus multi-line decision from one measurement
//! - [`rewrap`] - iterative, capped, word-safe line-break insertion
//! - [`shrink`] - step-down search for the largest fitting font size
//! - [`session`] - per-widget state machine tying the above together
//! - [`CachedOracle`] - LRU memoization of natural-width measurements
//! - [`MonospaceOracle`] - deterministic cell-width oracle for tests and headless hosts
//!
//! # Example
//! ```
//! use fitline_text::{
//!     BreakStrategy, FitSession, FontSizeBounds, LayoutRequest, LineMode, MonospaceOracle,
//! };
//!
//! let mut oracle = MonospaceOracle::new(1.0).strategy(BreakStrategy::Greedy);
//! let request = LayoutRequest::new("Hydrogen Peroxide", 10.0, FontSizeBounds::fixed(1.0).unwrap())
//!     .max_lines(2);
//!
//! let mut session = FitSession::default();
//! session.update(&request, 1.0);
//! let plan = session.run_to_stable(&mut oracle).unwrap();
//! assert_eq!(plan.mode, LineMode::Multi { max_lines: 2 });
//! assert_eq!(plan.display_text, "Hydrogen\nPeroxide");
//! ```

mod error;
pub mod fit;
pub mod measure_cache;
pub mod monospace;
pub mod oracle;
pub mod request;
pub mod rewrap;
pub mod session;
pub mod shrink;

pub use error::LayoutError;
pub use fit::{LineMode, SingleLineFit, decide};
pub use measure_cache::{CacheStats, CachedOracle};
pub use monospace::{BreakStrategy, MonospaceOracle};
pub use oracle::{LineAssignment, MeasurementOracle};
pub use request::{FontSizeBounds, LayoutKey, LayoutRequest};
pub use rewrap::{
    BreakEdit, BreakFix, MidWordBreak, RewrapEngine, RewrapPhase, RewrapState, Settled,
    StableReason, apply_word_safe_break, find_mid_word_break, is_break_opportunity, settle,
};
pub use session::{FitSession, RenderPlan};
pub use shrink::{MAX_PROBES, ShrinkOutcome, ShrinkSearch, find_fitting_font_size};
