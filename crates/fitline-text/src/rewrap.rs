#![forbid(unsafe_code)]

//! Word-safe rewrapping driven by renderer line feedback.
//!
//! A renderer told to fit text in a narrow box may split a word across two
//! lines. The renderer only reveals where it broke *after* a layout pass, so
//! the fix is iterative: inspect the reported lines, turn one whitespace
//! character into a hard line break so the whole word moves down, and let the
//! renderer lay the text out again. Each pass applies at most one edit and
//! the number of edits is capped, so the loop always terminates; past the cap
//! a residual mid-word break is accepted.
//!
//! Edits only ever convert a whitespace character into `\n`. No character is
//! added, removed, or reordered.
//!
//! # Example
//! ```
//! use fitline_text::{LineAssignment, RewrapEngine};
//!
//! let mut engine = RewrapEngine::new("Hydrogen Peroxide", 5);
//! let reported = LineAssignment::from_lines(["Hydrogen Perox", "ide"]);
//! let state = engine.on_layout(&reported).unwrap();
//! assert_eq!(state.display_text(), "Hydrogen\nPeroxide");
//!
//! let relaid = LineAssignment::from_lines(["Hydrogen", "Peroxide"]);
//! assert!(engine.on_layout(&relaid).is_none());
//! assert!(engine.is_stable());
//! ```

use crate::oracle::{LineAssignment, MeasurementOracle};
use fitline_core::FitConfig;

/// Whitespace that never offers a break opportunity.
const NO_BREAK_SPACES: [char; 3] = ['\u{00A0}', '\u{2007}', '\u{202F}'];

/// Characters that already force a new line.
const HARD_BREAKS: [char; 6] = ['\n', '\r', '\u{0B}', '\u{0C}', '\u{2028}', '\u{2029}'];

/// Whitespace a renderer may break at (and that an edit may replace).
#[inline]
pub fn is_break_opportunity(c: char) -> bool {
    c.is_whitespace() && !NO_BREAK_SPACES.contains(&c)
}

#[inline]
fn is_hard_break(c: char) -> bool {
    HARD_BREAKS.contains(&c) || c == '\u{85}'
}

/// Text being progressively rewrapped, plus the edit count so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrapState {
    display_text: String,
    attempts: u32,
}

impl RewrapState {
    fn new(text: &str) -> Self {
        Self {
            display_text: text.to_string(),
            attempts: 0,
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Why the engine stopped editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StableReason {
    /// The last reported layout had no mid-word break.
    Clean,
    /// A mid-word break remains but no whitespace could be moved to fix it.
    NoSafeEdit,
    /// The edit cap was reached with a mid-word break still present.
    AttemptsExhausted,
}

/// Where a session is in the measure / rewrap cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewrapPhase {
    /// Waiting for the first layout of the current text.
    Measuring,
    /// An edit was emitted; waiting for the renderer to lay it out.
    Rewrapping,
    /// No further edits will be made for this text.
    Stable(StableReason),
}

/// A line boundary the renderer placed inside a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidWordBreak {
    /// Index of the line whose end splits the word.
    pub line: usize,
    /// Byte offset in the display text where the word starts.
    pub word_start: usize,
    /// Byte offset in the display text where the renderer broke.
    pub boundary: usize,
    /// Fragment left at the end of the upper line.
    pub tail: String,
    /// Fragment carried to the start of the lower line.
    pub head: String,
}

impl MidWordBreak {
    /// The whole word the renderer split.
    pub fn word(&self) -> String {
        format!("{}{}", self.tail, self.head)
    }
}

/// Which edit resolved a mid-word break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakFix {
    /// The whitespace before the word became a line break; the word moves down whole.
    WholeWord,
    /// The word could not move; the space before the continuation became a line break.
    Continuation,
}

/// A single-character edit to the display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakEdit {
    pub text: String,
    /// Byte offset of the replaced whitespace.
    pub offset: usize,
    pub fix: BreakFix,
}

/// Map each reported line to its byte span in `display`.
///
/// Whitespace the renderer swallowed between lines is skipped. Once a line
/// cannot be matched (the renderer rewrote it, e.g. with an ellipsis) the
/// remaining lines are left unaligned.
fn align_lines(display: &str, lines: &[String]) -> Vec<Option<(usize, usize)>> {
    let mut spans = Vec::with_capacity(lines.len());
    let mut cursor = Some(0usize);

    for line in lines {
        let span = cursor.and_then(|at| {
            let rest = display.get(at..)?;
            let start = at + (rest.len() - rest.trim_start_matches(is_break_opportunity).len());
            let body = line.trim_start_matches(is_break_opportunity);
            display
                .get(start..)?
                .starts_with(body)
                .then_some((start, start + body.len()))
        });
        cursor = span.map(|(_, end)| end);
        spans.push(span);
    }

    spans
}

fn trailing_word(line: &str) -> &str {
    let keep = line
        .trim_end_matches(|c: char| !is_break_opportunity(c))
        .len();
    &line[keep..]
}

fn leading_word(line: &str) -> &str {
    let len = line.find(is_break_opportunity).unwrap_or(line.len());
    &line[..len]
}

/// Whether `display[start..end]` is delimited by break opportunities or the
/// ends of the text.
fn is_whole_word(display: &str, start: usize, end: usize) -> bool {
    let before = display[..start].chars().next_back();
    let after = display[end..].chars().next();
    before.is_none_or(is_break_opportunity) && after.is_none_or(is_break_opportunity)
}

/// Find the first (top-most) boundary where the renderer split a word.
pub fn find_mid_word_break(display: &str, lines: &[String]) -> Option<MidWordBreak> {
    let spans = align_lines(display, lines);
    let mut search_floor = 0;

    for (idx, pair) in lines.windows(2).enumerate() {
        if let Some((_, end)) = spans[idx] {
            search_floor = end;
        }

        let tail = trailing_word(&pair[0]);
        let head = leading_word(&pair[1]);
        if tail.is_empty() || head.is_empty() {
            continue;
        }

        let boundary = match (spans[idx], spans[idx + 1]) {
            (Some((_, end)), Some((next_start, _))) => (end == next_start).then_some(end),
            _ => {
                // Alignment lost: the word is split iff its halves sit
                // back to back in the display text as a whole word.
                let from = search_floor.saturating_sub(tail.len());
                let word = format!("{tail}{head}");
                display.get(from..).and_then(|rest| {
                    rest.match_indices(word.as_str())
                        .map(|(pos, _)| from + pos)
                        .find(|&start| is_whole_word(display, start, start + word.len()))
                        .map(|start| start + tail.len())
                })
            }
        };

        if let Some(boundary) = boundary {
            return Some(MidWordBreak {
                line: idx,
                word_start: boundary - tail.len(),
                boundary,
                tail: tail.to_string(),
                head: head.to_string(),
            });
        }
    }

    None
}

/// Offset of the breakable whitespace nearest before `word_start`, unless the
/// word already begins a line.
fn whole_word_offset(display: &str, word_start: usize) -> Option<usize> {
    let before = display.get(..word_start)?;
    let mut candidate = None;
    for (offset, c) in before.char_indices().rev() {
        if !c.is_whitespace() {
            break;
        }
        if is_hard_break(c) {
            return None;
        }
        if candidate.is_none() && is_break_opportunity(c) {
            candidate = Some(offset);
        }
    }
    candidate
}

/// Compute the edit that resolves `brk`, if any whitespace can be moved.
pub fn apply_word_safe_break(display: &str, brk: &MidWordBreak) -> Option<BreakEdit> {
    let (offset, fix) = match whole_word_offset(display, brk.word_start) {
        Some(offset) => (offset, BreakFix::WholeWord),
        None => {
            let needle = format!(" {}", brk.head);
            (display.find(&needle)?, BreakFix::Continuation)
        }
    };

    let width = display[offset..].chars().next()?.len_utf8();
    let mut text = display.to_string();
    text.replace_range(offset..offset + width, "\n");
    Some(BreakEdit { text, offset, fix })
}

/// Per-session rewrap state machine.
///
/// Feed it every [`LineAssignment`] the renderer reports for the current
/// display text. A session is bound to one text; call [`reset`](Self::reset)
/// when the text, font size, width, or line budget changes.
#[derive(Debug, Clone)]
pub struct RewrapEngine {
    state: RewrapState,
    phase: RewrapPhase,
    max_attempts: u32,
}

impl RewrapEngine {
    pub fn new(text: &str, max_attempts: u32) -> Self {
        Self {
            state: RewrapState::new(text),
            phase: RewrapPhase::Measuring,
            max_attempts,
        }
    }

    pub fn with_config(text: &str, config: &FitConfig) -> Self {
        Self::new(text, config.max_rewrap_attempts)
    }

    /// Discard all progress and start over with `text`.
    pub fn reset(&mut self, text: &str) {
        self.state = RewrapState::new(text);
        self.phase = RewrapPhase::Measuring;
    }

    pub fn state(&self) -> &RewrapState {
        &self.state
    }

    pub fn display_text(&self) -> &str {
        &self.state.display_text
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn phase(&self) -> RewrapPhase {
        self.phase
    }

    pub fn is_stable(&self) -> bool {
        matches!(self.phase, RewrapPhase::Stable(_))
    }

    /// Handle one layout report. Returns the new state when an edit was
    /// made (the caller must lay the new display text out again), or `None`
    /// when nothing changed.
    pub fn on_layout(&mut self, lines: &LineAssignment) -> Option<&RewrapState> {
        if self.is_stable() {
            return None;
        }

        let Some(brk) = find_mid_word_break(&self.state.display_text, lines.lines()) else {
            tracing::trace!(attempts = self.state.attempts, "layout stable");
            self.phase = RewrapPhase::Stable(StableReason::Clean);
            return None;
        };

        if self.state.attempts >= self.max_attempts {
            tracing::warn!(
                attempts = self.state.attempts,
                word = %brk.word(),
                "rewrap cap reached, accepting mid-word break"
            );
            self.phase = RewrapPhase::Stable(StableReason::AttemptsExhausted);
            return None;
        }

        let Some(edit) = apply_word_safe_break(&self.state.display_text, &brk) else {
            tracing::debug!(word = %brk.word(), "no whitespace to move, leaving mid-word break");
            self.phase = RewrapPhase::Stable(StableReason::NoSafeEdit);
            return None;
        };

        self.state.display_text = edit.text;
        self.state.attempts += 1;
        self.phase = RewrapPhase::Rewrapping;
        tracing::debug!(
            attempt = self.state.attempts,
            offset = edit.offset,
            fix = ?edit.fix,
            line = brk.line,
            "inserted word-safe line break"
        );
        Some(&self.state)
    }
}

/// Outcome of driving a rewrap session to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub display_text: String,
    /// The renderer's lines for `display_text`.
    pub lines: LineAssignment,
    pub attempts: u32,
    pub reason: StableReason,
}

/// Replay layout passes against `oracle` until `engine` is stable.
///
/// Returns `None` if the oracle has no layout to report yet.
pub fn settle<O>(
    oracle: &mut O,
    engine: &mut RewrapEngine,
    font_size: f32,
    max_width: f32,
    max_lines: usize,
) -> Option<Settled>
where
    O: MeasurementOracle + ?Sized,
{
    loop {
        let lines = oracle.layout_lines(engine.display_text(), font_size, max_width, max_lines)?;
        if engine.on_layout(&lines).is_some() {
            continue;
        }
        let reason = match engine.phase() {
            RewrapPhase::Stable(reason) => reason,
            RewrapPhase::Measuring | RewrapPhase::Rewrapping => StableReason::Clean,
        };
        return Some(Settled {
            display_text: engine.display_text().to_string(),
            lines,
            attempts: engine.attempts(),
            reason,
        });
    }
}
