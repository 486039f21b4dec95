#![forbid(unsafe_code)]

//! Layout primitives for fitline hosts.
//!
//! Currently this is the direction-aware slot row used to lay out labelled
//! values in a fixed number of columns. See [`slots`].

pub mod slots;

pub use slots::{Item, Slot, SlotDirection, SlotRows, allocate};
