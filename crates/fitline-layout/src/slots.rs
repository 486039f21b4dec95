#![forbid(unsafe_code)]

//! Fixed-width slot rows.
//!
//! A row has a fixed number of visual slots regardless of how many items are
//! shown. Items are placed in order from the leading edge of the row: slot 0
//! for [`SlotDirection::Forward`], slot `max_slots - 1` for
//! [`SlotDirection::Mirrored`]. Items past `max_slots` are dropped.
//!
//! Placement is a pure function of `(items, max_slots, direction)`, so a
//! label row and a value row built from the same inputs always line up.
//!
//! # Example
//! ```
//! use fitline_layout::{SlotDirection, allocate};
//!
//! let items = ["H", "He", "Li"];
//! let forward: Vec<_> = allocate(&items, 5, SlotDirection::Forward)
//!     .into_iter()
//!     .map(|slot| slot.occupant.copied())
//!     .collect();
//! assert_eq!(forward, [Some("H"), Some("He"), Some("Li"), None, None]);
//!
//! let mirrored: Vec<_> = allocate(&items, 5, SlotDirection::Mirrored)
//!     .into_iter()
//!     .map(|slot| slot.occupant.copied())
//!     .collect();
//! assert_eq!(mirrored, [None, None, Some("Li"), Some("He"), Some("H")]);
//! ```

/// A labelled numeric value shown in a slot row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub label: String,
    pub value: f64,
}

impl Item {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Which end of the row the first item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotDirection {
    /// First item in slot 0.
    #[default]
    Forward,
    /// First item in the last slot.
    Mirrored,
}

impl SlotDirection {
    /// Mirrored for right-to-left locales, forward otherwise.
    pub fn from_rtl(is_rtl: bool) -> Self {
        if is_rtl { Self::Mirrored } else { Self::Forward }
    }

    /// Slot index for the item at `position` in a row of `max_slots`.
    #[inline]
    pub fn slot_for(self, position: usize, max_slots: usize) -> usize {
        match self {
            Self::Forward => position,
            Self::Mirrored => max_slots - 1 - position,
        }
    }
}

/// One position in a slot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<T> {
    pub index: usize,
    pub occupant: Option<T>,
}

impl<T> Slot<T> {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Place `items` into `max_slots` slots following `direction`.
///
/// The first `min(items.len(), max_slots)` items are placed; the rest are
/// dropped. The returned row always has exactly `max_slots` entries.
pub fn allocate<T>(items: &[T], max_slots: usize, direction: SlotDirection) -> Vec<Slot<&T>> {
    let mut slots: Vec<Slot<&T>> = (0..max_slots)
        .map(|index| Slot {
            index,
            occupant: None,
        })
        .collect();

    let placed = items.len().min(max_slots);
    if items.len() > max_slots {
        fitline_core::debug!(
            items = items.len(),
            max_slots,
            dropped = items.len() - max_slots,
            "slot row saturated"
        );
    }

    for (position, item) in items.iter().take(placed).enumerate() {
        slots[direction.slot_for(position, max_slots)].occupant = Some(item);
    }
    slots
}

/// Index-aligned label and value rows for a set of items.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRows {
    pub labels: Vec<Option<String>>,
    pub values: Vec<Option<f64>>,
}

impl SlotRows {
    /// Build both rows from the same placement.
    pub fn build(items: &[Item], max_slots: usize, direction: SlotDirection) -> Self {
        let slots = allocate(items, max_slots, direction);
        let labels = slots
            .iter()
            .map(|slot| slot.occupant.map(|item| item.label.clone()))
            .collect();
        let values = slots
            .iter()
            .map(|slot| slot.occupant.map(|item| item.value))
            .collect();
        Self { labels, values }
    }

    /// Number of slots in each row.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.labels.iter().filter(|label| label.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupants<'a>(slots: &[Slot<&'a &'static str>]) -> Vec<Option<&'static str>> {
        slots.iter().map(|slot| slot.occupant.copied()).collect()
    }

    #[test]
    fn forward_fills_from_start() {
        let items = ["A", "B", "C"];
        let slots = allocate(&items, 5, SlotDirection::Forward);
        assert_eq!(
            occupants(&slots),
            vec![Some("A"), Some("B"), Some("C"), None, None]
        );
        assert!(slots.iter().enumerate().all(|(i, slot)| slot.index == i));
    }

    #[test]
    fn mirrored_fills_from_end() {
        let items = ["A", "B", "C"];
        let slots = allocate(&items, 5, SlotDirection::Mirrored);
        assert_eq!(
            occupants(&slots),
            vec![None, None, Some("C"), Some("B"), Some("A")]
        );
    }

    #[test]
    fn overflow_is_truncated() {
        let items = ["A", "B", "C", "D"];
        let forward = allocate(&items, 2, SlotDirection::Forward);
        assert_eq!(occupants(&forward), vec![Some("A"), Some("B")]);
        let mirrored = allocate(&items, 2, SlotDirection::Mirrored);
        assert_eq!(occupants(&mirrored), vec![Some("B"), Some("A")]);
    }

    #[test]
    fn zero_slots_is_empty_row() {
        let items = ["A"];
        assert!(allocate(&items, 0, SlotDirection::Forward).is_empty());
        assert!(allocate(&items, 0, SlotDirection::Mirrored).is_empty());
    }

    #[test]
    fn no_items_leaves_every_slot_empty() {
        let items: [&str; 0] = [];
        let slots = allocate(&items, 3, SlotDirection::Mirrored);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(Slot::is_empty));
    }

    #[test]
    fn direction_from_rtl() {
        assert_eq!(SlotDirection::from_rtl(true), SlotDirection::Mirrored);
        assert_eq!(SlotDirection::from_rtl(false), SlotDirection::Forward);
        assert_eq!(SlotDirection::default(), SlotDirection::Forward);
    }

    #[test]
    fn rows_stay_aligned() {
        let items = vec![Item::new("Z", 1.0), Item::new("A", 1.008), Item::new("N", 0.0)];
        let rows = SlotRows::build(&items, 4, SlotDirection::Mirrored);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.occupied(), 3);
        assert_eq!(
            rows.labels,
            vec![None, Some("N".into()), Some("A".into()), Some("Z".into())]
        );
        assert_eq!(rows.values, vec![None, Some(0.0), Some(1.008), Some(1.0)]);
    }

    #[test]
    fn allocation_is_deterministic() {
        let items = vec![Item::new("p", 1.0), Item::new("n", 0.0)];
        assert_eq!(
            SlotRows::build(&items, 3, SlotDirection::Forward),
            SlotRows::build(&items, 3, SlotDirection::Forward)
        );
    }
}
