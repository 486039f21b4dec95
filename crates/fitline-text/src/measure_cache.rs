#![forbid(unsafe_code)]

//! LRU cache in front of an oracle's natural-width measurements.
//!
//! The auto-shrink search and the single-line decision re-measure the same
//! strings at the same sizes across re-layouts. Natural widths are stable for
//! a given `(text, font_size)`, so they are memoized here. Line assignments
//! are always forwarded: the rewrap engine depends on fresh renderer feedback.
//!
//! # Example
//! ```
//! use fitline_text::{CachedOracle, MeasurementOracle, MonospaceOracle};
//!
//! let mut oracle = CachedOracle::new(MonospaceOracle::new(0.5), 64);
//! assert_eq!(oracle.measure_natural("Argon", 10.0), Some(25.0));
//! assert_eq!(oracle.measure_natural("Argon", 10.0), Some(25.0));
//!
//! let stats = oracle.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use crate::oracle::{LineAssignment, MeasurementOracle};
use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

/// Cache performance counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`; zero before any lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Oracle wrapper that memoizes `measure_natural`.
///
/// Keys are 64-bit FxHashes of `(text, font_size bits)`; the full string is
/// not retained. Unavailable measurements (`None`) are not cached, so a
/// later layout pass can still fill them in.
#[derive(Debug)]
pub struct CachedOracle<O> {
    inner: O,
    cache: LruCache<u64, f32>,
    hits: u64,
    misses: u64,
}

impl<O: MeasurementOracle> CachedOracle<O> {
    /// Wrap `inner` with room for `capacity` widths (minimum one).
    pub fn new(inner: O, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Whether a width for `(text, font_size)` is cached.
    #[must_use]
    pub fn contains(&self, text: &str, font_size: f32) -> bool {
        self.cache.contains(&measure_key(text, font_size))
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: MeasurementOracle> MeasurementOracle for CachedOracle<O> {
    fn measure_natural(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let key = measure_key(text, font_size);
        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return Some(width);
        }

        self.misses += 1;
        let width = self.inner.measure_natural(text, font_size)?;
        self.cache.put(key, width);
        Some(width)
    }

    fn layout_lines(
        &mut self,
        text: &str,
        font_size: f32,
        max_width: f32,
        max_lines: usize,
    ) -> Option<LineAssignment> {
        self.inner
            .layout_lines(text, font_size, max_width, max_lines)
    }
}

#[inline]
fn measure_key(text: &str, font_size: f32) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    font_size.to_bits().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceOracle;

    /// Counts how often the wrapped oracle is reached.
    struct Counting {
        calls: usize,
        available: bool,
    }

    impl MeasurementOracle for Counting {
        fn measure_natural(&mut self, text: &str, font_size: f32) -> Option<f32> {
            self.calls += 1;
            self.available.then(|| text.len() as f32 * font_size)
        }

        fn layout_lines(
            &mut self,
            text: &str,
            _font_size: f32,
            _max_width: f32,
            _max_lines: usize,
        ) -> Option<LineAssignment> {
            self.calls += 1;
            Some(LineAssignment::from_lines([text]))
        }
    }

    #[test]
    fn repeated_measure_hits_cache() {
        let mut oracle = CachedOracle::new(
            Counting {
                calls: 0,
                available: true,
            },
            8,
        );
        assert_eq!(oracle.measure_natural("Zinc", 2.0), Some(8.0));
        assert_eq!(oracle.measure_natural("Zinc", 2.0), Some(8.0));
        assert_eq!(oracle.inner().calls, 1);
        assert!(oracle.contains("Zinc", 2.0));
        assert!(!oracle.contains("Zinc", 3.0));
    }

    #[test]
    fn font_size_is_part_of_key() {
        let mut oracle = CachedOracle::new(MonospaceOracle::new(1.0), 8);
        assert_eq!(oracle.measure_natural("Tin", 1.0), Some(3.0));
        assert_eq!(oracle.measure_natural("Tin", 2.0), Some(6.0));
        assert_eq!(oracle.stats().misses, 2);
    }

    #[test]
    fn unavailable_measurements_are_not_cached() {
        let mut oracle = CachedOracle::new(
            Counting {
                calls: 0,
                available: false,
            },
            8,
        );
        assert_eq!(oracle.measure_natural("Lead", 1.0), None);
        assert_eq!(oracle.measure_natural("Lead", 1.0), None);
        assert_eq!(oracle.inner().calls, 2);
        assert_eq!(oracle.stats().size, 0);
    }

    #[test]
    fn layout_lines_bypass_cache() {
        let mut oracle = CachedOracle::new(
            Counting {
                calls: 0,
                available: true,
            },
            8,
        );
        oracle.layout_lines("Gold", 1.0, 10.0, 0);
        oracle.layout_lines("Gold", 1.0, 10.0, 0);
        assert_eq!(oracle.into_inner().calls, 2);
    }

    #[test]
    fn lru_evicts_oldest() {
        let mut oracle = CachedOracle::new(MonospaceOracle::new(1.0), 2);
        oracle.measure_natural("a", 1.0);
        oracle.measure_natural("b", 1.0);
        oracle.measure_natural("c", 1.0);
        assert!(!oracle.contains("a", 1.0));
        assert!(oracle.contains("b", 1.0));
        assert!(oracle.contains("c", 1.0));
        assert_eq!(oracle.stats().size, 2);
    }

    #[test]
    fn zero_capacity_becomes_one() {
        let oracle = CachedOracle::new(MonospaceOracle::new(1.0), 0);
        assert_eq!(oracle.stats().capacity, 1);
    }

    #[test]
    fn stats_hit_rate_and_reset() {
        let mut oracle = CachedOracle::new(MonospaceOracle::new(1.0), 4);
        assert_eq!(oracle.stats().hit_rate(), 0.0);
        oracle.measure_natural("Iron", 1.0);
        oracle.measure_natural("Iron", 1.0);
        assert!((oracle.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
        oracle.reset_stats();
        oracle.clear();
        assert_eq!(oracle.stats(), CacheStats { hits: 0, misses: 0, size: 0, capacity: 4 });
    }
}
