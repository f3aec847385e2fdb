//! Closed interval windows.
//!
//! Operations are gated by two kinds of window: a day window (when the
//! crew may perform the operation at all) and a GDU window (how mature
//! the field must be). Both are closed integer intervals.

use serde::{Deserialize, Serialize};

/// A closed interval `[start, end]` over days or GDU.
///
/// Unlike a half-open availability slot, both bounds are inclusive: a
/// planting window `[0, 5]` admits day 5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Window {
    /// Lower bound (inclusive).
    pub start: i64,
    /// Upper bound (inclusive).
    pub end: i64,
}

impl Window {
    /// Creates a new closed window.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// A window admitting a single value.
    pub fn single(value: i64) -> Self {
        Self::new(value, value)
    }

    /// Whether `value` lies within `[start, end]`.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        value >= self.start && value <= self.end
    }

    /// Number of integer points in the window (0 when inverted).
    #[inline]
    pub fn len(&self) -> i64 {
        (self.end - self.start + 1).max(0)
    }

    /// Whether the window admits no value at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Whether either bound is negative.
    pub fn has_negative_bound(&self) -> bool {
        self.start < 0 || self.end < 0
    }

    /// Whether two windows share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
