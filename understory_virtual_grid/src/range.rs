// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive index ranges over the primary axis.

use core::ops::RangeInclusive;

/// An inclusive `[start, end]` range of primary-axis indices.
///
/// An empty visible set is represented by `Option::<IndexRange>::None` rather than
/// an inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    /// First index (inclusive).
    pub start: usize,
    /// Last index (inclusive).
    pub end: usize,
}

#[allow(
    clippy::len_without_is_empty,
    reason = "An inclusive range always covers at least one index"
)]
impl IndexRange {
    /// Creates a range; `start` must not exceed `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "IndexRange start must not exceed end");
        Self { start, end }
    }

    /// Number of indices covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Returns `true` if `index` lies within the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterates the covered indices in ascending order.
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl IntoIterator for IndexRange {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.start..=self.end
    }
}
