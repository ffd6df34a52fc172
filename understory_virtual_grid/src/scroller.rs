// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible range tracking along the primary axis.
//!
//! [`visible_range`] maps a scroll offset to the rows (or columns) that must be
//! materialized, overscan included. [`Scroller`] remembers the last range and turns
//! each new offset into a [`ScrollDelta`]: the indices to evict and the indices to
//! admit. Computing a delta never allocates.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::sizing::to_index;
use crate::{Axis, IndexRange, Sizing};

/// Number of rows (or columns) that intersect the viewport at offset zero, overscan excluded.
///
/// This is `ceil((viewport - leading_inset) / stride)`, never negative. When the stride is
/// not positive every row is considered visible.
#[must_use]
pub fn visible_count<A: Axis>(sizing: &Sizing<A>) -> usize {
    let stride = sizing.stride();
    if stride <= 0.0 {
        return sizing.primary_count();
    }
    let extent = (sizing.viewport_extent() - sizing.leading_inset()).max(0.0);
    to_index((extent / stride).ceil())
}

/// Number of slot-groups a pool needs so that admitting never runs dry.
///
/// The baseline is `visible_count + 1 + 2 * overscan`. Because a viewport that starts
/// mid-row can touch `ceil(viewport / stride) + 1` rows at once, the visible count is
/// raised to `ceil(viewport / stride)` when that is larger.
#[must_use]
pub fn pool_size<A: Axis>(sizing: &Sizing<A>, overscan: usize) -> usize {
    let stride = sizing.stride();
    if stride <= 0.0 {
        return sizing.primary_count();
    }
    let span = to_index((sizing.viewport_extent() / stride).ceil());
    visible_count(sizing)
        .max(span)
        .saturating_add(1)
        .saturating_add(overscan.saturating_mul(2))
}

/// Rows (or columns) to materialize at scroll `offset`, overscan included.
///
/// Returns `None` when there is nothing to show. Offsets before the content clamp to
/// the first row; offsets past the content clamp to the last.
#[must_use]
pub fn visible_range<A: Axis>(
    sizing: &Sizing<A>,
    offset: f64,
    overscan: usize,
) -> Option<IndexRange> {
    let count = sizing.primary_count();
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let stride = sizing.stride();
    if stride <= 0.0 {
        return Some(IndexRange::new(0, last));
    }

    let offset = (offset - sizing.leading_inset()).max(0.0);
    let start = to_index((offset / stride).floor());
    let end = to_index(((offset + sizing.viewport_extent()) / stride).ceil())
        .saturating_sub(1)
        .max(start);
    let start = start.min(last);

    Some(IndexRange::new(
        start.saturating_sub(overscan),
        end.saturating_add(overscan).min(last),
    ))
}

/// Change in the visible range caused by one scroll update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollDelta {
    /// Range before the update.
    pub previous: Option<IndexRange>,
    /// Range after the update.
    pub current: Option<IndexRange>,
}

impl ScrollDelta {
    /// Returns `true` if the range did not change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previous == self.current
    }

    /// Indices that were visible and no longer are, ascending.
    pub fn evicted(&self) -> impl Iterator<Item = usize> + use<> {
        difference(self.previous, self.current)
    }

    /// Indices that became visible, ascending.
    pub fn admitted(&self) -> impl Iterator<Item = usize> + use<> {
        difference(self.current, self.previous)
    }
}

fn difference(
    from: Option<IndexRange>,
    minus: Option<IndexRange>,
) -> impl Iterator<Item = usize> {
    from.into_iter()
        .flatten()
        .filter(move |i| !minus.is_some_and(|r| r.contains(*i)))
}

/// Tracks the visible range of a grid as it scrolls.
#[derive(Debug, Clone)]
pub struct Scroller {
    overscan: usize,
    range: Option<IndexRange>,
}

impl Scroller {
    /// Creates a scroller positioned at `offset`.
    ///
    /// The returned delta admits every initially visible index.
    #[must_use]
    pub fn new<A: Axis>(sizing: &Sizing<A>, overscan: usize, offset: f64) -> (Self, ScrollDelta) {
        let range = visible_range(sizing, offset, overscan);
        let delta = ScrollDelta {
            previous: None,
            current: range,
        };
        (Self { overscan, range }, delta)
    }

    /// Extra rows (or columns) kept on each side of the viewport.
    #[must_use]
    pub const fn overscan(&self) -> usize {
        self.overscan
    }

    /// The current range.
    #[must_use]
    pub const fn range(&self) -> Option<IndexRange> {
        self.range
    }

    /// Recomputes the range for `offset` and reports what changed.
    ///
    /// Also used after an item-count change, where the offset is unchanged but the
    /// number of rows (or columns) is not.
    pub fn scroll<A: Axis>(&mut self, sizing: &Sizing<A>, offset: f64) -> ScrollDelta {
        let current = visible_range(sizing, offset, self.overscan);
        let previous = core::mem::replace(&mut self.range, current);
        let delta = ScrollDelta { previous, current };
        if !delta.is_empty() {
            tracing::trace!(offset, ?previous, ?current, "visible range changed");
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Insets, Size};

    use super::{Scroller, pool_size, visible_count, visible_range};
    use crate::{
        Axis, CountLayout, Horizontal, IndexRange, ItemSizeLayout, Sizing, Spacing, Vertical,
    };

    /// Replays deltas against a counter standing in for the free queue.
    struct PoolModel {
        free: usize,
        active: Vec<usize>,
    }

    impl PoolModel {
        fn new(size: usize) -> Self {
            Self {
                free: size,
                active: Vec::new(),
            }
        }

        fn apply(&mut self, delta: &super::ScrollDelta) {
            for i in delta.evicted() {
                let pos = self.active.iter().position(|&a| a == i).unwrap();
                self.active.swap_remove(pos);
                self.free += 1;
            }
            for i in delta.admitted() {
                assert!(!self.active.contains(&i));
                self.free = self.free.checked_sub(1).expect("pool exhausted");
                self.active.push(i);
            }
        }

        fn keys(&self) -> Vec<usize> {
            let mut keys = self.active.clone();
            keys.sort_unstable();
            keys
        }
    }

    fn expect(range: IndexRange) -> Vec<usize> {
        range.into_iter().collect()
    }

    fn run_sequence<A: Axis>(sizing: &Sizing<A>, overscan: usize, steps: &[(f64, IndexRange)]) {
        let (mut scroller, delta) = Scroller::new(sizing, overscan, 0.0);
        let mut pool = PoolModel::new(pool_size(sizing, overscan));
        pool.apply(&delta);
        assert_eq!(pool.keys(), expect(IndexRange::new(0, 2 + overscan)));
        for &(offset, range) in steps {
            let delta = scroller.scroll(sizing, offset);
            pool.apply(&delta);
            assert_eq!(pool.keys(), expect(range), "offset {offset}");
            assert_eq!(scroller.range(), Some(range));
        }
    }

    #[test]
    fn item_size_without_overscan() {
        let sizing = Sizing::<Vertical>::new(
            ItemSizeLayout::new(Size::new(10.0, 10.0))
                .with_primary_spacing(1.0)
                .into(),
            Size::new(23.0, 33.0),
            Insets::uniform(1.0),
            19,
        );
        assert_eq!(sizing.cross_count(), 2);
        assert_eq!(sizing.primary_count(), 10);
        assert_eq!(sizing.content_size().height, 10.0 * 10.0 + 9.0 + 2.0);
        run_sequence(
            &sizing,
            0,
            &[
                (10.0, IndexRange::new(0, 3)),
                (23.0, IndexRange::new(2, 4)),
                (34.0, IndexRange::new(3, 5)),
                (60.0, IndexRange::new(5, 8)),
                (100.0, IndexRange::new(9, 9)),
                (0.0, IndexRange::new(0, 2)),
            ],
        );
    }

    #[test]
    fn count_layout_with_overscan() {
        let sizing = Sizing::<Vertical>::new(
            CountLayout::new(2, 10.0)
                .with_spacing(Spacing::uniform(1.0))
                .into(),
            Size::new(23.0, 33.0),
            Insets::uniform(1.0),
            20,
        );
        assert_eq!(sizing.item_size().width, 10.0);
        assert_eq!(sizing.primary_count(), 10);
        run_sequence(
            &sizing,
            2,
            &[
                (10.0, IndexRange::new(0, 5)),
                (23.0, IndexRange::new(0, 6)),
                (34.0, IndexRange::new(1, 7)),
                (60.0, IndexRange::new(3, 9)),
                (100.0, IndexRange::new(7, 9)),
                (0.0, IndexRange::new(0, 4)),
            ],
        );
    }

    #[test]
    fn horizontal_sequences_mirror_vertical() {
        let sizing = Sizing::<Horizontal>::new(
            ItemSizeLayout::new(Size::new(10.0, 10.0))
                .with_primary_spacing(1.0)
                .into(),
            Size::new(33.0, 23.0),
            Insets::uniform(1.0),
            19,
        );
        assert_eq!(sizing.cross_count(), 2);
        assert_eq!(sizing.primary_count(), 10);
        assert_eq!(sizing.content_size().width, 10.0 * 10.0 + 9.0 + 2.0);
        run_sequence(
            &sizing,
            0,
            &[
                (10.0, IndexRange::new(0, 3)),
                (23.0, IndexRange::new(2, 4)),
                (34.0, IndexRange::new(3, 5)),
                (60.0, IndexRange::new(5, 8)),
                (100.0, IndexRange::new(9, 9)),
                (0.0, IndexRange::new(0, 2)),
            ],
        );

        let sizing = Sizing::<Horizontal>::new(
            CountLayout::new(2, 10.0)
                .with_spacing(Spacing::uniform(1.0))
                .into(),
            Size::new(33.0, 23.0),
            Insets::uniform(1.0),
            20,
        );
        assert_eq!(sizing.item_size().height, 10.0);
        run_sequence(
            &sizing,
            2,
            &[
                (23.0, IndexRange::new(0, 6)),
                (100.0, IndexRange::new(7, 9)),
            ],
        );
    }

    #[test]
    fn every_offset_fits_in_the_pool() {
        let vertical = Sizing::<Vertical>::new(
            CountLayout::new(1, 85.0)
                .with_spacing(Spacing::new(0.0, 2.0))
                .into(),
            Size::new(500.0, 350.0),
            Insets::uniform(2.0),
            20,
        );
        let (mut scroller, delta) = Scroller::new(&vertical, 2, 0.0);
        let mut pool = PoolModel::new(pool_size(&vertical, 2));
        pool.apply(&delta);
        let end = vertical.content_extent() as usize;
        for offset in 0..=end {
            pool.apply(&scroller.scroll(&vertical, offset as f64));
        }
        for offset in (0..=end).rev() {
            pool.apply(&scroller.scroll(&vertical, offset as f64));
        }
    }

    #[test]
    fn mid_row_viewport_fits_in_the_pool() {
        // A 34px viewport over an 11px stride can touch five rows at once, one more
        // than `visible_count + 1` when the leading inset is subtracted.
        let sizing = Sizing::<Vertical>::new(
            ItemSizeLayout::new(Size::new(10.0, 10.0))
                .with_primary_spacing(1.0)
                .into(),
            Size::new(10.0, 34.0),
            Insets::new(0.0, 2.0, 0.0, 2.0),
            100,
        );
        assert_eq!(visible_count(&sizing), 3);
        assert_eq!(visible_range(&sizing, 12.5, 0), Some(IndexRange::new(0, 4)));

        let (mut scroller, delta) = Scroller::new(&sizing, 0, 0.0);
        let mut pool = PoolModel::new(pool_size(&sizing, 0));
        pool.apply(&delta);
        let mut offset = 0.0;
        while offset <= sizing.content_extent() {
            pool.apply(&scroller.scroll(&sizing, offset));
            offset += 0.25;
        }
    }

    #[test]
    fn repeated_offset_is_a_no_op() {
        let sizing = Sizing::<Vertical>::new(
            ItemSizeLayout::new(Size::new(10.0, 10.0)).into(),
            Size::new(50.0, 50.0),
            Insets::ZERO,
            500,
        );
        let (mut scroller, _) = Scroller::new(&sizing, 1, 0.0);
        let first = scroller.scroll(&sizing, 137.0);
        assert!(!first.is_empty());
        let second = scroller.scroll(&sizing, 137.0);
        assert!(second.is_empty());
        assert_eq!(second.evicted().count(), 0);
        assert_eq!(second.admitted().count(), 0);
    }

    #[test]
    fn empty_grid_has_no_range() {
        let sizing = Sizing::<Vertical>::new(
            ItemSizeLayout::new(Size::new(10.0, 10.0)).into(),
            Size::new(50.0, 50.0),
            Insets::ZERO,
            0,
        );
        let (scroller, delta) = Scroller::new(&sizing, 2, 0.0);
        assert_eq!(scroller.range(), None);
        assert_eq!(delta.admitted().count(), 0);
    }

    #[test]
    fn far_jump_evicts_everything() {
        let sizing = Sizing::<Vertical>::new(
            ItemSizeLayout::new(Size::new(10.0, 10.0)).into(),
            Size::new(10.0, 30.0),
            Insets::ZERO,
            1000,
        );
        let (mut scroller, _) = Scroller::new(&sizing, 0, 0.0);
        let delta = scroller.scroll(&sizing, 5000.0);
        assert_eq!(delta.evicted().collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(delta.admitted().collect::<Vec<_>>(), [500, 501, 502]);
    }
}
