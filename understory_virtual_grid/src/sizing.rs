// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout computation: item size, cross/primary counts, spacing, and content extent.
//!
//! Two strategies decide how the cross axis is filled:
//!
//! - [`ItemSizeLayout`]: items have a fixed size. As many as fit are placed on the
//!   cross axis, and the cross spacing stretches to use up the leftover space.
//! - [`CountLayout`]: the number of items on the cross axis is fixed, and their
//!   cross extent is derived so they exactly fill the viewport.
//!
//! [`compute_layout`] is the pure arithmetic. [`Sizing`] owns the inputs plus the
//! last computed [`Layout`] and updates both in place.

use core::marker::PhantomData;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Insets, Point, Rect, Size};

use crate::Axis;
use crate::geometry::{Spacing, non_negative, sanitize_insets};

/// Fixed item size; the cross count is derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSizeLayout {
    /// Size of every item.
    pub item_size: Size,
    /// Gap between consecutive rows (or columns) along the scroll axis.
    pub primary_spacing: f64,
    /// Lower bound for the stretched gap between items on the cross axis.
    pub min_cross_spacing: f64,
}

impl ItemSizeLayout {
    /// Items of `item_size` with no spacing.
    #[must_use]
    pub const fn new(item_size: Size) -> Self {
        Self {
            item_size,
            primary_spacing: 0.0,
            min_cross_spacing: 0.0,
        }
    }

    /// Sets the gap between consecutive rows (or columns) along the scroll axis.
    #[must_use]
    pub const fn with_primary_spacing(mut self, spacing: f64) -> Self {
        self.primary_spacing = spacing;
        self
    }

    /// Sets the minimum gap between items on the cross axis.
    #[must_use]
    pub const fn with_min_cross_spacing(mut self, spacing: f64) -> Self {
        self.min_cross_spacing = spacing;
        self
    }
}

/// Fixed number of items on the cross axis; their cross extent is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountLayout {
    /// Items per row (vertical grids) or per column (horizontal grids).
    pub count: usize,
    /// Extent of every item along the scroll axis.
    pub item_extent: f64,
    /// Gaps on both axes.
    pub spacing: Spacing,
}

impl CountLayout {
    /// `count` items per row/column, each `item_extent` long on the scroll axis.
    #[must_use]
    pub const fn new(count: usize, item_extent: f64) -> Self {
        Self {
            count,
            item_extent,
            spacing: Spacing::ZERO,
        }
    }

    /// Sets the spacing on both axes.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Layout strategy selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// See [`ItemSizeLayout`].
    ItemSize(ItemSizeLayout),
    /// See [`CountLayout`].
    Count(CountLayout),
}

impl From<ItemSizeLayout> for Strategy {
    fn from(layout: ItemSizeLayout) -> Self {
        Self::ItemSize(layout)
    }
}

impl From<CountLayout> for Strategy {
    fn from(layout: CountLayout) -> Self {
        Self::Count(layout)
    }
}

/// Derived layout quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Size of every item.
    pub item_size: Size,
    /// Items per row (vertical) or per column (horizontal).
    pub cross_count: usize,
    /// Number of rows (vertical) or columns (horizontal).
    pub primary_count: usize,
    /// Effective spacing on both axes.
    pub spacing: Spacing,
    /// Total content size; the cross extent always equals the viewport's.
    pub content_size: Size,
}

/// Computes the layout for `item_count` items in a viewport of `view_size`.
///
/// This is a pure function of its inputs.
#[must_use]
pub fn compute_layout<A: Axis>(
    strategy: &Strategy,
    view_size: Size,
    content_inset: Insets,
    item_count: usize,
) -> Layout {
    let view_cross = A::cross(view_size);
    let inner_cross =
        view_cross - (A::leading_cross(content_inset) + A::trailing_cross(content_inset));

    let (item_size, cross_count, spacing) = match *strategy {
        Strategy::ItemSize(l) => {
            let item_cross = A::cross(l.item_size);
            let count = fitting_count(item_cross, inner_cross, l.min_cross_spacing);
            let stretched = stretched_spacing(item_cross, inner_cross, count);
            (
                l.item_size,
                count,
                Spacing::new(stretched.max(l.min_cross_spacing), l.primary_spacing),
            )
        }
        Strategy::Count(l) => {
            let item_cross = derived_extent(inner_cross, l.count, l.spacing.inter_cross);
            (A::size(l.item_extent, item_cross), l.count, l.spacing)
        }
    };

    let primary_count = primary_count(cross_count, item_count);
    let content_primary = content_extent(
        A::primary(item_size),
        spacing.inter_primary,
        primary_count,
        A::leading_primary(content_inset) + A::trailing_primary(content_inset),
    );

    Layout {
        item_size,
        cross_count,
        primary_count,
        spacing,
        content_size: A::size(content_primary, view_cross),
    }
}

/// Converts a non-negative whole float to an index, saturating out-of-range values.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Callers pass floored/ceiled values; `as` saturates and maps NaN to 0"
)]
#[inline]
pub(crate) fn to_index(v: f64) -> usize {
    v as usize
}

/// How many items of `item_cross` fit into `inner_cross` with at least `min_spacing` between them.
fn fitting_count(item_cross: f64, inner_cross: f64, min_spacing: f64) -> usize {
    if item_cross <= 0.0 {
        return 0;
    }
    let fit = ((inner_cross + min_spacing) / (item_cross + min_spacing)).floor();
    to_index(fit).max(1)
}

/// Gap that spreads `count` items of `item_cross` across `inner_cross`.
fn stretched_spacing(item_cross: f64, inner_cross: f64, count: usize) -> f64 {
    if count > 1 {
        (inner_cross - count as f64 * item_cross) / (count - 1) as f64
    } else {
        0.0
    }
}

/// Item cross extent that makes `count` items plus gaps fill `inner_cross`.
fn derived_extent(inner_cross: f64, count: usize, spacing: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    non_negative((inner_cross - (count - 1) as f64 * spacing) / count as f64)
}

fn primary_count(cross_count: usize, item_count: usize) -> usize {
    if cross_count == 0 {
        0
    } else {
        item_count.div_ceil(cross_count)
    }
}

fn content_extent(item_extent: f64, spacing: f64, count: usize, insets: f64) -> f64 {
    if count == 0 {
        return insets;
    }
    item_extent * count as f64 + spacing * (count - 1) as f64 + insets
}

/// A layout snapshot plus the inputs it was computed from.
///
/// The grid owns one `Sizing` and mutates it as the viewport, inset, or item count
/// change. Every setter returns `true` only if an input actually changed, so callers
/// can skip relayout work.
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing<A: Axis> {
    strategy: Strategy,
    view_size: Size,
    content_inset: Insets,
    item_count: usize,
    layout: Layout,
    axis: PhantomData<A>,
}

impl<A: Axis> Sizing<A> {
    /// Computes the initial layout.
    ///
    /// Negative view extents and inset edges are clamped to zero.
    #[must_use]
    pub fn new(
        strategy: Strategy,
        view_size: Size,
        content_inset: Insets,
        item_count: usize,
    ) -> Self {
        let view_size = Size::new(
            non_negative(view_size.width),
            non_negative(view_size.height),
        );
        let content_inset = sanitize_insets(content_inset);
        Self {
            strategy,
            view_size,
            content_inset,
            item_count,
            layout: compute_layout::<A>(&strategy, view_size, content_inset, item_count),
            axis: PhantomData,
        }
    }

    /// The layout strategy.
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Viewport size.
    #[must_use]
    pub const fn view_size(&self) -> Size {
        self.view_size
    }

    /// Content inset.
    #[must_use]
    pub const fn content_inset(&self) -> Insets {
        self.content_inset
    }

    /// Number of items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// The derived layout.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Size of every item.
    #[must_use]
    pub const fn item_size(&self) -> Size {
        self.layout.item_size
    }

    /// Items per row (vertical) or per column (horizontal).
    #[must_use]
    pub const fn cross_count(&self) -> usize {
        self.layout.cross_count
    }

    /// Rows (vertical) or columns (horizontal).
    #[must_use]
    pub const fn primary_count(&self) -> usize {
        self.layout.primary_count
    }

    /// Effective spacing.
    #[must_use]
    pub const fn spacing(&self) -> Spacing {
        self.layout.spacing
    }

    /// Total content size.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.layout.content_size
    }

    /// Updates the viewport size. Returns `false` if it is unchanged.
    pub fn set_view_size(&mut self, view_size: Size) -> bool {
        let view_size = Size::new(
            non_negative(view_size.width),
            non_negative(view_size.height),
        );
        if self.view_size == view_size {
            return false;
        }
        self.view_size = view_size;
        self.relayout();
        true
    }

    /// Updates the content inset. Returns `false` if it is unchanged.
    pub fn set_content_inset(&mut self, content_inset: Insets) -> bool {
        let content_inset = sanitize_insets(content_inset);
        if self.content_inset == content_inset {
            return false;
        }
        self.content_inset = content_inset;
        self.relayout();
        true
    }

    /// Updates the item count. Returns `false` if it is unchanged.
    ///
    /// Only the primary count and the primary content extent depend on the item
    /// count, so nothing else is recomputed.
    pub fn set_item_count(&mut self, item_count: usize) -> bool {
        if self.item_count == item_count {
            return false;
        }
        self.item_count = item_count;
        let layout = &mut self.layout;
        layout.primary_count = primary_count(layout.cross_count, item_count);
        let content_primary = content_extent(
            A::primary(layout.item_size),
            layout.spacing.inter_primary,
            layout.primary_count,
            A::leading_primary(self.content_inset) + A::trailing_primary(self.content_inset),
        );
        layout.content_size = A::size(content_primary, A::cross(layout.content_size));
        true
    }

    fn relayout(&mut self) {
        self.layout = compute_layout::<A>(
            &self.strategy,
            self.view_size,
            self.content_inset,
            self.item_count,
        );
    }

    /// Viewport extent along the scroll axis.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        A::primary(self.view_size)
    }

    /// Content extent along the scroll axis.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        A::primary(self.layout.content_size)
    }

    /// Inset before the first row (or column) along the scroll axis.
    #[must_use]
    pub fn leading_inset(&self) -> f64 {
        A::leading_primary(self.content_inset)
    }

    /// Distance between the starts of consecutive rows (or columns).
    #[must_use]
    pub fn stride(&self) -> f64 {
        A::primary(self.layout.item_size) + self.layout.spacing.inter_primary
    }

    /// Largest scroll offset that keeps the viewport within the content.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent() - self.viewport_extent()).max(0.0)
    }

    /// Start of row (or column) `primary` along the scroll axis.
    #[must_use]
    pub fn primary_offset(&self, primary: usize) -> f64 {
        self.leading_inset() + primary as f64 * self.stride()
    }

    /// Start of slot `cross` along the cross axis.
    #[must_use]
    pub fn cross_offset(&self, cross: usize) -> f64 {
        let l = &self.layout;
        A::leading_cross(self.content_inset)
            + cross as f64 * (A::cross(l.item_size) + l.spacing.inter_cross)
    }

    /// Content-space origin of the cell at (`cross`, `primary`).
    #[must_use]
    pub fn cell_origin(&self, cross: usize, primary: usize) -> Point {
        A::point(self.primary_offset(primary), self.cross_offset(cross))
    }

    /// Content-space frame of the cell at (`cross`, `primary`).
    #[must_use]
    pub fn cell_frame(&self, cross: usize, primary: usize) -> Rect {
        Rect::from_origin_size(self.cell_origin(cross, primary), self.layout.item_size)
    }

    /// Flat item index shown at (`cross`, `primary`); may exceed the item count in a
    /// partially filled last row (or column).
    #[must_use]
    pub const fn item_at(&self, cross: usize, primary: usize) -> usize {
        primary * self.layout.cross_count + cross
    }

    /// Row (vertical) or column (horizontal) that contains `item`.
    #[must_use]
    pub const fn primary_index_of(&self, item: usize) -> usize {
        match self.layout.cross_count {
            0 => 0,
            n => item / n,
        }
    }

    /// Content-space origin of `item`.
    ///
    /// Depends only on the layout, not on scroll state.
    #[must_use]
    pub fn origin_of_item(&self, item: usize) -> Point {
        let n = self.layout.cross_count.max(1);
        self.cell_origin(item % n, item / n)
    }

    /// Item under a content-space point.
    ///
    /// Returns `None` for points in the insets, in the gaps between items, or over
    /// empty cells of a partially filled last row (or column).
    #[must_use]
    pub fn item_at_point(&self, point: Point) -> Option<usize> {
        let l = &self.layout;
        let primary = slot_at(
            A::point_primary(point) - self.leading_inset(),
            A::primary(l.item_size),
            l.spacing.inter_primary,
        )?;
        let cross = slot_at(
            A::point_cross(point) - A::leading_cross(self.content_inset),
            A::cross(l.item_size),
            l.spacing.inter_cross,
        )?;
        if cross >= l.cross_count {
            return None;
        }
        let item = self.item_at(cross, primary);
        (item < self.item_count).then_some(item)
    }
}

/// Index of the item containing `pos` along one axis, or `None` if `pos` is in a gap.
fn slot_at(pos: f64, extent: f64, spacing: f64) -> Option<usize> {
    let stride = extent + spacing;
    if pos < 0.0 || stride <= 0.0 {
        return None;
    }
    let index = (pos / stride).floor();
    if pos - index * stride >= extent {
        return None;
    }
    Some(to_index(index))
}
