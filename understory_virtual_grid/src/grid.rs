// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid controller: binds pooled slot-groups to visible rows (or columns).

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::{Insets, Point, Size};
use smallvec::SmallVec;

use crate::listener::ScrollListeners;
use crate::pool::SlotPool;
use crate::scroller::pool_size;
use crate::{
    Axis, CancelToken, Cell, ConfigError, Host, IndexRange, ListenerOptions, ScrollDelta,
    ScrollEvent, Scroller, Sizing,
};

/// Where to place an item when scrolling it into view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollPositioning {
    /// Align the item's leading edge with the viewport's leading edge.
    Leading,
    /// Center the item in the viewport.
    #[default]
    Center,
    /// Align the item's trailing edge (plus one gap) with the viewport's trailing edge.
    Trailing,
    /// Move just enough to reveal the item; stay put if it is already fully visible.
    Nearest,
}

impl FromStr for ScrollPositioning {
    type Err = ConfigError;

    /// Accepts `leading`/`top`/`left`, `center`, `trailing`/`bottom`/`right`, and `nearest`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leading" | "top" | "left" => Ok(Self::Leading),
            "center" => Ok(Self::Center),
            "trailing" | "bottom" | "right" => Ok(Self::Trailing),
            "nearest" => Ok(Self::Nearest),
            _ => Err(ConfigError::UnknownScrollPositioning(s.to_owned())),
        }
    }
}

#[derive(Debug)]
struct Slot<K, C> {
    cell: C,
    container: K,
    hidden: bool,
}

impl<K, C> Slot<K, C> {
    fn set_hidden<H: Host<Container = K>>(&mut self, host: &mut H, hidden: bool) {
        if self.hidden != hidden {
            host.set_container_hidden(&mut self.container, hidden);
            self.hidden = hidden;
        }
    }
}

/// One slot per cross-axis position.
type Group<K, C> = SmallVec<[Slot<K, C>; 4]>;

/// A recycling virtual grid.
///
/// The grid keeps a fixed pool of slot-groups, one group per row (vertical grids) or
/// column (horizontal grids), and binds them to whatever rows are currently visible.
/// Cells are created through the factory given to the builder and never outnumber
/// `pool size × cross count`, however many items there are.
///
/// Hosts drive the grid by forwarding native scroll ticks to [`Grid::handle_scroll`]
/// and layout changes to [`Grid::set_view_size`], [`Grid::set_content_inset`], and
/// [`Grid::set_item_count`]. Construct one with [`vertical`](crate::vertical) or
/// [`horizontal`](crate::horizontal).
pub struct Grid<A: Axis, H: Host, C: Cell<H::Container>> {
    sizing: Sizing<A>,
    scroller: Scroller,
    pool: SlotPool<Group<H::Container, C>>,
    host: H,
    make_cell: Box<dyn FnMut() -> C>,
    offset: f64,
    listeners: ScrollListeners,
    lifetime: CancelToken,
    has_overlay: bool,
}

impl<A: Axis, H: Host, C: Cell<H::Container>> fmt::Debug for Grid<A, H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("sizing", &self.sizing)
            .field("scroller", &self.scroller)
            .field("offset", &self.offset)
            .field("pool_capacity", &self.pool.capacity())
            .field("active_groups", &self.pool.active_len())
            .field("listeners", &self.listeners.len())
            .field("has_overlay", &self.has_overlay)
            .finish_non_exhaustive()
    }
}

fn build_groups<A, H, C>(
    sizing: &Sizing<A>,
    host: &mut H,
    make_cell: &mut dyn FnMut() -> C,
    len: usize,
) -> Vec<Group<H::Container, C>>
where
    A: Axis,
    H: Host,
    C: Cell<H::Container>,
{
    let mut groups = Vec::with_capacity(len);
    for _ in 0..len {
        let group = (0..sizing.cross_count())
            .map(|cross| {
                let mut container = host.create_container(sizing.cell_frame(cross, 0));
                let mut cell = make_cell();
                cell.mount(&mut container);
                Slot {
                    cell,
                    container,
                    hidden: true,
                }
            })
            .collect();
        groups.push(group);
    }
    groups
}

fn release_groups<H, C>(host: &mut H, pool: SlotPool<Group<H::Container, C>>)
where
    H: Host,
    C: Cell<H::Container>,
{
    for group in pool.into_groups() {
        for mut slot in group {
            slot.cell.unmount(&mut slot.container);
            host.remove_container(slot.container);
        }
    }
}

impl<A: Axis, H: Host, C: Cell<H::Container>> Grid<A, H, C> {
    pub(crate) fn new(
        sizing: Sizing<A>,
        overscan: usize,
        mut make_cell: Box<dyn FnMut() -> C>,
        mut host: H,
    ) -> Self {
        host.set_view_size(sizing.view_size());
        host.set_content_size(sizing.content_size());
        let (scroller, delta) = Scroller::new(&sizing, overscan, 0.0);
        let groups = build_groups(
            &sizing,
            &mut host,
            &mut *make_cell,
            pool_size(&sizing, overscan),
        );
        tracing::debug!(
            cross_count = sizing.cross_count(),
            primary_count = sizing.primary_count(),
            pool = groups.len(),
            "grid mounted"
        );
        let mut grid = Self {
            sizing,
            scroller,
            pool: SlotPool::new(groups),
            host,
            make_cell,
            offset: 0.0,
            listeners: ScrollListeners::default(),
            lifetime: CancelToken::new(),
            has_overlay: false,
        };
        grid.apply(delta);
        grid
    }

    /// The current layout.
    #[must_use]
    pub fn sizing(&self) -> &Sizing<A> {
        &self.sizing
    }

    /// The rendering surface.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The rendering surface, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The last scroll offset the grid recycled for.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.offset
    }

    /// Rows (or columns) currently bound, overscan included.
    #[must_use]
    pub fn visible_range(&self) -> Option<IndexRange> {
        self.scroller.range()
    }

    /// Extra rows (or columns) kept on each side of the viewport.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.scroller.overscan()
    }

    /// Number of slot-groups owned by the pool.
    #[must_use]
    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of slot-groups waiting in the free queue.
    #[must_use]
    pub fn free_groups(&self) -> usize {
        self.pool.free_len()
    }

    /// Number of slot-groups bound to a row (or column).
    #[must_use]
    pub fn active_groups(&self) -> usize {
        self.pool.active_len()
    }

    /// Bound rows (or columns), in unspecified order.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pool.keys()
    }

    /// A token cancelled when the grid is torn down.
    ///
    /// Hand clones to anything whose lifetime should end with the grid.
    #[must_use]
    pub fn lifetime(&self) -> CancelToken {
        self.lifetime.clone()
    }

    fn apply(&mut self, delta: ScrollDelta) {
        for primary in delta.evicted() {
            self.evict(primary);
        }
        for primary in delta.admitted() {
            self.admit(primary);
        }
    }

    fn evict(&mut self, primary: usize) {
        let Some(group) = self.pool.unbind(primary) else {
            return;
        };
        for slot in group.iter_mut() {
            slot.cell.will_reuse();
            slot.set_hidden(&mut self.host, true);
        }
    }

    fn admit(&mut self, primary: usize) {
        let sizing = &self.sizing;
        let Some(group) = self.pool.bind(primary) else {
            return;
        };
        for (cross, slot) in group.iter_mut().enumerate() {
            self.host
                .move_container(&mut slot.container, sizing.cell_origin(cross, primary));
            let item = sizing.item_at(cross, primary);
            // Cells past the end of a short last row stay hidden.
            if item < sizing.item_count() {
                slot.cell.update(item, &mut slot.container);
                slot.set_hidden(&mut self.host, false);
            }
        }
    }

    fn recycle_to(&mut self, offset: f64) {
        self.offset = offset;
        let delta = self.scroller.scroll(&self.sizing, offset);
        self.apply(delta);
    }

    /// Handles a native scroll tick at `offset`.
    ///
    /// Recycles slot-groups for the new offset, then notifies scroll listeners.
    pub fn handle_scroll(&mut self, offset: f64) {
        self.recycle_to(offset);
        let event = ScrollEvent {
            offset,
            range: self.scroller.range(),
        };
        self.listeners.dispatch(&self.lifetime, &event);
    }

    /// Subscribes `callback` to scroll ticks.
    ///
    /// Callbacks run after recycling for the tick has completed. They are dropped when
    /// `options.cancel` is cancelled, after one delivery if `options.once` is set, and
    /// in any case when the grid is torn down.
    pub fn on_scroll(
        &mut self,
        callback: impl FnMut(&ScrollEvent) + 'static,
        options: ListenerOptions,
    ) {
        self.listeners.add(Box::new(callback), options);
    }

    /// Scrolls to `offset`, clamped to the content.
    ///
    /// Instant scrolls recycle immediately. Animated scrolls are left to the host, which
    /// reports progress through [`handle_scroll`](Self::handle_scroll).
    pub fn scroll_to(&mut self, offset: f64, animated: bool) {
        let offset = offset.min(self.sizing.max_scroll_offset()).max(0.0);
        self.host.scroll_to(offset, animated);
        if !animated {
            self.recycle_to(offset);
        }
    }

    /// Scrolls by `delta` from the current offset.
    pub fn scroll_by(&mut self, delta: f64, animated: bool) {
        self.scroll_to(self.offset + delta, animated);
    }

    /// Scrolls to the end of the content.
    pub fn scroll_to_end(&mut self, animated: bool) {
        self.scroll_to(self.sizing.max_scroll_offset(), animated);
    }

    /// Scroll offset that brings `item` into view with the given positioning.
    ///
    /// Items past the end are clamped to the last one; an empty grid yields `0.0`.
    #[must_use]
    pub fn offset_for_item(&self, item: usize, positioning: ScrollPositioning) -> f64 {
        let s = &self.sizing;
        let count = s.item_count();
        if count == 0 {
            return 0.0;
        }
        let start = A::point_primary(s.origin_of_item(item.min(count - 1)));
        let extent = A::primary(s.item_size());
        let gap = s.spacing().inter_primary;
        let viewport = s.viewport_extent();

        let target = match positioning {
            ScrollPositioning::Leading => start,
            ScrollPositioning::Center => start + extent / 2.0 + gap / 2.0 - viewport / 2.0,
            ScrollPositioning::Trailing => start + extent + gap - viewport,
            ScrollPositioning::Nearest => {
                let end = start + extent;
                if start >= self.offset && end <= self.offset + viewport {
                    self.offset
                } else if start < self.offset {
                    start
                } else {
                    end + gap - viewport
                }
            }
        };
        target.min(s.max_scroll_offset()).max(0.0)
    }

    /// Scrolls `item` into view.
    pub fn scroll_to_item(&mut self, item: usize, animated: bool, positioning: ScrollPositioning) {
        let offset = self.offset_for_item(item, positioning);
        self.scroll_to(offset, animated);
    }

    /// Resizes the viewport and rebuilds the pool for the new layout.
    pub fn set_view_size(&mut self, size: Size) {
        if self.sizing.set_view_size(size) {
            self.rebuild();
        }
    }

    /// Changes the content inset and rebuilds the pool for the new layout.
    pub fn set_content_inset(&mut self, inset: impl Into<Insets>) {
        if self.sizing.set_content_inset(inset.into()) {
            self.rebuild();
        }
    }

    /// Changes the number of items.
    ///
    /// The pool is kept as is unless the new layout needs more groups than it holds,
    /// which only happens when rows (or columns) have no extent and all of them are
    /// visible at once; then the pool is rebuilt. Otherwise rows past the new end are
    /// evicted, newly reachable rows are admitted, and cells of rows that stay bound
    /// are shown or hidden to match the new count.
    pub fn set_item_count(&mut self, count: usize) {
        if !self.sizing.set_item_count(count) {
            return;
        }
        tracing::debug!(
            item_count = count,
            primary_count = self.sizing.primary_count(),
            "item count changed"
        );
        if pool_size(&self.sizing, self.scroller.overscan()) > self.pool.capacity() {
            self.rebuild();
            return;
        }
        self.sync_content_size();
        self.recycle_to(self.offset);
        self.revalidate();
    }

    /// Re-runs [`Cell::update`] for every visible cell, for example after the backing
    /// data changed. Visibility is left alone.
    pub fn refresh(&mut self) {
        let sizing = &self.sizing;
        for (primary, group) in self.pool.active_mut() {
            for (cross, slot) in group.iter_mut().enumerate() {
                let item = sizing.item_at(cross, primary);
                if item < sizing.item_count() {
                    slot.cell.update(item, &mut slot.container);
                }
            }
        }
    }

    fn revalidate(&mut self) {
        let sizing = &self.sizing;
        for (primary, group) in self.pool.active_mut() {
            for (cross, slot) in group.iter_mut().enumerate() {
                let item = sizing.item_at(cross, primary);
                if item >= sizing.item_count() {
                    slot.set_hidden(&mut self.host, true);
                } else if slot.hidden {
                    slot.cell.update(item, &mut slot.container);
                    slot.set_hidden(&mut self.host, false);
                }
            }
        }
    }

    fn sync_content_size(&mut self) {
        let size = self.sizing.content_size();
        self.host.set_content_size(size);
        if self.has_overlay {
            self.host.resize_overlay(size);
        }
    }

    fn rebuild(&mut self) {
        let old = core::mem::replace(&mut self.pool, SlotPool::new(Vec::new()));
        release_groups(&mut self.host, old);

        let overscan = self.scroller.overscan();
        let (scroller, delta) = Scroller::new(&self.sizing, overscan, self.offset);
        let groups = build_groups(
            &self.sizing,
            &mut self.host,
            &mut *self.make_cell,
            pool_size(&self.sizing, overscan),
        );
        tracing::debug!(
            cross_count = self.sizing.cross_count(),
            primary_count = self.sizing.primary_count(),
            pool = groups.len(),
            "grid rebuilt"
        );
        self.scroller = scroller;
        self.pool = SlotPool::new(groups);

        self.host.set_view_size(self.sizing.view_size());
        self.sync_content_size();
        self.apply(delta);
    }

    /// Content-space origin of `item`, independent of scroll state.
    #[must_use]
    pub fn origin_of_item(&self, item: usize) -> Point {
        self.sizing.origin_of_item(item)
    }

    /// Item under a content-space point, if any.
    #[must_use]
    pub fn item_at_point(&self, point: Point) -> Option<usize> {
        self.sizing.item_at_point(point)
    }

    /// Returns `true` if the row (or column) holding `item` is bound.
    #[must_use]
    pub fn is_visible_item(&self, item: usize) -> bool {
        self.sizing.cross_count() > 0 && self.pool.is_active(self.sizing.primary_index_of(item))
    }

    /// Calls `f(cell, cross, primary)` for every cell showing an item.
    ///
    /// Rows (or columns) come in unspecified order; cells within one come in ascending
    /// cross order.
    pub fn for_each_visible_cell(&mut self, mut f: impl FnMut(&mut C, usize, usize)) {
        let sizing = &self.sizing;
        for (primary, group) in self.pool.active_mut() {
            for (cross, slot) in group.iter_mut().enumerate() {
                if sizing.item_at(cross, primary) < sizing.item_count() {
                    f(&mut slot.cell, cross, primary);
                }
            }
        }
    }

    /// Adds `node` to the content overlay, creating the overlay on first use.
    ///
    /// The overlay spans the whole content, is unaffected by recycling, and follows
    /// every relayout.
    pub fn add_content_overlay(&mut self, node: H::OverlayNode) -> H::OverlayNode {
        if !self.has_overlay {
            self.host.create_overlay(self.sizing.content_size());
            self.has_overlay = true;
        }
        self.host.prepend_overlay_node(&node);
        node
    }

    /// Tears the grid down and hands back the host.
    ///
    /// Cancels [`lifetime`](Self::lifetime), drops every listener, and unmounts and
    /// removes every container exactly once.
    pub fn teardown(self) -> H {
        let Self {
            pool,
            mut host,
            mut listeners,
            lifetime,
            ..
        } = self;
        lifetime.cancel();
        listeners.clear();
        release_groups(&mut host, pool);
        tracing::debug!("grid torn down");
        host
    }
}
