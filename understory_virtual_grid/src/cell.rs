// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits implemented by the host UI stack.
//!
//! The grid never draws anything itself. It asks a [`Host`] for one container per
//! slot, positions and hides those containers, and hands them to a [`Cell`] to fill
//! in. What a container *is* (a DOM element, a retained scene node, a terminal
//! region) is entirely up to the host.

use kurbo::{Point, Rect, Size};

/// Visual representation of one item, reused across many items over its lifetime.
///
/// Cells are produced by the grid's cell factory, one per slot, and are rebound to a
/// different item every time their slot-group is recycled.
pub trait Cell<C> {
    /// Builds the cell's visual tree inside `container`. Called once, right after
    /// the cell and its container are created.
    fn mount(&mut self, container: &mut C);

    /// Shows `item` in `container`. Called once each time the slot is bound to a
    /// valid item, and again on [`Grid::refresh`](crate::Grid::refresh).
    fn update(&mut self, item: usize, container: &mut C);

    /// Called when the slot is released back to the pool.
    fn will_reuse(&mut self) {}

    /// Called once before the container is removed for good.
    fn unmount(&mut self, container: &mut C) {
        let _ = container;
    }
}

/// The rendering surface a grid draws into.
///
/// All coordinates are in content space: the origin is the top-left corner of the
/// scrollable content, not of the viewport.
pub trait Host {
    /// Per-slot container handed to [`Cell::mount`] and [`Cell::update`].
    type Container;

    /// Node type accepted by the content overlay.
    type OverlayNode;

    /// Creates a hidden container occupying `frame`.
    fn create_container(&mut self, frame: Rect) -> Self::Container;

    /// Moves `container` so its top-left corner sits at `origin`.
    fn move_container(&mut self, container: &mut Self::Container, origin: Point);

    /// Shows or hides `container`.
    fn set_container_hidden(&mut self, container: &mut Self::Container, hidden: bool);

    /// Destroys `container`.
    fn remove_container(&mut self, container: Self::Container);

    /// Resizes the viewport.
    fn set_view_size(&mut self, size: Size);

    /// Resizes the scrollable content.
    fn set_content_size(&mut self, size: Size);

    /// Scrolls the viewport to `offset` along the scroll axis.
    ///
    /// Animated scrolls are fire-and-forget: the host reports progress through
    /// [`Grid::handle_scroll`](crate::Grid::handle_scroll) as it normally would.
    fn scroll_to(&mut self, offset: f64, animated: bool);

    /// Creates the overlay layer, covering the content and passing input through.
    fn create_overlay(&mut self, size: Size);

    /// Resizes the overlay layer.
    fn resize_overlay(&mut self, size: Size);

    /// Inserts `node` as the first child of the overlay layer.
    fn prepend_overlay_node(&mut self, node: &Self::OverlayNode);
}
