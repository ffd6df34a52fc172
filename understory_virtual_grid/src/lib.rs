// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_grid --heading-base-level=0

//! Understory Virtual Grid: a recycling, renderer-agnostic virtual grid.
//!
//! A virtual grid shows a very large number of uniformly sized items while only ever
//! materializing the handful that fit in the viewport. Items are laid out in rows
//! (vertical grids) or columns (horizontal grids) and the grid scrolls along one axis.
//!
//! The core concepts are:
//!
//! - [`Axis`]: a zero-sized tag, [`Vertical`] or [`Horizontal`], that maps the scroll
//!   axis ("primary") and the other axis ("cross") onto x and y. Every layout and
//!   scrolling routine is written once against it.
//! - [`Sizing`]: the layout. Given a [`Strategy`] (fixed item size, or fixed count per
//!   row/column), the viewport size, the content inset, and the item count, it derives
//!   the cross count, the effective spacing, and the content size, and answers
//!   geometry questions such as [`Sizing::origin_of_item`] and
//!   [`Sizing::item_at_point`].
//! - [`Scroller`] and [`visible_range`]: map a scroll offset to the inclusive
//!   [`IndexRange`] of rows that must be materialized, and report each change as a
//!   [`ScrollDelta`] of indices to evict and admit.
//! - [`Grid`]: the controller. It owns a fixed pool of slot-groups (one cell per
//!   cross position each), binds them to visible rows as the host scrolls, and never
//!   creates cells after construction except when the viewport or inset changes.
//!
//! This crate deliberately does **not** draw anything. Host frameworks implement
//! [`Host`] to create, move, hide, and remove containers, and [`Cell`] to fill a
//! container with an item's content. Hosts forward native scroll ticks to
//! [`Grid::handle_scroll`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_virtual_grid::{Cell, Host, ItemSizeLayout, Point, Rect, Size, vertical};
//!
//! /// A host that only remembers where its containers are.
//! #[derive(Default)]
//! struct Frames(Vec<Rect>);
//!
//! impl Host for Frames {
//!     type Container = usize;
//!     type OverlayNode = ();
//!
//!     fn create_container(&mut self, frame: Rect) -> usize {
//!         self.0.push(frame);
//!         self.0.len() - 1
//!     }
//!     fn move_container(&mut self, id: &mut usize, origin: Point) {
//!         self.0[*id] = Rect::from_origin_size(origin, self.0[*id].size());
//!     }
//!     fn set_container_hidden(&mut self, _: &mut usize, _: bool) {}
//!     fn remove_container(&mut self, _: usize) {}
//!     fn set_view_size(&mut self, _: Size) {}
//!     fn set_content_size(&mut self, _: Size) {}
//!     fn scroll_to(&mut self, _: f64, _: bool) {}
//!     fn create_overlay(&mut self, _: Size) {}
//!     fn resize_overlay(&mut self, _: Size) {}
//!     fn prepend_overlay_node(&mut self, _: &()) {}
//! }
//!
//! /// A cell that remembers which item it shows.
//! struct Label(Option<usize>);
//!
//! impl Cell<usize> for Label {
//!     fn mount(&mut self, _: &mut usize) {}
//!     fn update(&mut self, item: usize, _: &mut usize) {
//!         self.0 = Some(item);
//!     }
//! }
//!
//! // 10 000 items of 50×50 in a 200×300 viewport: four per row.
//! let mut grid = vertical(Size::new(200.0, 300.0))
//!     .item_size(ItemSizeLayout::new(Size::new(50.0, 50.0)))
//!     .item_count(10_000)
//!     .with_cell(|| Label(None))
//!     .build(Frames::default())
//!     .unwrap();
//!
//! assert_eq!(grid.sizing().cross_count(), 4);
//! let cells = grid.host().0.len();
//!
//! // The host reports a scroll tick; rows are recycled, not created.
//! grid.handle_scroll(5_000.0);
//! assert!(grid.is_visible_item(400));
//! assert_eq!(grid.host().0.len(), cells);
//! assert_eq!(grid.origin_of_item(401), Point::new(50.0, 5_000.0));
//! ```
//!
//! All coordinates are in content space (logical pixels, origin at the top-left of
//! the scrollable content). Extents are expected to be finite; negative viewport
//! extents and insets are clamped to zero.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod builder;
mod cell;
mod error;
mod geometry;
mod grid;
mod listener;
mod pool;
mod range;
mod scroller;
mod sizing;

#[cfg(test)]
mod testing;

pub use axis::{Axis, Horizontal, Vertical};
pub use builder::{DEFAULT_OVERSCAN, GridBuilder, horizontal, vertical};
pub use cell::{Cell, Host};
pub use error::ConfigError;
pub use geometry::{Insets, PartialInsets, Point, Rect, Size, Spacing};
pub use grid::{Grid, ScrollPositioning};
pub use listener::{CancelToken, ListenerOptions, ScrollEvent};
pub use range::IndexRange;
pub use scroller::{ScrollDelta, Scroller, pool_size, visible_count, visible_range};
pub use sizing::{CountLayout, ItemSizeLayout, Layout, Sizing, Strategy, compute_layout};
