// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent construction of grids.

use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;

use kurbo::{Insets, Size};

use crate::{
    Axis, Cell, ConfigError, CountLayout, Grid, Horizontal, Host, ItemSizeLayout, Sizing,
    Strategy, Vertical,
};

/// Overscan used when none is configured.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Starts a vertically scrolling grid with the given viewport size.
#[must_use]
pub fn vertical<C>(view_size: Size) -> GridBuilder<Vertical, C> {
    GridBuilder::new(view_size)
}

/// Starts a horizontally scrolling grid with the given viewport size.
#[must_use]
pub fn horizontal<C>(view_size: Size) -> GridBuilder<Horizontal, C> {
    GridBuilder::new(view_size)
}

/// Collects grid configuration; finish with [`build`](Self::build).
///
/// A layout strategy and a cell factory are required. Everything else has a default:
/// no inset, no items, and an overscan of [`DEFAULT_OVERSCAN`].
pub struct GridBuilder<A: Axis, C> {
    view_size: Size,
    strategy: Option<Strategy>,
    content_inset: Insets,
    item_count: usize,
    overscan: usize,
    make_cell: Option<Box<dyn FnMut() -> C>>,
    axis: PhantomData<A>,
}

impl<A: Axis, C> fmt::Debug for GridBuilder<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridBuilder")
            .field("axis", &A::default())
            .field("view_size", &self.view_size)
            .field("strategy", &self.strategy)
            .field("content_inset", &self.content_inset)
            .field("item_count", &self.item_count)
            .field("overscan", &self.overscan)
            .field("has_cell_factory", &self.make_cell.is_some())
            .finish_non_exhaustive()
    }
}

impl<A: Axis, C> GridBuilder<A, C> {
    /// Starts a grid with the given viewport size.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        Self {
            view_size,
            strategy: None,
            content_inset: Insets::ZERO,
            item_count: 0,
            overscan: DEFAULT_OVERSCAN,
            make_cell: None,
            axis: PhantomData,
        }
    }

    /// Lays items out at a fixed size, fitting as many per row (or column) as possible.
    #[must_use]
    pub fn item_size(self, layout: ItemSizeLayout) -> Self {
        self.strategy(layout)
    }

    /// Lays out a fixed number of items per row (or column), stretched to fill.
    #[must_use]
    pub fn count(self, layout: CountLayout) -> Self {
        self.strategy(layout)
    }

    /// Sets the layout strategy, replacing any earlier one.
    #[must_use]
    pub fn strategy(mut self, strategy: impl Into<Strategy>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Sets the padding around the content.
    ///
    /// Accepts anything convertible to [`Insets`], including a single `f64` for a
    /// uniform inset and [`PartialInsets`](crate::PartialInsets).
    #[must_use]
    pub fn content_inset(mut self, inset: impl Into<Insets>) -> Self {
        self.content_inset = inset.into();
        self
    }

    /// Sets the initial number of items.
    #[must_use]
    pub fn item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    /// Sets how many extra rows (or columns) to keep on each side of the viewport.
    #[must_use]
    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the factory producing one cell per slot.
    #[must_use]
    pub fn with_cell(mut self, make_cell: impl FnMut() -> C + 'static) -> Self {
        self.make_cell = Some(Box::new(make_cell));
        self
    }

    /// Builds the grid on top of `host`.
    ///
    /// The pool is filled and the initially visible cells are bound before this
    /// returns.
    pub fn build<H>(self, host: H) -> Result<Grid<A, H, C>, ConfigError>
    where
        H: Host,
        C: Cell<H::Container>,
    {
        let strategy = self.strategy.ok_or(ConfigError::MissingLayout)?;
        let make_cell = self.make_cell.ok_or(ConfigError::MissingCellFactory)?;
        let sizing = Sizing::new(strategy, self.view_size, self.content_inset, self.item_count);
        Ok(Grid::new(sizing, self.overscan, make_cell, host))
    }
}
