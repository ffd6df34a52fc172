// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use alloc::string::String;

/// A grid could not be configured as requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither [`GridBuilder::item_size`](crate::GridBuilder::item_size) nor
    /// [`GridBuilder::count`](crate::GridBuilder::count) was called.
    #[error("unable to build: no layout strategy, use `item_size()` or `count()`")]
    MissingLayout,
    /// [`GridBuilder::with_cell`](crate::GridBuilder::with_cell) was not called.
    #[error("unable to build: no cell factory, use `with_cell()`")]
    MissingCellFactory,
    /// A scroll positioning name was not recognized.
    #[error("invalid scroll positioning: {0:?}")]
    UnknownScrollPositioning(String),
}
