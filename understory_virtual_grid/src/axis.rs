// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis orientation tags.
//!
//! A grid scrolls along its *primary* axis and lays items out in a fixed number of
//! slots along its *cross* axis. The two orientations are transpositions of each
//! other, so every algorithm in this crate is written once against [`Axis`] and
//! instantiated with [`Vertical`] or [`Horizontal`].

use core::fmt::Debug;

use kurbo::{Insets, Point, Size};

/// Maps axis-relative quantities onto x/y geometry.
pub trait Axis: Copy + Debug + Default + 'static {
    /// Extent of `size` along the primary (scrolling) axis.
    fn primary(size: Size) -> f64;

    /// Extent of `size` along the cross (fixed) axis.
    fn cross(size: Size) -> f64;

    /// Builds a size from primary and cross extents.
    fn size(primary: f64, cross: f64) -> Size;

    /// Builds a point from primary and cross coordinates.
    fn point(primary: f64, cross: f64) -> Point;

    /// Coordinate of `point` along the primary axis.
    fn point_primary(point: Point) -> f64;

    /// Coordinate of `point` along the cross axis.
    fn point_cross(point: Point) -> f64;

    /// Inset at the start of the primary axis.
    fn leading_primary(insets: Insets) -> f64;

    /// Inset at the end of the primary axis.
    fn trailing_primary(insets: Insets) -> f64;

    /// Inset at the start of the cross axis.
    fn leading_cross(insets: Insets) -> f64;

    /// Inset at the end of the cross axis.
    fn trailing_cross(insets: Insets) -> f64;
}

/// Rows stacked top to bottom; the grid scrolls vertically and columns are fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vertical;

/// Columns stacked left to right; the grid scrolls horizontally and rows are fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Horizontal;

impl Axis for Vertical {
    #[inline]
    fn primary(size: Size) -> f64 {
        size.height
    }

    #[inline]
    fn cross(size: Size) -> f64 {
        size.width
    }

    #[inline]
    fn size(primary: f64, cross: f64) -> Size {
        Size::new(cross, primary)
    }

    #[inline]
    fn point(primary: f64, cross: f64) -> Point {
        Point::new(cross, primary)
    }

    #[inline]
    fn point_primary(point: Point) -> f64 {
        point.y
    }

    #[inline]
    fn point_cross(point: Point) -> f64 {
        point.x
    }

    #[inline]
    fn leading_primary(insets: Insets) -> f64 {
        insets.y0
    }

    #[inline]
    fn trailing_primary(insets: Insets) -> f64 {
        insets.y1
    }

    #[inline]
    fn leading_cross(insets: Insets) -> f64 {
        insets.x0
    }

    #[inline]
    fn trailing_cross(insets: Insets) -> f64 {
        insets.x1
    }
}

impl Axis for Horizontal {
    #[inline]
    fn primary(size: Size) -> f64 {
        size.width
    }

    #[inline]
    fn cross(size: Size) -> f64 {
        size.height
    }

    #[inline]
    fn size(primary: f64, cross: f64) -> Size {
        Size::new(primary, cross)
    }

    #[inline]
    fn point(primary: f64, cross: f64) -> Point {
        Point::new(primary, cross)
    }

    #[inline]
    fn point_primary(point: Point) -> f64 {
        point.x
    }

    #[inline]
    fn point_cross(point: Point) -> f64 {
        point.y
    }

    #[inline]
    fn leading_primary(insets: Insets) -> f64 {
        insets.x0
    }

    #[inline]
    fn trailing_primary(insets: Insets) -> f64 {
        insets.x1
    }

    #[inline]
    fn leading_cross(insets: Insets) -> f64 {
        insets.y0
    }

    #[inline]
    fn trailing_cross(insets: Insets) -> f64 {
        insets.y1
    }
}
