// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry value types shared by sizing, scrolling, and the grid controller.
//!
//! Sizes, points, and insets come straight from [`kurbo`]. Insets follow kurbo's
//! convention: `x0` is the left edge, `y0` the top, `x1` the right, `y1` the bottom.

pub use kurbo::{Insets, Point, Rect, Size};

/// Gap between adjacent items along each axis.
///
/// Values are axis-relative: `inter_cross` separates items within one row (or column)
/// and `inter_primary` separates consecutive rows (or columns) along the scroll axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spacing {
    /// Gap between neighbouring items on the cross (non-scrolling) axis.
    pub inter_cross: f64,
    /// Gap between neighbouring items on the primary (scrolling) axis.
    pub inter_primary: f64,
}

impl Spacing {
    /// No spacing on either axis.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a spacing value from cross and primary gaps.
    #[must_use]
    pub const fn new(inter_cross: f64, inter_primary: f64) -> Self {
        Self {
            inter_cross,
            inter_primary,
        }
    }

    /// The same gap on both axes.
    #[must_use]
    pub const fn uniform(gap: f64) -> Self {
        Self::new(gap, gap)
    }
}

/// A per-edge inset record where missing edges default to zero.
///
/// Converts into [`Insets`], so it can be passed anywhere a content inset is accepted.
///
/// ```rust
/// use understory_virtual_grid::{Insets, PartialInsets};
///
/// let insets: Insets = PartialInsets {
///     top: Some(4.0),
///     ..PartialInsets::default()
/// }
/// .into();
/// assert_eq!(insets.y0, 4.0);
/// assert_eq!(insets.x0, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialInsets {
    /// Top edge.
    pub top: Option<f64>,
    /// Right edge.
    pub right: Option<f64>,
    /// Bottom edge.
    pub bottom: Option<f64>,
    /// Left edge.
    pub left: Option<f64>,
}

impl From<PartialInsets> for Insets {
    fn from(p: PartialInsets) -> Self {
        Self::new(
            p.left.unwrap_or(0.0),
            p.top.unwrap_or(0.0),
            p.right.unwrap_or(0.0),
            p.bottom.unwrap_or(0.0),
        )
    }
}

/// Clamp finite negatives to zero.
///
/// NaNs are preserved; callers are expected to avoid them.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_sign_negative() { 0.0 } else { v }
}

/// Clamp every edge of `insets` to be non-negative.
pub(crate) fn sanitize_insets(insets: Insets) -> Insets {
    Insets::new(
        non_negative(insets.x0),
        non_negative(insets.y0),
        non_negative(insets.x1),
        non_negative(insets.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::{Insets, PartialInsets, sanitize_insets};

    #[test]
    fn partial_insets_fill_missing_edges_with_zero() {
        let insets: Insets = PartialInsets {
            right: Some(3.0),
            bottom: Some(7.0),
            ..PartialInsets::default()
        }
        .into();
        assert_eq!(insets, Insets::new(0.0, 0.0, 3.0, 7.0));
    }

    #[test]
    fn negative_edges_are_clamped() {
        let insets = sanitize_insets(Insets::new(-1.0, 2.0, -0.5, 4.0));
        assert_eq!(insets, Insets::new(0.0, 2.0, 0.0, 4.0));
    }
}
