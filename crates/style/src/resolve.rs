//! Resolution of whole `Size`/`Rect` style values.
//!
//! Padding, border and margin percentages resolve against the containing block's
//! width on both axes; sizes and insets resolve per axis.

use crate::geometry::{Rect, Size};
use crate::values::{Dimension, LengthPercentage, LengthPercentageAuto};

impl Size<Dimension> {
    /// Resolve each axis against the matching axis of `basis`.
    #[inline]
    pub fn resolve(&self, basis: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.width.resolve(basis.width),
            height: self.height.resolve(basis.height),
        }
    }
}

impl Size<LengthPercentage> {
    /// Resolve each axis against the matching axis of `basis`, zero when unresolved.
    #[inline]
    pub fn resolve_or_zero(&self, basis: Size<Option<f32>>) -> Size<f32> {
        Size {
            width: self.width.resolve_or_zero(basis.width),
            height: self.height.resolve_or_zero(basis.height),
        }
    }
}

impl Rect<LengthPercentage> {
    /// Resolve every edge against the containing block width, zero when unresolved.
    #[inline]
    pub fn resolve_or_zero(&self, width_basis: Option<f32>) -> Rect<f32> {
        Rect {
            left: self.left.resolve_or_zero(width_basis),
            right: self.right.resolve_or_zero(width_basis),
            top: self.top.resolve_or_zero(width_basis),
            bottom: self.bottom.resolve_or_zero(width_basis),
        }
    }
}

impl Rect<LengthPercentageAuto> {
    /// Resolve every edge against the containing block width; `auto` stays `None`.
    #[inline]
    pub fn resolve(&self, width_basis: Option<f32>) -> Rect<Option<f32>> {
        Rect {
            left: self.left.resolve(width_basis),
            right: self.right.resolve(width_basis),
            top: self.top.resolve(width_basis),
            bottom: self.bottom.resolve(width_basis),
        }
    }

    /// Resolve every edge against the containing block width, zero for `auto`.
    #[inline]
    pub fn resolve_or_zero(&self, width_basis: Option<f32>) -> Rect<f32> {
        self.resolve(width_basis).map(|edge| edge.unwrap_or(0.0))
    }

    /// Resolve horizontal edges against the width and vertical edges against the height.
    ///
    /// Used for `inset`, whose percentages are per-axis.
    #[inline]
    pub fn resolve_per_axis(&self, basis: Size<Option<f32>>) -> Rect<Option<f32>> {
        Rect {
            left: self.left.resolve(basis.width),
            right: self.right.resolve(basis.width),
            top: self.top.resolve(basis.height),
            bottom: self.bottom.resolve(basis.height),
        }
    }

    /// Which edges are `auto`.
    #[inline]
    pub fn auto_edges(&self) -> Rect<bool> {
        Rect {
            left: self.left.is_auto(),
            right: self.right.is_auto(),
            top: self.top.is_auto(),
            bottom: self.bottom.is_auto(),
        }
    }
}
