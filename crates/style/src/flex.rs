//! Flex container properties.
//!
//! Spec: CSS Flexible Box Layout Module Level 1 §5
//! <https://www.w3.org/TR/css-flexbox-1/#flex-containers>

use crate::geometry::AbsoluteAxis;

/// `flex-direction`.
///
/// Spec: §5.1 <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FlexDirection {
    /// Main axis is inline (horizontal).
    #[default]
    Row,
    /// Main axis is block (vertical).
    Column,
    /// Inline, reversed.
    RowReverse,
    /// Block, reversed.
    ColumnReverse,
}

impl FlexDirection {
    /// True for `row` and `row-reverse`.
    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// True for `column` and `column-reverse`.
    #[inline]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }

    /// True for the `-reverse` variants.
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    /// Physical axis the main axis maps to.
    #[inline]
    pub const fn main_axis(self) -> AbsoluteAxis {
        if self.is_row() {
            AbsoluteAxis::Horizontal
        } else {
            AbsoluteAxis::Vertical
        }
    }

    /// Physical axis the cross axis maps to.
    #[inline]
    pub const fn cross_axis(self) -> AbsoluteAxis {
        self.main_axis().other()
    }

    /// Same axis with the reversal toggled.
    #[inline]
    #[must_use]
    pub const fn toggle_reverse(self) -> Self {
        match self {
            Self::Row => Self::RowReverse,
            Self::RowReverse => Self::Row,
            Self::Column => Self::ColumnReverse,
            Self::ColumnReverse => Self::Column,
        }
    }
}

/// `flex-wrap`.
///
/// Spec: §5.2 <https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FlexWrap {
    /// Single line.
    #[default]
    NoWrap,
    /// Multi-line, lines stacked in the cross-start direction.
    Wrap,
    /// Multi-line, lines stacked in reverse.
    WrapReverse,
}

impl FlexWrap {
    /// True for the multi-line variants.
    #[inline]
    pub const fn is_wrapping(self) -> bool {
        !matches!(self, Self::NoWrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if axis classification is wrong.
    fn direction_axes() {
        assert_eq!(FlexDirection::Row.main_axis(), AbsoluteAxis::Horizontal);
        assert_eq!(FlexDirection::ColumnReverse.main_axis(), AbsoluteAxis::Vertical);
        assert_eq!(FlexDirection::Column.cross_axis(), AbsoluteAxis::Horizontal);
        assert!(FlexDirection::RowReverse.is_reverse());
        assert_eq!(FlexDirection::RowReverse.toggle_reverse(), FlexDirection::Row);
        assert!(FlexWrap::WrapReverse.is_wrapping());
    }
}
