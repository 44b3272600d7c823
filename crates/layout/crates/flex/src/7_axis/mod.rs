//! Flow-relative axes of a flex container.
//!
//! Spec: §7: Axis and Order <https://www.w3.org/TR/css-flexbox-1/#flow-order>

use trellis_style::{AvailableSpace, Direction, FlexDirection, FlexWrap, Rect, Size};

/// Orientation of a flex container after `direction` has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexAxes {
    /// Main axis; row-like directions are reversed in RTL.
    pub direction: FlexDirection,
    /// Items are laid out from the physical end of the cross axis.
    pub cross_reversed: bool,
    /// The container may break items into several lines.
    pub is_wrapping: bool,
}

impl FlexAxes {
    /// Resolve the axes of a container.
    ///
    /// RTL mirrors row-like main axes (so `row-reverse` in RTL runs left to right) and
    /// the cross axis of column-like containers. `wrap-reverse` flips the cross axis.
    pub fn resolve(flex_direction: FlexDirection, flex_wrap: FlexWrap, direction: Direction) -> Self {
        let is_rtl = direction.is_rtl();
        let effective = if is_rtl && flex_direction.is_row() {
            flex_direction.toggle_reverse()
        } else {
            flex_direction
        };
        let wrap_reverse = matches!(flex_wrap, FlexWrap::WrapReverse);
        Self {
            direction: effective,
            cross_reversed: wrap_reverse != (is_rtl && flex_direction.is_column()),
            is_wrapping: flex_wrap.is_wrapping(),
        }
    }

    /// Edge at main-start.
    #[inline]
    pub fn main_leading<T: Copy>(self, rect: Rect<T>) -> T {
        if self.direction.is_reverse() {
            rect.main_end(self.direction)
        } else {
            rect.main_start(self.direction)
        }
    }

    /// Edge at main-end.
    #[inline]
    pub fn main_trailing<T: Copy>(self, rect: Rect<T>) -> T {
        if self.direction.is_reverse() {
            rect.main_start(self.direction)
        } else {
            rect.main_end(self.direction)
        }
    }

    /// Edge at cross-start.
    #[inline]
    pub fn cross_leading<T: Copy>(self, rect: Rect<T>) -> T {
        if self.cross_reversed {
            rect.cross_end(self.direction)
        } else {
            rect.cross_start(self.direction)
        }
    }

    /// Edge at cross-end.
    #[inline]
    pub fn cross_trailing<T: Copy>(self, rect: Rect<T>) -> T {
        if self.cross_reversed {
            rect.cross_start(self.direction)
        } else {
            rect.cross_end(self.direction)
        }
    }

    /// Write the main-start and main-end edges of `rect`.
    pub fn set_main_edges(self, rect: &mut Rect<f32>, leading: f32, trailing: f32) {
        let (start, end) = if self.direction.is_reverse() {
            (trailing, leading)
        } else {
            (leading, trailing)
        };
        if self.direction.is_row() {
            rect.left = start;
            rect.right = end;
        } else {
            rect.top = start;
            rect.bottom = end;
        }
    }

    /// Write the cross-start and cross-end edges of `rect`.
    pub fn set_cross_edges(self, rect: &mut Rect<f32>, leading: f32, trailing: f32) {
        let (start, end) = if self.cross_reversed {
            (trailing, leading)
        } else {
            (leading, trailing)
        };
        if self.direction.is_row() {
            rect.top = start;
            rect.bottom = end;
        } else {
            rect.left = start;
            rect.right = end;
        }
    }

    /// Physical main-axis offset of a box placed `logical` from main-start.
    #[inline]
    pub fn physical_main(self, logical: f32, size: f32, container: f32) -> f32 {
        if self.direction.is_reverse() {
            container - logical - size
        } else {
            logical
        }
    }

    /// Physical cross-axis offset of a box placed `logical` from cross-start.
    #[inline]
    pub fn physical_cross(self, logical: f32, size: f32, container: f32) -> f32 {
        if self.cross_reversed {
            container - logical - size
        } else {
            logical
        }
    }

    /// Per-axis available space built from main and cross values.
    #[inline]
    pub fn available(self, main: AvailableSpace, cross: AvailableSpace) -> Size<AvailableSpace> {
        Size::from_main_cross(self.direction, main, cross)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if RTL does not mirror row-like directions.
    fn rtl_flips_rows_only() {
        let row = FlexAxes::resolve(FlexDirection::Row, FlexWrap::NoWrap, Direction::Rtl);
        assert_eq!(row.direction, FlexDirection::RowReverse);
        assert!(!row.cross_reversed);
        let reversed =
            FlexAxes::resolve(FlexDirection::RowReverse, FlexWrap::NoWrap, Direction::Rtl);
        assert_eq!(reversed.direction, FlexDirection::Row);
        let column = FlexAxes::resolve(FlexDirection::Column, FlexWrap::Wrap, Direction::Rtl);
        assert_eq!(column.direction, FlexDirection::Column);
        assert!(column.cross_reversed);
    }

    #[test]
    /// # Panics
    /// Panics if logical edges do not follow main-axis reversal.
    fn logical_edges_follow_reversal() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let axes = FlexAxes::resolve(FlexDirection::RowReverse, FlexWrap::WrapReverse, Direction::Ltr);
        assert_eq!(axes.main_leading(rect), 2.0);
        assert_eq!(axes.cross_leading(rect), 4.0);
        let mut margins = Rect::ZERO;
        axes.set_main_edges(&mut margins, 5.0, 6.0);
        assert_eq!((margins.left, margins.right), (6.0, 5.0));
        assert_eq!(axes.physical_main(10.0, 20.0, 100.0), 70.0);
    }
}
