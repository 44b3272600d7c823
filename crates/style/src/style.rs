//! The per-node style record consumed by the layout algorithms.

use crate::alignment::{AlignContent, AlignItems, AlignSelf, JustifyContent, JustifyItems, JustifySelf};
use crate::flex::{FlexDirection, FlexWrap};
use crate::geometry::{AbsoluteAxis, Line, Point, Rect, Size};
use crate::grid::{GridAutoFlow, GridPlacement, NonRepeatedTrackSizingFunction, TrackSizingFunction};
use crate::values::{Dimension, LengthPercentage, LengthPercentageAuto};

/// Outer/inner display type, reduced to the formatting contexts the engine implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Display {
    /// Block formatting context.
    Block,
    /// Flex formatting context.
    #[default]
    Flex,
    /// Grid formatting context.
    Grid,
    /// Generates no box; the subtree is skipped.
    None,
}

/// Positioning scheme.
///
/// Spec: CSS Positioned Layout Module Level 3 §2
/// <https://www.w3.org/TR/css-position-3/#position-property>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Position {
    /// In flow, shifted by `inset` after layout.
    #[default]
    Relative,
    /// Out of flow, positioned against the parent's padding box.
    Absolute,
}

/// Overflow behaviour per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Overflow {
    /// Content may overflow; overflow is reported through content size.
    #[default]
    Visible,
    /// Content is clipped without a scroll container.
    Clip,
    /// Content is clipped; the box is a scroll container.
    Hidden,
    /// Content is clipped and a scrollbar gutter is reserved.
    Scroll,
}

impl Overflow {
    /// True when the box becomes a scroll container on this axis.
    #[inline]
    pub const fn is_scroll_container(self) -> bool {
        matches!(self, Self::Hidden | Self::Scroll)
    }

    /// True when overflowing content extends the box's content size.
    #[inline]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Automatic minimum size on this axis: scroll containers have none.
    #[inline]
    pub const fn maybe_into_automatic_min_size(self) -> Option<f32> {
        if self.is_scroll_container() {
            Some(0.0)
        } else {
            None
        }
    }
}

/// Inline base direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Use the parent's resolved direction (LTR at the root).
    #[default]
    Inherit,
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// True for an explicit `rtl`.
    #[inline]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Which box `size`/`min_size`/`max_size` describe.
///
/// Spec: CSS Box Sizing Module Level 3 §4.1
/// <https://www.w3.org/TR/css-sizing-3/#box-sizing>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum BoxSizing {
    /// Sizes include padding and border.
    #[default]
    BorderBox,
    /// Sizes describe the content box.
    ContentBox,
}

/// Layout-affecting style of a single node.
///
/// Construct with `Style::default()` and struct update syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Formatting context the node establishes.
    pub display: Display,
    /// Box that sizes refer to.
    pub box_sizing: BoxSizing,
    /// Positioning scheme.
    pub position: Position,
    /// Inline base direction.
    pub direction: Direction,
    /// Overflow per axis.
    pub overflow: Point<Overflow>,
    /// Width of the scrollbar gutter reserved by `Overflow::Scroll`.
    pub scrollbar_width: f32,
    /// Offsets for relative and absolute positioning.
    pub inset: Rect<LengthPercentageAuto>,

    /// Preferred size.
    pub size: Size<Dimension>,
    /// Minimum size.
    pub min_size: Size<Dimension>,
    /// Maximum size.
    pub max_size: Size<Dimension>,
    /// Preferred `width / height` ratio.
    pub aspect_ratio: Option<f32>,

    /// Margins.
    pub margin: Rect<LengthPercentageAuto>,
    /// Padding.
    pub padding: Rect<LengthPercentage>,
    /// Border widths.
    pub border: Rect<LengthPercentage>,

    /// Default cross-axis alignment of children; `None` is `normal`.
    pub align_items: Option<AlignItems>,
    /// Cross-axis alignment override for this node as an item.
    pub align_self: Option<AlignSelf>,
    /// Default inline-axis alignment of grid children.
    pub justify_items: Option<JustifyItems>,
    /// Inline-axis alignment override for this node as a grid item.
    pub justify_self: Option<JustifySelf>,
    /// Distribution of lines (flex) or rows (grid).
    pub align_content: Option<AlignContent>,
    /// Distribution along the main axis (flex) or of columns (grid).
    pub justify_content: Option<JustifyContent>,
    /// Column gap (`width`) and row gap (`height`).
    pub gap: Size<LengthPercentage>,

    /// Main axis and its orientation.
    pub flex_direction: FlexDirection,
    /// Single- or multi-line.
    pub flex_wrap: FlexWrap,
    /// Initial main size.
    pub flex_basis: Dimension,
    /// Share of positive free space.
    pub flex_grow: f32,
    /// Share of negative free space, weighted by the base size.
    pub flex_shrink: f32,

    /// Explicit row tracks.
    pub grid_template_rows: Vec<TrackSizingFunction>,
    /// Explicit column tracks.
    pub grid_template_columns: Vec<TrackSizingFunction>,
    /// Implicit row tracks, cycled.
    pub grid_auto_rows: Vec<NonRepeatedTrackSizingFunction>,
    /// Implicit column tracks, cycled.
    pub grid_auto_columns: Vec<NonRepeatedTrackSizingFunction>,
    /// Auto-placement direction and packing.
    pub grid_auto_flow: GridAutoFlow,
    /// Row placement of this node as a grid item.
    pub grid_row: Line<GridPlacement>,
    /// Column placement of this node as a grid item.
    pub grid_column: Line<GridPlacement>,

    /// The item is a table wrapper: it keeps its intrinsic width instead of stretching.
    pub item_is_table: bool,
    /// The item is a replaced element: its grid minimum contribution may be compressed.
    pub item_is_replaced: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Style {
    /// CSS initial values.
    pub const DEFAULT: Self = Self {
        display: Display::Flex,
        box_sizing: BoxSizing::BorderBox,
        position: Position::Relative,
        direction: Direction::Inherit,
        overflow: Point::new(Overflow::Visible, Overflow::Visible),
        scrollbar_width: 0.0,
        inset: Rect::new(
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::Auto,
        ),
        size: Size::new(Dimension::Auto, Dimension::Auto),
        min_size: Size::new(Dimension::Auto, Dimension::Auto),
        max_size: Size::new(Dimension::Auto, Dimension::Auto),
        aspect_ratio: None,
        margin: Rect::new(
            LengthPercentageAuto::ZERO,
            LengthPercentageAuto::ZERO,
            LengthPercentageAuto::ZERO,
            LengthPercentageAuto::ZERO,
        ),
        padding: Rect::new(
            LengthPercentage::ZERO,
            LengthPercentage::ZERO,
            LengthPercentage::ZERO,
            LengthPercentage::ZERO,
        ),
        border: Rect::new(
            LengthPercentage::ZERO,
            LengthPercentage::ZERO,
            LengthPercentage::ZERO,
            LengthPercentage::ZERO,
        ),
        align_items: None,
        align_self: None,
        justify_items: None,
        justify_self: None,
        align_content: None,
        justify_content: None,
        gap: Size::new(LengthPercentage::ZERO, LengthPercentage::ZERO),
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::NoWrap,
        flex_basis: Dimension::Auto,
        flex_grow: 0.0,
        flex_shrink: 1.0,
        grid_template_rows: Vec::new(),
        grid_template_columns: Vec::new(),
        grid_auto_rows: Vec::new(),
        grid_auto_columns: Vec::new(),
        grid_auto_flow: GridAutoFlow::Row,
        grid_row: Line::new(GridPlacement::Auto, GridPlacement::Auto),
        grid_column: Line::new(GridPlacement::Auto, GridPlacement::Auto),
        item_is_table: false,
        item_is_replaced: false,
    };

    /// Explicit track list for a physical axis (columns are horizontal).
    #[inline]
    pub fn grid_template(&self, axis: AbsoluteAxis) -> &[TrackSizingFunction] {
        match axis {
            AbsoluteAxis::Horizontal => &self.grid_template_columns,
            AbsoluteAxis::Vertical => &self.grid_template_rows,
        }
    }

    /// Implicit track list for a physical axis.
    #[inline]
    pub fn grid_auto_tracks(&self, axis: AbsoluteAxis) -> &[NonRepeatedTrackSizingFunction] {
        match axis {
            AbsoluteAxis::Horizontal => &self.grid_auto_columns,
            AbsoluteAxis::Vertical => &self.grid_auto_rows,
        }
    }

    /// Item placement along a physical axis.
    #[inline]
    pub const fn grid_placement(&self, axis: AbsoluteAxis) -> Line<GridPlacement> {
        match axis {
            AbsoluteAxis::Horizontal => self.grid_column,
            AbsoluteAxis::Vertical => self.grid_row,
        }
    }

    /// Overflow along a physical axis.
    #[inline]
    pub const fn overflow_in(&self, axis: AbsoluteAxis) -> Overflow {
        self.overflow.get(axis)
    }

    /// Content alignment along a physical axis (columns follow `justify-content`).
    #[inline]
    pub const fn content_alignment(&self, axis: AbsoluteAxis) -> Option<AlignContent> {
        match axis {
            AbsoluteAxis::Horizontal => self.justify_content,
            AbsoluteAxis::Vertical => self.align_content,
        }
    }

    /// Self-alignment of this item along a physical axis, falling back to the parent's default.
    #[inline]
    pub const fn self_alignment(
        &self,
        axis: AbsoluteAxis,
        parent_default: Option<AlignItems>,
    ) -> Option<AlignItems> {
        let own = match axis {
            AbsoluteAxis::Horizontal => self.justify_self,
            AbsoluteAxis::Vertical => self.align_self,
        };
        match own {
            Some(alignment) => Some(alignment),
            None => parent_default,
        }
    }

    /// Default item alignment this container hands to its children along a physical axis.
    #[inline]
    pub const fn items_alignment(&self, axis: AbsoluteAxis) -> Option<AlignItems> {
        match axis {
            AbsoluteAxis::Horizontal => self.justify_items,
            AbsoluteAxis::Vertical => self.align_items,
        }
    }

    /// True when the node is taken out of flow.
    #[inline]
    pub const fn is_absolutely_positioned(&self) -> bool {
        matches!(self.position, Position::Absolute)
    }

    /// Scrollbar gutter reserved on each axis: a vertical scrollbar consumes width.
    #[inline]
    pub fn scrollbar_gutter(&self) -> Size<f32> {
        Size {
            width: if matches!(self.overflow.y, Overflow::Scroll) {
                self.scrollbar_width
            } else {
                0.0
            },
            height: if matches!(self.overflow.x, Overflow::Scroll) {
                self.scrollbar_width
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if style defaults drift from CSS initial values.
    fn defaults_match_initial_values() {
        let style = Style::default();
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.flex_grow, 0.0);
        assert_eq!(style.direction, Direction::Inherit);
        assert_eq!(style.inset.left, LengthPercentageAuto::Auto);
        assert_eq!(style.margin.top, LengthPercentageAuto::ZERO);
        assert_eq!(style.size.width, Dimension::Auto);
        assert!(!style.item_is_table);
    }

    #[test]
    /// # Panics
    /// Panics if the scrollbar gutter lands on the wrong axis.
    fn scrollbar_gutter_axes() {
        let style = Style {
            overflow: Point::new(Overflow::Visible, Overflow::Scroll),
            scrollbar_width: 15.0,
            ..Style::default()
        };
        assert_eq!(style.scrollbar_gutter(), Size::new(15.0, 0.0));
    }

    #[test]
    /// # Panics
    /// Panics if per-item alignment does not override the container default.
    fn self_alignment_overrides_default() {
        let style = Style {
            justify_self: Some(AlignItems::Center),
            ..Style::default()
        };
        assert_eq!(
            style.self_alignment(AbsoluteAxis::Horizontal, Some(AlignItems::End)),
            Some(AlignItems::Center)
        );
        assert_eq!(
            style.self_alignment(AbsoluteAxis::Vertical, Some(AlignItems::End)),
            Some(AlignItems::End)
        );
    }
}
