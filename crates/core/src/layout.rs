//! Layout inputs and outputs exchanged between the algorithms, and the per-node result.

use trellis_style::{AvailableSpace, Point, Rect, Size};

/// Whether a layout call must position children or only report a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Size and position the node's children, storing their layouts.
    PerformLayout,
    /// Only compute the node's size.
    ComputeSize,
}

/// Whether the node's own style size participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizingMode {
    /// Ignore the style size, use content only (intrinsic contributions).
    ContentSize,
    /// Apply the style size, min/max and aspect ratio.
    InherentSize,
}

/// Which dimension(s) the caller needs from a [`RunMode::ComputeSize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedAxis {
    /// Width only.
    Horizontal,
    /// Height only.
    Vertical,
    /// Both.
    Both,
}

/// Input of one layout call on one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    /// Perform layout or only measure.
    pub run_mode: RunMode,
    /// Apply or ignore the node's style size.
    pub sizing_mode: SizingMode,
    /// Dimensions the caller needs.
    pub axis: RequestedAxis,
    /// Border-box dimensions already fixed by the parent.
    pub known_dimensions: Size<Option<f32>>,
    /// Size of the containing block, used for percentage resolution.
    pub parent_size: Size<Option<f32>>,
    /// Space available to the node's border box.
    pub available_space: Size<AvailableSpace>,
}

impl LayoutInput {
    /// A measurement request for `axis` with no fixed dimensions.
    pub const fn measure(
        axis: RequestedAxis,
        available_space: Size<AvailableSpace>,
        parent_size: Size<Option<f32>>,
    ) -> Self {
        Self {
            run_mode: RunMode::ComputeSize,
            sizing_mode: SizingMode::InherentSize,
            axis,
            known_dimensions: Size::NONE,
            parent_size,
            available_space,
        }
    }

    /// A full layout request.
    pub const fn perform(
        known_dimensions: Size<Option<f32>>,
        parent_size: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
    ) -> Self {
        Self {
            run_mode: RunMode::PerformLayout,
            sizing_mode: SizingMode::InherentSize,
            axis: RequestedAxis::Both,
            known_dimensions,
            parent_size,
            available_space,
        }
    }
}

/// Result of one layout call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOutput {
    /// Border-box size.
    pub size: Size<f32>,
    /// Extent of the node's in-flow content, measured from its border-box origin.
    pub content_size: Size<f32>,
}

impl LayoutOutput {
    /// Zero-sized output.
    pub const HIDDEN: Self = Self {
        size: Size::ZERO,
        content_size: Size::ZERO,
    };

    /// Output with the given border-box size and no overflowing content.
    pub const fn from_outer_size(size: Size<f32>) -> Self {
        Self {
            size,
            content_size: Size::ZERO,
        }
    }

    /// Output from both sizes.
    pub const fn from_sizes(size: Size<f32>, content_size: Size<f32>) -> Self {
        Self { size, content_size }
    }
}

/// Final geometry of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Paint/traversal order among siblings.
    pub order: u32,
    /// Border-box origin relative to the parent's content-box origin.
    pub location: Point<f32>,
    /// Border-box size.
    pub size: Size<f32>,
    /// Size of the scrollable content; at least `size` on overflow-visible axes.
    pub content_size: Size<f32>,
    /// Space taken by scrollbar gutters.
    pub scrollbar_size: Size<f32>,
    /// Resolved border widths.
    pub border: Rect<f32>,
    /// Resolved padding.
    pub padding: Rect<f32>,
    /// Resolved margins.
    pub margin: Rect<f32>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// An all-zero layout.
    pub const fn new() -> Self {
        Self::with_order(0)
    }

    /// An all-zero layout with the given order.
    pub const fn with_order(order: u32) -> Self {
        Self {
            order,
            location: Point::ZERO,
            size: Size::ZERO,
            content_size: Size::ZERO,
            scrollbar_size: Size::ZERO,
            border: Rect::ZERO,
            padding: Rect::ZERO,
            margin: Rect::ZERO,
        }
    }

    /// Width of the content box.
    pub fn content_box_width(&self) -> f32 {
        self.size.width
            - self.padding.horizontal_axis_sum()
            - self.border.horizontal_axis_sum()
            - self.scrollbar_size.width
    }

    /// Height of the content box.
    pub fn content_box_height(&self) -> f32 {
        self.size.height
            - self.padding.vertical_axis_sum()
            - self.border.vertical_axis_sum()
            - self.scrollbar_size.height
    }

    /// Replace NaN by zero and saturate infinities at `±f32::MAX`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite = |value: f32| {
            if value.is_nan() {
                0.0
            } else {
                value.clamp(-f32::MAX, f32::MAX)
            }
        };
        Self {
            order: self.order,
            location: self.location.map(finite),
            size: self.size.map(finite),
            content_size: self.content_size.map(finite),
            scrollbar_size: self.scrollbar_size.map(finite),
            border: self.border.map(finite),
            padding: self.padding.map(finite),
            margin: self.margin.map(finite),
        }
    }
}
