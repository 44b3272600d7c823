//! Out-of-flow placement and content-size bookkeeping shared by every container.
//!
//! Spec: CSS Positioned Layout Module Level 3 §4 Absolute Positioning
//! <https://www.w3.org/TR/css-position-3/#abs-pos-layout>

use log::trace;
use trellis_core::{Layout, NodeId};
use trellis_style::{AvailableSpace, Overflow, Point, Rect, Size};

use crate::box_model::resolve_box;
use crate::host::LayoutHost;
use crate::maybe_math::MaybeMath as _;

/// Containing block handed to absolutely positioned children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteContainer {
    /// Size of the container's padding box.
    pub area_size: Size<f32>,
    /// Origin of the padding box within the container's border box.
    pub area_offset: Point<f32>,
    /// Origin of the content box within the container's border box.
    pub content_box_origin: Point<f32>,
    /// Place children with no horizontal insets against the right edge.
    pub is_rtl: bool,
}

/// Lay out an absolutely positioned `child` of a container and store its layout.
///
/// Returns the child's contribution to the container's content size.
pub fn layout_absolute_child(
    tree: &mut impl LayoutHost,
    child: NodeId,
    order: u32,
    container: AbsoluteContainer,
) -> Size<f32> {
    let area = container.area_size;
    let area_basis = Size::from_definite(area.width, area.height);
    let style = tree.style(child).clone();
    let resolved = resolve_box(&style, area_basis);
    let inset = style.inset.resolve_per_axis(area_basis);
    let margin_or_zero = resolved.margin_or_zero();

    // Both insets on an axis pin the size when the style leaves it auto.
    let pinned = Size {
        width: inset.left.zip(inset.right).map(|(left, right)| {
            (area.width - left - right - margin_or_zero.horizontal_axis_sum()).max(0.0)
        }),
        height: inset.top.zip(inset.bottom).map(|(top, bottom)| {
            (area.height - top - bottom - margin_or_zero.vertical_axis_sum()).max(0.0)
        }),
    };
    let known = resolved
        .size
        .or(pinned)
        .maybe_apply_aspect_ratio(resolved.aspect_ratio)
        .maybe_clamp(resolved.min_size, resolved.max_size);

    let available = Size {
        width: AvailableSpace::Definite(
            (area.width - inset.left.unwrap_or(0.0) - inset.right.unwrap_or(0.0)).max(0.0),
        ),
        height: AvailableSpace::Definite(
            (area.height - inset.top.unwrap_or(0.0) - inset.bottom.unwrap_or(0.0)).max(0.0),
        ),
    };
    let measured = tree.measure_child(child, known, area_basis, available);
    let final_size = known
        .unwrap_or(measured)
        .maybe_clamp(resolved.min_size, resolved.max_size);
    let output = tree.perform_child_layout(
        child,
        Size::from_definite(final_size.width, final_size.height),
        area_basis,
        available,
    );

    let margin = resolved.margin;
    let (margin_left, margin_right, x) = place_on_axis(
        AxisPlacement {
            area_start: container.area_offset.x,
            area_size: area.width,
            size: final_size.width,
            inset_start: inset.left,
            inset_end: inset.right,
            margin_start: margin.left,
            margin_end: margin.right,
        },
        container.is_rtl,
    );
    let (margin_top, margin_bottom, y) = place_on_axis(
        AxisPlacement {
            area_start: container.area_offset.y,
            area_size: area.height,
            size: final_size.height,
            inset_start: inset.top,
            inset_end: inset.bottom,
            margin_start: margin.top,
            margin_end: margin.bottom,
        },
        false,
    );
    trace!(
        target: "trellis::absolute",
        "absolute child {child:?} at ({x}, {y}) size {}x{}",
        final_size.width,
        final_size.height
    );

    let layout = Layout {
        order,
        location: Point::new(
            x - container.content_box_origin.x,
            y - container.content_box_origin.y,
        ),
        size: final_size,
        content_size: output.content_size,
        scrollbar_size: resolved.scrollbar_gutter,
        border: resolved.border,
        padding: resolved.padding,
        margin: Rect::new(margin_left, margin_right, margin_top, margin_bottom),
    };
    tree.set_unrounded_layout(child, &layout);
    content_size_contribution(Point::new(x, y), final_size, output.content_size, style.overflow)
}

/// One axis of an absolutely positioned box.
#[derive(Debug, Clone, Copy)]
struct AxisPlacement {
    area_start: f32,
    area_size: f32,
    size: f32,
    inset_start: Option<f32>,
    inset_end: Option<f32>,
    margin_start: Option<f32>,
    margin_end: Option<f32>,
}

/// Resolve margins and the border-box start of one axis.
///
/// Auto margins absorb the free space only when both insets are set; otherwise
/// they are zero. A box with neither inset sits at the area start (end when
/// `align_end`).
fn place_on_axis(axis: AxisPlacement, align_end: bool) -> (f32, f32, f32) {
    let fixed_start = axis.margin_start.unwrap_or(0.0);
    let fixed_end = axis.margin_end.unwrap_or(0.0);
    match (axis.inset_start, axis.inset_end) {
        (Some(start), Some(end)) => {
            let free = axis.area_size - start - end - axis.size - fixed_start - fixed_end;
            let (margin_start, margin_end) = match (axis.margin_start, axis.margin_end) {
                (None, None) => {
                    let half = free.max(0.0) / 2.0;
                    (half, half)
                }
                (None, Some(end_margin)) => (free, end_margin),
                (Some(start_margin), None) => (start_margin, free),
                (Some(start_margin), Some(end_margin)) => (start_margin, end_margin),
            };
            (margin_start, margin_end, axis.area_start + start + margin_start)
        }
        (Some(start), None) => (
            fixed_start,
            fixed_end,
            axis.area_start + start + fixed_start,
        ),
        (None, Some(end)) => (
            fixed_start,
            fixed_end,
            axis.area_start + axis.area_size - end - fixed_end - axis.size,
        ),
        (None, None) => {
            let position = if align_end {
                axis.area_start + axis.area_size - fixed_end - axis.size
            } else {
                axis.area_start + fixed_start
            };
            (fixed_start, fixed_end, position)
        }
    }
}

/// Contribution of a child at `location` (container border-box coordinates) to the
/// container's content size.
///
/// Overflowing content of the child only counts on axes where the child itself lets
/// it show; zero-area children contribute nothing.
pub fn content_size_contribution(
    location: Point<f32>,
    size: Size<f32>,
    content_size: Size<f32>,
    overflow: Point<Overflow>,
) -> Size<f32> {
    let extent = Size {
        width: if overflow.x.is_visible() {
            size.width.max(content_size.width)
        } else {
            size.width
        },
        height: if overflow.y.is_visible() {
            size.height.max(content_size.height)
        } else {
            size.height
        },
    };
    if extent.has_non_zero_area() {
        Size::new(location.x + extent.width, location.y + extent.height)
    } else {
        Size::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if auto margins do not center between both insets.
    fn auto_margins_center_between_insets() {
        let (start, end, position) = place_on_axis(
            AxisPlacement {
                area_start: 0.0,
                area_size: 100.0,
                size: 20.0,
                inset_start: Some(10.0),
                inset_end: Some(10.0),
                margin_start: None,
                margin_end: None,
            },
            false,
        );
        assert_eq!((start, end, position), (30.0, 30.0, 40.0));
    }

    #[test]
    /// # Panics
    /// Panics if the end inset or RTL static position is ignored.
    fn end_anchored_positions() {
        let anchored = AxisPlacement {
            area_start: 5.0,
            area_size: 100.0,
            size: 20.0,
            inset_start: None,
            inset_end: Some(10.0),
            margin_start: Some(0.0),
            margin_end: Some(0.0),
        };
        assert_eq!(place_on_axis(anchored, false).2, 75.0);
        let unanchored = AxisPlacement {
            inset_end: None,
            ..anchored
        };
        assert_eq!(place_on_axis(unanchored, true).2, 85.0);
        assert_eq!(place_on_axis(unanchored, false).2, 5.0);
    }

    #[test]
    /// # Panics
    /// Panics if content contributions ignore overflow or zero area.
    fn contribution_respects_overflow() {
        let visible = Point::new(Overflow::Visible, Overflow::Visible);
        let clipped = Point::new(Overflow::Hidden, Overflow::Visible);
        let contribution = content_size_contribution(
            Point::new(10.0, 5.0),
            Size::new(20.0, 20.0),
            Size::new(50.0, 40.0),
            visible,
        );
        assert_eq!(contribution, Size::new(60.0, 45.0));
        let clipped_contribution = content_size_contribution(
            Point::new(10.0, 5.0),
            Size::new(20.0, 20.0),
            Size::new(50.0, 40.0),
            clipped,
        );
        assert_eq!(clipped_contribution, Size::new(30.0, 45.0));
        assert_eq!(
            content_size_contribution(Point::ZERO, Size::new(0.0, 10.0), Size::ZERO, visible),
            Size::ZERO
        );
    }
}
