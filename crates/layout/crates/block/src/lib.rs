//! Block layout implementation.
//!
//! Children stack along the block axis in source order. Adjacent margins are not
//! collapsed.
//!
//! Spec: CSS 2.2 §10.3.3 and §10.6.3 (block-level, non-replaced elements in normal flow)
//! <https://www.w3.org/TR/CSS22/visudet.html#blockwidth>

use log::debug;
use trellis_core::{Layout, LayoutInput, LayoutOutput, NodeId, RunMode};
use trellis_layout_util::{
    AbsoluteContainer, LayoutHost, MaybeMath as _, ResolvedBox, content_size_contribution,
    layout_absolute_child, relative_offset, resolve_box,
};
use trellis_style::{
    AbsoluteAxis, AvailableSpace, Dimension, Display, Point, Rect, Size, Style,
};

/// An in-flow child of a block container.
struct BlockItem {
    /// Child node.
    node: NodeId,
    /// Source order among all children.
    order: u32,
    /// Child style.
    style: Style,
}

/// Compute the size of a block container and, in `PerformLayout` mode, lay out its children.
pub fn compute_block_layout(
    tree: &mut impl LayoutHost,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let style = tree.style(node).clone();
    let resolved = resolve_box(&style, inputs.parent_size);

    // Check for explicit sizes first
    let known_dimensions = resolved.known_dimensions(&inputs);

    if inputs.run_mode == RunMode::ComputeSize
        && let (Some(width), Some(height)) = (known_dimensions.width, known_dimensions.height)
    {
        return LayoutOutput::from_outer_size(Size::new(width, height));
    }

    debug!(
        target: "trellis::block",
        "block {node:?} known={known_dimensions:?} available={:?} mode={:?}",
        inputs.available_space,
        inputs.run_mode
    );
    compute_inner(tree, node, &resolved, LayoutInput {
        known_dimensions,
        ..inputs
    })
}

/// Lay out the children once the container's fixed dimensions are known.
fn compute_inner(
    tree: &mut impl LayoutHost,
    node: NodeId,
    resolved: &ResolvedBox,
    inputs: LayoutInput,
) -> LayoutOutput {
    let is_rtl = tree.direction(node).is_rtl();
    let inset_sum = resolved.content_box_inset_sum();
    let content_origin = resolved.content_box_origin();
    let margin_sum = resolved.margin_or_zero().sum_axes();

    let mut in_flow = Vec::new();
    let mut absolute = Vec::new();
    for (index, child) in tree.child_ids(node).into_iter().enumerate() {
        let order = index as u32;
        let child_style = tree.style(child).clone();
        if child_style.display == Display::None {
            if inputs.run_mode == RunMode::PerformLayout {
                tree.hide_child(child, order);
            }
        } else if child_style.is_absolutely_positioned() {
            absolute.push(BlockItem {
                node: child,
                order,
                style: child_style,
            });
        } else {
            in_flow.push(BlockItem {
                node: child,
                order,
                style: child_style,
            });
        }
    }

    // Width: fixed by the parent or style, otherwise the widest child contribution
    let outer_width = inputs.known_dimensions.width.unwrap_or_else(|| {
        let available_width = inputs
            .available_space
            .width
            .map_definite_value(|space| space - margin_sum.width - inset_sum.width);
        let content_width = content_based_width(tree, &in_flow, available_width);
        (content_width + inset_sum.width)
            .maybe_clamp(resolved.min_size.width, resolved.max_size.width)
            .max(inset_sum.width)
    });
    let inner_width = (outer_width - inset_sum.width).max(0.0);
    let inner_height = inputs
        .known_dimensions
        .height
        .map(|height| (height - inset_sum.height).max(0.0));
    let child_basis = Size {
        width: Some(inner_width),
        height: inner_height,
    };

    let mut cursor = 0.0f32;
    let mut content_size = Size::ZERO;
    for item in &in_flow {
        let child_box = resolve_box(&item.style, child_basis);
        let width = child_width(tree, item, &child_box, inner_width, child_basis);
        let known = Size {
            width: Some(width),
            height: child_box
                .size
                .height
                .maybe_clamp(child_box.min_size.height, child_box.max_size.height),
        };
        let available = Size {
            width: AvailableSpace::Definite(width),
            height: inner_height.map_or(AvailableSpace::MaxContent, AvailableSpace::Definite),
        };
        let (size, child_content) = if inputs.run_mode == RunMode::PerformLayout {
            let output = tree.perform_child_layout(item.node, known, child_basis, available);
            (output.size, output.content_size)
        } else {
            (tree.measure_child(item.node, known, child_basis, available), Size::ZERO)
        };
        let size = Size {
            width,
            height: size
                .height
                .maybe_clamp(child_box.min_size.height, child_box.max_size.height),
        };

        let margin = resolve_horizontal_margins(&child_box, inner_width, width, is_rtl);
        let x = margin.left;
        let y = cursor + margin.top;
        cursor = y + size.height + margin.bottom;

        if inputs.run_mode == RunMode::PerformLayout {
            let offset = relative_offset(&item.style, child_basis);
            let location = Point::new(x + offset.x, y + offset.y);
            tree.set_unrounded_layout(
                item.node,
                &Layout {
                    order: item.order,
                    location,
                    size,
                    content_size: child_content,
                    scrollbar_size: child_box.scrollbar_gutter,
                    border: child_box.border,
                    padding: child_box.padding,
                    margin,
                },
            );
            let contribution = content_size_contribution(
                location + content_origin,
                size,
                child_content,
                item.style.overflow,
            );
            content_size = content_size.max(contribution);
        }
    }

    let outer_height = inputs.known_dimensions.height.unwrap_or_else(|| {
        (cursor + inset_sum.height)
            .maybe_clamp(resolved.min_size.height, resolved.max_size.height)
            .max(inset_sum.height)
    });
    let final_size = Size::new(outer_width, outer_height);

    if inputs.run_mode == RunMode::PerformLayout {
        let container = AbsoluteContainer {
            area_size: Size::new(
                (outer_width - resolved.border.horizontal_axis_sum() - resolved.scrollbar_gutter.width)
                    .max(0.0),
                (outer_height - resolved.border.vertical_axis_sum() - resolved.scrollbar_gutter.height)
                    .max(0.0),
            ),
            area_offset: Point::new(resolved.border.left, resolved.border.top),
            content_box_origin: content_origin,
            is_rtl,
        };
        for item in &absolute {
            let contribution = layout_absolute_child(tree, item.node, item.order, container);
            content_size = content_size.max(contribution);
        }
        // Padding at the end of the block axis belongs to the scrollable area
        if cursor > 0.0 {
            content_size.height = content_size
                .height
                .max(content_origin.y + cursor + resolved.padding.bottom);
        }
    }

    debug!(
        target: "trellis::block",
        "block {node:?} size={final_size:?} children={}",
        in_flow.len()
    );
    LayoutOutput::from_sizes(final_size, content_size)
}

/// Widest margin-box contribution of the in-flow children.
fn content_based_width(
    tree: &mut impl LayoutHost,
    items: &[BlockItem],
    available_width: AvailableSpace,
) -> f32 {
    let mut widest = 0.0f32;
    for item in items {
        let child_box = resolve_box(&item.style, Size::NONE);
        let margin = child_box.margin_or_zero().horizontal_axis_sum();
        let width = match child_box.size.width {
            Some(width) => width,
            None => tree.measure_child_size(
                item.node,
                Size::NONE,
                Size::NONE,
                Size {
                    width: available_width.map_definite_value(|space| space - margin),
                    height: AvailableSpace::MaxContent,
                },
                AbsoluteAxis::Horizontal,
            ),
        };
        let width = width.maybe_clamp(child_box.min_size.width, child_box.max_size.width);
        widest = widest.max(width + margin);
    }
    widest
}

/// Border-box width of an in-flow child.
///
/// Definite widths win. Tables and intrinsic keywords shrink to fit; everything else
/// stretches to the container's content width minus the child's margins.
fn child_width(
    tree: &mut impl LayoutHost,
    item: &BlockItem,
    child_box: &ResolvedBox,
    inner_width: f32,
    child_basis: Size<Option<f32>>,
) -> f32 {
    let margin_sum = child_box.margin_or_zero().horizontal_axis_sum();
    let stretch_width = (inner_width - margin_sum).max(0.0);
    let width = match (child_box.size.width, &item.style.size.width) {
        (Some(width), _) => width,
        (None, Dimension::MinContent) => {
            measure_width(tree, item.node, child_basis, AvailableSpace::MinContent)
        }
        (None, Dimension::MaxContent) => {
            measure_width(tree, item.node, child_basis, AvailableSpace::MaxContent)
        }
        (None, Dimension::FitContent(limit)) => {
            let limit = limit.resolve(Some(inner_width)).unwrap_or(stretch_width);
            shrink_to_fit(tree, item.node, child_basis, limit)
        }
        (None, _) if item.style.item_is_table => {
            shrink_to_fit(tree, item.node, child_basis, stretch_width)
        }
        (None, _) => stretch_width,
    };
    width.maybe_clamp(child_box.min_size.width, child_box.max_size.width)
}

/// `min(max-content, max(min-content, available))`.
fn shrink_to_fit(
    tree: &mut impl LayoutHost,
    child: NodeId,
    child_basis: Size<Option<f32>>,
    available: f32,
) -> f32 {
    let min_content = measure_width(tree, child, child_basis, AvailableSpace::MinContent);
    let max_content = measure_width(tree, child, child_basis, AvailableSpace::MaxContent);
    max_content.min(min_content.max(available))
}

fn measure_width(
    tree: &mut impl LayoutHost,
    child: NodeId,
    child_basis: Size<Option<f32>>,
    available: AvailableSpace,
) -> f32 {
    tree.measure_child_size(
        child,
        Size::NONE,
        child_basis,
        Size {
            width: available,
            height: AvailableSpace::MaxContent,
        },
        AbsoluteAxis::Horizontal,
    )
}

/// Resolve a child's margins, distributing leftover width to `auto` horizontal margins.
///
/// Without auto margins an over-constrained child keeps its start margin: the left
/// one in LTR, the right one in RTL, so narrower children hug the inline start.
fn resolve_horizontal_margins(
    child_box: &ResolvedBox,
    inner_width: f32,
    width: f32,
    is_rtl: bool,
) -> Rect<f32> {
    let margin = child_box.margin;
    let fixed_left = margin.left.unwrap_or(0.0);
    let fixed_right = margin.right.unwrap_or(0.0);
    let free = inner_width - width - fixed_left - fixed_right;
    let (left, right) = match (margin.left, margin.right) {
        (None, None) => {
            let half = free.max(0.0) / 2.0;
            (half, half)
        }
        (None, Some(right)) => (free.max(0.0), right),
        (Some(left), None) => (left, free.max(0.0)),
        (Some(left), Some(right)) => {
            if is_rtl {
                (inner_width - width - right, right)
            } else {
                (left, right)
            }
        }
    };
    Rect::new(
        left,
        right,
        margin.top.unwrap_or(0.0),
        margin.bottom.unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use trellis_style::LengthPercentageAuto;

    use super::*;

    fn child_box(margin: Rect<LengthPercentageAuto>) -> ResolvedBox {
        let style = Style {
            margin,
            ..Style::default()
        };
        resolve_box(&style, Size::from_definite(200.0, 100.0))
    }

    #[test]
    /// # Panics
    /// Panics if auto margins do not center a narrower child.
    fn auto_margins_center() {
        let resolved = child_box(Rect::new(
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::ZERO,
            LengthPercentageAuto::ZERO,
        ));
        let margin = resolve_horizontal_margins(&resolved, 200.0, 100.0, false);
        assert_eq!((margin.left, margin.right), (50.0, 50.0));
    }

    #[test]
    /// # Panics
    /// Panics if a narrower child is not aligned to the inline start in RTL.
    fn rtl_aligns_right() {
        let resolved = child_box(Rect::uniform(LengthPercentageAuto::length(10.0)));
        let margin = resolve_horizontal_margins(&resolved, 200.0, 100.0, true);
        assert_eq!(margin.left, 90.0);
        let ltr = resolve_horizontal_margins(&resolved, 200.0, 100.0, false);
        assert_eq!(ltr.left, 10.0);
    }

    #[test]
    /// # Panics
    /// Panics if a single auto margin does not absorb the free space.
    fn single_auto_margin_absorbs() {
        let resolved = child_box(Rect::new(
            LengthPercentageAuto::Auto,
            LengthPercentageAuto::length(20.0),
            LengthPercentageAuto::ZERO,
            LengthPercentageAuto::ZERO,
        ));
        let margin = resolve_horizontal_margins(&resolved, 200.0, 100.0, false);
        assert_eq!(margin.left, 80.0);
    }
}
