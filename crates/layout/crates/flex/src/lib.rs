//! CSS Flexible Box Layout Module Level 1: Flex formatting context.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/>

// Chapter modules mapped to the Flexbox Level 1 spec structure.
// Spec: §4: Flex Items
#[path = "4_flex_items/mod.rs"]
mod chapter4;
// Spec: §7: Axis and Order
#[path = "7_axis/mod.rs"]
mod chapter7;
// Spec: §9: Flex Layout Algorithm
#[path = "9_layout_algorithm/mod.rs"]
mod chapter9;

use log::debug;
use trellis_core::{Layout, LayoutInput, LayoutOutput, NodeId, RunMode};
use trellis_layout_util::{
    AbsoluteContainer, LayoutHost, MaybeMath as _, ResolvedBox, content_size_contribution,
    layout_absolute_child, resolve_box,
};
use trellis_style::{AlignContent, AlignItems, AvailableSpace, Point, Size, Style};

pub use chapter7::FlexAxes;

use chapter4::{FlexItem, ItemContext, collect_flex_items};
use chapter9::{
    FlexLine, align_cross_axis, align_lines, align_main_axis, calculate_line_cross_sizes,
    collect_flex_lines, determine_container_cross_size, determine_container_main_size,
    determine_hypothetical_cross_sizes, determine_used_cross_sizes, flex_justify_content,
    resolve_flexible_lengths, stretch_lines,
};

/// Compute the size of a flex container and, in `PerformLayout` mode, lay out its children.
///
/// Spec: §9 <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>
pub fn compute_flexbox_layout(
    tree: &mut impl LayoutHost,
    node: NodeId,
    inputs: LayoutInput,
) -> LayoutOutput {
    let style = tree.style(node).clone();
    let resolved = resolve_box(&style, inputs.parent_size);
    let known_dimensions = resolved.known_dimensions(&inputs);

    if inputs.run_mode == RunMode::ComputeSize
        && let (Some(width), Some(height)) = (known_dimensions.width, known_dimensions.height)
    {
        return LayoutOutput::from_outer_size(Size::new(width, height));
    }

    debug!(
        target: "trellis::flex",
        "flex {node:?} known={known_dimensions:?} available={:?} mode={:?}",
        inputs.available_space,
        inputs.run_mode
    );
    compute_inner(tree, node, &style, &resolved, LayoutInput {
        known_dimensions,
        ..inputs
    })
}

/// Space available to the content box along one axis.
fn inner_available_space(available: AvailableSpace, inner_known: Option<f32>, outer_used: f32) -> AvailableSpace {
    inner_known.map_or_else(
        || available.map_definite_value(|space| (space - outer_used).max(0.0)),
        AvailableSpace::Definite,
    )
}

/// Line-breaking limit: the available main space, capped by the container's max size.
fn line_length(available_main: AvailableSpace, inner_max_main: Option<f32>) -> AvailableSpace {
    match (available_main, inner_max_main) {
        (AvailableSpace::Definite(available), Some(max)) => AvailableSpace::Definite(available.min(max)),
        (AvailableSpace::MaxContent, Some(max)) => AvailableSpace::Definite(max),
        (space, _) => space,
    }
}

/// Run the flex algorithm once the container's fixed dimensions are known.
fn compute_inner(
    tree: &mut impl LayoutHost,
    node: NodeId,
    style: &Style,
    resolved: &ResolvedBox,
    inputs: LayoutInput,
) -> LayoutOutput {
    let container_direction = tree.direction(node);
    let axes = FlexAxes::resolve(style.flex_direction, style.flex_wrap, container_direction);
    let direction = axes.direction;
    let inset_sum = resolved.content_box_inset_sum();
    let margin_sum = resolved.margin_or_zero().sum_axes();

    let inner_known = inputs
        .known_dimensions
        .maybe_sub(inset_sum)
        .map(|dimension| dimension.map(|value| value.max(0.0)));
    let inner_min = resolved.min_size.maybe_sub(inset_sum);
    let inner_max = resolved.max_size.maybe_sub(inset_sum);
    let inner_available = Size {
        width: inner_available_space(
            inputs.available_space.width,
            inner_known.width,
            margin_sum.width + inset_sum.width,
        ),
        height: inner_available_space(
            inputs.available_space.height,
            inner_known.height,
            margin_sum.height + inset_sum.height,
        ),
    };
    let gap = style.gap.resolve_or_zero(inner_known);
    let main_gap = gap.main(direction);
    let cross_gap = gap.cross(direction);

    let collected = collect_flex_items(tree, node, ItemContext {
        axes,
        inner_known,
        inner_available,
        align_items: style.align_items.unwrap_or(AlignItems::Stretch),
    });
    let mut items = collected.items;

    // Spec: §9.3: Main Size Determination
    let limit = line_length(inner_available.main(direction), inner_max.main(direction));
    let mut lines = collect_flex_lines(&items, axes, limit, main_gap);
    let inner_main = inner_known.main(direction).unwrap_or_else(|| {
        determine_container_main_size(
            &items,
            &lines,
            axes,
            limit,
            main_gap,
            inner_min.main(direction),
            inner_max.main(direction),
        )
    });
    for line in &lines {
        if let Some(line_items) = items.get_mut(line.items.clone()) {
            resolve_flexible_lengths(line_items, axes, inner_main, main_gap);
        }
    }

    // Spec: §9.4: Cross Size Determination
    determine_hypothetical_cross_sizes(
        tree,
        &mut items,
        axes,
        inner_known,
        inner_available.cross(direction),
    );
    calculate_line_cross_sizes(&mut lines, &items, axes, inner_known.cross(direction));
    let inner_cross = inner_known.cross(direction).unwrap_or_else(|| {
        determine_container_cross_size(
            &lines,
            cross_gap,
            inner_min.cross(direction),
            inner_max.cross(direction),
        )
    });
    let align_content = style.align_content.unwrap_or(AlignContent::Stretch);
    stretch_lines(&mut lines, axes, align_content, inner_cross, cross_gap);
    determine_used_cross_sizes(&mut items, &lines, axes);

    let inner_size = Size::from_main_cross(direction, inner_main, inner_cross);
    let container_size = inputs.known_dimensions.unwrap_or(inner_size + inset_sum);
    debug!(
        target: "trellis::flex",
        "flex {node:?} size={container_size:?} lines={} items={}",
        lines.len(),
        items.len()
    );
    if inputs.run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(container_size);
    }

    // Spec: §9.5: Main-Axis Alignment and §9.6: Cross-Axis Alignment
    let justify_content = flex_justify_content(style.justify_content);
    for line in &lines {
        if let Some(line_items) = items.get_mut(line.items.clone()) {
            align_main_axis(line_items, axes, justify_content, inner_main, main_gap);
            align_cross_axis(line_items, axes, line.cross_size);
        }
    }
    align_lines(&mut lines, axes, align_content, inner_cross, cross_gap);

    let mut content_size = place_items(tree, &items, &lines, axes, resolved, inner_known, inner_size);

    for (child, order) in collected.hidden {
        tree.hide_child(child, order);
    }
    let container = AbsoluteContainer {
        area_size: Size::new(
            (container_size.width
                - resolved.border.horizontal_axis_sum()
                - resolved.scrollbar_gutter.width)
                .max(0.0),
            (container_size.height
                - resolved.border.vertical_axis_sum()
                - resolved.scrollbar_gutter.height)
                .max(0.0),
        ),
        area_offset: Point::new(resolved.border.left, resolved.border.top),
        content_box_origin: resolved.content_box_origin(),
        is_rtl: container_direction.is_rtl(),
    };
    for (child, order) in collected.absolute {
        content_size = content_size.max(layout_absolute_child(tree, child, order, container));
    }

    LayoutOutput::from_sizes(container_size, content_size)
}

/// Lay out every item at its final size, store its layout and return the items'
/// contribution to the container's content size.
fn place_items(
    tree: &mut impl LayoutHost,
    items: &[FlexItem],
    lines: &[FlexLine],
    axes: FlexAxes,
    resolved: &ResolvedBox,
    inner_known: Size<Option<f32>>,
    inner_size: Size<f32>,
) -> Size<f32> {
    let direction = axes.direction;
    let inner_main = inner_size.main(direction);
    let inner_cross = inner_size.cross(direction);
    let content_origin = resolved.content_box_origin();
    let child_available = Size::from_main_cross(
        direction,
        AvailableSpace::Definite(inner_main),
        AvailableSpace::Definite(inner_cross),
    );

    let mut content_size = Size::ZERO;
    for line in lines {
        let Some(line_items) = items.get(line.items.clone()) else {
            continue;
        };
        for item in line_items {
            let main = axes.physical_main(item.offset_main, item.target_main, inner_main);
            let cross = axes.physical_cross(
                line.offset_cross + item.offset_cross,
                item.target_cross,
                inner_cross,
            );
            let size = Size::from_main_cross(direction, item.target_main, item.target_cross);
            let output = tree.perform_child_layout(
                item.node,
                Size::from_definite(size.width, size.height),
                inner_known,
                child_available,
            );
            let position = if direction.is_row() {
                Point::new(main, cross)
            } else {
                Point::new(cross, main)
            };
            let location = position + item.relative_offset;
            tree.set_unrounded_layout(
                item.node,
                &Layout {
                    order: item.order,
                    location,
                    size,
                    content_size: output.content_size,
                    scrollbar_size: item.scrollbar_gutter,
                    border: item.border,
                    padding: item.padding,
                    margin: item.margin,
                },
            );
            let contribution = content_size_contribution(
                location + content_origin,
                size,
                output.content_size,
                item.overflow,
            );
            content_size = content_size.max(contribution);
        }
    }
    content_size
}
