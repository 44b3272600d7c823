//! Grid formatting context entry point.
//!
//! Spec: §12 Grid Layout Algorithm <https://www.w3.org/TR/css-grid-2/#layout-algorithm>

use trellis_core::{Layout, LayoutInput, LayoutOutput, NodeId, RunMode};
use trellis_layout_util::{
    AbsoluteContainer, LayoutHost, MaybeMath as _, ResolvedBox, content_size_contribution,
    layout_absolute_child, relative_offset, resolve_box,
};
use trellis_style::{
    AbsoluteAxis, AlignItems, AvailableSpace, BoxSizing, Dimension, Display, Point, Rect, Size,
    Style,
};

use crate::alignment::{align_item_in_area, align_tracks};
use crate::explicit::{
    AutoRepeatStrategy, auto_fit_lines, auto_repetition_count, explicit_track_count,
    initialize_grid_tracks,
};
use crate::implicit::{ResolvedPlacement, estimate_implicit_track_counts, resolve_placement};
use crate::placement::{CellOccupancyMatrix, GridArea, place_grid_items};
use crate::track_sizing::{TrackSizingParams, spanned_size, track_sizing_algorithm};
use crate::types::{GridItem, GridTrack, GridTrackKind, TrackCounts, replaced_max_size};

/// Compute the size of a grid container and, in `PerformLayout` mode, lay out its children.
pub fn compute_grid_layout(
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

    tracing::debug!(
        target: "trellis::grid",
        "grid {node:?} known={known_dimensions:?} available={:?} mode={:?}",
        inputs.available_space,
        inputs.run_mode
    );
    compute_inner(tree, node, &style, &resolved, LayoutInput {
        known_dimensions,
        ..inputs
    })
}

/// Children of a grid container sorted by role, each with its source order.
#[derive(Debug, Default)]
struct GridChildren {
    in_flow: Vec<(NodeId, u32, Style)>,
    absolute: Vec<(NodeId, u32)>,
    hidden: Vec<(NodeId, u32)>,
}

fn collect_children(tree: &mut impl LayoutHost, node: NodeId) -> GridChildren {
    let mut children = GridChildren::default();
    for (index, child) in tree.child_ids(node).into_iter().enumerate() {
        let order = index as u32;
        let style = tree.style(child);
        if style.display == Display::None {
            children.hidden.push((child, order));
        } else if style.is_absolutely_positioned() {
            children.absolute.push((child, order));
        } else {
            children.in_flow.push((child, order, style.clone()));
        }
    }
    children
}

/// Space available to the content box along one axis.
fn inner_available_space(available: AvailableSpace, inner_known: Option<f32>, outer_used: f32) -> AvailableSpace {
    inner_known.map_or_else(
        || available.map_definite_value(|space| (space - outer_used).max(0.0)),
        AvailableSpace::Definite,
    )
}

/// Repetitions of the template's auto-repeat along `axis`.
///
/// The definite inner size or the max size fits as many repetitions as possible; a
/// min size alone takes the fewest that reach it.
fn repetitions_for(
    style: &Style,
    axis: AbsoluteAxis,
    gap: f32,
    inner_known: Option<f32>,
    inner_min: Option<f32>,
    inner_max: Option<f32>,
) -> u16 {
    let max_is_set = !axis_dimension(&style.max_size, axis).is_auto();
    let min_is_set = !axis_dimension(&style.min_size, axis).is_auto();
    let (size, strategy) = match (inner_known, inner_max, inner_min) {
        (Some(size), _, _) => (Some(size), AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow),
        (None, Some(max), _) if max_is_set => {
            (Some(max), AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow)
        }
        (None, _, Some(min)) if min_is_set => {
            (Some(min), AutoRepeatStrategy::MinRepetitionsThatDoOverflow)
        }
        _ => (None, AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow),
    };
    auto_repetition_count(style.grid_template(axis), gap, size, strategy)
}

const fn axis_dimension(size: &Size<Dimension>, axis: AbsoluteAxis) -> &Dimension {
    match axis {
        AbsoluteAxis::Horizontal => &size.width,
        AbsoluteAxis::Vertical => &size.height,
    }
}

/// Collapse the `auto-fit` tracks no item occupies, along with the gutters next to them.
///
/// A gutter survives only between two tracks that still take space, so a run of
/// collapsed tracks between two open ones leaves exactly one gutter and a run at either
/// end of the grid leaves none.
fn collapse_empty_auto_fit_tracks(
    tracks: &mut [GridTrack],
    style: &Style,
    axis: AbsoluteAxis,
    repetitions: u16,
    counts: TrackCounts,
    areas: &[GridArea],
) {
    let Some((start, end)) = auto_fit_lines(style.grid_template(axis), repetitions) else {
        return;
    };
    let mut collapsed_any = false;
    for line in start..end {
        let occupied = areas.iter().any(|area| {
            let lines = match axis {
                AbsoluteAxis::Horizontal => area.column,
                AbsoluteAxis::Vertical => area.row,
            };
            lines.start <= line && line < lines.end
        });
        if occupied {
            continue;
        }
        if let Some(track) = tracks.get_mut(counts.gutter_index(line) + 1) {
            track.collapse();
            collapsed_any = true;
        }
    }
    if collapsed_any {
        collapse_orphaned_gutters(tracks);
    }
}

/// Collapse every interior gutter that does not sit between two open tracks.
fn collapse_orphaned_gutters(tracks: &mut [GridTrack]) {
    let mut open_after = Vec::with_capacity(tracks.len());
    let mut any_open = false;
    for track in tracks.iter().rev() {
        open_after.push(any_open);
        any_open |= track.is_sizable_track();
    }
    open_after.reverse();

    let last = tracks.len().saturating_sub(1);
    let mut previous_open = false;
    for (index, (track, has_open_after)) in tracks.iter_mut().zip(open_after).enumerate() {
        match track.kind {
            GridTrackKind::Track => previous_open = !track.is_collapsed,
            GridTrackKind::Gutter => {
                if index != 0 && index != last && !(previous_open && has_open_after) {
                    track.collapse();
                }
            }
        }
    }
}

/// Container-side inputs for building items.
#[derive(Debug, Clone, Copy)]
struct ItemContext<'tracks> {
    container: &'tracks Style,
    inner_known: Size<Option<f32>>,
    columns: (&'tracks [GridTrack], TrackCounts),
    rows: (&'tracks [GridTrack], TrackCounts),
}

fn build_item(child: NodeId, order: u32, style: &Style, area: GridArea, context: ItemContext<'_>) -> GridItem {
    let resolved = resolve_box(style, context.inner_known);
    let crosses_flexible = |(tracks, counts): (&[GridTrack], TrackCounts), lines| {
        tracks
            .get(counts.track_range(lines))
            .is_some_and(|spanned| spanned.iter().any(GridTrack::is_flexible))
    };
    let mut replaced_cap = replaced_max_size(&style.max_size, context.inner_known);
    if style.box_sizing == BoxSizing::ContentBox {
        replaced_cap = replaced_cap.maybe_add(resolved.padding_border().sum_axes());
    }
    let alignment = |axis| style.self_alignment(axis, context.container.items_alignment(axis));

    GridItem {
        node: child,
        order,
        column: area.column,
        row: area.row,
        size: resolved.size,
        min_size: resolved.min_size,
        max_size: resolved.max_size,
        min_size_is_auto: Size::new(style.min_size.width.is_auto(), style.min_size.height.is_auto()),
        replaced_max_size: replaced_cap,
        margin: resolved.margin,
        padding: resolved.padding,
        border: resolved.border,
        scrollbar_gutter: resolved.scrollbar_gutter,
        alignment: Size::new(
            alignment(AbsoluteAxis::Horizontal),
            alignment(AbsoluteAxis::Vertical),
        ),
        overflow: style.overflow,
        is_replaced: style.item_is_replaced,
        relative_offset: relative_offset(style, context.inner_known),
        crosses_flexible_track: Size::new(
            crosses_flexible(context.columns, area.column),
            crosses_flexible(context.rows, area.row),
        ),
        min_content_contribution: Size::NONE,
        max_content_contribution: Size::NONE,
        minimum_contribution: Size::NONE,
    }
}

/// Run the grid algorithm once the container's fixed dimensions are known.
fn compute_inner(
    tree: &mut impl LayoutHost,
    node: NodeId,
    style: &Style,
    resolved: &ResolvedBox,
    inputs: LayoutInput,
) -> LayoutOutput {
    let is_rtl = tree.direction(node).is_rtl();
    let inset_sum = resolved.content_box_inset_sum();
    let margin_sum = resolved.margin_or_zero().sum_axes();

    let inner_known = inputs
        .known_dimensions
        .maybe_sub(inset_sum)
        .map(|dimension| dimension.map(|value| value.max(0.0)));
    let inner_min = resolved.min_size.maybe_sub(inset_sum);
    let inner_max = resolved.max_size.maybe_sub(inset_sum);
    let available_grid_space = Size {
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

    // Spec: §7.1 The Explicit Grid
    let repetitions = Size {
        width: repetitions_for(
            style,
            AbsoluteAxis::Horizontal,
            gap.width,
            inner_known.width,
            inner_min.width,
            inner_max.width,
        ),
        height: repetitions_for(
            style,
            AbsoluteAxis::Vertical,
            gap.height,
            inner_known.height,
            inner_min.height,
            inner_max.height,
        ),
    };
    let explicit = Size {
        width: explicit_track_count(style.grid_template(AbsoluteAxis::Horizontal), repetitions.width),
        height: explicit_track_count(style.grid_template(AbsoluteAxis::Vertical), repetitions.height),
    };

    // Spec: §8.5 Grid Item Placement Algorithm
    let children = collect_children(tree, node);
    let placements: Vec<Size<ResolvedPlacement>> = children
        .in_flow
        .iter()
        .map(|(_, _, child_style)| Size {
            width: resolve_placement(child_style.grid_column, explicit.width),
            height: resolve_placement(child_style.grid_row, explicit.height),
        })
        .collect();
    let mut matrix = CellOccupancyMatrix::with_track_counts(
        estimate_implicit_track_counts(placements.iter().map(|placement| placement.width), explicit.width),
        estimate_implicit_track_counts(placements.iter().map(|placement| placement.height), explicit.height),
    );
    let areas = place_grid_items(&mut matrix, &placements, style.grid_auto_flow);
    let counts = Size {
        width: matrix.track_counts(AbsoluteAxis::Horizontal),
        height: matrix.track_counts(AbsoluteAxis::Vertical),
    };

    let mut columns = initialize_grid_tracks(
        style.grid_template(AbsoluteAxis::Horizontal),
        style.grid_auto_tracks(AbsoluteAxis::Horizontal),
        counts.width,
        repetitions.width,
        gap.width,
    );
    let mut rows = initialize_grid_tracks(
        style.grid_template(AbsoluteAxis::Vertical),
        style.grid_auto_tracks(AbsoluteAxis::Vertical),
        counts.height,
        repetitions.height,
        gap.height,
    );
    collapse_empty_auto_fit_tracks(&mut columns, style, AbsoluteAxis::Horizontal, repetitions.width, counts.width, &areas);
    collapse_empty_auto_fit_tracks(&mut rows, style, AbsoluteAxis::Vertical, repetitions.height, counts.height, &areas);

    let item_context = ItemContext {
        container: style,
        inner_known,
        columns: (&columns, counts.width),
        rows: (&rows, counts.height),
    };
    let mut items: Vec<GridItem> = children
        .in_flow
        .iter()
        .zip(&areas)
        .map(|((child, order, child_style), area)| build_item(*child, *order, child_style, *area, item_context))
        .collect();

    // Spec: §12.1 Grid Sizing Algorithm
    track_sizing_algorithm(
        tree,
        &TrackSizingParams {
            axis: AbsoluteAxis::Horizontal,
            counts: counts.width,
            axis_inner_size: inner_known.width,
            axis_min_size: inner_min.width,
            axis_max_size: inner_max.width,
            available_grid_space,
            inner_known,
            content_alignment: style.content_alignment(AbsoluteAxis::Horizontal),
            other_axis: None,
        },
        &mut columns,
        &mut items,
    );
    track_sizing_algorithm(
        tree,
        &TrackSizingParams {
            axis: AbsoluteAxis::Vertical,
            counts: counts.height,
            axis_inner_size: inner_known.height,
            axis_min_size: inner_min.height,
            axis_max_size: inner_max.height,
            available_grid_space,
            inner_known,
            content_alignment: style.content_alignment(AbsoluteAxis::Vertical),
            other_axis: Some((&columns, counts.width)),
        },
        &mut rows,
        &mut items,
    );

    let track_sum = |tracks: &[GridTrack]| tracks.iter().map(|track| track.base_size).sum::<f32>();
    let inner_size = Size {
        width: inner_known.width.unwrap_or_else(|| {
            track_sum(&columns)
                .maybe_clamp(inner_min.width, inner_max.width)
                .max(0.0)
        }),
        height: inner_known.height.unwrap_or_else(|| {
            track_sum(&rows)
                .maybe_clamp(inner_min.height, inner_max.height)
                .max(0.0)
        }),
    };
    let container_size = inputs.known_dimensions.unwrap_or(inner_size + inset_sum);
    tracing::debug!(
        target: "trellis::grid",
        "grid {node:?} size={container_size:?} columns={} rows={} items={}",
        counts.width.len(),
        counts.height.len(),
        items.len()
    );
    if inputs.run_mode == RunMode::ComputeSize {
        return LayoutOutput::from_outer_size(container_size);
    }

    // Spec: §11.1 Grid Axis Alignment
    align_tracks(&mut columns, inner_size.width, style.content_alignment(AbsoluteAxis::Horizontal));
    align_tracks(&mut rows, inner_size.height, style.content_alignment(AbsoluteAxis::Vertical));

    let grid = PlacedGrid {
        columns: (&columns, counts.width),
        rows: (&rows, counts.height),
        inner_known,
        inner_size,
        content_origin: resolved.content_box_origin(),
        is_rtl,
    };
    let mut content_size = Size::ZERO;
    for item in &items {
        content_size = content_size.max(place_item(tree, item, &grid));
    }

    for (child, order) in children.hidden {
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
        is_rtl,
    };
    for (child, order) in children.absolute {
        content_size = content_size.max(layout_absolute_child(tree, child, order, container));
    }

    LayoutOutput::from_sizes(container_size, content_size)
}

/// Sized and aligned tracks of a grid container.
#[derive(Debug, Clone, Copy)]
struct PlacedGrid<'tracks> {
    columns: (&'tracks [GridTrack], TrackCounts),
    rows: (&'tracks [GridTrack], TrackCounts),
    inner_known: Size<Option<f32>>,
    inner_size: Size<f32>,
    content_origin: Point<f32>,
    is_rtl: bool,
}

impl PlacedGrid<'_> {
    const fn axis(&self, axis: AbsoluteAxis) -> (&[GridTrack], TrackCounts) {
        match axis {
            AbsoluteAxis::Horizontal => self.columns,
            AbsoluteAxis::Vertical => self.rows,
        }
    }

    /// Size of the item's grid area along `axis`.
    fn area_size(&self, item: &GridItem, axis: AbsoluteAxis) -> f32 {
        let (tracks, counts) = self.axis(axis);
        spanned_size(tracks, counts, item.lines(axis))
    }

    /// Offset of the item's grid area from the content box along `axis`.
    fn area_offset(&self, item: &GridItem, axis: AbsoluteAxis) -> f32 {
        let (tracks, counts) = self.axis(axis);
        tracks
            .get(counts.gutter_index(item.lines(axis).start) + 1)
            .map_or(0.0, |track| track.offset)
    }
}

/// Fit-content size of `item` along `axis` inside an area of `area_size`.
fn fit_content_size(
    tree: &mut impl LayoutHost,
    item: &GridItem,
    axis: AbsoluteAxis,
    known: Size<Option<f32>>,
    area_size: Size<f32>,
    parent_size: Size<Option<f32>>,
) -> f32 {
    let mut available = Size::new(
        AvailableSpace::Definite(area_size.width),
        AvailableSpace::Definite(area_size.height),
    );
    available.set(axis, AvailableSpace::MinContent);
    let min_content = tree.measure_child_size(item.node, known, parent_size, available, axis);
    available.set(axis, AvailableSpace::MaxContent);
    let max_content = tree.measure_child_size(item.node, known, parent_size, available, axis);
    let stretch = (area_size.get(axis) - item.margin_sum(axis)).max(0.0);
    max_content.min(stretch.max(min_content))
}

/// Lay out `item` in its grid area, store its layout and return its contribution to
/// the container's content size.
///
/// Spec: §11 Alignment and Spacing <https://www.w3.org/TR/css-grid-2/#alignment>
fn place_item(tree: &mut impl LayoutHost, item: &GridItem, grid: &PlacedGrid<'_>) -> Size<f32> {
    let area_size = Size::new(
        grid.area_size(item, AbsoluteAxis::Horizontal),
        grid.area_size(item, AbsoluteAxis::Vertical),
    );
    let clamp = |axis: AbsoluteAxis, value: f32| {
        value.maybe_clamp(item.min_size.get(axis), item.max_size.get(axis))
    };
    let stretched = |axis: AbsoluteAxis| {
        item.stretches(axis)
            .then(|| clamp(axis, (area_size.get(axis) - item.margin_sum(axis)).max(0.0)))
    };

    let mut known = Size {
        width: item.size.width.or_else(|| stretched(AbsoluteAxis::Horizontal)),
        height: item.size.height.or_else(|| stretched(AbsoluteAxis::Vertical)),
    };
    if known.width.is_none() {
        let width = fit_content_size(tree, item, AbsoluteAxis::Horizontal, known, area_size, grid.inner_known);
        known.width = Some(clamp(AbsoluteAxis::Horizontal, width));
    }
    if known.height.is_none() {
        let height = fit_content_size(tree, item, AbsoluteAxis::Vertical, known, area_size, grid.inner_known);
        known.height = Some(clamp(AbsoluteAxis::Vertical, height));
    }
    let output = tree.perform_child_layout(
        item.node,
        known,
        grid.inner_known,
        Size::new(
            AvailableSpace::Definite(area_size.width),
            AvailableSpace::Definite(area_size.height),
        ),
    );
    let size = output.size;

    let (start_margin, end_margin) = if grid.is_rtl {
        (item.margin.right, item.margin.left)
    } else {
        (item.margin.left, item.margin.right)
    };
    let (x_offset, inline_start, inline_end) = align_item_in_area(
        area_size.width,
        size.width,
        start_margin,
        end_margin,
        item.alignment.width.unwrap_or(AlignItems::Stretch),
    );
    let (y_offset, top, bottom) = align_item_in_area(
        area_size.height,
        size.height,
        item.margin.top,
        item.margin.bottom,
        item.alignment.height.unwrap_or(AlignItems::Stretch),
    );
    let logical_x = grid.area_offset(item, AbsoluteAxis::Horizontal) + x_offset;
    let (x, left, right) = if grid.is_rtl {
        (grid.inner_size.width - logical_x - size.width, inline_end, inline_start)
    } else {
        (logical_x, inline_start, inline_end)
    };
    let y = grid.area_offset(item, AbsoluteAxis::Vertical) + y_offset;

    let location = Point::new(x, y) + item.relative_offset;
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
            margin: Rect::new(left, right, top, bottom),
        },
    );
    content_size_contribution(location + grid.content_origin, size, output.content_size, item.overflow)
}
