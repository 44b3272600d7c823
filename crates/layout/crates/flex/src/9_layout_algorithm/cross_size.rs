//! Cross size determination.
//!
//! Spec: §9.4: Cross Size Determination
//! <https://www.w3.org/TR/css-flexbox-1/#cross-sizing>

use trellis_layout_util::{LayoutHost, MaybeMath as _};
use trellis_style::{AlignContent, AvailableSpace, Size};

use super::lines::FlexLine;
use crate::chapter4::FlexItem;
use crate::chapter7::FlexAxes;

/// Determine each item's hypothetical cross size from its resolved main size.
pub fn determine_hypothetical_cross_sizes(
    tree: &mut impl LayoutHost,
    items: &mut [FlexItem],
    axes: FlexAxes,
    inner_known: Size<Option<f32>>,
    available_cross: AvailableSpace,
) {
    let direction = axes.direction;
    for item in items.iter_mut() {
        let cross = match item.size.cross(direction) {
            Some(cross) => cross,
            None => tree.measure_child_size(
                item.node,
                Size::from_main_cross(direction, Some(item.target_main), None),
                inner_known,
                axes.available(
                    AvailableSpace::Definite(item.target_main),
                    available_cross.map_definite_value(|space| space - item.margin_cross_sum(axes)),
                ),
                direction.cross_axis(),
            ),
        };
        item.hypothetical_cross = item.clamp_cross(cross, axes).max(0.0);
    }
}

/// Size every line along the cross axis.
///
/// A single-line container with a definite cross size gives its line that size;
/// otherwise a line is as tall as its tallest outer hypothetical cross size.
pub fn calculate_line_cross_sizes(
    lines: &mut [FlexLine],
    items: &[FlexItem],
    axes: FlexAxes,
    inner_cross: Option<f32>,
) {
    if let (false, Some(cross), [line]) = (axes.is_wrapping, inner_cross, &mut *lines) {
        line.cross_size = cross;
        return;
    }
    for line in lines.iter_mut() {
        line.cross_size = items
            .get(line.items.clone())
            .unwrap_or_default()
            .iter()
            .map(|item| item.hypothetical_cross + item.margin_cross_sum(axes))
            .fold(0.0f32, f32::max);
    }
}

/// Inner cross size of the container from its lines, clamped by min/max.
pub fn determine_container_cross_size(
    lines: &[FlexLine],
    cross_gap: f32,
    inner_min: Option<f32>,
    inner_max: Option<f32>,
) -> f32 {
    let gaps = cross_gap * lines.len().saturating_sub(1) as f32;
    let total: f32 = lines.iter().map(|line| line.cross_size).sum();
    (total + gaps).maybe_clamp(inner_min, inner_max).max(0.0)
}

/// Grow lines of a multi-line container under `align-content: stretch`, or pin the
/// only line of a single-line container to the container's cross size.
pub fn stretch_lines(
    lines: &mut [FlexLine],
    axes: FlexAxes,
    align_content: AlignContent,
    inner_cross: f32,
    cross_gap: f32,
) {
    if !axes.is_wrapping {
        if let [line] = lines {
            line.cross_size = inner_cross;
        }
        return;
    }
    if align_content != AlignContent::Stretch || lines.is_empty() {
        return;
    }
    let gaps = cross_gap * lines.len().saturating_sub(1) as f32;
    let used: f32 = lines.iter().map(|line| line.cross_size).sum::<f32>() + gaps;
    let free = inner_cross - used;
    if free > 0.0 {
        let share = free / lines.len() as f32;
        for line in lines.iter_mut() {
            line.cross_size += share;
        }
    }
}

/// Decide each item's used cross size.
///
/// Spec: §9.4 step 11 <https://www.w3.org/TR/css-flexbox-1/#algo-stretch>
pub fn determine_used_cross_sizes(items: &mut [FlexItem], lines: &[FlexLine], axes: FlexAxes) {
    for line in lines {
        let Some(line_items) = items.get_mut(line.items.clone()) else {
            continue;
        };
        for item in line_items {
            item.target_cross = if item.stretches(axes) {
                item.clamp_cross((line.cross_size - item.margin_cross_sum(axes)).max(0.0), axes)
            } else {
                item.hypothetical_cross
            };
        }
    }
}
