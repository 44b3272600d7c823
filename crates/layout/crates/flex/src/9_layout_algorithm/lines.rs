//! Collecting flex items into flex lines and sizing the container's main axis.
//!
//! Spec: §9.3: Main Size Determination
//! <https://www.w3.org/TR/css-flexbox-1/#main-sizing>

use core::ops::Range;

use trellis_layout_util::MaybeMath as _;
use trellis_style::AvailableSpace;

use crate::chapter4::FlexItem;
use crate::chapter7::FlexAxes;

/// One flex line: a contiguous run of items.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexLine {
    /// Indices of the line's items.
    pub items: Range<usize>,
    /// Cross size of the line.
    pub cross_size: f32,
    /// Offset of the line from the container's cross-start content edge.
    pub offset_cross: f32,
}

/// Break items into lines.
///
/// A line ends before the item whose hypothetical outer main size (plus the gap
/// before it) would overflow `line_length`. Every line holds at least one item, so a
/// min-content constraint puts each item on its own line.
pub fn collect_flex_lines(
    items: &[FlexItem],
    axes: FlexAxes,
    line_length: AvailableSpace,
    main_gap: f32,
) -> Vec<FlexLine> {
    if !axes.is_wrapping {
        return vec![FlexLine {
            items: 0..items.len(),
            cross_size: 0.0,
            offset_cross: 0.0,
        }];
    }
    let limit = match line_length {
        AvailableSpace::Definite(length) => length,
        AvailableSpace::MinContent => 0.0,
        AvailableSpace::MaxContent => f32::INFINITY,
    };

    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0f32;
    for (index, item) in items.iter().enumerate() {
        let outer = item.hypothetical_outer_main(axes);
        let is_first_in_line = index == start;
        let next = if is_first_in_line {
            outer
        } else {
            used + main_gap + outer
        };
        if next > limit && !is_first_in_line {
            lines.push(FlexLine {
                items: start..index,
                cross_size: 0.0,
                offset_cross: 0.0,
            });
            start = index;
            used = outer;
        } else {
            used = next;
        }
    }
    if start < items.len() || lines.is_empty() {
        lines.push(FlexLine {
            items: start..items.len(),
            cross_size: 0.0,
            offset_cross: 0.0,
        });
    }
    lines
}

/// Hypothetical outer main length of a line including gaps.
pub fn line_main_length(items: &[FlexItem], axes: FlexAxes, main_gap: f32) -> f32 {
    let gaps = main_gap * items.len().saturating_sub(1) as f32;
    items
        .iter()
        .map(|item| item.hypothetical_outer_main(axes))
        .sum::<f32>()
        + gaps
}

/// Inner main size of a container whose main size is not fixed.
///
/// The container shrinks to its longest line; a multi-line container under a
/// definite constraint fills it.
pub fn determine_container_main_size(
    items: &[FlexItem],
    lines: &[FlexLine],
    axes: FlexAxes,
    available_main: AvailableSpace,
    main_gap: f32,
    inner_min: Option<f32>,
    inner_max: Option<f32>,
) -> f32 {
    let longest = lines
        .iter()
        .filter_map(|line| items.get(line.items.clone()))
        .map(|line_items| line_main_length(line_items, axes, main_gap))
        .fold(0.0f32, f32::max);
    let size = match available_main {
        AvailableSpace::Definite(available) if lines.len() > 1 => longest.max(available),
        _ => longest,
    };
    size.maybe_clamp(inner_min, inner_max).max(0.0)
}
