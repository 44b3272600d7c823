//! Main-axis and cross-axis alignment.
//!
//! Spec: §9.5: Main-Axis Alignment and §9.6: Cross-Axis Alignment
//! <https://www.w3.org/TR/css-flexbox-1/#main-alignment>

use log::trace;
use trellis_style::{AlignContent, JustifyContent};

use super::lines::FlexLine;
use crate::chapter4::FlexItem;
use crate::chapter7::FlexAxes;

/// `justify-content: stretch` and the writing-mode relative values reduce to their
/// flex-relative counterparts in a flex container.
pub fn flex_justify_content(value: Option<JustifyContent>) -> JustifyContent {
    match value {
        None | Some(JustifyContent::Stretch | JustifyContent::Start) => JustifyContent::FlexStart,
        Some(JustifyContent::End) => JustifyContent::FlexEnd,
        Some(other) => other,
    }
}

/// Place the items of one line along the main axis.
///
/// Positive free space goes to `auto` margins first; only when there are none does
/// `justify-content` distribute it.
pub fn align_main_axis(
    items: &mut [FlexItem],
    axes: FlexAxes,
    justify_content: JustifyContent,
    inner_main: f32,
    main_gap: f32,
) {
    let gaps = main_gap * items.len().saturating_sub(1) as f32;
    let used: f32 = items
        .iter()
        .map(|item| item.outer_target_main(axes))
        .sum::<f32>()
        + gaps;
    let free = inner_main - used;
    let auto_margin_count: usize = items
        .iter()
        .map(|item| {
            usize::from(axes.main_leading(item.margin_is_auto))
                + usize::from(axes.main_trailing(item.margin_is_auto))
        })
        .sum();

    let (leading, per_gap) = if free > 0.0 && auto_margin_count > 0 {
        let share = free / auto_margin_count as f32;
        for item in items.iter_mut() {
            let start = if axes.main_leading(item.margin_is_auto) {
                share
            } else {
                axes.main_leading(item.margin)
            };
            let end = if axes.main_trailing(item.margin_is_auto) {
                share
            } else {
                axes.main_trailing(item.margin)
            };
            axes.set_main_edges(&mut item.margin, start, end);
        }
        (0.0, 0.0)
    } else {
        justify_content.distribute(free, items.len(), false)
    };
    trace!(
        target: "trellis::flex",
        "main axis free={free} leading={leading} per_gap={per_gap}"
    );

    let mut cursor = leading;
    for item in items.iter_mut() {
        cursor += axes.main_leading(item.margin);
        item.offset_main = cursor;
        cursor += item.target_main + axes.main_trailing(item.margin) + main_gap + per_gap;
    }
}

/// Place each item of one line within the line's cross size.
///
/// `auto` cross margins absorb positive free space; otherwise `align-self` applies.
pub fn align_cross_axis(items: &mut [FlexItem], axes: FlexAxes, line_cross: f32) {
    for item in items.iter_mut() {
        let free = line_cross - item.target_cross - item.margin_cross_sum(axes);
        let auto_start = axes.cross_leading(item.margin_is_auto);
        let auto_end = axes.cross_trailing(item.margin_is_auto);
        let start_margin = axes.cross_leading(item.margin);
        let end_margin = axes.cross_trailing(item.margin);
        let positive = free.max(0.0);
        let (start, end, offset) = match (auto_start, auto_end) {
            (true, true) => (positive / 2.0, positive / 2.0, 0.0),
            (true, false) => (positive, end_margin, 0.0),
            (false, true) => (start_margin, positive, 0.0),
            (false, false) => (start_margin, end_margin, item.align_self.offset(free, false)),
        };
        axes.set_cross_edges(&mut item.margin, start, end);
        item.offset_cross = start + offset;
    }
}

/// Position the lines along the cross axis per `align-content`.
pub fn align_lines(
    lines: &mut [FlexLine],
    axes: FlexAxes,
    align_content: AlignContent,
    inner_cross: f32,
    cross_gap: f32,
) {
    let gaps = cross_gap * lines.len().saturating_sub(1) as f32;
    let used: f32 = lines.iter().map(|line| line.cross_size).sum::<f32>() + gaps;
    let (leading, per_gap) = if axes.is_wrapping {
        flex_justify_content(Some(align_content)).distribute(inner_cross - used, lines.len(), false)
    } else {
        (0.0, 0.0)
    };
    let mut cursor = leading;
    for line in lines.iter_mut() {
        line.offset_cross = cursor;
        cursor += line.cross_size + cross_gap + per_gap;
    }
}
