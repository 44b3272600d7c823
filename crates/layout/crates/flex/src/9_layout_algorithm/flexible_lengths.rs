//! Resolving flexible lengths.
//!
//! Spec: §9.7: Resolving Flexible Lengths
//! <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>

use log::trace;

use crate::chapter4::FlexItem;
use crate::chapter7::FlexAxes;

/// Grow or shrink the items of one line so that they fill `inner_main`.
///
/// Items that hit a min/max clamp are frozen at the clamped size and the remaining
/// free space is redistributed among the others until every item is frozen.
pub fn resolve_flexible_lengths(
    items: &mut [FlexItem],
    axes: FlexAxes,
    inner_main: f32,
    main_gap: f32,
) {
    let gaps = main_gap * items.len().saturating_sub(1) as f32;
    let hypothetical_sum: f32 = items
        .iter()
        .map(|item| item.hypothetical_outer_main(axes))
        .sum();
    let growing = hypothetical_sum + gaps < inner_main;

    // Size inflexible items.
    for item in items.iter_mut() {
        item.target_main = item.hypothetical_inner_main;
        item.violation = 0.0;
        let factor = if growing {
            item.flex_grow
        } else {
            item.flex_shrink
        };
        item.frozen = factor == 0.0
            || (growing && item.flex_basis > item.hypothetical_inner_main)
            || (!growing && item.flex_basis < item.hypothetical_inner_main);
    }

    let initial_free_space = inner_main - gaps - used_space(items, axes);

    // Each pass freezes at least one item.
    for _ in 0..=items.len() {
        if items.iter().all(|item| item.frozen) {
            break;
        }
        let mut free_space = inner_main - gaps - used_space(items, axes);
        let (sum_grow, sum_shrink) = items
            .iter()
            .filter(|item| !item.frozen)
            .fold((0.0f32, 0.0f32), |(grow, shrink), item| {
                (grow + item.flex_grow, shrink + item.flex_shrink)
            });
        let sum_factors = if growing { sum_grow } else { sum_shrink };
        if sum_factors < 1.0 {
            let scaled = initial_free_space * sum_factors;
            if scaled.abs() < free_space.abs() {
                free_space = scaled;
            }
        }

        distribute(items, growing, free_space, sum_grow);

        let mut total_violation = 0.0f32;
        for item in items.iter_mut().filter(|item| !item.frozen) {
            let clamped = item.clamp_main(item.target_main, axes).max(0.0);
            item.violation = clamped - item.target_main;
            item.target_main = clamped;
            total_violation += item.violation;
        }
        for item in items.iter_mut().filter(|item| !item.frozen) {
            item.frozen = if total_violation > 0.0 {
                item.violation > 0.0
            } else if total_violation < 0.0 {
                item.violation < 0.0
            } else {
                true
            };
        }
        trace!(
            target: "trellis::flex",
            "flex pass free={free_space} violation={total_violation}"
        );
    }
}

/// Main space taken by frozen items at their target size and unfrozen items at their basis.
fn used_space(items: &[FlexItem], axes: FlexAxes) -> f32 {
    items
        .iter()
        .map(|item| {
            if item.frozen {
                item.outer_target_main(axes)
            } else {
                item.outer_flex_basis(axes)
            }
        })
        .sum()
}

/// Hand out `free_space` to the unfrozen items.
///
/// Growth is proportional to `flex-grow`; shrinkage to `flex-shrink` scaled by the
/// flex base size.
fn distribute(items: &mut [FlexItem], growing: bool, free_space: f32, sum_grow: f32) {
    let usable = free_space.is_finite() && free_space != 0.0;
    if growing {
        for item in items.iter_mut().filter(|item| !item.frozen) {
            item.target_main = if usable && sum_grow > 0.0 {
                item.flex_basis + free_space * (item.flex_grow / sum_grow)
            } else {
                item.flex_basis
            };
        }
    } else {
        let sum_scaled: f32 = items
            .iter()
            .filter(|item| !item.frozen)
            .map(|item| item.flex_shrink * item.flex_basis)
            .sum();
        for item in items.iter_mut().filter(|item| !item.frozen) {
            item.target_main = if usable && sum_scaled > 0.0 {
                let ratio = item.flex_shrink * item.flex_basis / sum_scaled;
                item.flex_basis + free_space * ratio
            } else {
                item.flex_basis
            };
        }
    }
}
