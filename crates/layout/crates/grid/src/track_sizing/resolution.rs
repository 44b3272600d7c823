//! Initializing track sizes and resolving intrinsic track sizes.
//!
//! Spec: §12.4 Initialize Track Sizes <https://www.w3.org/TR/css-grid-2/#algo-init>
//! and §12.5 Resolve Intrinsic Track Sizes <https://www.w3.org/TR/css-grid-2/#algo-content>

use trellis_layout_util::LayoutHost;
use trellis_style::{AvailableSpace, MaxTrackSizingFunction, MinTrackSizingFunction};

use super::distribution::{
    IntrinsicTarget, commit_base_size_increases, commit_growth_limit_increases,
    distribute_item_space, distribute_item_space_to_flexible_tracks,
};
use super::helpers::MeasureContext;
use crate::types::{GridItem, GridTrack};

/// Set each track's base size and growth limit from its fixed sizing functions.
///
/// Content-based functions start at a zero base size and an infinite growth limit.
pub fn initialize_track_sizes(tracks: &mut [GridTrack], axis_size: Option<f32>) {
    for track in tracks {
        track.base_size = track
            .min_track_sizing_function
            .definite_value(axis_size)
            .unwrap_or(0.0);
        track.growth_limit = track
            .max_track_sizing_function
            .definite_value(axis_size)
            .unwrap_or(f32::INFINITY)
            .max(track.base_size);
        track.infinitely_growable = false;
        track.base_size_planned_increase = 0.0;
        track.growth_limit_planned_increase = 0.0;
        track.item_incurred_increase = 0.0;
    }
}

/// Growth limit raised to `value`, replacing an infinite limit.
fn raise_growth_limit(growth_limit: f32, value: f32) -> f32 {
    if growth_limit.is_finite() {
        growth_limit.max(value)
    } else {
        value
    }
}

/// Size the tracks with content-based sizing functions from the items they hold.
pub fn resolve_intrinsic_track_sizes(
    tree: &mut impl LayoutHost,
    context: &MeasureContext<'_>,
    tracks: &mut [GridTrack],
    items: &mut [GridItem],
) {
    let axis = context.axis;
    let axis_size = context.axis_inner_size;
    let intrinsic_constraint = match (axis_size, context.available_grid_space.get(axis)) {
        (None, AvailableSpace::MinContent) => Some(AvailableSpace::MinContent),
        (None, AvailableSpace::MaxContent) => Some(AvailableSpace::MaxContent),
        _ => None,
    };

    // Step 2: items spanning a single non-flexible track.
    for item in items.iter_mut() {
        if item.span(axis) != 1 || item.crosses_flexible_track.get(axis) {
            continue;
        }
        let index = context.counts.track_range(item.lines(axis)).start;
        let Some(current) = tracks.get(index) else {
            continue;
        };
        let min_function = current.min_track_sizing_function.clone();
        let max_function = current.max_track_sizing_function.clone();
        let has_intrinsic_min = current.has_intrinsic_min(axis_size);
        let has_intrinsic_max = current.has_intrinsic_max(axis_size);

        let base_contribution = match min_function {
            MinTrackSizingFunction::MinContent => Some(context.min_content_contribution(tree, item)),
            MinTrackSizingFunction::MaxContent => Some(context.max_content_contribution(tree, item)),
            _ if !has_intrinsic_min => None,
            _ => Some(match intrinsic_constraint {
                Some(_) => context.min_content_contribution(tree, item).max(
                    context.minimum_contribution(tree, item, tracks),
                ),
                None => context.minimum_contribution(tree, item, tracks),
            }),
        };
        let growth_contribution = match max_function {
            MaxTrackSizingFunction::MinContent => Some(context.min_content_contribution(tree, item)),
            MaxTrackSizingFunction::FitContent(ref limit) => {
                let max_content = context.max_content_contribution(tree, item);
                let min_content = context.min_content_contribution(tree, item);
                let limit = limit.resolve(axis_size).unwrap_or(max_content);
                Some(max_content.min(limit).max(min_content))
            }
            MaxTrackSizingFunction::Fraction(_) => None,
            _ if !has_intrinsic_max => None,
            _ => Some(context.max_content_contribution(tree, item)),
        };

        if let Some(track) = tracks.get_mut(index) {
            if let Some(contribution) = base_contribution {
                track.base_size = track.base_size.max(contribution);
            }
            if let Some(contribution) = growth_contribution {
                track.growth_limit = raise_growth_limit(track.growth_limit, contribution);
            }
        }
    }
    for track in tracks.iter_mut() {
        if track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }

    // Step 3: items spanning several tracks, none flexible, by increasing span.
    // (span, item index), grouped by span once sorted.
    let mut spanning: Vec<(u16, usize)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.span(axis) > 1 && !item.crosses_flexible_track.get(axis))
        .map(|(index, item)| (item.span(axis), index))
        .collect();
    spanning.sort_unstable();
    for span_group in spanning.chunk_by(|first, second| first.0 == second.0) {
        let group: Vec<usize> = span_group.iter().map(|&(_, index)| index).collect();
        distribute_span_group(tree, context, tracks, items, &group, intrinsic_constraint);
    }

    // Step 4: items crossing flexible tracks.
    for item in items.iter_mut() {
        if !item.crosses_flexible_track.get(axis) {
            continue;
        }
        let space = match intrinsic_constraint {
            Some(_) => context.min_content_contribution(tree, item),
            None => context.minimum_contribution(tree, item, tracks),
        };
        let range = context.counts.track_range(item.lines(axis));
        if let Some(spanned) = tracks.get_mut(range) {
            distribute_item_space_to_flexible_tracks(spanned, space, axis_size);
        }
    }
    commit_base_size_increases(tracks);

    // Step 5: infinite growth limits fall back to the base size.
    for track in tracks.iter_mut() {
        if !track.growth_limit.is_finite() {
            track.growth_limit = track.base_size;
        }
        track.infinitely_growable = false;
    }
}

/// Contribution an item hands to one distribution step.
#[derive(Debug, Clone, Copy)]
enum Contribution {
    Minimum,
    MinContent,
    MaxContent,
}

/// Grow the spanned tracks of one group of equal-span items.
///
/// Spec: §12.5 step 3 <https://www.w3.org/TR/css-grid-2/#algo-spanning-items>
fn distribute_span_group(
    tree: &mut impl LayoutHost,
    context: &MeasureContext<'_>,
    tracks: &mut [GridTrack],
    items: &mut [GridItem],
    group: &[usize],
    intrinsic_constraint: Option<AvailableSpace>,
) {
    let axis_size = context.axis_inner_size;
    let minimum = if intrinsic_constraint.is_some() {
        Contribution::MinContent
    } else {
        Contribution::Minimum
    };
    let max_content_minimums_include_auto =
        matches!(intrinsic_constraint, Some(AvailableSpace::MaxContent));

    let steps: [(IntrinsicTarget, Contribution, &dyn Fn(&GridTrack) -> bool); 5] = [
        (IntrinsicTarget::BaseSize, minimum, &|track: &GridTrack| track.has_intrinsic_min(axis_size)),
        (IntrinsicTarget::BaseSize, Contribution::MinContent, &|track: &GridTrack| {
            matches!(
                track.min_track_sizing_function,
                MinTrackSizingFunction::MinContent | MinTrackSizingFunction::MaxContent
            )
        }),
        (IntrinsicTarget::BaseSize, Contribution::MaxContent, &|track: &GridTrack| {
            matches!(track.min_track_sizing_function, MinTrackSizingFunction::MaxContent)
                || (max_content_minimums_include_auto
                    && matches!(track.min_track_sizing_function, MinTrackSizingFunction::Auto))
        }),
        (IntrinsicTarget::GrowthLimit, Contribution::MinContent, &|track: &GridTrack| {
            track.has_intrinsic_max(axis_size)
        }),
        (IntrinsicTarget::GrowthLimit, Contribution::MaxContent, &|track: &GridTrack| {
            track.max_track_sizing_function.is_max_content_alike()
                || (track.has_intrinsic_max(axis_size)
                    && !matches!(track.max_track_sizing_function, MaxTrackSizingFunction::MinContent))
        }),
    ];

    for (target, contribution, eligible) in steps {
        for &index in group {
            let Some(item) = items.get_mut(index) else {
                continue;
            };
            let space = match contribution {
                Contribution::Minimum => context.minimum_contribution(tree, item, tracks),
                Contribution::MinContent => context.min_content_contribution(tree, item),
                Contribution::MaxContent => context.max_content_contribution(tree, item),
            };
            let range = context.counts.track_range(item.lines(context.axis));
            if let Some(spanned) = tracks.get_mut(range) {
                distribute_item_space(spanned, space, target, axis_size, eligible);
            }
        }
        match target {
            IntrinsicTarget::BaseSize => commit_base_size_increases(tracks),
            IntrinsicTarget::GrowthLimit => commit_growth_limit_increases(tracks),
        }
    }
    for track in tracks.iter_mut() {
        track.infinitely_growable = false;
    }
}
