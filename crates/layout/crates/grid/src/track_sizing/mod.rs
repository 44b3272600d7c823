//! Grid track sizing algorithm.
//!
//! Spec: §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#algo-track-sizing>

mod distribution;
mod expansion;
mod helpers;
mod resolution;

use core::ops::Range;

use trellis_layout_util::LayoutHost;
use trellis_style::{AbsoluteAxis, AlignContent, AvailableSpace, Size};

use crate::types::{GridItem, GridTrack, TrackCounts};
use expansion::{expand_flexible_tracks, maximize_tracks, stretch_auto_tracks};
use helpers::MeasureContext;
use resolution::{initialize_track_sizes, resolve_intrinsic_track_sizes};

pub use helpers::spanned_size;

/// Parameters for sizing the tracks of one axis.
#[derive(Debug, Clone, Copy)]
pub struct TrackSizingParams<'other> {
    /// Axis being sized.
    pub axis: AbsoluteAxis,
    /// Track counts along `axis`.
    pub counts: TrackCounts,
    /// Inner size of the container along `axis`, when known.
    pub axis_inner_size: Option<f32>,
    /// Inner min size of the container along `axis`.
    pub axis_min_size: Option<f32>,
    /// Inner max size of the container along `axis`.
    pub axis_max_size: Option<f32>,
    /// Space available to the grid on both axes.
    pub available_grid_space: Size<AvailableSpace>,
    /// Percentage basis for the items.
    pub inner_known: Size<Option<f32>>,
    /// `justify-content` for columns, `align-content` for rows.
    pub content_alignment: Option<AlignContent>,
    /// Sized tracks of the other axis, if any.
    pub other_axis: Option<(&'other [GridTrack], TrackCounts)>,
}

/// Size the tracks of one axis: fixed sizes, content contributions, free space,
/// `fr` tracks, then `auto` track stretching.
///
/// Spec: §12.3 <https://www.w3.org/TR/css-grid-2/#algo-overview>
pub fn track_sizing_algorithm(
    tree: &mut impl LayoutHost,
    params: &TrackSizingParams<'_>,
    tracks: &mut [GridTrack],
    items: &mut [GridItem],
) {
    let axis = params.axis;
    for item in items.iter_mut() {
        item.clear_contributions(axis);
    }
    let context = MeasureContext {
        axis,
        counts: params.counts,
        axis_inner_size: params.axis_inner_size,
        inner_known: params.inner_known,
        available_grid_space: params.available_grid_space,
        other_axis: params.other_axis,
    };

    initialize_track_sizes(tracks, params.axis_inner_size);
    resolve_intrinsic_track_sizes(tree, &context, tracks, items);

    let available = params.available_grid_space.get(axis);
    let free_space_basis = params.axis_inner_size.or_else(|| available.into_option());
    maximize_tracks(tracks, free_space_basis, available);

    let flexible_items: Vec<(Range<usize>, f32)> = if free_space_basis.is_none()
        && matches!(available, AvailableSpace::MaxContent)
    {
        items
            .iter_mut()
            .filter(|item| item.crosses_flexible_track.get(axis))
            .map(|item| {
                let range = params.counts.track_range(item.lines(axis));
                (range, context.max_content_contribution(tree, item))
            })
            .collect()
    } else {
        Vec::new()
    };
    expand_flexible_tracks(
        tracks,
        &flexible_items,
        free_space_basis,
        available,
        params.axis_min_size,
        params.axis_max_size,
    );
    stretch_auto_tracks(tracks, free_space_basis, params.content_alignment);

    tracing::debug!(
        "track_sizing_algorithm: axis={axis:?} sizes={:?}",
        tracks
            .iter()
            .filter(|track| track.is_sizable_track())
            .map(|track| track.base_size)
            .collect::<Vec<_>>()
    );
}
