//! Aligning tracks in the grid container and items in their grid areas.
//!
//! Spec: §11.1 Grid Axis Alignment <https://www.w3.org/TR/css-grid-2/#alignment>

use trellis_style::{AlignContent, AlignItems};

use crate::types::{GridTrack, GridTrackKind};

/// Set every track's offset, distributing free space per `alignment`.
///
/// Distributed space widens the interior gutters, so spanning items grow with it.
/// `normal` behaves as `stretch`, whose leftover space (after `auto` tracks took
/// theirs) packs to the start.
pub fn align_tracks(tracks: &mut [GridTrack], inner_size: f32, alignment: Option<AlignContent>) {
    let used: f32 = tracks.iter().map(|track| track.base_size).sum();
    let track_count = tracks.iter().filter(|track| track.is_sizable_track()).count();
    let (leading, per_gap) = alignment
        .unwrap_or(AlignContent::Stretch)
        .distribute(inner_size - used, track_count, false);

    let last = tracks.len().saturating_sub(1);
    let mut offset = leading;
    for (index, track) in tracks.iter_mut().enumerate() {
        let is_interior_gutter = matches!(track.kind, GridTrackKind::Gutter)
            && index != 0
            && index != last
            && !track.is_collapsed;
        if is_interior_gutter {
            track.base_size += per_gap;
        }
        track.offset = offset;
        offset += track.base_size;
    }
}

/// Place an item of `size` in an area of `area_size` along one axis.
///
/// Returns the border-box offset from the area's start and the used start and end
/// margins. `auto` margins absorb positive free space before `alignment` applies.
pub fn align_item_in_area(
    area_size: f32,
    size: f32,
    margin_start: Option<f32>,
    margin_end: Option<f32>,
    alignment: AlignItems,
) -> (f32, f32, f32) {
    let fixed = margin_start.unwrap_or(0.0) + margin_end.unwrap_or(0.0);
    let free = area_size - size - fixed;
    let positive = free.max(0.0);
    match (margin_start, margin_end) {
        (None, None) => (positive / 2.0, positive / 2.0, positive / 2.0),
        (None, Some(end)) => (positive, positive, end),
        (Some(start), None) => (start, start, positive),
        (Some(start), Some(end)) => (start + alignment.offset(free, false), start, end),
    }
}
