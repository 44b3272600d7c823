//! Growing tracks into free space once content has been accounted for.
//!
//! Spec: §12.6 Maximize Tracks, §12.7 Expand Flexible Tracks and §12.8 Stretch auto Tracks
//! <https://www.w3.org/TR/css-grid-2/#algo-grow-tracks>

use core::ops::Range;

use trellis_style::{AlignContent, AvailableSpace, MaxTrackSizingFunction};

use crate::types::GridTrack;

const EPSILON: f32 = 1e-4;

fn used_space(tracks: &[GridTrack]) -> f32 {
    tracks.iter().map(|track| track.base_size).sum()
}

/// Grow base sizes toward growth limits.
///
/// With a definite `free_space_basis` the free space is shared equally up to the
/// limits; under a max-content constraint every track takes its growth limit.
pub fn maximize_tracks(tracks: &mut [GridTrack], free_space_basis: Option<f32>, available: AvailableSpace) {
    let Some(space) = free_space_basis else {
        if matches!(available, AvailableSpace::MaxContent) {
            for track in tracks.iter_mut().filter(|track| track.is_sizable_track()) {
                if track.growth_limit.is_finite() {
                    track.base_size = track.base_size.max(track.growth_limit);
                }
            }
        }
        return;
    };

    let mut free = space - used_space(tracks);
    for _ in 0..=tracks.len() {
        let growable = tracks
            .iter()
            .filter(|track| track.is_sizable_track() && track.growth_limit - track.base_size > EPSILON)
            .count();
        if growable == 0 || free <= EPSILON {
            break;
        }
        let share = free / growable as f32;
        for track in tracks
            .iter_mut()
            .filter(|track| track.is_sizable_track() && track.growth_limit - track.base_size > EPSILON)
        {
            let increase = share.min(track.growth_limit - track.base_size);
            track.base_size += increase;
            free -= increase;
        }
    }
}

/// Size of `1fr` that lets the tracks in `range` fill `space`.
///
/// Flexible tracks whose base size exceeds their share are treated as inflexible
/// and the share is recomputed.
///
/// Spec: §12.7.1 Find the Size of an fr <https://www.w3.org/TR/css-grid-2/#algo-find-fr-size>
pub fn find_size_of_fr(tracks: &[GridTrack], range: Range<usize>, space: f32) -> f32 {
    let Some(spanned) = tracks.get(range) else {
        return 0.0;
    };
    let mut inflexible = vec![false; spanned.len()];
    let mut hypothetical = 0.0f32;
    for _ in 0..=spanned.len() {
        let mut leftover = space;
        let mut flex_sum = 0.0f32;
        for (track, &is_inflexible) in spanned.iter().zip(&inflexible) {
            if track.is_flexible() && !is_inflexible {
                flex_sum += track.flex_factor();
            } else {
                leftover -= track.base_size;
            }
        }
        if flex_sum <= 0.0 {
            return 0.0;
        }
        hypothetical = leftover.max(0.0) / flex_sum.max(1.0);

        let mut restart = false;
        for (track, is_inflexible) in spanned.iter().zip(inflexible.iter_mut()) {
            if track.is_flexible() && !*is_inflexible && hypothetical * track.flex_factor() < track.base_size {
                *is_inflexible = true;
                restart = true;
            }
        }
        if !restart {
            break;
        }
    }
    hypothetical
}

/// Size `fr` tracks.
///
/// With definite `free_space_basis` the fr size fills it; under a max-content
/// constraint it is the largest fr size implied by each flexible track's base size
/// and each `flexible_items` entry (its spanned range and max-content contribution).
/// A min-content constraint leaves the tracks alone. The result is redone against
/// the container's min or max size when it would break them.
pub fn expand_flexible_tracks(
    tracks: &mut [GridTrack],
    flexible_items: &[(Range<usize>, f32)],
    free_space_basis: Option<f32>,
    available: AvailableSpace,
    min_size: Option<f32>,
    max_size: Option<f32>,
) {
    if !tracks.iter().any(GridTrack::is_flexible) {
        return;
    }
    let all = 0..tracks.len();
    let flex_fraction = match (free_space_basis, available) {
        (Some(space), _) => find_size_of_fr(tracks, all.clone(), space),
        (None, AvailableSpace::MinContent) => return,
        (None, _) => {
            let from_tracks = tracks
                .iter()
                .filter(|track| track.is_flexible())
                .map(|track| {
                    let factor = track.flex_factor();
                    if factor > 1.0 {
                        track.base_size / factor
                    } else {
                        track.base_size
                    }
                })
                .fold(0.0f32, f32::max);
            let from_items = flexible_items
                .iter()
                .map(|(range, contribution)| find_size_of_fr(tracks, range.clone(), *contribution))
                .fold(0.0f32, f32::max);
            let fraction = from_tracks.max(from_items);
            let total: f32 = tracks
                .iter()
                .map(|track| {
                    if track.is_flexible() {
                        track.base_size.max(fraction * track.flex_factor())
                    } else {
                        track.base_size
                    }
                })
                .sum();
            match (min_size, max_size) {
                (Some(min), _) if total < min => find_size_of_fr(tracks, all, min),
                (_, Some(max)) if total > max => find_size_of_fr(tracks, all, max),
                _ => fraction,
            }
        }
    };

    for track in tracks.iter_mut().filter(|track| track.is_flexible()) {
        let size = flex_fraction * track.flex_factor();
        if size > track.base_size {
            track.base_size = size;
        }
        track.growth_limit = track.base_size;
    }
    tracing::debug!("expand_flexible_tracks: flex_fraction={flex_fraction}");
}

/// Share the remaining free space equally among `auto` tracks when content
/// alignment is `normal` or `stretch`.
pub fn stretch_auto_tracks(
    tracks: &mut [GridTrack],
    free_space_basis: Option<f32>,
    content_alignment: Option<AlignContent>,
) {
    if !matches!(content_alignment, None | Some(AlignContent::Stretch)) {
        return;
    }
    let Some(space) = free_space_basis else {
        return;
    };
    let free = space - used_space(tracks);
    let auto_count = tracks
        .iter()
        .filter(|track| {
            track.is_sizable_track()
                && matches!(track.max_track_sizing_function, MaxTrackSizingFunction::Auto)
        })
        .count();
    if free <= 0.0 || auto_count == 0 {
        return;
    }
    let share = free / auto_count as f32;
    for track in tracks.iter_mut().filter(|track| {
        track.is_sizable_track() && matches!(track.max_track_sizing_function, MaxTrackSizingFunction::Auto)
    }) {
        track.base_size += share;
        track.growth_limit = track.growth_limit.max(track.base_size);
    }
}
