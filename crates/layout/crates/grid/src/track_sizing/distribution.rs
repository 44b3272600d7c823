//! Distributing an item's extra space across the tracks it spans.
//!
//! Spec: §12.5.1 Distributing Extra Space Across Spanned Tracks
//! <https://www.w3.org/TR/css-grid-2/#extra-space>

use crate::types::GridTrack;

const EPSILON: f32 = 1e-4;

/// Which track size a distribution step increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicTarget {
    /// The base size, limited by the growth limit.
    BaseSize,
    /// The growth limit, unlimited for infinitely growable tracks.
    GrowthLimit,
}

impl IntrinsicTarget {
    /// Current size of `track` as seen by this step; an infinite growth limit counts
    /// as the base size.
    fn affected_size(self, track: &GridTrack) -> f32 {
        match self {
            Self::BaseSize => track.base_size,
            Self::GrowthLimit if track.growth_limit.is_finite() => track.growth_limit,
            Self::GrowthLimit => track.base_size,
        }
    }

    /// Size this step may grow `track` to before it is frozen.
    fn limit(self, track: &GridTrack, axis_size: Option<f32>) -> f32 {
        match self {
            Self::BaseSize => track.fit_content_limited_growth_limit(axis_size),
            Self::GrowthLimit if track.infinitely_growable || !track.growth_limit.is_finite() => track
                .max_track_sizing_function
                .fit_content_limit(axis_size)
                .unwrap_or(f32::INFINITY),
            Self::GrowthLimit => track.growth_limit,
        }
    }
}

/// Plan increases so the spanned tracks accommodate `space`.
///
/// `spanned` is the item's slice of the track list (gutters included). Space beyond
/// the current sizes is shared equally among the `eligible` tracks up to their
/// limits, then equally past them. Each track keeps the largest increase any item in
/// the current span group asks for.
pub fn distribute_item_space(
    spanned: &mut [GridTrack],
    space: f32,
    target: IntrinsicTarget,
    axis_size: Option<f32>,
    eligible: impl Fn(&GridTrack) -> bool,
) {
    let current: f32 = spanned.iter().map(|track| target.affected_size(track)).sum();
    let mut extra = space - current;
    if extra <= 0.0 {
        return;
    }
    let eligible_count = spanned
        .iter()
        .filter(|track| track.is_sizable_track() && eligible(track))
        .count();
    if eligible_count == 0 {
        return;
    }
    for track in spanned.iter_mut() {
        track.item_incurred_increase = 0.0;
    }

    // Up to the limits.
    for _ in 0..=eligible_count {
        let room = |track: &GridTrack| {
            target.limit(track, axis_size) - target.affected_size(track) - track.item_incurred_increase
        };
        let unfrozen = spanned
            .iter()
            .filter(|track| track.is_sizable_track() && eligible(track) && room(track) > EPSILON)
            .count();
        if unfrozen == 0 || extra <= EPSILON {
            break;
        }
        let share = extra / unfrozen as f32;
        for track in spanned
            .iter_mut()
            .filter(|track| track.is_sizable_track() && eligible(track))
        {
            let available = room(track);
            if available > EPSILON {
                let increase = share.min(available);
                track.item_incurred_increase += increase;
                extra -= increase;
            }
        }
    }

    // Past the limits.
    if extra > EPSILON {
        let share = extra / eligible_count as f32;
        for track in spanned
            .iter_mut()
            .filter(|track| track.is_sizable_track() && eligible(track))
        {
            track.item_incurred_increase += share;
        }
    }

    for track in spanned.iter_mut() {
        match target {
            IntrinsicTarget::BaseSize => {
                track.base_size_planned_increase =
                    track.base_size_planned_increase.max(track.item_incurred_increase);
            }
            IntrinsicTarget::GrowthLimit => {
                track.growth_limit_planned_increase = track
                    .growth_limit_planned_increase
                    .max(track.item_incurred_increase);
            }
        }
        track.item_incurred_increase = 0.0;
    }
}

/// Plan base size increases for an item crossing `fr` tracks, shared in proportion to
/// the flex factors of the eligible tracks (equally when all factors are zero).
///
/// Spec: §12.5 step 4 <https://www.w3.org/TR/css-grid-2/#algo-spanning-flex-items>
pub fn distribute_item_space_to_flexible_tracks(
    spanned: &mut [GridTrack],
    space: f32,
    axis_size: Option<f32>,
) {
    let current: f32 = spanned.iter().map(|track| track.base_size).sum();
    let extra = space - current;
    if extra <= 0.0 {
        return;
    }
    let eligible = |track: &GridTrack| track.is_flexible() && track.has_intrinsic_min(axis_size);
    let count = spanned.iter().filter(|track| eligible(track)).count();
    let factor_sum: f32 = spanned
        .iter()
        .filter(|track| eligible(track))
        .map(GridTrack::flex_factor)
        .sum();
    if count == 0 {
        return;
    }
    for track in spanned.iter_mut().filter(|track| eligible(track)) {
        let share = if factor_sum > 0.0 {
            extra * track.flex_factor() / factor_sum
        } else {
            extra / count as f32
        };
        track.base_size_planned_increase = track.base_size_planned_increase.max(share);
    }
}

/// Apply planned base size increases, keeping growth limits at or above base sizes.
pub fn commit_base_size_increases(tracks: &mut [GridTrack]) {
    for track in tracks {
        track.base_size += track.base_size_planned_increase;
        track.base_size_planned_increase = 0.0;
        if track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }
}

/// Apply planned growth limit increases; a limit that goes from infinite to finite
/// is marked infinitely growable for the next step.
pub fn commit_growth_limit_increases(tracks: &mut [GridTrack]) {
    for track in tracks {
        if track.growth_limit_planned_increase > 0.0 {
            if track.growth_limit.is_finite() {
                track.growth_limit += track.growth_limit_planned_increase;
            } else {
                track.growth_limit = track.base_size + track.growth_limit_planned_increase;
                track.infinitely_growable = true;
            }
        }
        track.growth_limit_planned_increase = 0.0;
    }
}
