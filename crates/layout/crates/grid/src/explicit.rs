//! Explicit grid size and `repeat(auto-fill | auto-fit)` resolution.
//!
//! Spec: §7.2.3.2 Repeat-to-fill <https://www.w3.org/TR/css-grid-2/#auto-repeat>

use core::slice;

use trellis_style::{GridTrackRepetition, TrackSizingFunction, TrackSizingPair};

use crate::types::{GridTrack, MAX_GRID_LINE, OriginZeroLine, TrackCounts};

/// Most explicit tracks a template expands to along one axis.
const MAX_EXPLICIT_TRACKS: u16 = MAX_GRID_LINE as u16;

/// Track count of `tracks` repeated `count` times, saturating.
fn repeated_track_count(count: u16, tracks: &[TrackSizingPair]) -> u16 {
    let per_repetition = u16::try_from(tracks.len()).unwrap_or(u16::MAX);
    count.saturating_mul(per_repetition)
}

/// How the number of automatic repetitions is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRepeatStrategy {
    /// Largest count whose tracks still fit (definite size or max size).
    MaxRepetitionsThatDoNotOverflow,
    /// Smallest count whose tracks reach the size (min size only).
    MinRepetitionsThatDoOverflow,
}

/// Number of repetitions of the single auto-repeat in `template`.
///
/// The count is 1 unless the template holds exactly one auto-repeat, every track has
/// a fixed component and `container_size` is known. Gaps between all tracks count.
/// The count never expands the template past the explicit track limit.
pub fn auto_repetition_count(
    template: &[TrackSizingFunction],
    gap: f32,
    container_size: Option<f32>,
    strategy: AutoRepeatStrategy,
) -> u16 {
    let mut auto_repeats = template.iter().filter_map(|function| match function {
        TrackSizingFunction::Repeat(repetition, tracks) if repetition.is_auto() => Some(tracks),
        _ => None,
    });
    let (Some(repeated), None) = (auto_repeats.next(), auto_repeats.next()) else {
        return 1;
    };
    let Some(size) = container_size else {
        return 1;
    };
    if !template.iter().all(TrackSizingFunction::has_fixed_component) {
        return 1;
    }

    let track_size = |track: &TrackSizingPair| track.repetition_size(Some(size));
    let mut fixed_tracks = 0u16;
    let mut fixed_used = 0.0f32;
    for function in template {
        match function {
            TrackSizingFunction::Single(track) => {
                fixed_tracks = fixed_tracks.saturating_add(1);
                fixed_used += track_size(track);
            }
            TrackSizingFunction::Repeat(GridTrackRepetition::Count(count), tracks) => {
                fixed_tracks = fixed_tracks.saturating_add(repeated_track_count(*count, tracks));
                fixed_used += f32::from(*count) * tracks.iter().map(track_size).sum::<f32>();
            }
            TrackSizingFunction::Repeat(_, _) => {}
        }
    }
    let repeated_count = repeated_track_count(1, repeated);
    let per_repetition: f32 = repeated.iter().map(track_size).sum();

    let first = fixed_used
        + per_repetition
        + f32::from(fixed_tracks.saturating_add(repeated_count).saturating_sub(1)) * gap;
    if first > size {
        return 1;
    }
    let per_repetition_with_gaps = per_repetition + f32::from(repeated_count) * gap;
    if per_repetition_with_gaps <= 0.0 {
        return 1;
    }
    let fit = (size - first) / per_repetition_with_gaps;
    let extra = match strategy {
        AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow => fit.floor(),
        AutoRepeatStrategy::MinRepetitionsThatDoOverflow => fit.ceil(),
    };
    let limit = (MAX_EXPLICIT_TRACKS.saturating_sub(fixed_tracks) / repeated_count.max(1)).max(1);
    (extra as u16).saturating_add(1).min(limit)
}

/// Number of explicit tracks once auto-repeats are expanded `repetitions` times,
/// capped at the explicit track limit.
pub fn explicit_track_count(template: &[TrackSizingFunction], repetitions: u16) -> u16 {
    template
        .iter()
        .map(|function| match function {
            TrackSizingFunction::Single(_) => 1,
            TrackSizingFunction::Repeat(GridTrackRepetition::Count(count), tracks) => {
                repeated_track_count(*count, tracks)
            }
            TrackSizingFunction::Repeat(_, tracks) => repeated_track_count(repetitions, tracks),
        })
        .fold(0u16, u16::saturating_add)
        .min(MAX_EXPLICIT_TRACKS)
}

/// Origin-zero lines covered by an `auto-fit` repeat, if the template has one.
pub fn auto_fit_lines(
    template: &[TrackSizingFunction],
    repetitions: u16,
) -> Option<(OriginZeroLine, OriginZeroLine)> {
    let mut line = 0i16;
    for function in template {
        let count = explicit_track_count(slice::from_ref(function), repetitions) as i16;
        if matches!(function, TrackSizingFunction::Repeat(GridTrackRepetition::AutoFit, _)) {
            return Some((line, line.saturating_add(count).min(MAX_GRID_LINE)));
        }
        line = line.saturating_add(count).min(MAX_GRID_LINE);
    }
    None
}

/// Build the track list of one axis with a gutter at every line.
///
/// Implicit tracks cycle through `auto_tracks`; those before the explicit grid count
/// backwards from its last entry. Outer gutters are zero sized.
///
/// Spec: §7.6 Implicit Track Sizing <https://www.w3.org/TR/css-grid-2/#auto-tracks>
pub fn initialize_grid_tracks(
    template: &[TrackSizingFunction],
    auto_tracks: &[TrackSizingPair],
    counts: TrackCounts,
    repetitions: u16,
    gap: f32,
) -> Vec<GridTrack> {
    let implicit = |index: usize| -> TrackSizingPair {
        if auto_tracks.is_empty() {
            TrackSizingPair::auto()
        } else {
            auto_tracks[index % auto_tracks.len()].clone()
        }
    };

    let mut sizing = Vec::with_capacity(counts.len());
    let negative = usize::from(counts.negative_implicit);
    let auto_len = auto_tracks.len().max(1);
    for index in 0..negative {
        let from_end = (negative - index) % auto_len;
        sizing.push(implicit((auto_len - from_end) % auto_len));
    }
    for function in template {
        match function {
            TrackSizingFunction::Single(track) => sizing.push(track.clone()),
            TrackSizingFunction::Repeat(repetition, tracks) => {
                let count = match repetition {
                    GridTrackRepetition::Count(count) => *count,
                    GridTrackRepetition::AutoFill | GridTrackRepetition::AutoFit => repetitions,
                };
                for _ in 0..count {
                    sizing.extend(tracks.iter().cloned());
                }
            }
        }
    }
    for index in 0..usize::from(counts.positive_implicit) {
        sizing.push(implicit(index));
    }

    let mut tracks = Vec::with_capacity(sizing.len() * 2 + 1);
    tracks.push(GridTrack::gutter(0.0));
    let last = sizing.len().saturating_sub(1);
    for (index, track) in sizing.into_iter().enumerate() {
        tracks.push(GridTrack::new(track));
        tracks.push(GridTrack::gutter(if index == last { 0.0 } else { gap }));
    }
    tracks
}

#[cfg(test)]
mod tests {
    use trellis_style::MaxTrackSizingFunction;

    use super::*;

    fn fill(tracks: Vec<TrackSizingPair>) -> Vec<TrackSizingFunction> {
        vec![TrackSizingFunction::repeat(GridTrackRepetition::AutoFill, tracks)]
    }

    #[test]
    /// # Panics
    /// Panics if the largest non-overflowing repetition count is wrong.
    fn auto_fill_fits_without_overflow() {
        let template = fill(vec![TrackSizingPair::length(40.0)]);
        let count = auto_repetition_count(
            &template,
            0.0,
            Some(120.0),
            AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow,
        );
        assert_eq!(count, 3);
        assert_eq!(explicit_track_count(&template, count), 3);
    }

    #[test]
    /// # Panics
    /// Panics if a min-size container does not get the smallest overflowing count.
    fn auto_fill_reaches_min_size() {
        let template = fill(vec![TrackSizingPair::length(40.0)]);
        let count = auto_repetition_count(
            &template,
            0.0,
            Some(140.0),
            AutoRepeatStrategy::MinRepetitionsThatDoOverflow,
        );
        assert_eq!(count, 4);
    }

    #[test]
    /// # Panics
    /// Panics if gaps and fixed tracks are not accounted for.
    fn gaps_and_fixed_tracks_reduce_repetitions() {
        let template = vec![
            TrackSizingFunction::Single(TrackSizingPair::length(20.0)),
            TrackSizingFunction::repeat(GridTrackRepetition::AutoFit, vec![TrackSizingPair::length(30.0)]),
        ];
        // 20 + 10 + 30 = 60 for the first repetition, 40 for each further one.
        let count = auto_repetition_count(
            &template,
            10.0,
            Some(150.0),
            AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow,
        );
        assert_eq!(count, 3);
        assert_eq!(auto_fit_lines(&template, count), Some((1, 4)));
    }

    #[test]
    /// # Panics
    /// Panics if huge containers or repeat counts expand past the explicit track limit.
    fn repetitions_saturate_at_the_track_limit() {
        let template = fill(vec![TrackSizingPair::length(1.0), TrackSizingPair::length(1.0)]);
        let count = auto_repetition_count(
            &template,
            0.0,
            Some(300_000.0),
            AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow,
        );
        assert_eq!(count, MAX_EXPLICIT_TRACKS / 2);
        assert_eq!(explicit_track_count(&template, count), MAX_EXPLICIT_TRACKS);
        assert_eq!(explicit_track_count(&template, u16::MAX), MAX_EXPLICIT_TRACKS);

        let counted = vec![
            TrackSizingFunction::repeat(
                GridTrackRepetition::Count(u16::MAX),
                vec![TrackSizingPair::length(1.0); 3],
            ),
            TrackSizingFunction::repeat(GridTrackRepetition::AutoFit, vec![TrackSizingPair::length(1.0)]),
        ];
        let count = auto_repetition_count(
            &counted,
            0.0,
            Some(f32::MAX),
            AutoRepeatStrategy::MinRepetitionsThatDoOverflow,
        );
        assert_eq!(count, 1);
        assert_eq!(explicit_track_count(&counted, count), MAX_EXPLICIT_TRACKS);
        assert_eq!(auto_fit_lines(&counted, count), Some((MAX_GRID_LINE, MAX_GRID_LINE)));
    }

    #[test]
    /// # Panics
    /// Panics if an indefinite container or a non-fixed track repeats more than once.
    fn falls_back_to_one_repetition() {
        let template = fill(vec![TrackSizingPair::length(40.0)]);
        assert_eq!(
            auto_repetition_count(&template, 0.0, None, AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow),
            1
        );
        let flexible = fill(vec![TrackSizingPair::fr(1.0)]);
        assert_eq!(
            auto_repetition_count(&flexible, 0.0, Some(500.0), AutoRepeatStrategy::MaxRepetitionsThatDoNotOverflow),
            1
        );
    }

    #[test]
    /// # Panics
    /// Panics if implicit tracks do not cycle through the auto track list.
    fn implicit_tracks_cycle() {
        let auto_tracks = vec![TrackSizingPair::length(10.0), TrackSizingPair::fr(1.0)];
        let counts = TrackCounts {
            negative_implicit: 1,
            explicit: 0,
            positive_implicit: 3,
        };
        let tracks = initialize_grid_tracks(&[], &auto_tracks, counts, 1, 5.0);
        assert_eq!(tracks.len(), 9);
        assert!(tracks[1].max_track_sizing_function.is_flexible());
        assert!(!tracks[3].max_track_sizing_function.is_flexible());
        assert_eq!(tracks[5].max_track_sizing_function, MaxTrackSizingFunction::Fraction(1.0));
        assert_eq!(tracks[2].max_track_sizing_function.definite_value(None), Some(5.0));
        assert_eq!(tracks[8].max_track_sizing_function.definite_value(None), Some(0.0));
    }
}
