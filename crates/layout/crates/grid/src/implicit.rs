//! Resolving item placements to lines and estimating the implicit grid.
//!
//! Spec: §8.3 Line-based Placement <https://www.w3.org/TR/css-grid-2/#line-placement>

use trellis_style::{GridPlacement, Line};

use crate::types::{MAX_GRID_LINE, OriginZeroLine, TrackCounts};

/// An item's placement along one axis after line numbers are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPlacement {
    /// Definite lines when at least one end names a line.
    pub lines: Option<Line<OriginZeroLine>>,
    /// Number of tracks spanned; at least 1.
    pub span: u16,
}

/// Convert a 1-based line number (negative counts from the explicit end) to origin-zero.
///
/// Line 0 is invalid and yields `None`. Results are clamped to `±MAX_GRID_LINE`.
pub fn origin_zero_line(line: i16, explicit_track_count: u16) -> Option<OriginZeroLine> {
    let explicit = i32::from(explicit_track_count.min(MAX_GRID_LINE as u16));
    let origin_zero = match line {
        0 => return None,
        1.. => i32::from(line) - 1,
        _ => explicit + 1 + i32::from(line),
    };
    let bound = i32::from(MAX_GRID_LINE);
    Some(origin_zero.clamp(-bound, bound) as OriginZeroLine)
}

/// Resolve `placement` against an explicit grid of `explicit_track_count` tracks.
///
/// Spec: §8.3.1 Grid Placement Conflict Handling
/// <https://www.w3.org/TR/css-grid-2/#grid-placement-errors>
pub fn resolve_placement(
    placement: Line<GridPlacement>,
    explicit_track_count: u16,
) -> ResolvedPlacement {
    let line = |value: GridPlacement| match value {
        GridPlacement::Line(index) => origin_zero_line(index, explicit_track_count),
        GridPlacement::Auto | GridPlacement::Span(_) => None,
    };
    let span_of = |value: GridPlacement| match value {
        GridPlacement::Span(count) => Some(count.clamp(1, MAX_GRID_LINE as u16)),
        GridPlacement::Auto | GridPlacement::Line(_) => None,
    };

    let start = line(placement.start);
    let end = line(placement.end);
    let (lines, span) = match (start, end) {
        (Some(first), Some(second)) => {
            let (low, high) = if first <= second {
                (first, second)
            } else {
                (second, first)
            };
            let high = if high == low { low + 1 } else { high };
            (Some(Line::new(low, high)), (high - low) as u16)
        }
        (Some(first), None) => {
            let span = span_of(placement.end).unwrap_or(1);
            (Some(Line::new(first, first + span as i16)), span)
        }
        (None, Some(last)) => {
            let span = span_of(placement.start).unwrap_or(1);
            (Some(Line::new(last - span as i16, last)), span)
        }
        (None, None) => {
            let span = span_of(placement.start)
                .or_else(|| span_of(placement.end))
                .unwrap_or(1);
            (None, span)
        }
    };
    ResolvedPlacement { lines, span }
}

/// Track counts large enough to hold every definitely placed item and the widest span.
///
/// Placement may still grow the grid; this only gives the occupancy matrix a starting size.
pub fn estimate_implicit_track_counts(
    placements: impl Iterator<Item = ResolvedPlacement>,
    explicit_track_count: u16,
) -> TrackCounts {
    let mut min_line: OriginZeroLine = 0;
    let mut max_line = explicit_track_count as OriginZeroLine;
    let mut max_span = 0u16;
    for placement in placements {
        if let Some(lines) = placement.lines {
            min_line = min_line.min(lines.start);
            max_line = max_line.max(lines.end);
        }
        max_span = max_span.max(placement.span);
    }

    let mut counts = TrackCounts {
        negative_implicit: (-min_line).max(0) as u16,
        explicit: explicit_track_count,
        positive_implicit: (max_line - explicit_track_count as OriginZeroLine).max(0) as u16,
    };
    let total = counts.len() as u16;
    if max_span > total {
        counts.positive_implicit += max_span - total;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if line conflicts are not resolved the way grid placement requires.
    fn placement_conflicts() {
        let swapped = resolve_placement(Line::new(GridPlacement::Line(3), GridPlacement::Line(1)), 3);
        assert_eq!(swapped.lines, Some(Line::new(0, 2)));
        let equal = resolve_placement(Line::new(GridPlacement::Line(2), GridPlacement::Line(2)), 3);
        assert_eq!(equal.lines, Some(Line::new(1, 2)));
        let negative = resolve_placement(Line::new(GridPlacement::Line(-1), GridPlacement::Auto), 3);
        assert_eq!(negative.lines, Some(Line::new(3, 4)));
        let spans = resolve_placement(Line::new(GridPlacement::Span(2), GridPlacement::Span(5)), 3);
        assert_eq!(spans, ResolvedPlacement { lines: None, span: 2 });
        let back = resolve_placement(Line::new(GridPlacement::Span(2), GridPlacement::Line(1)), 3);
        assert_eq!(back.lines, Some(Line::new(-2, 0)));
        let zero = resolve_placement(Line::new(GridPlacement::Line(0), GridPlacement::Auto), 3);
        assert_eq!(zero.lines, None);
    }

    #[test]
    /// # Panics
    /// Panics if extreme line numbers or spans escape the representable range.
    fn extreme_lines_are_clamped() {
        assert_eq!(origin_zero_line(i16::MAX, 3), Some(MAX_GRID_LINE));
        assert_eq!(origin_zero_line(i16::MIN, 3), Some(-MAX_GRID_LINE));
        assert_eq!(origin_zero_line(-1, u16::MAX), Some(MAX_GRID_LINE));
        let far = resolve_placement(Line::new(GridPlacement::Line(i16::MAX), GridPlacement::Span(u16::MAX)), 3);
        assert_eq!(far.lines, Some(Line::new(MAX_GRID_LINE, 2 * MAX_GRID_LINE)));
        let before = resolve_placement(Line::new(GridPlacement::Span(u16::MAX), GridPlacement::Line(i16::MIN)), 3);
        assert_eq!(before.lines, Some(Line::new(-2 * MAX_GRID_LINE, -MAX_GRID_LINE)));
    }

    #[test]
    /// # Panics
    /// Panics if the implicit grid estimate misses out-of-range lines or wide spans.
    fn estimate_covers_items() {
        let placements = [
            resolve_placement(Line::new(GridPlacement::Span(2), GridPlacement::Line(1)), 2),
            resolve_placement(Line::new(GridPlacement::Line(4), GridPlacement::Auto), 2),
        ];
        let counts = estimate_implicit_track_counts(placements.into_iter(), 2);
        assert_eq!(
            counts,
            TrackCounts {
                negative_implicit: 2,
                explicit: 2,
                positive_implicit: 2,
            }
        );

        let wide = [resolve_placement(Line::from_span(5), 1)];
        assert_eq!(estimate_implicit_track_counts(wide.into_iter(), 1).positive_implicit, 4);
    }
}
