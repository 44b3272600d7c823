//! Grid container and item working types.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>

use core::ops::Range;

use trellis_core::NodeId;
use trellis_style::{
    AbsoluteAxis, AlignItems, Dimension, LengthPercentage, Line, MaxTrackSizingFunction,
    MinTrackSizingFunction, Overflow, Point, Rect, Size, TrackSizingPair,
};

/// A grid line in origin-zero coordinates: line 0 is the start edge of the explicit
/// grid, negative lines lie in the implicit grid before it.
pub type OriginZeroLine = i16;

/// Line numbers and spans are clamped to this distance from the explicit grid's start
/// line, which keeps every line and track count representable.
pub const MAX_GRID_LINE: OriginZeroLine = 10_000;

/// Number of tracks before, inside and after the explicit grid along one axis.
///
/// Spec: §7.5 The Implicit Grid <https://www.w3.org/TR/css-grid-2/#implicit-grids>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackCounts {
    /// Implicit tracks before the explicit grid.
    pub negative_implicit: u16,
    /// Explicit tracks.
    pub explicit: u16,
    /// Implicit tracks after the explicit grid.
    pub positive_implicit: u16,
}

impl TrackCounts {
    /// Total number of tracks.
    #[inline]
    pub const fn len(self) -> usize {
        self.negative_implicit as usize + self.explicit as usize + self.positive_implicit as usize
    }

    /// First line of the implicit grid.
    #[inline]
    pub const fn implicit_start_line(self) -> OriginZeroLine {
        -(self.negative_implicit as i16)
    }

    /// Last line of the implicit grid.
    #[inline]
    pub const fn implicit_end_line(self) -> OriginZeroLine {
        (self.explicit + self.positive_implicit) as i16
    }

    /// Index of the gutter at `line` in a track list with interleaved gutters.
    #[inline]
    pub fn gutter_index(self, line: OriginZeroLine) -> usize {
        2 * (i32::from(line) - i32::from(self.implicit_start_line())).max(0) as usize
    }

    /// Indices (tracks and interior gutters) covered by `lines` in a track list with
    /// interleaved gutters.
    #[inline]
    pub fn track_range(self, lines: Line<OriginZeroLine>) -> Range<usize> {
        (self.gutter_index(lines.start) + 1)..self.gutter_index(lines.end)
    }
}

/// Whether an entry of the track list is a track or the gutter between two tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTrackKind {
    /// A row or column.
    Track,
    /// The gap at a grid line.
    Gutter,
}

/// Working state of one track during track sizing.
///
/// Spec: §12.3 Track Sizing Terminology <https://www.w3.org/TR/css-grid-2/#algo-terms>
#[derive(Debug, Clone)]
pub struct GridTrack {
    /// Track or gutter.
    pub kind: GridTrackKind,
    /// Collapsed `auto-fit` track (or the gutter next to one).
    pub is_collapsed: bool,
    /// Minimum sizing function.
    pub min_track_sizing_function: MinTrackSizingFunction,
    /// Maximum sizing function.
    pub max_track_sizing_function: MaxTrackSizingFunction,
    /// Offset of the track's start edge from the content-box start, set during alignment.
    pub offset: f32,
    /// Base size.
    pub base_size: f32,
    /// Growth limit; infinite until content gives it a value.
    pub growth_limit: f32,
    /// Growth limit went from infinite to finite in the current step.
    pub infinitely_growable: bool,
    /// Pending base size increase for the current span group.
    pub base_size_planned_increase: f32,
    /// Pending growth limit increase for the current span group.
    pub growth_limit_planned_increase: f32,
    /// Increase incurred by the item currently being distributed.
    pub item_incurred_increase: f32,
}

impl GridTrack {
    /// A track with the given sizing functions.
    pub fn new(sizing: TrackSizingPair) -> Self {
        Self::with_functions(GridTrackKind::Track, sizing.min, sizing.max)
    }

    /// A gutter of fixed `size`.
    pub fn gutter(size: f32) -> Self {
        Self::with_functions(
            GridTrackKind::Gutter,
            MinTrackSizingFunction::Fixed(LengthPercentage::Length(size)),
            MaxTrackSizingFunction::Fixed(LengthPercentage::Length(size)),
        )
    }

    fn with_functions(
        kind: GridTrackKind,
        min_track_sizing_function: MinTrackSizingFunction,
        max_track_sizing_function: MaxTrackSizingFunction,
    ) -> Self {
        Self {
            kind,
            is_collapsed: false,
            min_track_sizing_function,
            max_track_sizing_function,
            offset: 0.0,
            base_size: 0.0,
            growth_limit: 0.0,
            infinitely_growable: false,
            base_size_planned_increase: 0.0,
            growth_limit_planned_increase: 0.0,
            item_incurred_increase: 0.0,
        }
    }

    /// Collapse the track to zero size.
    pub fn collapse(&mut self) {
        self.is_collapsed = true;
        self.min_track_sizing_function = MinTrackSizingFunction::Fixed(LengthPercentage::Length(0.0));
        self.max_track_sizing_function = MaxTrackSizingFunction::Fixed(LengthPercentage::Length(0.0));
    }

    /// True for a non-collapsed track (not a gutter).
    #[inline]
    pub const fn is_sizable_track(&self) -> bool {
        matches!(self.kind, GridTrackKind::Track) && !self.is_collapsed
    }

    /// True for a non-collapsed `fr` track.
    #[inline]
    pub const fn is_flexible(&self) -> bool {
        self.is_sizable_track() && self.max_track_sizing_function.is_flexible()
    }

    /// The `fr` factor, zero for other tracks.
    #[inline]
    pub const fn flex_factor(&self) -> f32 {
        if self.is_sizable_track() {
            self.max_track_sizing_function.flex_factor()
        } else {
            0.0
        }
    }

    /// Growth limit with `fit-content` applied, infinite limits kept.
    #[inline]
    pub fn fit_content_limited_growth_limit(&self, axis_size: Option<f32>) -> f32 {
        match self.max_track_sizing_function.fit_content_limit(axis_size) {
            Some(limit) => self.growth_limit.min(limit),
            None => self.growth_limit,
        }
    }

    /// Min function is content based, or a percentage with no size to resolve against.
    #[inline]
    pub fn has_intrinsic_min(&self, axis_size: Option<f32>) -> bool {
        self.min_track_sizing_function.is_intrinsic()
            || self
                .min_track_sizing_function
                .definite_value(axis_size)
                .is_none()
    }

    /// Max function is content based, or a percentage with no size to resolve against.
    #[inline]
    pub fn has_intrinsic_max(&self, axis_size: Option<f32>) -> bool {
        !self.max_track_sizing_function.is_flexible()
            && (self.max_track_sizing_function.is_intrinsic()
                || self
                    .max_track_sizing_function
                    .definite_value(axis_size)
                    .is_none())
    }
}

/// A placed in-flow grid item and the cached results of measuring it.
#[derive(Debug, Clone)]
pub struct GridItem {
    /// The item's node.
    pub node: NodeId,
    /// Source order among the container's children.
    pub order: u32,
    /// Column lines in origin-zero coordinates.
    pub column: Line<OriginZeroLine>,
    /// Row lines in origin-zero coordinates.
    pub row: Line<OriginZeroLine>,
    /// Preferred border-box size.
    pub size: Size<Option<f32>>,
    /// Minimum border-box size.
    pub min_size: Size<Option<f32>>,
    /// Maximum border-box size.
    pub max_size: Size<Option<f32>>,
    /// `min-width`/`min-height` is `auto`.
    pub min_size_is_auto: Size<bool>,
    /// Max size used to cap the minimum contribution of a replaced item.
    pub replaced_max_size: Size<Option<f32>>,
    /// Margins; `None` for `auto`.
    pub margin: Rect<Option<f32>>,
    /// Padding.
    pub padding: Rect<f32>,
    /// Border widths.
    pub border: Rect<f32>,
    /// Scrollbar gutter.
    pub scrollbar_gutter: Size<f32>,
    /// `justify-self` then `align-self`, with the container defaults applied.
    pub alignment: Size<Option<AlignItems>>,
    /// Overflow per axis.
    pub overflow: Point<Overflow>,
    /// Replaced element (compressible minimum contribution).
    pub is_replaced: bool,
    /// Offset from `position: relative`.
    pub relative_offset: Point<f32>,
    /// The item spans at least one `fr` track, per axis.
    pub crosses_flexible_track: Size<bool>,
    /// Cached min-content contribution, per axis.
    pub min_content_contribution: Size<Option<f32>>,
    /// Cached max-content contribution, per axis.
    pub max_content_contribution: Size<Option<f32>>,
    /// Cached minimum contribution, per axis.
    pub minimum_contribution: Size<Option<f32>>,
}

impl GridItem {
    /// Lines occupied along `axis`.
    #[inline]
    pub const fn lines(&self, axis: AbsoluteAxis) -> Line<OriginZeroLine> {
        match axis {
            AbsoluteAxis::Horizontal => self.column,
            AbsoluteAxis::Vertical => self.row,
        }
    }

    /// Number of tracks spanned along `axis`.
    #[inline]
    pub fn span(&self, axis: AbsoluteAxis) -> u16 {
        let lines = self.lines(axis);
        (lines.end - lines.start).max(0) as u16
    }

    /// Sum of the non-auto margins along `axis`.
    #[inline]
    pub fn margin_sum(&self, axis: AbsoluteAxis) -> f32 {
        self.margin.start(axis).unwrap_or(0.0) + self.margin.end(axis).unwrap_or(0.0)
    }

    /// Padding plus border along `axis`.
    #[inline]
    pub fn padding_border_sum(&self, axis: AbsoluteAxis) -> f32 {
        (self.padding + self.border).axis_sum(axis)
    }

    /// True when the item fills its area along `axis`: no preferred size, no `auto`
    /// margins and a stretch (or normal) alignment.
    #[inline]
    pub fn stretches(&self, axis: AbsoluteAxis) -> bool {
        self.size.get(axis).is_none()
            && self.margin.start(axis).is_some()
            && self.margin.end(axis).is_some()
            && matches!(self.alignment.get(axis), None | Some(AlignItems::Stretch))
    }

    /// Forget cached contributions along `axis`.
    pub fn clear_contributions(&mut self, axis: AbsoluteAxis) {
        self.min_content_contribution.set(axis, None);
        self.max_content_contribution.set(axis, None);
        self.minimum_contribution.set(axis, None);
    }
}

/// Max size of a replaced item for capping its minimum contribution: percentages that
/// cannot resolve count as zero.
pub fn replaced_max_size(max_size: &Size<Dimension>, basis: Size<Option<f32>>) -> Size<Option<f32>> {
    let cap = |dimension: &Dimension, axis_basis: Option<f32>| match (dimension, axis_basis) {
        (Dimension::Percent(_) | Dimension::Calc(_), None) => Some(0.0),
        _ => dimension.resolve(axis_basis),
    };
    Size {
        width: cap(&max_size.width, basis.width),
        height: cap(&max_size.height, basis.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if line-to-index translation ignores the negative implicit tracks.
    fn track_range_interleaves_gutters() {
        let counts = TrackCounts {
            negative_implicit: 1,
            explicit: 2,
            positive_implicit: 0,
        };
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.implicit_start_line(), -1);
        assert_eq!(counts.implicit_end_line(), 2);
        assert_eq!(counts.track_range(Line::new(-1, 0)), 1..2);
        assert_eq!(counts.track_range(Line::new(0, 2)), 3..6);
        assert_eq!(counts.gutter_index(2), 6);
    }

    #[test]
    /// # Panics
    /// Panics if unresolvable percentages do not cap replaced items at zero.
    fn replaced_cap_treats_unresolved_percent_as_zero() {
        let max = Size::new(Dimension::percent(0.5), Dimension::length(30.0));
        assert_eq!(
            replaced_max_size(&max, Size::NONE),
            Size::new(Some(0.0), Some(30.0))
        );
        assert_eq!(
            replaced_max_size(&max, Size::new(Some(100.0), None)),
            Size::new(Some(50.0), Some(30.0))
        );
    }
}
