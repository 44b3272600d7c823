//! Grid container and item properties.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>

use crate::geometry::{AbsoluteAxis, Line};
use crate::values::LengthPercentage;

/// Auto-placement algorithm direction.
///
/// Spec: §7.7 The Implicit Grid: the grid-auto-flow property
/// <https://www.w3.org/TR/css-grid-2/#grid-auto-flow-property>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GridAutoFlow {
    /// Fill rows first.
    #[default]
    Row,
    /// Fill columns first.
    Column,
    /// Fill rows first, backfilling holes.
    RowDense,
    /// Fill columns first, backfilling holes.
    ColumnDense,
}

impl GridAutoFlow {
    /// True for the `dense` variants.
    #[inline]
    pub const fn is_dense(self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }

    /// Axis along which the placement cursor advances (columns for row flow).
    #[inline]
    pub const fn primary_axis(self) -> AbsoluteAxis {
        match self {
            Self::Row | Self::RowDense => AbsoluteAxis::Horizontal,
            Self::Column | Self::ColumnDense => AbsoluteAxis::Vertical,
        }
    }
}

/// One end of an item's placement (`grid-row-start` etc.).
///
/// Spec: §8.3 Line-based Placement <https://www.w3.org/TR/css-grid-2/#line-placement>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GridPlacement {
    /// Placed by the auto-placement algorithm.
    #[default]
    Auto,
    /// A line number; negative numbers count back from the explicit end. Zero is invalid and treated as `Auto`.
    Line(i16),
    /// Span this many tracks.
    Span(u16),
}

impl GridPlacement {
    /// `Line(index)`.
    #[inline]
    pub const fn line(index: i16) -> Self {
        Self::Line(index)
    }

    /// `Span(count)`.
    #[inline]
    pub const fn span(count: u16) -> Self {
        Self::Span(count)
    }
}

impl Line<GridPlacement> {
    /// Placement starting at `start` and spanning one track.
    #[inline]
    pub const fn from_line(start: i16) -> Self {
        Self {
            start: GridPlacement::Line(start),
            end: GridPlacement::Auto,
        }
    }

    /// Auto-placed, spanning `count` tracks.
    #[inline]
    pub const fn from_span(count: u16) -> Self {
        Self {
            start: GridPlacement::Span(count),
            end: GridPlacement::Auto,
        }
    }
}

/// Minimum track sizing function.
///
/// Spec: §7.2.1 Track Sizing Functions <https://www.w3.org/TR/css-grid-2/#track-sizing>
#[derive(Debug, Clone, PartialEq)]
pub enum MinTrackSizingFunction {
    /// Fixed length or percentage of the grid container.
    Fixed(LengthPercentage),
    /// Largest min-content contribution.
    MinContent,
    /// Largest max-content contribution.
    MaxContent,
    /// Largest minimum contribution.
    Auto,
}

impl MinTrackSizingFunction {
    /// Fixed value resolved against `container_size`, if any.
    #[inline]
    pub fn definite_value(&self, container_size: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(value) => value.resolve(container_size),
            Self::MinContent | Self::MaxContent | Self::Auto => None,
        }
    }

    /// True for the content-based variants.
    #[inline]
    pub const fn is_intrinsic(&self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::Auto)
    }
}

/// Maximum track sizing function.
///
/// Spec: §7.2.1 Track Sizing Functions <https://www.w3.org/TR/css-grid-2/#track-sizing>
#[derive(Debug, Clone, PartialEq)]
pub enum MaxTrackSizingFunction {
    /// Fixed length or percentage of the grid container.
    Fixed(LengthPercentage),
    /// Largest min-content contribution.
    MinContent,
    /// Largest max-content contribution.
    MaxContent,
    /// `fit-content(limit)`: max-content clamped to the limit.
    FitContent(LengthPercentage),
    /// Largest max-content contribution; stretchable by content alignment.
    Auto,
    /// Flexible `fr` share of the leftover space.
    Fraction(f32),
}

impl MaxTrackSizingFunction {
    /// Fixed value resolved against `container_size`, if any.
    #[inline]
    pub fn definite_value(&self, container_size: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(value) => value.resolve(container_size),
            Self::MinContent
            | Self::MaxContent
            | Self::FitContent(_)
            | Self::Auto
            | Self::Fraction(_) => None,
        }
    }

    /// True for the content-based variants.
    #[inline]
    pub const fn is_intrinsic(&self) -> bool {
        matches!(
            self,
            Self::MinContent | Self::MaxContent | Self::FitContent(_) | Self::Auto
        )
    }

    /// True for variants whose growth limit follows max-content contributions.
    #[inline]
    pub const fn is_max_content_alike(&self) -> bool {
        matches!(self, Self::MaxContent | Self::FitContent(_) | Self::Auto)
    }

    /// True for `fr` tracks.
    #[inline]
    pub const fn is_flexible(&self) -> bool {
        matches!(self, Self::Fraction(_))
    }

    /// The `fr` factor, zero for non-flexible tracks.
    #[inline]
    pub const fn flex_factor(&self) -> f32 {
        match self {
            Self::Fraction(factor) => *factor,
            _ => 0.0,
        }
    }

    /// The resolved `fit-content` limit, if this is a `fit-content` track.
    #[inline]
    pub fn fit_content_limit(&self, container_size: Option<f32>) -> Option<f32> {
        match self {
            Self::FitContent(limit) => limit.resolve(container_size),
            _ => None,
        }
    }
}

/// A single `minmax(min, max)` track definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSizingPair {
    /// Minimum sizing function.
    pub min: MinTrackSizingFunction,
    /// Maximum sizing function.
    pub max: MaxTrackSizingFunction,
}

/// A track definition that is not a `repeat()`.
pub type NonRepeatedTrackSizingFunction = TrackSizingPair;

impl TrackSizingPair {
    /// `minmax(min, max)`.
    #[inline]
    pub const fn minmax(min: MinTrackSizingFunction, max: MaxTrackSizingFunction) -> Self {
        Self { min, max }
    }

    /// A fixed pixel track.
    #[inline]
    pub const fn length(value: f32) -> Self {
        Self {
            min: MinTrackSizingFunction::Fixed(LengthPercentage::Length(value)),
            max: MaxTrackSizingFunction::Fixed(LengthPercentage::Length(value)),
        }
    }

    /// A track sized as a fraction of the container.
    #[inline]
    pub const fn percent(fraction: f32) -> Self {
        Self {
            min: MinTrackSizingFunction::Fixed(LengthPercentage::Percent(fraction)),
            max: MaxTrackSizingFunction::Fixed(LengthPercentage::Percent(fraction)),
        }
    }

    /// `<flex>` track, equivalent to `minmax(auto, <flex>)`.
    #[inline]
    pub const fn fr(factor: f32) -> Self {
        Self {
            min: MinTrackSizingFunction::Auto,
            max: MaxTrackSizingFunction::Fraction(factor),
        }
    }

    /// `auto` track.
    #[inline]
    pub const fn auto() -> Self {
        Self {
            min: MinTrackSizingFunction::Auto,
            max: MaxTrackSizingFunction::Auto,
        }
    }

    /// `min-content` track.
    #[inline]
    pub const fn min_content() -> Self {
        Self {
            min: MinTrackSizingFunction::MinContent,
            max: MaxTrackSizingFunction::MinContent,
        }
    }

    /// `max-content` track.
    #[inline]
    pub const fn max_content() -> Self {
        Self {
            min: MinTrackSizingFunction::MaxContent,
            max: MaxTrackSizingFunction::MaxContent,
        }
    }

    /// `fit-content(limit)` track, equivalent to `minmax(auto, fit-content(limit))`.
    #[inline]
    pub const fn fit_content(limit: LengthPercentage) -> Self {
        Self {
            min: MinTrackSizingFunction::Auto,
            max: MaxTrackSizingFunction::FitContent(limit),
        }
    }

    /// True when either sizing function is a fixed length or percentage.
    #[inline]
    pub const fn has_fixed_component(&self) -> bool {
        matches!(self.min, MinTrackSizingFunction::Fixed(_))
            || matches!(self.max, MaxTrackSizingFunction::Fixed(_))
    }

    /// Size this track would occupy when counting auto-repeat repetitions.
    ///
    /// The max function wins when definite; both resolved means the larger of the two.
    pub fn repetition_size(&self, container_size: Option<f32>) -> f32 {
        let min = self.min.definite_value(container_size);
        let max = self.max.definite_value(container_size);
        match (min, max) {
            (Some(min_size), Some(max_size)) => max_size.max(min_size),
            (Some(min_size), None) => min_size,
            (None, Some(max_size)) => max_size,
            (None, None) => 0.0,
        }
    }
}

impl Default for TrackSizingPair {
    fn default() -> Self {
        Self::auto()
    }
}

/// Repetition count of a `repeat()`.
///
/// Spec: §7.2.3 Repeating Rows and Columns <https://www.w3.org/TR/css-grid-2/#repeat-notation>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridTrackRepetition {
    /// As many repetitions as fit; empty tracks are kept.
    AutoFill,
    /// As many repetitions as fit; empty tracks collapse.
    AutoFit,
    /// A fixed number of repetitions.
    Count(u16),
}

impl GridTrackRepetition {
    /// True for `auto-fill` and `auto-fit`.
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::AutoFill | Self::AutoFit)
    }
}

/// One entry of `grid-template-rows`/`grid-template-columns`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSizingFunction {
    /// A single track.
    Single(NonRepeatedTrackSizingFunction),
    /// A `repeat()` of one or more tracks.
    Repeat(GridTrackRepetition, Vec<NonRepeatedTrackSizingFunction>),
}

impl TrackSizingFunction {
    /// `repeat(repetition, tracks)`.
    #[inline]
    pub const fn repeat(
        repetition: GridTrackRepetition,
        tracks: Vec<NonRepeatedTrackSizingFunction>,
    ) -> Self {
        Self::Repeat(repetition, tracks)
    }

    /// True for `repeat(auto-fill | auto-fit, ...)`.
    #[inline]
    pub const fn is_auto_repetition(&self) -> bool {
        matches!(self, Self::Repeat(repetition, _) if repetition.is_auto())
    }

    /// True when every contained track has a fixed component.
    pub fn has_fixed_component(&self) -> bool {
        match self {
            Self::Single(track) => track.has_fixed_component(),
            Self::Repeat(_, tracks) => tracks.iter().all(TrackSizingPair::has_fixed_component),
        }
    }
}

impl From<TrackSizingPair> for TrackSizingFunction {
    fn from(track: TrackSizingPair) -> Self {
        Self::Single(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if track helpers build the wrong sizing functions.
    fn track_constructors() {
        let flexible = TrackSizingPair::fr(2.0);
        assert!(flexible.max.is_flexible());
        assert_eq!(flexible.max.flex_factor(), 2.0);
        assert!(!flexible.has_fixed_component());
        assert!(TrackSizingPair::length(40.0).has_fixed_component());
        assert_eq!(TrackSizingPair::percent(0.5).repetition_size(Some(300.0)), 150.0);
        assert_eq!(TrackSizingPair::auto().repetition_size(Some(300.0)), 0.0);
    }

    #[test]
    /// # Panics
    /// Panics if repetition classification is wrong.
    fn repetition_classification() {
        let auto_fill = TrackSizingFunction::repeat(
            GridTrackRepetition::AutoFill,
            vec![TrackSizingPair::length(40.0)],
        );
        assert!(auto_fill.is_auto_repetition());
        assert!(auto_fill.has_fixed_component());
        let counted = TrackSizingFunction::repeat(
            GridTrackRepetition::Count(2),
            vec![TrackSizingPair::auto()],
        );
        assert!(!counted.is_auto_repetition());
        assert_eq!(GridAutoFlow::ColumnDense.primary_axis(), AbsoluteAxis::Vertical);
    }
}
