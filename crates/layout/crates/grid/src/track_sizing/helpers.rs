//! Item contributions and other measurements shared by the sizing steps.
//!
//! Spec: §12.3 <https://www.w3.org/TR/css-grid-2/#min-size-contribution>

use trellis_layout_util::{LayoutHost, MaybeMath as _};
use trellis_style::{AbsoluteAxis, AvailableSpace, Line, Size};

use crate::types::{GridItem, GridTrack, OriginZeroLine, TrackCounts};

/// Size of the area between `lines`, interior gutters included.
pub fn spanned_size(tracks: &[GridTrack], counts: TrackCounts, lines: Line<OriginZeroLine>) -> f32 {
    tracks
        .get(counts.track_range(lines))
        .unwrap_or_default()
        .iter()
        .map(|track| track.base_size)
        .sum()
}

/// What an item is measured against while sizing one axis.
#[derive(Debug, Clone, Copy)]
pub struct MeasureContext<'tracks> {
    /// Axis being sized.
    pub axis: AbsoluteAxis,
    /// Track counts along `axis`.
    pub counts: TrackCounts,
    /// Inner size of the container along `axis`, when known.
    pub axis_inner_size: Option<f32>,
    /// Percentage basis for the items.
    pub inner_known: Size<Option<f32>>,
    /// Available space of the grid on both axes.
    pub available_grid_space: Size<AvailableSpace>,
    /// Tracks of the other axis, once sized.
    pub other_axis: Option<(&'tracks [GridTrack], TrackCounts)>,
}

impl MeasureContext<'_> {
    /// Known size and available space of `item` on the other axis.
    fn other_axis_constraint(&self, item: &GridItem) -> (Option<f32>, AvailableSpace) {
        let other = self.axis.other();
        match self.other_axis {
            Some((tracks, counts)) => {
                let area = spanned_size(tracks, counts, item.lines(other));
                let stretched = item
                    .stretches(other)
                    .then(|| (area - item.margin_sum(other)).max(0.0));
                let known = item
                    .size
                    .get(other)
                    .or(stretched)
                    .maybe_clamp(item.min_size.get(other), item.max_size.get(other));
                (known, AvailableSpace::Definite(area))
            }
            None => (item.size.get(other), self.available_grid_space.get(other)),
        }
    }

    /// Border-box size of `item` along the sized axis under `constraint`.
    fn measure(&self, tree: &mut impl LayoutHost, item: &GridItem, constraint: AvailableSpace) -> f32 {
        let (known_other, available_other) = self.other_axis_constraint(item);
        let mut known = Size::NONE;
        known.set(self.axis.other(), known_other);
        let mut available = Size::MAX_CONTENT;
        available.set(self.axis, constraint);
        available.set(self.axis.other(), available_other);
        tree.measure_child_size(item.node, known, self.inner_known, available, self.axis)
    }

    /// Outer min-content size of `item`.
    pub fn min_content_contribution(&self, tree: &mut impl LayoutHost, item: &mut GridItem) -> f32 {
        if let Some(cached) = item.min_content_contribution.get(self.axis) {
            return cached;
        }
        let value = self.measure(tree, item, AvailableSpace::MinContent) + item.margin_sum(self.axis);
        item.min_content_contribution.set(self.axis, Some(value));
        value
    }

    /// Outer max-content size of `item`.
    pub fn max_content_contribution(&self, tree: &mut impl LayoutHost, item: &mut GridItem) -> f32 {
        if let Some(cached) = item.max_content_contribution.get(self.axis) {
            return cached;
        }
        let value = self.measure(tree, item, AvailableSpace::MaxContent) + item.margin_sum(self.axis);
        item.max_content_contribution.set(self.axis, Some(value));
        value
    }

    /// Outer size of `item` at its minimum size.
    ///
    /// An `auto` minimum resolves to the content-based minimum: the smaller of the
    /// preferred size and the min-content size, capped by the max size and, when every
    /// spanned track has a fixed maximum, by the span's size. Replaced items are also
    /// capped by their max size with unresolvable percentages counting as zero. Scroll
    /// containers have no content-based minimum.
    ///
    /// Spec: §6.6 <https://www.w3.org/TR/css-grid-2/#min-size-auto>
    pub fn minimum_contribution(
        &self,
        tree: &mut impl LayoutHost,
        item: &mut GridItem,
        tracks: &[GridTrack],
    ) -> f32 {
        let axis = self.axis;
        if let Some(cached) = item.minimum_contribution.get(axis) {
            return cached;
        }
        let padding_border = item.padding_border_sum(axis);
        let is_auto = item.min_size_is_auto.get(axis);
        let is_scroll_container = item.overflow.get(axis).is_scroll_container();
        let border_box = if is_auto && is_scroll_container {
            padding_border
        } else if is_auto {
            let min_content = self.min_content_contribution(tree, item) - item.margin_sum(axis);
            let replaced_cap = if item.is_replaced {
                item.replaced_max_size.get(axis)
            } else {
                None
            };
            item.size
                .get(axis)
                .map_or(min_content, |size| size.min(min_content))
                .maybe_min(item.max_size.get(axis))
                .maybe_min(replaced_cap)
                .maybe_min(self.fixed_span_limit(item, tracks))
                .max(padding_border)
        } else {
            item.min_size.get(axis).unwrap_or(0.0)
        };
        let value = border_box + item.margin_sum(axis);
        item.minimum_contribution.set(axis, Some(value));
        value
    }

    /// Sum of the spanned tracks' maximums when all of them are fixed.
    fn fixed_span_limit(&self, item: &GridItem, tracks: &[GridTrack]) -> Option<f32> {
        let spanned = tracks.get(self.counts.track_range(item.lines(self.axis)))?;
        spanned.iter().try_fold(0.0f32, |total, track| {
            let limit = track
                .max_track_sizing_function
                .definite_value(self.axis_inner_size)?;
            Some(total + limit)
        })
    }
}
