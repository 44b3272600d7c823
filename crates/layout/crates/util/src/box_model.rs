//! Resolution of a box's size constraints and edges from its style.
//!
//! Spec: CSS Box Sizing Module Level 3 <https://www.w3.org/TR/css-sizing-3/>

use trellis_core::{LayoutInput, SizingMode};
use trellis_style::{BoxSizing, Point, Rect, Size, Style};

use crate::maybe_math::MaybeMath as _;

/// Sizes and edges of one box, resolved against its containing block.
///
/// All sizes describe the border box regardless of `box-sizing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBox {
    /// Preferred size, with the aspect ratio applied.
    pub size: Size<Option<f32>>,
    /// Minimum size; never smaller than padding plus border.
    pub min_size: Size<Option<f32>>,
    /// Maximum size.
    pub max_size: Size<Option<f32>>,
    /// Margins; `None` for `auto`.
    pub margin: Rect<Option<f32>>,
    /// Padding.
    pub padding: Rect<f32>,
    /// Border widths.
    pub border: Rect<f32>,
    /// Space reserved for scrollbars.
    pub scrollbar_gutter: Size<f32>,
    /// Preferred `width / height` ratio.
    pub aspect_ratio: Option<f32>,
}

impl ResolvedBox {
    /// Padding plus border on every edge.
    #[inline]
    pub fn padding_border(&self) -> Rect<f32> {
        self.padding + self.border
    }

    /// Padding, border and scrollbar gutter summed per axis.
    #[inline]
    pub fn content_box_inset_sum(&self) -> Size<f32> {
        self.padding_border().sum_axes() + self.scrollbar_gutter
    }

    /// Offset of the content box from the border-box origin.
    #[inline]
    pub fn content_box_origin(&self) -> Point<f32> {
        let edges = self.padding_border();
        Point::new(edges.left, edges.top)
    }

    /// Margins with `auto` resolved to zero.
    #[inline]
    pub fn margin_or_zero(&self) -> Rect<f32> {
        self.margin.map(|edge| edge.unwrap_or(0.0))
    }

    /// `size` clamped by `min_size`/`max_size`.
    #[inline]
    pub fn clamped_size(&self) -> Size<Option<f32>> {
        self.size.maybe_clamp(self.min_size, self.max_size)
    }

    /// Border-box dimensions fixed before any content is looked at.
    ///
    /// The caller's known dimensions win, then a min size at least as large as the max
    /// size, then the clamped style size when `inputs` asks for the inherent size.
    /// Never smaller than padding plus border.
    pub fn known_dimensions(&self, inputs: &LayoutInput) -> Size<Option<f32>> {
        let styled = match inputs.sizing_mode {
            SizingMode::InherentSize => self.clamped_size(),
            SizingMode::ContentSize => Size::NONE,
        };
        let pinned = self.min_size.zip_map(self.max_size, |min, max| match (min, max) {
            (Some(min_size), Some(max_size)) if max_size <= min_size => Some(min_size),
            _ => None,
        });
        inputs
            .known_dimensions
            .or(pinned.or(styled).maybe_max(self.padding_border().sum_axes()))
    }
}

/// Resolve `style` against a containing block of `parent_size`.
///
/// Edge percentages resolve against the containing block width. Under
/// `box-sizing: content-box` padding and border are added to every definite size.
pub fn resolve_box(style: &Style, parent_size: Size<Option<f32>>) -> ResolvedBox {
    let padding = style.padding.resolve_or_zero(parent_size.width);
    let border = style.border.resolve_or_zero(parent_size.width);
    let padding_border_sum = (padding + border).sum_axes();
    let box_sizing_adjustment = match style.box_sizing {
        BoxSizing::BorderBox => Size::ZERO,
        BoxSizing::ContentBox => padding_border_sum,
    };
    let aspect_ratio = style.aspect_ratio;

    let size = style
        .size
        .resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);
    let min_size = style
        .min_size
        .resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);
    let max_size = style
        .max_size
        .resolve(parent_size)
        .maybe_apply_aspect_ratio(aspect_ratio)
        .maybe_add(box_sizing_adjustment);

    ResolvedBox {
        size,
        min_size: min_size.zip_map(padding_border_sum, floor_min_size),
        max_size,
        margin: style.margin.resolve(parent_size.width),
        padding,
        border,
        scrollbar_gutter: style.scrollbar_gutter(),
        aspect_ratio,
    }
}

/// A border box is never smaller than its padding plus border.
fn floor_min_size(specified: Option<f32>, padding_border: f32) -> Option<f32> {
    match specified {
        Some(value) => Some(value.max(padding_border)),
        None => (padding_border > 0.0).then_some(padding_border),
    }
}

/// Offset applied to a relatively positioned box after layout.
///
/// `left` wins over `right` and `top` over `bottom`; percentages resolve per axis.
pub fn relative_offset(style: &Style, parent_size: Size<Option<f32>>) -> Point<f32> {
    let inset = style.inset.resolve_per_axis(parent_size);
    Point {
        x: inset.left.or_else(|| inset.right.map(|right| -right)).unwrap_or(0.0),
        y: inset.top.or_else(|| inset.bottom.map(|bottom| -bottom)).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::RequestedAxis;
    use trellis_style::{Dimension, LengthPercentage, LengthPercentageAuto};

    use super::*;

    #[test]
    /// # Panics
    /// Panics if content-box sizing does not add padding and border.
    fn content_box_adds_edges() {
        let style = Style {
            box_sizing: BoxSizing::ContentBox,
            size: Size::new(Dimension::length(100.0), Dimension::Auto),
            padding: Rect::uniform(LengthPercentage::length(10.0)),
            border: Rect::uniform(LengthPercentage::length(1.0)),
            ..Style::default()
        };
        let resolved = resolve_box(&style, Size::NONE);
        assert_eq!(resolved.size.width, Some(122.0));
        assert_eq!(resolved.size.height, None);
        assert_eq!(resolved.min_size.height, Some(22.0));
        assert_eq!(resolved.content_box_origin(), Point::new(11.0, 11.0));
    }

    #[test]
    /// # Panics
    /// Panics if an unconstrained box gets a spurious minimum size.
    fn no_edges_means_no_minimum() {
        let resolved = resolve_box(&Style::default(), Size::from_definite(100.0, 100.0));
        assert_eq!(resolved.min_size, Size::NONE);
        assert_eq!(resolved.margin_or_zero(), Rect::ZERO);
    }

    #[test]
    /// # Panics
    /// Panics if known dimensions ignore the caller, min/max pinning or sizing mode.
    fn known_dimensions_precedence() {
        let style = Style {
            size: Size::new(Dimension::length(300.0), Dimension::Auto),
            min_size: Size::new(Dimension::Auto, Dimension::length(40.0)),
            max_size: Size::new(Dimension::length(250.0), Dimension::length(30.0)),
            ..Style::default()
        };
        let resolved = resolve_box(&style, Size::NONE);
        let inherent = LayoutInput::measure(RequestedAxis::Both, Size::MAX_CONTENT, Size::NONE);
        assert_eq!(resolved.known_dimensions(&inherent), Size::new(Some(250.0), Some(40.0)));
        let content = LayoutInput {
            sizing_mode: SizingMode::ContentSize,
            ..inherent
        };
        assert_eq!(resolved.known_dimensions(&content), Size::new(None, Some(40.0)));
        let fixed = LayoutInput {
            known_dimensions: Size::new(Some(10.0), None),
            ..inherent
        };
        assert_eq!(resolved.known_dimensions(&fixed).width, Some(10.0));
    }

    #[test]
    /// # Panics
    /// Panics if relative offsets ignore precedence.
    fn relative_offset_precedence() {
        let style = Style {
            inset: Rect::new(
                LengthPercentageAuto::length(5.0),
                LengthPercentageAuto::length(50.0),
                LengthPercentageAuto::Auto,
                LengthPercentageAuto::percent(0.1),
            ),
            ..Style::default()
        };
        let offset = relative_offset(&style, Size::from_definite(200.0, 100.0));
        assert_eq!(offset, Point::new(5.0, -10.0));
    }
}
