//! Sizing of nodes without children.

use trellis_core::{LayoutInput, LayoutOutput, MeasureFunc, RunMode};
use trellis_layout_util::{MaybeMath as _, resolve_box};
use trellis_style::{AvailableSpace, Dimension, Size, Style};

/// Size a childless node from its style and, when present, its measurement callback.
///
/// The callback sees content-box dimensions; padding, border and scrollbar gutter are
/// added back afterwards. Intrinsic size keywords on the node itself override the
/// available space the callback is given.
pub fn compute_leaf_layout(
    inputs: LayoutInput,
    style: &Style,
    measure: Option<&MeasureFunc>,
) -> LayoutOutput {
    let resolved = resolve_box(style, inputs.parent_size);
    let margin = resolved.margin_or_zero().sum_axes();
    let inset = resolved.content_box_inset_sum();

    let stretched = Size {
        width: stretch_fill(&style.size.width, inputs.available_space.width, margin.width),
        height: stretch_fill(&style.size.height, inputs.available_space.height, margin.height),
    }
    .maybe_clamp(resolved.min_size, resolved.max_size);
    let known = resolved
        .known_dimensions(&inputs)
        .or(stretched)
        .maybe_apply_aspect_ratio(resolved.aspect_ratio);

    if inputs.run_mode == RunMode::ComputeSize && known.both_axis_defined() {
        return LayoutOutput::from_outer_size(known.unwrap_or(Size::ZERO));
    }

    let outer_inset = margin + inset;
    let available_space = Size {
        width: content_available(
            &style.size.width,
            inputs.available_space.width,
            inputs.parent_size.width,
            outer_inset.width,
        ),
        height: content_available(
            &style.size.height,
            inputs.available_space.height,
            inputs.parent_size.height,
            outer_inset.height,
        ),
    };

    let Some(measure) = measure else {
        let size = known
            .unwrap_or(inset.maybe_clamp(resolved.min_size, resolved.max_size))
            .max(inset);
        return LayoutOutput::from_outer_size(size);
    };

    let content_known = known.maybe_sub(inset).map(|value| value.map(|length| length.max(0.0)));
    let measured = measure(content_known, available_space);
    let measured_outer = measured + inset;
    let size = known
        .unwrap_or(measured_outer.maybe_clamp(resolved.min_size, resolved.max_size))
        .max(inset);
    LayoutOutput::from_sizes(size, measured_outer)
}

/// Border-box length of a `stretch` size: the definite space minus the margins.
fn stretch_fill(size: &Dimension, available: AvailableSpace, margin: f32) -> Option<f32> {
    match (size, available) {
        (Dimension::Stretch, AvailableSpace::Definite(space)) => Some((space - margin).max(0.0)),
        _ => None,
    }
}

/// Space handed to the measurement callback along one axis.
fn content_available(
    size: &Dimension,
    available: AvailableSpace,
    basis: Option<f32>,
    outer_inset: f32,
) -> AvailableSpace {
    let shrink = |space: f32| (space - outer_inset).max(0.0);
    match size {
        Dimension::MinContent => AvailableSpace::MinContent,
        Dimension::MaxContent => AvailableSpace::MaxContent,
        Dimension::FitContent(limit) => match (limit.resolve(basis), available) {
            (Some(cap), AvailableSpace::Definite(space)) => AvailableSpace::Definite(shrink(space.min(cap))),
            (Some(cap), _) => AvailableSpace::Definite(shrink(cap)),
            (None, _) => available.map_definite_value(shrink),
        },
        _ => available.map_definite_value(shrink),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use trellis_core::RequestedAxis;
    use trellis_style::{LengthPercentage, LengthPercentageAuto, Rect};

    use super::*;

    fn text_measure() -> MeasureFunc {
        Box::new(|known: Size<Option<f32>>, available: Size<AvailableSpace>| {
            let width = known.width.unwrap_or(match available.width {
                AvailableSpace::MinContent => 20.0,
                AvailableSpace::MaxContent => 80.0,
                AvailableSpace::Definite(space) => space.clamp(20.0, 80.0),
            });
            Size::new(width, known.height.unwrap_or(1600.0 / width))
        })
    }

    #[test]
    /// # Panics
    /// Panics if padding is not added around the measured content.
    fn measured_leaf_includes_padding() {
        let style = Style {
            padding: Rect::uniform(LengthPercentage::length(5.0)),
            ..Style::default()
        };
        let measure = text_measure();
        let output = compute_leaf_layout(
            LayoutInput::perform(Size::NONE, Size::NONE, Size::MAX_CONTENT),
            &style,
            Some(&measure),
        );
        assert_eq!(output.size, Size::new(90.0, 30.0));
    }

    #[test]
    /// # Panics
    /// Panics if a definite style size does not win over the callback.
    fn style_size_wins() {
        let style = Style {
            size: Size::new(Dimension::length(40.0), Dimension::length(10.0)),
            ..Style::default()
        };
        let measure = text_measure();
        let output = compute_leaf_layout(
            LayoutInput::measure(RequestedAxis::Both, Size::MAX_CONTENT, Size::NONE),
            &style,
            Some(&measure),
        );
        assert_eq!(output.size, Size::new(40.0, 10.0));
    }

    #[test]
    /// # Panics
    /// Panics if a `min-content` width does not reach the callback.
    fn intrinsic_keyword_overrides_available_space() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let measure: MeasureFunc =
            Box::new(move |_known: Size<Option<f32>>, available: Size<AvailableSpace>| {
                if let Ok(mut calls) = recorder.lock() {
                    calls.push(available.width);
                }
                Size::new(10.0, 10.0)
            });
        let style = Style {
            size: Size::new(Dimension::MinContent, Dimension::Auto),
            ..Style::default()
        };
        compute_leaf_layout(
            LayoutInput::perform(Size::NONE, Size::NONE, Size::definite(500.0, 500.0)),
            &style,
            Some(&measure),
        );
        let calls = seen.lock().map(|calls| calls.clone()).unwrap_or_default();
        assert_eq!(calls, vec![AvailableSpace::MinContent]);
    }

    #[test]
    /// # Panics
    /// Panics if `stretch` does not fill the definite space minus margins.
    fn stretch_fills_available_space() {
        let style = Style {
            size: Size::new(Dimension::Stretch, Dimension::length(5.0)),
            margin: Rect::new(
                LengthPercentageAuto::length(10.0),
                LengthPercentageAuto::length(10.0),
                LengthPercentageAuto::length(0.0),
                LengthPercentageAuto::length(0.0),
            ),
            ..Style::default()
        };
        let output = compute_leaf_layout(
            LayoutInput::perform(Size::NONE, Size::NONE, Size::definite(200.0, 100.0)),
            &style,
            None,
        );
        assert_eq!(output.size, Size::new(180.0, 5.0));
    }

    #[test]
    /// # Panics
    /// Panics if an empty leaf is not exactly its padding and border.
    fn empty_leaf_is_its_edges() {
        let style = Style {
            border: Rect::uniform(LengthPercentage::length(2.0)),
            ..Style::default()
        };
        let output = compute_leaf_layout(
            LayoutInput::perform(Size::NONE, Size::NONE, Size::MAX_CONTENT),
            &style,
            None,
        );
        assert_eq!(output.size, Size::new(4.0, 4.0));
    }
}
