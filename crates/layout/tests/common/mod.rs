//! Fixtures shared by the layout integration tests.
#![allow(dead_code, reason = "every test binary uses a different subset")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use trellis_layout::{AvailableSpace, Dimension, MeasureFunc, Size, Style};

/// Tolerance for comparing unrounded geometry.
pub const EPSILON: f32 = 0.001;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A style with a definite border-box size.
pub fn fixed(width: f32, height: f32) -> Style {
    Style {
        size: Size::new(Dimension::length(width), Dimension::length(height)),
        ..Style::default()
    }
}

/// A measurement callback behaving like a line of text: `width` wide at max-content,
/// wrapping to `width / 4` at min-content, `height` tall per line. Every call is counted.
pub fn text_measure(width: f32, height: f32, calls: &Arc<AtomicUsize>) -> MeasureFunc {
    let counter = Arc::clone(calls);
    Box::new(move |known: Size<Option<f32>>, available: Size<AvailableSpace>| {
        counter.fetch_add(1, Ordering::Relaxed);
        let narrowest = width / 4.0;
        let used_width = known.width.unwrap_or(match available.width {
            AvailableSpace::MinContent => narrowest,
            AvailableSpace::MaxContent => width,
            AvailableSpace::Definite(space) => space.clamp(narrowest, width),
        });
        let lines = (width / used_width.max(1.0)).ceil();
        Size::new(used_width, known.height.unwrap_or(lines * height))
    })
}

/// A measurement callback with a fixed intrinsic size, like an image.
pub fn image_measure(width: f32, height: f32) -> MeasureFunc {
    Box::new(move |known: Size<Option<f32>>, _: Size<AvailableSpace>| {
        Size::new(known.width.unwrap_or(width), known.height.unwrap_or(height))
    })
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::Relaxed)
}
