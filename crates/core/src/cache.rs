//! Per-node measurement cache.
//!
//! Sizing-only results are kept in a small fixed table whose slot is picked from a
//! coarse classification of the request: which dimensions are already known and
//! whether each unknown axis is under a min-content constraint. The single
//! perform-layout result is kept separately since children's stored layouts always
//! correspond to the most recent one.

use trellis_style::{AvailableSpace, Size};

use crate::layout::{LayoutOutput, RunMode};

/// Number of sizing slots.
const MEASURE_SLOTS: usize = 9;

/// One cached result and the inputs it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheEntry<T> {
    /// Known dimensions of the request.
    known_dimensions: Size<Option<f32>>,
    /// Available space of the request.
    available_space: Size<AvailableSpace>,
    /// Computed result.
    content: T,
}

impl<T: Copy> CacheEntry<T> {
    /// True when this entry answers a request for `known_dimensions` under `available_space`.
    ///
    /// A known dimension also matches when it equals the size the entry produced, and
    /// available space only matters on axes whose size is not already known.
    fn matches(
        &self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        produced: Size<f32>,
    ) -> bool {
        let width_ok = known_dimensions.width == self.known_dimensions.width
            || known_dimensions.width == Some(produced.width);
        let height_ok = known_dimensions.height == self.known_dimensions.height
            || known_dimensions.height == Some(produced.height);
        let width_space_ok = known_dimensions.width.is_some()
            || self.available_space.width.is_roughly_equal(available_space.width);
        let height_space_ok = known_dimensions.height.is_some()
            || self.available_space.height.is_roughly_equal(available_space.height);
        width_ok && height_ok && width_space_ok && height_space_ok
    }
}

/// Cached sizing and layout results of one node.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    /// Result of the last perform-layout call.
    final_layout_entry: Option<CacheEntry<LayoutOutput>>,
    /// Results of compute-size calls, one per request class.
    measure_entries: [Option<CacheEntry<Size<f32>>>; MEASURE_SLOTS],
}

impl Cache {
    /// An empty cache.
    pub const fn new() -> Self {
        Self {
            final_layout_entry: None,
            measure_entries: [None; MEASURE_SLOTS],
        }
    }

    /// Slot for a sizing request.
    ///
    /// Both known: slot 0. Width known: 1-2 by the height constraint. Height known: 3-4
    /// by the width constraint. Neither: 5-8 by both constraints.
    fn slot(known_dimensions: Size<Option<f32>>, available_space: Size<AvailableSpace>) -> usize {
        let width_is_min = available_space.width.is_min_content();
        let height_is_min = available_space.height.is_min_content();
        match (known_dimensions.width.is_some(), known_dimensions.height.is_some()) {
            (true, true) => 0,
            (true, false) => 1 + usize::from(height_is_min),
            (false, true) => 3 + usize::from(width_is_min),
            (false, false) => match (width_is_min, height_is_min) {
                (false, false) => 5,
                (false, true) => 6,
                (true, false) => 7,
                (true, true) => 8,
            },
        }
    }

    /// Look up a previous result for an identical request.
    pub fn get(
        &self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
    ) -> Option<LayoutOutput> {
        match run_mode {
            RunMode::PerformLayout => self
                .final_layout_entry
                .filter(|entry| entry.matches(known_dimensions, available_space, entry.content.size))
                .map(|entry| entry.content),
            RunMode::ComputeSize => {
                let from_measure = self.measure_entries.iter().flatten().find(|entry| {
                    entry.matches(known_dimensions, available_space, entry.content)
                });
                from_measure
                    .map(|entry| LayoutOutput::from_outer_size(entry.content))
                    .or_else(|| {
                        // A full layout also answers sizing questions for the same inputs.
                        self.final_layout_entry
                            .filter(|entry| {
                                entry.matches(known_dimensions, available_space, entry.content.size)
                            })
                            .map(|entry| entry.content)
                    })
            }
        }
    }

    /// Store a result.
    pub fn store(
        &mut self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
        output: LayoutOutput,
    ) {
        match run_mode {
            RunMode::PerformLayout => {
                self.final_layout_entry = Some(CacheEntry {
                    known_dimensions,
                    available_space,
                    content: output,
                });
            }
            RunMode::ComputeSize => {
                let slot = Self::slot(known_dimensions, available_space);
                if let Some(entry) = self.measure_entries.get_mut(slot) {
                    *entry = Some(CacheEntry {
                        known_dimensions,
                        available_space,
                        content: output.size,
                    });
                }
            }
        }
    }

    /// Forget every result.
    pub fn clear(&mut self) {
        self.final_layout_entry = None;
        self.measure_entries = [None; MEASURE_SLOTS];
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.final_layout_entry.is_none() && self.measure_entries.iter().all(Option::is_none)
    }
}
