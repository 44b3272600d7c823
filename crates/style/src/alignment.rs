//! Box alignment properties.
//!
//! Spec: CSS Box Alignment Module Level 3
//! <https://www.w3.org/TR/css-align-3/>

/// Self-alignment of items in their alignment container (`align-items`, `align-self`,
/// `justify-items`, `justify-self`).
///
/// Spec: §6 <https://www.w3.org/TR/css-align-3/#self-alignment>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignItems {
    /// Start edge of the alignment container.
    Start,
    /// End edge of the alignment container.
    End,
    /// Flex cross-start (equivalent to `Start` outside flex layout).
    FlexStart,
    /// Flex cross-end (equivalent to `End` outside flex layout).
    FlexEnd,
    /// Centered.
    Center,
    /// First baseline; treated as `Start` since text is measured externally.
    Baseline,
    /// Auto-sized items fill the container.
    Stretch,
}

/// `align-self`; overrides the parent's `align-items`.
pub type AlignSelf = AlignItems;
/// `justify-items` (grid only).
pub type JustifyItems = AlignItems;
/// `justify-self` (grid only).
pub type JustifySelf = AlignItems;

impl AlignItems {
    /// Offset of an item of `free_space` slack from the start of its container.
    ///
    /// `Stretch` and `Baseline` align to the start; `is_reversed` flips the flex
    /// variants, which track the flex cross-start edge rather than the physical one.
    pub fn offset(self, free_space: f32, is_reversed: bool) -> f32 {
        match self {
            Self::Start | Self::Stretch | Self::Baseline => 0.0,
            Self::End => free_space,
            Self::FlexStart => {
                if is_reversed {
                    free_space
                } else {
                    0.0
                }
            }
            Self::FlexEnd => {
                if is_reversed {
                    0.0
                } else {
                    free_space
                }
            }
            Self::Center => free_space / 2.0,
        }
    }
}

/// Distribution of free space between lines or tracks (`align-content`,
/// `justify-content`).
///
/// Spec: §5 <https://www.w3.org/TR/css-align-3/#content-distribution>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignContent {
    /// Packed to the start.
    Start,
    /// Packed to the end.
    End,
    /// Packed to the flex main/cross start.
    FlexStart,
    /// Packed to the flex main/cross end.
    FlexEnd,
    /// Packed to the center.
    Center,
    /// Auto-sized lines/tracks grow to fill.
    Stretch,
    /// First and last flush with the edges, even gaps in between.
    SpaceBetween,
    /// Equal space between, half-size space at the edges.
    SpaceAround,
    /// Equal space between and at the edges.
    SpaceEvenly,
}

/// `justify-content`.
pub type JustifyContent = AlignContent;

impl AlignContent {
    /// Leading offset and per-gap extra for `item_count` items sharing `free_space`.
    ///
    /// Negative free space falls back to the overflow-safe `start` alignment for the
    /// distributed values, matching the fallback alignment each of them defines.
    pub fn distribute(self, free_space: f32, item_count: usize, is_reversed: bool) -> (f32, f32) {
        let count = item_count as f32;
        match self {
            Self::Start | Self::Stretch => (0.0, 0.0),
            Self::End => (free_space, 0.0),
            Self::FlexStart => (if is_reversed { free_space } else { 0.0 }, 0.0),
            Self::FlexEnd => (if is_reversed { 0.0 } else { free_space }, 0.0),
            Self::Center => (free_space / 2.0, 0.0),
            Self::SpaceBetween => {
                if free_space <= 0.0 || item_count <= 1 {
                    (0.0, 0.0)
                } else {
                    (0.0, free_space / (count - 1.0))
                }
            }
            Self::SpaceAround => {
                if free_space <= 0.0 || item_count == 0 {
                    (free_space.min(0.0) / 2.0, 0.0)
                } else {
                    let gap = free_space / count;
                    (gap / 2.0, gap)
                }
            }
            Self::SpaceEvenly => {
                if free_space <= 0.0 || item_count == 0 {
                    (free_space.min(0.0) / 2.0, 0.0)
                } else {
                    let gap = free_space / (count + 1.0);
                    (gap, gap)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if distributed alignment offsets are wrong.
    fn distributed_offsets() {
        assert_eq!(AlignContent::SpaceBetween.distribute(90.0, 4, false), (0.0, 30.0));
        assert_eq!(AlignContent::SpaceAround.distribute(90.0, 3, false), (15.0, 30.0));
        assert_eq!(AlignContent::SpaceEvenly.distribute(90.0, 2, false), (30.0, 30.0));
        assert_eq!(AlignContent::Center.distribute(90.0, 2, false), (45.0, 0.0));
        assert_eq!(AlignContent::FlexStart.distribute(90.0, 2, true), (90.0, 0.0));
        assert_eq!(AlignContent::SpaceBetween.distribute(-10.0, 2, false), (0.0, 0.0));
    }

    #[test]
    /// # Panics
    /// Panics if self-alignment offsets are wrong.
    fn self_alignment_offsets() {
        assert_eq!(AlignItems::Center.offset(20.0, false), 10.0);
        assert_eq!(AlignItems::FlexEnd.offset(20.0, false), 20.0);
        assert_eq!(AlignItems::FlexEnd.offset(20.0, true), 0.0);
        assert_eq!(AlignItems::Stretch.offset(20.0, false), 0.0);
    }
}
