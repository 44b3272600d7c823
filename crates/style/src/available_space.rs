//! Per-axis sizing constraint handed to every layout call.

use crate::geometry::Size;

/// Space available to a box along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AvailableSpace {
    /// A definite number of pixels.
    Definite(f32),
    /// Size under a min-content constraint.
    MinContent,
    /// Size under a max-content constraint.
    #[default]
    MaxContent,
}

impl AvailableSpace {
    /// Zero definite space.
    pub const ZERO: Self = Self::Definite(0.0);

    /// Definite space of `value` pixels.
    #[inline]
    pub const fn from_length(value: f32) -> Self {
        Self::Definite(value)
    }

    /// True for [`Self::Definite`].
    #[inline]
    pub const fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }

    /// True for [`Self::MinContent`].
    #[inline]
    pub const fn is_min_content(self) -> bool {
        matches!(self, Self::MinContent)
    }

    /// The definite value, if any.
    #[inline]
    pub const fn into_option(self) -> Option<f32> {
        match self {
            Self::Definite(value) => Some(value),
            Self::MinContent | Self::MaxContent => None,
        }
    }

    /// The definite value or `fallback`.
    #[inline]
    pub fn unwrap_or(self, fallback: f32) -> f32 {
        self.into_option().unwrap_or(fallback)
    }

    /// Replace with `value` when it is known.
    #[inline]
    #[must_use]
    pub fn maybe_set(self, value: Option<f32>) -> Self {
        value.map_or(self, Self::Definite)
    }

    /// Transform the definite value, leaving content constraints untouched.
    #[inline]
    #[must_use]
    pub fn map_definite_value(self, func: impl FnOnce(f32) -> f32) -> Self {
        match self {
            Self::Definite(value) => Self::Definite(func(value)),
            other => other,
        }
    }

    /// Free space left after `used_space`; indefinite space never has free space to hand out.
    #[inline]
    pub fn compute_free_space(self, used_space: f32) -> f32 {
        match self {
            Self::Definite(value) => value - used_space,
            Self::MaxContent => f32::INFINITY,
            Self::MinContent => 0.0,
        }
    }

    /// Equality with a tolerance on definite values, used by the measurement cache.
    #[inline]
    pub fn is_roughly_equal(self, other: Self) -> bool {
        match (self, other) {
            (Self::Definite(lhs), Self::Definite(rhs)) => (lhs - rhs).abs() < f32::EPSILON,
            (Self::MinContent, Self::MinContent) | (Self::MaxContent, Self::MaxContent) => true,
            _ => false,
        }
    }
}

impl From<f32> for AvailableSpace {
    fn from(value: f32) -> Self {
        Self::Definite(value)
    }
}

impl From<Option<f32>> for AvailableSpace {
    fn from(value: Option<f32>) -> Self {
        value.map_or(Self::MaxContent, Self::Definite)
    }
}

impl Size<AvailableSpace> {
    /// Both axes under a max-content constraint.
    pub const MAX_CONTENT: Self = Self {
        width: AvailableSpace::MaxContent,
        height: AvailableSpace::MaxContent,
    };

    /// Both axes under a min-content constraint.
    pub const MIN_CONTENT: Self = Self {
        width: AvailableSpace::MinContent,
        height: AvailableSpace::MinContent,
    };

    /// Definite space on both axes.
    #[inline]
    pub const fn definite(width: f32, height: f32) -> Self {
        Self {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        }
    }

    /// Definite values as options.
    #[inline]
    pub const fn into_options(self) -> Size<Option<f32>> {
        Size {
            width: self.width.into_option(),
            height: self.height.into_option(),
        }
    }

    /// Per-axis [`AvailableSpace::maybe_set`].
    #[inline]
    #[must_use]
    pub fn maybe_set(self, values: Size<Option<f32>>) -> Self {
        Self {
            width: self.width.maybe_set(values.width),
            height: self.height.maybe_set(values.height),
        }
    }
}
