//! Arithmetic over partially resolved values.
//!
//! An unresolved (`None`) operand leaves the other side untouched, so constraints
//! that are not known simply do not apply.

use trellis_style::Size;

/// `min`/`max`/`clamp`/`add`/`sub` where either side may be unresolved.
pub trait MaybeMath<In, Out> {
    /// Minimum, ignoring an unresolved side.
    fn maybe_min(self, rhs: In) -> Out;
    /// Maximum, ignoring an unresolved side.
    fn maybe_max(self, rhs: In) -> Out;
    /// Clamp between `min` and `max`; `min` wins when `min > max`.
    fn maybe_clamp(self, min: In, max: In) -> Out;
    /// Sum, ignoring an unresolved right side.
    fn maybe_add(self, rhs: In) -> Out;
    /// Difference, ignoring an unresolved right side.
    fn maybe_sub(self, rhs: In) -> Out;
}

impl MaybeMath<Self, Self> for Option<f32> {
    fn maybe_min(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Some(lhs), Some(rhs_value)) => Some(lhs.min(rhs_value)),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }

    fn maybe_max(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Some(lhs), Some(rhs_value)) => Some(lhs.max(rhs_value)),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }

    fn maybe_clamp(self, min: Self, max: Self) -> Self {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Some(lhs), Some(rhs_value)) => Some(lhs + rhs_value),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }

    fn maybe_sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Some(lhs), Some(rhs_value)) => Some(lhs - rhs_value),
            (Some(lhs), None) => Some(lhs),
            (None, _) => None,
        }
    }
}

impl MaybeMath<f32, Self> for Option<f32> {
    fn maybe_min(self, rhs: f32) -> Self {
        self.map(|lhs| lhs.min(rhs))
    }

    fn maybe_max(self, rhs: f32) -> Self {
        self.map(|lhs| lhs.max(rhs))
    }

    fn maybe_clamp(self, min: f32, max: f32) -> Self {
        self.map(|lhs| lhs.min(max).max(min))
    }

    fn maybe_add(self, rhs: f32) -> Self {
        self.map(|lhs| lhs + rhs)
    }

    fn maybe_sub(self, rhs: f32) -> Self {
        self.map(|lhs| lhs - rhs)
    }
}

impl MaybeMath<Option<f32>, Self> for f32 {
    fn maybe_min(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |rhs_value| self.min(rhs_value))
    }

    fn maybe_max(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |rhs_value| self.max(rhs_value))
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> Self {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |rhs_value| self + rhs_value)
    }

    fn maybe_sub(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |rhs_value| self - rhs_value)
    }
}

impl MaybeMath<Self, Self> for Size<Option<f32>> {
    fn maybe_min(self, rhs: Self) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_min(rhs_value))
    }

    fn maybe_max(self, rhs: Self) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_max(rhs_value))
    }

    fn maybe_clamp(self, min: Self, max: Self) -> Self {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_add(rhs_value))
    }

    fn maybe_sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_sub(rhs_value))
    }
}

impl MaybeMath<Size<f32>, Self> for Size<Option<f32>> {
    fn maybe_min(self, rhs: Size<f32>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_min(rhs_value))
    }

    fn maybe_max(self, rhs: Size<f32>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_max(rhs_value))
    }

    fn maybe_clamp(self, min: Size<f32>, max: Size<f32>) -> Self {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Size<f32>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_add(rhs_value))
    }

    fn maybe_sub(self, rhs: Size<f32>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_sub(rhs_value))
    }
}

impl MaybeMath<Size<Option<f32>>, Self> for Size<f32> {
    fn maybe_min(self, rhs: Size<Option<f32>>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_min(rhs_value))
    }

    fn maybe_max(self, rhs: Size<Option<f32>>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_max(rhs_value))
    }

    fn maybe_clamp(self, min: Size<Option<f32>>, max: Size<Option<f32>>) -> Self {
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Size<Option<f32>>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_add(rhs_value))
    }

    fn maybe_sub(self, rhs: Size<Option<f32>>) -> Self {
        self.zip_map(rhs, |lhs, rhs_value| lhs.maybe_sub(rhs_value))
    }
}
