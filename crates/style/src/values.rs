//! Length, percentage and dimension values.
//!
//! Spec: CSS Values and Units Module Level 4 §5 (percentages) and §6 (dimensions)
//! <https://www.w3.org/TR/css-values-4/#percentages>
//!
//! Each value category is a closed sum type: only the variants valid for that
//! category can be built, so layout code only ever sees "resolved" or
//! "unresolved" (`None`).

use crate::calc::CalcExpression;

/// `<length-percentage>`: padding, border, gaps, track breadths.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthPercentage {
    /// Absolute length in pixels.
    Length(f32),
    /// Fraction of the basis (`0.5` is 50%).
    Percent(f32),
    /// Expression over the basis.
    Calc(CalcExpression),
}

impl LengthPercentage {
    /// Zero-length value.
    pub const ZERO: Self = Self::Length(0.0);

    /// A pixel length.
    #[inline]
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// A percentage given as a fraction.
    #[inline]
    pub const fn percent(fraction: f32) -> Self {
        Self::Percent(fraction)
    }

    /// A `calc()` expression.
    #[inline]
    pub const fn calc(expression: CalcExpression) -> Self {
        Self::Calc(expression)
    }

    /// Resolve against `basis`.
    ///
    /// Lengths ignore the basis, percentages need it, calc expressions decide for themselves.
    #[inline]
    pub fn resolve(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(length) => Some(*length),
            Self::Percent(fraction) => basis.map(|resolved| resolved * fraction),
            Self::Calc(expression) => expression.resolve(basis),
        }
    }

    /// Resolve against `basis`, substituting zero when unresolved.
    #[inline]
    pub fn resolve_or_zero(&self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }

    /// True when resolution depends on the basis.
    #[inline]
    pub const fn uses_percentage(&self) -> bool {
        matches!(self, Self::Percent(_) | Self::Calc(_))
    }
}

impl Default for LengthPercentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<CalcExpression> for LengthPercentage {
    fn from(expression: CalcExpression) -> Self {
        Self::Calc(expression)
    }
}

/// `<length-percentage> | auto`: margins and insets.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthPercentageAuto {
    /// Absolute length in pixels.
    Length(f32),
    /// Fraction of the basis.
    Percent(f32),
    /// `auto`.
    Auto,
    /// Expression over the basis.
    Calc(CalcExpression),
}

impl LengthPercentageAuto {
    /// Zero-length value.
    pub const ZERO: Self = Self::Length(0.0);

    /// A pixel length.
    #[inline]
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// A percentage given as a fraction.
    #[inline]
    pub const fn percent(fraction: f32) -> Self {
        Self::Percent(fraction)
    }

    /// `auto`.
    #[inline]
    pub const fn auto() -> Self {
        Self::Auto
    }

    /// Resolve against `basis`; `auto` is always unresolved.
    #[inline]
    pub fn resolve(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(length) => Some(*length),
            Self::Percent(fraction) => basis.map(|resolved| resolved * fraction),
            Self::Auto => None,
            Self::Calc(expression) => expression.resolve(basis),
        }
    }

    /// Resolve against `basis`, substituting zero when unresolved.
    #[inline]
    pub fn resolve_or_zero(&self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }

    /// True for `auto`.
    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl Default for LengthPercentageAuto {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<LengthPercentage> for LengthPercentageAuto {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(length) => Self::Length(length),
            LengthPercentage::Percent(fraction) => Self::Percent(fraction),
            LengthPercentage::Calc(expression) => Self::Calc(expression),
        }
    }
}

/// Preferred/min/max sizes and flex-basis.
///
/// Spec: CSS Box Sizing Module Level 3 §3 <https://www.w3.org/TR/css-sizing-3/#sizing-values>
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dimension {
    /// Absolute length in pixels.
    Length(f32),
    /// Fraction of the basis.
    Percent(f32),
    /// `auto`.
    #[default]
    Auto,
    /// `min-content`.
    MinContent,
    /// `max-content`.
    MaxContent,
    /// `fit-content(<length-percentage>)`.
    FitContent(LengthPercentage),
    /// `stretch` (fill the available space).
    Stretch,
    /// Expression over the basis.
    Calc(CalcExpression),
}

impl Dimension {
    /// A pixel length.
    #[inline]
    pub const fn length(value: f32) -> Self {
        Self::Length(value)
    }

    /// A percentage given as a fraction.
    #[inline]
    pub const fn percent(fraction: f32) -> Self {
        Self::Percent(fraction)
    }

    /// `auto`.
    #[inline]
    pub const fn auto() -> Self {
        Self::Auto
    }

    /// Resolve against `basis`.
    ///
    /// `auto` and the intrinsic keywords are always unresolved; layout algorithms
    /// that give them meaning inspect the variant directly.
    #[inline]
    pub fn resolve(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(length) => Some(*length),
            Self::Percent(fraction) => basis.map(|resolved| resolved * fraction),
            Self::Calc(expression) => expression.resolve(basis),
            Self::Auto | Self::MinContent | Self::MaxContent | Self::FitContent(_) | Self::Stretch => {
                None
            }
        }
    }

    /// Resolve against `basis`, substituting zero when unresolved.
    #[inline]
    pub fn resolve_or_zero(&self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }

    /// True for `auto`.
    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// True for the content-based keywords.
    #[inline]
    pub const fn is_intrinsic(&self) -> bool {
        matches!(
            self,
            Self::MinContent | Self::MaxContent | Self::FitContent(_)
        )
    }
}

impl From<LengthPercentage> for Dimension {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(length) => Self::Length(length),
            LengthPercentage::Percent(fraction) => Self::Percent(fraction),
            LengthPercentage::Calc(expression) => Self::Calc(expression),
        }
    }
}

impl From<LengthPercentageAuto> for Dimension {
    fn from(value: LengthPercentageAuto) -> Self {
        match value {
            LengthPercentageAuto::Length(length) => Self::Length(length),
            LengthPercentageAuto::Percent(fraction) => Self::Percent(fraction),
            LengthPercentageAuto::Auto => Self::Auto,
            LengthPercentageAuto::Calc(expression) => Self::Calc(expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if lengths, percentages or keywords resolve incorrectly.
    fn dimension_resolution() {
        assert_eq!(Dimension::length(10.0).resolve(None), Some(10.0));
        assert_eq!(Dimension::percent(0.25).resolve(Some(200.0)), Some(50.0));
        assert_eq!(Dimension::percent(0.25).resolve(None), None);
        assert_eq!(Dimension::Auto.resolve(Some(200.0)), None);
        assert_eq!(Dimension::MinContent.resolve(Some(200.0)), None);
        assert_eq!(Dimension::Auto.resolve_or_zero(Some(200.0)), 0.0);
    }

    #[test]
    /// # Panics
    /// Panics if calc values do not resolve through their expression.
    fn calc_values_resolve_through_expression() {
        let margin = LengthPercentageAuto::Calc(CalcExpression::full_minus_length(20.0));
        assert_eq!(margin.resolve(Some(100.0)), Some(80.0));
        assert_eq!(margin.resolve(None), None);
        let padding = LengthPercentage::from(CalcExpression::percent_div(1.0, 2.0));
        assert_eq!(padding.resolve_or_zero(Some(100.0)), 50.0);
        assert_eq!(padding.resolve_or_zero(None), 0.0);
    }

    #[test]
    /// # Panics
    /// Panics if conversions between value categories drop information.
    fn conversions_preserve_kind() {
        assert_eq!(
            Dimension::from(LengthPercentageAuto::Auto),
            Dimension::Auto
        );
        assert_eq!(
            LengthPercentageAuto::from(LengthPercentage::percent(0.5)),
            LengthPercentageAuto::Percent(0.5)
        );
    }
}
