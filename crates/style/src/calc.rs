//! `calc()` expressions.
//!
//! Spec: CSS Values and Units Module Level 4 §10 Mathematical Expressions
//! <https://www.w3.org/TR/css-values-4/#calc-func>
//!
//! The engine never parses CSS, so an expression is stored as a closure from the
//! percentage basis to a pixel value. Expressions are compared by identity: two
//! separately built `percent + 10px` expressions are *not* equal, while clones of
//! the same expression are.

use core::fmt;
use std::sync::Arc;

/// Signature of the function backing an expression.
type CalcFn = dyn Fn(f32) -> f32 + Send + Sync;

/// Shared payload of an expression.
struct CalcInner {
    /// Human-readable form used by `Debug` and tree dumps.
    description: String,
    /// Evaluator taking the percentage basis.
    func: Box<CalcFn>,
}

/// A resolved-at-layout-time mathematical expression.
#[derive(Clone)]
pub struct CalcExpression {
    inner: Arc<CalcInner>,
}

impl CalcExpression {
    /// Build an expression from an arbitrary function of the percentage basis.
    ///
    /// The function receives `NaN` when the basis is unresolved; returning a
    /// non-finite value marks the expression as unresolved for that layout.
    pub fn from_fn<F>(description: impl Into<String>, func: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(CalcInner {
                description: description.into(),
                func: Box::new(func),
            }),
        }
    }

    /// `calc(<percent> + <length>)`. `percent` is a fraction (`0.5` is 50%).
    pub fn percent_plus_length(percent: f32, length: f32) -> Self {
        Self::from_fn(
            format!("{}% + {length}px", percent * 100.0),
            move |basis| basis.mul_add(percent, length),
        )
    }

    /// `calc(<percent> - <length>)`.
    pub fn percent_minus_length(percent: f32, length: f32) -> Self {
        Self::from_fn(
            format!("{}% - {length}px", percent * 100.0),
            move |basis| basis.mul_add(percent, -length),
        )
    }

    /// `calc(100% - <length>)`.
    pub fn full_minus_length(length: f32) -> Self {
        Self::from_fn(format!("100% - {length}px"), move |basis| basis - length)
    }

    /// `calc(<percent> / <divisor>)`.
    pub fn percent_div(percent: f32, divisor: f32) -> Self {
        Self::from_fn(
            format!("{}% / {divisor}", percent * 100.0),
            move |basis| basis * percent / divisor,
        )
    }

    /// Evaluate against a raw basis (which may be `NaN`).
    #[inline]
    pub fn evaluate(&self, basis: f32) -> f32 {
        (self.inner.func)(basis)
    }

    /// Resolve against an optional basis.
    ///
    /// An unresolved basis is passed through as `NaN`, so expressions that ignore
    /// the basis still resolve while those that read it propagate to `None`.
    #[inline]
    pub fn resolve(&self, basis: Option<f32>) -> Option<f32> {
        let value = self.evaluate(basis.unwrap_or(f32::NAN));
        value.is_finite().then_some(value)
    }

    /// Human-readable description of the expression.
    pub fn description(&self) -> &str {
        &self.inner.description
    }
}

impl PartialEq for CalcExpression {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CalcExpression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "calc({})", self.inner.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if the built-in constructors evaluate incorrectly.
    fn constructors_evaluate_against_basis() {
        assert_eq!(
            CalcExpression::percent_plus_length(0.5, 10.0).resolve(Some(200.0)),
            Some(110.0)
        );
        assert_eq!(
            CalcExpression::percent_minus_length(0.5, 10.0).resolve(Some(200.0)),
            Some(90.0)
        );
        assert_eq!(
            CalcExpression::full_minus_length(30.0).resolve(Some(200.0)),
            Some(170.0)
        );
        assert_eq!(
            CalcExpression::percent_div(1.0, 4.0).resolve(Some(200.0)),
            Some(50.0)
        );
    }

    #[test]
    /// # Panics
    /// Panics if an unresolved basis does not propagate through basis-dependent expressions.
    fn unresolved_basis_propagates() {
        assert_eq!(CalcExpression::full_minus_length(30.0).resolve(None), None);
        let constant = CalcExpression::from_fn("42px", |_basis| 42.0);
        assert_eq!(constant.resolve(None), Some(42.0));
    }

    #[test]
    /// # Panics
    /// Panics if equality is structural instead of by identity.
    fn equality_is_by_identity() {
        let first = CalcExpression::full_minus_length(10.0);
        let second = CalcExpression::full_minus_length(10.0);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
        assert_eq!(format!("{first:?}"), "calc(100% - 10px)");
    }
}
