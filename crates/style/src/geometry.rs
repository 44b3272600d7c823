//! Geometric primitives shared by the style model and the layout algorithms.
//!
//! All containers are generic so the same shape can carry specified values
//! (`Rect<LengthPercentage>`), partially resolved values (`Size<Option<f32>>`)
//! or final pixel values (`Size<f32>`).

use core::ops::{Add, Sub};

use crate::flex::FlexDirection;

/// One of the two physical axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsoluteAxis {
    /// The x axis (width).
    Horizontal,
    /// The y axis (height).
    Vertical,
}

impl AbsoluteAxis {
    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size<T> {
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T> Size<T> {
    /// Create a new size.
    #[inline]
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Apply `func` to both components.
    #[inline]
    pub fn map<R, F: Fn(T) -> R>(self, func: F) -> Size<R> {
        Size {
            width: func(self.width),
            height: func(self.height),
        }
    }

    /// Combine both components with the matching components of `other`.
    #[inline]
    pub fn zip_map<U, R, F: Fn(T, U) -> R>(self, other: Size<U>, func: F) -> Size<R> {
        Size {
            width: func(self.width, other.width),
            height: func(self.height, other.height),
        }
    }

    /// Borrow both components.
    #[inline]
    pub const fn as_ref(&self) -> Size<&T> {
        Size {
            width: &self.width,
            height: &self.height,
        }
    }
}

impl<T: Copy> Size<T> {
    /// Component along a physical axis.
    #[inline]
    pub const fn get(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.width,
            AbsoluteAxis::Vertical => self.height,
        }
    }

    /// Overwrite the component along a physical axis.
    #[inline]
    pub fn set(&mut self, axis: AbsoluteAxis, value: T) {
        match axis {
            AbsoluteAxis::Horizontal => self.width = value,
            AbsoluteAxis::Vertical => self.height = value,
        }
    }

    /// Component along the main axis of a flex container.
    #[inline]
    pub const fn main(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.width
        } else {
            self.height
        }
    }

    /// Component along the cross axis of a flex container.
    #[inline]
    pub const fn cross(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.height
        } else {
            self.width
        }
    }

    /// Overwrite the main-axis component.
    #[inline]
    pub fn set_main(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.width = value;
        } else {
            self.height = value;
        }
    }

    /// Overwrite the cross-axis component.
    #[inline]
    pub fn set_cross(&mut self, direction: FlexDirection, value: T) {
        if direction.is_row() {
            self.height = value;
        } else {
            self.width = value;
        }
    }

    /// Build a size from main/cross components.
    #[inline]
    pub const fn from_main_cross(direction: FlexDirection, main: T, cross: T) -> Self {
        if direction.is_row() {
            Self {
                width: main,
                height: cross,
            }
        } else {
            Self {
                width: cross,
                height: main,
            }
        }
    }
}

impl Size<f32> {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// True when both components are strictly positive.
    #[inline]
    pub fn has_non_zero_area(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl Size<Option<f32>> {
    /// Both components unresolved.
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };

    /// Size with both components resolved.
    #[inline]
    pub const fn from_definite(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Per-axis `Option::or`.
    #[inline]
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            width: self.width.or(other.width),
            height: self.height.or(other.height),
        }
    }

    /// True when both components are resolved.
    #[inline]
    pub const fn both_axis_defined(self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Per-axis `Option::unwrap_or`.
    #[inline]
    pub fn unwrap_or(self, fallback: Size<f32>) -> Size<f32> {
        Size {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        }
    }

    /// Fill in a missing dimension from the other one using `width / height == ratio`.
    #[inline]
    #[must_use]
    pub fn maybe_apply_aspect_ratio(self, aspect_ratio: Option<f32>) -> Self {
        match (aspect_ratio, self.width, self.height) {
            (Some(ratio), Some(width), None) if ratio > 0.0 => Self {
                width: Some(width),
                height: Some(width / ratio),
            },
            (Some(ratio), None, Some(height)) if ratio > 0.0 => Self {
                width: Some(height * ratio),
                height: Some(height),
            },
            _ => self,
        }
    }
}

impl<T: Add<Output = T>> Add for Size<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Size<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

/// Four edge values (margin, padding, border, inset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect<T> {
    /// Left edge.
    pub left: T,
    /// Right edge.
    pub right: T,
    /// Top edge.
    pub top: T,
    /// Bottom edge.
    pub bottom: T,
}

impl<T> Rect<T> {
    /// Create a rect from individual edges.
    #[inline]
    pub const fn new(left: T, right: T, top: T, bottom: T) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Apply `func` to every edge.
    #[inline]
    pub fn map<R, F: Fn(T) -> R>(self, func: F) -> Rect<R> {
        Rect {
            left: func(self.left),
            right: func(self.right),
            top: func(self.top),
            bottom: func(self.bottom),
        }
    }

    /// Borrow every edge.
    #[inline]
    pub const fn as_ref(&self) -> Rect<&T> {
        Rect {
            left: &self.left,
            right: &self.right,
            top: &self.top,
            bottom: &self.bottom,
        }
    }
}

impl<T: Clone> Rect<T> {
    /// Rect with the same value on every edge.
    #[inline]
    pub fn uniform(value: T) -> Self {
        Self {
            left: value.clone(),
            right: value.clone(),
            top: value.clone(),
            bottom: value,
        }
    }
}

impl<T: Copy> Rect<T> {
    /// Leading edge of the main axis (ignores reversal, which is handled by the algorithm).
    #[inline]
    pub const fn main_start(self, direction: FlexDirection) -> T {
        if direction.is_row() { self.left } else { self.top }
    }

    /// Trailing edge of the main axis.
    #[inline]
    pub const fn main_end(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.right
        } else {
            self.bottom
        }
    }

    /// Leading edge of the cross axis.
    #[inline]
    pub const fn cross_start(self, direction: FlexDirection) -> T {
        if direction.is_row() { self.top } else { self.left }
    }

    /// Trailing edge of the cross axis.
    #[inline]
    pub const fn cross_end(self, direction: FlexDirection) -> T {
        if direction.is_row() {
            self.bottom
        } else {
            self.right
        }
    }

    /// Leading edge along a physical axis.
    #[inline]
    pub const fn start(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.left,
            AbsoluteAxis::Vertical => self.top,
        }
    }

    /// Trailing edge along a physical axis.
    #[inline]
    pub const fn end(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.right,
            AbsoluteAxis::Vertical => self.bottom,
        }
    }
}

impl Rect<f32> {
    /// All edges zero.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// `left + right`.
    #[inline]
    pub fn horizontal_axis_sum(self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[inline]
    pub fn vertical_axis_sum(self) -> f32 {
        self.top + self.bottom
    }

    /// Sum of the edges on both axes as a size.
    #[inline]
    pub fn sum_axes(self) -> Size<f32> {
        Size {
            width: self.horizontal_axis_sum(),
            height: self.vertical_axis_sum(),
        }
    }

    /// Sum of the edges along a physical axis.
    #[inline]
    pub fn axis_sum(self, axis: AbsoluteAxis) -> f32 {
        match axis {
            AbsoluteAxis::Horizontal => self.horizontal_axis_sum(),
            AbsoluteAxis::Vertical => self.vertical_axis_sum(),
        }
    }

    /// Sum of the edges along the main axis.
    #[inline]
    pub fn main_axis_sum(self, direction: FlexDirection) -> f32 {
        self.main_start(direction) + self.main_end(direction)
    }

    /// Sum of the edges along the cross axis.
    #[inline]
    pub fn cross_axis_sum(self, direction: FlexDirection) -> f32 {
        self.cross_start(direction) + self.cross_end(direction)
    }
}

impl<T: Add<Output = T>> Add for Rect<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
            top: self.top + rhs.top,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point<T> {
    /// Horizontal coordinate.
    pub x: T,
    /// Vertical coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Create a point.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Apply `func` to both coordinates.
    #[inline]
    pub fn map<R, F: Fn(T) -> R>(self, func: F) -> Point<R> {
        Point {
            x: func(self.x),
            y: func(self.y),
        }
    }
}

impl<T: Copy> Point<T> {
    /// Coordinate along a physical axis.
    #[inline]
    pub const fn get(self, axis: AbsoluteAxis) -> T {
        match axis {
            AbsoluteAxis::Horizontal => self.x,
            AbsoluteAxis::Vertical => self.y,
        }
    }
}

impl Point<f32> {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// A start/end pair along one axis (grid placement, line ranges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Line<T> {
    /// Start value.
    pub start: T,
    /// End value.
    pub end: T,
}

impl<T> Line<T> {
    /// Create a line.
    #[inline]
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Apply `func` to both ends.
    #[inline]
    pub fn map<R, F: Fn(T) -> R>(self, func: F) -> Line<R> {
        Line {
            start: func(self.start),
            end: func(self.end),
        }
    }
}
