#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are `f32` in overlay-local, device-independent units with the
//! origin at the top-left. All types are plain `Copy` values; none of the
//! operations here allocate or fail.
//!
//! # Invariants
//!
//! 1. [`Rect::clamp_within`] never changes a rectangle's size, only its
//!    position.
//! 2. [`Rect::contains`] is inclusive of all four edges; callers that need a
//!    tie-break between widgets sharing an edge resolve it by z-order, not
//!    here.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D point (or displacement vector) in overlay-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean length, treating the point as a vector.
    #[inline]
    #[must_use]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length, treating the point as a vector.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Unit-length vector in the same direction.
    ///
    /// Returns [`Point::ZERO`] for the zero vector rather than dividing by
    /// zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Point::ZERO }
    }

    /// Whether both coordinates are finite (not NaN or infinite).
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, s: f32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

impl Div<f32> for Point {
    type Output = Point;

    fn div(self, s: f32) -> Point {
        Point::new(self.x / s, self.y / s)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero extent.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Unbounded extent, used as the default maximum widget size.
    pub const MAX: Size = Size {
        width: f32::MAX,
        height: f32::MAX,
    };

    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both extents are finite and non-negative.
    ///
    /// `f32::MAX` counts as valid; NaN and negative extents do not.
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width >= 0.0 && self.height >= 0.0 && !self.width.is_nan() && !self.height.is_nan()
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle: position of the top-left corner plus extent.
///
/// Width and height are expected to be non-negative; construction of widgets
/// validates this once, so the operations here can assume it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given extent.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (inclusive for containment).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (inclusive for containment).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The same rectangle moved to a new top-left corner.
    #[inline]
    #[must_use]
    pub const fn with_position(&self, pos: Point) -> Rect {
        Rect::new(pos.x, pos.y, self.width, self.height)
    }

    /// Whether all four components are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Check if a point is inside the rectangle, inclusive of edges.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// The rectangle shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Whether the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shift (never resize) the rectangle so it lies fully inside `area`.
    ///
    /// A dimension in which the rectangle is larger than the area is centered
    /// within the area instead.
    #[must_use]
    pub fn clamp_within(&self, area: &Rect) -> Rect {
        let x = clamp_axis(self.x, self.width, area.x, area.width);
        let y = clamp_axis(self.y, self.height, area.y, area.height);
        Rect::new(x, y, self.width, self.height)
    }
}

fn clamp_axis(pos: f32, extent: f32, area_pos: f32, area_extent: f32) -> f32 {
    if extent > area_extent {
        area_pos + (area_extent - extent) / 2.0
    } else {
        pos.clamp(area_pos, area_pos + area_extent - extent)
    }
}
