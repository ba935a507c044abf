//! Planar points and directed stroke segments.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute tolerance used for every coordinate comparison.
///
/// The tolerance is not relative, so comparisons lose meaning for very
/// large or very small coordinate magnitudes.
pub const EPSILON: f64 = 1e-8;

/// Largest coordinate magnitude accepted for sorting.
///
/// Squared distances between points within this bound stay finite, so the
/// closest-endpoint search can always rank them.
pub const MAX_COORDINATE: f64 = 1e150;

/// Returns true if two coordinates are equal within [`EPSILON`].
#[inline]
pub fn fpeq(x: f64, y: f64) -> bool {
    (x - y).abs() < EPSILON
}

/// A point in caller-defined planar units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin, where the head starts unless configured otherwise.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Returns true if both coordinates match `other` within [`EPSILON`].
    #[inline]
    pub fn approx_eq(&self, other: Point) -> bool {
        fpeq(self.x, other.x) && fpeq(self.y, other.y)
    }

    /// Returns true if neither coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if both coordinates are within [`MAX_COORDINATE`].
    /// NaN is never in range.
    pub fn is_in_range(&self) -> bool {
        self.x.abs() <= MAX_COORDINATE && self.y.abs() <= MAX_COORDINATE
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3},{:.3}", self.x, self.y)
    }
}

/// A directed stroke from `a` to `b`.
///
/// The sequencer may reverse a segment so that it is drawn from the end
/// nearest the head; its geometry never changes otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Start of the stroke.
    pub a: Point,
    /// End of the stroke.
    pub b: Point,
}

impl Segment {
    /// Creates a segment from two endpoints.
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Creates a segment from raw coordinates.
    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Drawn length of the stroke.
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Returns true if both endpoints coincide within tolerance.
    pub fn is_degenerate(&self) -> bool {
        self.a.approx_eq(self.b)
    }

    /// Returns true if both endpoints are finite.
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    /// Returns true if both endpoints are within [`MAX_COORDINATE`].
    pub fn is_in_range(&self) -> bool {
        self.a.is_in_range() && self.b.is_in_range()
    }

    /// Swaps the endpoints in place.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
    }

    /// Returns a copy drawn in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Returns true if `other` covers the same stroke, in either direction.
    pub fn is_duplicate_of(&self, other: &Segment) -> bool {
        (self.a.approx_eq(other.a) && self.b.approx_eq(other.b))
            || (self.a.approx_eq(other.b) && self.b.approx_eq(other.a))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-({})", self.a, self.b)
    }
}
