// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Rectangle and vector helpers shared by drawables, controls and ports.
//!
//! `Dimensions` is the model-space rectangle every drawable owns. Bounds
//! are never stored: they are computed from a path's extents and rounded
//! outward to whole units so that an invalidated region never under-covers
//! the ink it stands for.

use crate::settings;
use kurbo::{
    BezPath, ParamCurve, ParamCurveDeriv, ParamCurveNearest, PathSeg, Point, Rect, Shape, Vec2,
};

// ============================================================================
// DIMENSIONS
// ============================================================================

/// A rectangle in model (ideal) coordinates: origin plus width and height.
///
/// `Dimensions` is `Copy`, so reading or writing a drawable's dimensions
/// always hands over an independent value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Dimensions covering a kurbo rectangle
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Dimensions from floating point extents, rounded outward.
    ///
    /// The top-left corner is floored and the bottom-right corner is
    /// ceiled, so the result always contains `extents`.
    pub fn from_extents(extents: Rect) -> Self {
        let extents = extents.abs();
        let x0 = extents.x0.floor();
        let y0 = extents.y0.floor();
        let x1 = extents.x1.ceil();
        let y1 = extents.y1.ceil();
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// A unit-size rectangle at `point`, used to hit-test a point
    /// against bounds.
    pub fn at_point(point: Point) -> Self {
        Self::new(point.x, point.y, 1.0, 1.0)
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    pub fn translated(self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// True if the two rectangles share a region of non-zero area
    pub fn intersects(self, other: Dimensions) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Same rectangle with non-negative width and height
    pub fn normalized(self) -> Self {
        Self::from_rect(self.to_rect())
    }

    /// Smallest rectangle containing both
    pub fn union(self, other: Dimensions) -> Self {
        Self::from_rect(self.normalized().to_rect().union(other.normalized().to_rect()))
    }

    /// True if `other` lies entirely inside `self`
    pub fn contains_dimensions(self, other: Dimensions) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

// ============================================================================
// VECTORS
// ============================================================================

/// Rotate a vector a quarter turn counterclockwise (in y-down device
/// terms this is a left turn).
pub fn turn_left(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Unit vector, or `fallback` when `v` has no length
pub fn unit_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let length = v.hypot();
    if length > f64::EPSILON {
        v / length
    } else {
        fallback
    }
}

/// Default direction when a boundary gives no usable normal
pub const UPWARD: Vec2 = Vec2::new(0.0, -1.0);

// ============================================================================
// PATH QUERIES
// ============================================================================

/// The segment of `path` closest to `point`, with the curve parameter of
/// the nearest location and its squared distance.
pub fn nearest_segment(path: &BezPath, point: Point) -> Option<(PathSeg, f64, f64)> {
    let mut closest: Option<(PathSeg, f64, f64)> = None;
    for segment in path.segments() {
        let nearest = segment.nearest(point, settings::context::NEAREST_ACCURACY);
        match closest {
            Some((_, _, best)) if best <= nearest.distance_sq => {}
            _ => closest = Some((segment, nearest.t, nearest.distance_sq)),
        }
    }
    closest
}

/// The point on `path` closest to `point`
pub fn nearest_point(path: &BezPath, point: Point) -> Option<Point> {
    nearest_segment(path, point).map(|(segment, t, _)| segment.eval(t))
}

fn tangent(segment: &PathSeg, t: f64) -> Vec2 {
    match segment {
        PathSeg::Line(line) => line.p1 - line.p0,
        PathSeg::Quad(quad) => quad.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(cubic) => cubic.deriv().eval(t).to_vec2(),
    }
}

/// Unit vector orthogonal to `path` at the boundary point nearest to
/// `point`.
///
/// For closed outlines the vector points outward. Open paths have no
/// inside, so the left-hand normal of the segment is returned.
pub fn path_normal(path: &BezPath, point: Point) -> Vec2 {
    let Some((segment, t, _)) = nearest_segment(path, point) else {
        return UPWARD;
    };
    let normal = unit_or(turn_left(tangent(&segment, t)), UPWARD);
    let on_boundary = segment.eval(t);
    let nudged = on_boundary + normal * 0.5;
    if path.winding(nudged) != 0 {
        -normal
    } else {
        normal
    }
}
