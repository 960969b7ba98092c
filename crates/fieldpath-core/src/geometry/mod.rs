//! 2D geometry primitives shared across the engine.
//!
//! All coordinates are field inches on a 144x144 in competition field.
//! Angles are degrees unless a function says otherwise.

use serde::{Deserialize, Serialize};

pub mod polygon;
pub mod rect;

pub use rect::OrientedRect;

/// A point on the field, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotate this point about `pivot` by `angle` degrees.
    pub fn rotated_about(&self, pivot: Point, angle: f64) -> Point {
        let rad = angle.to_radians();
        let (sin, cos) = rad.sin_cos();

        let tx = self.x - pivot.x;
        let ty = self.y - pivot.y;

        Point {
            x: tx * cos - ty * sin + pivot.x,
            y: tx * sin + ty * cos + pivot.y,
        }
    }
}

pub fn lerp(ratio: f64, start: f64, end: f64) -> f64 {
    start + (end - start) * ratio
}

pub fn lerp_point(ratio: f64, start: Point, end: Point) -> Point {
    Point {
        x: lerp(ratio, start.x, end.x),
        y: lerp(ratio, start.y, end.y),
    }
}

/// Evaluate a Bezier curve of arbitrary degree at `t` by repeated
/// linear interpolation (de Casteljau). Handles the 2-, 3-, and 4-point
/// polygons that path segments produce; `t` outside [0, 1] extrapolates.
pub fn curve_point(t: f64, points: &[Point]) -> Point {
    debug_assert!(!points.is_empty());
    let mut current = points.to_vec();
    while current.len() > 1 {
        for i in 0..current.len() - 1 {
            current[i] = lerp_point(t, current[i], current[i + 1]);
        }
        current.pop();
    }
    current[0]
}

/// Normalize an angle into [-180, 180).
pub fn transform_angle(angle: f64) -> f64 {
    let a = (angle + 180.0).rem_euclid(360.0);
    a - 180.0
}

/// Smallest signed difference from `start` to `end`, in [-180, 180).
pub fn angular_difference(start: f64, end: f64) -> f64 {
    let start = start.rem_euclid(360.0);
    let end = end.rem_euclid(360.0);
    let mut diff = end - start;

    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }

    diff
}

/// Interpolate from `start` toward `end` along the shortest rotation,
/// applied to the original start angle so winding stays continuous.
pub fn shortest_rotation(start: f64, end: f64, ratio: f64) -> f64 {
    start + angular_difference(start, end) * ratio
}

/// Heading of the vector from `a` to `b`, in degrees.
pub fn tangent_angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}
