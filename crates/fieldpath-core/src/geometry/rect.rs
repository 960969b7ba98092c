//! Oriented rectangles and the separating-axis overlap metric.
//!
//! The overlap value is a continuous penetration depth rather than a
//! boolean flag, so it can drive the control-point optimizer as well as
//! live collision overlays.

use serde::{Deserialize, Serialize};

use super::Point;

/// A rectangle in arbitrary orientation, stored as its four vertices.
///
/// Built transiently for collision queries; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub vertices: [Point; 4],
}

impl OrientedRect {
    /// Build a rectangle centered on `center` with the given dimensions,
    /// rotated by `rotation` degrees about its center.
    pub fn from_center(center: Point, width: f64, height: f64, rotation: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;

        let corners = [
            Point::new(center.x - hw, center.y - hh),
            Point::new(center.x + hw, center.y - hh),
            Point::new(center.x + hw, center.y + hh),
            Point::new(center.x - hw, center.y + hh),
        ];

        Self {
            vertices: corners.map(|c| c.rotated_about(center, rotation)),
        }
    }

    /// Project every vertex onto `axis`, returning the (min, max) interval.
    fn project(&self, axis: Point) -> (f64, f64) {
        let axis_len = (axis.x * axis.x + axis.y * axis.y).sqrt();
        let mut min = f64::MAX;
        let mut max = f64::MIN;

        for v in &self.vertices {
            let projection = (v.x * axis.x + v.y * axis.y) / axis_len;
            min = min.min(projection);
            max = max.max(projection);
        }

        (min, max)
    }
}

fn interval_overlap(a: (f64, f64), b: (f64, f64)) -> f64 {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    (end - start).max(0.0)
}

/// Minimum overlap of `a` and `b` across all edge-normal axes.
///
/// Returns 0 as soon as any axis separates the rectangles; otherwise the
/// smallest positive overlap found, which is the width of the thinnest
/// slab the rectangles share.
pub fn minimum_separating_width(a: &OrientedRect, b: &OrientedRect) -> f64 {
    let mut min_width = f64::MAX;

    for rect in [a, b] {
        for i in 0..4 {
            let p1 = rect.vertices[i];
            let p2 = rect.vertices[(i + 1) % 4];
            let axis = Point::new(-(p2.y - p1.y), p2.x - p1.x);

            let overlap = interval_overlap(a.project(axis), b.project(axis));
            if overlap == 0.0 {
                return 0.0;
            }
            min_width = min_width.min(overlap);
        }
    }

    min_width
}
