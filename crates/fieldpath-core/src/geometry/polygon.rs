//! Polygon queries used by the obstacle planner: containment, clearance,
//! centroid offsetting, and a convex hull for overlay simplification.

use super::Point;

/// Ray-casting parity test. Points exactly on an edge are not guaranteed
/// to be classified consistently.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        let intersects = (yi > point.y) != (yj > point.y)
            && point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi;
        if intersects {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return p.distance_to(&a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    p.distance_to(&closest)
}

/// Minimum distance from `point` to any edge of `polygon`.
pub fn min_distance_to_polygon(point: Point, polygon: &[Point]) -> f64 {
    let mut min_distance = f64::INFINITY;

    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        min_distance = min_distance.min(distance_to_segment(point, a, b));
    }

    min_distance
}

pub fn polygon_centroid(vertices: &[Point]) -> Point {
    let n = vertices.len() as f64;
    let sum = vertices
        .iter()
        .fold((0.0, 0.0), |acc, v| (acc.0 + v.x, acc.1 + v.y));
    Point::new(sum.0 / n, sum.1 / n)
}

/// Push each vertex radially away from the centroid by `margin`.
///
/// An approximation of a true Minkowski offset that holds for roughly
/// convex, centroid-star-shaped polygons; concave shapes can fold.
pub fn expand_polygon(polygon: &[Point], margin: f64) -> Vec<Point> {
    if polygon.len() < 3 || margin <= 0.0 {
        return polygon.to_vec();
    }

    let center = polygon_centroid(polygon);

    polygon
        .iter()
        .map(|vertex| {
            let dx = vertex.x - center.x;
            let dy = vertex.y - center.y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist > 0.001 {
                let scale = (dist + margin) / dist;
                Point::new(center.x + dx * scale, center.y + dy * scale)
            } else {
                // Vertex sits on the centroid; nudge it diagonally.
                Point::new(vertex.x + margin, vertex.y + margin)
            }
        })
        .collect()
}

/// Convex hull by Graham scan, counter-clockwise. Inputs with fewer than
/// three points are returned unchanged.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut pts = points.to_vec();

    let mut min_idx = 0;
    for i in 1..pts.len() {
        if pts[i].y < pts[min_idx].y || (pts[i].y == pts[min_idx].y && pts[i].x < pts[min_idx].x) {
            min_idx = i;
        }
    }
    pts.swap(0, min_idx);
    let pivot = pts[0];

    pts[1..].sort_by(|a, b| {
        let angle_a = (a.y - pivot.y).atan2(a.x - pivot.x);
        let angle_b = (b.y - pivot.y).atan2(b.x - pivot.x);
        angle_a.partial_cmp(&angle_b).unwrap_or_else(|| {
            let dist_a = (a.x - pivot.x).powi(2) + (a.y - pivot.y).powi(2);
            let dist_b = (b.x - pivot.x).powi(2) + (b.y - pivot.y).powi(2);
            dist_a.partial_cmp(&dist_b).unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    fn cross(o: Point, a: Point, b: Point) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    let mut hull: Vec<Point> = vec![pivot];
    for &point in &pts[1..] {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], point) <= 0.0 {
            hull.pop();
        }
        hull.push(point);
    }

    hull
}
