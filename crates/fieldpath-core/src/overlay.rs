//! Overlay geometry for live collision feedback: the robot's rotated
//! corner points, the swept-body outline of a whole path, and "onion
//! layer" body traces at fixed arc-length spacing.
//!
//! Everything here is pure geometry in field inches; rendering (scaling,
//! mirroring, colors) belongs to the host.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{curve_point, Point};
use crate::path::{segment_heading_at, PathPoint, Segment};

/// Corner points of a robot footprint centered at `(x, y)` with the given
/// heading in degrees, ordered front-left, front-right, back-right,
/// back-left.
pub fn robot_corners(x: f64, y: f64, heading: f64, width: f64, height: f64) -> [Point; 4] {
    let rad = heading.to_radians();
    let (sin, cos) = rad.sin_cos();
    let hw = width / 2.0;
    let hh = height / 2.0;

    let offsets = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
    offsets.map(|(dx, dy)| Point::new(x + dx * cos - dy * sin, y + dx * sin + dy * cos))
}

/// A robot body trace along the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnionLayer {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub corners: [Point; 4],
    pub segment_index: usize,
}

struct RailSample {
    left: Point,
    right: Point,
    center: Point,
    heading: f64,
}

/// Boundary polygon of the area the robot body sweeps while driving the
/// path. Traces a left and right rail offset by half the robot width,
/// bridges them at both ends, and drops near-duplicate vertices.
///
/// Returns an empty vector when the path cannot enclose any area.
pub fn sweep_outline(
    start: &PathPoint,
    segments: &[Segment],
    robot_width: f64,
    robot_height: f64,
    samples: usize,
) -> Vec<Point> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut states: Vec<RailSample> = Vec::new();
    let mut segment_start = start.point();

    for segment in segments {
        let polygon = segment.control_polygon(segment_start);
        let per_segment = (samples / segments.len()).max(10);

        for i in 0..=per_segment {
            let t = i as f64 / per_segment as f64;
            let center = curve_point(t, &polygon);
            let heading = segment_heading_at(segment, segment_start, t);

            let rad = heading.to_radians();
            let nx = -rad.sin();
            let ny = rad.cos();
            let half_w = robot_width / 2.0;

            states.push(RailSample {
                left: Point::new(center.x + nx * half_w, center.y + ny * half_w),
                right: Point::new(center.x - nx * half_w, center.y - ny * half_w),
                center,
                heading,
            });
        }

        segment_start = segment.end_point.point();
    }

    if states.len() == 1 {
        let single = &states[0];
        return robot_corners(
            single.center.x,
            single.center.y,
            single.heading,
            robot_width,
            robot_height,
        )
        .to_vec();
    }

    // Bridge at the start, left rail forward, bridge at the end, right
    // rail backward.
    let mut boundary: Vec<Point> = Vec::with_capacity(states.len() * 2 + 3);
    boundary.push(states[0].right);
    boundary.push(states[0].left);
    boundary.extend(states.iter().map(|s| s.left));
    boundary.push(states[states.len() - 1].right);
    boundary.extend(states.iter().rev().map(|s| s.right));

    let threshold = 1e-4;
    let mut outline: Vec<Point> = Vec::with_capacity(boundary.len());
    for point in boundary {
        match outline.last() {
            Some(prev)
                if (point.x - prev.x).abs() <= threshold
                    && (point.y - prev.y).abs() <= threshold => {}
            _ => outline.push(point),
        }
    }

    if outline.len() >= 3 {
        let first = outline[0];
        let last = outline[outline.len() - 1];
        if (first.x - last.x).abs() > threshold || (first.y - last.y).abs() > threshold {
            outline.push(first);
        }
    }

    if outline.len() >= 3 {
        outline
    } else {
        Vec::new()
    }
}

/// Robot body traces at regular arc-length intervals along the path.
pub fn onion_layers(
    start: &PathPoint,
    segments: &[Segment],
    robot_width: f64,
    robot_height: f64,
    spacing: f64,
) -> Vec<OnionLayer> {
    if segments.is_empty() || spacing <= 0.0 {
        return Vec::new();
    }

    const SAMPLES: usize = 100;

    // First pass: total polyline length.
    let mut total_length = 0.0;
    let mut segment_start = start.point();
    for segment in segments {
        let polygon = segment.control_polygon(segment_start);
        let mut prev = polygon[0];
        for i in 1..=SAMPLES {
            let pos = curve_point(i as f64 / SAMPLES as f64, &polygon);
            total_length += pos.distance_to(&prev);
            prev = pos;
        }
        segment_start = segment.end_point.point();
    }

    // Second pass: emit a layer every `spacing` inches of accumulated
    // length, interpolating the parameter inside the crossing chord.
    let mut layers = Vec::new();
    let mut accumulated = 0.0;
    let mut next_layer_distance = spacing;
    segment_start = start.point();

    for (segment_index, segment) in segments.iter().enumerate() {
        let polygon = segment.control_polygon(segment_start);
        let mut prev_pos = polygon[0];
        let mut prev_t = 0.0;

        for i in 1..=SAMPLES {
            let t = i as f64 / SAMPLES as f64;
            let pos = curve_point(t, &polygon);
            let chord = pos.distance_to(&prev_pos);
            accumulated += chord;

            while accumulated >= next_layer_distance && next_layer_distance <= total_length {
                let overshoot = accumulated - next_layer_distance;
                let within = if chord > 0.0 { 1.0 - overshoot / chord } else { 0.0 };
                let layer_t = prev_t + (t - prev_t) * within;
                let center = curve_point(layer_t, &polygon);
                let heading = segment_heading_at(segment, segment_start, layer_t);

                layers.push(OnionLayer {
                    x: center.x,
                    y: center.y,
                    heading,
                    corners: robot_corners(center.x, center.y, heading, robot_width, robot_height),
                    segment_index,
                });

                next_layer_distance += spacing;
            }

            prev_pos = pos;
            prev_t = t;
        }

        segment_start = segment.end_point.point();
    }

    trace!(count = layers.len(), spacing, "onion layers generated");
    layers
}
