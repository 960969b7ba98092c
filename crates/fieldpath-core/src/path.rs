//! The path data model: heading policies, segments, waits, and build
//! sequences, plus the heading derivations every consumer shares.
//!
//! A path is a start point and an ordered list of segments; each segment
//! starts where the previous one ended. The heading policy is a tagged
//! variant matched exhaustively wherever orientation matters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{curve_point, shortest_rotation, tangent_angle, transform_angle, Point};

/// How a robot's orientation varies across a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "heading", rename_all = "lowercase")]
pub enum Heading {
    /// Interpolate from `start_deg` to `end_deg` along the segment.
    Linear { start_deg: f64, end_deg: f64 },
    /// Hold a fixed orientation.
    Constant { degrees: f64 },
    /// Follow the curve tangent, optionally facing backwards.
    Tangential { reverse: bool },
}

/// A position plus the heading policy that applies while traveling to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub heading: Heading,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, heading: Heading) -> Self {
        Self { x, y, heading }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A pause attached to a segment boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitSpec {
    pub name: Option<String>,
    pub duration_ms: f64,
}

/// One travel leg of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub name: Option<String>,
    pub end_point: PathPoint,
    /// Zero, one, or two interior control points.
    pub control_points: Vec<Point>,
    pub wait_before: Option<WaitSpec>,
    pub wait_after: Option<WaitSpec>,
}

impl Segment {
    pub fn new(end_point: PathPoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            end_point,
            control_points: Vec::new(),
            wait_before: None,
            wait_after: None,
        }
    }

    pub fn with_control_points(mut self, control_points: Vec<Point>) -> Self {
        self.control_points = control_points;
        self
    }

    pub fn validate(&self) -> Result<(), crate::error::ModelError> {
        if self.control_points.len() > 2 {
            return Err(crate::error::ModelError::TooManyControlPoints {
                count: self.control_points.len(),
            });
        }
        Ok(())
    }

    /// The Bezier control polygon from `previous` to this segment's end.
    pub fn control_polygon(&self, previous: Point) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.control_points.len() + 2);
        points.push(previous);
        points.extend_from_slice(&self.control_points);
        points.push(self.end_point.point());
        points
    }
}

/// A user-authored obstacle polygon. Persists for the editing session;
/// never generated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: Uuid,
    pub name: Option<String>,
    pub vertices: Vec<Point>,
}

impl Obstacle {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            vertices,
        }
    }

    pub fn validate(&self) -> Result<(), crate::error::ModelError> {
        if self.vertices.len() < 3 {
            return Err(crate::error::ModelError::DegeneratePolygon {
                name: self.name.clone().unwrap_or_else(|| self.id.to_string()),
                count: self.vertices.len(),
            });
        }
        Ok(())
    }
}

/// An item of an explicit build/playback sequence: a travel leg by
/// segment id, or a named wait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SequenceItem {
    Path { segment_id: Uuid },
    Wait { id: Uuid, name: String, duration_ms: f64 },
}

/// Heading the robot must hold when it begins traveling this segment.
pub fn segment_start_heading(segment: &Segment, previous: Point) -> f64 {
    match segment.end_point.heading {
        Heading::Constant { degrees } => degrees,
        Heading::Linear { start_deg, .. } => start_deg,
        Heading::Tangential { reverse } => {
            let next = segment
                .control_points
                .first()
                .copied()
                .unwrap_or_else(|| segment.end_point.point());
            let angle = tangent_angle(previous, next);
            if reverse {
                transform_angle(angle + 180.0)
            } else {
                transform_angle(angle)
            }
        }
    }
}

/// Heading the robot holds when it arrives at this segment's end point.
pub fn segment_end_heading(segment: &Segment, previous: Point) -> f64 {
    match segment.end_point.heading {
        Heading::Constant { degrees } => degrees,
        Heading::Linear { end_deg, .. } => end_deg,
        Heading::Tangential { reverse } => {
            let prev = segment.control_points.last().copied().unwrap_or(previous);
            let angle = tangent_angle(prev, segment.end_point.point());
            if reverse {
                transform_angle(angle + 180.0)
            } else {
                transform_angle(angle)
            }
        }
    }
}

/// Heading at fraction `t` of the segment.
///
/// Tangential headings are estimated by sampling the curve a short way
/// ahead (behind when reversed); the estimate degrades to 0 if the curve
/// is locally degenerate.
pub fn segment_heading_at(segment: &Segment, previous: Point, t: f64) -> f64 {
    match segment.end_point.heading {
        Heading::Linear { start_deg, end_deg } => shortest_rotation(start_deg, end_deg, t),
        Heading::Constant { degrees } => degrees,
        Heading::Tangential { reverse } => {
            let polygon = segment.control_polygon(previous);
            let here = curve_point(t, &polygon);
            let offset = if reverse { -0.01 } else { 0.01 };
            let next = curve_point(t + offset, &polygon);
            let dx = next.x - here.x;
            let dy = next.y - here.y;
            if dx != 0.0 || dy != 0.0 {
                dy.atan2(dx).to_degrees()
            } else {
                0.0
            }
        }
    }
}

/// Initial heading implied by the path's start point.
///
/// A tangential start aims at the first segment's first control point
/// (or its end point); without segments it falls back to 0.
pub fn start_point_heading(start: &PathPoint, segments: &[Segment]) -> f64 {
    match start.heading {
        Heading::Linear { start_deg, .. } => start_deg,
        Heading::Constant { degrees } => degrees,
        Heading::Tangential { reverse } => {
            let Some(first) = segments.first() else {
                return 0.0;
            };
            let next = first
                .control_points
                .first()
                .copied()
                .unwrap_or_else(|| first.end_point.point());
            let angle = tangent_angle(start.point(), next);
            if reverse {
                angle + 180.0
            } else {
                angle
            }
        }
    }
}
