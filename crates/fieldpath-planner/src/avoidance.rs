//! Obstacle avoidance: straight-segment clearance tests, a visibility
//! graph over expanded obstacle vertices, bounded A* search, and greedy
//! path smoothing.
//!
//! The planner degrades rather than fails: when the search budget runs
//! out it returns the direct `[start, end]` pair, which is not guaranteed
//! clear. Callers must re-validate with [`is_path_clear`] before trusting
//! a returned path.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, warn};

use fieldpath_core::geometry::polygon::{distance_to_segment, point_in_polygon};
use fieldpath_core::geometry::{lerp_point, polygon::expand_polygon};
use fieldpath_core::{Obstacle, Point};

/// Interior samples taken along a straight segment by the clearance test.
const CLEARANCE_SAMPLES: usize = 50;

/// Clearance multiples at which obstacle vertices become waypoints.
const CLEARANCE_RINGS: [f64; 3] = [1.5, 2.0, 2.5];

/// A* expansion budget.
const MAX_EXPANSIONS: usize = 1000;

fn segment_too_close(start: Point, end: Point, polygon: &[Point], min_distance: f64) -> bool {
    for i in 0..=CLEARANCE_SAMPLES {
        let t = i as f64 / CLEARANCE_SAMPLES as f64;
        let point = lerp_point(t, start, end);

        if point_in_polygon(point, polygon) {
            return true;
        }

        for j in 0..polygon.len() {
            let k = (j + 1) % polygon.len();
            if distance_to_segment(point, polygon[j], polygon[k]) < min_distance {
                return true;
            }
        }
    }

    false
}

/// Whether the straight segment keeps at least `clearance` from every
/// obstacle. Obstacles with fewer than three vertices are ignored.
pub fn is_path_clear(start: Point, end: Point, obstacles: &[Obstacle], clearance: f64) -> bool {
    for obstacle in obstacles {
        if obstacle.vertices.len() < 3 {
            continue;
        }
        if segment_too_close(start, end, &obstacle.vertices, clearance) {
            return false;
        }
    }
    true
}

/// Candidate waypoints: the endpoints plus every obstacle vertex pushed
/// out at each clearance ring, filtered to the field bounds.
pub fn visibility_waypoints(
    start: Point,
    end: Point,
    obstacles: &[Obstacle],
    robot_radius: f64,
    field_min: f64,
    field_max: f64,
) -> Vec<Point> {
    let mut waypoints = vec![start];

    for obstacle in obstacles {
        if obstacle.vertices.len() < 3 {
            continue;
        }

        for clearance in CLEARANCE_RINGS {
            let expanded = expand_polygon(&obstacle.vertices, robot_radius * clearance);
            for vertex in expanded {
                if vertex.x >= field_min
                    && vertex.x <= field_max
                    && vertex.y >= field_min
                    && vertex.y <= field_max
                {
                    waypoints.push(vertex);
                }
            }
        }
    }

    waypoints.push(end);
    waypoints
}

struct SearchNode {
    index: usize,
    g_cost: f64,
    f_cost: f64,
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a waypoint path from `start` to `end` around the obstacles.
///
/// Returns the direct pair when it is already clear. Otherwise builds a
/// visibility graph over the expanded obstacle vertices and runs A* with
/// the Euclidean heuristic, bounded to [`MAX_EXPANSIONS`] expansions. On
/// exhaustion the direct `[start, end]` pair comes back as a degraded
/// fallback; this function never errors.
pub fn find_path_around_obstacles(
    start: Point,
    end: Point,
    obstacles: &[Obstacle],
    robot_radius: f64,
    field_min: f64,
    field_max: f64,
) -> Vec<Point> {
    if is_path_clear(start, end, obstacles, robot_radius) {
        debug!("direct path is clear");
        return vec![start, end];
    }

    let waypoints = visibility_waypoints(start, end, obstacles, robot_radius, field_min, field_max);
    debug!(count = waypoints.len(), "direct path blocked, building visibility graph");

    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); waypoints.len()];
    for i in 0..waypoints.len() {
        for j in i + 1..waypoints.len() {
            if is_path_clear(waypoints[i], waypoints[j], obstacles, robot_radius) {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }

    let start_index = 0;
    let end_index = waypoints.len() - 1;

    let mut g_score = vec![f64::INFINITY; waypoints.len()];
    let mut came_from: HashMap<usize, usize> = HashMap::new();
    let mut open = BinaryHeap::new();

    g_score[start_index] = 0.0;
    open.push(SearchNode {
        index: start_index,
        g_cost: 0.0,
        f_cost: waypoints[start_index].distance_to(&waypoints[end_index]),
    });

    let mut expansions = 0;

    while let Some(current) = open.pop() {
        if expansions >= MAX_EXPANSIONS {
            break;
        }
        expansions += 1;

        if current.index == end_index {
            let mut path = vec![waypoints[end_index]];
            let mut cursor = end_index;
            while let Some(&previous) = came_from.get(&cursor) {
                cursor = previous;
                path.push(waypoints[cursor]);
            }
            path.reverse();
            debug!(expansions, length = path.len(), "A* found a path");
            return path;
        }

        // Stale queue entry for a node already reached more cheaply.
        if current.g_cost > g_score[current.index] {
            continue;
        }

        for &neighbor in &neighbors[current.index] {
            let tentative =
                current.g_cost + waypoints[current.index].distance_to(&waypoints[neighbor]);
            if tentative < g_score[neighbor] {
                g_score[neighbor] = tentative;
                came_from.insert(neighbor, current.index);
                open.push(SearchNode {
                    index: neighbor,
                    g_cost: tentative,
                    f_cost: tentative + waypoints[neighbor].distance_to(&waypoints[end_index]),
                });
            }
        }
    }

    warn!(expansions, "A* exhausted its budget; returning direct segment");
    vec![start, end]
}

/// Drop waypoints that a straight clear segment can skip, greedily
/// jumping to the farthest visible waypoint.
pub fn smooth_path(path: &[Point], obstacles: &[Obstacle], robot_radius: f64) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut smoothed = vec![path[0]];
    let mut current = 0;

    while current < path.len() - 1 {
        let mut farthest = current + 1;

        for i in (current + 2..path.len()).rev() {
            if is_path_clear(path[current], path[i], obstacles, robot_radius) {
                farthest = i;
                break;
            }
        }

        smoothed.push(path[farthest]);
        current = farthest;
    }

    smoothed
}
