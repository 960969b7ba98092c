//! Cubic Bezier curves: evaluation, inversion, arc length, and the
//! field-region collision weight used as the optimizer objective.

use std::sync::OnceLock;

use crate::field::{self, Alliance};
use crate::geometry::rect::{minimum_separating_width, OrientedRect};
use crate::geometry::Point;

/// Number of chords summed for the arc-length approximation, and the
/// number of pose samples taken by [`CubicCurve::collision_weight`].
const ARC_SAMPLES: usize = 100;

/// A cubic Bezier curve over four control points.
///
/// The expanded polynomial coefficients are derived once at construction;
/// arc length is computed lazily on first use. Curves are value objects:
/// reconstruct rather than mutate.
#[derive(Debug, Clone)]
pub struct CubicCurve {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    coeff_x: [f64; 4],
    coeff_y: [f64; 4],
    arc_length: OnceLock<f64>,
}

impl CubicCurve {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        let coeff_x = [
            p3.x - 3.0 * p2.x + 3.0 * p1.x - p0.x,
            3.0 * p2.x - 6.0 * p1.x + 3.0 * p0.x,
            3.0 * p1.x - 3.0 * p0.x,
            p0.x,
        ];
        let coeff_y = [
            p3.y - 3.0 * p2.y + 3.0 * p1.y - p0.y,
            3.0 * p2.y - 6.0 * p1.y + 3.0 * p0.y,
            3.0 * p1.y - 3.0 * p0.y,
            p0.y,
        ];

        Self {
            p0,
            p1,
            p2,
            p3,
            coeff_x,
            coeff_y,
            arc_length: OnceLock::new(),
        }
    }

    pub fn p0(&self) -> Point {
        self.p0
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn p3(&self) -> Point {
        self.p3
    }

    /// Curve position at `t` in [0, 1], by Bernstein blending.
    ///
    /// `evaluate(0)` is exactly `p0` and `evaluate(1)` exactly `p3`.
    pub fn evaluate(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;
        let t2 = t * t;
        let t3 = t2 * t;

        Point {
            x: mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            y: mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        }
    }

    /// First derivative at `t`, from the expanded polynomial.
    pub fn derivative(&self, t: f64) -> Point {
        Point {
            x: polynomial_derivative(&self.coeff_x, t),
            y: polynomial_derivative(&self.coeff_y, t),
        }
    }

    /// Tangent direction at `t`, radians.
    pub fn theta(&self, t: f64) -> f64 {
        let d = self.derivative(t);
        d.y.atan2(d.x)
    }

    /// Parameter of the sampled curve position nearest to `point`.
    ///
    /// A coarse nearest-sample search over 101 evenly spaced parameters;
    /// callers must not assume sub-sample accuracy.
    pub fn invert(&self, point: Point) -> f64 {
        let mut best_t = 0.5;
        let mut best_distance = f64::MAX;

        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let distance = self.evaluate(t).distance_to(&point);
            if distance < best_distance {
                best_distance = distance;
                best_t = t;
            }
        }

        best_t
    }

    /// Approximate arc length as the sum of 100 uniform chords, computed
    /// once and cached.
    pub fn arc_length(&self) -> f64 {
        *self.arc_length.get_or_init(|| {
            let mut length = 0.0;
            let mut prev = self.evaluate(0.0);

            for i in 1..=ARC_SAMPLES {
                let point = self.evaluate(i as f64 / ARC_SAMPLES as f64);
                length += point.distance_to(&prev);
                prev = point;
            }

            length
        })
    }

    /// Penetration score of a robot of the given footprint traversing this
    /// curve at the fixed `heading` (degrees), against the five static
    /// field regions.
    ///
    /// The sampling loop overwrites the five overlap values on every
    /// iteration, so only the final sample contributes to the returned
    /// score. Optimizer tuning depends on this; do not aggregate without a
    /// matching retune.
    pub fn collision_weight(
        &self,
        alliance: Alliance,
        heading: f64,
        boundary_tolerance: f64,
        restricted_zone_tolerance: f64,
        robot_width: f64,
        robot_height: f64,
    ) -> f64 {
        let restricted = field::restricted_zone(restricted_zone_tolerance);
        let divider = field::alliance_divider(boundary_tolerance);
        let outer = field::outer_wall(alliance, boundary_tolerance);
        let side_low = field::side_wall_low(boundary_tolerance);
        let side_high = field::side_wall_high(boundary_tolerance);

        let mut a = 0.0;
        let mut b = 0.0;
        let mut c = 0.0;
        let mut d = 0.0;
        let mut e = 0.0;

        for i in 0..ARC_SAMPLES {
            let center = self.evaluate(i as f64 / ARC_SAMPLES as f64);
            let robot = OrientedRect::from_center(center, robot_width, robot_height, heading);

            a = minimum_separating_width(&robot, &restricted);
            b = minimum_separating_width(&robot, &divider);
            c = minimum_separating_width(&robot, &outer);
            d = minimum_separating_width(&robot, &side_low);
            e = minimum_separating_width(&robot, &side_high);
        }

        20.0 * (a + b + c + d + e) / ARC_SAMPLES as f64
    }
}

fn polynomial_derivative(coefficients: &[f64; 4], t: f64) -> f64 {
    let mut result = 0.0;
    for (i, &coefficient) in coefficients.iter().take(3).enumerate() {
        let power = (3 - i) as f64;
        result += power * coefficient * t.powi(2 - i as i32);
    }
    result
}
