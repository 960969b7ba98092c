//! Constant-heading travel dynamics along a curve.
//!
//! Models a robot holding a fixed heading while following a curve under a
//! velocity cap, kinetic friction, and a lateral-drag term that grows with
//! the misalignment between the heading and the local path direction. The
//! state is the robot position; the derivative is a velocity vector that
//! slows as the heading diverges from the path tangent.

use fieldpath_core::{CubicCurve, Point};

/// Integration step, seconds.
pub const STEP: f64 = 0.005;

/// Integration horizon, seconds.
pub const HORIZON: f64 = 30.0;

/// Length of the resampled trace consumed downstream.
pub const TRACE_POINTS: usize = 1000;

/// The differential equation of constant-heading travel.
pub struct ConstantHeadingDynamics<'a> {
    theta: f64,
    v_max: f64,
    mass: f64,
    mu_k: f64,
    lateral_drag: f64,
    curve: &'a CubicCurve,
}

impl<'a> ConstantHeadingDynamics<'a> {
    pub fn new(
        theta: f64,
        v_max: f64,
        mass: f64,
        mu_k: f64,
        lateral_drag: f64,
        curve: &'a CubicCurve,
    ) -> Self {
        Self {
            theta,
            v_max,
            mass,
            mu_k,
            lateral_drag,
            curve,
        }
    }

    /// Velocity vector at `state = [x, y]`.
    ///
    /// Projects the heading onto the local tangent, subtracts friction and
    /// misalignment drag scaled by the tangent magnitude, and normalizes
    /// by the squared tangent magnitude. A vanishing tangent (degenerate
    /// curve) clamps the derivative to zero.
    pub fn derivatives(&self, state: [f64; 2]) -> [f64; 2] {
        let t = self.curve.invert(Point::new(state[0], state[1]));
        let tangent = self.curve.derivative(t);

        let tangent_norm = (tangent.x * tangent.x + tangent.y * tangent.y).sqrt();
        if tangent_norm < f64::EPSILON {
            return [0.0, 0.0];
        }

        let dot = tangent.x * self.theta.cos() + tangent.y * self.theta.sin();
        let path_angle = self.curve.theta(t);

        let scalar = (dot * self.v_max
            - tangent_norm
                * (self.mu_k * self.mass
                    + self.lateral_drag * (self.theta - path_angle).sin().abs()))
            / (tangent_norm * tangent_norm);

        [scalar * tangent.x, scalar * tangent.y]
    }
}

/// Integrate the dynamics from the curve start over the 30 s horizon with
/// a fixed-step four-stage scheme using Gill's stage coefficients, then
/// resample the trace to exactly [`TRACE_POINTS`] points by linear
/// interpolation.
pub fn integrate(dynamics: &ConstantHeadingDynamics<'_>, start: Point) -> Vec<Point> {
    let steps = (HORIZON / STEP).ceil() as usize;
    let mut y = [start.x, start.y];
    let mut trace = Vec::with_capacity(steps + 1);
    trace.push(Point::new(y[0], y[1]));

    let sqrt2 = std::f64::consts::SQRT_2;
    let c1 = 0.5;
    let c2 = (sqrt2 - 1.0) / 2.0;
    let c3 = (2.0 - sqrt2) / 2.0;

    for _ in 0..steps {
        let k1 = dynamics.derivatives(y);

        let stage2 = [y[0] + STEP * c1 * k1[0], y[1] + STEP * c1 * k1[1]];
        let k2 = dynamics.derivatives(stage2);

        let stage3 = [
            y[0] + STEP * (c2 * k1[0] + c3 * k2[0]),
            y[1] + STEP * (c2 * k1[1] + c3 * k2[1]),
        ];
        let k3 = dynamics.derivatives(stage3);

        let stage4 = [
            y[0] + STEP * (k1[0] - 0.5 * k2[0] + k3[0]),
            y[1] + STEP * (k1[1] - 0.5 * k2[1] + k3[1]),
        ];
        let k4 = dynamics.derivatives(stage4);

        y[0] += STEP * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]) / 6.0;
        y[1] += STEP * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]) / 6.0;

        trace.push(Point::new(y[0], y[1]));
    }

    resample(&trace, TRACE_POINTS)
}

fn resample(points: &[Point], n: usize) -> Vec<Point> {
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let idx = (i * (points.len() - 1)) as f64 / (n - 1) as f64;
        let low = idx.floor() as usize;
        let high = idx.ceil() as usize;
        let frac = idx - low as f64;

        result.push(Point::new(
            points[low].x * (1.0 - frac) + points[high].x * frac,
            points[low].y * (1.0 - frac) + points[high].y * frac,
        ));
    }
    result
}

/// Simulated time at which the trace's straight-line distance from the
/// origin best matches `target_length`, scaled onto the 30 s horizon.
///
/// This is a terminal-time estimate over the resampled trace, not an
/// exact arc-length-matched time.
pub fn find_t1(trace: &[Point], target_length: f64) -> f64 {
    let origin = Point::new(0.0, 0.0);
    let mut best_index = 0;
    let mut best = (trace[best_index].distance_to(&origin) - target_length).abs();

    for (i, point) in trace.iter().enumerate() {
        let diff = (point.distance_to(&origin) - target_length).abs();
        if diff < best {
            best_index = i;
            best = diff;
        }
    }

    (best_index as f64 * HORIZON) / (TRACE_POINTS - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_curve(length: f64) -> CubicCurve {
        CubicCurve::new(
            Point::new(0.0, 0.0),
            Point::new(length / 3.0, 0.0),
            Point::new(2.0 * length / 3.0, 0.0),
            Point::new(length, 0.0),
        )
    }

    #[test]
    fn test_aligned_heading_velocity() {
        // On a straight x-axis curve with theta = 0, the tangent is
        // (length, 0) everywhere, so dx = v_max - mu_k * mass exactly.
        let curve = straight_curve(100.0);
        let dynamics = ConstantHeadingDynamics::new(0.0, 40.0, 10.0, 0.4, 5.0, &curve);
        let d = dynamics.derivatives([10.0, 0.0]);
        assert!((d[0] - (40.0 - 0.4 * 10.0)).abs() < 1e-9);
        assert!(d[1].abs() < 1e-9);
    }

    #[test]
    fn test_misaligned_heading_is_slower() {
        let curve = straight_curve(100.0);
        let aligned = ConstantHeadingDynamics::new(0.0, 40.0, 10.0, 0.4, 5.0, &curve);
        let skewed =
            ConstantHeadingDynamics::new(std::f64::consts::FRAC_PI_4, 40.0, 10.0, 0.4, 5.0, &curve);
        let va = aligned.derivatives([10.0, 0.0]);
        let vs = skewed.derivatives([10.0, 0.0]);
        assert!(vs[0] < va[0]);
    }

    #[test]
    fn test_degenerate_curve_clamps_to_rest() {
        let p = Point::new(50.0, 50.0);
        let curve = CubicCurve::new(p, p, p, p);
        let dynamics = ConstantHeadingDynamics::new(0.0, 40.0, 10.0, 0.4, 5.0, &curve);
        assert_eq!(dynamics.derivatives([50.0, 50.0]), [0.0, 0.0]);
    }

    #[test]
    fn test_trace_has_fixed_length() {
        let curve = straight_curve(60.0);
        let dynamics = ConstantHeadingDynamics::new(0.0, 40.0, 10.0, 0.4, 5.0, &curve);
        let trace = integrate(&dynamics, curve.p0());
        assert_eq!(trace.len(), TRACE_POINTS);
        assert_eq!(trace[0], curve.p0());
    }

    #[test]
    fn test_find_t1_scales_to_horizon() {
        let trace: Vec<Point> = (0..TRACE_POINTS)
            .map(|i| Point::new(i as f64 / 10.0, 0.0))
            .collect();
        // Distance 50 from origin is reached at index 500.
        let t1 = find_t1(&trace, 50.0);
        assert!((t1 - 500.0 * HORIZON / 999.0).abs() < 1e-9);
    }
}
