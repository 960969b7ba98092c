//! Shapes a segment's interior control points and travel heading so the
//! robot clears the field regions, then predicts the segment's travel and
//! rotation times from the heading dynamics.

use tracing::debug;

use fieldpath_core::{
    Alliance, CubicCurve, Heading, PathPoint, Point, Segment, FIELD_CENTER, FIELD_SIZE,
};

use crate::dynamics::{self, ConstantHeadingDynamics};
use crate::optimizer::BoundedNelderMead;

/// Inputs to a single heading optimization.
#[derive(Debug, Clone)]
pub struct HeadingSolverConfig {
    /// Velocity cap, in/s.
    pub v_max: f64,
    /// Robot mass term in the friction product.
    pub mass: f64,
    /// Kinetic friction coefficient.
    pub mu_k: f64,
    /// Lateral drag applied per unit of heading/path misalignment.
    pub lateral_drag: f64,
    pub start: Point,
    pub end: Point,
    /// Heading at the start of the segment, radians.
    pub theta_initial: f64,
    /// Required heading at the segment end, radians.
    pub theta_final: f64,
    /// Angular velocity, rad/s.
    pub angular_velocity: f64,
    pub boundary_tolerance: f64,
    pub restricted_zone_tolerance: f64,
    pub alliance: Alliance,
    pub robot_width: f64,
    pub robot_height: f64,
}

/// Result of a heading optimization: the shaped curve, the travel heading,
/// the simulated travel time `t1`, and the rotation time `t2`.
#[derive(Debug, Clone)]
pub struct SolutionPoint {
    theta: f64,
    curve: CubicCurve,
    t1: f64,
    t2: f64,
}

impl SolutionPoint {
    pub fn new(theta: f64, curve: CubicCurve, t1: f64, t2: f64) -> Self {
        Self { theta, curve, t1, t2 }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn curve(&self) -> &CubicCurve {
        &self.curve
    }

    pub fn t1(&self) -> f64 {
        self.t1
    }

    pub fn t2(&self) -> f64 {
        self.t2
    }

    /// Total predicted time to follow the path and settle the rotation.
    pub fn target_time(&self) -> f64 {
        self.t1 + self.t2
    }

    /// Convert the optimized curve into a constant-heading path segment.
    pub fn to_segment(&self, degrees: f64) -> Segment {
        let end = self.curve.p3();
        Segment::new(PathPoint::new(end.x, end.y, Heading::Constant { degrees }))
            .with_control_points(vec![self.curve.p1(), self.curve.p2()])
    }
}

/// Bounded search over `[theta, p1.x, p1.y, p2.x, p2.y]` minimizing the
/// curve's field-region collision weight.
pub struct HeadingSolver {
    config: HeadingSolverConfig,
}

impl HeadingSolver {
    pub fn new(config: HeadingSolverConfig) -> Self {
        Self { config }
    }

    fn optimize_control_points(&self) -> Vec<f64> {
        let cfg = &self.config;

        let initial_guess = [
            cfg.theta_final,
            cfg.start.x,
            (cfg.start.y + cfg.end.y) / 2.0,
            cfg.start.x,
            cfg.end.y,
        ];

        // Keep interior control points inside the field less the robot's
        // smaller half-extent and the boundary tolerance.
        let inset = cfg.boundary_tolerance + cfg.robot_width.min(cfg.robot_height);
        let lower = vec![0.0, inset, inset, inset, inset];
        let upper = vec![
            std::f64::consts::TAU,
            FIELD_CENTER - inset,
            FIELD_SIZE - inset,
            FIELD_CENTER - inset,
            FIELD_SIZE - inset,
        ];

        let optimizer = BoundedNelderMead::new(lower, upper);

        let result = optimizer.optimize(
            |point| {
                let theta = point[0];
                let p1 = Point::new(point[1], point[2]);
                let p2 = Point::new(point[3], point[4]);
                let curve = CubicCurve::new(cfg.start, p1, p2, cfg.end);

                curve.collision_weight(
                    cfg.alliance,
                    theta.to_degrees(),
                    cfg.boundary_tolerance,
                    cfg.restricted_zone_tolerance,
                    cfg.robot_width,
                    cfg.robot_height,
                )
            },
            &initial_guess,
        );

        debug!(value = result.value, "control-point optimization finished");
        result.point
    }

    fn find_t2(&self, theta: f64) -> f64 {
        ((self.config.theta_final - theta).abs() + (self.config.theta_initial - theta).abs())
            / self.config.angular_velocity
    }

    /// Run the optimization, integrate the dynamics over the shaped curve,
    /// and package the timing estimates.
    pub fn solve(&self) -> SolutionPoint {
        let cfg = &self.config;
        let solution = self.optimize_control_points();

        let theta = solution[0];
        let p1 = Point::new(solution[1], solution[2]);
        let p2 = Point::new(solution[3], solution[4]);
        let curve = CubicCurve::new(cfg.start, p1, p2, cfg.end);

        let equation = ConstantHeadingDynamics::new(
            theta,
            cfg.v_max,
            cfg.mass,
            cfg.mu_k,
            cfg.lateral_drag,
            &curve,
        );
        let trace = dynamics::integrate(&equation, cfg.start);
        let t1 = dynamics::find_t1(&trace, curve.arc_length());
        let t2 = self.find_t2(theta);

        SolutionPoint::new(theta, curve, t1, t2)
    }
}
