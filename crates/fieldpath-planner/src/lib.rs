//! # FieldPath Planner
//!
//! The numerical planning layer of the FieldPath engine: the
//! constant-heading dynamics solver, the bounded control-point optimizer
//! that shapes curves away from field boundaries, and the
//! obstacle-avoidance planner (visibility graph + A* with smoothing).
//!
//! All entry points are pure functions over snapshots of the path model;
//! degraded results are returned, never raised.

pub mod avoidance;
pub mod dynamics;
pub mod optimizer;
pub mod solver;

pub use avoidance::{find_path_around_obstacles, is_path_clear, smooth_path, visibility_waypoints};
pub use dynamics::{find_t1, integrate, ConstantHeadingDynamics};
pub use optimizer::{BoundedNelderMead, OptimizationResult};
pub use solver::{HeadingSolver, HeadingSolverConfig, SolutionPoint};
