//! # FieldPath Timeline
//!
//! Timing layer of the FieldPath engine: trapezoidal/triangular motion
//! profiles, the timeline builder that turns a path and its settings into
//! an ordered event sequence, and the playback scheduler that maps
//! wall-clock time back onto robot poses.

pub mod builder;
pub mod playback;
pub mod profile;

pub use builder::{
    animation_duration_ms, calculate_path_time, format_time, TimePrediction, TimelineEvent,
};
pub use playback::{robot_state, Playback, RobotState};
pub use profile::MotionProfile;
