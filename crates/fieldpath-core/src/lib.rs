//! # FieldPath Core
//!
//! Geometry, curve, and path-model primitives for the FieldPath
//! autonomous-path engine: 2D vector and oriented-rectangle math, cubic
//! Bezier curves with the field-region collision metric, the path/segment
//! data model, motion settings, and overlay geometry.
//!
//! Everything is a pure function over plain data; the only state is what
//! callers construct and own.

pub mod curve;
pub mod error;
pub mod field;
pub mod geometry;
pub mod overlay;
pub mod path;
pub mod settings;

pub use curve::CubicCurve;
pub use error::{Error, ModelError, Result, SettingsError};
pub use field::{Alliance, FIELD_CENTER, FIELD_SIZE};
pub use geometry::{rect::minimum_separating_width, OrientedRect, Point};
pub use path::{
    segment_end_heading, segment_heading_at, segment_start_heading, start_point_heading, Heading,
    Obstacle, PathPoint, Segment, SequenceItem, WaitSpec,
};
pub use settings::Settings;
