//! Error types for the FieldPath engine.
//!
//! The geometry and timing layers degrade or clamp instead of failing, so
//! errors only arise at data boundaries: invalid settings and malformed
//! model inputs.

use thiserror::Error;

/// Errors raised while validating user-editable settings.
#[derive(Error, Debug, Clone)]
pub enum SettingsError {
    /// A settings value is out of its valid range.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Errors raised while validating model inputs.
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// A polygon needs at least three vertices to participate in planning.
    #[error("Obstacle '{name}' has {count} vertices; at least 3 required")]
    DegeneratePolygon { name: String, count: usize },

    /// A segment carries more interior control points than a cubic allows.
    #[error("Segment has {count} control points; at most 2 supported")]
    TooManyControlPoints { count: usize },
}

/// Unified error type for FieldPath APIs.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
