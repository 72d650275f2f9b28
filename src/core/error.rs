//! Error types for tree generation

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected before generation starts; no partial mesh is produced.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid polygon count {0}: a tube needs at least 3 sides")]
    InvalidPolygonCount(u32),

    #[error("Degenerate rotation axis: axis endpoints coincide")]
    DegenerateAxis,

    #[error("Degenerate segment: parent segment has zero length")]
    DegenerateSegment,

    #[error("Zero-magnitude vector cannot be normalized")]
    ZeroMagnitude,

    #[error("Preset error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] naming the offending field.
    pub(crate) fn config(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Configuration(format!("{field} {reason}"))
    }
}
