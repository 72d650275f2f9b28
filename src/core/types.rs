//! Core type aliases and re-exports

pub use glam::{DMat3, DVec3};

/// Standard Result type for tree generation
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Lengths below this are treated as zero by the geometry helpers
pub const GEOMETRY_EPSILON: f64 = 1e-12;
