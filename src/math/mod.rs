//! Mathematical utilities and data structures

pub mod aabb;
pub mod rotation;

pub use aabb::Aabb;
pub use rotation::{perpendicular_offset_point, project_point_onto_line, rotate_point_about_axis};
