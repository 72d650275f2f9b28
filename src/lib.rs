//! Tubetree - procedural tree meshes from a handful of numbers and a seed

pub mod core;
pub mod math;
pub mod mesh;
pub mod procgen;

pub use crate::core::{Error, Result};
pub use mesh::{MeshOutput, WeldedMesh};
pub use procgen::{generate, generate_broadleaf, generate_pine, TreeKind, TreeParams};
