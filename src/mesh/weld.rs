//! Vertex welding for the trunk surface
//!
//! Tube segments are emitted as independent quads, so every ring vertex appears in two
//! faces of its own tube and, where segments join, in the faces of the neighbouring tube.
//! Welding shares one vertex between corners that lie within `tolerance` of each other.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;
use crate::mesh::Quad;

/// Indexed quad mesh with shared vertices
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeldedMesh {
    pub vertices: Vec<DVec3>,
    /// Indices into `vertices`, same winding as the source [`Quad`]s
    pub faces: Vec<[u32; 4]>,
}

impl WeldedMesh {
    /// Weld `quads`, merging each corner into the first earlier vertex within `tolerance`
    ///
    /// Vertices are bucketed into `tolerance`-sized cells and each corner checks its own
    /// cell and the 26 around it, so two corners closer than `tolerance` merge even when a
    /// cell boundary runs between them. A non-positive tolerance only merges bit-identical
    /// corners.
    pub fn from_quads(quads: &[Quad], tolerance: f64) -> Self {
        let mut mesh = Self {
            vertices: Vec::new(),
            faces: Vec::with_capacity(quads.len()),
        };
        let mut cells: HashMap<[i64; 3], Vec<u32>> = HashMap::new();
        let mut exact: HashMap<[u64; 3], u32> = HashMap::new();

        for quad in quads {
            let mut face = [0u32; 4];
            for (slot, corner) in face.iter_mut().zip(quad.corners()) {
                let next = mesh.vertices.len() as u32;
                let index = if tolerance > 0.0 {
                    let cell = cell_of(corner, tolerance);
                    let found = mesh.find_near(&cells, cell, corner, tolerance);
                    found.unwrap_or_else(|| {
                        cells.entry(cell).or_default().push(next);
                        next
                    })
                } else {
                    *exact.entry(corner.to_array().map(f64::to_bits)).or_insert(next)
                };
                if index == next {
                    mesh.vertices.push(corner);
                }
                *slot = index;
            }
            mesh.faces.push(face);
        }

        mesh
    }

    /// Earliest vertex within `tolerance` of `p` in `cell` or its neighbours
    fn find_near(
        &self,
        cells: &HashMap<[i64; 3], Vec<u32>>,
        cell: [i64; 3],
        p: DVec3,
        tolerance: f64,
    ) -> Option<u32> {
        let mut best: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [cell[0] + dx, cell[1] + dy, cell[2] + dz];
                    let Some(indices) = cells.get(&key) else {
                        continue;
                    };
                    let hit = indices
                        .iter()
                        .copied()
                        .find(|&i| self.vertices[i as usize].distance(p) <= tolerance);
                    if let Some(i) = hit {
                        best = Some(best.map_or(i, |b| b.min(i)));
                    }
                }
            }
        }
        best
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

fn cell_of(p: DVec3, tolerance: f64) -> [i64; 3] {
    (p / tolerance).floor().to_array().map(|v| v as i64)
}
