//! Generated mesh primitives handed to the host
//!
//! A generation run produces trunk/branch surface quads and foliage placement records.
//! The host decides how to instantiate them: welding the quads into one mesh (see
//! [`MeshOutput::weld`]), tessellating each foliage proxy and binding the two material
//! colors.

pub mod weld;

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;
use crate::math::Aabb;

pub use weld::WeldedMesh;

/// One face of a tube segment
///
/// Corners are ordered tip-current, base-current, base-next, tip-next.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub p0: DVec3,
    pub p1: DVec3,
    pub p2: DVec3,
    pub p3: DVec3,
}

impl Quad {
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Corners in winding order
    pub fn corners(&self) -> [DVec3; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }
}

/// Placeholder for a leaf cluster
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoliageProxy {
    pub center: DVec3,
    pub size: f64,
    /// Subdivision level the host should apply to its sphere-like primitive
    pub resolution: u32,
}

/// RGB colors (0.0 - 1.0) the host binds to the trunk and foliage meshes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialColors {
    pub bark: [f32; 3],
    pub foliage: [f32; 3],
}

impl Default for MaterialColors {
    fn default() -> Self {
        Self {
            bark: [0.4, 0.3, 0.3],
            foliage: [0.30, 0.7, 0.40],
        }
    }
}

/// Counters collected while walking the tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Tube segments emitted
    pub segments: usize,
    /// Calls that ended in foliage placement
    pub foliage_clusters: usize,
    /// Child branches dropped by the branch-chance roll
    pub suppressed_branches: usize,
}

/// Everything one generation run produces
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshOutput {
    /// Trunk and branch surface, in emission order
    pub quads: Vec<Quad>,
    /// Foliage proxies, in emission order
    pub foliage: Vec<FoliageProxy>,
    pub stats: GenerationStats,
    pub materials: MaterialColors,
}

impl MeshOutput {
    pub fn new(materials: MaterialColors) -> Self {
        Self {
            materials,
            ..Self::default()
        }
    }

    /// Append the quads of one tube segment
    pub fn push_segment(&mut self, quads: impl IntoIterator<Item = Quad>) {
        self.quads.extend(quads);
        self.stats.segments += 1;
    }

    /// Append the proxies of one foliage cluster
    pub fn push_foliage_cluster(&mut self, proxies: impl IntoIterator<Item = FoliageProxy>) {
        self.foliage.extend(proxies);
        self.stats.foliage_clusters += 1;
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn foliage_count(&self) -> usize {
        self.foliage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.foliage.is_empty()
    }

    /// Bounds over every quad corner and every foliage proxy (treated as a cube of
    /// half-extent `size` around its center)
    pub fn bounds(&self) -> Option<Aabb> {
        let trunk = Aabb::from_points(self.quads.iter().flat_map(Quad::corners));
        self.foliage
            .iter()
            .map(|f| Aabb::from_center_half_extent(f.center, DVec3::splat(f.size)))
            .chain(trunk)
            .reduce(|a, b| a.merged(&b))
    }

    /// One-line description: counts plus the center and size of [`MeshOutput::bounds`]
    pub fn summary(&self) -> String {
        let (center, size) = self
            .bounds()
            .map(|b| (b.center(), b.size()))
            .unwrap_or_default();
        format!(
            "segments={} quads={} foliage_clusters={} foliage={} suppressed={} \
             center=({:.2}, {:.2}, {:.2}) size=({:.2}, {:.2}, {:.2})",
            self.stats.segments,
            self.quad_count(),
            self.stats.foliage_clusters,
            self.foliage_count(),
            self.stats.suppressed_branches,
            center.x,
            center.y,
            center.z,
            size.x,
            size.y,
            size.z,
        )
    }

    /// Merge coincident quad corners into an indexed mesh
    pub fn weld(&self, tolerance: f64) -> WeldedMesh {
        WeldedMesh::from_quads(&self.quads, tolerance)
    }
}
