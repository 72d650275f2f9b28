//! Procedural tree generation
//!
//! A tree is grown recursively from a vertical trunk: every node adds one tube segment,
//! forks into up to `max_branches` children and ends in foliage once its depth is used up.
//! Two growth habits share the recursion:
//! - Broadleaf: every level bends away from its parent
//! - Pine: a straight main stem that keeps extending, with whorls of shorter bent branches
//!
//! All randomness comes from one seeded stream, so a `(params, seed)` pair always grows
//! the same tree.

pub mod branch;
pub mod foliage;
pub mod params;
pub mod tube;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::core::types::Result;
use crate::mesh::MeshOutput;

pub use branch::{BranchEngine, BranchState, Habit, WhorlLevel};
pub use foliage::scatter_foliage;
pub use params::{TreeKind, TreeParams};
pub use tube::build_tube;

/// Grow the tree described by `params`, dispatching on [`TreeParams::kind`]
pub fn generate(params: &TreeParams, seed: u64) -> Result<MeshOutput> {
    match params.kind {
        TreeKind::Broadleaf => generate_broadleaf(params, seed),
        TreeKind::Pine => generate_pine(params, seed),
    }
}

/// Grow a broadleaf tree from a fresh stream seeded with `seed`
pub fn generate_broadleaf(params: &TreeParams, seed: u64) -> Result<MeshOutput> {
    grow_broadleaf(params, &mut Pcg64::seed_from_u64(seed))
}

/// Grow a pine tree from a fresh stream seeded with `seed`
pub fn generate_pine(params: &TreeParams, seed: u64) -> Result<MeshOutput> {
    grow_pine(params, &mut Pcg64::seed_from_u64(seed))
}

/// Grow a broadleaf tree drawing from a caller-owned stream
pub fn grow_broadleaf<R: Rng + ?Sized>(params: &TreeParams, rng: &mut R) -> Result<MeshOutput> {
    grow(params, Habit::Broadleaf, rng)
}

/// Grow a pine tree drawing from a caller-owned stream
pub fn grow_pine<R: Rng + ?Sized>(params: &TreeParams, rng: &mut R) -> Result<MeshOutput> {
    grow(params, Habit::Pine(WhorlLevel::Stem), rng)
}

fn grow<R: Rng + ?Sized>(params: &TreeParams, habit: Habit, rng: &mut R) -> Result<MeshOutput> {
    let root = BranchState::root(params, habit);
    BranchEngine::new(params, rng).run(root)
}

/// Uniform sample in `low..high`, one draw
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * rng.random::<f64>()
}

/// True with probability `p`, one draw
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}
