//! Recursive branch growth
//!
//! The engine walks the tree depth-first. Each frame grows one tube segment from its
//! parent's tip, then either spawns up to `max_branches` children or, when the depth is
//! used up or every child is suppressed, ends in a foliage cluster. Children are visited
//! in ascending index order and every random draw comes from the single stream owned by
//! the engine, so a seed always reproduces the same tree.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;

use crate::core::types::{DVec3, GEOMETRY_EPSILON, Result};
use crate::core::Error;
use crate::math::rotation::{project_point_onto_line, rotate_point_about_axis};
use crate::mesh::MeshOutput;
use crate::procgen::foliage::scatter_foliage;
use crate::procgen::params::{TreeKind, TreeParams};
use crate::procgen::tube::build_tube;
use crate::procgen::{chance, uniform};

/// Base of the phantom segment the trunk continues from
const ROOT_PREV: DVec3 = DVec3::ZERO;

/// Where the trunk starts; `ROOT_PREV → ROOT_BASE` points the trunk up +Y
const ROOT_BASE: DVec3 = DVec3::Y;

/// Offset used to build the tilt axis perpendicular to the parent segment
const TILT_REFERENCE: DVec3 = DVec3::new(0.1, 0.0, 0.0);

/// Random length change applied to each child in turn (accumulates across siblings)
const LENGTH_JITTER: f64 = 0.5;

/// Floor for a jittered child length; a zero-length segment has no direction to grow along
const MIN_BRANCH_LENGTH: f64 = 0.01;

/// Depth and length scaling for pine whorl branches
const PINE_DEPTH_SCALE: f64 = 0.5;
const PINE_LENGTH_SCALE: f64 = 0.7;

/// Position of a pine frame within its whorl structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhorlLevel {
    /// Main stem; grows straight and re-spawns itself
    Stem,
    /// Branch of the main stem
    Branch,
    /// Branch of a branch
    Twig,
}

impl WhorlLevel {
    fn child(self) -> Self {
        match self {
            Self::Stem => Self::Branch,
            Self::Branch | Self::Twig => Self::Twig,
        }
    }
}

/// Which recursion variant a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Habit {
    Broadleaf,
    Pine(WhorlLevel),
}

impl Habit {
    /// Habit of the trunk frame for `kind`
    pub fn for_kind(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Broadleaf => Self::Broadleaf,
            TreeKind::Pine => Self::Pine(WhorlLevel::Stem),
        }
    }

    /// Growth form this habit belongs to
    pub fn kind(self) -> TreeKind {
        match self {
            Self::Broadleaf => TreeKind::Broadleaf,
            Self::Pine(_) => TreeKind::Pine,
        }
    }

    /// Whether this frame's segment tilts/shifts away from the parent axis
    fn bends(self) -> bool {
        !matches!(self, Self::Pine(WhorlLevel::Stem))
    }
}

/// Per-call recursion state; everything constant lives in [`TreeParams`]
#[derive(Debug, Clone, Copy)]
pub struct BranchState {
    pub depth: f64,
    pub length: f64,
    pub radius: f64,
    /// Parent tip; this frame's segment starts here
    pub base: DVec3,
    /// Parent base; `prev → base` is the parent axis
    pub prev: DVec3,
    /// Accumulated whorl rotation
    pub turn: f64,
    /// Deflection from the parent axis
    pub tilt: f64,
    /// Rotation around the parent axis
    pub shift: f64,
    pub first_segment_multiplier: f64,
    pub habit: Habit,
}

impl BranchState {
    /// The trunk frame for `params`, grown with `habit`
    pub fn root(params: &TreeParams, habit: Habit) -> Self {
        Self {
            depth: params.depth,
            length: params.base_length,
            radius: params.base_radius,
            base: ROOT_BASE,
            prev: ROOT_PREV,
            turn: 0.0,
            tilt: 0.0,
            shift: 0.0,
            first_segment_multiplier: params.first_segment_multiplier,
            habit,
        }
    }
}

/// Grows one tree into a [`MeshOutput`]
pub struct BranchEngine<'a, R: Rng + ?Sized> {
    params: &'a TreeParams,
    rng: &'a mut R,
    mesh: MeshOutput,
}

impl<'a, R: Rng + ?Sized> BranchEngine<'a, R> {
    pub fn new(params: &'a TreeParams, rng: &'a mut R) -> Self {
        Self {
            params,
            rng,
            mesh: MeshOutput::new(params.materials),
        }
    }

    /// Grow from `root` and return everything emitted
    ///
    /// `params` are validated for the habit of `root` before the first draw, so the
    /// segment budget matches the form actually grown.
    pub fn run(mut self, root: BranchState) -> Result<MeshOutput> {
        self.params.validate_for(root.habit.kind())?;
        self.grow(root)?;
        log::debug!(
            "Grew {:?} tree: {} segments, {} foliage clusters, {} suppressed branches",
            root.habit,
            self.mesh.stats.segments,
            self.mesh.stats.foliage_clusters,
            self.mesh.stats.suppressed_branches,
        );
        Ok(self.mesh)
    }

    fn grow(&mut self, state: BranchState) -> Result<()> {
        if state.depth <= 0.0 {
            return Ok(());
        }
        let params = self.params;

        let tip = self.segment_tip(&state)?;
        let quads = build_tube(
            state.base,
            tip,
            state.prev,
            state.radius,
            state.radius * params.radius_decay,
            params.polygon_count,
        )?;
        self.mesh.push_segment(quads);

        let mut length = state.length * params.length_decay;
        let radius = state.radius * params.radius_decay;
        let depth = state.depth - 1.0;

        if state.habit == Habit::Pine(WhorlLevel::Stem) {
            // Straight continuation of the main stem, grown before this level's whorl
            self.grow(BranchState {
                depth,
                length,
                radius,
                base: tip,
                prev: state.base,
                first_segment_multiplier: 1.0,
                ..state
            })?;
        }

        let mut suppressed = 0;
        if depth > 0.0 {
            let mut tilt = params.branch_angle;
            let mut turn = state.turn + FRAC_PI_2;

            for i in 0..params.max_branches {
                length += uniform(self.rng, -LENGTH_JITTER, LENGTH_JITTER);
                if chance(self.rng, params.turn_chance) {
                    turn += uniform(self.rng, -params.turn_amount, params.turn_amount);
                }
                if chance(self.rng, params.angle_chance) {
                    tilt += uniform(self.rng, -params.angle_amount, params.angle_amount);
                }
                if chance(self.rng, 1.0 - params.branch_chance) {
                    suppressed += 1;
                    self.mesh.stats.suppressed_branches += 1;
                    log::trace!("Suppressed branch {} at depth {:.2}", i, depth);
                    continue;
                }

                let shift = f64::from(i) * (TAU / f64::from(params.max_branches)) + turn;
                let child_length = length.max(MIN_BRANCH_LENGTH);
                let (child_depth, child_length, habit) = match state.habit {
                    Habit::Broadleaf => (depth, child_length, Habit::Broadleaf),
                    Habit::Pine(level) => (
                        depth * PINE_DEPTH_SCALE,
                        child_length * PINE_LENGTH_SCALE,
                        Habit::Pine(level.child()),
                    ),
                };

                self.grow(BranchState {
                    depth: child_depth,
                    length: child_length,
                    radius,
                    base: tip,
                    prev: state.base,
                    turn,
                    tilt,
                    shift,
                    first_segment_multiplier: 1.0,
                    habit,
                })?;
            }
        }

        if suppressed == params.max_branches || depth <= 0.0 {
            let proxies = scatter_foliage(
                tip,
                params.foliage_count,
                params.foliage_spread,
                params.foliage_size,
                params.foliage_resolution,
                self.rng,
            )?;
            log::trace!("Foliage cluster of {} at {:?}", proxies.len(), tip);
            self.mesh.push_foliage_cluster(proxies);
        }

        Ok(())
    }

    /// Where this frame's segment ends
    ///
    /// The segment first continues the parent axis by `length * first_segment_multiplier`.
    /// A bending frame then tilts that point about an axis perpendicular to the parent
    /// and swings it around the parent direction by `shift`.
    fn segment_tip(&self, state: &BranchState) -> Result<DVec3> {
        let axis = state.base - state.prev;
        let magnitude = axis.length();
        if magnitude <= GEOMETRY_EPSILON {
            return Err(Error::DegenerateSegment);
        }

        let branch_length = state.length * state.first_segment_multiplier;
        let straight = state.base + axis / magnitude * branch_length;
        if !state.habit.bends() {
            return Ok(straight);
        }

        let reference = state.base + TILT_REFERENCE;
        let pivot = project_point_onto_line(state.base, state.prev, reference)?;
        let tilted = rotate_point_about_axis(pivot, reference, straight, state.tilt)?;
        rotate_point_about_axis(state.base, straight, tilted, state.shift)
    }
}
