//! Tree generation parameters, presets and eager validation

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::core::Error;
use crate::mesh::MaterialColors;

/// Hard cap on configured depth so recursion depth stays bounded
pub const MAX_TREE_DEPTH: f64 = 16.0;

/// Hard cap on children per node
pub const MAX_BRANCHES: u32 = 16;

/// Worst-case segment budget (every branch taken) accepted by [`TreeParams::validate`]
pub const MAX_SEGMENTS: u64 = 1_000_000;

/// Number of jitter offsets drawn per foliage cluster, and so the most proxies one
/// cluster can hold
pub const FOLIAGE_JITTER_POOL: usize = 20;

/// Growth form of the generated tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    /// Every level bends away from its parent
    #[default]
    Broadleaf,
    /// Straight main stem with whorls of bent, tapering branches
    Pine,
}

/// Parameters for one tree
///
/// Missing keys in a JSON preset fall back to [`TreeParams::broadleaf`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Which recursion variant [`crate::procgen::generate`] runs
    pub kind: TreeKind,
    /// Sides per tube segment
    pub polygon_count: u32,
    /// Number of levels; fractional values shorten the tree
    pub depth: f64,
    /// Length of the trunk segment before the first-segment multiplier
    pub base_length: f64,
    /// Scales the trunk segment only
    pub first_segment_multiplier: f64,
    /// Length ratio from a segment to its children (0.0 - 1.0)
    pub length_decay: f64,
    /// Trunk radius at the base
    pub base_radius: f64,
    /// Radius ratio from a segment's base to its top (0.0 - 1.0)
    pub radius_decay: f64,
    /// Children spawned per node before suppression
    pub max_branches: u32,
    /// Tilt of child branches away from the parent axis, in radians
    pub branch_angle: f64,
    pub foliage_size: f64,
    /// Subdivision level for each foliage proxy
    pub foliage_resolution: u32,
    /// Proxies per foliage cluster (1 - 20)
    pub foliage_count: u32,
    /// Maximum jitter of a proxy from the branch tip on each axis
    pub foliage_spread: f64,
    /// Probability that a child branch is grown
    pub branch_chance: f64,
    /// Probability that a child's tilt is perturbed
    pub angle_chance: f64,
    /// Probability that the whorl turn is perturbed
    pub turn_chance: f64,
    /// Maximum turn perturbation, in radians
    pub turn_amount: f64,
    /// Maximum tilt perturbation, in radians
    pub angle_amount: f64,
    pub materials: MaterialColors,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::broadleaf()
    }
}

impl TreeParams {
    /// Broadleaf preset: two-way forking crown, three levels
    pub fn broadleaf() -> Self {
        Self {
            kind: TreeKind::Broadleaf,
            polygon_count: 4,
            depth: 3.0,
            base_length: 5.0,
            first_segment_multiplier: 1.0,
            length_decay: 0.8,
            base_radius: 1.0,
            radius_decay: 0.45,
            max_branches: 2,
            branch_angle: 0.5,
            foliage_size: 1.0,
            foliage_resolution: 1,
            foliage_count: 1,
            foliage_spread: 0.0,
            branch_chance: 0.9,
            angle_chance: 0.9,
            turn_chance: 0.9,
            turn_amount: FRAC_PI_2,
            angle_amount: FRAC_PI_6,
            materials: MaterialColors::default(),
        }
    }

    /// Pine preset: tall stem, wide whorls, clustered needles
    pub fn pine() -> Self {
        Self {
            kind: TreeKind::Pine,
            polygon_count: 6,
            depth: 5.0,
            base_length: 3.0,
            first_segment_multiplier: 1.5,
            length_decay: 0.85,
            base_radius: 0.6,
            radius_decay: 0.8,
            max_branches: 4,
            branch_angle: 1.2,
            foliage_size: 0.6,
            foliage_resolution: 1,
            foliage_count: 3,
            foliage_spread: 0.4,
            branch_chance: 0.95,
            angle_chance: 0.5,
            turn_chance: 0.5,
            turn_amount: FRAC_PI_6,
            angle_amount: 0.2,
            materials: MaterialColors {
                bark: [0.35, 0.25, 0.2],
                foliage: [0.15, 0.4, 0.2],
            },
        }
    }

    /// Create params from a growth form preset
    pub fn from_kind(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Broadleaf => Self::broadleaf(),
            TreeKind::Pine => Self::pine(),
        }
    }

    /// Parse a (possibly partial) JSON preset and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameters that cannot produce a well-formed tree of `self.kind`
    pub fn validate(&self) -> Result<()> {
        self.validate_for(self.kind)
    }

    /// Reject parameters that cannot produce a well-formed tree grown as `kind`
    ///
    /// The segment budget depends on the growth form, so entry points that grow a fixed
    /// form regardless of [`TreeParams::kind`] validate against the form they grow.
    /// Called before the first random draw.
    pub fn validate_for(&self, kind: TreeKind) -> Result<()> {
        if self.polygon_count < 3 {
            return Err(Error::config(
                "polygon_count",
                format!("must be at least 3, got {}", self.polygon_count),
            ));
        }
        if self.max_branches < 1 || self.max_branches > MAX_BRANCHES {
            return Err(Error::config(
                "max_branches",
                format!("must be within 1..={MAX_BRANCHES}, got {}", self.max_branches),
            ));
        }
        if self.foliage_count < 1 || self.foliage_count as usize > FOLIAGE_JITTER_POOL {
            return Err(Error::config(
                "foliage_count",
                format!("must be within 1..={FOLIAGE_JITTER_POOL}, got {}", self.foliage_count),
            ));
        }

        let floats = [
            ("depth", self.depth),
            ("base_length", self.base_length),
            ("first_segment_multiplier", self.first_segment_multiplier),
            ("length_decay", self.length_decay),
            ("base_radius", self.base_radius),
            ("radius_decay", self.radius_decay),
            ("branch_angle", self.branch_angle),
            ("foliage_size", self.foliage_size),
            ("foliage_spread", self.foliage_spread),
            ("branch_chance", self.branch_chance),
            ("angle_chance", self.angle_chance),
            ("turn_chance", self.turn_chance),
            ("turn_amount", self.turn_amount),
            ("angle_amount", self.angle_amount),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(Error::config(field, format!("must be finite, got {value}")));
            }
        }

        for (field, value) in [
            ("depth", self.depth),
            ("base_length", self.base_length),
            ("first_segment_multiplier", self.first_segment_multiplier),
            ("base_radius", self.base_radius),
        ] {
            if value <= 0.0 {
                return Err(Error::config(field, format!("must be positive, got {value}")));
            }
        }
        if self.depth > MAX_TREE_DEPTH {
            return Err(Error::config(
                "depth",
                format!("must be at most {MAX_TREE_DEPTH}, got {}", self.depth),
            ));
        }

        for (field, value) in [
            ("foliage_size", self.foliage_size),
            ("foliage_spread", self.foliage_spread),
            ("turn_amount", self.turn_amount),
            ("angle_amount", self.angle_amount),
        ] {
            if value < 0.0 {
                return Err(Error::config(field, format!("must not be negative, got {value}")));
            }
        }

        for (field, value) in [
            ("length_decay", self.length_decay),
            ("radius_decay", self.radius_decay),
            ("branch_chance", self.branch_chance),
            ("angle_chance", self.angle_chance),
            ("turn_chance", self.turn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(field, format!("must be within [0, 1], got {value}")));
            }
        }

        let worst_case = self.max_segments_for(kind);
        if worst_case > MAX_SEGMENTS {
            return Err(Error::config(
                "depth/max_branches",
                format!("could emit up to {worst_case} segments (limit {MAX_SEGMENTS})"),
            ));
        }

        Ok(())
    }

    /// Segments emitted if no branch is ever suppressed
    pub fn max_segments(&self) -> u64 {
        self.max_segments_for(self.kind)
    }

    /// Segments emitted by a `kind` tree if no branch is ever suppressed
    pub fn max_segments_for(&self, kind: TreeKind) -> u64 {
        let branches = u64::from(self.max_branches);
        match kind {
            TreeKind::Broadleaf => broadleaf_segments(self.depth, branches),
            TreeKind::Pine => pine_segments(self.depth, branches, true),
        }
    }
}

fn broadleaf_segments(depth: f64, branches: u64) -> u64 {
    if depth <= 0.0 {
        return 0;
    }
    let remaining = depth - 1.0;
    if remaining <= 0.0 {
        return 1;
    }
    branches
        .saturating_mul(broadleaf_segments(remaining, branches))
        .saturating_add(1)
}

fn pine_segments(depth: f64, branches: u64, stem: bool) -> u64 {
    if depth <= 0.0 {
        return 0;
    }
    let remaining = depth - 1.0;
    let mut total: u64 = 1;
    if stem {
        total = total.saturating_add(pine_segments(remaining, branches, true));
    }
    if remaining > 0.0 {
        let whorl = pine_segments(remaining * 0.5, branches, false);
        total = total.saturating_add(branches.saturating_mul(whorl));
    }
    total
}
