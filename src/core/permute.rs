//! Orientation permutation generator.
//!
//! A permutation is one concrete rotation + flip combination used to produce
//! one output variant of an asset. Generation order is a contract: the
//! unit-export stage resolves folder names against it, and when two assets
//! collide on a folder name the later permutation wins. The order is the
//! standard nested-loop product with the first option (rotation) varying
//! slowest.
use serde::{Deserialize, Serialize};

use crate::core::params::TransformRequest;

/// Named option lists driving variant generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermutationConfig {
    /// Rotation angles in degrees, quarter turns in production.
    pub rotation: Vec<i32>,
    /// Flip states; a flipped variant mirrors across the vertical axis.
    pub flip: Vec<bool>,
}

impl Default for PermutationConfig {
    fn default() -> Self {
        Self {
            rotation: vec![0, 90, 180, 270],
            flip: vec![false, true],
        }
    }
}

impl PermutationConfig {
    /// Cartesian product of the option lists, rotation varying slowest.
    pub fn permutations(&self) -> Vec<Permutation> {
        let mut out = Vec::with_capacity(self.rotation.len() * self.flip.len());
        for &rotation in &self.rotation {
            for &flip in &self.flip {
                out.push(Permutation { rotation, flip });
            }
        }
        out
    }
}

/// One rotation + flip combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permutation {
    pub rotation: i32,
    pub flip: bool,
}

impl Permutation {
    /// On-disk folder name for this variant, e.g. `90_true`.
    pub fn folder_name(&self) -> String {
        format!("{}_{}", self.rotation, self.flip)
    }

    /// Transform request for this variant. A flipped permutation mirrors
    /// across the vertical axis (flip "y" in the engine's terms).
    pub fn request(&self) -> TransformRequest {
        TransformRequest {
            rotation: self.rotation as f64,
            flip_y: self.flip,
            ..Default::default()
        }
    }
}

impl std::fmt::Display for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.rotation, self.flip)
    }
}
