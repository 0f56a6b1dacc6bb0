use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_CANVAS_SIZE;

/// One geometric transform, consumed once by the engine.
///
/// Built per permutation (or from CLI flags) and applied in a fixed order:
/// rotate, then flip, then the conditional extra half turn, then scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Rotation in degrees, counted about the canvas center.
    pub rotation: f64,
    /// Mirror across the horizontal axis (Y coordinates change).
    pub flip_x: bool,
    /// Mirror across the vertical axis (X coordinates change).
    pub flip_y: bool,
    /// Uniform scale about the canvas center; 1.0 is the identity.
    pub scale: f64,
}

impl Default for TransformRequest {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            scale: 1.0,
        }
    }
}

/// Transform parameters suitable for config files and batch presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformParams {
    pub request: TransformRequest,
    /// Square canvas side length the coordinates live in.
    pub canvas_size: f64,
    /// Optional tag of a reference row; all other rows are offset against it
    /// before the geometric transform runs.
    pub anchor: Option<String>,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            request: TransformRequest::default(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            anchor: None,
        }
    }
}
