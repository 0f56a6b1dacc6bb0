//! Shared types used across FLOORPRO.
//! Includes the flip axis selector and the canvas-size constants for the two
//! asset families in production.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default square canvas side length in pixels (standard floorplan family).
pub const DEFAULT_CANVAS_SIZE: f64 = 4096.0;

/// Canvas side length for the large backplate family.
pub const LARGE_CANVAS_SIZE: f64 = 4320.0;

/// Which axis a flip mirrors across.
///
/// `X` mirrors across the horizontal axis (Y coordinates change),
/// `Y` mirrors across the vertical axis (X coordinates change).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum FlipAxis {
    X,
    Y,
}

impl FromStr for FlipAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(FlipAxis::X),
            "y" | "Y" => Ok(FlipAxis::Y),
            other => Err(Error::InvalidAxis {
                axis: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlipAxis::X => write!(f, "x"),
            FlipAxis::Y => write!(f, "y"),
        }
    }
}
