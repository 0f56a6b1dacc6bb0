//! Core building blocks: the coordinate transform engine, the orientation
//! permutation generator, and the raster layer compositor. These are pure
//! primitives consumed by the high-level `api` module.
pub mod layers;
pub mod params;
pub mod permute;
pub mod transform;
