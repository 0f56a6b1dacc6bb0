//! I/O layer: headerless point-set CSVs, typed JSON reference catalogues,
//! export naming conventions, and SVG mask geometry.
pub mod naming;
pub mod points;
pub mod reference;
pub mod svg;

pub use naming::AssetIdentity;
pub use points::{read_point_set, write_point_set};
pub use reference::{ReferenceData, UnitReference};
pub use svg::{MaskRect, read_mask_rects};
