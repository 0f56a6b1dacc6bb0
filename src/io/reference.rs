//! Typed reference data for the type and unit catalogues.
//!
//! The production workflow keeps two JSON files next to the assets: one
//! describing floorplan types (with the orientation of the parent plan each
//! type was traced from) and one listing sellable units with their plot
//! rotation and mirror state. Both are deserialized into explicit structs and
//! passed by parameter into the orchestration; nothing here is global state.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Orientation of a derived asset relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationOffset {
    pub rotation: f64,
    pub flip: bool,
}

/// Link from a type to the parent plan it was traced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentLink {
    pub name: String,
    pub rotation: f64,
}

/// One floorplan type entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub parent: ParentLink,
    pub offset: OrientationOffset,
}

/// The type catalogue (`reference.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub types: Vec<TypeRecord>,
}

impl ReferenceData {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Type entry whose name occurs in the given label file name.
    ///
    /// Matching is by containment: label files carry the type name embedded
    /// in a longer export name, so an exact comparison would never hit.
    pub fn type_for_label(&self, label_name: &str) -> Option<&TypeRecord> {
        self.types.iter().find(|t| label_name.contains(&t.name))
    }

    /// Type entry by exact name, as referenced from the unit catalogue.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeRecord> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// One sellable unit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub rotation: f64,
    pub flip: bool,
}

/// The unit catalogue (`unit-reference.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReference {
    pub units: Vec<UnitRecord>,
}

impl UnitReference {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
