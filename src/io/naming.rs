//! Asset naming conventions.
//!
//! Export names encode the asset identity as underscore-separated segments,
//! `{propertyType}_{bedroomCount}_{variant}_{schema}_{floor}_{flipped}`,
//! e.g. `bf_2_s1_p1_01_nd`. This module is the single place that parses them;
//! positional `split('_')` indexing anywhere else is a bug. Parsing validates
//! the segment count up front and fails fast instead of misindexing.
use crate::error::{Error, Result};

/// Prefix of exported label CSVs.
pub const CSV_PREFIX: &str = "csv_floorplan";
/// Prefix of rendered backplate images paired with the CSVs.
pub const IMAGE_PREFIX: &str = "backplate_image_floorplan";

const KNOWN_PREFIXES: &[&str] = &["csv_floorplan_", "backplate_image_floorplan_", "Floorplan_"];

const SEGMENTS: usize = 6;

/// Typed identity recovered from an export file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetIdentity {
    /// Property family, e.g. `bf` (beachfront) or `a`/`b` plot classes.
    pub property_type: String,
    pub bedroom_count: u8,
    /// Style variant marker, `s1`, `s2`, ...
    pub variant: String,
    /// Furnishing schema marker, `p1`, `p2`, ...
    pub schema: String,
    /// Zero-padded floor label, kept as text (`01`, `12`).
    pub floor: String,
    /// True for the mirrored dimension set (`fd`), false for normal (`nd`).
    pub flipped: bool,
}

impl AssetIdentity {
    /// Parse a bare six-segment stem.
    pub fn parse(stem: &str) -> Result<Self> {
        let segments: Vec<&str> = stem.split('_').collect();
        if segments.len() != SEGMENTS {
            return Err(Error::AssetName {
                name: stem.to_string(),
                reason: format!("expected {} segments, got {}", SEGMENTS, segments.len()),
            });
        }

        let bedroom_count = segments[1].parse::<u8>().map_err(|_| Error::AssetName {
            name: stem.to_string(),
            reason: format!("bedroom count {:?} is not numeric", segments[1]),
        })?;

        let flipped = match segments[5] {
            "nd" => false,
            "fd" => true,
            other => {
                return Err(Error::AssetName {
                    name: stem.to_string(),
                    reason: format!("flip marker {:?} is neither \"nd\" nor \"fd\"", other),
                });
            }
        };

        Ok(Self {
            property_type: segments[0].to_string(),
            bedroom_count,
            variant: segments[2].to_string(),
            schema: segments[3].to_string(),
            floor: segments[4].to_string(),
            flipped,
        })
    }

    /// Parse a full file name: extension and any known export prefix are
    /// stripped, as is the `_0` frame suffix on image names.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let mut stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
        for prefix in KNOWN_PREFIXES {
            if let Some(rest) = stem.strip_prefix(prefix) {
                stem = rest;
                break;
            }
        }
        stem = stem.strip_suffix("_0").unwrap_or(stem);
        Self::parse(stem)
    }

    pub fn flip_marker(&self) -> &'static str {
        if self.flipped { "fd" } else { "nd" }
    }
}

impl std::fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}_{}",
            self.property_type,
            self.bedroom_count,
            self.variant,
            self.schema,
            self.floor,
            self.flip_marker()
        )
    }
}

/// Map an exported CSV name to its paired backplate image label name.
/// `csv_floorplan_..._nd.csv` becomes `backplate_image_floorplan_..._nd_0.csv`.
pub fn image_label_name(csv_name: &str) -> String {
    csv_name
        .replace(CSV_PREFIX, IMAGE_PREFIX)
        .replace(".csv", "_0.csv")
}

/// Inverse of [`image_label_name`].
pub fn csv_label_name(image_name: &str) -> String {
    image_name
        .replace(IMAGE_PREFIX, CSV_PREFIX)
        .replace("_0.csv", ".csv")
}
