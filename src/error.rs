//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, CSV, JSON, and image errors, and provides semantic
//! variants for row parsing, flip-axis validation, and missing paired assets.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reference data error: {0}")]
    Reference(#[from] serde_json::Error),

    #[error("Non-numeric coordinate in row {row}: {value:?}")]
    Parse { row: usize, value: String },

    #[error("Row {row} has {got} columns, expected at least 3")]
    RowArity { row: usize, got: usize },

    #[error("Invalid flip axis: {axis:?}. Use \"x\" or \"y\"")]
    InvalidAxis { axis: String },

    #[error("Anchor row {tag:?} not found")]
    AnchorNotFound { tag: String },

    #[error("Missing asset for {unit}: {asset}")]
    MissingAsset { unit: String, asset: String },

    #[error("Unrecognized asset name {name:?}: {reason}")]
    AssetName { name: String, reason: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("SVG mask error: {0}")]
    Svg(String),

    #[error("Processing error: {0}")]
    Processing(String),
}
