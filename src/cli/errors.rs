use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Invalid scale factor: {scale}. Must be finite and non-zero")]
    InvalidScale { scale: f64 },

    #[error("Invalid canvas size: {size}. Must be a positive number")]
    InvalidCanvasSize { size: f64 },

    #[error("--permutations and --unit-reference require --reference")]
    MissingReference,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Floorpro(#[from] floorpro::Error),
}
