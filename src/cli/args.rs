use clap::Parser;
use std::path::PathBuf;

use floorpro::types::DEFAULT_CANVAS_SIZE;
use floorpro::FlipAxis;

#[derive(Parser)]
#[command(name = "floorpro", version, about = "FLOORPRO CLI")]
pub struct CliArgs {
    /// Input label CSV (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory of label CSVs or base images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Rotation in degrees about the canvas center
    #[arg(short = 'r', long, default_value_t = 0.0)]
    pub rotation: f64,

    /// Flip axis: x mirrors Y coordinates, y mirrors X coordinates
    #[arg(long, value_enum)]
    pub flip_axis: Option<FlipAxis>,

    /// Uniform scale factor about the canvas center
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Square canvas side length in pixels (4096 or 4320 in production)
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub canvas_size: f64,

    /// Offset all rows against this anchor tag before transforming
    #[arg(long)]
    pub anchor: Option<String>,

    /// Batch mode: generate the full rotation x flip permutation grid
    /// into one folder per variant
    #[arg(long, default_value_t = false)]
    pub permutations: bool,

    /// Type reference JSON (required with --permutations and --unit-reference)
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Unit reference JSON: export per-unit label CSVs from variant folders
    #[arg(long)]
    pub unit_reference: Option<PathBuf>,

    /// Overlay image directory: composite base images instead of
    /// transforming CSVs
    #[arg(long)]
    pub overlays: Option<PathBuf>,

    /// Worker threads for batch processing (defaults to CPU count)
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
