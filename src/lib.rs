#![doc = r#"
FLOORPRO — a floorplan production toolkit.

This crate turns coordinate-tagged label CSVs and layered floorplan renders
into the full set of orientation variants a real-estate web client needs:
rotated/flipped/scaled label positions, per-permutation variant folders,
per-unit label exports driven by JSON reference catalogues, and composited
backplate images. It powers the FLOORPRO CLI and can be embedded in your own
Rust applications.

The coordinate transform engine is pure and deterministic: given the same
points, request, and canvas size it always produces the same output, so
independent point sets can be processed concurrently without locking. Batch
entrypoints run each file as an atomic unit of work on a bounded rayon pool
and report per-input failures instead of aborting the run.

Quick start: transform one label CSV
------------------------------------
```rust,no_run
use std::path::Path;
use floorpro::{transform_csv_to_path, TransformParams, TransformRequest};

fn main() -> floorpro::Result<()> {
    let params = TransformParams {
        request: TransformRequest {
            rotation: 180.0,
            ..Default::default()
        },
        ..Default::default()
    };

    transform_csv_to_path(
        Path::new("csv_floorplan_bf_2_s1_p1_01_nd.csv"),
        Path::new("out/csv_floorplan_bf_2_s1_p1_01_nd.csv"),
        &params,
    )
}
```

In-memory point transforms
--------------------------
```rust
use floorpro::core::transform::{rotate, TaggedPoint};
use floorpro::DEFAULT_CANVAS_SIZE;

let points = vec![TaggedPoint::new("anchor", 100.0, 200.0)];
let rotated = rotate(&points, 180.0, DEFAULT_CANVAS_SIZE);
assert_eq!(rotated[0].y, 3936.0);
assert_eq!(rotated[0].x, 3896.0);
```

Batch variant generation
------------------------
```rust,no_run
use std::path::Path;
use floorpro::{
    generate_type_variants, PermutationConfig, DEFAULT_CANVAS_SIZE,
    io::reference::ReferenceData,
};

fn main() -> floorpro::Result<()> {
    let reference = ReferenceData::load(Path::new("reference.json"))?;
    let report = generate_type_variants(
        Path::new("labels"),
        Path::new("types"),
        &PermutationConfig::default(),
        &reference,
        DEFAULT_CANVAS_SIZE,
    )?;
    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `floorpro::Result<T>`; match on `floorpro::Error`
to handle specific cases, e.g. a malformed coordinate cell or a missing
paired asset.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core::transform`] — the coordinate transform engine.
- [`core::permute`] — the orientation permutation generator.
- [`io`] — point-set CSVs, reference catalogues, naming, SVG masks.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{TransformParams, TransformRequest};
pub use core::permute::{Permutation, PermutationConfig};
pub use core::transform::TaggedPoint;
pub use error::{Error, Result};
pub use types::{DEFAULT_CANVAS_SIZE, FlipAxis, LARGE_CANVAS_SIZE};

// Readers and writers
pub use io::naming::AssetIdentity;
pub use io::points::{read_point_set, write_point_set};
pub use io::reference::{ReferenceData, UnitReference};

// High-level API re-exports
pub use api::{
    BatchReport, composite_directory, export_unit_labels, generate_type_variants,
    iterate_csv_files, transform_csv_to_path, transform_directory,
};
