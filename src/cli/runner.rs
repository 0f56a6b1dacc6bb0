use std::path::PathBuf;

use tracing::info;

use floorpro::api::{
    composite_directory, export_unit_labels, generate_type_variants, transform_csv_to_path,
    transform_directory,
};
use floorpro::core::params::{TransformParams, TransformRequest};
use floorpro::core::permute::PermutationConfig;
use floorpro::io::reference::{ReferenceData, UnitReference};
use floorpro::FlipAxis;

use super::args::CliArgs;
use super::errors::AppError;

fn transform_params(args: &CliArgs) -> TransformParams {
    TransformParams {
        request: TransformRequest {
            rotation: args.rotation,
            flip_x: args.flip_axis == Some(FlipAxis::X),
            flip_y: args.flip_axis == Some(FlipAxis::Y),
            scale: args.scale,
        },
        canvas_size: args.canvas_size,
        anchor: args.anchor.clone(),
    }
}

fn load_reference(args: &CliArgs) -> Result<ReferenceData, AppError> {
    let path = args.reference.as_ref().ok_or(AppError::MissingReference)?;
    Ok(ReferenceData::load(path)?)
}

fn require(arg: Option<PathBuf>, name: &str) -> Result<PathBuf, AppError> {
    arg.ok_or(AppError::MissingArgument {
        arg: name.to_string(),
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()?;
    }

    if !(args.canvas_size > 0.0) || !args.canvas_size.is_finite() {
        return Err(AppError::InvalidCanvasSize {
            size: args.canvas_size,
        }
        .into());
    }
    if !args.scale.is_finite() || args.scale == 0.0 {
        return Err(AppError::InvalidScale { scale: args.scale }.into());
    }

    let batch_mode = args.input_dir.is_some();

    if batch_mode {
        let input_dir = require(args.input_dir.clone(), "--input-dir")?;
        let output_dir = require(args.output_dir.clone(), "--output-dir")?;

        info!("starting batch processing from directory: {:?}", input_dir);
        info!("output directory: {:?}", output_dir);

        let report = if let Some(overlays) = &args.overlays {
            let config = args.permutations.then(PermutationConfig::default);
            composite_directory(
                &input_dir,
                overlays,
                &output_dir,
                args.canvas_size as u32,
                config.as_ref(),
            )?
        } else if args.permutations {
            let reference = load_reference(&args)?;
            let types_report = generate_type_variants(
                &input_dir,
                &output_dir,
                &PermutationConfig::default(),
                &reference,
                args.canvas_size,
            )?;

            match &args.unit_reference {
                Some(unit_path) => {
                    info!("type variant stage complete");
                    types_report.log_summary();
                    let units = UnitReference::load(unit_path)?;
                    export_unit_labels(
                        &output_dir,
                        &output_dir.join("unit-labels"),
                        &reference,
                        &units,
                    )?
                }
                None => types_report,
            }
        } else if let Some(unit_path) = &args.unit_reference {
            // Input directory already holds the per-permutation variant folders.
            let reference = load_reference(&args)?;
            let units = UnitReference::load(unit_path)?;
            export_unit_labels(&input_dir, &output_dir, &reference, &units)?
        } else {
            transform_directory(&input_dir, &output_dir, &transform_params(&args))?
        };

        info!("batch processing complete!");
        report.log_summary();
    } else {
        let input = require(args.input.clone(), "--input")?;
        let output = require(args.output.clone(), "--output")?;

        transform_csv_to_path(&input, &output, &transform_params(&args))?;
        info!("successfully processed: {:?} -> {:?}", input, output);
    }

    Ok(())
}
