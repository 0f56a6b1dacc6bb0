//! High-level, ergonomic library API: transform label CSVs to files, generate
//! orientation variants, export per-unit labels, and composite layered
//! floorplan images. Prefer these entrypoints over the low-level core modules
//! when integrating FLOORPRO.
//!
//! Every batch entrypoint treats one file (or one unit) as an atomic unit of
//! work: a failure is recorded in the returned [`BatchReport`] and never
//! aborts sibling work. Only invalid configuration — a missing input
//! directory, unreadable reference data — fails fast before any per-file
//! work begins.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::layers::{self, GROUND_FLOOR_WASH};
use crate::core::params::TransformParams;
use crate::core::permute::{Permutation, PermutationConfig};
use crate::core::transform::{self, TaggedPoint, normalize_rotation};
use crate::error::{Error, Result};
use crate::io::naming::{self, AssetIdentity};
use crate::io::points::{read_point_set, write_point_set};
use crate::io::reference::{ReferenceData, UnitReference};
use crate::io::svg;
use crate::types::FlipAxis;

/// End-of-run accounting for a batch stage.
///
/// `unfinished_units` / `unfinished_types` carry the exact inputs that
/// failed, deduplicated, so a partial-success run can report what to rerun.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub unfinished_units: Vec<String>,
    pub unfinished_types: Vec<String>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }

    fn push_unfinished_unit(&mut self, name: &str) {
        if !self.unfinished_units.iter().any(|u| u == name) {
            self.unfinished_units.push(name.to_string());
        }
    }

    fn push_unfinished_type(&mut self, name: &str) {
        if !self.unfinished_types.iter().any(|t| t == name) {
            self.unfinished_types.push(name.to_string());
        }
    }

    /// Log the end-of-run summary, listing every unfinished input.
    pub fn log_summary(&self) {
        info!(
            "processed={} skipped={} errors={}",
            self.processed, self.skipped, self.errors
        );
        if self.is_clean() {
            info!("all inputs processed successfully");
            return;
        }
        warn!(
            "{} units not processed: {:?}",
            self.unfinished_units.len(),
            self.unfinished_units
        );
        if !self.unfinished_types.is_empty() {
            warn!(
                "{} types not processed: {:?}",
                self.unfinished_types.len(),
                self.unfinished_types
            );
        }
    }
}

/// CSV files directly under `dir`, sorted for deterministic batch order.
pub fn iterate_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "input-dir",
            value: format!("{} is not a directory", dir.display()),
        });
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn transform_points(points: &[TaggedPoint], params: &TransformParams) -> Result<Vec<TaggedPoint>> {
    let points = match &params.anchor {
        Some(tag) => transform::normalize_to_anchor(points, tag)?,
        None => points.to_vec(),
    };
    Ok(transform::apply(&points, &params.request, params.canvas_size))
}

/// Transform a single label CSV and write the result.
pub fn transform_csv_to_path(input: &Path, output: &Path, params: &TransformParams) -> Result<()> {
    let points = read_point_set(input)?;
    let transformed = transform_points(&points, params)?;
    write_point_set(output, &transformed)
}

/// Apply one transform to every CSV in a directory.
///
/// Each file is independent: failures land in the report, siblings continue.
pub fn transform_directory(
    input_dir: &Path,
    output_dir: &Path,
    params: &TransformParams,
) -> Result<BatchReport> {
    let files = iterate_csv_files(input_dir)?;
    std::fs::create_dir_all(output_dir)?;

    let results: Vec<(String, Result<()>)> = files
        .par_iter()
        .map(|path| {
            let name = file_name(path);
            let outcome = transform_csv_to_path(path, &output_dir.join(&name), params);
            (name, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (name, outcome) in results {
        match outcome {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("error transforming {}: {}", name, e);
                report.errors += 1;
                report.push_unfinished_unit(&name);
            }
        }
    }
    Ok(report)
}

// The types stage of the variant pipeline, one file x one permutation.
// Rotation folds the parent plan's orientation into the permutation's, but
// the conditional extra half turn keys on the permutation rotation alone:
// that is the observed orientation rule, not a simplification.
fn write_type_variant(
    points: &[TaggedPoint],
    label_name: &str,
    permutation: &Permutation,
    parent_rotation: f64,
    canvas_size: f64,
    folder: &Path,
) -> Result<()> {
    let final_rotation = normalize_rotation(parent_rotation + permutation.rotation as f64);
    let mut variant = transform::rotate(points, final_rotation, canvas_size);
    if permutation.flip {
        variant = transform::flip(&variant, FlipAxis::Y, canvas_size);
        if permutation.rotation == 90 || permutation.rotation == 270 {
            variant = transform::rotate(&variant, 180.0, canvas_size);
        }
    }
    write_point_set(&folder.join(naming::image_label_name(label_name)), &variant)
}

/// Generate every orientation variant of every label CSV in `input_dir`.
///
/// Output lands in one folder per permutation (`{rotation}_{flip}`), each
/// file renamed to its backplate image label name — the layout the unit
/// export stage reads back.
pub fn generate_type_variants(
    input_dir: &Path,
    output_dir: &Path,
    config: &PermutationConfig,
    reference: &ReferenceData,
    canvas_size: f64,
) -> Result<BatchReport> {
    let files = iterate_csv_files(input_dir)?;
    let permutations = config.permutations();
    for permutation in &permutations {
        std::fs::create_dir_all(output_dir.join(permutation.folder_name()))?;
    }
    info!(
        "generating {} variants for {} label files",
        permutations.len(),
        files.len()
    );

    let results: Vec<(String, Result<()>)> = files
        .par_iter()
        .map(|path| {
            let name = file_name(path);
            let outcome = (|| -> Result<()> {
                let record = reference
                    .type_for_label(&naming::image_label_name(&name))
                    .ok_or_else(|| Error::MissingAsset {
                        unit: name.clone(),
                        asset: "type entry in reference data".to_string(),
                    })?;
                let points = read_point_set(path)?;
                for permutation in &permutations {
                    write_type_variant(
                        &points,
                        &name,
                        permutation,
                        record.parent.rotation,
                        canvas_size,
                        &output_dir.join(permutation.folder_name()),
                    )?;
                }
                Ok(())
            })();
            (name, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (name, outcome) in results {
        match outcome {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("error generating variants for {}: {}", name, e);
                report.errors += 1;
                report.push_unfinished_type(&name);
            }
        }
    }
    Ok(report)
}

// Tower-level-unit triple from a unit name such as "T1-405" or "T2-1203":
// tower before the dash; two-digit level (zero-padded for 3-digit plots);
// unit number from the last two digits.
fn unit_identity(name: &str) -> Result<(String, String, String)> {
    let lower = name.to_lowercase();
    let (tower, plot) = lower.split_once('-').ok_or_else(|| Error::AssetName {
        name: name.to_string(),
        reason: "expected tower-plot form".to_string(),
    })?;
    if plot.len() < 3 || !plot.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::AssetName {
            name: name.to_string(),
            reason: format!("plot segment {plot:?} too short"),
        });
    }
    let level = if plot.len() > 3 {
        plot[..2].to_string()
    } else {
        format!("0{}", &plot[..1])
    };
    let number = plot[plot.len() - 2..].to_string();
    Ok((tower.to_string(), level, number))
}

/// Export one label CSV per unit from the per-permutation type variants.
///
/// For each unit the orientation delta against its type's parent plan picks
/// the permutation folder; the type's file there is renamed to the unit
/// identity and copied out. A missing folder or type file fails that unit
/// only and is reported at the end of the run.
pub fn export_unit_labels(
    types_dir: &Path,
    output_dir: &Path,
    reference: &ReferenceData,
    units: &UnitReference,
) -> Result<BatchReport> {
    if !types_dir.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "input-dir",
            value: format!("{} is not a directory", types_dir.display()),
        });
    }
    std::fs::create_dir_all(output_dir)?;

    let results: Vec<(String, String, Result<()>)> = units
        .units
        .par_iter()
        .map(|unit| {
            let outcome = (|| -> Result<()> {
                let record =
                    reference
                        .type_by_name(&unit.unit_type)
                        .ok_or_else(|| Error::MissingAsset {
                            unit: unit.name.clone(),
                            asset: format!("type {:?} in reference data", unit.unit_type),
                        })?;

                let rotation = normalize_rotation(
                    unit.rotation - record.parent.rotation - record.offset.rotation,
                );
                let folder_name = Permutation {
                    rotation: rotation as i32,
                    flip: unit.flip,
                }
                .folder_name();
                let folder = types_dir.join(&folder_name);

                let selected = std::fs::read_dir(&folder)
                    .map_err(|_| Error::MissingAsset {
                        unit: unit.name.clone(),
                        asset: format!("variant folder {folder_name}"),
                    })?
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .find(|n| n.contains(&unit.unit_type))
                    .ok_or_else(|| Error::MissingAsset {
                        unit: unit.name.clone(),
                        asset: format!("type file for {:?} in {folder_name}", unit.unit_type),
                    })?;

                let (tower, level, number) = unit_identity(&unit.name)?;
                let unit_label = format!("{tower}-{level}-{number}_{}", unit.unit_type);
                let output_name =
                    naming::csv_label_name(&selected.replace(&unit.unit_type, &unit_label));

                info!("{} | rotate: {} | flip: {}", unit.name, rotation, unit.flip);
                std::fs::copy(folder.join(&selected), output_dir.join(output_name))?;
                Ok(())
            })();
            (unit.name.clone(), unit.unit_type.clone(), outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (unit_name, type_name, outcome) in results {
        match outcome {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("error exporting {}: {}", unit_name, e);
                report.errors += 1;
                report.push_unfinished_unit(&unit_name);
                report.push_unfinished_type(&type_name);
            }
        }
    }
    Ok(report)
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "webp", "jpg", "jpeg"];

fn iterate_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "input-dir",
            value: format!("{} is not a directory", dir.display()),
        });
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        if path.is_file() && ext.as_deref().is_some_and(|e| IMAGE_EXTENSIONS.contains(&e)) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn composite_one(
    base_path: &Path,
    overlay_dir: &Path,
    output_dir: &Path,
    canvas_size: u32,
    permutations: &[Permutation],
) -> Result<()> {
    let name = file_name(base_path);
    let stem = base_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());

    let overlay_path = overlay_dir.join(&name);
    if !overlay_path.is_file() {
        return Err(Error::MissingAsset {
            unit: name.clone(),
            asset: format!("overlay {}", overlay_path.display()),
        });
    }

    let base = layers::load_layer(base_path, canvas_size)?;
    let overlay = layers::load_layer(&overlay_path, canvas_size)?;

    let mut canvas = base;
    // An SVG next to the overlay restricts it to the masked region.
    let mask_path = overlay_dir.join(format!("{stem}.svg"));
    if mask_path.is_file() {
        let rects = svg::read_mask_rects(&mask_path)?;
        match svg::mask_bounds(&rects) {
            Some(bounds) => {
                let cropped = layers::crop_to_mask(&overlay, &bounds);
                image::imageops::overlay(
                    &mut canvas,
                    &cropped,
                    bounds.x.max(0.0) as i64,
                    bounds.y.max(0.0) as i64,
                );
            }
            None => image::imageops::overlay(&mut canvas, &overlay, 0, 0),
        }
    } else {
        image::imageops::overlay(&mut canvas, &overlay, 0, 0);
    }

    // Ground-floor plans get the garden wash when the name carries a
    // parseable identity; free-form names pass through untinted.
    if let Ok(identity) = AssetIdentity::from_file_name(&name) {
        if identity.floor == "01" {
            layers::apply_tint(&mut canvas, GROUND_FLOOR_WASH);
        }
    }

    if permutations.is_empty() {
        canvas.save(output_dir.join(format!("{stem}.png")))?;
    } else {
        for permutation in permutations {
            let oriented = layers::orient(&canvas, permutation)?;
            let folder = output_dir.join(permutation.folder_name());
            oriented.save(folder.join(format!("{stem}.png")))?;
        }
    }
    Ok(())
}

/// Composite every base image with its same-named overlay.
///
/// With a permutation config, each composite is additionally written in every
/// orientation, into per-permutation folders. A base with no overlay partner
/// is a missing-asset failure for that file only.
pub fn composite_directory(
    base_dir: &Path,
    overlay_dir: &Path,
    output_dir: &Path,
    canvas_size: u32,
    config: Option<&PermutationConfig>,
) -> Result<BatchReport> {
    let files = iterate_image_files(base_dir)?;
    let permutations = config.map(|c| c.permutations()).unwrap_or_default();
    std::fs::create_dir_all(output_dir)?;
    for permutation in &permutations {
        std::fs::create_dir_all(output_dir.join(permutation.folder_name()))?;
    }
    info!("compositing {} base images", files.len());

    let results: Vec<(String, Result<()>)> = files
        .par_iter()
        .map(|path| {
            let name = file_name(path);
            let outcome =
                composite_one(path, overlay_dir, output_dir, canvas_size, &permutations);
            (name, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (name, outcome) in results {
        match outcome {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("error compositing {}: {}", name, e);
                report.errors += 1;
                report.push_unfinished_unit(&name);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::TransformRequest;
    use crate::io::points::read_point_set_from;

    fn write_csv(path: &Path, content: &str) {
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn unit_identity_splits_tower_level_number() {
        assert_eq!(
            unit_identity("T1-405").unwrap(),
            ("t1".into(), "04".into(), "05".into())
        );
        assert_eq!(
            unit_identity("T2-1203").unwrap(),
            ("t2".into(), "12".into(), "03".into())
        );
    }

    #[test]
    fn unit_identity_rejects_freeform_names() {
        assert!(unit_identity("penthouse").is_err());
        assert!(unit_identity("T1-4").is_err());
    }

    #[test]
    fn single_file_transform_writes_documented_values() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        write_csv(&input, "anchor,100,200\n");

        let params = TransformParams {
            request: TransformRequest {
                rotation: 180.0,
                ..Default::default()
            },
            ..Default::default()
        };
        transform_csv_to_path(&input, &output, &params).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "anchor,3936,3896\n"
        );
    }

    #[test]
    fn directory_transform_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        std::fs::create_dir(&input).unwrap();
        write_csv(&input.join("good.csv"), "a,1,2\n");
        write_csv(&input.join("bad.csv"), "a,oops,2\n");

        let report =
            transform_directory(&input, &output, &TransformParams::default()).unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.unfinished_units, vec!["bad.csv".to_string()]);
        assert!(output.join("good.csv").is_file());
        assert!(!output.join("bad.csv").exists());
    }

    #[test]
    fn missing_input_directory_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = transform_directory(
            &dir.path().join("absent"),
            &dir.path().join("out"),
            &TransformParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    fn reference() -> ReferenceData {
        serde_json::from_str(
            r#"{
                "types": [{
                    "name": "2br_a",
                    "parent": { "name": "2br", "rotation": 0 },
                    "offset": { "rotation": 0, "flip": false }
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn type_variants_land_in_permutation_folders() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("labels");
        let output = dir.path().join("types");
        std::fs::create_dir(&input).unwrap();
        write_csv(&input.join("csv_floorplan_2br_a.csv"), "anchor,100,200\n");

        let config = PermutationConfig {
            rotation: vec![0, 180],
            flip: vec![false],
        };
        let report =
            generate_type_variants(&input, &output, &config, &reference(), 4096.0).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.processed, 1);

        let rotated = output
            .join("180_false")
            .join("backplate_image_floorplan_2br_a_0.csv");
        let points = read_point_set_from(std::fs::File::open(rotated).unwrap()).unwrap();
        assert_eq!(points[0].y, 3936.0);
        assert_eq!(points[0].x, 3896.0);

        let identity = output
            .join("0_false")
            .join("backplate_image_floorplan_2br_a_0.csv");
        let points = read_point_set_from(std::fs::File::open(identity).unwrap()).unwrap();
        assert_eq!(points[0].y, 100.0);
        assert_eq!(points[0].x, 200.0);
    }

    #[test]
    fn unknown_label_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("labels");
        let output = dir.path().join("types");
        std::fs::create_dir(&input).unwrap();
        write_csv(&input.join("csv_floorplan_mystery.csv"), "a,1,2\n");

        let report = generate_type_variants(
            &input,
            &output,
            &PermutationConfig::default(),
            &reference(),
            4096.0,
        )
        .unwrap();
        assert_eq!(report.errors, 1);
        assert_eq!(
            report.unfinished_types,
            vec!["csv_floorplan_mystery.csv".to_string()]
        );
    }

    #[test]
    fn unit_export_copies_and_renames_matching_variant() {
        let dir = tempfile::tempdir().unwrap();
        let types = dir.path().join("types");
        let output = dir.path().join("units");
        let folder = types.join("90_true");
        std::fs::create_dir_all(&folder).unwrap();
        write_csv(
            &folder.join("backplate_image_floorplan_2br_a_0.csv"),
            "anchor,1,2\n",
        );

        let units: UnitReference = serde_json::from_str(
            r#"{"units":[
                {"name":"T1-405","type":"2br_a","rotation":90,"flip":true},
                {"name":"T1-501","type":"ghost","rotation":0,"flip":false}
            ]}"#,
        )
        .unwrap();

        let report = export_unit_labels(&types, &output, &reference(), &units).unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.unfinished_units, vec!["T1-501".to_string()]);
        assert_eq!(report.unfinished_types, vec!["ghost".to_string()]);

        let exported = output.join("csv_floorplan_t1-04-05_2br_a.csv");
        assert!(exported.is_file(), "expected {}", exported.display());
        assert_eq!(std::fs::read_to_string(exported).unwrap(), "anchor,1,2\n");
    }

    #[test]
    fn base_without_overlay_partner_fails_that_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let bases = dir.path().join("plans");
        let overlays = dir.path().join("dims");
        let output = dir.path().join("out");
        std::fs::create_dir(&bases).unwrap();
        std::fs::create_dir(&overlays).unwrap();

        let pixel = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        pixel.save(bases.join("paired.png")).unwrap();
        pixel.save(bases.join("lonely.png")).unwrap();
        pixel.save(overlays.join("paired.png")).unwrap();

        let report = composite_directory(&bases, &overlays, &output, 4, None).unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.unfinished_units, vec!["lonely.png".to_string()]);
        assert!(output.join("paired.png").is_file());
        assert!(!output.join("lonely.png").exists());
    }
}
