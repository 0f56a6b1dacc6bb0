//! Coordinate transform engine for tagged 2D point sets.
//!
//! Every label row in a floorplan CSV is a `(tag, y, x, ...)` tuple positioned
//! inside a fixed square canvas. The engine rotates, flips, and scales those
//! rows about the canvas center, keeping tag and passthrough columns verbatim.
//! All operations are pure: they allocate a new point vector and never touch
//! the input, so independent point sets can be processed in parallel freely.
use crate::core::params::TransformRequest;
use crate::error::{Error, Result};
use crate::types::FlipAxis;

/// One coordinate-tagged label row.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPoint {
    /// Opaque label identifier, never transformed.
    pub tag: String,
    pub y: f64,
    pub x: f64,
    /// Passthrough columns after x, copied verbatim.
    pub extra: Vec<String>,
}

impl TaggedPoint {
    pub fn new(tag: impl Into<String>, y: f64, x: f64) -> Self {
        Self {
            tag: tag.into(),
            y,
            x,
            extra: Vec::new(),
        }
    }
}

// Per-angle pixel offsets compensating for the fixed label anchor size on the
// web client. Tuning values agreed with the frontend engineers; they have no
// derivation and must be reproduced exactly for compatible output.
pub const ROT_90_X_OFFSET: f64 = -40.0;
pub const ROT_90_Y_OFFSET: f64 = -30.0;
pub const ROT_180_Y_OFFSET: f64 = -60.0;
pub const ROT_270_X_OFFSET: f64 = 40.0;
pub const ROT_270_Y_OFFSET: f64 = -30.0;

/// Wrap a rotation in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    ((degrees % 360.0) + 360.0) % 360.0
}

// (sin, cos) of the angle. Quarter turns get exact matrix entries so the
// per-angle offsets land on whole pixels instead of picking up sin(pi) dust.
fn rotation_terms(angle_degrees: f64) -> (f64, f64) {
    match angle_degrees {
        a if a == 0.0 => (0.0, 1.0),
        a if a == 90.0 => (1.0, 0.0),
        a if a == 180.0 => (0.0, -1.0),
        a if a == 270.0 => (-1.0, 0.0),
        a => {
            let r = a.to_radians();
            (r.sin(), r.cos())
        }
    }
}

/// Rotate every point about the canvas center.
///
/// At exactly 90, 180, and 270 degrees the empirical per-angle pixel offsets
/// are applied on top of the rotation; any other angle gets the plain matrix.
pub fn rotate(points: &[TaggedPoint], angle_degrees: f64, canvas_size: f64) -> Vec<TaggedPoint> {
    let center = canvas_size / 2.0;
    let (sin, cos) = rotation_terms(angle_degrees);

    points
        .iter()
        .map(|p| {
            let y = p.y - center;
            let x = p.x - center;

            let x_rot = x * cos - y * sin;
            let y_rot = x * sin + y * cos;

            let mut final_x = x_rot + center;
            let mut final_y = y_rot + center;

            if angle_degrees == 90.0 {
                final_x += ROT_90_X_OFFSET;
                final_y += ROT_90_Y_OFFSET;
            }
            if angle_degrees == 180.0 {
                final_y += ROT_180_Y_OFFSET;
            }
            if angle_degrees == 270.0 {
                final_x += ROT_270_X_OFFSET;
                final_y += ROT_270_Y_OFFSET;
            }

            TaggedPoint {
                tag: p.tag.clone(),
                y: final_y,
                x: final_x,
                extra: p.extra.clone(),
            }
        })
        .collect()
}

/// Mirror every point across the given axis.
///
/// Axis `X` replaces y with `canvas_size - y`; axis `Y` replaces x with
/// `canvas_size - x`. Applying the same flip twice restores the input.
pub fn flip(points: &[TaggedPoint], axis: FlipAxis, canvas_size: f64) -> Vec<TaggedPoint> {
    points
        .iter()
        .map(|p| {
            let (y, x) = match axis {
                FlipAxis::X => (canvas_size - p.y, p.x),
                FlipAxis::Y => (p.y, canvas_size - p.x),
            };
            TaggedPoint {
                tag: p.tag.clone(),
                y,
                x,
                extra: p.extra.clone(),
            }
        })
        .collect()
}

/// Scale every point uniformly about the canvas center.
///
/// Used both ways in production: factor above 1 grows a point set into an
/// added margin, factor below 1 shrinks it away from the canvas edge.
pub fn scale_from_center(
    points: &[TaggedPoint],
    scale_factor: f64,
    canvas_size: f64,
) -> Vec<TaggedPoint> {
    let center = canvas_size / 2.0;
    points
        .iter()
        .map(|p| TaggedPoint {
            tag: p.tag.clone(),
            y: (p.y - center) * scale_factor + center,
            x: (p.x - center) * scale_factor + center,
            extra: p.extra.clone(),
        })
        .collect()
}

/// Offset every row against a designated anchor row.
///
/// The anchor row passes through unchanged; every other row has the anchor's
/// y/x subtracted from its own. Fails if no row carries the anchor tag.
pub fn normalize_to_anchor(points: &[TaggedPoint], anchor_tag: &str) -> Result<Vec<TaggedPoint>> {
    let anchor = points
        .iter()
        .find(|p| p.tag == anchor_tag)
        .ok_or_else(|| Error::AnchorNotFound {
            tag: anchor_tag.to_string(),
        })?;
    let (anchor_y, anchor_x) = (anchor.y, anchor.x);

    Ok(points
        .iter()
        .map(|p| {
            if p.tag == anchor_tag {
                p.clone()
            } else {
                TaggedPoint {
                    tag: p.tag.clone(),
                    y: p.y - anchor_y,
                    x: p.x - anchor_x,
                    extra: p.extra.clone(),
                }
            }
        })
        .collect())
}

/// Apply a full transform request in the required order:
/// rotate, then flip, then — when a flip was requested and the rotation
/// normalizes to 90 or 270 — an extra 180 degree rotation, then scale.
///
/// The extra half turn is an observed orientation rule, not derived math:
/// flipping and then rotating by an odd quarter turn does not commute with
/// the intended visual orientation. Reordering this sequence silently
/// produces mirrored-wrong output for the 90/270 + flip cases.
pub fn apply(
    points: &[TaggedPoint],
    request: &TransformRequest,
    canvas_size: f64,
) -> Vec<TaggedPoint> {
    let rotation = normalize_rotation(request.rotation);
    let mut out = rotate(points, rotation, canvas_size);

    if request.flip_y {
        out = flip(&out, FlipAxis::Y, canvas_size);
    }
    if request.flip_x {
        out = flip(&out, FlipAxis::X, canvas_size);
    }
    if (request.flip_x || request.flip_y) && (rotation == 90.0 || rotation == 270.0) {
        out = rotate(&out, 180.0, canvas_size);
    }

    if request.scale != 1.0 {
        out = scale_from_center(&out, request.scale, canvas_size);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_CANVAS_SIZE;

    const CANVAS: f64 = DEFAULT_CANVAS_SIZE;

    fn points() -> Vec<TaggedPoint> {
        vec![
            TaggedPoint::new("kitchen", 100.0, 200.0),
            TaggedPoint::new("master_bedroom", 2048.0, 2048.0),
            TaggedPoint {
                tag: "balcony".into(),
                y: 3000.5,
                x: 512.25,
                extra: vec!["dim".into(), "4.2m".into()],
            },
        ]
    }

    fn assert_close(a: &[TaggedPoint], b: &[TaggedPoint]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert_eq!(p.tag, q.tag);
            assert!((p.y - q.y).abs() < 1e-9, "{} y: {} vs {}", p.tag, p.y, q.y);
            assert!((p.x - q.x).abs() < 1e-9, "{} x: {} vs {}", p.tag, p.x, q.x);
            assert_eq!(p.extra, q.extra);
        }
    }

    #[test]
    fn rotate_180_matches_documented_offsets() {
        let out = rotate(&[TaggedPoint::new("anchor", 100.0, 200.0)], 180.0, CANVAS);
        assert_eq!(out[0].y, 3936.0); // 4096 - 100 - 60
        assert_eq!(out[0].x, 3896.0); // 4096 - 200
    }

    #[test]
    fn rotate_90_matches_documented_offsets() {
        let out = rotate(&[TaggedPoint::new("anchor", 100.0, 200.0)], 90.0, CANVAS);
        assert_eq!(out[0].x, 3956.0); // (4096 - 100) - 40
        assert_eq!(out[0].y, 170.0); // 200 - 30
    }

    #[test]
    fn rotate_270_matches_documented_offsets() {
        let out = rotate(&[TaggedPoint::new("anchor", 100.0, 200.0)], 270.0, CANVAS);
        assert_eq!(out[0].x, 140.0); // 100 + 40
        assert_eq!(out[0].y, 3866.0); // (4096 - 200) - 30
    }

    #[test]
    fn rotation_round_trips_off_the_quarter_turns() {
        let original = points();
        let back = rotate(&rotate(&original, 45.0, CANVAS), -45.0, CANVAS);
        assert_close(&back, &original);
    }

    #[test]
    fn flip_is_idempotent_on_both_axes() {
        for canvas in [DEFAULT_CANVAS_SIZE, crate::types::LARGE_CANVAS_SIZE] {
            let original = points();
            assert_eq!(
                flip(&flip(&original, FlipAxis::X, canvas), FlipAxis::X, canvas),
                original
            );
            assert_eq!(
                flip(&flip(&original, FlipAxis::Y, canvas), FlipAxis::Y, canvas),
                original
            );
        }
    }

    #[test]
    fn scale_factor_one_is_identity() {
        let original = points();
        assert_eq!(scale_from_center(&original, 1.0, CANVAS), original);
    }

    #[test]
    fn scale_margin_round_trip() {
        // Shrinking by a 450px margin and growing back restores positions.
        let factor = (CANVAS - 2.0 * 450.0) / CANVAS;
        let original = points();
        let back = scale_from_center(
            &scale_from_center(&original, factor, CANVAS),
            1.0 / factor,
            CANVAS,
        );
        assert_close(&back, &original);
    }

    #[test]
    fn apply_matches_documented_order_for_flipped_quarter_turn() {
        let original = points();
        let request = TransformRequest {
            rotation: 90.0,
            flip_y: true,
            ..Default::default()
        };
        let composed = apply(&original, &request, CANVAS);
        let manual = rotate(
            &flip(&rotate(&original, 90.0, CANVAS), FlipAxis::Y, CANVAS),
            180.0,
            CANVAS,
        );
        assert_eq!(composed, manual);
    }

    #[test]
    fn apply_skips_extra_half_turn_without_flip() {
        let original = points();
        let request = TransformRequest {
            rotation: 270.0,
            ..Default::default()
        };
        assert_eq!(
            apply(&original, &request, CANVAS),
            rotate(&original, 270.0, CANVAS)
        );
    }

    #[test]
    fn apply_normalizes_negative_rotation() {
        let original = points();
        let request = TransformRequest {
            rotation: -90.0,
            ..Default::default()
        };
        assert_eq!(
            apply(&original, &request, CANVAS),
            rotate(&original, 270.0, CANVAS)
        );
    }

    #[test]
    fn tags_and_extra_columns_pass_through() {
        let out = rotate(&points(), 90.0, CANVAS);
        assert_eq!(out[2].tag, "balcony");
        assert_eq!(out[2].extra, vec!["dim".to_string(), "4.2m".to_string()]);
    }

    #[test]
    fn anchor_normalization_offsets_all_but_the_anchor() {
        let rows = vec![
            TaggedPoint::new("AnchorObject", 10.0, 20.0),
            TaggedPoint::new("cam_1", 110.0, 220.0),
        ];
        let out = normalize_to_anchor(&rows, "AnchorObject").unwrap();
        assert_eq!(out[0], rows[0]);
        assert_eq!(out[1].y, 100.0);
        assert_eq!(out[1].x, 200.0);
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let err = normalize_to_anchor(&points(), "AnchorObject").unwrap_err();
        assert!(matches!(err, Error::AnchorNotFound { tag } if tag == "AnchorObject"));
    }
}
