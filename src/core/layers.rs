//! Layered floorplan compositing.
//!
//! Thin raster glue over the `image` crate: stack a base plan, overlays
//! (balcony, dimension labels), and an optional translucent wash into one
//! square canvas. Orientation of a composed image follows the same
//! rotate, mirror, conditional half-turn order as the point transform so
//! labels and pixels stay in lockstep across variants.
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::core::permute::Permutation;
use crate::error::{Error, Result};
use crate::io::svg::MaskRect;

/// Translucent color wash composited over the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub rgba: [u8; 4],
}

/// Warm wash applied to ground-floor plans so the garden layer reads as
/// outdoor space. Color agreed with the art team.
pub const GROUND_FLOOR_WASH: Tint = Tint {
    rgba: [0xb8, 0xa7, 0x92, 128],
};

/// Load an image and resize it onto the square canvas.
pub fn load_layer(path: &Path, canvas_size: u32) -> Result<RgbaImage> {
    let img = image::open(path)?.to_rgba8();
    if img.width() == canvas_size && img.height() == canvas_size {
        return Ok(img);
    }
    debug!(
        "resizing layer {:?} from {}x{} to {}x{}",
        path,
        img.width(),
        img.height(),
        canvas_size,
        canvas_size
    );
    Ok(imageops::resize(
        &img,
        canvas_size,
        canvas_size,
        FilterType::Lanczos3,
    ))
}

/// Alpha-over the layers bottom-up onto a transparent canvas.
pub fn composite(layers: &[RgbaImage], canvas_size: u32) -> Result<RgbaImage> {
    if layers.is_empty() {
        return Err(Error::Processing("no layers to composite".to_string()));
    }
    let mut canvas = RgbaImage::new(canvas_size, canvas_size);
    for layer in layers {
        imageops::overlay(&mut canvas, layer, 0, 0);
    }
    Ok(canvas)
}

/// Blend a translucent wash over every pixel.
pub fn apply_tint(img: &mut RgbaImage, tint: Tint) {
    let [tr, tg, tb, ta] = tint.rgba;
    let alpha = ta as f32 / 255.0;
    for pixel in img.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let blend = |src: u8, dst: u8| -> u8 {
            (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
        };
        *pixel = Rgba([blend(tr, r), blend(tg, g), blend(tb, b), a.max(ta)]);
    }
}

/// Crop an overlay to its mask bounding box, clamped to the image.
pub fn crop_to_mask(img: &RgbaImage, bounds: &MaskRect) -> RgbaImage {
    let x = bounds.x.max(0.0) as u32;
    let y = bounds.y.max(0.0) as u32;
    let right = (bounds.right().max(0.0) as u32).min(img.width());
    let bottom = (bounds.bottom().max(0.0) as u32).min(img.height());
    let width = right.saturating_sub(x).max(1);
    let height = bottom.saturating_sub(y).max(1);
    imageops::crop_imm(img, x, y, width, height).to_image()
}

/// Orient a composed image for one permutation.
///
/// Rotation first (quarter turns only on the raster side), then the mirror,
/// then the extra half turn when the permutation both flips and rotates by
/// an odd quarter turn. Same order as the point transform.
pub fn orient(img: &RgbaImage, permutation: &Permutation) -> Result<RgbaImage> {
    let rotation = permutation.rotation.rem_euclid(360);
    let mut out = match rotation {
        0 => img.clone(),
        90 => imageops::rotate90(img),
        180 => imageops::rotate180(img),
        270 => imageops::rotate270(img),
        other => {
            return Err(Error::Processing(format!(
                "raster orientation only supports quarter turns, got {other} degrees"
            )));
        }
    };

    if permutation.flip {
        out = imageops::flip_horizontal(&out);
        if rotation == 90 || rotation == 270 {
            out = imageops::rotate180(&out);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn composite_stacks_bottom_up() {
        let bottom = RgbaImage::from_pixel(2, 2, RED);
        let mut top = RgbaImage::from_pixel(2, 2, CLEAR);
        top.put_pixel(1, 0, BLUE);

        let out = composite(&[bottom, top], 2).unwrap();
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(1, 0), BLUE);
    }

    #[test]
    fn composite_needs_at_least_one_layer() {
        assert!(matches!(composite(&[], 2), Err(Error::Processing(_))));
    }

    #[test]
    fn orient_quarter_turn_moves_pixels_clockwise() {
        let mut img = RgbaImage::from_pixel(2, 1, RED);
        img.put_pixel(1, 0, BLUE);

        let out = orient(
            &img,
            &Permutation {
                rotation: 90,
                flip: false,
            },
        )
        .unwrap();
        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(0, 1), BLUE);
    }

    #[test]
    fn orient_flipped_quarter_turn_gets_extra_half_turn() {
        let mut img = RgbaImage::from_pixel(2, 1, RED);
        img.put_pixel(1, 0, BLUE);

        let plain = orient(
            &img,
            &Permutation {
                rotation: 90,
                flip: false,
            },
        )
        .unwrap();
        let flipped = orient(
            &img,
            &Permutation {
                rotation: 90,
                flip: true,
            },
        )
        .unwrap();
        // Mirroring a 1-wide column is a no-op, so the extra half turn is
        // the only difference: the column reads top-to-bottom reversed.
        assert_eq!(*flipped.get_pixel(0, 0), *plain.get_pixel(0, 1));
        assert_eq!(*flipped.get_pixel(0, 1), *plain.get_pixel(0, 0));
    }

    #[test]
    fn orient_rejects_odd_angles() {
        let img = RgbaImage::new(1, 1);
        let err = orient(
            &img,
            &Permutation {
                rotation: 45,
                flip: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Processing(_)));
    }

    #[test]
    fn tint_blends_half_alpha() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        apply_tint(&mut img, Tint { rgba: [200, 100, 50, 128] });
        let Rgba([r, g, b, a]) = *img.get_pixel(0, 0);
        assert_eq!((r, g, b), (100, 50, 25));
        assert_eq!(a, 255);
    }

    #[test]
    fn crop_clamps_to_image_bounds() {
        let img = RgbaImage::new(10, 10);
        let out = crop_to_mask(
            &img,
            &MaskRect {
                x: 6.0,
                y: 6.0,
                width: 100.0,
                height: 100.0,
            },
        );
        assert_eq!(out.dimensions(), (4, 4));
    }
}
