use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors2;

use crate::errors::{PaperMixError, Result};

/// Mask value for a set pixel (matches the 0/255 convention of binary masks)
pub const MASK_SET: u8 = 255;

/// Overlay colors for the debug classification image
pub const CARDBOARD_OVERLAY_RGB: [u8; 3] = [150, 90, 30];
pub const NEWSPRINT_OVERLAY_RGB: [u8; 3] = [240, 240, 240];
pub const OVERLAP_OVERLAY_RGB: [u8; 3] = [255, 0, 255]; // Bright pink

/// Resize an image to the specified dimensions
pub fn resize_image(image: &RgbImage, dimensions: [u32; 2]) -> RgbImage {
    let (width, height) = (dimensions[0], dimensions[1]);
    image::imageops::resize(
        image,
        width,
        height,
        image::imageops::FilterType::Triangle,
    )
}

#[inline]
pub fn is_set(pixel: &Luma<u8>) -> bool {
    pixel[0] > 0
}

#[inline]
fn mask_value(set: bool) -> Luma<u8> {
    Luma([if set { MASK_SET } else { 0 }])
}

fn ensure_same_dimensions(a: &GrayImage, b: &GrayImage) -> Result<()> {
    if a.dimensions() != b.dimensions() {
        return Err(PaperMixError::DimensionMismatch {
            expected: a.dimensions(),
            actual: b.dimensions(),
        });
    }
    Ok(())
}

/// Pixel-wise AND of two masks
pub fn mask_and(a: &GrayImage, b: &GrayImage) -> Result<GrayImage> {
    ensure_same_dimensions(a, b)?;
    Ok(map_colors2(a, b, |p, q| mask_value(is_set(&p) && is_set(&q))))
}

/// Number of set pixels in a mask
pub fn count_set_pixels(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| is_set(p)).count() as u64
}

/// Render cardboard and newsprint masks into one RGB image for inspection.
/// Pixels set in both masks are drawn in pink.
pub fn create_classification_overlay(
    cardboard: &GrayImage,
    newsprint: &GrayImage,
) -> Result<RgbImage> {
    ensure_same_dimensions(cardboard, newsprint)?;
    Ok(map_colors2(cardboard, newsprint, |c, n| {
        match (is_set(&c), is_set(&n)) {
            (true, true) => Rgb(OVERLAP_OVERLAY_RGB),
            (true, false) => Rgb(CARDBOARD_OVERLAY_RGB),
            (false, true) => Rgb(NEWSPRINT_OVERLAY_RGB),
            (false, false) => Rgb([0, 0, 0]),
        }
    }))
}
