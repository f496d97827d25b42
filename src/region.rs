use image::{GrayImage, Luma};

use crate::color_space::{ColorBand, HsvImage};
use crate::image_utils::MASK_SET;

/// Build a binary mask of all pixels within `band`
pub fn band_mask(hsv: &HsvImage, band: &ColorBand) -> GrayImage {
    let (width, height) = hsv.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if band.contains(hsv.get_pixel(x, y)) {
            Luma([MASK_SET])
        } else {
            Luma([0])
        }
    })
}

/// Select the paper pile: pixels inside the ROI band.
///
/// The ROI band keeps low-saturation pixels of medium to high brightness, which
/// drops colorful equipment and dark floor before classification.
pub fn select_region(hsv: &HsvImage, roi_band: &ColorBand) -> GrayImage {
    band_mask(hsv, roi_band)
}
