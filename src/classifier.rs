use image::GrayImage;

use crate::color_space::{ColorBand, HsvImage};
use crate::errors::{PaperMixError, Result};
use crate::image_utils::mask_and;
use crate::region::band_mask;

/// Per-material masks, each restricted to the selected region
#[derive(Debug, Clone)]
pub struct MaterialMasks {
    pub cardboard: GrayImage,
    pub newsprint: GrayImage,
}

/// Split the region into cardboard-like and newsprint-like pixels.
///
/// Disjointness of the two bands is not enforced; a pixel matching both
/// bands is set in both masks and counted twice downstream.
pub fn classify_materials(
    hsv: &HsvImage,
    cardboard_band: &ColorBand,
    newsprint_band: &ColorBand,
    region: &GrayImage,
) -> Result<MaterialMasks> {
    if hsv.dimensions() != region.dimensions() {
        return Err(PaperMixError::DimensionMismatch {
            expected: hsv.dimensions(),
            actual: region.dimensions(),
        });
    }

    let cardboard = mask_and(&band_mask(hsv, cardboard_band), region)?;
    let newsprint = mask_and(&band_mask(hsv, newsprint_band), region)?;

    Ok(MaterialMasks { cardboard, newsprint })
}
