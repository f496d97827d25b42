use serde::{Deserialize, Serialize};

use crate::classifier::MaterialMasks;
use crate::image_utils::count_set_pixels;

/// Material composition of one image, in percent of classified pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct MaterialSample {
    pub cardboard_percent: f64,
    pub newsprint_percent: f64,
}

impl MaterialSample {
    pub fn new(cardboard_percent: f64, newsprint_percent: f64) -> Self {
        Self { cardboard_percent, newsprint_percent }
    }

    /// Percentages from raw pixel counts. No classified pixels yields (0, 0).
    pub fn from_counts(cardboard: u64, newsprint: u64) -> Self {
        let relevant = cardboard + newsprint;
        if relevant == 0 {
            return Self::default();
        }
        let relevant = relevant as f64;
        Self {
            cardboard_percent: cardboard as f64 / relevant * 100.0,
            newsprint_percent: newsprint as f64 / relevant * 100.0,
        }
    }

    /// True when the image contained no pixel in either material band
    pub fn is_empty(&self) -> bool {
        self.cardboard_percent == 0.0 && self.newsprint_percent == 0.0
    }
}

/// Turn classified masks into percentages.
///
/// Percentages are relative to cardboard + newsprint pixels only; region
/// pixels matching neither band do not count.
pub fn calculate_percentages(masks: &MaterialMasks) -> MaterialSample {
    MaterialSample::from_counts(
        count_set_pixels(&masks.cardboard),
        count_set_pixels(&masks.newsprint),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use image::{GrayImage, Luma};

    #[test]
    fn test_no_relevant_pixels_is_zero() {
        let sample = MaterialSample::from_counts(0, 0);
        assert_eq!(sample, MaterialSample::new(0.0, 0.0));
        assert!(sample.is_empty());
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        for (c, n) in [(1, 2), (7, 0), (0, 13), (333, 667), (5, 9)] {
            let sample = MaterialSample::from_counts(c, n);
            assert_approx_eq!(sample.cardboard_percent + sample.newsprint_percent, 100.0);
        }
    }

    #[test]
    fn test_calculate_from_masks() {
        let masks = MaterialMasks {
            cardboard: GrayImage::from_fn(4, 1, |x, _| Luma([if x == 0 { 255 } else { 0 }])),
            newsprint: GrayImage::from_fn(4, 1, |x, _| Luma([if x > 0 { 255 } else { 0 }])),
        };
        let sample = calculate_percentages(&masks);

        assert_approx_eq!(sample.cardboard_percent, 25.0);
        assert_approx_eq!(sample.newsprint_percent, 75.0);
    }
}
