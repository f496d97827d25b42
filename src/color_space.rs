use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::errors::{PaperMixError, Result};

/// Largest hue value in the half-degree encoding (0..=180 covers 0..360 degrees)
pub const HUE_MAX: u8 = 180;

/// A single pixel in 8-bit HSV space.
///
/// Hue is stored in half degrees so that the full circle fits in a byte,
/// saturation and value span 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// HSV representation of an RGB image, same dimensions as its source
#[derive(Debug, Clone)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<Hsv>,
}

impl HsvImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y); panics when out of bounds, like `ImageBuffer::get_pixel`
    pub fn get_pixel(&self, x: u32, y: u32) -> Hsv {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &Hsv> {
        self.pixels.iter()
    }
}

/// Inclusive lower/upper bounds in HSV space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorBand {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorBand {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// True if every component of `pixel` lies within the bounds (inclusive)
    #[inline]
    pub fn contains(&self, pixel: Hsv) -> bool {
        let [h_lo, s_lo, v_lo] = self.lower;
        let [h_hi, s_hi, v_hi] = self.upper;
        (h_lo..=h_hi).contains(&pixel.h)
            && (s_lo..=s_hi).contains(&pixel.s)
            && (v_lo..=v_hi).contains(&pixel.v)
    }
}

/// Convert one RGB pixel to 8-bit HSV.
///
/// V = max(r, g, b), S = 255 * (max - min) / max, H = hue in degrees / 2.
/// Grey pixels get hue 0, black pixels get saturation 0.
#[inline]
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> Hsv {
    let [r, g, b] = pixel.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let s = if max == 0 {
        0
    } else {
        (255.0 * delta / max as f32).round() as u8
    };

    let h = if max == min {
        0
    } else {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let degrees = if max as f32 == r {
            60.0 * (g - b) / delta
        } else if max as f32 == g {
            60.0 * (b - r) / delta + 120.0
        } else {
            60.0 * (r - g) / delta + 240.0
        };
        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        let half = (degrees / 2.0).round() as u8;
        if half >= HUE_MAX { 0 } else { half }
    };

    Hsv { h, s, v: max }
}

/// Convert a decoded RGB image into its HSV representation
pub fn convert_to_hsv(image: &RgbImage) -> Result<HsvImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PaperMixError::MalformedImage { width, height });
    }

    let pixels = image.pixels().map(rgb_to_hsv).collect();

    Ok(HsvImage { width, height, pixels })
}
