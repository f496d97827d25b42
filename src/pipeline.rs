use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use image::{GrayImage, RgbImage};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregation::{aggregate_samples, BatchResult};
use crate::classifier::{classify_materials, MaterialMasks};
use crate::color_space::convert_to_hsv;
use crate::config::Config;
use crate::errors::Result;
use crate::image_io::{save_image, save_mask, InputImage};
use crate::image_utils::{count_set_pixels, create_classification_overlay, resize_image};
use crate::percentage::{calculate_percentages, MaterialSample};
use crate::region::select_region;

/// Raw pixel counts behind a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PixelCounts {
    pub roi: u64,
    pub cardboard: u64,
    pub newsprint: u64,
}

/// Everything computed for one image, masks included
#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub sample: MaterialSample,
    pub counts: PixelCounts,
    pub region: GrayImage,
    pub masks: MaterialMasks,
}

/// Per-image line of a batch report
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageReport {
    pub label: String,
    pub sample: MaterialSample,
    pub counts: PixelCounts,
}

/// Per-image results in input order plus the batch decision
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BatchReport {
    pub images: Vec<ImageReport>,
    pub result: BatchResult,
}

impl BatchReport {
    pub fn samples(&self) -> Vec<MaterialSample> {
        self.images.iter().map(|report| report.sample).collect()
    }
}

/// Run image -> HSV -> region -> material masks -> percentages
pub fn analyze_image(image: &RgbImage, config: &Config) -> Result<ImageAnalysis> {
    let image = match config.resize_dimensions {
        Some(dimensions) => Cow::Owned(resize_image(image, dimensions)),
        None => Cow::Borrowed(image),
    };

    let hsv = convert_to_hsv(&image)?;
    let region = select_region(&hsv, &config.roi_band);
    let masks = classify_materials(&hsv, &config.cardboard_band, &config.newsprint_band, &region)?;
    let sample = calculate_percentages(&masks);

    let counts = PixelCounts {
        roi: count_set_pixels(&region),
        cardboard: count_set_pixels(&masks.cardboard),
        newsprint: count_set_pixels(&masks.newsprint),
    };

    Ok(ImageAnalysis { sample, counts, region, masks })
}

/// Analyse a single photo; in debug mode the masks are written to `<output>/debug`
pub fn process_image(input: InputImage, config: &Config, debug: bool) -> Result<ImageReport> {
    let InputImage { image, path, filename } = input;

    let analysis = analyze_image(&image, config)?;

    debug!(
        "{}: {} ROI pixels, {} cardboard, {} newsprint",
        path.display(), analysis.counts.roi, analysis.counts.cardboard, analysis.counts.newsprint
    );
    if analysis.sample.is_empty() {
        warn!("{}: no pixel matched either material band, counting as 0 % / 0 %", filename);
    }

    if debug {
        save_debug_masks(&analysis, config, &filename)?;
    }

    Ok(ImageReport {
        label: filename,
        sample: analysis.sample,
        counts: analysis.counts,
    })
}

fn save_debug_masks(analysis: &ImageAnalysis, config: &Config, filename: &str) -> Result<()> {
    let debug_dir = PathBuf::from(&config.output_base_dir).join("debug");
    fs::create_dir_all(&debug_dir)?;

    let stem = filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(filename);
    save_mask(&analysis.region, debug_dir.join(format!("{}_roi.png", stem)))?;
    save_mask(&analysis.masks.cardboard, debug_dir.join(format!("{}_cardboard.png", stem)))?;
    save_mask(&analysis.masks.newsprint, debug_dir.join(format!("{}_newsprint.png", stem)))?;

    let overlay = create_classification_overlay(&analysis.masks.cardboard, &analysis.masks.newsprint)?;
    save_image(&overlay, debug_dir.join(format!("{}_overlay.png", stem)))?;

    Ok(())
}

/// Analyse every photo of a batch and aggregate.
///
/// Images are independent; with `use_parallel` they are processed on the rayon
/// pool and collected in input order before averaging. Any failure aborts the
/// batch without a partial result.
pub fn analyze_batch(inputs: Vec<InputImage>, config: &Config, debug: bool) -> Result<BatchReport> {
    info!("Analysing batch of {} images", inputs.len());

    let images = if config.use_parallel {
        inputs
            .into_par_iter()
            .map(|input| process_image(input, config, debug))
            .collect::<Result<Vec<_>>>()?
    } else {
        inputs
            .into_iter()
            .map(|input| process_image(input, config, debug))
            .collect::<Result<Vec<_>>>()?
    };

    let samples: Vec<MaterialSample> = images.iter().map(|report| report.sample).collect();
    let result = aggregate_samples(&samples, &config.decision_policy())?;

    info!(
        "Batch average: cardboard {:.1} %, newsprint {:.1} % -> {}",
        result.average_cardboard_percent, result.average_newsprint_percent, result.recommendation
    );

    Ok(BatchReport { images, result })
}
