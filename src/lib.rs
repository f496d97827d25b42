// src/lib.rs - Library interface for PaperMix

pub mod aggregation;
pub mod capture_gate;
pub mod classifier;
pub mod color_space;
pub mod config;
pub mod decision;
pub mod errors;
pub mod image_io;
pub mod image_utils;
pub mod output;
pub mod percentage;
pub mod pipeline;
pub mod region;
pub mod workflow;

// Re-export commonly used types and functions
pub use errors::{PaperMixError, Result};
pub use config::Config;
pub use image_io::{InputImage, load_image, get_image_files_in_dir};

// Core pipeline stages
pub use color_space::{ColorBand, Hsv, HsvImage, convert_to_hsv, rgb_to_hsv};
pub use region::select_region;
pub use classifier::{MaterialMasks, classify_materials};
pub use percentage::{MaterialSample, calculate_percentages};
pub use aggregation::{BatchResult, aggregate_samples, average_samples};
pub use decision::{DecisionPolicy, Recommendation};

// Batch processing
pub use pipeline::{BatchReport, ImageAnalysis, ImageReport, PixelCounts, analyze_batch, analyze_image, process_image};
pub use capture_gate::{CaptureEvidence, CaptureGate, CaptureGateKind};
pub use workflow::{check_batch_size, run_batch};
