use log::info;

use crate::capture_gate::{CaptureEvidence, CaptureGate};
use crate::config::Config;
use crate::errors::{PaperMixError, Result};
use crate::image_io::InputImage;
use crate::pipeline::{analyze_batch, BatchReport};

/// Reject a batch whose length differs from the configured batch size
pub fn check_batch_size(actual: usize, config: &Config) -> Result<()> {
    if actual == 0 {
        return Err(PaperMixError::EmptyBatch);
    }

    match config.batch_size {
        Some(expected) if expected != actual => {
            Err(PaperMixError::BatchSizeMismatch { expected, actual })
        }
        _ => Ok(()),
    }
}

/// Station workflow: capture gate, batch size check, then the analysis
pub fn run_batch(
    inputs: Vec<InputImage>,
    config: &Config,
    evidence: &CaptureEvidence,
    debug: bool,
) -> Result<BatchReport> {
    let gate = config.capture_gate.build();
    gate.check(evidence)?;
    info!("Capture gate '{}' passed", gate.name());

    check_batch_size(inputs.len(), config)?;

    analyze_batch(inputs, config, debug)
}
