use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::{PaperMixError, Result};

/// What the operator captured before the load photos
#[derive(Debug, Clone, Default)]
pub struct CaptureEvidence {
    /// Photo taken with the station camera (usually the licence plate)
    pub camera_capture: Option<PathBuf>,
    /// Plate text read from that photo by an external OCR step
    pub plate_text: Option<String>,
}

/// Pre-step that must pass before a batch is analysed
pub trait CaptureGate {
    fn name(&self) -> &'static str;

    fn check(&self, evidence: &CaptureEvidence) -> Result<()>;
}

/// Gate selection as stored in the configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureGateKind {
    #[default]
    None,
    CameraRequired,
    PlateRecognitionRequired,
}

impl CaptureGateKind {
    pub fn build(&self) -> Box<dyn CaptureGate + Send + Sync> {
        match self {
            CaptureGateKind::None => Box::new(NoGate),
            CaptureGateKind::CameraRequired => Box::new(CameraGate),
            CaptureGateKind::PlateRecognitionRequired => Box::new(PlateRecognitionGate),
        }
    }
}

pub struct NoGate;

impl CaptureGate for NoGate {
    fn name(&self) -> &'static str {
        "none"
    }

    fn check(&self, _evidence: &CaptureEvidence) -> Result<()> {
        Ok(())
    }
}

/// Requires a camera capture on disk
pub struct CameraGate;

impl CaptureGate for CameraGate {
    fn name(&self) -> &'static str {
        "camera_required"
    }

    fn check(&self, evidence: &CaptureEvidence) -> Result<()> {
        let path = evidence.camera_capture.as_ref().ok_or_else(|| {
            PaperMixError::CaptureGate("a camera capture of the licence plate is required".to_string())
        })?;

        if !path.is_file() {
            return Err(PaperMixError::CaptureGate(format!(
                "camera capture {} does not exist", path.display()
            )));
        }

        info!("Camera capture stored: {}", path.display());
        Ok(())
    }
}

/// Requires a camera capture plus a plausible plate reading
pub struct PlateRecognitionGate;

impl CaptureGate for PlateRecognitionGate {
    fn name(&self) -> &'static str {
        "plate_recognition_required"
    }

    fn check(&self, evidence: &CaptureEvidence) -> Result<()> {
        CameraGate.check(evidence)?;

        let plate = evidence.plate_text.as_deref().map(str::trim).unwrap_or("");
        if !is_plausible_plate(plate) {
            return Err(PaperMixError::CaptureGate(format!(
                "no readable licence plate text (got '{}')", plate
            )));
        }

        debug!("Plate recognised: {}", plate);
        Ok(())
    }
}

/// Letters and digits with optional separators, e.g. "B-AB 1234"
pub fn is_plausible_plate(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| *c != ' ' && *c != '-').collect();
    (2..=10).contains(&compact.chars().count())
        && compact.chars().all(char::is_alphanumeric)
        && compact.chars().any(char::is_alphabetic)
        && compact.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_capture(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("paper_mix_gate_{}_{}.jpg", name, std::process::id()));
        fs::write(&path, b"capture").unwrap();
        path
    }

    #[test]
    fn test_no_gate_always_passes() {
        assert!(CaptureGateKind::None.build().check(&CaptureEvidence::default()).is_ok());
    }

    #[test]
    fn test_camera_gate_requires_capture() {
        let gate = CaptureGateKind::CameraRequired.build();
        assert!(matches!(
            gate.check(&CaptureEvidence::default()),
            Err(PaperMixError::CaptureGate(_))
        ));

        let missing = CaptureEvidence {
            camera_capture: Some(PathBuf::from("/nonexistent/plate.jpg")),
            plate_text: None,
        };
        assert!(gate.check(&missing).is_err());

        let path = temp_capture("camera");
        let present = CaptureEvidence { camera_capture: Some(path.clone()), plate_text: None };
        assert!(gate.check(&present).is_ok());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_plate_gate_requires_text() {
        let gate = CaptureGateKind::PlateRecognitionRequired.build();
        let path = temp_capture("plate");

        let without_text = CaptureEvidence { camera_capture: Some(path.clone()), plate_text: None };
        assert!(gate.check(&without_text).is_err());

        let with_text = CaptureEvidence {
            camera_capture: Some(path.clone()),
            plate_text: Some(" B-AB 1234 ".to_string()),
        };
        assert!(gate.check(&with_text).is_ok());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_plate_plausibility() {
        assert!(is_plausible_plate("M-XY 42"));
        assert!(is_plausible_plate("HH1234"));
        assert!(!is_plausible_plate(""));
        assert!(!is_plausible_plate("ABCDEF"));
        assert!(!is_plausible_plate("12345"));
        assert!(!is_plausible_plate("B-AB#1234"));
    }

    #[test]
    fn test_gate_names() {
        assert_eq!(CaptureGateKind::PlateRecognitionRequired.build().name(), "plate_recognition_required");
    }
}
