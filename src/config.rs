use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::capture_gate::CaptureGateKind;
use crate::color_space::{ColorBand, HUE_MAX};
use crate::decision::DecisionPolicy;
use crate::errors::{PaperMixError, Result};

/// Configuration for PaperMix
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_input_path")]
    pub input_path: String,

    #[serde(default = "default_output_base_dir")]
    pub output_base_dir: String,

    /// Optional downscale before analysis, [width, height]
    #[serde(default)]
    pub resize_dimensions: Option<[u32; 2]>,

    #[serde(default = "default_parallel")]
    pub use_parallel: bool,

    // Decision
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_threshold_inclusive")]
    pub threshold_inclusive: bool,

    /// Exact number of images per batch; None accepts any non-empty batch
    #[serde(default)]
    pub batch_size: Option<usize>,

    #[serde(default)]
    pub capture_gate: CaptureGateKind,

    // Color bands (HSV, hue in half degrees)
    #[serde(default = "default_roi_band")]
    pub roi_band: ColorBand,

    #[serde(default = "default_cardboard_band")]
    pub cardboard_band: ColorBand,

    #[serde(default = "default_newsprint_band")]
    pub newsprint_band: ColorBand,
}

fn default_input_path() -> String {
    "./input".to_string()
}

fn default_output_base_dir() -> String {
    "./output".to_string()
}

fn default_parallel() -> bool {
    true
}

pub fn default_roi_band() -> ColorBand {
    ColorBand::new([0, 0, 60], [180, 80, 255])
}

pub fn default_cardboard_band() -> ColorBand {
    ColorBand::new([10, 50, 50], [30, 255, 255]) // brown
}

pub fn default_newsprint_band() -> ColorBand {
    ColorBand::new([0, 0, 180], [180, 50, 255]) // white
}

fn default_threshold() -> f64 {
    60.0
}

fn default_threshold_inclusive() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_base_dir: default_output_base_dir(),
            resize_dimensions: None,
            use_parallel: default_parallel(),
            roi_band: default_roi_band(),
            cardboard_band: default_cardboard_band(),
            newsprint_band: default_newsprint_band(),
            threshold: default_threshold(),
            threshold_inclusive: default_threshold_inclusive(),
            batch_size: None,
            capture_gate: CaptureGateKind::None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PaperMixError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|source| PaperMixError::ConfigLoad {
            source,
            path: path.to_path_buf(),
        })
    }

    /// Weighbridge station setup: plate photo first, exactly five load photos,
    /// bale from 49 % cardboard
    pub fn plate_station() -> Self {
        Self {
            threshold: 49.0,
            batch_size: Some(5),
            capture_gate: CaptureGateKind::CameraRequired,
            ..Self::default()
        }
    }

    pub fn decision_policy(&self) -> DecisionPolicy {
        DecisionPolicy::new(self.threshold, self.threshold_inclusive)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_band("roi_band", &self.roi_band)?;
        validate_band("cardboard_band", &self.cardboard_band)?;
        validate_band("newsprint_band", &self.newsprint_band)?;

        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(PaperMixError::Config(
                "threshold must be between 0.0 and 100.0".to_string(),
            ));
        }

        if self.batch_size == Some(0) {
            return Err(PaperMixError::Config(
                "batch_size must be > 0".to_string(),
            ));
        }

        if let Some([width, height]) = self.resize_dimensions {
            if width == 0 || height == 0 {
                return Err(PaperMixError::Config(
                    "resize_dimensions must be > 0".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            PaperMixError::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content)?;

        Ok(())
    }
}

fn validate_band(name: &str, band: &ColorBand) -> Result<()> {
    if band.lower[0] > HUE_MAX || band.upper[0] > HUE_MAX {
        return Err(PaperMixError::Config(format!(
            "{}: hue bounds must be <= {}", name, HUE_MAX
        )));
    }

    if band.lower.iter().zip(band.upper.iter()).any(|(lo, hi)| lo > hi) {
        return Err(PaperMixError::Config(format!(
            "{}: lower bound {:?} exceeds upper bound {:?}", name, band.lower, band.upper
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::plate_station().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            threshold = 49.0
            threshold_inclusive = false
            batch_size = 5

            [cardboard_band]
            lower = [8, 40, 40]
            upper = [32, 255, 255]
            "#,
        )
        .unwrap();

        assert_eq!(config.threshold, 49.0);
        assert!(!config.threshold_inclusive);
        assert_eq!(config.batch_size, Some(5));
        assert_eq!(config.cardboard_band, ColorBand::new([8, 40, 40], [32, 255, 255]));
        assert_eq!(config.roi_band, default_roi_band());
        assert_eq!(config.capture_gate, CaptureGateKind::None);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::plate_station();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let config = Config {
            newsprint_band: ColorBand::new([0, 60, 180], [180, 50, 255]),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(PaperMixError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let hue = Config {
            roi_band: ColorBand::new([0, 0, 60], [200, 80, 255]),
            ..Config::default()
        };
        let threshold = Config { threshold: 120.0, ..Config::default() };
        let batch = Config { batch_size: Some(0), ..Config::default() };

        assert!(hue.validate().is_err());
        assert!(threshold.validate().is_err());
        assert!(batch.validate().is_err());
    }
}
