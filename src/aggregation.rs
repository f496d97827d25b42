use serde::{Deserialize, Serialize};

use crate::decision::{DecisionPolicy, Recommendation};
use crate::errors::{PaperMixError, Result};
use crate::percentage::MaterialSample;

/// Averaged composition of a batch and the resulting recommendation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BatchResult {
    pub average_cardboard_percent: f64,
    pub average_newsprint_percent: f64,
    pub recommendation: Recommendation,
}

/// Unweighted mean of the samples.
///
/// Every image counts once, including images that produced (0, 0).
pub fn average_samples(samples: &[MaterialSample]) -> Result<MaterialSample> {
    if samples.is_empty() {
        return Err(PaperMixError::EmptyBatch);
    }

    let (cardboard_sum, newsprint_sum) = samples.iter().fold((0.0, 0.0), |(c, n), s| {
        (c + s.cardboard_percent, n + s.newsprint_percent)
    });
    let count = samples.len() as f64;

    Ok(MaterialSample::new(cardboard_sum / count, newsprint_sum / count))
}

/// Average a batch of samples and apply the decision policy
pub fn aggregate_samples(samples: &[MaterialSample], policy: &DecisionPolicy) -> Result<BatchResult> {
    let average = average_samples(samples)?;

    Ok(BatchResult {
        average_cardboard_percent: average.cardboard_percent,
        average_newsprint_percent: average.newsprint_percent,
        recommendation: policy.decide(average.cardboard_percent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_empty_batch_is_rejected() {
        let policy = DecisionPolicy::new(60.0, true);
        assert!(matches!(aggregate_samples(&[], &policy), Err(PaperMixError::EmptyBatch)));
    }

    #[test]
    fn test_identical_samples_average_to_themselves() {
        let sample = MaterialSample::new(37.5, 62.5);
        let average = average_samples(&[sample; 7]).unwrap();
        assert_eq!(average, sample);
    }

    #[test]
    fn test_empty_image_pulls_average_down() {
        let samples = [MaterialSample::new(100.0, 0.0), MaterialSample::new(0.0, 0.0)];
        let average = average_samples(&samples).unwrap();
        assert_approx_eq!(average.cardboard_percent, 50.0);
        assert_approx_eq!(average.newsprint_percent, 0.0);
    }

    #[test]
    fn test_single_image_batch() {
        let policy = DecisionPolicy::new(49.0, true);
        let result = aggregate_samples(&[MaterialSample::new(49.0, 51.0)], &policy).unwrap();
        assert_eq!(result.recommendation, Recommendation::Bale);
    }
}
