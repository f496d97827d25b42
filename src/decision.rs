use std::fmt;

use serde::{Deserialize, Serialize};

/// Handling recommendation for a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Compact the load (Verpressen)
    Bale,
    /// Separate materials by hand (Sortieren)
    Sort,
}

impl Recommendation {
    /// Label used at the sorting station
    pub fn german_label(&self) -> &'static str {
        match self {
            Recommendation::Bale => "Verpressen",
            Recommendation::Sort => "Sortieren",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Bale => write!(f, "Bale"),
            Recommendation::Sort => write!(f, "Sort"),
        }
    }
}

/// Single threshold comparison on the average cardboard percentage
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DecisionPolicy {
    pub threshold: f64,
    pub threshold_inclusive: bool,
}

impl DecisionPolicy {
    pub fn new(threshold: f64, threshold_inclusive: bool) -> Self {
        Self { threshold, threshold_inclusive }
    }

    pub fn decide(&self, average_cardboard_percent: f64) -> Recommendation {
        let bale = if self.threshold_inclusive {
            average_cardboard_percent >= self.threshold
        } else {
            average_cardboard_percent > self.threshold
        };

        if bale {
            Recommendation::Bale
        } else {
            Recommendation::Sort
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_threshold() {
        let policy = DecisionPolicy::new(60.0, true);
        assert_eq!(policy.decide(60.0), Recommendation::Bale);
        assert_eq!(policy.decide(59.9), Recommendation::Sort);
    }

    #[test]
    fn test_exclusive_threshold() {
        let policy = DecisionPolicy::new(49.0, false);
        assert_eq!(policy.decide(49.0), Recommendation::Sort);
        assert_eq!(policy.decide(49.1), Recommendation::Bale);
    }

    #[test]
    fn test_decision_flips_once() {
        for inclusive in [true, false] {
            let policy = DecisionPolicy::new(49.0, inclusive);
            let flips = (0..=1000)
                .map(|i| policy.decide(i as f64 / 10.0))
                .collect::<Vec<_>>()
                .windows(2)
                .filter(|pair| pair[0] != pair[1])
                .count();
            assert_eq!(flips, 1);
            assert_eq!(policy.decide(0.0), Recommendation::Sort);
            assert_eq!(policy.decide(100.0), Recommendation::Bale);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Recommendation::Bale.to_string(), "Bale");
        assert_eq!(Recommendation::Sort.german_label(), "Sortieren");
    }
}
