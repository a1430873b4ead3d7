//! Prediction result types.
//!
//! Represents the output of the hypertension risk classifier and the
//! decision taken on it.

use serde::{Deserialize, Serialize};

use super::features::{DerivedFeatures, FeatureMap, FeatureVector};
use super::inputs::RawInputs;
use crate::RiskError;

/// Binary hypertension risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    HighRisk,
    NormalRisk,
}

impl RiskLabel {
    /// Decide the label; a probability equal to the threshold is high risk.
    #[must_use]
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Self::HighRisk
        } else {
            Self::NormalRisk
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::HighRisk => "Probability at or above the decision threshold",
            Self::NormalRisk => "Probability below the decision threshold",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighRisk => write!(f, "High HTN Risk"),
            Self::NormalRisk => write!(f, "Normal Risk"),
        }
    }
}

/// Where the decision threshold came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdSource {
    /// Read from the threshold artifact
    Artifact,
    /// Artifact absent or unreadable
    Default,
}

/// Decision threshold applied to the classifier probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub source: ThresholdSource,
}

impl Threshold {
    pub const DEFAULT_VALUE: f64 = 0.5;

    /// Threshold taken from an artifact value.
    ///
    /// # Errors
    /// Returns `RiskError::ThresholdLoad` unless `value` is finite and within [0, 1].
    pub fn from_artifact(value: f64) -> Result<Self, RiskError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(RiskError::ThresholdLoad(format!(
                "threshold {value} is not a probability in [0, 1]"
            )));
        }
        Ok(Self {
            value,
            source: ThresholdSource::Artifact,
        })
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            value: Self::DEFAULT_VALUE,
            source: ThresholdSource::Default,
        }
    }
}

/// Outcome of one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Classifier probability of hypertension (0.0 to 1.0)
    pub probability: f64,

    pub label: RiskLabel,

    /// Threshold the label was decided against
    pub threshold_used: f64,
}

impl PredictionResult {
    #[must_use]
    pub fn new(probability: f64, threshold: f64) -> Self {
        Self {
            probability,
            label: RiskLabel::from_probability(probability, threshold),
            threshold_used: threshold,
        }
    }
}

/// Everything the form shows for one input set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub inputs: RawInputs,
    pub derived: DerivedFeatures,
    pub features: FeatureMap,
    /// Vector as handed to the classifier
    pub vector: FeatureVector,
    pub prediction: PredictionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_threshold_is_inclusive() {
        assert_eq!(RiskLabel::from_probability(0.5, 0.5), RiskLabel::HighRisk);
        assert_eq!(RiskLabel::from_probability(0.49, 0.5), RiskLabel::NormalRisk);
        assert_eq!(RiskLabel::from_probability(0.9, 0.5), RiskLabel::HighRisk);
        assert_eq!(RiskLabel::from_probability(0.3, 0.25), RiskLabel::HighRisk);
    }

    #[test]
    fn test_prediction_records_threshold() {
        let result = PredictionResult::new(0.42, 0.4);
        assert_eq!(result.label, RiskLabel::HighRisk);
        assert!((result.threshold_used - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_validation() {
        let t = Threshold::from_artifact(0.37).expect("valid threshold");
        assert_eq!(t.source, ThresholdSource::Artifact);

        assert!(Threshold::from_artifact(1.5).is_err());
        assert!(Threshold::from_artifact(-0.1).is_err());
        assert!(Threshold::from_artifact(f64::NAN).is_err());

        let fallback = Threshold::default();
        assert_eq!(fallback.value, 0.5);
        assert_eq!(fallback.source, ThresholdSource::Default);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(RiskLabel::HighRisk.to_string(), "High HTN Risk");
        assert_eq!(RiskLabel::NormalRisk.to_string(), "Normal Risk");
    }
}
