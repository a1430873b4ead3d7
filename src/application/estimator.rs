//! Risk estimator: derives features, orders them, runs the classifier and
//! decides the label.
//!
//! The estimate is a pure function of the inputs and the loaded artifacts:
//! 1. Validate raw inputs
//! 2. Derive WHR risk, heavy alcohol use and MET-minutes
//! 3. Order the named features by the manifest
//! 4. Ask the classifier for a probability
//! 5. Compare against the threshold

use std::sync::Arc;

use crate::adapters::ArtifactError;
use crate::domain::{
    Assessment, DerivedFeatures, FeatureMap, FeatureOrder, PredictionResult, RawInputs,
    Threshold,
};
use crate::ports::Classifier;
use crate::RiskError;

/// Artifacts loaded once at startup and never mutated.
#[derive(Debug)]
pub struct ModelArtifacts<C>
where
    C: Classifier,
{
    pub classifier: Arc<C>,
    pub feature_order: FeatureOrder,
    pub threshold: Threshold,
}

impl<C> Clone for ModelArtifacts<C>
where
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            feature_order: self.feature_order.clone(),
            threshold: self.threshold,
        }
    }
}

impl<C> ModelArtifacts<C>
where
    C: Classifier,
{
    /// Bundle artifacts, checking that the manifest fits the classifier.
    ///
    /// # Errors
    /// Returns `RiskError::ArtifactLoad` if the manifest length differs from the
    /// classifier's feature count, or the classifier records different names.
    pub fn new(
        classifier: C,
        feature_order: FeatureOrder,
        threshold: Threshold,
    ) -> Result<Self, RiskError> {
        if feature_order.len() != classifier.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "feature order lists {} features but the classifier expects {}",
                feature_order.len(),
                classifier.n_features()
            ))
            .into());
        }

        if let Some(names) = classifier.feature_names() {
            if names != feature_order.names() {
                return Err(ArtifactError::Invalid(format!(
                    "feature order {:?} does not match the classifier's features {:?}",
                    feature_order.names(),
                    names
                ))
                .into());
            }
        }

        Ok(Self {
            classifier: Arc::new(classifier),
            feature_order,
            threshold,
        })
    }
}

/// Run one estimate and keep the intermediate values for display.
///
/// # Errors
/// - `RiskError::InvalidInput` if any raw value is outside its domain
/// - `RiskError::MissingFeature` if `feature_order` names an unknown feature
/// - `RiskError::InvalidProbability` if the classifier leaves [0, 1]
pub fn assess<C, S>(
    raw: &RawInputs,
    feature_order: &[S],
    classifier: &C,
    threshold: f64,
) -> Result<Assessment, RiskError>
where
    C: Classifier + ?Sized,
    S: AsRef<str>,
{
    raw.check()?;

    let derived = DerivedFeatures::derive(raw);
    let features = FeatureMap::new(raw, &derived);
    let vector = features.ordered(feature_order)?;

    let probability = classifier.predict_probability(&vector)?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(RiskError::InvalidProbability(probability));
    }

    Ok(Assessment {
        inputs: raw.clone(),
        derived,
        features,
        vector,
        prediction: PredictionResult::new(probability, threshold),
    })
}

/// Estimate the risk label for one set of inputs.
///
/// # Errors
/// See [`assess`].
pub fn estimate<C, S>(
    raw: &RawInputs,
    feature_order: &[S],
    classifier: &C,
    threshold: f64,
) -> Result<PredictionResult, RiskError>
where
    C: Classifier + ?Sized,
    S: AsRef<str>,
{
    assess(raw, feature_order, classifier, threshold).map(|a| a.prediction)
}

/// Estimator bound to a loaded artifact context.
pub struct RiskEstimator<C>
where
    C: Classifier,
{
    artifacts: ModelArtifacts<C>,
}

impl<C> RiskEstimator<C>
where
    C: Classifier,
{
    /// Create a new estimator.
    #[must_use]
    pub fn new(artifacts: ModelArtifacts<C>) -> Self {
        Self { artifacts }
    }

    #[must_use]
    pub fn artifacts(&self) -> &ModelArtifacts<C> {
        &self.artifacts
    }

    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.artifacts.threshold
    }

    /// Assess inputs against the loaded artifacts.
    ///
    /// # Errors
    /// See [`assess`].
    pub fn assess(&self, raw: &RawInputs) -> Result<Assessment, RiskError> {
        let result = assess(
            raw,
            self.artifacts.feature_order.names(),
            self.artifacts.classifier.as_ref(),
            self.artifacts.threshold.value,
        );

        match &result {
            Ok(assessment) => tracing::debug!(
                "Estimate complete: label={}, probability={:.4}, threshold={:.4}",
                assessment.prediction.label,
                assessment.prediction.probability,
                assessment.prediction.threshold_used
            ),
            Err(e) => tracing::debug!("Estimate rejected: {}", e),
        }

        result
    }

    /// Estimate the risk label for inputs.
    ///
    /// # Errors
    /// See [`assess`].
    pub fn estimate(&self, raw: &RawInputs) -> Result<PredictionResult, RiskError> {
        self.assess(raw).map(|a| a.prediction)
    }
}
