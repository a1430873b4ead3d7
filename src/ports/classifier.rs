//! Classifier port: Trait for the trained binary model.
//!
//! This trait abstracts the model artifact format from the estimator.

use crate::domain::FeatureVector;
use crate::RiskError;

/// A trained binary classifier.
///
/// Implementations are positional: `features` must be in the order the
/// model was trained with.
pub trait Classifier: Send + Sync {
    /// Probability of the positive (hypertensive) class.
    ///
    /// # Errors
    /// Returns `RiskError::FeatureCountMismatch` if the vector length differs
    /// from `n_features()`.
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, RiskError>;

    /// Number of features the model expects.
    fn n_features(&self) -> usize;

    /// Feature names recorded in the artifact, if any.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}
