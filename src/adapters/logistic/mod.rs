//! Logistic-regression adapter: Implementation of `Classifier`.
//!
//! Loads the JSON export of a fitted binary logistic regression, optionally
//! preceded by a standard-scaler stage:
//!
//! `p = sigmoid(intercept + Σ coef_i · (x_i - mean_i) / scale_i)`
//!
//! The artifact's SHA-256 digest is kept as a fingerprint so the running
//! model can be identified in logs and on screen.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ArtifactError;
use crate::domain::FeatureVector;
use crate::ports::Classifier;
use crate::RiskError;

/// Standard-scaler parameters applied before the linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLogisticModel {
    /// Column names the model was fitted on
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<ExportedScaler>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExportedLogisticModel {
    fn validate(&self) -> Result<(), ArtifactError> {
        let n = self.coefficients.len();
        if n == 0 {
            return Err(ArtifactError::Invalid("model has no coefficients".into()));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != n {
                return Err(ArtifactError::Invalid(format!(
                    "model lists {} feature names for {n} coefficients",
                    names.len()
                )));
            }
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::Invalid("model parameters must be finite".into()));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ArtifactError::Invalid(
                    "scaler parameter lengths do not match coefficient count".into(),
                ));
            }
            if scaler.mean.iter().any(|m| !m.is_finite())
                || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
            {
                return Err(ArtifactError::Invalid(
                    "scaler parameters must be finite with non-zero scale".into(),
                ));
            }
        }
        Ok(())
    }
}

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Binary logistic-regression classifier.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    model: ExportedLogisticModel,
    fingerprint: String,
}

impl LogisticRegression {
    /// Build a classifier from in-memory parameters.
    ///
    /// # Errors
    /// Returns `ArtifactError::Invalid` if the parameters are inconsistent.
    pub fn from_exported(model: ExportedLogisticModel) -> Result<Self, ArtifactError> {
        model.validate()?;
        let bytes = serde_json::to_vec(&model).map_err(|e| {
            ArtifactError::Invalid(format!("model parameters not serializable: {e}"))
        })?;
        Ok(Self {
            fingerprint: sha256_hex_bytes(&bytes),
            model,
        })
    }

    /// Load the exported model JSON.
    ///
    /// # Errors
    /// Returns error if the file is missing, malformed, or inconsistent.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: ExportedLogisticModel =
            serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        model.validate()?;

        let fingerprint = sha256_hex_bytes(&bytes);
        tracing::info!(
            "Loaded logistic model from {:?} (n_features={}, scaled={}, sha256={})",
            path,
            model.coefficients.len(),
            model.scaler.is_some(),
            &fingerprint[..12]
        );

        Ok(Self { model, fingerprint })
    }

    /// Hex SHA-256 of the artifact.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Linear score (log-odds) for an already ordered feature slice.
    fn decision_function(&self, x: &[f64]) -> f64 {
        let linear: f64 = match &self.model.scaler {
            Some(scaler) => x
                .iter()
                .zip(&self.model.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((xi, coef), (mean, scale))| coef * (xi - mean) / scale)
                .sum(),
            None => x
                .iter()
                .zip(&self.model.coefficients)
                .map(|(xi, coef)| coef * xi)
                .sum(),
        };
        self.model.intercept + linear
    }

    /// Sigmoid in the split form that avoids overflow for large |z|.
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }
}

impl Classifier for LogisticRegression {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, RiskError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(RiskError::FeatureCountMismatch {
                expected,
                got: features.len(),
            });
        }

        let probability = Self::sigmoid(self.decision_function(features.values()));
        if !probability.is_finite() {
            return Err(RiskError::InvalidProbability(probability));
        }
        Ok(probability)
    }

    fn n_features(&self) -> usize {
        self.model.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.model.feature_names.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn model(coefficients: Vec<f64>, intercept: f64) -> ExportedLogisticModel {
        ExportedLogisticModel {
            feature_names: None,
            coefficients,
            intercept,
            scaler: None,
            description: None,
        }
    }

    #[test]
    fn test_zero_logit_is_one_half() {
        let lr = LogisticRegression::from_exported(model(vec![1.0, -1.0], 0.0))
            .expect("valid model");
        let p = lr
            .predict_probability(&FeatureVector::from_values(vec![3.0, 3.0]))
            .expect("predict");
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_known_probability() {
        // logit = -2 + 0.5 * 4 + 1.0 * 1 = 1
        let lr = LogisticRegression::from_exported(model(vec![0.5, 1.0], -2.0))
            .expect("valid model");
        let p = lr
            .predict_probability(&FeatureVector::from_values(vec![4.0, 1.0]))
            .expect("predict");
        let expected = 1.0 / (1.0 + (-1.0f64).exp());
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_scaler_is_applied() {
        let mut params = model(vec![2.0], 0.0);
        params.scaler = Some(ExportedScaler {
            mean: vec![10.0],
            scale: vec![5.0],
        });
        let lr = LogisticRegression::from_exported(params).expect("valid model");

        // (10 - 10) / 5 = 0 -> logit 0
        let p = lr
            .predict_probability(&FeatureVector::from_values(vec![10.0]))
            .expect("predict");
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_logits_stay_in_unit_interval() {
        let lr = LogisticRegression::from_exported(model(vec![1.0], 0.0)).expect("valid model");
        let high = lr
            .predict_probability(&FeatureVector::from_values(vec![1000.0]))
            .expect("predict");
        let low = lr
            .predict_probability(&FeatureVector::from_values(vec![-1000.0]))
            .expect("predict");
        assert!((high - 1.0).abs() < 1e-12);
        assert!(low >= 0.0 && low < 1e-12);
    }

    #[test]
    fn test_rejects_wrong_feature_count() {
        let lr = LogisticRegression::from_exported(model(vec![1.0, 2.0], 0.0))
            .expect("valid model");
        let err = lr
            .predict_probability(&FeatureVector::from_values(vec![1.0]))
            .expect_err("must fail");
        assert!(matches!(
            err,
            RiskError::FeatureCountMismatch { expected: 2, got: 1 }
        ));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(LogisticRegression::from_exported(model(Vec::new(), 0.0)).is_err());
        assert!(LogisticRegression::from_exported(model(vec![f64::NAN], 0.0)).is_err());

        let mut zero_scale = model(vec![1.0], 0.0);
        zero_scale.scaler = Some(ExportedScaler {
            mean: vec![0.0],
            scale: vec![0.0],
        });
        assert!(LogisticRegression::from_exported(zero_scale).is_err());

        let mut named = model(vec![1.0, 2.0], 0.0);
        named.feature_names = Some(vec!["age".into()]);
        assert!(LogisticRegression::from_exported(named).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("log_reg_model.json");
        std::fs::write(
            &path,
            r#"{"feature_names": ["age"], "coefficients": [0.1], "intercept": -4.0}"#,
        )
        .expect("write model");

        let lr = LogisticRegression::load(&path).expect("load model");
        assert_eq!(lr.n_features(), 1);
        assert_eq!(lr.feature_names(), Some(&["age".to_string()][..]));
        assert_eq!(lr.fingerprint().len(), 64);
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("absent.json");
        assert!(matches!(
            LogisticRegression::load(&missing),
            Err(ArtifactError::Io { .. })
        ));

        let malformed = temp.path().join("broken.json");
        std::fs::write(&malformed, b"not json").expect("write");
        assert!(matches!(
            LogisticRegression::load(&malformed),
            Err(ArtifactError::Parse { .. })
        ));
    }
}
