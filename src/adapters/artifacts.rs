//! Model directory loading.
//!
//! A model directory holds three artifacts:
//! - `log_reg_model.json`: the exported classifier (required)
//! - `feature_order.json`: JSON array of feature names (required)
//! - `best_threshold.json`: `{"threshold": <number>}` (optional, defaults to 0.5)
//!
//! Artifacts are read once at startup; nothing here is called per estimate.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logistic::LogisticRegression;
use crate::application::ModelArtifacts;
use crate::domain::{FeatureOrder, Threshold};
use crate::RiskError;

pub const MODEL_FILE: &str = "log_reg_model.json";
pub const FEATURE_ORDER_FILE: &str = "feature_order.json";
pub const THRESHOLD_FILE: &str = "best_threshold.json";

/// Errors raised while reading the required artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: malformed JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThresholdValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ThresholdArtifact {
    threshold: ThresholdValue,
}

/// Read the feature-order manifest.
///
/// # Errors
/// `RiskError::ArtifactLoad` if the file is missing or malformed;
/// `RiskError::MissingFeature` if it names a feature that is never computed.
pub fn load_feature_order(path: &Path) -> Result<FeatureOrder, RiskError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let names: Vec<String> =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    FeatureOrder::new(names)
}

/// Read the decision threshold.
///
/// # Errors
/// Returns `RiskError::ThresholdLoad` for any read, parse, or range failure.
pub fn load_threshold(path: &Path) -> Result<Threshold, RiskError> {
    let content = std::fs::read(path)
        .map_err(|e| RiskError::ThresholdLoad(format!("{}: {e}", path.display())))?;
    let artifact: ThresholdArtifact = serde_json::from_slice(&content)
        .map_err(|e| RiskError::ThresholdLoad(format!("{}: {e}", path.display())))?;

    let value = match artifact.threshold {
        ThresholdValue::Number(v) => v,
        ThresholdValue::Text(s) => s.trim().parse::<f64>().map_err(|e| {
            RiskError::ThresholdLoad(format!("{}: threshold {s:?}: {e}", path.display()))
        })?,
    };

    Threshold::from_artifact(value)
}

/// Read the decision threshold, falling back to 0.5 on any failure.
#[must_use]
pub fn load_threshold_or_default(path: &Path) -> Threshold {
    match load_threshold(path) {
        Ok(threshold) => {
            tracing::info!("Using decision threshold {:.4} from {:?}", threshold.value, path);
            threshold
        }
        Err(e) => {
            let fallback = Threshold::default();
            tracing::warn!("{e}; falling back to threshold {:.2}", fallback.value);
            fallback
        }
    }
}

/// Load all artifacts from a model directory.
///
/// # Errors
/// Fails if the classifier or manifest cannot be loaded, or if they disagree.
/// A missing or unreadable threshold is not an error.
pub fn load_artifacts(model_dir: &Path) -> Result<ModelArtifacts<LogisticRegression>, RiskError> {
    if !model_dir.is_dir() {
        return Err(ArtifactError::Invalid(format!(
            "model directory {} not found",
            model_dir.display()
        ))
        .into());
    }

    let classifier = LogisticRegression::load(&model_dir.join(MODEL_FILE))?;
    let feature_order = load_feature_order(&model_dir.join(FEATURE_ORDER_FILE))?;
    let threshold = load_threshold_or_default(&model_dir.join(THRESHOLD_FILE));

    ModelArtifacts::new(classifier, feature_order, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ThresholdSource;
    use crate::ports::Classifier;
    use tempfile::tempdir;

    const ORDER: &str = r#"["age", "smoking", "WHR_risk", "HEAVY_ALCOHOL_USE",
        "PHYSICAL_ACTIVITY", "FASTING_BLOOD_SUGAR", "TOTAL_CHOLESTEROL"]"#;
    const MODEL: &str = r#"{"coefficients": [0.04, 0.2, 0.5, 0.4, -0.0001, 0.01, 0.004],
        "intercept": -5.0}"#;

    fn write_dir(model: &str, order: &str, threshold: Option<&str>) -> tempfile::TempDir {
        let temp = tempdir().expect("tempdir");
        std::fs::write(temp.path().join(MODEL_FILE), model).expect("write model");
        std::fs::write(temp.path().join(FEATURE_ORDER_FILE), order).expect("write order");
        if let Some(t) = threshold {
            std::fs::write(temp.path().join(THRESHOLD_FILE), t).expect("write threshold");
        }
        temp
    }

    #[test]
    fn test_load_complete_directory() {
        let temp = write_dir(MODEL, ORDER, Some(r#"{"threshold": 0.42}"#));
        let artifacts = load_artifacts(temp.path()).expect("load artifacts");

        assert_eq!(artifacts.feature_order.len(), 7);
        assert_eq!(artifacts.classifier.n_features(), 7);
        assert!((artifacts.threshold.value - 0.42).abs() < f64::EPSILON);
        assert_eq!(artifacts.threshold.source, ThresholdSource::Artifact);
    }

    #[test]
    fn test_missing_threshold_defaults_to_one_half() {
        let temp = write_dir(MODEL, ORDER, None);
        let artifacts = load_artifacts(temp.path()).expect("load artifacts");

        assert_eq!(artifacts.threshold.value, 0.5);
        assert_eq!(artifacts.threshold.source, ThresholdSource::Default);
    }

    #[test]
    fn test_unreadable_threshold_defaults_to_one_half() {
        for content in [
            "garbage",
            r#"{"cutoff": 0.3}"#,
            r#"{"threshold": "abc"}"#,
            r#"{"threshold": 7}"#,
        ] {
            let temp = tempdir().expect("tempdir");
            let path = temp.path().join(THRESHOLD_FILE);
            std::fs::write(&path, content).expect("write threshold");

            assert!(matches!(
                load_threshold(&path),
                Err(RiskError::ThresholdLoad(_))
            ));
            assert_eq!(load_threshold_or_default(&path), Threshold::default());
        }
    }

    #[test]
    fn test_threshold_as_numeric_string() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(THRESHOLD_FILE);
        std::fs::write(&path, r#"{"threshold": "0.35"}"#).expect("write threshold");

        let threshold = load_threshold(&path).expect("numeric string accepted");
        assert!((threshold.value - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let temp = tempdir().expect("tempdir");
        std::fs::write(temp.path().join(FEATURE_ORDER_FILE), ORDER).expect("write order");

        let err = load_artifacts(temp.path()).expect_err("must fail");
        assert!(matches!(err, RiskError::ArtifactLoad(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let temp = tempdir().expect("tempdir");
        std::fs::write(temp.path().join(MODEL_FILE), MODEL).expect("write model");

        let err = load_artifacts(temp.path()).expect_err("must fail");
        assert!(matches!(err, RiskError::ArtifactLoad(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_manifest_with_unknown_feature() {
        let temp = write_dir(MODEL, r#"["age", "BMI"]"#, None);
        let err = load_artifacts(temp.path()).expect_err("must fail");
        assert!(matches!(err, RiskError::MissingFeature(name) if name == "BMI"));
    }

    #[test]
    fn test_manifest_length_must_match_model() {
        let temp = write_dir(MODEL, r#"["age", "smoking"]"#, None);
        let err = load_artifacts(temp.path()).expect_err("must fail");
        assert!(matches!(err, RiskError::ArtifactLoad(ArtifactError::Invalid(_))));
    }

    #[test]
    fn test_manifest_must_match_model_feature_names() {
        let model = r#"{"feature_names": ["smoking", "age"], "coefficients": [0.2, 0.04],
            "intercept": -3.0}"#;
        let temp = write_dir(model, r#"["age", "smoking"]"#, None);
        let err = load_artifacts(temp.path()).expect_err("must fail");
        assert!(matches!(err, RiskError::ArtifactLoad(ArtifactError::Invalid(_))));
    }

    #[test]
    fn test_empty_manifest_is_artifact_error() {
        let temp = write_dir(MODEL, "[]", None);
        let err = load_artifacts(temp.path()).expect_err("must fail");
        assert!(matches!(err, RiskError::ArtifactLoad(ArtifactError::Invalid(_))));
    }

    #[test]
    fn test_missing_directory() {
        let temp = tempdir().expect("tempdir");
        let err = load_artifacts(&temp.path().join("nope")).expect_err("must fail");
        assert!(matches!(err, RiskError::ArtifactLoad(_)));
    }

    #[test]
    fn test_bundled_models_directory_loads() {
        let artifacts = load_artifacts(Path::new("models")).expect("bundled artifacts load");
        assert_eq!(artifacts.feature_order.len(), 7);
        assert_eq!(artifacts.threshold.source, ThresholdSource::Artifact);
    }
}
