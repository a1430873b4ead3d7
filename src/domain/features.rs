//! Engineered features and their model-ordered vector.
//!
//! The classifier is positional: the vector handed to it must follow the
//! feature-order manifest exactly.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::inputs::RawInputs;
use crate::adapters::ArtifactError;
use crate::RiskError;

/// Names of the features computed for every input set, in display order.
pub const FEATURE_NAMES: [&str; 7] = [
    "age",
    "smoking",
    "WHR_risk",
    "HEAVY_ALCOHOL_USE",
    "PHYSICAL_ACTIVITY",
    "FASTING_BLOOD_SUGAR",
    "TOTAL_CHOLESTEROL",
];

// MET weights per minute of activity.
const MET_VIGOROUS: f64 = 8.0;
const MET_MODERATE: f64 = 4.0;
const MET_WALK_CYCLE: f64 = 3.5;

/// Waist-to-hip ratio; zero when `hip_cm` is not positive.
#[must_use]
pub fn waist_hip_ratio(waist_cm: f64, hip_cm: f64) -> f64 {
    if hip_cm > 0.0 {
        waist_cm / hip_cm
    } else {
        0.0
    }
}

/// Weekly MET-minutes from the five activity domains.
#[must_use]
pub fn met_minutes(raw: &RawInputs) -> f64 {
    MET_VIGOROUS * f64::from(raw.vigorous_work_min)
        + MET_MODERATE * f64::from(raw.moderate_work_min)
        + MET_VIGOROUS * f64::from(raw.vigorous_recreation_min)
        + MET_MODERATE * f64::from(raw.moderate_recreation_min)
        + MET_WALK_CYCLE * f64::from(raw.walk_cycle_min)
}

/// Features derived from the raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Waist-to-hip ratio
    pub whr: f64,

    /// WHR above the sex-specific cutoff
    pub whr_risk: bool,

    /// Alcohol code 1 or 2
    pub heavy_alcohol_use: bool,

    /// MET-minutes per week
    pub physical_activity: f64,
}

impl DerivedFeatures {
    /// Derive features. Total over all inputs: a zero hip yields WHR 0.
    #[must_use]
    pub fn derive(raw: &RawInputs) -> Self {
        let whr = waist_hip_ratio(raw.waist_cm, raw.hip_cm);
        Self {
            whr,
            whr_risk: whr > raw.sex.whr_cutoff(),
            heavy_alcohol_use: raw.alcohol.is_heavy(),
            physical_activity: met_minutes(raw),
        }
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Mapping from feature name to value, holding exactly the computed features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap {
    entries: [(&'static str, f64); 7],
}

impl FeatureMap {
    /// Assemble the named features from raw and derived values.
    #[must_use]
    pub fn new(raw: &RawInputs, derived: &DerivedFeatures) -> Self {
        Self {
            entries: [
                (FEATURE_NAMES[0], f64::from(raw.age)),
                (FEATURE_NAMES[1], flag(raw.smoking)),
                (FEATURE_NAMES[2], flag(derived.whr_risk)),
                (FEATURE_NAMES[3], flag(derived.heavy_alcohol_use)),
                (FEATURE_NAMES[4], derived.physical_activity),
                (FEATURE_NAMES[5], f64::from(raw.fasting_blood_sugar)),
                (FEATURE_NAMES[6], f64::from(raw.total_cholesterol)),
            ],
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Iterate in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Reorder into a vector following `order`.
    ///
    /// # Errors
    /// Returns `RiskError::MissingFeature` for the first name not computed here.
    pub fn ordered<S: AsRef<str>>(&self, order: &[S]) -> Result<FeatureVector, RiskError> {
        let mut names = Vec::with_capacity(order.len());
        let mut values = Vec::with_capacity(order.len());
        for name in order {
            let name = name.as_ref();
            let value = self
                .get(name)
                .ok_or_else(|| RiskError::MissingFeature(name.to_string()))?;
            names.push(name.to_string());
            values.push(value);
        }
        Ok(FeatureVector { names, values })
    }
}

/// Feature values in classifier order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector directly from values, naming positions `x0..xn`.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        let names = (0..values.len()).map(|i| format!("x{i}")).collect();
        Self { names, values }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validated feature-order manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOrder(Vec<String>);

impl FeatureOrder {
    /// Validate a manifest: non-empty, no duplicates, only known features.
    ///
    /// # Errors
    /// `RiskError::MissingFeature` for an unknown name, `RiskError::ArtifactLoad`
    /// for an empty or duplicated manifest.
    pub fn new(names: Vec<String>) -> Result<Self, RiskError> {
        if names.is_empty() {
            return Err(ArtifactError::Invalid("feature order manifest is empty".into()).into());
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !FEATURE_NAMES.contains(&name.as_str()) {
                return Err(RiskError::MissingFeature(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ArtifactError::Invalid(format!(
                    "feature order manifest lists '{name}' more than once"
                ))
                .into());
            }
        }

        Ok(Self(names))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
