//! Survey inputs collected by the risk form.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::RiskError;

pub(crate) const AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub(crate) const CIRCUMFERENCE_RANGE_CM: RangeInclusive<f64> = 40.0..=200.0;
pub(crate) const ACTIVITY_RANGE_MIN: RangeInclusive<u32> = 0..=2000;
pub(crate) const FASTING_BLOOD_SUGAR_RANGE: RangeInclusive<u32> = 50..=300;
pub(crate) const TOTAL_CHOLESTEROL_RANGE: RangeInclusive<u32> = 100..=400;

/// Biological sex, used only to pick the waist-to-hip cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// WHO waist-to-hip ratio cutoff. A ratio strictly above it is a risk.
    #[must_use]
    pub fn whr_cutoff(self) -> f64 {
        match self {
            Self::Male => 0.90,
            Self::Female => 0.85,
        }
    }
}

/// Alcohol consumption frequency, stored as the survey's ordinal code.
///
/// Code 1 is the most frequent category, code 6 the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AlcoholFrequency {
    /// Daily (1)
    Daily,
    /// 5-6 days per week (2)
    FiveToSixPerWeek,
    /// 3-4 days per week (3)
    ThreeToFourPerWeek,
    /// 1-2 days per week (4)
    OneToTwoPerWeek,
    /// 1-3 days per month (5)
    OneToThreePerMonth,
    /// Less than once a month (6)
    LessThanMonthly,
}

impl AlcoholFrequency {
    /// All categories in the order the form lists them (least frequent first).
    pub const FORM_ORDER: [Self; 6] = [
        Self::LessThanMonthly,
        Self::OneToThreePerMonth,
        Self::OneToTwoPerWeek,
        Self::ThreeToFourPerWeek,
        Self::FiveToSixPerWeek,
        Self::Daily,
    ];

    /// Survey ordinal code (1-6).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::FiveToSixPerWeek => 2,
            Self::ThreeToFourPerWeek => 3,
            Self::OneToTwoPerWeek => 4,
            Self::OneToThreePerMonth => 5,
            Self::LessThanMonthly => 6,
        }
    }

    /// Look up a category by survey code.
    ///
    /// # Errors
    /// Returns `RiskError::InvalidInput` for codes outside 1-6.
    pub fn from_code(code: u8) -> Result<Self, RiskError> {
        match code {
            1 => Ok(Self::Daily),
            2 => Ok(Self::FiveToSixPerWeek),
            3 => Ok(Self::ThreeToFourPerWeek),
            4 => Ok(Self::OneToTwoPerWeek),
            5 => Ok(Self::OneToThreePerMonth),
            6 => Ok(Self::LessThanMonthly),
            other => Err(RiskError::InvalidInput(vec![format!(
                "Alcohol frequency code {other} out of range [1, 6]"
            )])),
        }
    }

    /// Form label, including the code in parentheses.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily (1)",
            Self::FiveToSixPerWeek => "5-6 days per week (2)",
            Self::ThreeToFourPerWeek => "3-4 days per week (3)",
            Self::OneToTwoPerWeek => "1-2 days per week (4)",
            Self::OneToThreePerMonth => "1-3 days per month (5)",
            Self::LessThanMonthly => "<1 per month (6)",
        }
    }

    /// Heavy use means one of the two most frequent categories (codes 1 and 2).
    #[must_use]
    pub fn is_heavy(self) -> bool {
        matches!(self, Self::Daily | Self::FiveToSixPerWeek)
    }
}

impl TryFrom<u8> for AlcoholFrequency {
    type Error = RiskError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<AlcoholFrequency> for u8 {
    fn from(freq: AlcoholFrequency) -> Self {
        freq.code()
    }
}

/// Raw survey values as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Age in years (18-100)
    pub age: u32,

    /// Currently smokes
    pub smoking: bool,

    /// Alcohol consumption frequency
    pub alcohol: AlcoholFrequency,

    pub sex: Sex,

    /// Waist circumference in cm (40-200)
    pub waist_cm: f64,

    /// Hip circumference in cm (40-200)
    pub hip_cm: f64,

    /// Vigorous work activity, minutes per week (0-2000)
    pub vigorous_work_min: u32,

    /// Moderate work activity, minutes per week (0-2000)
    pub moderate_work_min: u32,

    /// Vigorous recreational activity, minutes per week (0-2000)
    pub vigorous_recreation_min: u32,

    /// Moderate recreational activity, minutes per week (0-2000)
    pub moderate_recreation_min: u32,

    /// Walking or cycling for transport, minutes per week (0-2000)
    pub walk_cycle_min: u32,

    /// Fasting blood sugar in mg/dl (50-300)
    pub fasting_blood_sugar: u32,

    /// Total cholesterol in mg/dl (100-400)
    pub total_cholesterol: u32,
}

impl Default for RawInputs {
    /// The values the form starts with.
    fn default() -> Self {
        Self {
            age: 40,
            smoking: false,
            alcohol: AlcoholFrequency::LessThanMonthly,
            sex: Sex::Male,
            waist_cm: 85.0,
            hip_cm: 95.0,
            vigorous_work_min: 0,
            moderate_work_min: 0,
            vigorous_recreation_min: 0,
            moderate_recreation_min: 0,
            walk_cycle_min: 0,
            fasting_blood_sugar: 90,
            total_cholesterol: 180,
        }
    }
}

impl RawInputs {
    /// Validate that every value lies within its declared domain.
    ///
    /// # Errors
    /// Returns one message per out-of-domain field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !AGE_RANGE.contains(&self.age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                self.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ));
        }

        for (label, value) in [("Waist", self.waist_cm), ("Hip", self.hip_cm)] {
            if !CIRCUMFERENCE_RANGE_CM.contains(&value) {
                errors.push(format!(
                    "{label} {value} cm out of range [{}, {}]",
                    CIRCUMFERENCE_RANGE_CM.start(),
                    CIRCUMFERENCE_RANGE_CM.end()
                ));
            }
        }

        let activity = [
            ("Vigorous work", self.vigorous_work_min),
            ("Moderate work", self.moderate_work_min),
            ("Vigorous recreation", self.vigorous_recreation_min),
            ("Moderate recreation", self.moderate_recreation_min),
            ("Walking/cycling", self.walk_cycle_min),
        ];
        for (label, minutes) in activity {
            if !ACTIVITY_RANGE_MIN.contains(&minutes) {
                errors.push(format!(
                    "{label} {minutes} min/week out of range [{}, {}]",
                    ACTIVITY_RANGE_MIN.start(),
                    ACTIVITY_RANGE_MIN.end()
                ));
            }
        }

        if !FASTING_BLOOD_SUGAR_RANGE.contains(&self.fasting_blood_sugar) {
            errors.push(format!(
                "Fasting blood sugar {} mg/dl out of range [{}, {}]",
                self.fasting_blood_sugar,
                FASTING_BLOOD_SUGAR_RANGE.start(),
                FASTING_BLOOD_SUGAR_RANGE.end()
            ));
        }
        if !TOTAL_CHOLESTEROL_RANGE.contains(&self.total_cholesterol) {
            errors.push(format!(
                "Total cholesterol {} mg/dl out of range [{}, {}]",
                self.total_cholesterol,
                TOTAL_CHOLESTEROL_RANGE.start(),
                TOTAL_CHOLESTEROL_RANGE.end()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and convert violations into `RiskError::InvalidInput`.
    ///
    /// # Errors
    /// Returns `RiskError::InvalidInput` listing every violation.
    pub fn check(&self) -> Result<(), RiskError> {
        self.validate().map_err(RiskError::InvalidInput)
    }
}
