//! BMI calculation
//!
//! Pure helpers behind the optional BMI block on the progress summary.
//! Weight and height are SI (kg, cm) like everything else in storage.

use serde::{Deserialize, Serialize};

/// WHO BMI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    ObeseClass1,
    ObeseClass2,
    ObeseClass3,
}

impl BmiCategory {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal/Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClass1 => "Obese (Class I)",
            BmiCategory::ObeseClass2 => "Obese (Class II)",
            BmiCategory::ObeseClass3 => "Obese (Class III)",
        }
    }
}

/// BMI plus the context the summary renders alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiReport {
    pub value: f64,
    pub category: BmiCategory,
    /// Weight range in kg that maps to the normal BMI band at this height
    pub healthy_weight_min_kg: f64,
    pub healthy_weight_max_kg: f64,
}

/// BMI = weight(kg) / height(m)^2
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify a BMI value into its WHO band
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 16.0 {
        BmiCategory::SeverelyUnderweight
    } else if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObeseClass1
    } else if bmi < 40.0 {
        BmiCategory::ObeseClass2
    } else {
        BmiCategory::ObeseClass3
    }
}

/// Weight range corresponding to BMI 18.5-25 at the given height
pub fn healthy_weight_range_kg(height_cm: f64) -> (f64, f64) {
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    (18.5 * height_m_sq, 25.0 * height_m_sq)
}

/// Full report for the summary block. Returns `None` when either input is
/// missing or non-positive, so callers can skip the block instead of
/// rendering garbage.
pub fn bmi_report(weight_kg: f64, height_cm: f64) -> Option<BmiReport> {
    if weight_kg <= 0.0 || height_cm <= 0.0 || !weight_kg.is_finite() || !height_cm.is_finite() {
        return None;
    }
    let value = calculate_bmi(weight_kg, height_cm);
    let (healthy_weight_min_kg, healthy_weight_max_kg) = healthy_weight_range_kg(height_cm);
    Some(BmiReport {
        value,
        category: classify_bmi(value),
        healthy_weight_min_kg,
        healthy_weight_max_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.1);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(classify_bmi(15.0), BmiCategory::SeverelyUnderweight);
        assert_eq!(classify_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(classify_bmi(22.0), BmiCategory::Normal);
        assert_eq!(classify_bmi(27.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(32.0), BmiCategory::ObeseClass1);
        assert_eq!(classify_bmi(37.0), BmiCategory::ObeseClass2);
        assert_eq!(classify_bmi(42.0), BmiCategory::ObeseClass3);
    }

    #[test]
    fn test_healthy_weight_range() {
        // For 175cm, healthy range should be ~56.7-76.6 kg
        let (min, max) = healthy_weight_range_kg(175.0);
        assert!((min - 56.7).abs() < 0.5);
        assert!((max - 76.6).abs() < 0.5);
    }

    #[test]
    fn report_skipped_for_unusable_inputs() {
        assert!(bmi_report(0.0, 175.0).is_none());
        assert!(bmi_report(70.0, 0.0).is_none());
        assert!(bmi_report(-5.0, 175.0).is_none());
        assert!(bmi_report(f64::NAN, 175.0).is_none());
        assert!(bmi_report(70.0, 175.0).is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI is always positive for valid inputs
        #[test]
        fn prop_bmi_positive(weight in 20.0f64..500.0, height in 100.0f64..250.0) {
            let bmi = calculate_bmi(weight, height);
            prop_assert!(bmi > 0.0);
        }

        /// Property: the report's healthy range brackets the normal band
        #[test]
        fn prop_healthy_range_produces_normal_bmi(height in 150.0f64..200.0) {
            let (min, max) = healthy_weight_range_kg(height);
            let mid_weight = (min + max) / 2.0;
            let bmi = calculate_bmi(mid_weight, height);
            prop_assert!(bmi >= 18.5 && bmi <= 25.0,
                "Mid-range weight {} at height {} produced BMI {} (expected 18.5-25)",
                mid_weight, height, bmi);
        }

        /// Property: report category always matches the raw classification
        #[test]
        fn prop_report_is_consistent(weight in 20.0f64..500.0, height in 100.0f64..250.0) {
            let report = bmi_report(weight, height).unwrap();
            prop_assert_eq!(report.category, classify_bmi(report.value));
            prop_assert!(report.healthy_weight_min_kg < report.healthy_weight_max_kg);
        }
    }
}
