//! Health band classification
//!
//! Each screen colors its latest reading by a band table (BMI categories,
//! hearing levels, vision quality). The analyzer is generic over the rule: a
//! classifier is any pure `fn(f64) -> Classification`, and the tables below
//! are the ones the product ships.

use crate::models::Classification;

/// A pure classification rule injected into [`crate::analyzer::TimeSeriesAnalyzer::summarize`]
pub type Classifier = fn(f64) -> Classification;

/// BMI bands:
/// - < 18.5: Underweight
/// - 18.5–24.9: Normal
/// - 25–29.9: Overweight
/// - ≥ 30: Obese
pub fn bmi_category(bmi: f64) -> Classification {
    if bmi < 18.5 {
        Classification {
            category: "Underweight",
            color: "#3B82F6",
        }
    } else if bmi < 25.0 {
        Classification {
            category: "Normal",
            color: "#10B981",
        }
    } else if bmi < 30.0 {
        Classification {
            category: "Overweight",
            color: "#F59E0B",
        }
    } else {
        Classification {
            category: "Obese",
            color: "#EF4444",
        }
    }
}

/// Hearing level bands over a threshold reading in dB:
/// - ≤ 10: Excellent
/// - 11–20: Good
/// - 21–25: Normal
/// - 26–40: Fair
/// - > 40: Poor
pub fn hearing_level(db: f64) -> Classification {
    if db <= 10.0 {
        Classification {
            category: "Excellent",
            color: "#4ECDC4",
        }
    } else if db <= 20.0 {
        Classification {
            category: "Good",
            color: "#34A853",
        }
    } else if db <= 25.0 {
        Classification {
            category: "Normal",
            color: "#4285F4",
        }
    } else if db <= 40.0 {
        Classification {
            category: "Fair",
            color: "#FBBC05",
        }
    } else {
        Classification {
            category: "Poor",
            color: "#FF6B6B",
        }
    }
}

/// Vision quality bands over a decimal acuity reading (higher is better):
/// - ≥ 1.0: Excellent
/// - 0.8–0.99: Good
/// - 0.6–0.79: Normal
/// - 0.4–0.59: Fair
/// - < 0.4: Poor
pub fn vision_quality(acuity: f64) -> Classification {
    if acuity >= 1.0 {
        Classification {
            category: "Excellent",
            color: "#4ECDC4",
        }
    } else if acuity >= 0.8 {
        Classification {
            category: "Good",
            color: "#34A853",
        }
    } else if acuity >= 0.6 {
        Classification {
            category: "Normal",
            color: "#4285F4",
        }
    } else if acuity >= 0.4 {
        Classification {
            category: "Fair",
            color: "#FBBC05",
        }
    } else {
        Classification {
            category: "Poor",
            color: "#FF6B6B",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_bands() {
        assert_eq!(bmi_category(17.0).category, "Underweight");
        assert_eq!(bmi_category(18.5).category, "Normal");
        assert_eq!(bmi_category(24.9).category, "Normal");
        assert_eq!(bmi_category(27.4).category, "Overweight");
        assert_eq!(bmi_category(30.0).category, "Obese");
    }

    #[test]
    fn test_hearing_bands() {
        assert_eq!(hearing_level(10.0).category, "Excellent");
        assert_eq!(hearing_level(15.0).category, "Good");
        assert_eq!(hearing_level(25.0).category, "Normal");
        assert_eq!(hearing_level(40.0).category, "Fair");
        assert_eq!(hearing_level(41.0).category, "Poor");
    }

    #[test]
    fn test_vision_bands() {
        assert_eq!(vision_quality(1.2).category, "Excellent");
        assert_eq!(vision_quality(0.8).category, "Good");
        assert_eq!(vision_quality(0.6).category, "Normal");
        assert_eq!(vision_quality(0.4).category, "Fair");
        assert_eq!(vision_quality(0.1).category, "Poor");
    }

    #[test]
    fn test_band_colors_match_palette() {
        assert_eq!(bmi_category(22.0).color, "#10B981");
        assert_eq!(hearing_level(50.0).color, "#FF6B6B");
        assert_eq!(vision_quality(1.0).color, "#4ECDC4");
    }
}
