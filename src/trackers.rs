//! Per-tracker configuration
//!
//! Each screen of the app is a thin configuration over the shared analyzer:
//! which timestamp field its records use, which metric fields exist, which
//! of those the chart plots by default, and which classifier (if any) bands
//! the headline metric. Everything screen-specific lives here.

use serde::{Deserialize, Serialize};

use crate::classify::{self, Classifier};
use crate::ingest::RecordSchema;

/// The record collections the app tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tracker {
    /// Body mass index measurements
    Bmi,
    /// Blood sugar and cholesterol panel
    Sugar,
    /// Audiometry readings per ear and frequency band
    Ear,
    /// Vision acuity readings per eye
    Eye,
    /// Dietary intake entries
    Dietary,
    /// Fluid balance (water in / urine out)
    Fluid,
}

impl Tracker {
    pub const ALL: [Tracker; 6] = [
        Tracker::Bmi,
        Tracker::Sugar,
        Tracker::Ear,
        Tracker::Eye,
        Tracker::Dietary,
        Tracker::Fluid,
    ];

    /// Record field layout for this tracker's API payloads
    pub fn schema(&self) -> RecordSchema {
        match self {
            Tracker::Bmi => RecordSchema {
                timestamp_field: "timestamp",
                metric_fields: &["height", "weight", "bmi"],
            },
            Tracker::Sugar => RecordSchema {
                timestamp_field: "datetime",
                metric_fields: &[
                    "fasting_sugar",
                    "post_meal_sugar",
                    "cholesterol",
                    "hdl",
                    "ldl",
                    "triglycerides",
                ],
            },
            Tracker::Ear => RecordSchema {
                timestamp_field: "datetime",
                metric_fields: &["LHigh", "LMedium", "LLow", "RHigh", "RMedium", "RLow"],
            },
            Tracker::Eye => RecordSchema {
                timestamp_field: "datetime",
                metric_fields: &[
                    "L1", "L2", "L3", "L4", "L5", "L6", "R1", "R2", "R3", "R4", "R5", "R6",
                ],
            },
            Tracker::Dietary => RecordSchema {
                timestamp_field: "created_at",
                metric_fields: &["carbohydrates", "protein", "fat", "vitamins", "minerals"],
            },
            Tracker::Fluid => RecordSchema {
                timestamp_field: "timestamp",
                metric_fields: &["water_in", "water_out"],
            },
        }
    }

    /// Metrics the chart plots when the caller does not narrow the set
    pub fn default_chart_metrics(&self) -> &'static [&'static str] {
        match self {
            Tracker::Bmi => &["weight", "bmi"],
            Tracker::Sugar => &["fasting_sugar", "cholesterol"],
            Tracker::Ear => &["LHigh", "RHigh"],
            Tracker::Eye => &["L1", "R1"],
            Tracker::Dietary => &["carbohydrates", "protein", "fat"],
            Tracker::Fluid => &["water_in", "water_out"],
        }
    }

    /// Headline metric for the summary card
    pub fn headline_metric(&self) -> &'static str {
        match self {
            Tracker::Bmi => "bmi",
            Tracker::Sugar => "fasting_sugar",
            Tracker::Ear => "LHigh",
            Tracker::Eye => "L1",
            Tracker::Dietary => "carbohydrates",
            Tracker::Fluid => "water_in",
        }
    }

    /// Band classifier for the headline metric, where the screen has one
    pub fn classifier(&self) -> Option<Classifier> {
        match self {
            Tracker::Bmi => Some(classify::bmi_category),
            Tracker::Ear => Some(classify::hearing_level),
            Tracker::Eye => Some(classify::vision_quality),
            Tracker::Sugar | Tracker::Dietary | Tracker::Fluid => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tracker::Bmi => "BMI",
            Tracker::Sugar => "Sugar & Cholesterol",
            Tracker::Ear => "Hearing",
            Tracker::Eye => "Vision",
            Tracker::Dietary => "Dietary",
            Tracker::Fluid => "Fluid Balance",
        }
    }
}

impl std::str::FromStr for Tracker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bmi" => Ok(Tracker::Bmi),
            "sugar" | "cholesterol" => Ok(Tracker::Sugar),
            "ear" | "hearing" => Ok(Tracker::Ear),
            "eye" | "vision" => Ok(Tracker::Eye),
            "dietary" | "diet" => Ok(Tracker::Dietary),
            "fluid" | "water" => Ok(Tracker::Fluid),
            _ => Err(format!(
                "Unknown tracker: {} (expected one of bmi, sugar, ear, eye, dietary, fluid)",
                s
            )),
        }
    }
}
