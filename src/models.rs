use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One timestamped health measurement entry.
///
/// Records are produced by the ingest layer from API payloads and are
/// immutable afterwards. Metric values are kept as `Option<f64>`: `None`
/// means the source field was missing or failed the lenient float parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Opaque identifier assigned by the backend
    pub id: String,

    /// Local timestamp of the measurement
    pub timestamp: NaiveDateTime,

    /// Metric name → parsed value (None for missing/unparsable)
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl HealthRecord {
    /// Parsed value of a metric, flattening missing-field and
    /// failed-parse into one `None`.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten()
    }
}

/// Time window selection, as offered by the filter bar on every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Today,
    Yesterday,
    /// Last 7 exact days (not calendar-aligned)
    Week,
    /// Last 1 calendar month, day-of-month clamped
    Month,
    /// Caller-supplied date or date range
    Custom,
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(TimeWindow::Today),
            "yesterday" => Ok(TimeWindow::Yesterday),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "custom" => Ok(TimeWindow::Custom),
            _ => Err(format!("Invalid time window: {}", s)),
        }
    }
}

/// Date context for [`TimeWindow::Custom`].
///
/// `start = None` models the UI state where the custom picker is shown but
/// no date has been chosen yet; resolution falls back to Today's window.
/// `end = None` means a single-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl CustomRange {
    /// Single-day range
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: None,
        }
    }

    /// Inclusive multi-day range
    pub fn span(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// A window resolved against a concrete "now": inclusive `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ResolvedWindow {
    /// Boundary timestamps are included on both ends
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// One chart point: a day bucket (or a single record in per-record mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    /// Pre-formatted axis label: `YYYY-MM-DD` for day buckets,
    /// `HH:MM` in per-record mode
    pub label: String,

    /// Metric name → summed value for this bucket
    pub sums: BTreeMap<String, f64>,
}

/// Summary statistics for a single metric over a filtered record set.
///
/// All value fields are `None` when no parsable data exists; callers render
/// that as "N/A". An empty record set is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Number of records in the filtered set (parsable or not)
    pub count: usize,

    /// Mean over parsed values only
    pub average: Option<f64>,

    /// Minimum over parsed values only
    pub min: Option<f64>,

    /// Maximum over parsed values only
    pub max: Option<f64>,

    /// Metric value of the chronologically last record
    pub latest_value: Option<f64>,

    /// Classification of the latest value, when a classifier was supplied
    pub latest_category: Option<Classification>,
}

impl SummaryStats {
    pub fn empty() -> Self {
        Self {
            count: 0,
            average: None,
            min: None,
            max: None,
            latest_value: None,
            latest_category: None,
        }
    }
}

/// Health band for a metric value, with the display color the app uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Band name, e.g. "Overweight" or "Excellent"
    pub category: &'static str,

    /// Hex color tag for rendering
    pub color: &'static str,
}
