//! Day-bucketed aggregation and summary statistics
//!
//! The shared core behind every chart and stat card in the app. All
//! functions are pure: they take the full (already filtered) record set per
//! call, never cache, and never mutate their input, so re-invocation on
//! every UI state change is idempotent and linear in record count.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::classify::Classifier;
use crate::models::{AggregatedPoint, HealthRecord, SummaryStats};

/// Analysis utilities over filtered record sets
pub struct TimeSeriesAnalyzer;

impl TimeSeriesAnalyzer {
    /// Group records by local calendar day and sum each requested metric.
    ///
    /// Missing or unparsable metric values count as 0, matching the app's
    /// `parseFloat(x) || 0` fold: daily totals reflect only what was
    /// actually reported. Buckets are emitted in ascending chronological
    /// order; days with no records are omitted rather than zero-filled.
    pub fn aggregate_by_day(
        records: &[HealthRecord],
        metric_names: &[&str],
    ) -> Vec<AggregatedPoint> {
        let mut buckets: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();

        for record in records {
            let day = buckets.entry(record.timestamp.date()).or_default();
            for &name in metric_names {
                let value = record.metric(name).unwrap_or(0.0);
                day.entry(name.to_string())
                    .and_modify(|sum| *sum += value)
                    .or_insert(value);
            }
        }

        buckets
            .into_iter()
            .map(|(date, sums)| AggregatedPoint {
                label: date.format("%Y-%m-%d").to_string(),
                sums,
            })
            .collect()
    }

    /// One point per raw record, labeled by time-of-day.
    ///
    /// Caller-selected mode for sub-day windows (today / yesterday / custom
    /// single day) where day buckets would collapse the chart to one point.
    /// Records are emitted in input order; callers pass the sorted output of
    /// [`crate::window::filter_by_window`].
    pub fn per_record_points(
        records: &[HealthRecord],
        metric_names: &[&str],
    ) -> Vec<AggregatedPoint> {
        records
            .iter()
            .map(|record| {
                let sums = metric_names
                    .iter()
                    .map(|&name| (name.to_string(), record.metric(name).unwrap_or(0.0)))
                    .collect();
                AggregatedPoint {
                    label: record.timestamp.format("%H:%M").to_string(),
                    sums,
                }
            })
            .collect()
    }

    /// Summary statistics for one metric over a record set.
    ///
    /// Average, min and max are computed over parsed values only —
    /// unparsable values are excluded from both sum and denominator. This is
    /// deliberately asymmetric with [`Self::aggregate_by_day`]: an average
    /// skewed toward zero by missing readings would misreport the trend,
    /// while a daily total genuinely is the sum of what was reported.
    ///
    /// `latest_value` is taken from the chronologically last record whether
    /// or not the input arrives sorted. Empty input yields `count = 0` and
    /// `None` sentinels; it is never an error.
    pub fn summarize(
        records: &[HealthRecord],
        metric: &str,
        classifier: Option<Classifier>,
    ) -> SummaryStats {
        if records.is_empty() {
            return SummaryStats::empty();
        }

        let mut sum = 0.0;
        let mut parsed = 0usize;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for record in records {
            if let Some(value) = record.metric(metric) {
                sum += value;
                parsed += 1;
                min = Some(min.map_or(value, |m: f64| m.min(value)));
                max = Some(max.map_or(value, |m: f64| m.max(value)));
            }
        }

        let latest_value = records
            .iter()
            .max_by_key(|r| r.timestamp)
            .and_then(|r| r.metric(metric));

        SummaryStats {
            count: records.len(),
            average: (parsed > 0).then(|| sum / parsed as f64),
            min,
            max,
            latest_value,
            latest_category: match (latest_value, classifier) {
                (Some(value), Some(classify)) => Some(classify(value)),
                _ => None,
            },
        }
    }
}
