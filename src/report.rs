//! Terminal rendering of summaries and aggregated series
//!
//! The analyzer returns raw numbers; all display formatting lives here.
//! Tables follow the stat-card / history-table layout of the app screens.

use colored::{Color, ColoredString, Colorize};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{AggregatedPoint, Classification, SummaryStats};
use crate::trackers::Tracker;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Statistic")]
    stat: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format a stat value, with "N/A" for the empty-data sentinel
fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.1}", v))
}

/// Summary stats table for one metric
pub fn summary_table(tracker: Tracker, metric: &str, stats: &SummaryStats) -> String {
    let mut rows = vec![
        SummaryRow {
            stat: "Records".to_string(),
            value: stats.count.to_string(),
        },
        SummaryRow {
            stat: format!("Latest {}", metric),
            value: fmt_stat(stats.latest_value),
        },
        SummaryRow {
            stat: format!("Average {}", metric),
            value: fmt_stat(stats.average),
        },
        SummaryRow {
            stat: format!("{} range", metric),
            value: match (stats.min, stats.max) {
                (Some(min), Some(max)) => format!("{:.1} - {:.1}", min, max),
                _ => "N/A".to_string(),
            },
        },
    ];

    if let Some(classification) = stats.latest_category {
        rows.push(SummaryRow {
            stat: format!("{} category", tracker.display_name()),
            value: classification.category.to_string(),
        });
    }

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Aggregated series as a table: one row per point, one column per metric
pub fn series_table(points: &[AggregatedPoint], metric_names: &[&str]) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Date".to_string()];
    header.extend(metric_names.iter().map(|m| m.to_string()));
    builder.push_record(header);

    for point in points {
        let mut row = vec![point.label.clone()];
        row.extend(
            metric_names
                .iter()
                .map(|&m| format!("{:.1}", point.sums.get(m).copied().unwrap_or(0.0))),
        );
        builder.push_record(row);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Category name tinted with the product palette color it ships with
pub fn colored_category(classification: &Classification) -> ColoredString {
    let color = match classification.color {
        "#EF4444" | "#FF6B6B" => Color::Red,
        "#F59E0B" | "#FBBC05" => Color::Yellow,
        "#10B981" | "#34A853" | "#4ECDC4" => Color::Green,
        "#3B82F6" | "#4285F4" => Color::Blue,
        _ => Color::White,
    };
    classification.category.color(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;
    use std::collections::BTreeMap;

    #[test]
    fn test_summary_table_renders_sentinels() {
        let table = summary_table(Tracker::Bmi, "bmi", &SummaryStats::empty());
        assert!(table.contains("N/A"));
        assert!(table.contains("Records"));
    }

    #[test]
    fn test_summary_table_includes_category_row() {
        let stats = SummaryStats {
            count: 1,
            average: Some(27.4),
            min: Some(27.4),
            max: Some(27.4),
            latest_value: Some(27.4),
            latest_category: Some(Classification {
                category: "Overweight",
                color: "#F59E0B",
            }),
        };
        let table = summary_table(Tracker::Bmi, "bmi", &stats);
        assert!(table.contains("Overweight"));
        assert!(table.contains("27.4"));
    }

    #[test]
    fn test_series_table_has_metric_columns() {
        let mut sums = BTreeMap::new();
        sums.insert("water_in".to_string(), 550.0);
        sums.insert("water_out".to_string(), 300.0);
        let points = vec![AggregatedPoint {
            label: "2025-01-01".to_string(),
            sums,
        }];

        let table = series_table(&points, &["water_in", "water_out"]);
        assert!(table.contains("2025-01-01"));
        assert!(table.contains("550.0"));
        assert!(table.contains("water_out"));
    }

    #[test]
    fn test_series_table_missing_metric_renders_zero() {
        let points = vec![AggregatedPoint {
            label: "2025-01-01".to_string(),
            sums: BTreeMap::new(),
        }];
        let table = series_table(&points, &["bmi"]);
        assert!(table.contains("0.0"));
    }
}
