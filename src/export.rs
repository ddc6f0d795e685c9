//! CSV export of aggregated series
//!
//! One row per chart point, one column per metric, suitable for spreadsheet
//! plotting. Uses the same zero-for-missing policy as the chart itself.

use std::path::Path;
use thiserror::Error;

use crate::models::AggregatedPoint;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write an aggregated series to a CSV file
pub fn export_series<P: AsRef<Path>>(
    points: &[AggregatedPoint],
    metric_names: &[&str],
    output_path: P,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut header = vec!["date"];
    header.extend_from_slice(metric_names);
    writer.write_record(&header)?;

    for point in points {
        let mut row = vec![point.label.clone()];
        row.extend(
            metric_names
                .iter()
                .map(|&m| point.sums.get(m).copied().unwrap_or(0.0).to_string()),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
