//! Tolerant decoding of API record payloads
//!
//! The backend returns record arrays in several shapes depending on the
//! endpoint: a bare array, `{"data": [...]}`, and in one case
//! `{"data": {"data": [...]}}`. Field names vary per tracker (`timestamp`,
//! `datetime`, `created_at`) and numeric fields may arrive as numbers or as
//! strings. This module normalizes all of that into [`HealthRecord`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

use crate::models::HealthRecord;

/// Payload decoding errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// Body is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON is valid but no record array could be located
    #[error("Unexpected payload shape: found {found}")]
    UnexpectedShape { found: String },
}

/// Field layout of one tracker's records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Name of the timestamp field (`timestamp`, `datetime`, `created_at`)
    pub timestamp_field: &'static str,

    /// Numeric fields to extract
    pub metric_fields: &'static [&'static str],
}

/// Decode a JSON body into records.
///
/// An empty or whitespace-only body decodes to an empty collection — the
/// fetch layer maps 404 to "no records yet", not an error. Records whose
/// timestamp is missing or unparsable are skipped with a warning; every
/// other irregularity degrades to an absent metric value.
pub fn parse_records(body: &str, schema: &RecordSchema) -> Result<Vec<HealthRecord>, IngestError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body)?;
    let items = unwrap_payload(&value)?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match decode_record(item, index, schema) {
            Some(record) => records.push(record),
            None => {
                tracing::warn!(
                    index,
                    timestamp_field = schema.timestamp_field,
                    "Skipping record with missing or unparsable timestamp"
                );
            }
        }
    }

    Ok(records)
}

/// Locate the record array inside whatever envelope the endpoint used
fn unwrap_payload(value: &Value) -> Result<&Vec<Value>, IngestError> {
    match value {
        Value::Array(items) => Ok(items),
        // Peels {"data": [...]} and the doubly-wrapped {"data": {"data": [...]}}
        Value::Object(map) => match map.get("data") {
            Some(inner) => unwrap_payload(inner),
            None => Err(IngestError::UnexpectedShape {
                found: "object without a \"data\" field".to_string(),
            }),
        },
        other => Err(IngestError::UnexpectedShape {
            found: json_type_name(other).to_string(),
        }),
    }
}

fn decode_record(item: &Value, index: usize, schema: &RecordSchema) -> Option<HealthRecord> {
    let timestamp = item
        .get(schema.timestamp_field)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)?;

    let id = match item.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => index.to_string(),
    };

    let metrics = schema
        .metric_fields
        .iter()
        .map(|&name| (name.to_string(), item.get(name).and_then(lenient_f64)))
        .collect();

    Some(HealthRecord {
        id,
        timestamp,
        metrics,
    })
}

/// Parse the timestamp formats seen in the wild:
/// the API write format `YYYY-MM-DD HH:MM:SS`, ISO 8601 with a `T`
/// separator with or without fractional seconds, RFC 3339 with an offset
/// (converted to its UTC wall-clock), and a bare date (taken at midnight).
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// Lenient float extraction: JSON numbers and numeric strings pass,
/// everything else (including non-finite results) is "no value"
fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BMI_SCHEMA: RecordSchema = RecordSchema {
        timestamp_field: "timestamp",
        metric_fields: &["height", "weight", "bmi"],
    };

    #[test]
    fn test_bare_array_payload() {
        let body = r#"[{"id": 1, "timestamp": "2025-01-01 08:00:00", "bmi": 22.5}]"#;
        let records = parse_records(body, &BMI_SCHEMA).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].metric("bmi"), Some(22.5));
    }

    #[test]
    fn test_data_wrapped_payload() {
        let body = r#"{"data": [{"id": "a", "timestamp": "2025-01-01 08:00:00", "bmi": "21.0"}]}"#;
        let records = parse_records(body, &BMI_SCHEMA).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric("bmi"), Some(21.0));
    }

    #[test]
    fn test_double_wrapped_payload() {
        let body =
            r#"{"data": {"data": [{"id": 7, "timestamp": "2025-01-01T08:00:00", "bmi": 20}]}}"#;
        let records = parse_records(body, &BMI_SCHEMA).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_body_is_empty_collection() {
        assert!(parse_records("", &BMI_SCHEMA).unwrap().is_empty());
        assert!(parse_records("  \n", &BMI_SCHEMA).unwrap().is_empty());
    }

    #[test]
    fn test_unexpected_shape_is_an_error() {
        let err = parse_records("42", &BMI_SCHEMA).unwrap_err();
        assert!(matches!(err, IngestError::UnexpectedShape { .. }));

        let err = parse_records(r#"{"items": []}"#, &BMI_SCHEMA).unwrap_err();
        assert!(matches!(err, IngestError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_unparsable_metric_becomes_absent() {
        let body = r#"[{"id": 1, "timestamp": "2025-01-01 08:00:00", "bmi": "n/a", "weight": null}]"#;
        let records = parse_records(body, &BMI_SCHEMA).unwrap();
        assert_eq!(records[0].metric("bmi"), None);
        assert_eq!(records[0].metric("weight"), None);
    }

    #[test]
    fn test_record_with_bad_timestamp_is_skipped() {
        let body = r#"[
            {"id": 1, "timestamp": "not a date", "bmi": 22.0},
            {"id": 2, "timestamp": "2025-01-01 08:00:00", "bmi": 23.0}
        ]"#;
        let records = parse_records(body, &BMI_SCHEMA).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2025-10-10 09:00:00").is_some());
        assert!(parse_timestamp("2025-10-10T09:00:00").is_some());
        assert!(parse_timestamp("2025-10-10T09:00:00.123").is_some());
        assert!(parse_timestamp("2025-10-10T09:00:00Z").is_some());
        assert!(parse_timestamp("2025-10-10").is_some());
        assert!(parse_timestamp("10/10/2025").is_none());
    }

    #[test]
    fn test_rfc3339_z_suffix_keeps_utc_wall_clock() {
        let ts = parse_timestamp("2025-10-10T09:00:00Z").unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn test_missing_id_falls_back_to_index() {
        let body = r#"[{"timestamp": "2025-01-01 08:00:00"}]"#;
        let records = parse_records(body, &BMI_SCHEMA).unwrap();
        assert_eq!(records[0].id, "0");
    }
}
