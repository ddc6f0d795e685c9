//! Time-window resolution and record filtering
//!
//! Every screen in the app offers the same filter bar (today / yesterday /
//! week / month / custom) and re-implements the range arithmetic; this module
//! is the single shared version. Resolution is a pure function of the window
//! tag, the reference instant and the optional custom date context.

use chrono::{Days, Months, NaiveDateTime};
use thiserror::Error;

use crate::models::{CustomRange, HealthRecord, ResolvedWindow, TimeWindow};

/// Errors that can occur during window resolution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// Custom window requested with no date context at all
    #[error("Custom window requested without a date range")]
    MissingCustomRange,
}

/// End-of-day timestamp: 23:59:59.999, matching the app's range arithmetic
fn end_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date()
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid time")
}

/// Local-midnight timestamp for the same calendar day
fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
}

/// Resolve a window tag to a concrete inclusive `[start, end]` range.
///
/// - `Today`: local midnight of `now` .. `now`
/// - `Yesterday`: midnight of `now − 1 day` .. 23:59:59.999 of that day
/// - `Week`: `now − 7 days` (exact, not calendar-aligned) .. `now`
/// - `Month`: `now − 1 calendar month` (day-of-month clamped) .. `now`
/// - `Custom`: supplied start date at 00:00:00.000 .. supplied end date
///   (or the start date itself) at 23:59:59.999. A `CustomRange` with no
///   start date falls back to Today's window; no `CustomRange` at all is
///   the one hard failure.
pub fn resolve_window(
    window: TimeWindow,
    now: NaiveDateTime,
    custom: Option<CustomRange>,
) -> Result<ResolvedWindow, WindowError> {
    let resolved = match window {
        TimeWindow::Today => ResolvedWindow {
            start: start_of_day(now),
            end: now,
        },
        TimeWindow::Yesterday => {
            let yesterday = now
                .checked_sub_days(Days::new(1))
                .expect("reference instant has a previous day");
            ResolvedWindow {
                start: start_of_day(yesterday),
                end: end_of_day(yesterday),
            }
        }
        TimeWindow::Week => ResolvedWindow {
            start: now
                .checked_sub_days(Days::new(7))
                .expect("reference instant has a previous week"),
            end: now,
        },
        TimeWindow::Month => ResolvedWindow {
            start: now
                .checked_sub_months(Months::new(1))
                .expect("reference instant has a previous month"),
            end: now,
        },
        TimeWindow::Custom => {
            let range = custom.ok_or(WindowError::MissingCustomRange)?;
            match range.start {
                Some(start) => {
                    let end = range.end.unwrap_or(start);
                    ResolvedWindow {
                        start: start.and_hms_opt(0, 0, 0).expect("midnight is valid"),
                        end: end
                            .and_hms_milli_opt(23, 59, 59, 999)
                            .expect("23:59:59.999 is valid"),
                    }
                }
                // Picker visible but no date chosen yet
                None => ResolvedWindow {
                    start: start_of_day(now),
                    end: now,
                },
            }
        }
    };

    Ok(resolved)
}

/// Keep records whose timestamp lies within the window (boundaries
/// included) and return them sorted ascending by timestamp.
///
/// Source order is not trusted: most API lists arrive newest-first and
/// charts need chronological order. Input is never mutated; an empty result
/// is not an error.
pub fn filter_by_window(records: &[HealthRecord], window: &ResolvedWindow) -> Vec<HealthRecord> {
    let mut filtered: Vec<HealthRecord> = records
        .iter()
        .filter(|r| window.contains(r.timestamp))
        .cloned()
        .collect();
    filtered.sort_by_key(|r| r.timestamp);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn record(id: &str, ts: NaiveDateTime) -> HealthRecord {
        HealthRecord {
            id: id.to_string(),
            timestamp: ts,
            metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_today_window() {
        let now = at(2025, 3, 15, 14, 30);
        let w = resolve_window(TimeWindow::Today, now, None).unwrap();
        assert_eq!(w.start, at(2025, 3, 15, 0, 0));
        assert_eq!(w.end, now);
    }

    #[test]
    fn test_yesterday_window_spans_full_day() {
        let now = at(2025, 3, 15, 14, 30);
        let w = resolve_window(TimeWindow::Yesterday, now, None).unwrap();
        assert_eq!(w.start, at(2025, 3, 14, 0, 0));
        assert_eq!(
            w.end,
            NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
        );
    }

    #[test]
    fn test_week_window_is_exact_days() {
        let now = at(2025, 3, 15, 14, 30);
        let w = resolve_window(TimeWindow::Week, now, None).unwrap();
        assert_eq!(w.start, at(2025, 3, 8, 14, 30));
        assert_eq!(w.end, now);
    }

    #[test]
    fn test_month_window_clamps_day_of_month() {
        // March 31 minus one month clamps to February's last day
        let now = at(2025, 3, 31, 9, 0);
        let w = resolve_window(TimeWindow::Month, now, None).unwrap();
        assert_eq!(w.start, at(2025, 2, 28, 9, 0));

        // Leap year
        let now = at(2024, 3, 31, 9, 0);
        let w = resolve_window(TimeWindow::Month, now, None).unwrap();
        assert_eq!(w.start, at(2024, 2, 29, 9, 0));
    }

    #[test]
    fn test_custom_single_day() {
        let now = at(2025, 3, 15, 14, 30);
        let range = CustomRange::day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let w = resolve_window(TimeWindow::Custom, now, Some(range)).unwrap();
        assert_eq!(w.start, at(2025, 1, 1, 0, 0));
        assert_eq!(
            w.end,
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
        );
    }

    #[test]
    fn test_custom_span_uses_range_end() {
        let now = at(2025, 3, 15, 14, 30);
        let range = CustomRange::span(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
        );
        let w = resolve_window(TimeWindow::Custom, now, Some(range)).unwrap();
        assert_eq!(w.start, at(2025, 1, 1, 0, 0));
        assert_eq!(w.end.date(), NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
    }

    #[test]
    fn test_custom_without_date_falls_back_to_today() {
        let now = at(2025, 3, 15, 14, 30);
        let w = resolve_window(TimeWindow::Custom, now, Some(CustomRange::default())).unwrap();
        assert_eq!(w.start, at(2025, 3, 15, 0, 0));
        assert_eq!(w.end, now);
    }

    #[test]
    fn test_custom_without_context_fails() {
        let now = at(2025, 3, 15, 14, 30);
        let err = resolve_window(TimeWindow::Custom, now, None).unwrap_err();
        assert_eq!(err, WindowError::MissingCustomRange);
    }

    #[test]
    fn test_filter_includes_boundaries_and_sorts() {
        let w = ResolvedWindow {
            start: at(2025, 1, 1, 0, 0),
            end: at(2025, 1, 2, 0, 0),
        };
        // Newest-first input, with both boundary timestamps present
        let records = vec![
            record("d", at(2025, 1, 2, 0, 0)),
            record("c", at(2025, 1, 1, 12, 0)),
            record("b", at(2025, 1, 1, 0, 0)),
            record("a", at(2024, 12, 31, 23, 59)),
        ];

        let filtered = filter_by_window(&records, &w);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let w = ResolvedWindow {
            start: at(2025, 1, 1, 0, 0),
            end: at(2025, 1, 2, 0, 0),
        };
        let records = vec![
            record("b", at(2025, 1, 1, 8, 0)),
            record("a", at(2025, 1, 1, 6, 0)),
        ];
        let once = filter_by_window(&records, &w);
        let twice = filter_by_window(&once, &w);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_empty_match_is_ok() {
        let w = ResolvedWindow {
            start: at(2025, 1, 1, 0, 0),
            end: at(2025, 1, 2, 0, 0),
        };
        let records = vec![record("a", at(2020, 1, 1, 0, 0))];
        assert!(filter_by_window(&records, &w).is_empty());
    }
}
