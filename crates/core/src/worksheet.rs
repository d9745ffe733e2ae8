//! Worksheet time aggregation.
//!
//! Worksheets are logged time entries against a maintenance request. Totals
//! are computed on read from the full entry set, never stored.

use crate::types::Timestamp;

/// Seconds per hour (3600.0).
const SECS_PER_HOUR: f64 = 3600.0;

/// Aggregated hours for one request's worksheets.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct WorksheetTotals {
    /// Sum of clamped per-entry hours.
    pub total_hours: f64,
    /// True when the total exceeds the request's estimated duration.
    /// Only evaluated when an estimate is present and non-zero.
    pub overtime: bool,
}

/// Hours for a single entry: `max(0, end - start)` in hours.
///
/// Inverted intervals clamp to zero rather than producing negative hours.
pub fn entry_hours(start: Timestamp, end: Timestamp) -> f64 {
    let secs = (end - start).num_seconds();
    if secs <= 0 {
        0.0
    } else {
        secs as f64 / SECS_PER_HOUR
    }
}

/// Aggregate a request's worksheet intervals against its estimated duration.
pub fn aggregate(intervals: &[(Timestamp, Timestamp)], estimated_hours: Option<i32>) -> WorksheetTotals {
    let total_hours: f64 = intervals.iter().map(|&(start, end)| entry_hours(start, end)).sum();

    let overtime = match estimated_hours {
        Some(estimate) if estimate != 0 => total_hours > f64::from(estimate),
        _ => false,
    };

    WorksheetTotals {
        total_hours,
        overtime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn forward_interval_in_hours() {
        assert_eq!(entry_hours(at(9, 0), at(11, 30)), 2.5);
    }

    #[test]
    fn inverted_interval_clamps_to_zero() {
        assert_eq!(entry_hours(at(11, 0), at(9, 0)), 0.0);
    }

    #[test]
    fn zero_length_interval_is_zero() {
        assert_eq!(entry_hours(at(9, 0), at(9, 0)), 0.0);
    }

    #[test]
    fn totals_sum_and_skip_inverted() {
        let totals = aggregate(
            &[(at(9, 0), at(11, 30)), (at(13, 0), at(14, 0)), (at(16, 0), at(15, 0))],
            None,
        );
        assert_eq!(totals.total_hours, 3.5);
        assert!(!totals.overtime);
    }

    #[test]
    fn overtime_when_total_exceeds_estimate() {
        let totals = aggregate(&[(at(9, 0), at(13, 0))], Some(3));
        assert_eq!(totals.total_hours, 4.0);
        assert!(totals.overtime);
    }

    #[test]
    fn no_overtime_at_or_under_estimate() {
        let totals = aggregate(&[(at(9, 0), at(12, 0))], Some(3));
        assert!(!totals.overtime);
    }

    #[test]
    fn zero_or_missing_estimate_never_flags() {
        let intervals = [(at(9, 0), at(18, 0))];
        assert!(!aggregate(&intervals, Some(0)).overtime);
        assert!(!aggregate(&intervals, None).overtime);
    }
}
