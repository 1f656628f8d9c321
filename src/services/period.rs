//! Period filter
//!
//! Decides whether a record falls in a calendar month, and turns user input
//! such as "current", "last" or "2024-03" into a [`Period`].

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::error::{FinboardError, FinboardResult};
use crate::models::{Period, Record, RecordDate};

/// True iff the raw date's local calendar month and year match `reference`
///
/// Unparseable dates are never in the period.
pub fn in_current_period(raw: &RecordDate, reference: NaiveDate) -> bool {
    in_period(raw, Period::containing(reference))
}

/// True iff the raw date falls in `period`; unreadable dates are logged
pub fn in_period(raw: &RecordDate, period: Period) -> bool {
    match raw.local_date() {
        Some(date) => period.contains(date),
        None => {
            warn!(raw = raw.raw(), "Ignoring unreadable date");
            false
        }
    }
}

/// Like [`in_period`], but logs records whose date cannot be read
pub fn record_in_period<R: Record>(record: &R, period: Period) -> bool {
    let raw = record.record_date();
    match raw.local_date() {
        Some(date) => period.contains(date),
        None => {
            warn!(
                record_id = record.record_id(),
                raw = raw.raw(),
                "Skipping record with unreadable date"
            );
            false
        }
    }
}

/// Resolve a period argument relative to `today`
///
/// Accepts "current" (or "this"), "last" (or "previous"), "next" and
/// "YYYY-MM". `None` means the current month.
pub fn parse_or_current(input: Option<&str>, today: NaiveDate) -> FinboardResult<Period> {
    let current = Period::containing(today);
    let Some(raw) = input else {
        return Ok(current);
    };

    match raw.trim().to_lowercase().as_str() {
        "" | "current" | "this" => Ok(current),
        "last" | "previous" | "prev" => Ok(current.prev()),
        "next" => Ok(current.next()),
        other => Period::parse(other).map_err(|e| {
            FinboardError::Validation(format!(
                "Invalid period '{}': {}. Use 'current', 'last' or YYYY-MM",
                raw, e
            ))
        }),
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_in_current_period_formats() {
        let reference = date(2024, 1, 20);
        assert!(in_current_period(&RecordDate::new("2024-01-15T10:30:00"), reference));
        assert!(in_current_period(&RecordDate::new("2024-01-31"), reference));
        assert!(in_current_period(&RecordDate::new("2024-01-01 00:00:00"), reference));
        assert!(!in_current_period(&RecordDate::new("2023-12-31T23:59:59"), reference));
        assert!(!in_current_period(&RecordDate::new("2023-01-15"), reference));
    }

    #[test]
    fn test_bad_dates_are_never_in_period() {
        let reference = date(2024, 1, 20);
        assert!(!in_current_period(&RecordDate::new("not-a-date"), reference));
        assert!(!in_current_period(&RecordDate::default(), reference));

        let jan = Period::monthly(2024, 1).unwrap();
        assert!(!in_period(&RecordDate::new("2024/01/15"), jan));
        assert!(in_period(&RecordDate::new("2024-01-15"), jan));
    }

    #[test]
    fn test_record_in_period_skips_bad_dates() {
        let expense = Expense {
            id: ExpenseId::new(1),
            amount: Money::new(10.0),
            description: "?".into(),
            category_id: None,
            notes: None,
            expense_date: RecordDate::new("31/01/2024"),
        };
        let period = Period::monthly(2024, 1).unwrap();
        assert!(!record_in_period(&expense, period));
    }

    #[test]
    fn test_parse_or_current() {
        let today = date(2024, 1, 10);
        assert_eq!(
            parse_or_current(None, today).unwrap(),
            Period::monthly(2024, 1).unwrap()
        );
        assert_eq!(
            parse_or_current(Some("last"), today).unwrap(),
            Period::monthly(2023, 12).unwrap()
        );
        assert_eq!(
            parse_or_current(Some("2024-03"), today).unwrap(),
            Period::monthly(2024, 3).unwrap()
        );
        assert!(parse_or_current(Some("2024-13"), today)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_parse_or_current_rejects_unrepresentable_year() {
        let err = parse_or_current(Some("300000-01"), date(2024, 1, 1)).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("300000-01"));
    }
}
