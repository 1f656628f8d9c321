//! Accounting period representation
//!
//! Every "monthly" figure on the dashboard is scoped to a calendar month.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Create a period; `month` must be in `1..=12`
    ///
    /// Both the first day of the month and the first day of the following
    /// month must be representable, so every bound of the period exists.
    pub fn monthly(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        let next_start = following(year, month).and_then(|(y, m)| first_day(y, m));
        if first_day(year, month).is_none() || next_start.is_none() {
            return Err(PeriodParseError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        first_day(self.year, self.month).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        following(self.year, self.month)
            .and_then(|(y, m)| first_day(y, m))
            .and_then(|day| day.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every day of the month in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date();
        self.start_date()
            .iter_days()
            .take_while(move |day| *day <= end)
    }

    /// The following month; stays put at the end of the calendar
    pub fn next(&self) -> Self {
        following(self.year, self.month)
            .and_then(|(year, month)| Self::monthly(year, month).ok())
            .unwrap_or(*self)
    }

    /// The preceding month; stays put at the start of the calendar
    pub fn prev(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year.checked_sub(1), 12)
        } else {
            (Some(self.year), self.month - 1)
        };
        year.and_then(|year| Self::monthly(year, month).ok())
            .unwrap_or(*self)
    }

    /// The zero-padded `"YYYY-MM"` key used by analytics series
    pub fn month_key(&self) -> String {
        self.to_string()
    }

    /// A short human label such as "Jan 2024"
    pub fn label(&self) -> String {
        let name = MONTH_ABBREVIATIONS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???");
        format!("{} {}", name, self.year)
    }

    /// Parse a `"YYYY-MM"` string
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::monthly(year, month)
    }
}

fn first_day(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn following(year: i32, month: u32) -> Option<(i32, u32)> {
    if month == 12 {
        year.checked_add(1).map(|year| (year, 1))
    } else {
        Some((year, month + 1))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb = Period::monthly(2024, 2).unwrap();
        assert_eq!(feb.start_date(), date(2024, 2, 1));
        assert_eq!(feb.end_date(), date(2024, 2, 29));
        assert_eq!(feb.days().count(), 29);
    }

    #[test]
    fn test_navigation_wraps_years() {
        let dec = Period::monthly(2024, 12).unwrap();
        assert_eq!(dec.next(), Period::monthly(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_contains() {
        let jan = Period::monthly(2025, 1).unwrap();
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
        assert!(!jan.contains(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_and_display() {
        let period = Period::parse("2024-3").unwrap();
        assert_eq!(period.to_string(), "2024-03");
        assert_eq!(period.label(), "Mar 2024");
        assert_eq!(
            Period::parse("2024-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(Period::parse("March").is_err());
    }

    #[test]
    fn test_far_years_are_rejected() {
        assert_eq!(
            Period::monthly(300000, 1),
            Err(PeriodParseError::YearOutOfRange(300000))
        );
        assert_eq!(
            Period::parse("300000-01"),
            Err(PeriodParseError::YearOutOfRange(300000))
        );
        assert!(Period::monthly(i32::MIN, 6).is_err());
        // December of the last representable year has no following month
        let last_year = NaiveDate::MAX.year();
        assert!(Period::monthly(last_year, 12).is_err());
    }

    #[test]
    fn test_navigation_stops_at_calendar_edges() {
        let last_year = NaiveDate::MAX.year();
        let last = Period::monthly(last_year, 11).unwrap();
        assert_eq!(last.next(), last);
        assert_eq!(last.end_date(), date(last_year, 11, 30));
        assert_eq!(last.days().count(), 30);

        let first = Period::containing(NaiveDate::MIN);
        let first = Period::monthly(first.year, first.month).unwrap();
        assert_eq!(first.prev(), first);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut periods = vec![
            Period::monthly(2024, 11).unwrap(),
            Period::monthly(2023, 12).unwrap(),
            Period::monthly(2024, 2).unwrap(),
        ];
        periods.sort();
        let keys: Vec<_> = periods.iter().map(Period::month_key).collect();
        assert_eq!(keys, vec!["2023-12", "2024-02", "2024-11"]);
    }
}
