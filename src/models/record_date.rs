//! Raw record dates as sent by the backend
//!
//! Dates are kept exactly as received and parsed on demand. A record with a
//! date nobody can read still deserializes; it simply never falls inside a
//! period or a month bucket.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A date or timestamp string that may or may not be parseable
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// A timestamp for "now" in the backend's local-datetime format
    pub fn now() -> Self {
        Self(Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// The calendar date in local time, if the raw value can be read
    ///
    /// Timestamps with an offset are converted to local time first; naive
    /// timestamps and plain dates are taken as already local.
    pub fn local_date(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local).date_naive());
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt.date());
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    /// Accepts ISO strings, Jackson-style `[y, m, d, h, min, s]` arrays, and
    /// null; anything else is kept as its JSON text.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let raw = match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Array(parts) => {
                from_parts(&parts).unwrap_or_else(|| Value::Array(parts).to_string())
            }
            other => other.to_string(),
        };
        Ok(Self(raw))
    }
}

fn from_parts(parts: &[Value]) -> Option<String> {
    let nums: Vec<i64> = parts.iter().map(Value::as_i64).collect::<Option<_>>()?;
    match nums.as_slice() {
        [y, m, d] => Some(format!("{:04}-{:02}-{:02}", y, m, d)),
        [y, m, d, h, min] => Some(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:00",
            y, m, d, h, min
        )),
        [y, m, d, h, min, s, ..] => Some(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            y, m, d, h, min, s
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_backend_formats() {
        assert_eq!(
            RecordDate::new("2024-01-15T10:30:00").local_date(),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            RecordDate::new("2024-01-15T10:30").local_date(),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            RecordDate::new("2024-01-15T10:30:00.123456").local_date(),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            RecordDate::new("2024-02-01").local_date(),
            Some(date(2024, 2, 1))
        );
    }

    #[test]
    fn test_rfc3339_is_converted_to_local() {
        let parsed = RecordDate::new("2024-06-15T12:00:00Z").local_date().unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(RecordDate::new("").local_date(), None);
        assert_eq!(RecordDate::new("yesterday").local_date(), None);
        assert_eq!(RecordDate::new("2024-13-45").local_date(), None);
    }

    #[test]
    fn test_deserialize_variants() {
        let d: RecordDate = serde_json::from_str("[2024, 3, 9, 8, 5, 7]").unwrap();
        assert_eq!(d.raw(), "2024-03-09T08:05:07");
        assert_eq!(d.local_date(), Some(date(2024, 3, 9)));

        let d: RecordDate = serde_json::from_str("null").unwrap();
        assert_eq!(d.local_date(), None);

        let d: RecordDate = serde_json::from_str("12345").unwrap();
        assert_eq!(d.raw(), "12345");
        assert_eq!(d.local_date(), None);
    }
}
