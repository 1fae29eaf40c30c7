use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use thiserror::Error;

use crate::utils::time::{local_day, local_day_start, DATE_KEY_FORMAT};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a YYYY-MM-DD calendar date")]
pub struct DateKeyError(pub String);

/// Canonical `YYYY-MM-DD` identifier of one local calendar day. A namespace holds at most one
/// journal entry per key.
///
/// Keys are only constructed from real calendar days, so the string form is always canonical
/// and two keys are equal exactly when their strings are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Projects a moment onto the local calendar day it falls on. Time of day is discarded.
    pub fn format<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self {
        Self(local_day(moment))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Inverse of [DateKey::format]. Accepts only strings that pass [DateKey::is_valid].
    pub fn parse(key: &str) -> Result<Self, DateKeyError> {
        if !has_key_shape(key) {
            return Err(DateKeyError(key.to_owned()));
        }
        NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError(key.to_owned()))
    }

    /// Whether `key` names a journal entry: exactly `\d{4}-\d{2}-\d{2}` and a real day.
    /// Anything else in a namespace (`pseudo`, `profileImage`, ...) is never read as an entry.
    pub fn is_valid(key: &str) -> bool {
        Self::parse(key).is_ok()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Local midnight of the day.
    pub fn local_midnight(&self) -> DateTime<Local> {
        local_day_start(self.0)
    }

    pub fn is_after(&self, today: NaiveDate) -> bool {
        self.0 > today
    }
}

fn has_key_shape(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use crate::utils::time::local_day_start;

    use super::DateKey;

    #[test]
    fn validity() {
        for key in ["2024-01-01", "2000-02-29", "1999-12-31"] {
            assert!(DateKey::is_valid(key), "{key} should be valid");
        }
        for key in [
            "pseudo",
            "profileImage",
            "2024-13-40",
            "24-01-01",
            "2023-02-29",
            "2024-1-01",
            "2024-01-01 ",
            "2024/01/01",
            "+024-01-01",
            "",
        ] {
            assert!(!DateKey::is_valid(key), "{key} should be invalid");
        }
    }

    #[test]
    fn format_discards_time_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let morning = local_day_start(date) + Duration::minutes(5);
        let evening = local_day_start(date) + Duration::hours(22);

        assert_eq!(DateKey::format(&morning), DateKey::format(&evening));
        assert_eq!(DateKey::format(&morning).to_string(), "2024-01-05");
    }

    #[test]
    fn round_trip_keeps_calendar_day() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 27).unwrap();
        let moment = local_day_start(date) + Duration::hours(13);

        let key = DateKey::format(&moment);
        let parsed = DateKey::parse(&key.to_string()).unwrap();

        assert_eq!(parsed.local_midnight().date_naive(), date);
        assert_eq!(parsed, key);
    }

    #[test]
    fn keys_order_like_their_strings() {
        let a = DateKey::parse("2023-12-31").unwrap();
        let b = DateKey::parse("2024-01-01").unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn future_detection() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert!(DateKey::parse("2024-01-06").unwrap().is_after(today));
        assert!(!DateKey::parse("2024-01-05").unwrap().is_after(today));
    }
}
