use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

/// This is the standard way of converting a date to a key in moodlog.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Returns the first instant of a calendar day in local time.
///
/// Midnight can be skipped by a daylight saving transition, in which case the day starts at
/// the earliest representable time after the gap.
pub fn local_day_start(date: NaiveDate) -> DateTime<Local> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(v) => v,
        None => {
            let after_gap = midnight + chrono::Duration::hours(1);
            Local
                .from_local_datetime(&after_gap)
                .earliest()
                .unwrap_or_else(|| Local.from_utc_datetime(&midnight))
        }
    }
}

/// Returns the calendar day of a moment as seen in local time.
pub fn local_day<Tz: TimeZone>(moment: &DateTime<Tz>) -> NaiveDate {
    moment.with_timezone(&Local).date_naive()
}
