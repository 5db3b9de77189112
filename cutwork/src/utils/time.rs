//! Calendar-day helpers (business timezone)
//!
//! Assignments store `assigned_at` as Unix millis. Reports group by the
//! calendar day that instant falls on in the business timezone, and keep the
//! `NaiveDate` itself as the grouping and sort key. The formatted label is for
//! display only.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

/// Display format for work days, e.g. `10 Jan 2024`
pub const WORK_DAY_FORMAT: &str = "%d %b %Y";

/// Calendar day containing `millis` in `tz`.
///
/// Out-of-range timestamps fall back to the Unix epoch day.
pub fn work_day(millis: i64, tz: Tz) -> NaiveDate {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(&tz).date_naive())
        .unwrap_or_default()
}

/// Day start (00:00:00) → Unix millis in `tz`
///
/// DST gap fallback: when local midnight does not exist, use UTC midnight.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// `10 Jan 2024`
pub fn format_work_day(date: NaiveDate) -> String {
    date.format(WORK_DAY_FORMAT).to_string()
}

/// Parse an IANA timezone name, e.g. `Asia/Kolkata`
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}
