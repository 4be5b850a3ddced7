//! Calendar helpers for streaks and weekly quests
//!
//! All buckets are UTC calendar dates formatted as "YYYY-MM-DD".
//! - Day buckets: the date a timestamp falls on
//! - Week buckets: the Monday starting the ISO week a timestamp falls in

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// One day in milliseconds
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn date_of(timestamp_ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .date_naive()
}

fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Compute the day bucket string from a Unix timestamp in milliseconds.
///
/// # Example
/// ```
/// use questboard::gamification::to_date_string;
/// assert_eq!(to_date_string(1703721600000), "2023-12-28");
/// ```
pub fn to_date_string(timestamp_ms: i64) -> String {
    format_date(date_of(timestamp_ms))
}

/// Day bucket for "now"
pub fn today_string(now_ms: i64) -> String {
    to_date_string(now_ms)
}

/// Day bucket for the day before "now"
pub fn yesterday_string(now_ms: i64) -> String {
    to_date_string(now_ms - DAY_MS)
}

fn monday_of(timestamp_ms: i64) -> NaiveDate {
    let date = date_of(timestamp_ms);
    // Sunday belongs to the week that started six days earlier
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday (UTC) of the ISO week containing the timestamp
pub fn monday_string(timestamp_ms: i64) -> String {
    format_date(monday_of(timestamp_ms))
}

/// Sunday (UTC) closing the ISO week containing the timestamp
pub fn sunday_string(timestamp_ms: i64) -> String {
    format_date(monday_of(timestamp_ms) + Duration::days(6))
}

#[cfg(test)]
pub(crate) fn ts(date: &str, hour: u32) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}
