//! Human-readable relative day labels.

use chrono::{DateTime, FixedOffset, TimeZone};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `date` to `now`, floored. Positive means `date` is in the past.
pub fn days_between<Tz: TimeZone>(date: &DateTime<Tz>, now: &DateTime<FixedOffset>) -> i64 {
    let elapsed = now.timestamp_millis() - date.timestamp_millis();
    elapsed.div_euclid(MILLIS_PER_DAY)
}

/// "today", "1 day ago", "N days ago", "in 1 day" or "in N days".
pub fn relative_days<Tz: TimeZone>(date: &DateTime<Tz>, now: &DateTime<FixedOffset>) -> String {
    match days_between(date, now) {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        days if days > 1 => format!("{days} days ago"),
        -1 => "in 1 day".to_string(),
        days => format!("in {} days", days.unsigned_abs()),
    }
}

/// Calendar dates from `date` to `now`, both read in `now`'s offset.
pub fn calendar_days_between<Tz: TimeZone>(
    date: &DateTime<Tz>,
    now: &DateTime<FixedOffset>,
) -> i64 {
    let local = date.with_timezone(now.offset()).date_naive();
    (now.date_naive() - local).num_days()
}

/// "1 project", "3 projects".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
