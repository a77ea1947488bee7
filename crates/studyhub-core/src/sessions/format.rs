//! Date and time labels shown on each session row.
//!
//! Matches en-US short formatting: `Tue, Apr 8` and `11:30 AM - 12:15 PM`.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

/// Short weekday, short month and day: `Tue, Apr 8`.
pub fn date_label<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%a, %b %-d").to_string()
}

/// 12-hour clock with two-digit minutes: `11:30 AM`.
pub fn time_label<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// `11:30 AM - 12:15 PM`
pub fn time_range_label<Tz>(start: DateTime<Utc>, end: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{} - {}", time_label(start, tz), time_label(end, tz))
}
