//! Formatting helpers for timestamps, bucket titles, and mood values.

use time::{Date, OffsetDateTime};

/// `DD.MM`, for axis tick labels.
pub fn short_date(ts: OffsetDateTime) -> String {
    format!("{:02}.{:02}", ts.day(), ts.month() as u8)
}

/// `HH:MM`, for sub-day axis tick labels.
pub fn time_label(ts: OffsetDateTime) -> String {
    format!("{:02}:{:02}", ts.hour(), ts.minute())
}

/// `HH:MM DD.MM.YYYY`, for entry timestamps and sub-day bucket titles.
pub fn full_date_time(ts: OffsetDateTime) -> String {
    format!(
        "{:02}:{:02} {:02}.{:02}.{:04}",
        ts.hour(),
        ts.minute(),
        ts.day(),
        ts.month() as u8,
        ts.year()
    )
}

/// `DD.MM.YYYY`, for day bucket titles.
pub fn day_title(date: Date) -> String {
    format!(
        "{:02}.{:02}.{:04}",
        date.day(),
        date.month() as u8,
        date.year()
    )
}

/// `MM.YYYY`, for month bucket titles.
pub fn month_title(date: Date) -> String {
    format!("{:02}.{:04}", date.month() as u8, date.year())
}

/// Mood value with the decimal point only when it carries information.
pub fn value_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
