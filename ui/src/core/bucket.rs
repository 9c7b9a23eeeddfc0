//! Time-bucket keys shared by the series builder, the drill-down resolver,
//! and every chart rendering path.
//!
//! The key derivation lives here exactly once: recomputing a day or month
//! key through a second formatting path is how off-by-one-timezone bugs get
//! in. All keys are derived in UTC, the fixed reference timezone for the
//! whole pipeline.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    Time, UtcOffset,
};

use crate::core::format;
use crate::core::range::Granularity;

/// Aggregation key for one time bucket.
///
/// `Day` holds the calendar date; `Month` holds the first day of the month
/// so ordering and the representative instant fall out of the `Date` inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BucketKey {
    /// Sub-day granularity: the exact instant, no cross-entry aggregation
    /// except for timestamp-equal entries.
    Instant(OffsetDateTime),
    /// Day granularity: the UTC calendar date.
    Day(Date),
    /// Month granularity: the first day of the UTC calendar month.
    Month(Date),
}

impl BucketKey {
    /// The instant a point for this bucket is plotted at: the exact
    /// timestamp for sub-day buckets, the bucket start otherwise.
    pub fn instant(self) -> OffsetDateTime {
        match self {
            BucketKey::Instant(ts) => ts,
            BucketKey::Day(date) | BucketKey::Month(date) => date.midnight().assume_utc(),
        }
    }

    /// Canonical string form: RFC 3339 for instants, `YYYY-MM-DD` for days,
    /// `YYYY-MM` for months.
    pub fn canonical(self) -> String {
        match self {
            BucketKey::Instant(ts) => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                ts.year(),
                ts.month() as u8,
                ts.day(),
                ts.hour(),
                ts.minute(),
                ts.second()
            ),
            BucketKey::Day(date) => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month() as u8,
                date.day()
            ),
            BucketKey::Month(date) => format!("{:04}-{:02}", date.year(), date.month() as u8),
        }
    }

    /// Human-readable bucket title for the drill-down panel.
    pub fn title(self) -> String {
        match self {
            BucketKey::Instant(ts) => format::full_date_time(ts),
            BucketKey::Day(date) => format::day_title(date),
            BucketKey::Month(date) => format::month_title(date),
        }
    }
}

/// Derive the bucket key for an instant under the given granularity.
pub fn bucket_key(ts: OffsetDateTime, granularity: Granularity) -> BucketKey {
    let utc = ts.to_offset(UtcOffset::UTC);
    match granularity {
        Granularity::SubDay => BucketKey::Instant(utc),
        Granularity::Day => BucketKey::Day(utc.date()),
        // Day 1 is valid in every month, so the fallback never fires.
        Granularity::Month => BucketKey::Month(utc.date().replace_day(1).unwrap_or(utc.date())),
    }
}

/// Parse an entry timestamp, normalized to UTC.
///
/// Accepts full RFC 3339 stamps and bare `YYYY-MM-DD` dates (taken as UTC
/// midnight). Anything else is `None`; the caller drops the entry rather
/// than failing the render.
pub fn parse_instant(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts.to_offset(UtcOffset::UTC));
    }
    Date::parse(raw, &format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Clamp an instant back to UTC midnight of its calendar date.
pub fn align_to_midnight(ts: OffsetDateTime) -> OffsetDateTime {
    ts.to_offset(UtcOffset::UTC).replace_time(Time::MIDNIGHT)
}

/// Milliseconds since the Unix epoch, for chart-space interpolation.
pub fn unix_ms(ts: OffsetDateTime) -> f64 {
    ts.unix_timestamp_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn day_key_is_utc_calendar_date() {
        let ts = datetime!(2024-03-05 23:30:00 UTC);
        let key = bucket_key(ts, Granularity::Day);
        assert_eq!(key, BucketKey::Day(datetime!(2024-03-05 00:00:00 UTC).date()));
        assert_eq!(key.canonical(), "2024-03-05");
        assert_eq!(key.instant(), datetime!(2024-03-05 00:00:00 UTC));
    }

    #[test]
    fn month_key_snaps_to_first_of_month() {
        let ts = datetime!(2024-12-31 18:00:00 UTC);
        let key = bucket_key(ts, Granularity::Month);
        assert_eq!(key.canonical(), "2024-12");
        assert_eq!(key.instant(), datetime!(2024-12-01 00:00:00 UTC));
    }

    #[test]
    fn instant_key_preserves_the_exact_timestamp() {
        let ts = datetime!(2024-03-05 09:15:42 UTC);
        let key = bucket_key(ts, Granularity::SubDay);
        assert_eq!(key.instant(), ts);
        assert_eq!(key.canonical(), "2024-03-05T09:15:42Z");
    }

    #[test]
    fn offset_timestamps_bucket_by_their_utc_date() {
        // 01:30+03:00 is 22:30 UTC the previous day.
        let ts = datetime!(2024-03-06 01:30:00 +03:00);
        let key = bucket_key(ts, Granularity::Day);
        assert_eq!(key.canonical(), "2024-03-05");
    }

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        assert_eq!(
            parse_instant("2024-03-05T09:00:00Z"),
            Some(datetime!(2024-03-05 09:00:00 UTC))
        );
        assert_eq!(
            parse_instant("2024-03-05"),
            Some(datetime!(2024-03-05 00:00:00 UTC))
        );
        assert_eq!(parse_instant("yesterday-ish"), None);
        assert_eq!(parse_instant(""), None);
    }

    #[test]
    fn midnight_alignment() {
        assert_eq!(
            align_to_midnight(datetime!(2024-03-10 12:34:56 UTC)),
            datetime!(2024-03-10 00:00:00 UTC)
        );
    }

    #[test]
    fn keys_of_different_granularities_never_collide() {
        let ts = datetime!(2024-03-01 00:00:00 UTC);
        assert_ne!(
            bucket_key(ts, Granularity::Day),
            bucket_key(ts, Granularity::Month)
        );
    }
}
