//! Range selection and window resolution.
//!
//! The selector set and its granularity table are a fixed contract, not a
//! density heuristic: `1` day plots raw instants, week/month/quarter plot
//! daily averages, year and all-time plot monthly averages.

use time::{Duration, OffsetDateTime};

use api::MoodEntry;

use crate::core::bucket;

/// The time ranges a viewer can pick. Wire values match the stored
/// preference and the original query API (`"1"`, `"7"`, ..., `"all"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelector {
    Day,
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl RangeSelector {
    /// All selectors, in the order they appear in the period picker.
    pub const ALL: [RangeSelector; 6] = [
        RangeSelector::Day,
        RangeSelector::Week,
        RangeSelector::Month,
        RangeSelector::Quarter,
        RangeSelector::Year,
        RangeSelector::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RangeSelector::Day => "1",
            RangeSelector::Week => "7",
            RangeSelector::Month => "30",
            RangeSelector::Quarter => "90",
            RangeSelector::Year => "365",
            RangeSelector::All => "all",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "1" => Some(RangeSelector::Day),
            "7" => Some(RangeSelector::Week),
            "30" => Some(RangeSelector::Month),
            "90" => Some(RangeSelector::Quarter),
            "365" => Some(RangeSelector::Year),
            "all" => Some(RangeSelector::All),
            _ => None,
        }
    }

    /// Window length in days; `None` for all-time.
    pub fn days(self) -> Option<i64> {
        match self {
            RangeSelector::Day => Some(1),
            RangeSelector::Week => Some(7),
            RangeSelector::Month => Some(30),
            RangeSelector::Quarter => Some(90),
            RangeSelector::Year => Some(365),
            RangeSelector::All => None,
        }
    }

    /// Fixed selector → granularity table.
    pub fn granularity(self) -> Granularity {
        match self {
            RangeSelector::Day => Granularity::SubDay,
            RangeSelector::Week | RangeSelector::Month | RangeSelector::Quarter => Granularity::Day,
            RangeSelector::Year | RangeSelector::All => Granularity::Month,
        }
    }
}

/// Bucketing resolution for the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    SubDay,
    Day,
    Month,
}

/// The inclusive time window a render pass aggregates over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeWindow {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub granularity: Granularity,
}

impl RangeWindow {
    /// Resolve the window for a selector at a reference instant.
    ///
    /// `now` is injected so window computation stays deterministic under
    /// test; the end of the window is always `now` (no future data).
    ///
    /// All-time anchors the start at UTC midnight of the earliest entry not
    /// later than `now`. An empty snapshot falls back to the last seven days
    /// at day granularity for every selector, so an empty chart still has
    /// sensible bounds.
    pub fn resolve(selector: RangeSelector, now: OffsetDateTime, entries: &[MoodEntry]) -> Self {
        if entries.is_empty() {
            return Self::fallback(now);
        }
        match selector.days() {
            Some(days) => RangeWindow {
                start: bucket::align_to_midnight(now - Duration::days(days)),
                end: now,
                granularity: selector.granularity(),
            },
            None => {
                let earliest = entries
                    .iter()
                    .filter_map(|entry| bucket::parse_instant(&entry.timestamp))
                    .filter(|ts| *ts <= now)
                    .min();
                match earliest {
                    Some(first) => RangeWindow {
                        start: bucket::align_to_midnight(first),
                        end: now,
                        granularity: selector.granularity(),
                    },
                    None => Self::fallback(now),
                }
            }
        }
    }

    /// Empty-data fallback: the last seven days at day granularity.
    pub fn fallback(now: OffsetDateTime) -> Self {
        RangeWindow {
            start: bucket::align_to_midnight(now - Duration::days(7)),
            end: now,
            granularity: Granularity::Day,
        }
    }

    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}
