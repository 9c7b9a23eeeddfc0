//! Drill-down from a clicked chart point back to the raw entries behind it.
//!
//! The resolver recomputes the shared bucket key for every candidate entry;
//! the returned set re-averages to the clicked point's `y`, which is how the
//! detail panel stays truthful to the chart. A bucket identifies a time
//! window, not an author, so matches are collected across all series.

use api::MoodEntry;

use crate::core::bucket::{self, BucketKey};
use crate::core::range::RangeWindow;

/// The entries behind one clicked bucket, plus a display title for the
/// detail panel header.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDown {
    pub bucket: BucketKey,
    pub title: String,
    pub entries: Vec<MoodEntry>,
}

/// Resolve a clicked bucket to its raw entries.
///
/// Matching is restricted to the active window so the result is exactly the
/// set the series builder aggregated. A stale key (range switched between
/// render and click) simply matches nothing: the title still resolves and
/// the entry list comes back empty.
pub fn resolve(clicked: BucketKey, window: &RangeWindow, entries: &[MoodEntry]) -> DrillDown {
    let mut matched: Vec<(time::OffsetDateTime, MoodEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let ts = bucket::parse_instant(&entry.timestamp)?;
            if !window.contains(ts) {
                return None;
            }
            (bucket::bucket_key(ts, window.granularity) == clicked).then(|| (ts, entry.clone()))
        })
        .collect();
    matched.sort_by_key(|(ts, _)| *ts);

    DrillDown {
        bucket: clicked,
        title: clicked.title(),
        entries: matched.into_iter().map(|(_, entry)| entry).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::RangeSelector;
    use crate::core::series::ChartModel;
    use api::EntryMeta;
    use time::macros::datetime;
    use time::OffsetDateTime;

    const NOW: OffsetDateTime = datetime!(2024-03-10 12:00:00 UTC);

    fn entry(ts: &str, value: f64, chat_id: Option<i64>) -> MoodEntry {
        MoodEntry {
            timestamp: ts.to_string(),
            value,
            meta: chat_id.map(|id| EntryMeta {
                chat_id: Some(id),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn day_bucket_round_trips_to_the_plotted_mean() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 50.0, Some(1)),
            entry("2024-03-08T15:00:00Z", -30.0, Some(1)),
            entry("2024-03-07T15:00:00Z", 70.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let point = model.datasets[0]
            .points
            .iter()
            .find(|p| p.bucket.canonical() == "2024-03-08")
            .copied()
            .unwrap();

        let drill = resolve(point.bucket, &model.window, &entries);
        assert_eq!(drill.entries.len(), 2);
        let mean =
            drill.entries.iter().map(|e| e.value).sum::<f64>() / drill.entries.len() as f64;
        assert!((mean - point.y).abs() < 1e-9);
    }

    #[test]
    fn buckets_collect_entries_across_authors() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 10.0, Some(1)),
            entry("2024-03-08T10:00:00Z", 20.0, Some(2)),
            entry("2024-03-08T11:00:00Z", 30.0, None),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let point = model.datasets[0].points[0];
        let drill = resolve(point.bucket, &model.window, &entries);
        assert_eq!(drill.entries.len(), 3);
        assert_eq!(drill.title, "08.03.2024");
    }

    #[test]
    fn sub_day_matching_is_instant_exact() {
        let entries = vec![
            entry("2024-03-10T09:00:00Z", 10.0, Some(1)),
            entry("2024-03-10T09:00:00Z", 30.0, Some(2)),
            entry("2024-03-10T09:00:01Z", 99.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Day, NOW, "unknown");
        let point = model.datasets[0].points[0];
        let drill = resolve(point.bucket, &model.window, &entries);
        assert_eq!(drill.entries.len(), 2);
        assert_eq!(drill.title, "09:00 10.03.2024");
    }

    #[test]
    fn entries_outside_the_window_never_match_their_bucket() {
        // Same calendar day as the bucket, but after `now`.
        let entries = vec![
            entry("2024-03-10T09:00:00Z", 10.0, Some(1)),
            entry("2024-03-10T13:00:00Z", 90.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let point = model.datasets[0].points[0];
        let drill = resolve(point.bucket, &model.window, &entries);
        assert_eq!(drill.entries.len(), 1);
        assert!((drill.entries[0].value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn stale_key_resolves_to_an_empty_list_with_a_title() {
        let entries = vec![entry("2024-03-08T09:00:00Z", 10.0, Some(1))];
        // Bucket from a day-granularity render, resolved after switching to
        // a month-granularity window.
        let day_model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let clicked = day_model.datasets[0].points[0].bucket;
        let month_model = ChartModel::build(&entries, RangeSelector::Year, NOW, "unknown");

        let drill = resolve(clicked, &month_model.window, &entries);
        assert!(drill.entries.is_empty());
        assert_eq!(drill.title, "08.03.2024");
    }

    #[test]
    fn drill_entries_come_back_in_timestamp_order() {
        let entries = vec![
            entry("2024-03-08T15:00:00Z", 2.0, Some(1)),
            entry("2024-03-08T09:00:00Z", 1.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let drill = resolve(model.datasets[0].points[0].bucket, &model.window, &entries);
        assert!((drill.entries[0].value - 1.0).abs() < 1e-9);
        assert!((drill.entries[1].value - 2.0).abs() < 1e-9);
    }
}
