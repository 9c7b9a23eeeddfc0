//! Series construction: from a flat entry snapshot to per-author datasets.
//!
//! One render pass is a pure function of `(entries, selector, now)`. Entries
//! are partitioned by author in first-seen order, bucketed with the shared
//! key function, and averaged per bucket; nothing is cached between passes,
//! so a new selector fully supersedes the previous model.

use std::collections::{BTreeMap, HashMap};

use time::OffsetDateTime;

use api::{EntryMeta, MoodEntry};

use crate::core::author;
use crate::core::bucket::{self, BucketKey};
use crate::core::range::{RangeSelector, RangeWindow};

/// One plotted point: bucket average at the bucket's representative instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: OffsetDateTime,
    pub y: f64,
    pub bucket: BucketKey,
}

/// One author's series, ready for the chart surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Author group key (chat id or the synthetic unknown key).
    pub author: String,
    pub label: String,
    pub color: &'static str,
    pub points: Vec<SeriesPoint>,
}

/// Everything one render pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub window: RangeWindow,
    pub datasets: Vec<Dataset>,
}

#[derive(Default)]
struct Accum {
    sum: f64,
    count: u32,
}

struct AuthorGroup {
    meta: Option<EntryMeta>,
    buckets: BTreeMap<BucketKey, Accum>,
}

impl ChartModel {
    /// Build the chart model for one render pass.
    ///
    /// `unknown_label` is the (localized) placeholder for the synthetic
    /// author group; label resolution otherwise follows the metadata of the
    /// group's first entry. Entries with unparseable timestamps are skipped
    /// so one bad record cannot blank the chart.
    pub fn build(
        entries: &[MoodEntry],
        selector: RangeSelector,
        now: OffsetDateTime,
        unknown_label: &str,
    ) -> Self {
        let window = RangeWindow::resolve(selector, now, entries);

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, AuthorGroup> = HashMap::new();

        for entry in entries {
            let Some(ts) = bucket::parse_instant(&entry.timestamp) else {
                continue;
            };
            if !window.contains(ts) {
                continue;
            }

            let key = author::key(entry.meta.as_ref());
            let group = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                AuthorGroup {
                    meta: entry.meta.clone(),
                    buckets: BTreeMap::new(),
                }
            });

            let acc = group
                .buckets
                .entry(bucket::bucket_key(ts, window.granularity))
                .or_default();
            acc.sum += entry.value;
            acc.count += 1;
        }

        let datasets = order
            .iter()
            .enumerate()
            .filter_map(|(index, key)| {
                let group = groups.remove(key)?;
                let points = group
                    .buckets
                    .into_iter()
                    .map(|(bucket, acc)| SeriesPoint {
                        x: bucket.instant(),
                        y: acc.sum / f64::from(acc.count),
                        bucket,
                    })
                    .collect();
                Some(Dataset {
                    author: key.clone(),
                    label: author::display_label(group.meta.as_ref(), unknown_label),
                    color: author::color_for(index),
                    points,
                })
            })
            .collect();

        ChartModel { window, datasets }
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::Granularity;
    use time::macros::datetime;

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
    fn same_day_entries_average_into_one_bucket() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 50.0, Some(1)),
            entry("2024-03-08T15:00:00Z", -30.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        assert_eq!(model.datasets.len(), 1);
        let points = &model.datasets[0].points;
        assert_eq!(points.len(), 1);
        assert!((points[0].y - 10.0).abs() < 1e-9);
        assert_eq!(points[0].bucket.canonical(), "2024-03-08");
    }

    #[test]
    fn shuffled_input_builds_the_same_model() {
        let entries = vec![
            entry("2024-03-04T10:00:00Z", 20.0, Some(1)),
            entry("2024-03-08T09:00:00Z", 50.0, Some(1)),
            entry("2024-03-08T15:00:00Z", -30.0, Some(1)),
            entry("2024-03-06T12:00:00Z", -80.0, Some(1)),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();

        let a = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let b = ChartModel::build(&reversed, RangeSelector::Week, NOW, "unknown");
        assert_eq!(a, b);
    }

    #[test]
    fn building_twice_is_idempotent() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 50.0, Some(1)),
            entry("2024-03-05T09:00:00Z", -10.0, Some(2)),
        ];
        let a = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let b = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        assert_eq!(a, b);
    }

    #[test]
    fn authors_keep_first_seen_order_and_palette_position() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 10.0, Some(7)),
            entry("2024-03-07T09:00:00Z", 20.0, Some(3)),
            entry("2024-03-06T09:00:00Z", 30.0, Some(7)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        assert_eq!(model.datasets.len(), 2);
        assert_eq!(model.datasets[0].author, "7");
        assert_eq!(model.datasets[0].color, author::PALETTE[0]);
        assert_eq!(model.datasets[1].author, "3");
        assert_eq!(model.datasets[1].color, author::PALETTE[1]);
    }

    #[test]
    fn points_are_sorted_ascending_by_x() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 1.0, Some(1)),
            entry("2024-03-04T09:00:00Z", 2.0, Some(1)),
            entry("2024-03-06T09:00:00Z", 3.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        let xs: Vec<_> = model.datasets[0].points.iter().map(|p| p.x).collect();
        let mut sorted = xs.clone();
        sorted.sort();
        assert_eq!(xs, sorted);
    }

    #[test]
    fn entries_without_identity_collapse_into_one_unknown_series() {
        let entries = vec![
            entry("2024-03-08T09:00:00Z", 40.0, None),
            entry("2024-03-08T10:00:00Z", -40.0, None),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "неизвестно");
        assert_eq!(model.datasets.len(), 1);
        assert_eq!(model.datasets[0].author, author::UNKNOWN_KEY);
        assert_eq!(model.datasets[0].label, "неизвестно");
        assert_eq!(model.datasets[0].points.len(), 1);
        assert!((model.datasets[0].points[0].y).abs() < 1e-9);
    }

    #[test]
    fn malformed_timestamps_are_skipped_not_fatal() {
        let entries = vec![
            entry("garbage", 99.0, Some(1)),
            entry("2024-03-08T09:00:00Z", 12.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        assert_eq!(model.datasets.len(), 1);
        assert_eq!(model.datasets[0].points.len(), 1);
        assert!((model.datasets[0].points[0].y - 12.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_window_entries_are_excluded() {
        let entries = vec![
            entry("2024-02-01T09:00:00Z", 50.0, Some(1)),
            entry("2024-03-11T09:00:00Z", 50.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Week, NOW, "unknown");
        assert!(model.is_empty());
        // Window still reflects the selector, not the fallback.
        assert_eq!(model.window.start, datetime!(2024-03-03 00:00:00 UTC));
    }

    #[test]
    fn empty_input_yields_empty_datasets_and_fallback_window() {
        let model = ChartModel::build(&[], RangeSelector::Year, NOW, "unknown");
        assert!(model.is_empty());
        assert_eq!(model.window.start, datetime!(2024-03-03 00:00:00 UTC));
        assert_eq!(model.window.end, NOW);
    }

    #[test]
    fn sub_day_buckets_aggregate_only_timestamp_equal_entries() {
        let entries = vec![
            entry("2024-03-10T09:00:00Z", 10.0, Some(1)),
            entry("2024-03-10T09:00:00Z", 30.0, Some(1)),
            entry("2024-03-10T11:00:00Z", 50.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Day, NOW, "unknown");
        assert_eq!(model.window.granularity, Granularity::SubDay);
        let points = &model.datasets[0].points;
        assert_eq!(points.len(), 2);
        assert!((points[0].y - 20.0).abs() < 1e-9);
        assert!((points[1].y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn year_selector_buckets_by_month() {
        let entries = vec![
            entry("2023-06-10T09:00:00Z", 10.0, Some(1)),
            entry("2023-06-20T09:00:00Z", 30.0, Some(1)),
            entry("2024-01-05T09:00:00Z", -40.0, Some(1)),
        ];
        let model = ChartModel::build(&entries, RangeSelector::Year, NOW, "unknown");
        let points = &model.datasets[0].points;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].bucket.canonical(), "2023-06");
        assert!((points[0].y - 20.0).abs() < 1e-9);
        assert_eq!(points[1].bucket.canonical(), "2024-01");
    }
}
