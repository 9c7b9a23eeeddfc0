use api::{EntryMeta, MoodEntry};
use time::OffsetDateTime;

use crate::core::{bucket, format};

pub(crate) fn parse_timestamp(entry: &MoodEntry) -> Option<OffsetDateTime> {
    bucket::parse_instant(&entry.timestamp)
}

/// Timestamp line for the entry footer; falls back to the raw string when
/// the stamp doesn't parse (the entry was still worth listing).
pub(crate) fn timestamp_label(entry: &MoodEntry) -> String {
    parse_timestamp(entry)
        .map(format::full_date_time)
        .unwrap_or_else(|| entry.timestamp.clone())
}

/// Split a note into title and body.
///
/// The first line is a title only when the author actually provided one
/// (`titleProvided`, defaulting to true for entries recorded before the
/// flag existed).
pub(crate) fn note_parts(entry: &MoodEntry) -> (Option<String>, Option<String>) {
    let Some(note) = entry.note.as_deref().filter(|n| !n.is_empty()) else {
        return (None, None);
    };
    let title_provided = entry
        .meta
        .as_ref()
        .and_then(|m| m.title_provided)
        .unwrap_or(true);
    if !title_provided {
        return (None, Some(note.to_string()));
    }

    let mut lines = note.split('\n');
    let title = lines.next().unwrap_or_default().to_string();
    let rest = lines.collect::<Vec<_>>().join("\n");
    (
        (!title.is_empty()).then_some(title),
        (!rest.is_empty()).then_some(rest),
    )
}

/// Badge color thresholds for a single entry value.
pub(crate) fn value_badge_color(value: f64) -> &'static str {
    if value <= -20.0 {
        "#ef4444"
    } else if value >= 21.0 {
        "#22c55e"
    } else {
        "#94a3b8"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Photo,
    Animation,
    Video,
    Sticker,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MediaSource {
    pub kind: MediaKind,
    pub url: String,
}

/// Media attachments as same-origin proxy URLs, in display order. The
/// proxy itself is the host application's concern.
pub(crate) fn media_sources(meta: Option<&EntryMeta>) -> Vec<MediaSource> {
    let Some(meta) = meta else {
        return Vec::new();
    };
    let mut sources = Vec::new();
    let mut push = |kind: MediaKind, slug: &str, file_id: &Option<api::MediaRef>| {
        if let Some(media) = file_id {
            sources.push(MediaSource {
                kind,
                url: format!("/api/media/{slug}/{}", media.file_id),
            });
        }
    };
    push(MediaKind::Photo, "photo", &meta.photo);
    push(MediaKind::Animation, "animation", &meta.animation);
    push(MediaKind::Video, "video", &meta.video);
    push(MediaKind::Sticker, "sticker", &meta.sticker);
    sources
}
