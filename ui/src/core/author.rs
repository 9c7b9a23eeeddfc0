//! Author identity and presentation for chart series.
//!
//! Entries are grouped by the chat id carried in their metadata; entries
//! without one collapse into a single synthetic "unknown" author so they
//! are never dropped from the chart. Colors are a per-render enumeration
//! index into a fixed palette, not a persisted identity map.

use api::EntryMeta;

/// Group key for entries with no identifiable author.
pub const UNKNOWN_KEY: &str = "unknown";

/// Line palette, cycled by first-seen author order within one render.
pub const PALETTE: [&str; 6] = [
    "#60a5fa", "#f97316", "#22c55e", "#ec4899", "#a855f7", "#eab308",
];

/// Grouping key for an entry's author.
pub fn key(meta: Option<&EntryMeta>) -> String {
    meta.and_then(|m| m.chat_id)
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_KEY.to_string())
}

/// Display label for an author group.
///
/// Preference order: handle, composed first/last name, `user {id}`, then
/// the caller-supplied (localized) unknown placeholder.
pub fn display_label(meta: Option<&EntryMeta>, unknown_label: &str) -> String {
    if let Some(meta) = meta {
        if let Some(username) = meta.username.as_deref() {
            let username = username.trim();
            if !username.is_empty() {
                return username.to_string();
            }
        }
        let full_name = [meta.first_name.as_deref(), meta.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full_name.is_empty() {
            return full_name;
        }
        if let Some(id) = meta.chat_id {
            return format!("user {id}");
        }
    }
    unknown_label.to_string()
}

/// Palette color for the author at a first-seen index.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_wins_over_name_fields() {
        let meta = EntryMeta {
            chat_id: Some(12345),
            username: Some("emma".into()),
            first_name: Some("Emma".into()),
            last_name: Some("R".into()),
            ..Default::default()
        };
        assert_eq!(display_label(Some(&meta), "unknown"), "emma");
    }

    #[test]
    fn composed_name_when_no_handle() {
        let meta = EntryMeta {
            chat_id: Some(12345),
            first_name: Some("Emma".into()),
            last_name: Some("R".into()),
            ..Default::default()
        };
        assert_eq!(display_label(Some(&meta), "unknown"), "Emma R");
    }

    #[test]
    fn numeric_fallback_when_only_an_id_is_known() {
        let meta = EntryMeta {
            chat_id: Some(12345),
            ..Default::default()
        };
        assert_eq!(display_label(Some(&meta), "unknown"), "user 12345");
    }

    #[test]
    fn unknown_placeholder_when_nothing_is_known() {
        assert_eq!(display_label(None, "unknown"), "unknown");
        let meta = EntryMeta::default();
        assert_eq!(display_label(Some(&meta), "неизвестно"), "неизвестно");
    }

    #[test]
    fn blank_name_fields_do_not_count() {
        let meta = EntryMeta {
            username: Some("   ".into()),
            first_name: Some("".into()),
            ..Default::default()
        };
        assert_eq!(display_label(Some(&meta), "unknown"), "unknown");
    }

    #[test]
    fn grouping_key_falls_back_to_the_synthetic_author() {
        assert_eq!(key(None), UNKNOWN_KEY);
        let meta = EntryMeta {
            chat_id: Some(77),
            ..Default::default()
        };
        assert_eq!(key(Some(&meta)), "77");
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(color_for(0), PALETTE[0]);
        assert_eq!(color_for(PALETTE.len()), PALETTE[0]);
        assert_eq!(color_for(PALETTE.len() + 2), PALETTE[2]);
    }
}
