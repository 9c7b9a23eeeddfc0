//! Supplier seam between the Moodtide UI and its host backend.
//!
//! The aggregation pipeline never talks to storage, sessions, or the chat
//! bot directly; it consumes a flat, pre-authorized snapshot of mood entries
//! delivered through the two server functions below. The server side reads
//! the snapshot from a JSON file (path in `MOODTIDE_SNAPSHOT`, default
//! `data/moods.json`) that the host deployment keeps up to date; swapping in
//! a real database gateway only means replacing `load_snapshot`.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

/// One mood entry as supplied by the entry store.
///
/// `timestamp` is an ISO-8601 string with at least day precision. Entries
/// arrive already filtered to the viewer's visible boards and are not
/// guaranteed to be sorted.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub timestamp: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, rename = "boardId", skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<EntryMeta>,
}

/// Chat-side metadata captured when the entry was recorded.
///
/// Everything here is optional; the pipeline only reads `chat_id` (author
/// identity) and the name fields (display label). Media refs pass through
/// untouched for the detail panel.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMeta {
    #[serde(default, rename = "chatId", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, rename = "titleProvided", skip_serializing_if = "Option::is_none")]
    pub title_provided: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<MediaRef>,
}

/// Opaque handle to a media object held by the host's media proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub file_id: String,
}

/// A board the viewer may display on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRef {
    pub id: String,
    pub title: String,
    #[serde(
        default,
        rename = "ownerAdminUsername",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_admin_username: Option<String>,
    #[serde(
        default,
        rename = "ownerTelegramId",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_telegram_id: Option<i64>,
}

#[cfg(feature = "server")]
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    boards: Vec<BoardRef>,
    #[serde(default)]
    entries: Vec<MoodEntry>,
}

/// Fetch the viewer's visible mood entries, optionally narrowed to a board
/// selection. An empty `boards` list means "all visible boards".
#[server]
pub async fn fetch_visible_entries(boards: Vec<String>) -> Result<Vec<MoodEntry>, ServerFnError> {
    let snapshot = load_snapshot()?;
    if boards.is_empty() {
        return Ok(snapshot.entries);
    }
    let entries = snapshot
        .entries
        .into_iter()
        .filter(|entry| {
            entry
                .board_id
                .as_ref()
                .map(|id| boards.iter().any(|b| b == id))
                .unwrap_or(false)
        })
        .collect();
    Ok(entries)
}

/// Fetch the boards visible to the viewer, for the filter panel.
#[server]
pub async fn fetch_visible_boards() -> Result<Vec<BoardRef>, ServerFnError> {
    Ok(load_snapshot()?.boards)
}

#[cfg(feature = "server")]
fn load_snapshot() -> Result<Snapshot, ServerFnError> {
    let path =
        std::env::var("MOODTIDE_SNAPSHOT").unwrap_or_else(|_| "data/moods.json".to_string());
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        // A missing snapshot is "nothing recorded yet", not a server fault.
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Snapshot::default()),
        Err(err) => return Err(ServerFnError::new(format!("read {path}: {err}"))),
    };
    serde_json::from_str(&raw).map_err(|err| ServerFnError::new(format!("decode {path}: {err}")))
}
