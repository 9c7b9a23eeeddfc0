//! Local persistence for viewer preferences.
//!
//! The selected period and board filter survive reloads via web
//! `localStorage`; native targets (where the core test suite runs) fall
//! back to in-memory defaults. Nothing here touches entry data — the entry
//! snapshot always comes fresh from the supplier.

use serde::{Deserialize, Serialize};

const PREFS_KEY: &str = "moodtide.prefs";

/// Persisted viewer preferences. All fields optional so older blobs keep
/// decoding as the struct grows.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boards: Option<Vec<String>>,
}

/// Load preferences, falling back to defaults on any failure.
pub fn load_prefs() -> ViewerPrefs {
    read_raw()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Persist preferences. Failures are logged and otherwise ignored; losing a
/// preference write never breaks the page.
pub fn save_prefs(prefs: &ViewerPrefs) {
    match serde_json::to_string(prefs) {
        Ok(raw) => write_raw(&raw),
        Err(err) => eprintln!("[prefs] failed to encode preferences: {err}"),
    }
}

/// Update just the stored range selection.
pub fn save_range(range: &str) {
    let mut prefs = load_prefs();
    prefs.range = Some(range.to_string());
    save_prefs(&prefs);
}

/// Update just the stored board selection.
pub fn save_boards(boards: &[String]) {
    let mut prefs = load_prefs();
    prefs.boards = Some(boards.to_vec());
    save_prefs(&prefs);
}

#[cfg(target_arch = "wasm32")]
fn read_raw() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(PREFS_KEY).ok()?
}

#[cfg(target_arch = "wasm32")]
fn write_raw(raw: &str) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    if storage.set_item(PREFS_KEY, raw).is_err() {
        eprintln!("[prefs] localStorage write rejected");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(_raw: &str) {}
