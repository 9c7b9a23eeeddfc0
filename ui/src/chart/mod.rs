mod view;
pub use view::MoodChart;

mod detail;
pub use detail::EntriesPanel;

mod boards;
pub use boards::BoardsTable;

mod utils;
pub(crate) use utils::*;

use api::MoodEntry;

/// Shared state for the chart page: the fetched snapshot or a load error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    pub entries: Vec<MoodEntry>,
    pub error: Option<String>,
}

impl ChartState {
    pub fn loaded(entries: Vec<MoodEntry>) -> Self {
        Self {
            entries,
            error: None,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            entries: Vec::new(),
            error: Some(message),
        }
    }
}

/// Which boards feed the chart. An empty selection means "all visible
/// boards", which is also what the supplier treats it as — so a fresh
/// viewer sees everything without a stored preference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardFilter {
    pub selected: Vec<String>,
}

impl BoardFilter {
    pub fn from_saved(saved: Option<Vec<String>>) -> Self {
        Self {
            selected: saved.unwrap_or_default(),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.is_empty() || self.selected.iter().any(|b| b == id)
    }

    /// Toggle one board. `visible` is the full visible-board id list, needed
    /// when leaving the implicit "all" state.
    pub fn set(&mut self, id: &str, shown: bool, visible: &[String]) {
        if self.selected.is_empty() {
            if shown {
                return; // Already implicitly shown.
            }
            self.selected = visible.iter().filter(|b| *b != id).cloned().collect();
            return;
        }

        if shown {
            if !self.selected.iter().any(|b| b == id) {
                self.selected.push(id.to_string());
            }
            // Back to every visible board: collapse to the implicit "all"
            // so boards added later show up automatically.
            if visible.iter().all(|b| self.selected.iter().any(|s| s == b)) {
                self.selected.clear();
            }
        } else {
            self.selected.retain(|b| b != id);
        }
    }
}
