use dioxus::prelude::*;

use api::BoardRef;

use crate::chart::BoardFilter;
use crate::core::storage;
use crate::t;

/// Visible boards with show/hide toggles. Toggles update the shared
/// [`BoardFilter`] signal and persist the selection; the chart page's entry
/// fetch tracks the signal and refreshes itself.
#[component]
pub fn BoardsTable(boards: Vec<BoardRef>, filter: Signal<BoardFilter>) -> Element {
    let mut filter = filter;

    if boards.is_empty() {
        return rsx! {
            p { class: "chart-card__placeholder", {t!("boards-none")} }
        };
    }

    let visible_ids: Vec<String> = boards.iter().map(|b| b.id.clone()).collect();

    rsx! {
        table { class: "boards-table",
            thead {
                tr {
                    th { {t!("boards-author")} }
                    th { {t!("boards-board")} }
                    th { {t!("boards-show")} }
                }
            }
            tbody {
                for board in boards.iter() {
                    tr {
                        td { "{owner_label(board)}" }
                        td { "{board.title}" }
                        td {
                            input {
                                r#type: "checkbox",
                                checked: filter().is_selected(&board.id),
                                oninput: {
                                    let id = board.id.clone();
                                    let visible_ids = visible_ids.clone();
                                    move |evt: FormEvent| {
                                        let mut next = filter();
                                        next.set(&id, evt.checked(), &visible_ids);
                                        storage::save_boards(&next.selected);
                                        filter.set(next);
                                    }
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}

fn owner_label(board: &BoardRef) -> String {
    if let Some(username) = board
        .owner_admin_username
        .as_deref()
        .filter(|u| !u.is_empty())
    {
        return username.to_string();
    }
    if let Some(id) = board.owner_telegram_id {
        return format!("tg:{id}");
    }
    t!("author-unknown")
}
