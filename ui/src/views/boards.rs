use dioxus::prelude::*;

use crate::chart::{BoardFilter, BoardsTable};
use crate::t;

/// The board filter page: which visible boards feed the chart.
#[component]
pub fn Boards() -> Element {
    let filter = use_context::<Signal<BoardFilter>>();
    let boards = use_resource(|| async move { api::fetch_visible_boards().await });

    let body = match boards() {
        None => rsx! {
            p { class: "chart-card__placeholder", {t!("boards-loading")} }
        },
        Some(Err(err)) => {
            eprintln!("[chart] failed to load boards: {err}");
            rsx! {
                p { class: "page__error", {t!("boards-error")} }
            }
        }
        Some(Ok(boards)) => rsx! {
            BoardsTable { boards, filter }
        },
    };

    rsx! {
        section { class: "page page-boards",
            h1 { {t!("boards-title")} }
            p { {t!("boards-intro")} }
            {body}
        }
    }
}
