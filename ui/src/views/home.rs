use dioxus::prelude::*;

use time::OffsetDateTime;

use crate::chart::{BoardFilter, ChartState, EntriesPanel, MoodChart};
use crate::core::bucket::BucketKey;
use crate::core::drilldown;
use crate::core::range::RangeSelector;
use crate::core::series::ChartModel;
use crate::core::storage;
use crate::t;

#[cfg(debug_assertions)]
fn log_home_render(lang: &str) {
    // Lightweight render trace for diagnosing i18n refresh issues.
    println!("[chart] Home render (lang_marker={lang})");
}

/// The chart page: period picker, mood chart, and the drill-down panel for
/// the clicked point.
#[component]
pub fn Home() -> Element {
    // Subscribe to global language code (if provided) so we re-render on change.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_current = _lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());

    #[cfg(debug_assertions)]
    {
        log_home_render(&_lang_current);
    }

    let filter = use_context::<Signal<BoardFilter>>();
    let range = use_signal(|| {
        storage::load_prefs()
            .range
            .as_deref()
            .and_then(RangeSelector::parse)
            .unwrap_or(RangeSelector::Day)
    });
    let selected: Signal<Option<BucketKey>> = use_signal(|| None);

    // Refetches whenever the board filter changes.
    let entries = use_resource(move || {
        let boards = filter().selected;
        async move { api::fetch_visible_entries(boards).await }
    });

    let state = match entries() {
        None => None,
        Some(Ok(list)) => Some(ChartState::loaded(list)),
        Some(Err(err)) => Some(ChartState::failed(err.to_string())),
    };

    let body = match state {
        None => rsx! {
            p { class: "chart-card__placeholder", {t!("chart-loading")} }
        },
        Some(state) => {
            let now = OffsetDateTime::now_utc();
            let model = ChartModel::build(&state.entries, range(), now, &t!("author-unknown"));
            let drill =
                selected().map(|bucket| drilldown::resolve(bucket, &model.window, &state.entries));
            rsx! {
                if let Some(error) = state.error {
                    p { class: "page__error", {t!("chart-error")} ": {error}" }
                }
                MoodChart { model, range, selected }
                EntriesPanel { drill }
            }
        }
    };

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            {body}
        }
    }
}
