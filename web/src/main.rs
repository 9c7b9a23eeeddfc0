use dioxus::prelude::*;

use ui::chart::BoardFilter;
use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::storage;
use ui::views::{Boards, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/boards")]
    Boards {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_chart(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_boards(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Boards {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Register localized navigation builder
    register_nav(NavBuilder {
        chart: nav_chart,
        boards: nav_boards,
    });

    // Global reactive language code signal; AppNavbar updates it via context
    // on language selection so routed views re-render localized copy.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    // Board filter shared by the chart page and the boards page, seeded from
    // the persisted viewer preferences.
    let board_filter = use_signal(|| BoardFilter::from_saved(storage::load_prefs().boards));
    use_context_provider(|| board_filter);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `Navbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
