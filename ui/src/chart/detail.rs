use dioxus::prelude::*;

use api::MoodEntry;

use crate::chart::{media_sources, note_parts, timestamp_label, value_badge_color, MediaKind};
use crate::core::{author, drilldown::DrillDown, format};
use crate::t;

/// The entries behind the clicked chart point, across all authors.
#[component]
pub fn EntriesPanel(drill: Option<DrillDown>) -> Element {
    rsx! {
        section { class: "chart-card entries-panel",
            div { class: "chart-card__header",
                match &drill {
                    Some(drill) => rsx! { h2 { {t!("entries-for")} " {drill.title}" } },
                    None => rsx! { h2 { {t!("entries-for")} " …" } },
                }
            }

            match drill {
                Some(drill) if drill.entries.is_empty() => rsx! {
                    p { class: "chart-card__placeholder", {t!("entries-none")} }
                },
                Some(drill) => rsx! {
                    div { class: "entries-panel__list",
                        for entry in drill.entries.iter() {
                            {render_entry(entry)}
                        }
                    }
                },
                None => rsx! {
                    p { class: "chart-card__placeholder", {t!("entries-hint")} }
                },
            }
        }
    }
}

fn render_entry(entry: &MoodEntry) -> Element {
    let badge_color = value_badge_color(entry.value);
    let badge = format::value_label(entry.value);
    let (title, body) = note_parts(entry);
    let author = author::display_label(entry.meta.as_ref(), &t!("author-unknown"));
    let stamp = timestamp_label(entry);
    let media = media_sources(entry.meta.as_ref());

    rsx! {
        div { class: "entry",
            div {
                class: "entry__badge",
                style: "background: {badge_color}",
                "{badge}"
            }
            div { class: "entry__content",
                if let Some(title) = title {
                    div { class: "entry__title", "{title}" }
                }
                if let Some(body) = body {
                    div { class: "entry__body", "{body}" }
                }
                for source in media {
                    div { class: "entry__media",
                        match source.kind {
                            MediaKind::Photo => rsx! {
                                img { src: "{source.url}", alt: "photo" }
                            },
                            MediaKind::Animation => rsx! {
                                video { src: "{source.url}", autoplay: true, r#loop: true, muted: true, playsinline: true }
                            },
                            MediaKind::Video => rsx! {
                                video { src: "{source.url}", controls: true, playsinline: true }
                            },
                            MediaKind::Sticker => rsx! {
                                img { class: "entry__sticker", src: "{source.url}", alt: "sticker" }
                            },
                        }
                    }
                }
                div { class: "entry__meta",
                    span { class: "entry__author", "{author}" }
                    span { class: "entry__date", "{stamp}" }
                }
            }
        }
    }
}
