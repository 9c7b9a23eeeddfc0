use dioxus::prelude::*;
use time::{Date, Duration, OffsetDateTime};

use crate::core::bucket::{self, BucketKey};
use crate::core::fill;
use crate::core::format;
use crate::core::range::{Granularity, RangeSelector, RangeWindow};
use crate::core::series::ChartModel;
use crate::core::storage;
use crate::t;

// Chart geometry in viewBox units; the page CSS scales the svg.
const VIEW_W: f64 = 960.0;
const VIEW_H: f64 = 420.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 32.0;
const Y_MIN: f64 = -100.0;
const Y_MAX: f64 = 100.0;

#[component]
pub fn MoodChart(
    model: ChartModel,
    range: Signal<RangeSelector>,
    selected: Signal<Option<BucketKey>>,
) -> Element {
    let mut range = range;
    let mut selected = selected;

    let window = model.window;
    let domain = projection_domain(&model);
    let y_zero = project_y(0.0);

    let mut fills: Vec<FillShape> = Vec::new();
    let mut lines: Vec<LineShape> = Vec::new();
    let mut markers: Vec<Marker> = Vec::new();

    for dataset in &model.datasets {
        let mut line_points = String::new();
        for point in &dataset.points {
            let x = project_x(domain, bucket::unix_ms(point.x));
            let y = project_y(point.y);
            if !line_points.is_empty() {
                line_points.push(' ');
            }
            line_points.push_str(&format!("{x:.1},{y:.1}"));
            markers.push(Marker {
                cx: x,
                cy: y,
                color: dataset.color,
                bucket: point.bucket,
                tip: format!("{}: {}", dataset.label, format::value_label(point.y)),
            });
        }
        lines.push(LineShape {
            points: line_points,
            color: dataset.color,
        });

        for pair in dataset.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for seg in fill::segments(
                bucket::unix_ms(a.x),
                Some(a.y),
                bucket::unix_ms(b.x),
                Some(b.y),
            ) {
                let x_from = project_x(domain, seg.x_from);
                let x_to = project_x(domain, seg.x_to);
                fills.push(FillShape {
                    points: format!(
                        "{x_from:.1},{:.1} {x_to:.1},{:.1} {x_to:.1},{y_zero:.1} {x_from:.1},{y_zero:.1}",
                        project_y(seg.y_from),
                        project_y(seg.y_to),
                    ),
                    color: seg.polarity.color(),
                });
            }
        }
    }

    let x_ticks: Vec<(f64, String)> = axis_ticks(&window)
        .into_iter()
        .map(|(ts, label)| (project_x(domain, bucket::unix_ms(ts)), label))
        .collect();
    let y_ticks: Vec<(f64, String, &'static str)> = [-100.0, -50.0, 0.0, 50.0, 100.0]
        .into_iter()
        .map(|value| {
            let class = if value == 0.0 {
                "mood-chart__grid mood-chart__grid--zero"
            } else {
                "mood-chart__grid"
            };
            (project_y(value), format::value_label(value), class)
        })
        .collect();

    let range_value = range().as_str();
    let fill_opacity = fill::FILL_OPACITY;

    let on_range = move |evt: FormEvent| {
        if let Some(next) = RangeSelector::parse(&evt.value()) {
            range.set(next);
            storage::save_range(next.as_str());
        }
    };

    rsx! {
        section { class: "chart-card",
            div { class: "chart-card__header",
                h2 { {t!("home-title")} }
                label { class: "chart-card__range",
                    span { {t!("range-label")} }
                    select {
                        id: "range-select",
                        value: "{range_value}",
                        oninput: on_range,
                        for selector in RangeSelector::ALL {
                            option {
                                value: "{selector.as_str()}",
                                selected: selector == range(),
                                "{range_option_label(selector)}"
                            }
                        }
                    }
                }
            }

            svg {
                class: "mood-chart",
                view_box: "0 0 {VIEW_W} {VIEW_H}",

                // Horizontal grid with the zero line emphasized.
                for (y, label, grid_class) in y_ticks {
                    line {
                        class: "{grid_class}",
                        x1: "{MARGIN_LEFT}",
                        y1: "{y}",
                        x2: "{VIEW_W - MARGIN_RIGHT}",
                        y2: "{y}",
                    }
                    text {
                        class: "mood-chart__tick",
                        x: "{MARGIN_LEFT - 8.0}",
                        y: "{y + 4.0}",
                        text_anchor: "end",
                        "{label}"
                    }
                }

                for (x, label) in x_ticks {
                    line {
                        class: "mood-chart__grid",
                        x1: "{x}",
                        y1: "{MARGIN_TOP}",
                        x2: "{x}",
                        y2: "{VIEW_H - MARGIN_BOTTOM}",
                    }
                    text {
                        class: "mood-chart__tick",
                        x: "{x}",
                        y: "{VIEW_H - MARGIN_BOTTOM + 18.0}",
                        text_anchor: "middle",
                        "{label}"
                    }
                }

                // Signed-area fills go under the lines.
                for shape in fills {
                    polygon {
                        points: "{shape.points}",
                        fill: "{shape.color}",
                        fill_opacity: "{fill_opacity}",
                    }
                }

                for series_line in lines {
                    polyline {
                        points: "{series_line.points}",
                        fill: "none",
                        stroke: "{series_line.color}",
                        stroke_width: "2",
                    }
                }

                for marker in markers {
                    circle {
                        class: "mood-chart__point",
                        cx: "{marker.cx}",
                        cy: "{marker.cy}",
                        r: "4",
                        fill: "{marker.color}",
                        onclick: {
                            let bucket = marker.bucket;
                            move |_| selected.set(Some(bucket))
                        },
                        title { "{marker.tip}" }
                    }
                }
            }

            if model.datasets.is_empty() {
                p { class: "chart-card__placeholder", {t!("chart-empty")} }
            } else {
                div { class: "chart-card__legend",
                    for dataset in &model.datasets {
                        span { class: "chart-card__legend-item",
                            span {
                                class: "chart-card__legend-dot",
                                style: "background: {dataset.color}",
                            }
                            "{dataset.label}"
                        }
                    }
                }
            }
        }
    }
}

struct FillShape {
    points: String,
    color: &'static str,
}

struct LineShape {
    points: String,
    color: &'static str,
}

struct Marker {
    cx: f64,
    cy: f64,
    color: &'static str,
    bucket: BucketKey,
    tip: String,
}

fn range_option_label(selector: RangeSelector) -> String {
    match selector {
        RangeSelector::Day => t!("range-day"),
        RangeSelector::Week => t!("range-week"),
        RangeSelector::Month => t!("range-month"),
        RangeSelector::Quarter => t!("range-quarter"),
        RangeSelector::Year => t!("range-year"),
        RangeSelector::All => t!("range-all"),
    }
}

/// Projection domain in epoch milliseconds. Month buckets plot at the first
/// of the month, which can precede the window start for a partial first
/// month, so the domain stretches left to the earliest plotted point.
fn projection_domain(model: &ChartModel) -> (f64, f64) {
    let mut start = bucket::unix_ms(model.window.start);
    for dataset in &model.datasets {
        if let Some(first) = dataset.points.first() {
            start = start.min(bucket::unix_ms(first.x));
        }
    }
    (start, bucket::unix_ms(model.window.end))
}

fn project_x(domain: (f64, f64), ms: f64) -> f64 {
    let span = (domain.1 - domain.0).max(1.0);
    MARGIN_LEFT + (ms - domain.0) / span * (VIEW_W - MARGIN_LEFT - MARGIN_RIGHT)
}

fn project_y(value: f64) -> f64 {
    let clamped = value.clamp(Y_MIN, Y_MAX);
    let plot_h = VIEW_H - MARGIN_TOP - MARGIN_BOTTOM;
    MARGIN_TOP + (Y_MAX - clamped) / (Y_MAX - Y_MIN) * plot_h
}

/// Tick instants for the x axis, derived from the same window alignment the
/// bucket keys use: hour marks for sub-day, day starts for day granularity,
/// month starts for month granularity.
fn axis_ticks(window: &RangeWindow) -> Vec<(OffsetDateTime, String)> {
    let mut ticks = Vec::new();
    match window.granularity {
        Granularity::SubDay => {
            let mut ts = window.start;
            while ts <= window.end {
                ticks.push((ts, format::time_label(ts)));
                ts += Duration::hours(3);
            }
        }
        Granularity::Day => {
            let days = (window.end.date() - window.start.date()).whole_days() + 1;
            let step = ((days + 9) / 10).max(1);
            let mut date = window.start.date();
            while date <= window.end.date() {
                let ts = date.midnight().assume_utc();
                ticks.push((ts, format::short_date(ts)));
                date = date + Duration::days(step);
            }
        }
        Granularity::Month => {
            let mut starts = Vec::new();
            let mut date = window
                .start
                .date()
                .replace_day(1)
                .unwrap_or(window.start.date());
            loop {
                let ts = date.midnight().assume_utc();
                if ts > window.end {
                    break;
                }
                starts.push(ts);
                date = next_month(date);
            }
            let step = ((starts.len() + 11) / 12).max(1);
            for ts in starts.into_iter().step_by(step) {
                ticks.push((ts, format::short_date(ts)));
            }
        }
    }
    ticks
}

fn next_month(date: Date) -> Date {
    let (year, month) = if date.month() as u8 == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() as u8 + 1)
    };
    Date::from_calendar_date(
        year,
        time::Month::try_from(month).unwrap_or(time::Month::January),
        1,
    )
    .unwrap_or(date)
}
