use dioxus::prelude::*;
use floorplan_shared::chart::{ChartData, Dataset};
use floorplan_shared::viewer::Viewer;

use crate::coords;

const CHART_ID: &str = "signal-chart";

// SVG user-space layout
const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 52.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 44.0;
const Y_TICK_STEP: f64 = 10.0;

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// X of category `i` out of `n`. A single category sits in the middle.
fn category_x(i: usize, n: usize) -> f64 {
    if n <= 1 {
        return MARGIN_LEFT + plot_width() / 2.0;
    }
    MARGIN_LEFT + plot_width() * i as f64 / (n - 1) as f64
}

fn value_y(value: f64, (min, max): (f64, f64)) -> f64 {
    let v = value.clamp(min, max);
    MARGIN_TOP + plot_height() * (max - v) / (max - min)
}

/// Nearest category to an x coordinate in SVG space, if any category exists.
pub fn category_at(x: f64, n: usize) -> Option<usize> {
    match n {
        0 => None,
        1 => Some(0),
        _ => {
            let step = plot_width() / (n - 1) as f64;
            let i = ((x - MARGIN_LEFT) / step).round();
            Some(i.clamp(0.0, (n - 1) as f64) as usize)
        }
    }
}

/// Polyline segments for one series. Missing readings break the line.
fn series_segments(dataset: &Dataset, y_range: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
    let n = dataset.values.len();
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (i, value) in dataset.values.iter().enumerate() {
        match value {
            Some(v) => current.push((category_x(i, n), value_y(*v, y_range))),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Escape text for SVG/HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the chart as an SVG document string.
pub fn build_chart_svg(chart: &ChartData) -> String {
    let (min, max) = chart.y_range;
    let n = chart.labels.len();
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" preserveAspectRatio="xMidYMid meet" class="chart-svg">"#
    );

    // Horizontal grid with dBm labels
    let mut tick = (min / Y_TICK_STEP).ceil() * Y_TICK_STEP;
    while tick <= max {
        let y = value_y(tick, chart.y_range);
        svg.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e5e7eb" stroke-width="1"/>"##,
            WIDTH - MARGIN_RIGHT
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="#6b7280">{tick}</text>"##,
            MARGIN_LEFT - 6.0,
            y + 4.0
        ));
        tick += Y_TICK_STEP;
    }

    // Category labels
    for (i, label) in chart.labels.iter().enumerate() {
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="#374151">{}</text>"##,
            category_x(i, n),
            HEIGHT - MARGIN_BOTTOM + 16.0,
            escape(label)
        ));
    }

    for dataset in &chart.datasets {
        for segment in series_segments(dataset, chart.y_range) {
            let points: Vec<String> = segment
                .iter()
                .map(|(x, y)| format!("{x:.1},{y:.1}"))
                .collect();
            svg.push_str(&format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                points.join(" "),
                dataset.color
            ));
            for (x, y) in &segment {
                svg.push_str(&format!(
                    r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{}"/>"#,
                    dataset.color
                ));
            }
        }
    }

    // Legend along the bottom edge
    let mut x = MARGIN_LEFT;
    for dataset in &chart.datasets {
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{:.1}" width="10" height="10" fill="{}"/>"#,
            HEIGHT - 14.0,
            dataset.color
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="11" fill="#374151">{}</text>"##,
            x + 14.0,
            HEIGHT - 5.0,
            escape(&dataset.label)
        ));
        x += 14.0 + 7.0 * dataset.label.chars().count() as f64 + 16.0;
    }

    svg.push_str("</svg>");
    svg
}

#[component]
pub fn ChartView(viewer: Signal<Viewer>) -> Element {
    let Some(chart) = viewer.read().chart() else {
        return rsx! {};
    };
    if chart.is_empty() {
        return rsx! {
            div { class: "chart-empty", "No signal data to compare" }
        };
    }
    let svg = build_chart_svg(&chart);
    let categories = chart.labels.len();

    rsx! {
        div {
            id: CHART_ID,
            class: "chart-container",
            dangerous_inner_html: "{svg}",
            onclick: move |evt: Event<MouseData>| {
                let Some(rect) = coords::element_rect(CHART_ID) else { return };
                if rect.width() <= 0.0 {
                    return;
                }
                let x = evt.element_coordinates().x * WIDTH / rect.width();
                if let Some(category) = category_at(x, categories) {
                    viewer.write().select_chart_category(category);
                }
            },
        }
    }
}
