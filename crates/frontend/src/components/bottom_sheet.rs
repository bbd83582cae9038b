use dioxus::prelude::*;
use floorplan_shared::chart::SignalLevel;
use floorplan_shared::models::{MediaKind, Payload, Point};
use floorplan_shared::selection::Sheet;
use floorplan_shared::viewer::Viewer;

use crate::components::chart_view::ChartView;

/// Heading of the detail sheet for a tapped point.
pub fn detail_heading(point: &Point) -> String {
    match &point.payload {
        Payload::Data { plate, .. } => {
            format!("#{} {}", point.ordinal_label(), plate.as_deref().unwrap_or("Info"))
        }
        Payload::Media(media) => media.label.clone().unwrap_or_else(|| "Media".to_string()),
        Payload::Command => "Note".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    pub name: String,
    pub value: String,
    pub class: String,
}

/// Readings in file order; the first one is emphasised as the main signal.
pub fn signal_rows(point: &Point) -> Vec<SignalRow> {
    let Some(signals) = point.signals() else {
        return Vec::new();
    };
    signals
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let level = SignalLevel::classify(value).css_class();
            SignalRow {
                name: name.to_string(),
                value: format!("{value} dBm"),
                class: if i == 0 {
                    format!("signal-value {level} main-signal")
                } else {
                    format!("signal-value {level}")
                },
            }
        })
        .collect()
}

#[component]
pub fn BottomSheet(viewer: Signal<Viewer>) -> Element {
    let sheet = viewer.read().sheet().clone();
    let open = sheet != Sheet::Closed;
    let title = match &sheet {
        Sheet::Detail(_) => viewer.read().detail_point().map(detail_heading).unwrap_or_default(),
        Sheet::FullChart | Sheet::SelectionChart => viewer.read().chart_heading(),
        Sheet::Closed => String::new(),
    };

    rsx! {
        div {
            class: if open { "bottom-sheet open" } else { "bottom-sheet" },
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),

            div { class: "sheet-header",
                h3 { class: "sheet-title", "{title}" }
                button {
                    class: "close-sheet",
                    title: "Close",
                    onclick: move |_| viewer.write().close_sheet(),
                    "✕"
                }
            }

            div { class: "sheet-body",
                match sheet {
                    Sheet::Detail(_) => rsx! { DetailBody { viewer } },
                    Sheet::FullChart | Sheet::SelectionChart => rsx! { ChartView { viewer } },
                    Sheet::Closed => rsx! {},
                }
            }
        }
    }
}

#[component]
fn DetailBody(viewer: Signal<Viewer>) -> Element {
    let v = viewer.read();
    let Some(point) = v.detail_point() else {
        return rsx! {};
    };

    match &point.payload {
        Payload::Data { .. } => {
            let rows = signal_rows(point);
            rsx! {
                if rows.is_empty() {
                    p { class: "no-signals", "No signal readings for this point" }
                }
                div { class: "signal-list",
                    for row in rows {
                        div { class: "signal-row",
                            span { class: "signal-name", "{row.name}" }
                            span { class: "{row.class}", "{row.value}" }
                        }
                    }
                }
            }
        }
        Payload::Media(media) => {
            let source = media.source.clone();
            match media.kind {
                MediaKind::Video => rsx! {
                    video { class: "media-viewer", src: "{source}", controls: true, autoplay: true }
                },
                MediaKind::Image => rsx! {
                    img { class: "media-viewer", src: "{source}" }
                },
            }
        }
        Payload::Command => {
            let text = point
                .comment
                .as_ref()
                .map(|c| c.text.clone())
                .unwrap_or_default();
            rsx! { p { class: "note-text", "{text}" } }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_shared::models::{Media, PointId, Position, Scalar, Signals};

    fn point(payload: Payload) -> Point {
        Point {
            id: PointId::from("7"),
            row: Some(Scalar::Number(7.0)),
            position: Position::default(),
            payload,
            comment: None,
        }
    }

    #[test]
    fn test_detail_heading_by_kind() {
        let plate = point(Payload::Data {
            plate: Some("Plate 7".into()),
            signals: None,
        });
        assert_eq!(detail_heading(&plate), "#7 Plate 7");

        let bare = point(Payload::Data {
            plate: None,
            signals: None,
        });
        assert_eq!(detail_heading(&bare), "#7 Info");

        let media = point(Payload::Media(Media {
            kind: MediaKind::Image,
            source: "a.png".into(),
            label: None,
        }));
        assert_eq!(detail_heading(&media), "Media");
    }

    #[test]
    fn test_signal_rows_classify_and_mark_main() {
        let p = point(Payload::Data {
            plate: None,
            signals: Some(Signals::new(vec![
                ("MAIN".into(), -45.0),
                ("R102".into(), -71.0),
                ("R7".into(), -90.0),
            ])),
        });
        let rows = signal_rows(&p);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].class, "signal-value val-green main-signal");
        assert_eq!(rows[0].value, "-45 dBm");
        assert_eq!(rows[1].class, "signal-value val-yellow");
        assert_eq!(rows[2].class, "signal-value val-red");
    }

    #[test]
    fn test_signal_rows_empty_without_readings() {
        assert!(signal_rows(&point(Payload::Command)).is_empty());
    }
}
