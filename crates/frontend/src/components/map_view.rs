use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use floorplan_shared::gesture::{GestureSession, InputEvent, PointerTarget};
use floorplan_shared::models::{MediaKind, Payload, Point, PointId};
use floorplan_shared::selection::Mode;
use floorplan_shared::viewer::Viewer;
use floorplan_shared::viewport::{ScreenPos, Size};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;

use crate::api;
use crate::coords;

pub const VIEWPORT_ID: &str = "floor-viewport";
const FLOOR_IMAGE_ID: &str = "floor-image";

/// Resize events are coalesced; only the last one in this window is applied.
const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Natural size of the decoded floor image, if it has loaded.
pub fn image_natural_size() -> Option<Size> {
    let document = web_sys::window()?.document()?;
    let img = document
        .get_element_by_id(FLOOR_IMAGE_ID)?
        .dyn_into::<web_sys::HtmlImageElement>()
        .ok()?;
    let (w, h) = (img.natural_width(), img.natural_height());
    (w > 0 && h > 0).then(|| Size::new(w as f64, h as f64))
}

fn touch_positions(evt: &Event<TouchData>) -> Vec<ScreenPos> {
    let Some(rect) = coords::element_rect(VIEWPORT_ID) else {
        return Vec::new();
    };
    evt.data()
        .touches()
        .iter()
        .map(|t| {
            let c = t.client_coordinates();
            coords::client_to_viewport(c.x, c.y, rect.left(), rect.top())
        })
        .collect()
}

/// How a point marker is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: PointId,
    pub class: String,
    pub glyph: String,
    pub left: f64,
    pub top: f64,
}

pub fn marker_view(point: &Point, mode: Mode, selected: bool, highlighted: bool) -> MarkerView {
    let (kind_class, glyph) = match &point.payload {
        Payload::Command => ("command-point", "💬".to_string()),
        Payload::Media(m) if m.kind == MediaKind::Video => ("media-point", "🎥".to_string()),
        Payload::Media(_) => ("media-point", "📷".to_string()),
        Payload::Data { .. } if matches!(mode, Mode::Compare(_)) => {
            ("graph-point", "📈".to_string())
        }
        Payload::Data { .. } => ("data-point", point.ordinal_label()),
    };
    let mut class = format!("point {kind_class}");
    if highlighted {
        class.push_str(" active");
    }
    if selected {
        class.push_str(" multi-active");
    }
    MarkerView {
        id: point.id.clone(),
        class,
        glyph,
        left: point.position.x,
        top: point.position.y,
    }
}

#[component]
pub fn MapView(viewer: Signal<Viewer>) -> Element {
    let mut resize_generation = use_signal(|| 0u64);

    let v = viewer.read();
    let transform_style = coords::transform_style(v.viewport());
    let mode = v.mode();
    let markers: Vec<MarkerView> = v
        .visible_points()
        .map(|p| marker_view(p, mode, v.is_selected(&p.id), v.is_highlighted(&p.id)))
        .collect();
    let selection_rect = v.selection_rect().map(|r| coords::rect_style(&r));
    let container_class = match v.gesture() {
        GestureSession::Panning { .. } => "viewport grabbing",
        GestureSession::BoxSelecting { .. } => "viewport box-selecting",
        _ => "viewport",
    };
    drop(v);

    rsx! {
        div {
            id: VIEWPORT_ID,
            class: "{container_class}",

            onresize: move |_| {
                let Some(size) = coords::element_size(VIEWPORT_ID) else { return };
                let generation = *resize_generation.peek() + 1;
                resize_generation.set(generation);
                spawn(async move {
                    TimeoutFuture::new(RESIZE_DEBOUNCE_MS).await;
                    if *resize_generation.peek() == generation {
                        viewer.write().resize(size);
                    }
                });
            },

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let client = evt.data().client_coordinates();
                let Some((pos, size)) = coords::locate(VIEWPORT_ID, client.x, client.y) else { return };
                viewer.write().handle(InputEvent::Wheel {
                    pos,
                    delta_y: wheel_delta_y(evt.data().delta()),
                    viewport: size,
                });
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                let Some((pos, _)) = coords::locate(VIEWPORT_ID, client.x, client.y) else { return };
                viewer.write().handle(InputEvent::PointerDown {
                    pos,
                    target: PointerTarget::Canvas,
                    shift: evt.modifiers().shift(),
                });
            },

            onmousemove: move |evt: Event<MouseData>| {
                if viewer.peek().gesture() == GestureSession::Idle {
                    return;
                }
                let client = evt.client_coordinates();
                let Some((pos, _)) = coords::locate(VIEWPORT_ID, client.x, client.y) else { return };
                viewer.write().handle(InputEvent::PointerMove { pos });
            },

            onmouseup: move |evt: Event<MouseData>| {
                if viewer.peek().gesture() == GestureSession::Idle {
                    return;
                }
                let client = evt.client_coordinates();
                let Some((pos, _)) = coords::locate(VIEWPORT_ID, client.x, client.y) else { return };
                viewer.write().handle(InputEvent::PointerUp { pos });
            },

            onmouseleave: move |_| {
                if viewer.peek().gesture() != GestureSession::Idle {
                    viewer.write().handle(InputEvent::PointerCancel);
                }
            },

            // --- Touch event handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                let touches = touch_positions(&evt);
                if touches.len() >= 2 {
                    evt.prevent_default();
                }
                viewer.write().handle(InputEvent::TouchStart {
                    touches,
                    target: PointerTarget::Canvas,
                });
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = touch_positions(&evt);
                viewer.write().handle(InputEvent::TouchMove { touches });
            },

            ontouchend: move |evt: Event<TouchData>| {
                let remaining = evt.data().touches().len();
                viewer.write().handle(InputEvent::TouchEnd { remaining });
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                viewer.write().handle(InputEvent::TouchCancel);
            },

            // Inner wrapper: CSS transform applies zoom/pan to the image and markers together
            div {
                class: "map-inner",
                style: "{transform_style}",

                img {
                    id: FLOOR_IMAGE_ID,
                    src: api::FLOOR_IMAGE_PATH,
                    draggable: "false",
                    onload: move |_| {
                        if let Some(size) = image_natural_size() {
                            viewer.write().set_content_size(size);
                        }
                    },
                }

                for marker in markers {
                    {
                        let id = marker.id.clone();
                        rsx! {
                            div {
                                key: "{marker.id}",
                                class: "{marker.class}",
                                style: "left: {marker.left}px; top: {marker.top}px;",
                                // Markers consume the press so the canvas never starts a pan under them
                                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                                ontouchstart: move |evt: Event<TouchData>| evt.stop_propagation(),
                                onclick: move |evt: Event<MouseData>| {
                                    evt.stop_propagation();
                                    viewer.write().handle(InputEvent::PointerDown {
                                        pos: ScreenPos::default(),
                                        target: PointerTarget::Point(id.clone()),
                                        shift: false,
                                    });
                                },
                                "{marker.glyph}"
                            }
                        }
                    }
                }
            }

            if let Some(style) = selection_rect {
                div { class: "selection-rect active", style: "{style}" }
            }
        }
    }
}

/// Zoom and fit buttons. Lives outside the viewport so presses never reach the gesture router.
#[component]
pub fn ZoomControls(viewer: Signal<Viewer>) -> Element {
    rsx! {
        div { class: "controls",
            button { title: "Zoom in", onclick: move |_| viewer.write().zoom_in(), "+" }
            button { title: "Zoom out", onclick: move |_| viewer.write().zoom_out(), "−" }
            button { title: "Fit to screen", onclick: move |_| viewer.write().fit(), "⤢" }
            button { title: "Reset view", onclick: move |_| viewer.write().fit(), "⟲" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_shared::models::{Comment, Media, Position, Scalar, Signals};
    use floorplan_shared::selection::{BrowseKind, CompareView};

    fn data_point(row: &str) -> Point {
        Point {
            id: PointId::from(row),
            row: Some(Scalar::Text(row.to_string())),
            position: Position::new(120.0, 45.5),
            payload: Payload::Data {
                plate: None,
                signals: Some(Signals::new(vec![("MAIN".into(), -50.0)])),
            },
            comment: None,
        }
    }

    #[test]
    fn test_data_marker_shows_ordinal_in_browse() {
        let m = marker_view(&data_point("14"), Mode::Browse(BrowseKind::Data), false, false);
        assert_eq!(m.glyph, "14");
        assert_eq!(m.class, "point data-point");
        assert!((m.left - 120.0).abs() < 1e-9);
        assert!((m.top - 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_data_marker_shows_chart_glyph_when_comparing() {
        let m = marker_view(
            &data_point("14"),
            Mode::Compare(CompareView::Range),
            true,
            true,
        );
        assert_eq!(m.glyph, "📈");
        assert_eq!(m.class, "point graph-point active multi-active");
    }

    #[test]
    fn test_media_and_command_glyphs() {
        let mut video = data_point("v");
        video.payload = Payload::Media(Media {
            kind: MediaKind::Video,
            source: "clip.mp4".into(),
            label: None,
        });
        let m = marker_view(&video, Mode::Browse(BrowseKind::Media), false, false);
        assert_eq!(m.glyph, "🎥");

        let mut note = data_point("c");
        note.payload = Payload::Command;
        note.comment = Some(Comment {
            text: "hi".into(),
            image: None,
            style: None,
            legacy_shape: None,
        });
        let m = marker_view(&note, Mode::Browse(BrowseKind::Data), false, false);
        assert_eq!(m.glyph, "💬");
        assert_eq!(m.class, "point command-point");
    }
}
