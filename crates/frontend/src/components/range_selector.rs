use dioxus::prelude::*;
use floorplan_shared::selection::{CompareView, Mode};
use floorplan_shared::viewer::Viewer;

/// Row range inputs, shown only while hand-picking points for comparison.
#[component]
pub fn RangeSelector(viewer: Signal<Viewer>) -> Element {
    let mut from = use_signal(|| "1".to_string());
    let mut to = use_signal(|| "1".to_string());

    let v = viewer.read();
    if v.mode() != Mode::Compare(CompareView::Range) {
        return rsx! {};
    }
    let notice = v.notice().map(str::to_string);
    let selected = v.selection().selected().len();
    drop(v);

    rsx! {
        div { class: "panel range-selector",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),

            h3 { "Row range" }
            div { class: "range-inputs",
                label { "From"
                    input {
                        r#type: "number",
                        value: "{from}",
                        oninput: move |evt: Event<FormData>| from.set(evt.value()),
                    }
                }
                label { "To"
                    input {
                        r#type: "number",
                        value: "{to}",
                        oninput: move |evt: Event<FormData>| to.set(evt.value()),
                    }
                }
                button {
                    onclick: move |_| {
                        let (f, t) = (from.read().clone(), to.read().clone());
                        let _ = viewer.write().apply_range(&f, &t);
                    },
                    "Apply"
                }
            }

            if let Some(message) = notice {
                div { class: "notice",
                    span { "{message}" }
                    button {
                        class: "secondary",
                        onclick: move |_| viewer.write().dismiss_notice(),
                        "OK"
                    }
                }
            }

            p { class: "hint",
                "{selected} selected. Tap points to toggle them, or hold "
                kbd { "Shift" }
                " and drag to box-select."
            }
        }
    }
}
