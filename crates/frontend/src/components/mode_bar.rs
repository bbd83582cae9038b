use dioxus::prelude::*;
use floorplan_shared::selection::{BrowseKind, CompareView, Mode};
use floorplan_shared::viewer::Viewer;

fn tab_class(active: bool) -> &'static str {
    if active {
        "mode-btn active"
    } else {
        "mode-btn"
    }
}

#[component]
pub fn ModeBar(viewer: Signal<Viewer>) -> Element {
    let mut show_compare_choice = use_signal(|| false);
    let mode = viewer.read().mode();
    let comparing = matches!(mode, Mode::Compare(_));

    rsx! {
        div { class: "mode-bar",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),

            button {
                class: tab_class(mode == Mode::Browse(BrowseKind::Data)),
                onclick: move |_| viewer.write().enter_browse(BrowseKind::Data),
                "📊 Data"
            }
            button {
                class: tab_class(comparing),
                onclick: move |_| show_compare_choice.set(true),
                "📈 Compare"
            }
            button {
                class: tab_class(mode == Mode::Browse(BrowseKind::Media)),
                onclick: move |_| viewer.write().enter_browse(BrowseKind::Media),
                "🖼 Media"
            }
        }

        if comparing {
            div { class: "compare-submodes",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),

                button {
                    class: tab_class(mode == Mode::Compare(CompareView::Full)),
                    onclick: move |_| viewer.write().set_compare_view(CompareView::Full),
                    "All points"
                }
                button {
                    class: tab_class(mode == Mode::Compare(CompareView::Range)),
                    onclick: move |_| viewer.write().set_compare_view(CompareView::Range),
                    "Select"
                }
                if mode == Mode::Compare(CompareView::Range) {
                    button {
                        class: "secondary",
                        onclick: move |_| viewer.write().clear_selection(),
                        "Clear"
                    }
                }
            }
        }

        if *show_compare_choice.read() {
            div {
                class: "modal-backdrop",
                onclick: move |_| show_compare_choice.set(false),

                div {
                    class: "modal compare-modal",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                    h2 { "Compare signals" }
                    p { "Chart every plate at once, or pick plates by tapping, by row range, or with a shift-drag box." }
                    div { class: "modal-actions",
                        button {
                            onclick: move |_| {
                                viewer.write().enter_compare(CompareView::Full);
                                show_compare_choice.set(false);
                            },
                            "All points"
                        }
                        button {
                            onclick: move |_| {
                                viewer.write().enter_compare(CompareView::Range);
                                show_compare_choice.set(false);
                            },
                            "Select points"
                        }
                        button {
                            class: "secondary",
                            onclick: move |_| show_compare_choice.set(false),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
