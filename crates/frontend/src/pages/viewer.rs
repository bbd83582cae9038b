use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use floorplan_shared::viewer::Viewer;

use crate::api;
use crate::components::bottom_sheet::BottomSheet;
use crate::components::comment_box::CommentBox;
use crate::components::map_view::{self, MapView, ZoomControls, VIEWPORT_ID};
use crate::components::mode_bar::ModeBar;
use crate::components::range_selector::RangeSelector;
use crate::components::welcome_overlay::{HelpButton, WelcomeOverlay};
use crate::coords;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[component]
pub fn FloorViewer() -> Element {
    let mut viewer = use_signal(Viewer::default);
    let mut load_state = use_signal(|| LoadState::Loading);
    let show_welcome = use_signal(|| !api::welcome_seen());

    // Single fetch on mount; a failure is final for the session
    use_future(move || async move {
        match api::fetch_viewer().await {
            Ok(mut loaded) => {
                info!(points = loaded.index().len(), "floor data loaded");
                // The image may have decoded before the data arrived
                if let Some(size) = map_view::image_natural_size() {
                    loaded.set_content_size(size);
                }
                if let Some(size) = coords::element_size(VIEWPORT_ID) {
                    loaded.initialize_viewport(size);
                }
                viewer.set(loaded);
                load_state.set(LoadState::Ready);
            }
            Err(e) => {
                error!("failed to load floor data: {e}");
                load_state.set(LoadState::Failed(e));
            }
        }
    });

    let state = load_state.read().clone();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Floor Plan" }
                ModeBar { viewer }
                HelpButton { show: show_welcome }
            }

            div { class: "map-area",
                MapView { viewer }
                ZoomControls { viewer }
                CommentBox { viewer }
                RangeSelector { viewer }

                match state {
                    LoadState::Loading => rsx! {
                        div { class: "status-overlay", div { class: "spinner" } "Loading floor plan…" }
                    },
                    LoadState::Failed(message) => rsx! {
                        div { class: "status-overlay error",
                            p { "Error loading floor_full_data.json" }
                            p { class: "error-detail", "{message}" }
                        }
                    },
                    LoadState::Ready => rsx! {},
                }
            }

            BottomSheet { viewer }
            WelcomeOverlay { show: show_welcome }
        }
    }
}
