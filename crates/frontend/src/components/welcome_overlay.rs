use dioxus::prelude::*;

use crate::api;

const PAGE_COUNT: usize = 2;

/// Result of pressing the footer button on `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FooterAction {
    Next(usize),
    /// Only this records the dialog as seen.
    Done,
}

fn footer_action(page: usize) -> FooterAction {
    if page + 1 >= PAGE_COUNT {
        FooterAction::Done
    } else {
        FooterAction::Next(page + 1)
    }
}

#[component]
pub fn WelcomeOverlay(show: Signal<bool>) -> Element {
    let mut page = use_signal(|| 0usize);

    if !*show.read() {
        return rsx! {};
    }

    let current = *page.read();
    let action = footer_action(current);
    let page_label = format!("{} / {}", current + 1, PAGE_COUNT);

    rsx! {
        // The backdrop swallows clicks; the dialog closes through its own button
        div {
            class: "help-overlay-backdrop",

            div {
                class: "help-overlay welcome",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),

                if current == 0 {
                    h2 { "Welcome" }
                    p { "This floor plan shows signal readings taken around the building. Numbered markers are measurement plates; 💬 markers are notes and 📷 / 🎥 markers open photos and videos." }
                    div { class: "shortcut-section",
                        h3 { "Getting around" }
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", "Drag" }
                            span { "Pan the map" }
                        }
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", "Wheel / pinch" }
                            span { "Zoom" }
                        }
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", "⤢" }
                            span { "Fit the plan to the screen" }
                        }
                    }
                } else {
                    h2 { "Comparing signals" }
                    p { "Use Compare to chart readings side by side. \"All points\" charts every plate; \"Select points\" lets you build your own set." }
                    div { class: "shortcut-section",
                        h3 { "Selecting plates" }
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", "Tap" }
                            span { "Add or remove a plate" }
                        }
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", kbd { "Shift" } "+ drag" }
                            span { "Box-select plates" }
                        }
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", "From / To" }
                            span { "Select a range of rows" }
                        }
                    }
                }

                div { class: "welcome-footer",
                    span { class: "page-indicator", "{page_label}" }
                    button {
                        class: "close-help",
                        onclick: move |_| match action {
                            FooterAction::Next(next) => page.set(next),
                            FooterAction::Done => {
                                api::mark_welcome_seen();
                                page.set(0);
                                show.set(false);
                            }
                        },
                        if action == FooterAction::Done { "Done" } else { "Next" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn HelpButton(show: Signal<bool>) -> Element {
    rsx! {
        button {
            class: "help-button",
            title: "Help",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
            onclick: move |_| show.set(true),
            "?"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_advances_then_finishes() {
        assert_eq!(footer_action(0), FooterAction::Next(1));
        assert_eq!(footer_action(1), FooterAction::Done);
        assert_eq!(footer_action(PAGE_COUNT + 3), FooterAction::Done);
    }
}
