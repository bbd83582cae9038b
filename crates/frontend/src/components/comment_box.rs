use dioxus::prelude::*;
use floorplan_shared::models::CommentShape;
use floorplan_shared::viewer::Viewer;

use crate::components::chart_view::escape;

/// Inline SVG for the speech-bubble outline behind the comment text.
pub fn bubble_svg(shape: &CommentShape) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" preserveAspectRatio="none" class="comment-shape"><path d="{}" fill="{}" stroke="{}" stroke-width="{}"/></svg>"#,
        escape(&shape.view_box),
        escape(&shape.path),
        escape(&shape.fill),
        escape(&shape.stroke),
        shape.stroke_width
    )
}

pub fn box_style(shape: &CommentShape) -> String {
    let mut style = format!(
        "color: {}; font-size: {}px; padding: {}px;",
        shape.text_color, shape.font_size, shape.padding
    );
    if let Some(width) = shape.width {
        style.push_str(&format!(" width: {width}px;"));
    }
    style
}

#[component]
pub fn CommentBox(viewer: Signal<Viewer>) -> Element {
    let v = viewer.read();
    let Some(comment) = v.comment_point().and_then(|p| p.comment.clone()) else {
        return rsx! {};
    };
    let shape = comment.shape(v.is_mobile());
    drop(v);

    let svg = bubble_svg(&shape);
    let style = box_style(&shape);

    rsx! {
        div {
            class: "comment-box",
            style: "{style}",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),

            div { class: "comment-bg", dangerous_inner_html: "{svg}" }
            div { class: "comment-content",
                p { class: "comment-text", "{comment.text}" }
                if let Some(image) = &comment.image {
                    img { class: "comment-image", src: "{image}" }
                }
            }
        }
    }
}
