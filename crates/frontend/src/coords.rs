use floorplan_shared::viewport::{ScreenPos, ScreenRect, Size, Viewport};

/// Convert client (window) coordinates to viewport-relative screen coordinates.
pub fn client_to_viewport(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> ScreenPos {
    ScreenPos::new(client_x - rect_left, client_y - rect_top)
}

/// Bounding client rect of the element with the given id.
pub fn element_rect(id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    Some(element.get_bounding_client_rect())
}

/// Viewport-relative position and viewport size for a client coordinate.
pub fn locate(id: &str, client_x: f64, client_y: f64) -> Option<(ScreenPos, Size)> {
    let rect = element_rect(id)?;
    Some((
        client_to_viewport(client_x, client_y, rect.left(), rect.top()),
        Size::new(rect.width(), rect.height()),
    ))
}

pub fn element_size(id: &str) -> Option<Size> {
    element_rect(id).map(|r| Size::new(r.width(), r.height()))
}

/// CSS transform placing map space on screen: `screen = offset + scale * map`.
pub fn transform_style(viewport: &Viewport) -> String {
    format!(
        "transform: translate({}px, {}px) scale({}); transform-origin: 0 0;",
        viewport.offset.x, viewport.offset.y, viewport.scale
    )
}

pub fn rect_style(rect: &ScreenRect) -> String {
    format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        rect.left,
        rect.top,
        rect.width(),
        rect.height()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_viewport_origin() {
        let p = client_to_viewport(100.0, 200.0, 100.0, 200.0);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_viewport_offset() {
        let p = client_to_viewport(450.0, 350.0, 320.0, 50.0);
        assert!((p.x - 130.0).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_style() {
        let v = Viewport {
            scale: 0.5,
            offset: ScreenPos::new(12.0, -4.0),
        };
        assert_eq!(
            transform_style(&v),
            "transform: translate(12px, -4px) scale(0.5); transform-origin: 0 0;"
        );
    }

    #[test]
    fn test_rect_style_uses_normalized_rect() {
        let r = ScreenRect::from_corners(
            ScreenPos::new(200.0, 180.0),
            ScreenPos::new(90.0, 50.0),
        );
        assert_eq!(
            rect_style(&r),
            "left: 90px; top: 50px; width: 110px; height: 130px;"
        );
    }
}
