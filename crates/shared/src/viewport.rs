//! Pan/zoom transform between map space (floor-image pixels) and screen space
//! (pixels relative to the viewport's top-left corner).
//!
//! `screen = offset + scale * map`

use crate::models::{Position, ViewportSnapshot};

/// Pinch-zoom clamp range.
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;

/// Fraction of the viewport the fitted map occupies.
pub const FIT_MARGIN: f64 = 0.9;

/// Assumed image size when the natural size is unknown (image not yet decoded).
pub const FALLBACK_CONTENT_SIZE: Size = Size {
    width: 2000.0,
    height: 2000.0,
};

pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

/// Viewports at or below this width are treated as mobile: always fitted.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Position in viewport-relative screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: ScreenPos) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(self, other: ScreenPos) -> ScreenPos {
        ScreenPos::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(self) -> ScreenPos {
        ScreenPos::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive containment test for a viewport-relative position.
    pub fn contains(self, pos: ScreenPos) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// Axis-aligned rectangle in screen space. Always normalized (`left <= right`, `top <= bottom`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ScreenRect {
    /// Rectangle spanned by two opposite corners in any order.
    pub fn from_corners(a: ScreenPos, b: ScreenPos) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Edges count as inside.
    pub fn contains(&self, pos: ScreenPos) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: ScreenPos,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: ScreenPos::default(),
        }
    }
}

impl From<ViewportSnapshot> for Viewport {
    fn from(s: ViewportSnapshot) -> Self {
        let scale = if s.scale.is_finite() && s.scale > 0.0 {
            s.scale
        } else {
            1.0
        };
        Self {
            scale,
            offset: ScreenPos::new(s.x, s.y),
        }
    }
}

impl Viewport {
    pub fn map_to_screen(&self, p: Position) -> ScreenPos {
        ScreenPos::new(
            self.offset.x + self.scale * p.x,
            self.offset.y + self.scale * p.y,
        )
    }

    pub fn screen_to_map(&self, s: ScreenPos) -> Position {
        Position::new(
            (s.x - self.offset.x) / self.scale,
            (s.y - self.offset.y) / self.scale,
        )
    }

    /// Multiply the scale by `factor`, keeping the map point under `pivot` fixed on screen.
    pub fn zoom_at(&mut self, pivot: ScreenPos, factor: f64) {
        self.zoom_to(pivot, self.scale * factor);
    }

    /// Like [`Viewport::zoom_at`] but the resulting scale is clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom_at_clamped(&mut self, pivot: ScreenPos, factor: f64) {
        self.zoom_to(pivot, (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE));
    }

    fn zoom_to(&mut self, pivot: ScreenPos, new_scale: f64) {
        if !(new_scale.is_finite() && new_scale > 0.0) {
            return;
        }
        let anchor = self.screen_to_map(pivot);
        self.scale = new_scale;
        self.offset = ScreenPos::new(
            pivot.x - anchor.x * new_scale,
            pivot.y - anchor.y * new_scale,
        );
    }

    /// Zoom step around the viewport center (toolbar `+` / `-`).
    pub fn zoom_step(&mut self, viewport: Size, zoom_in: bool) {
        let factor = if zoom_in {
            BUTTON_ZOOM_STEP
        } else {
            1.0 / BUTTON_ZOOM_STEP
        };
        self.zoom_at(viewport.center(), factor);
    }

    /// Fit the content inside the viewport with a 10% margin and center it.
    ///
    /// Unknown or empty content falls back to [`FALLBACK_CONTENT_SIZE`]. An empty
    /// viewport (not laid out yet) leaves the transform unchanged.
    pub fn fit(&mut self, viewport: Size, content: Option<Size>) {
        if viewport.is_empty() {
            return;
        }
        let content = content
            .filter(|c| !c.is_empty())
            .unwrap_or(FALLBACK_CONTENT_SIZE);
        self.scale =
            (viewport.width / content.width).min(viewport.height / content.height) * FIT_MARGIN;
        self.offset = ScreenPos::new(
            (viewport.width - content.width * self.scale) / 2.0,
            (viewport.height - content.height * self.scale) / 2.0,
        );
    }

    /// Unbounded translation; the map may be dragged fully off-screen.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scale: self.scale,
            x: self.offset.x,
            y: self.offset.y,
        }
    }
}

/// Wheel zoom factor: scrolling down zooms out.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y > 0.0 {
        WHEEL_ZOOM_OUT
    } else {
        WHEEL_ZOOM_IN
    }
}

pub fn is_mobile_width(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn vp(scale: f64, x: f64, y: f64) -> Viewport {
        Viewport {
            scale,
            offset: ScreenPos::new(x, y),
        }
    }

    #[test]
    fn test_map_to_screen_and_back() {
        let v = vp(2.5, 40.0, -12.0);
        for (mx, my) in [(0.0, 0.0), (100.0, 250.0), (-30.0, 7.5)] {
            let s = v.map_to_screen(Position::new(mx, my));
            let m = v.screen_to_map(s);
            assert_close(m.x, mx);
            assert_close(m.y, my);
        }
    }

    #[test]
    fn test_zoom_at_keeps_pivot_stable() {
        let starts = [vp(1.0, 0.0, 0.0), vp(0.37, -220.0, 95.0), vp(6.0, 1300.0, -40.0)];
        let pivots = [
            ScreenPos::new(0.0, 0.0),
            ScreenPos::new(412.0, 300.5),
            ScreenPos::new(-50.0, 900.0),
        ];
        let factors = [0.9, 1.1, 1.2, 1.0 / 1.2, 3.7, 0.05];
        for start in starts {
            for pivot in pivots {
                for factor in factors {
                    let mut v = start;
                    let before = v.screen_to_map(pivot);
                    v.zoom_at(pivot, factor);
                    let after = v.screen_to_map(pivot);
                    assert_close(after.x, before.x);
                    assert_close(after.y, before.y);
                    assert_close(v.scale, start.scale * factor);
                }
            }
        }
    }

    #[test]
    fn test_zoom_at_is_unclamped() {
        let mut v = vp(8.0, 0.0, 0.0);
        v.zoom_at(ScreenPos::new(10.0, 10.0), 2.0);
        assert_close(v.scale, 16.0);
    }

    #[test]
    fn test_zoom_at_clamped_bounds_scale() {
        let mut v = vp(8.0, 0.0, 0.0);
        let pivot = ScreenPos::new(200.0, 150.0);
        let before = v.screen_to_map(pivot);
        v.zoom_at_clamped(pivot, 2.0);
        assert_close(v.scale, MAX_SCALE);
        let after = v.screen_to_map(pivot);
        assert_close(after.x, before.x);
        assert_close(after.y, before.y);

        let mut v = vp(0.2, 0.0, 0.0);
        v.zoom_at_clamped(pivot, 0.1);
        assert_close(v.scale, MIN_SCALE);
    }

    #[test]
    fn test_zoom_ignores_degenerate_factor() {
        let mut v = vp(1.5, 3.0, 4.0);
        v.zoom_at(ScreenPos::new(1.0, 1.0), 0.0);
        v.zoom_at(ScreenPos::new(1.0, 1.0), f64::NAN);
        assert_eq!(v, vp(1.5, 3.0, 4.0));
    }

    #[test]
    fn test_fit_centers_content() {
        let mut v = Viewport::default();
        v.fit(Size::new(1000.0, 500.0), Some(Size::new(2000.0, 1000.0)));
        assert_close(v.scale, 0.45);
        // Content center lands on viewport center
        let c = v.map_to_screen(Position::new(1000.0, 500.0));
        assert_close(c.x, 500.0);
        assert_close(c.y, 250.0);
    }

    #[test]
    fn test_fit_uses_fallback_when_size_unknown() {
        for content in [None, Some(Size::new(0.0, 0.0)), Some(Size::new(800.0, 0.0))] {
            let mut v = Viewport::default();
            v.fit(Size::new(800.0, 600.0), content);
            assert!(v.scale > 0.0);
            assert_close(v.scale, 600.0 / 2000.0 * FIT_MARGIN);
            let c = v.map_to_screen(Position::new(1000.0, 1000.0));
            assert_close(c.x, 400.0);
            assert_close(c.y, 300.0);
        }
    }

    #[test]
    fn test_fit_ignores_empty_viewport() {
        let mut v = vp(2.0, 5.0, 5.0);
        v.fit(Size::new(0.0, 600.0), None);
        assert_eq!(v, vp(2.0, 5.0, 5.0));
    }

    #[test]
    fn test_pan_is_unbounded() {
        let mut v = vp(1.0, 0.0, 0.0);
        v.pan(-50_000.0, 12_000.0);
        assert_close(v.offset.x, -50_000.0);
        assert_close(v.offset.y, 12_000.0);
    }

    #[test]
    fn test_zoom_step_around_center() {
        let mut v = vp(1.0, 0.0, 0.0);
        let size = Size::new(800.0, 600.0);
        let before = v.screen_to_map(size.center());
        v.zoom_step(size, true);
        assert_close(v.scale, 1.2);
        v.zoom_step(size, false);
        assert_close(v.scale, 1.0);
        let after = v.screen_to_map(size.center());
        assert_close(after.x, before.x);
        assert_close(after.y, before.y);
    }

    #[test]
    fn test_wheel_zoom_factor() {
        assert_close(wheel_zoom_factor(120.0), 0.9);
        assert_close(wheel_zoom_factor(-3.0), 1.1);
        assert_close(wheel_zoom_factor(0.0), 1.1);
    }

    #[test]
    fn test_snapshot_with_invalid_scale_defaults() {
        let v = Viewport::from(ViewportSnapshot {
            scale: 0.0,
            x: 3.0,
            y: 4.0,
        });
        assert_eq!(v, vp(1.0, 3.0, 4.0));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = ScreenRect::from_corners(ScreenPos::new(200.0, 50.0), ScreenPos::new(90.0, 180.0));
        assert_eq!(
            r,
            ScreenRect {
                left: 90.0,
                top: 50.0,
                right: 200.0,
                bottom: 180.0
            }
        );
        assert!(r.contains(ScreenPos::new(90.0, 180.0)));
        assert!(!r.contains(ScreenPos::new(89.9, 100.0)));
    }

    #[test]
    fn test_mobile_breakpoint() {
        assert!(is_mobile_width(768.0));
        assert!(!is_mobile_width(769.0));
    }
}
