//! Turns raw pointer/touch/wheel input into pan, pinch-zoom, box-select or
//! point taps.
//!
//! All positions are viewport-relative screen pixels. Each event is handled to
//! completion before the next one arrives.

use crate::models::PointId;
use crate::viewport::{wheel_zoom_factor, ScreenPos, ScreenRect, Size, Viewport};

/// What the pointer landed on when the interaction started.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// Empty map area (image or background).
    Canvas,
    /// A rendered point marker. Consumes the event before pan/box handling.
    Point(PointId),
    /// Sheets, dialogs and other chrome layered over the viewport.
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        pos: ScreenPos,
        target: PointerTarget,
        shift: bool,
    },
    PointerMove {
        pos: ScreenPos,
    },
    PointerUp {
        pos: ScreenPos,
    },
    /// Pointer left the viewport mid-gesture.
    PointerCancel,
    TouchStart {
        touches: Vec<ScreenPos>,
        target: PointerTarget,
    },
    TouchMove {
        touches: Vec<ScreenPos>,
    },
    TouchEnd {
        remaining: usize,
    },
    TouchCancel,
    Wheel {
        pos: ScreenPos,
        delta_y: f64,
        viewport: Size,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// In-progress interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureSession {
    #[default]
    Idle,
    Panning {
        source: InputSource,
        start_screen: ScreenPos,
        start_offset: ScreenPos,
    },
    Pinching {
        /// Finger distance of the previous sample; `None` until the first one is seen.
        last_distance: Option<f64>,
    },
    BoxSelecting {
        anchor: ScreenPos,
        current: ScreenPos,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    Unchanged,
    ViewportChanged,
    PointTapped(PointId),
    BoxUpdated(ScreenRect),
    BoxFinished(ScreenRect),
    BoxCancelled,
}

#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    session: GestureSession,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> GestureSession {
        self.session
    }

    /// Live selection rectangle while box-selecting.
    pub fn selection_rect(&self) -> Option<ScreenRect> {
        match self.session {
            GestureSession::BoxSelecting { anchor, current } => {
                Some(ScreenRect::from_corners(anchor, current))
            }
            _ => None,
        }
    }

    /// Route one input event. `box_select_enabled` is true while manual
    /// comparison selection is active (shift-drag draws a selection box).
    pub fn handle(
        &mut self,
        event: InputEvent,
        viewport: &mut Viewport,
        box_select_enabled: bool,
    ) -> GestureOutcome {
        match event {
            InputEvent::PointerDown { pos, target, shift } => match target {
                PointerTarget::Point(id) => GestureOutcome::PointTapped(id),
                PointerTarget::Overlay => GestureOutcome::Unchanged,
                PointerTarget::Canvas if shift && box_select_enabled => {
                    tracing::debug!(x = pos.x, y = pos.y, "box selection started");
                    self.session = GestureSession::BoxSelecting {
                        anchor: pos,
                        current: pos,
                    };
                    GestureOutcome::BoxUpdated(ScreenRect::from_corners(pos, pos))
                }
                PointerTarget::Canvas => {
                    self.start_pan(InputSource::Mouse, pos, viewport);
                    GestureOutcome::Unchanged
                }
            },

            InputEvent::PointerMove { pos } => match self.session {
                GestureSession::BoxSelecting { anchor, .. } => {
                    self.session = GestureSession::BoxSelecting {
                        anchor,
                        current: pos,
                    };
                    GestureOutcome::BoxUpdated(ScreenRect::from_corners(anchor, pos))
                }
                GestureSession::Panning {
                    source: InputSource::Mouse,
                    start_screen,
                    start_offset,
                } => {
                    drag_to(viewport, start_screen, start_offset, pos);
                    GestureOutcome::ViewportChanged
                }
                _ => GestureOutcome::Unchanged,
            },

            InputEvent::PointerUp { pos } => match self.session {
                GestureSession::BoxSelecting { anchor, .. } => {
                    self.session = GestureSession::Idle;
                    let rect = ScreenRect::from_corners(anchor, pos);
                    tracing::debug!(?rect, "box selection finished");
                    GestureOutcome::BoxFinished(rect)
                }
                GestureSession::Panning {
                    source: InputSource::Mouse,
                    ..
                } => {
                    self.session = GestureSession::Idle;
                    GestureOutcome::Unchanged
                }
                _ => GestureOutcome::Unchanged,
            },

            InputEvent::PointerCancel => match self.session {
                GestureSession::BoxSelecting { .. } => {
                    self.session = GestureSession::Idle;
                    GestureOutcome::BoxCancelled
                }
                GestureSession::Panning {
                    source: InputSource::Mouse,
                    ..
                } => {
                    self.session = GestureSession::Idle;
                    GestureOutcome::Unchanged
                }
                _ => GestureOutcome::Unchanged,
            },

            InputEvent::TouchStart { touches, target } => {
                if target != PointerTarget::Canvas {
                    return GestureOutcome::Unchanged;
                }
                match touches.as_slice() {
                    [only] => self.start_pan(InputSource::Touch, *only, viewport),
                    [a, b, ..] => {
                        tracing::debug!("pinch started");
                        self.session = GestureSession::Pinching {
                            last_distance: Some(a.distance(*b)),
                        };
                    }
                    [] => {}
                }
                GestureOutcome::Unchanged
            }

            InputEvent::TouchMove { touches } => match (touches.as_slice(), self.session) {
                (
                    [only],
                    GestureSession::Panning {
                        source: InputSource::Touch,
                        start_screen,
                        start_offset,
                    },
                ) => {
                    drag_to(viewport, start_screen, start_offset, *only);
                    GestureOutcome::ViewportChanged
                }
                ([a, b, ..], GestureSession::Pinching { last_distance }) => {
                    self.pinch(viewport, *a, *b, last_distance)
                }
                // A second finger joined without its own touch-start: no prior sample yet.
                ([a, b, ..], GestureSession::Panning { .. } | GestureSession::Idle) => {
                    self.pinch(viewport, *a, *b, None)
                }
                _ => GestureOutcome::Unchanged,
            },

            InputEvent::TouchEnd { remaining } => {
                match self.session {
                    GestureSession::Pinching { .. } if remaining < 2 => {
                        self.session = GestureSession::Idle;
                    }
                    GestureSession::Panning {
                        source: InputSource::Touch,
                        ..
                    } => {
                        self.session = GestureSession::Idle;
                    }
                    _ => {}
                }
                GestureOutcome::Unchanged
            }

            InputEvent::TouchCancel => {
                if matches!(
                    self.session,
                    GestureSession::Pinching { .. }
                        | GestureSession::Panning {
                            source: InputSource::Touch,
                            ..
                        }
                ) {
                    self.session = GestureSession::Idle;
                }
                GestureOutcome::Unchanged
            }

            InputEvent::Wheel {
                pos,
                delta_y,
                viewport: bounds,
            } => {
                if !bounds.contains(pos) {
                    return GestureOutcome::Unchanged;
                }
                viewport.zoom_at(pos, wheel_zoom_factor(delta_y));
                GestureOutcome::ViewportChanged
            }
        }
    }

    fn start_pan(&mut self, source: InputSource, pos: ScreenPos, viewport: &Viewport) {
        self.session = GestureSession::Panning {
            source,
            start_screen: pos,
            start_offset: viewport.offset,
        };
    }

    fn pinch(
        &mut self,
        viewport: &mut Viewport,
        a: ScreenPos,
        b: ScreenPos,
        last_distance: Option<f64>,
    ) -> GestureOutcome {
        let distance = a.distance(b);
        self.session = GestureSession::Pinching {
            last_distance: Some(distance),
        };
        match last_distance {
            Some(last) if last > 0.0 => {
                viewport.zoom_at_clamped(a.midpoint(b), distance / last);
                GestureOutcome::ViewportChanged
            }
            _ => GestureOutcome::Unchanged,
        }
    }
}

fn drag_to(
    viewport: &mut Viewport,
    start_screen: ScreenPos,
    start_offset: ScreenPos,
    pos: ScreenPos,
) {
    viewport.offset = ScreenPos::new(
        start_offset.x + (pos.x - start_screen.x),
        start_offset.y + (pos.y - start_screen.y),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{MAX_SCALE, MIN_SCALE};

    fn p(x: f64, y: f64) -> ScreenPos {
        ScreenPos::new(x, y)
    }

    fn down(x: f64, y: f64, shift: bool) -> InputEvent {
        InputEvent::PointerDown {
            pos: p(x, y),
            target: PointerTarget::Canvas,
            shift,
        }
    }

    fn touches(points: &[(f64, f64)]) -> Vec<ScreenPos> {
        points.iter().map(|&(x, y)| p(x, y)).collect()
    }

    #[test]
    fn test_mouse_drag_pans_from_anchor() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport {
            scale: 2.0,
            offset: p(10.0, 20.0),
        };
        router.handle(down(100.0, 100.0, false), &mut vp, false);
        assert!(matches!(router.session(), GestureSession::Panning { .. }));

        router.handle(InputEvent::PointerMove { pos: p(130.0, 90.0) }, &mut vp, false);
        assert_eq!(vp.offset, p(40.0, 10.0));
        // Offsets are recomputed from the anchor, not accumulated
        router.handle(InputEvent::PointerMove { pos: p(150.0, 100.0) }, &mut vp, false);
        assert_eq!(vp.offset, p(60.0, 20.0));

        router.handle(InputEvent::PointerUp { pos: p(150.0, 100.0) }, &mut vp, false);
        assert_eq!(router.session(), GestureSession::Idle);
        router.handle(InputEvent::PointerMove { pos: p(500.0, 500.0) }, &mut vp, false);
        assert_eq!(vp.offset, p(60.0, 20.0));
    }

    #[test]
    fn test_point_tap_never_starts_pan() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        let outcome = router.handle(
            InputEvent::PointerDown {
                pos: p(5.0, 5.0),
                target: PointerTarget::Point(PointId::from("7")),
                shift: true,
            },
            &mut vp,
            true,
        );
        assert_eq!(outcome, GestureOutcome::PointTapped(PointId::from("7")));
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_overlay_pointer_is_ignored() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        let outcome = router.handle(
            InputEvent::PointerDown {
                pos: p(5.0, 5.0),
                target: PointerTarget::Overlay,
                shift: false,
            },
            &mut vp,
            false,
        );
        assert_eq!(outcome, GestureOutcome::Unchanged);
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_shift_drag_box_selects_only_when_enabled() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();

        router.handle(down(90.0, 90.0, true), &mut vp, false);
        assert!(matches!(router.session(), GestureSession::Panning { .. }));
        router.handle(InputEvent::PointerUp { pos: p(90.0, 90.0) }, &mut vp, false);

        router.handle(down(200.0, 200.0, true), &mut vp, true);
        let moved = router.handle(InputEvent::PointerMove { pos: p(90.0, 90.0) }, &mut vp, true);
        let expected = ScreenRect {
            left: 90.0,
            top: 90.0,
            right: 200.0,
            bottom: 200.0,
        };
        assert_eq!(moved, GestureOutcome::BoxUpdated(expected));
        assert_eq!(router.selection_rect(), Some(expected));
        assert_eq!(vp, Viewport::default(), "box selection must not pan");

        let done = router.handle(InputEvent::PointerUp { pos: p(90.0, 90.0) }, &mut vp, true);
        assert_eq!(done, GestureOutcome::BoxFinished(expected));
        assert_eq!(router.selection_rect(), None);
    }

    #[test]
    fn test_pointer_cancel_discards_box() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(down(0.0, 0.0, true), &mut vp, true);
        let outcome = router.handle(InputEvent::PointerCancel, &mut vp, true);
        assert_eq!(outcome, GestureOutcome::BoxCancelled);
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_single_touch_pans() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(50.0, 50.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(80.0, 20.0)]),
            },
            &mut vp,
            false,
        );
        assert_eq!(vp.offset, p(30.0, -30.0));
        router.handle(InputEvent::TouchEnd { remaining: 0 }, &mut vp, false);
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_touch_on_point_is_not_routed() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(50.0, 50.0)]),
                target: PointerTarget::Point(PointId::from("1")),
            },
            &mut vp,
            false,
        );
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_pinch_zooms_proportionally_around_midpoint() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(100.0, 100.0), (200.0, 100.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        let mid = p(150.0, 100.0);
        let anchor = vp.screen_to_map(mid);

        let outcome = router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(50.0, 100.0), (250.0, 100.0)]),
            },
            &mut vp,
            false,
        );
        assert_eq!(outcome, GestureOutcome::ViewportChanged);
        assert!((vp.scale - 2.0).abs() < 1e-9);
        let after = vp.screen_to_map(mid);
        assert!((after.x - anchor.x).abs() < 1e-9);
        assert!((after.y - anchor.y).abs() < 1e-9);

        // Ratio is relative to the previous sample, not the gesture start
        router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(100.0, 100.0), (200.0, 100.0)]),
            },
            &mut vp,
            false,
        );
        assert!((vp.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_without_prior_sample_waits_one_event() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        // One finger down, then a second finger shows up in a move event
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(100.0, 100.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        let first = router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(100.0, 100.0), (200.0, 100.0)]),
            },
            &mut vp,
            false,
        );
        assert_eq!(first, GestureOutcome::Unchanged);
        assert!((vp.scale - 1.0).abs() < 1e-12);

        router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(100.0, 100.0), (250.0, 100.0)]),
            },
            &mut vp,
            false,
        );
        assert!((vp.scale - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_with_coincident_fingers_applies_no_zoom() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(100.0, 100.0), (100.0, 100.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        let outcome = router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(90.0, 100.0), (110.0, 100.0)]),
            },
            &mut vp,
            false,
        );
        assert_eq!(outcome, GestureOutcome::Unchanged);
        assert!((vp.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pinch_scale_is_clamped() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(0.0, 0.0), (1000.0, 0.0)]),
            },
            &mut vp,
            false,
        );
        assert!((vp.scale - MAX_SCALE).abs() < 1e-9);

        router.handle(
            InputEvent::TouchMove {
                touches: touches(&[(0.0, 0.0), (1.0, 0.0)]),
            },
            &mut vp,
            false,
        );
        assert!((vp.scale - MIN_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_ends_when_fewer_than_two_touches() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        router.handle(InputEvent::TouchEnd { remaining: 2 }, &mut vp, false);
        assert!(matches!(router.session(), GestureSession::Pinching { .. }));
        router.handle(InputEvent::TouchEnd { remaining: 1 }, &mut vp, false);
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_touch_cancel_resets() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        router.handle(
            InputEvent::TouchStart {
                touches: touches(&[(0.0, 0.0), (10.0, 0.0)]),
                target: PointerTarget::Canvas,
            },
            &mut vp,
            false,
        );
        router.handle(InputEvent::TouchCancel, &mut vp, false);
        assert_eq!(router.session(), GestureSession::Idle);
    }

    #[test]
    fn test_wheel_outside_viewport_is_ignored() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport::default();
        let size = Size::new(800.0, 600.0);
        let outcome = router.handle(
            InputEvent::Wheel {
                pos: p(801.0, 10.0),
                delta_y: -100.0,
                viewport: size,
            },
            &mut vp,
            false,
        );
        assert_eq!(outcome, GestureOutcome::Unchanged);
        assert_eq!(vp, Viewport::default());
    }

    #[test]
    fn test_wheel_zooms_around_cursor_without_clamp() {
        let mut router = GestureRouter::new();
        let mut vp = Viewport {
            scale: 10.0,
            offset: p(0.0, 0.0),
        };
        let cursor = p(400.0, 300.0);
        let before = vp.screen_to_map(cursor);
        router.handle(
            InputEvent::Wheel {
                pos: cursor,
                delta_y: -1.0,
                viewport: Size::new(800.0, 600.0),
            },
            &mut vp,
            false,
        );
        assert!((vp.scale - 11.0).abs() < 1e-9);
        let after = vp.screen_to_map(cursor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }
}
