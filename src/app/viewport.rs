use eframe::egui::{Pos2, Rect, Vec2};

/// Zoom clamp applied to every gesture.
pub(in crate::app) const ZOOM_RANGE: (f32, f32) = (0.5, 4.0);

/// Pan/zoom transform shared by both layout modes. World origin maps to the
/// canvas center plus `pan`; `zoom` is uniform.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Viewport {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Viewport {
    pub(in crate::app) fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    pub(in crate::app) fn world_to_screen(&self, rect: Rect, world: Vec2) -> Pos2 {
        rect.center() + self.pan + world * self.zoom
    }

    pub(in crate::app) fn screen_to_world(&self, rect: Rect, screen: Pos2) -> Vec2 {
        (screen - rect.center() - self.pan) / self.zoom
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Scales by `factor` (clamped to `ZOOM_RANGE`) while keeping the world
    /// point under `pointer` stationary on screen.
    pub(in crate::app) fn zoom_around(&mut self, rect: Rect, pointer: Pos2, factor: f32) {
        let world_before = self.screen_to_world(rect, pointer);
        self.zoom = (self.zoom * factor).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
        self.pan = pointer - rect.center() - world_before * self.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(900.0, 600.0))
    }

    #[test]
    fn round_trips_between_world_and_screen() {
        let mut viewport = Viewport::new();
        viewport.pan_by(vec2(40.0, -12.0));
        viewport.zoom = 1.7;

        let world = vec2(123.0, -456.0);
        let screen = viewport.world_to_screen(canvas(), world);
        let back = viewport.screen_to_world(canvas(), screen);
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn zoom_never_escapes_clamp_bounds() {
        let mut viewport = Viewport::new();
        let pointer = pos2(300.0, 200.0);

        for _ in 0..64 {
            viewport.zoom_around(canvas(), pointer, 1.3);
        }
        assert!(viewport.zoom <= ZOOM_RANGE.1);

        for _ in 0..128 {
            viewport.zoom_around(canvas(), pointer, 0.7);
        }
        assert!(viewport.zoom >= ZOOM_RANGE.0);
    }

    #[test]
    fn zoom_keeps_pointer_world_position_fixed() {
        let mut viewport = Viewport::new();
        let pointer = pos2(612.0, 130.0);

        let before = viewport.screen_to_world(canvas(), pointer);
        viewport.zoom_around(canvas(), pointer, 1.5);
        let after = viewport.screen_to_world(canvas(), pointer);

        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn pan_accumulates_gesture_deltas() {
        let mut viewport = Viewport::new();
        viewport.pan_by(vec2(10.0, 5.0));
        viewport.pan_by(vec2(-4.0, 2.0));
        assert_eq!(viewport.pan, vec2(6.0, 7.0));
    }
}
