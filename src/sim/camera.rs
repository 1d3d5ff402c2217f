//! Camera pan/zoom offsets
//!
//! The camera never leaves the world: after every pan or zoom change the pan
//! offset is re-clamped so the visible viewport (half-extents 400/zoom by
//! 300/zoom) stays inside [-400,400] x [-300,300].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// Pan offset of the viewport center, world units
    pub pan: Vec2,
    /// Zoom factor in [1, 4]
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Half-extents of the visible viewport at the current zoom
    #[inline]
    pub fn visible_half_extents(&self) -> Vec2 {
        Vec2::new(WORLD_HALF_WIDTH / self.zoom, WORLD_HALF_HEIGHT / self.zoom)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
        self.clamp_pan();
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
        self.clamp_pan();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
        self.clamp_pan();
    }

    /// Pull the pan offset back so the viewport edges stay inside the world
    pub fn clamp_pan(&mut self) {
        let half = self.visible_half_extents();
        if self.pan.x - half.x < -WORLD_HALF_WIDTH {
            self.pan.x = -WORLD_HALF_WIDTH + half.x;
        } else if self.pan.x + half.x > WORLD_HALF_WIDTH {
            self.pan.x = WORLD_HALF_WIDTH - half.x;
        }
        if self.pan.y - half.y < -WORLD_HALF_HEIGHT {
            self.pan.y = -WORLD_HALF_HEIGHT + half.y;
        } else if self.pan.y + half.y > WORLD_HALF_HEIGHT {
            self.pan.y = WORLD_HALF_HEIGHT - half.y;
        }
    }

    /// Viewport bounds as (min, max) world corners
    pub fn viewport(&self) -> (Vec2, Vec2) {
        let half = self.visible_half_extents();
        (self.pan - half, self.pan + half)
    }

    /// Map a window-space pointer position (origin top-left, pixels) to the
    /// world point currently under it
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let half = self.visible_half_extents();
        Vec2::new(
            self.pan.x + (screen.x / WINDOW_WIDTH - 0.5) * 2.0 * half.x,
            self.pan.y + (0.5 - screen.y / WINDOW_HEIGHT) * 2.0 * half.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport_inside_world(camera: &Camera) -> bool {
        let (min, max) = camera.viewport();
        min.x >= -WORLD_HALF_WIDTH - 1e-3
            && max.x <= WORLD_HALF_WIDTH + 1e-3
            && min.y >= -WORLD_HALF_HEIGHT - 1e-3
            && max.y <= WORLD_HALF_HEIGHT + 1e-3
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::default();
        camera.zoom_out();
        assert_eq!(camera.zoom, ZOOM_MIN);
        for _ in 0..100 {
            camera.zoom_in();
        }
        assert_eq!(camera.zoom, ZOOM_MAX);
    }

    #[test]
    fn test_pan_is_noop_at_full_view() {
        // At zoom 1 the viewport is the whole world, so pan is pinned to 0
        let mut camera = Camera::default();
        camera.pan_by(Vec2::new(200.0, -150.0));
        assert_eq!(camera.pan, Vec2::ZERO);
    }

    #[test]
    fn test_screen_center_maps_to_pan() {
        let mut camera = Camera::default();
        camera.zoom = 2.0;
        camera.pan = Vec2::new(50.0, -30.0);
        let world = camera.screen_to_world(Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0));
        assert!((world - camera.pan).length() < 1e-3);
    }

    #[test]
    fn test_screen_corners_map_to_viewport() {
        let mut camera = Camera::default();
        camera.zoom = 2.0;
        camera.pan = Vec2::new(100.0, 50.0);
        let top_left = camera.screen_to_world(Vec2::ZERO);
        let (min, max) = camera.viewport();
        assert!((top_left.x - min.x).abs() < 1e-3);
        assert!((top_left.y - max.y).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_viewport_never_exits_world(ops in proptest::collection::vec(0u8..4, 0..64)) {
            let mut camera = Camera::default();
            for op in ops {
                match op {
                    0 => camera.zoom_in(),
                    1 => camera.zoom_out(),
                    2 => camera.pan_by(Vec2::new(25.0, -10.0)),
                    _ => camera.pan_by(Vec2::new(-40.0, 35.0)),
                }
                prop_assert!(viewport_inside_world(&camera));
                prop_assert!(camera.zoom >= ZOOM_MIN && camera.zoom <= ZOOM_MAX);
            }
        }
    }
}
