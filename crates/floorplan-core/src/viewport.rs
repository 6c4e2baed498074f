//! Viewport module for pan/zoom transforms and the grid pattern.

use crate::config::{EditorConfig, GRID_SIZE, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Grid lines never get thinner than this on screen.
pub const MIN_GRID_STROKE: f64 = 0.5;

/// Screen-space description of the repeating grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPattern {
    /// Cell size in screen pixels.
    pub cell_size: f64,
    /// Line width in screen pixels.
    pub stroke_width: f64,
}

/// Viewport manages the view transform for the drawing surface.
///
/// Panning and zooming only change how the plan is projected to the screen;
/// the geometry model is never touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom factor.
    pub zoom: f64,
    /// Minimum allowed zoom factor.
    pub min_zoom: f64,
    /// Maximum allowed zoom factor.
    pub max_zoom: f64,
    /// Step used by zoom buttons and wheel notches.
    pub zoom_step: f64,
    /// Grid cell size in scene units.
    pub grid_size: f64,
    /// Size of the drawing container in pixels.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            grid_size: GRID_SIZE,
            size: Size::new(800.0, 600.0),
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport using the bounds from an editor config.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            grid_size: config.grid_size,
            ..Self::default()
        }
    }

    /// Scene to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to scene transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a pointer position to scene coordinates.
    pub fn screen_to_scene(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a scene point to screen coordinates.
    pub fn scene_to_screen(&self, scene_point: Point) -> Point {
        self.transform() * scene_point
    }

    /// Set the zoom factor, clamped to the allowed range.
    /// Returns true if the zoom changed. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (clamped - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        self.zoom = clamped;
        true
    }

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + self.zoom_step)
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - self.zoom_step)
    }

    /// Zoom by one wheel notch, keeping the scene point under the cursor fixed.
    ///
    /// Scrolling up (negative delta) zooms in.
    pub fn zoom_by_wheel(&mut self, screen_point: Point, delta_y: f64) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let direction = -delta_y.signum();
        self.zoom_at(screen_point, 1.0 + direction * self.zoom_step)
    }

    /// Zoom by a factor, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        if !factor.is_finite() || !screen_point.is_finite() {
            return false;
        }
        let scene_point = self.screen_to_scene(screen_point);
        if !self.set_zoom(self.zoom * factor) {
            return false;
        }

        // Adjust offset so scene_point stays at screen_point
        let new_screen = self.scene_to_screen(scene_point);
        self.offset += screen_point - new_screen;
        true
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Reset to 100% zoom with no pan.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Update the container size.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// The scene-space rectangle currently visible in the container.
    pub fn visible_scene_rect(&self) -> Rect {
        let top_left = self.screen_to_scene(Point::ZERO);
        let bottom_right = self.screen_to_scene(Point::new(self.size.width, self.size.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Grid cell appearance at the current zoom.
    pub fn grid_pattern(&self) -> GridPattern {
        GridPattern {
            cell_size: self.grid_size * self.zoom,
            stroke_width: (1.0 / self.zoom).max(MIN_GRID_STROKE),
        }
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_scene_with_offset() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(50.0, 100.0);
        let scene = viewport.screen_to_scene(Point::new(100.0, 200.0));
        assert!((scene.x - 50.0).abs() < f64::EPSILON);
        assert!((scene.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_scene_with_zoom() {
        let mut viewport = Viewport::new();
        viewport.zoom = 2.0;
        let scene = viewport.screen_to_scene(Point::new(100.0, 200.0));
        assert!((scene.x - 50.0).abs() < f64::EPSILON);
        assert!((scene.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = viewport.scene_to_screen(viewport.screen_to_scene(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_set_zoom_clamps() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(0.001);
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        viewport.set_zoom(1000.0);
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
        assert!(!viewport.set_zoom(1000.0));
    }

    #[test]
    fn test_set_zoom_ignores_nan() {
        let mut vp = Viewport::new();
        assert!(!vp.set_zoom(f64::NAN));
        assert!(!vp.set_zoom(f64::INFINITY));
        assert_eq!(vp.zoom, 1.0);
        assert!(vp.zoom_in());
    }

    #[test]
    fn test_zoom_at_ignores_non_finite_input() {
        let mut vp = Viewport::new();
        assert!(!vp.zoom_at(Point::new(100.0, 100.0), f64::NAN));
        assert!(!vp.zoom_at(Point::new(100.0, 100.0), f64::INFINITY));
        assert!(!vp.zoom_at(Point::new(f64::NAN, 0.0), 1.1));
        assert!(!vp.zoom_by_wheel(Point::new(100.0, 100.0), f64::NAN));
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn test_zoom_in_repeatedly_stops_at_max() {
        let mut viewport = Viewport::new();
        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert!((viewport.zoom - MAX_ZOOM).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_out_repeatedly_stops_at_min() {
        let mut viewport = Viewport::new();
        for _ in 0..50 {
            viewport.zoom_out();
        }
        assert!(viewport.zoom >= MIN_ZOOM);
        assert!((viewport.zoom - MIN_ZOOM).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_keeps_cursor_anchor() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(40.0, 10.0);
        let cursor = Point::new(300.0, 200.0);
        let before = viewport.screen_to_scene(cursor);

        assert!(viewport.zoom_by_wheel(cursor, -120.0));
        assert!((viewport.zoom - 1.1).abs() < 1e-9);

        let after = viewport.screen_to_scene(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_down_zooms_out() {
        let mut viewport = Viewport::new();
        viewport.zoom_by_wheel(Point::ZERO, 53.0);
        assert!((viewport.zoom - 0.9).abs() < 1e-9);
        assert!(!viewport.zoom_by_wheel(Point::ZERO, 0.0));
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(10.0, 20.0));
        assert!((viewport.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - 20.0).abs() < f64::EPSILON);
        viewport.reset();
        assert_eq!(viewport.offset, Vec2::ZERO);
    }

    #[test]
    fn test_grid_pattern_stroke_floor() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(3.0);
        let pattern = viewport.grid_pattern();
        assert!((pattern.cell_size - 60.0).abs() < 1e-9);
        assert!((pattern.stroke_width - MIN_GRID_STROKE).abs() < f64::EPSILON);

        viewport.set_zoom(0.1);
        let pattern = viewport.grid_pattern();
        assert!((pattern.cell_size - 2.0).abs() < 1e-9);
        assert!((pattern.stroke_width - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_visible_scene_rect() {
        let mut viewport = Viewport::new();
        viewport.resize(Size::new(400.0, 300.0));
        viewport.zoom = 2.0;
        let rect = viewport.visible_scene_rect();
        assert!((rect.width() - 200.0).abs() < 1e-9);
        assert!((rect.height() - 150.0).abs() < 1e-9);
    }
}
