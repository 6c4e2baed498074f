//! Snap functionality for aligning points to the grid and to wall endpoints.

use crate::config::{EditorConfig, ENDPOINT_SNAP_THRESHOLD, ENDPOINT_SNAP_WINDOW, GRID_SIZE};
use crate::document::PlanDocument;
use crate::model::Wall;
use kurbo::Point;

/// Where a snapped point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapSource {
    Grid,
    Endpoint,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub source: SnapSource,
}

/// Round each coordinate to the nearest multiple of `pitch`.
pub fn snap_to_grid(point: Point, pitch: f64) -> Point {
    Point::new((point.x / pitch).round() * pitch, (point.y / pitch).round() * pitch)
}

/// Closest wall endpoint strictly within `limit` of `point`.
///
/// Walls are scanned in the order given, start before end. A later endpoint
/// only wins when strictly closer, so ties go to the first one encountered.
pub fn nearest_endpoint<'a>(point: Point, walls: impl IntoIterator<Item = &'a Wall>, limit: f64) -> Option<Point> {
    let mut best = None;
    let mut best_dist = limit;
    for wall in walls {
        for end in wall.endpoints() {
            let dist = point.distance(end);
            if dist < best_dist {
                best_dist = dist;
                best = Some(end);
            }
        }
    }
    best
}

/// Grid and endpoint snapping with zoom-aware pitch and threshold.
///
/// Endpoint lookup is bounded: only the `window` most recently committed
/// walls are candidates. On very large plans an older endpoint can be missed;
/// the point then falls back to the grid.
#[derive(Debug, Clone)]
pub struct SnapEngine {
    /// Grid cell size in scene units, scaled by zoom when snapping.
    pub grid_size: f64,
    /// Endpoint radius in scene units, scaled by zoom when snapping.
    pub threshold: f64,
    /// Number of most recent walls scanned for endpoints.
    pub window: usize,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            threshold: ENDPOINT_SNAP_THRESHOLD,
            window: ENDPOINT_SNAP_WINDOW,
        }
    }
}

impl SnapEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            grid_size: config.grid_size,
            threshold: config.snap_threshold,
            window: config.snap_window,
        }
    }

    /// Grid pitch at the given zoom.
    pub fn pitch(&self, zoom: f64) -> f64 {
        self.grid_size * zoom
    }

    /// Walls shorter than this are discarded instead of committed.
    pub fn min_wall_length(&self, zoom: f64) -> f64 {
        self.pitch(zoom) / 2.0
    }

    pub fn snap_to_grid(&self, point: Point, zoom: f64) -> Point {
        snap_to_grid(point, self.pitch(zoom))
    }

    /// Nearest endpoint among the document's most recent walls.
    pub fn find_nearest_endpoint(&self, point: Point, document: &PlanDocument, zoom: f64) -> Option<Point> {
        nearest_endpoint(point, document.recent_walls(self.window), self.threshold * zoom)
    }

    /// Grid snap, then let a nearby wall endpoint override it.
    pub fn snap(&self, point: Point, document: &PlanDocument, zoom: f64) -> SnapResult {
        let grid = self.snap_to_grid(point, zoom);
        match self.find_nearest_endpoint(grid, document, zoom) {
            Some(end) => SnapResult {
                point: end,
                source: SnapSource::Endpoint,
            },
            None => SnapResult {
                point: grid,
                source: SnapSource::Grid,
            },
        }
    }
}
