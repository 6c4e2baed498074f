//! Wall entity.

use super::{point_to_segment_dist, EntityId};
use crate::config::DEFAULT_WALL_HEIGHT_MM;
use kurbo::{Line, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dominant axis of a wall's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Wall thickness in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WallThickness {
    /// Same thickness in every direction.
    Uniform(f64),
    /// Thickness chosen by the wall's dominant axis.
    PerAxis { x: f64, y: f64 },
}

impl Default for WallThickness {
    fn default() -> Self {
        WallThickness::Uniform(crate::config::DEFAULT_WALL_THICKNESS_MM)
    }
}

impl WallThickness {
    /// Thickness for a wall running along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match (*self, axis) {
            (WallThickness::Uniform(t), _) => t,
            (WallThickness::PerAxis { x, .. }, Axis::X) => x,
            (WallThickness::PerAxis { y, .. }, Axis::Y) => y,
        }
    }
}

/// A straight wall segment. Endpoints are in scene units, height in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub(crate) id: EntityId,
    pub start: Point,
    pub end: Point,
    pub thickness: WallThickness,
    pub height_mm: f64,
}

impl Wall {
    /// Create a wall with the default height.
    pub fn new(start: Point, end: Point, thickness: WallThickness) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            thickness,
            height_mm: DEFAULT_WALL_HEIGHT_MM,
        }
    }

    /// Reconstruct a wall with a specific ID (for import).
    pub(crate) fn reconstruct(id: EntityId, start: Point, end: Point, thickness: WallThickness, height_mm: f64) -> Self {
        Self {
            id,
            start,
            end,
            thickness,
            height_mm,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Builder-style height override.
    pub fn with_height(mut self, height_mm: f64) -> Self {
        self.height_mm = height_mm;
        self
    }

    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    /// Euclidean length in scene units.
    pub fn length(&self) -> f64 {
        self.delta().hypot()
    }

    /// Direction in radians, `atan2(dy, dx)`.
    pub fn angle(&self) -> f64 {
        self.delta().atan2()
    }

    /// Axis the wall mostly runs along. Diagonals at exactly 45 degrees count as X.
    pub fn dominant_axis(&self) -> Axis {
        let d = self.delta();
        if d.x.abs() >= d.y.abs() { Axis::X } else { Axis::Y }
    }

    /// Thickness in millimeters for the wall's current direction.
    pub fn effective_thickness_mm(&self) -> f64 {
        self.thickness.along(self.dominant_axis())
    }

    /// Point at fraction `t` from start to end.
    pub fn point_at(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }

    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// Fraction along the wall of the closest point to `point`, clamped to `[0, 1]`.
    pub fn project(&self, point: Point) -> f64 {
        let d = self.delta();
        let len_sq = d.hypot2();
        if len_sq < f64::EPSILON {
            return 0.0;
        }
        ((point - self.start).dot(d) / len_sq).clamp(0.0, 1.0)
    }

    pub fn distance_to(&self, point: Point) -> f64 {
        point_to_segment_dist(point, self.start, self.end)
    }

    /// Hit test against the drawn stroke, `scale` being millimeters per scene unit.
    pub fn hit_test(&self, point: Point, tolerance: f64, scale: f64) -> bool {
        let half_stroke = self.effective_thickness_mm() / scale / 2.0;
        self.distance_to(point) <= half_stroke + tolerance
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn as_line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

/// Force `end` onto the horizontal or vertical line through `start`.
pub(crate) fn constrain_orthogonal(start: Point, end: Point) -> Point {
    let d = end - start;
    if d.x.abs() >= d.y.abs() {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    }
}
