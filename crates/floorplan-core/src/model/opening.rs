//! Door and window openings anchored to a host wall.

use super::{hits_oriented_rect, oriented_rect, EntityId, Wall};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Default (width, height) in millimeters.
    pub fn default_size_mm(self) -> (f64, f64) {
        match self {
            OpeningKind::Door => (900.0, 2100.0),
            OpeningKind::Window => (1200.0, 1200.0),
        }
    }

    /// Type tag used in exports and cost records.
    pub fn type_tag(self) -> &'static str {
        match self {
            OpeningKind::Door => "door",
            OpeningKind::Window => "window",
        }
    }
}

/// An opening in a wall.
///
/// The host is referenced by id only. Removing the host leaves the opening
/// orphaned: it stays stored but has no placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub(crate) id: EntityId,
    pub kind: OpeningKind,
    pub host: EntityId,
    /// Fraction along the host wall, in `[0, 1]`.
    pub position: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Where an opening sits in the scene, derived from its host wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningPlacement {
    pub center: Point,
    /// Host wall angle in radians.
    pub angle: f64,
    /// Extent along the wall in scene units.
    pub length: f64,
    /// Extent across the wall in scene units.
    pub depth: f64,
}

impl OpeningPlacement {
    pub fn outline(&self) -> BezPath {
        oriented_rect(self.center, self.length, self.depth, self.angle)
    }

    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        hits_oriented_rect(point, self.center, self.length, self.depth, self.angle, tolerance)
    }
}

impl Opening {
    /// Create an opening with the kind's default size.
    pub fn new(kind: OpeningKind, host: EntityId, position: f64) -> Self {
        let (width_mm, height_mm) = kind.default_size_mm();
        Self::with_size(kind, host, position, width_mm, height_mm)
    }

    pub fn with_size(kind: OpeningKind, host: EntityId, position: f64, width_mm: f64, height_mm: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            host,
            position: position.clamp(0.0, 1.0),
            width_mm,
            height_mm,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Place the opening on `wall`, with `scale` millimeters per scene unit.
    pub fn placement(&self, wall: &Wall, scale: f64) -> OpeningPlacement {
        OpeningPlacement {
            center: wall.point_at(self.position),
            angle: wall.angle(),
            length: self.width_mm / scale,
            depth: wall.effective_thickness_mm() / scale,
        }
    }

    /// Slide along the host wall to the projection of `point`.
    pub fn slide_to(&mut self, wall: &Wall, point: Point) {
        self.position = wall.project(point);
    }
}
