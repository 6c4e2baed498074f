//! Plan entities: walls, openings and placed items.

mod item;
mod opening;
mod wall;

pub use item::Item;
pub use opening::{Opening, OpeningKind, OpeningPlacement};
pub use wall::{Axis, Wall, WallThickness};
pub(crate) use wall::constrain_orthogonal;

use kurbo::{Affine, BezPath, Point, Rect, Shape as _, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for plan entities.
pub type EntityId = Uuid;

/// A typed reference to an entity stored in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Wall(EntityId),
    Opening(EntityId),
    Item(EntityId),
}

impl EntityRef {
    /// The referenced entity's id.
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Wall(id) | EntityRef::Opening(id) | EntityRef::Item(id) => *id,
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, EntityRef::Wall(_))
    }
}

/// Distance from a point to a line segment (a -> b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Express `point` in the frame of a rectangle centered at `center` and rotated by `angle` radians.
pub(crate) fn to_local(point: Point, center: Point, angle: f64) -> Vec2 {
    let inverse = Affine::rotate(-angle) * Affine::translate(-center.to_vec2());
    (inverse * point).to_vec2()
}

/// Outline of a rotated rectangle in scene coordinates.
pub(crate) fn oriented_rect(center: Point, width: f64, height: f64, angle: f64) -> BezPath {
    let rect = Rect::from_center_size(Point::ZERO, (width, height));
    let placement = Affine::translate(center.to_vec2()) * Affine::rotate(angle);
    placement * rect.to_path(0.1)
}

/// Whether `point` falls inside a rotated rectangle, grown by `tolerance` on every side.
pub(crate) fn hits_oriented_rect(
    point: Point,
    center: Point,
    width: f64,
    height: f64,
    angle: f64,
    tolerance: f64,
) -> bool {
    let local = to_local(point, center, angle);
    local.x.abs() <= width / 2.0 + tolerance && local.y.abs() <= height / 2.0 + tolerance
}
