//! Placed furniture and fixtures.

use super::{hits_oriented_rect, oriented_rect, EntityId};
use crate::catalog::{ItemSpec, DEFAULT_FINISH};
use kurbo::{BezPath, Point, Rect, Shape as _, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog item placed on the plan.
///
/// `width`/`height` are the base size in scene units; `scale_x`/`scale_y`
/// hold any live resize applied in select mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub(crate) id: EntityId,
    pub kind: String,
    /// Center in scene units.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub unit_cost: f64,
    pub finish: String,
}

impl Item {
    /// Place a catalog item centered at `position`, converting its millimeter size.
    pub fn from_spec(spec: &ItemSpec, position: Point, scale: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: spec.kind.clone(),
            position,
            width: spec.width_mm / scale,
            height: spec.height_mm / scale,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            unit_cost: spec.unit_cost,
            finish: DEFAULT_FINISH.to_string(),
        }
    }

    /// Reconstruct an item with explicit fields (for import).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn reconstruct(
        id: EntityId,
        kind: String,
        position: Point,
        width: f64,
        height: f64,
        rotation: f64,
        unit_cost: f64,
        finish: String,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation,
            unit_cost,
            finish,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Displayed width including the live scale.
    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale_x
    }

    /// Displayed height including the live scale.
    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale_y
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation.to_radians()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Resize to an absolute displayed size by adjusting the live scale.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        if self.width > 0.0 {
            self.scale_x = width / self.width;
        }
        if self.height > 0.0 {
            self.scale_y = height / self.height;
        }
    }

    /// Set the rotation, normalized to `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn outline(&self) -> BezPath {
        oriented_rect(self.position, self.scaled_width(), self.scaled_height(), self.rotation_radians())
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        hits_oriented_rect(
            point,
            self.position,
            self.scaled_width(),
            self.scaled_height(),
            self.rotation_radians(),
            tolerance,
        )
    }

    pub fn bounds(&self) -> Rect {
        self.outline().bounding_box()
    }
}
