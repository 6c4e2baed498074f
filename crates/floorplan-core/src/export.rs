//! Design model export and reimport.
//!
//! The design model is what the 3D visualizer and the shared store consume.
//! It is independent of pan and zoom: coordinates are scene units, wall and
//! opening dimensions are millimeters, and `settings.scale` converts between
//! them.

use crate::catalog::DEFAULT_FINISH;
use crate::config::{DEFAULT_WALL_HEIGHT_MM, DEFAULT_WALL_THICKNESS_MM, SCALE};
use crate::document::PlanDocument;
use crate::model::{Item, Opening, OpeningKind, Wall, WallThickness};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Design JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid design: {0}")]
    Invalid(String),
}

/// Wall thickness as written to the design model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThicknessRecord {
    #[serde(rename_all = "camelCase")]
    PerAxis { thickness_x: f64, thickness_y: f64 },
    Uniform {
        #[serde(default = "default_thickness")]
        thickness: f64,
    },
}

fn default_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS_MM
}

fn default_height() -> f64 {
    DEFAULT_WALL_HEIGHT_MM
}

fn default_scale() -> f64 {
    SCALE
}

fn default_finish() -> String {
    DEFAULT_FINISH.to_string()
}

impl From<WallThickness> for ThicknessRecord {
    fn from(thickness: WallThickness) -> Self {
        match thickness {
            WallThickness::Uniform(thickness) => ThicknessRecord::Uniform { thickness },
            WallThickness::PerAxis { x, y } => ThicknessRecord::PerAxis {
                thickness_x: x,
                thickness_y: y,
            },
        }
    }
}

impl From<ThicknessRecord> for WallThickness {
    fn from(record: ThicknessRecord) -> Self {
        match record {
            ThicknessRecord::Uniform { thickness } => WallThickness::Uniform(thickness),
            ThicknessRecord::PerAxis {
                thickness_x,
                thickness_y,
            } => WallThickness::PerAxis {
                x: thickness_x,
                y: thickness_y,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRecord {
    #[serde(rename = "type")]
    pub kind: OpeningKind,
    /// Fraction along the host wall.
    pub position: f64,
    /// Millimeters.
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(flatten)]
    pub thickness: ThicknessRecord,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openings: Vec<OpeningRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub kind: String,
    /// Center in scene units.
    pub x: f64,
    pub y: f64,
    /// Displayed size in scene units, live scale applied.
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default = "default_finish")]
    pub finish: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Millimeters per scene unit.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { scale: SCALE }
    }
}

/// The exported design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignModel {
    #[serde(default)]
    pub walls: Vec<WallRecord>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub settings: Settings,
}

impl DesignModel {
    /// Snapshot a document. Orphaned openings are left out.
    pub fn from_document(document: &PlanDocument, scale: f64) -> Self {
        let walls = document
            .walls()
            .iter()
            .map(|wall| WallRecord {
                x1: wall.start.x,
                y1: wall.start.y,
                x2: wall.end.x,
                y2: wall.end.y,
                thickness: wall.thickness.into(),
                height: wall.height_mm,
                openings: document
                    .openings_on(wall.id())
                    .map(|o| OpeningRecord {
                        kind: o.kind,
                        position: o.position,
                        width: o.width_mm,
                        height: o.height_mm,
                    })
                    .collect(),
            })
            .collect();

        let items = document
            .items()
            .iter()
            .map(|item| ItemRecord {
                kind: item.kind.clone(),
                x: item.position.x,
                y: item.position.y,
                width: item.scaled_width(),
                height: item.scaled_height(),
                rotation: item.rotation,
                cost: item.unit_cost,
                finish: item.finish.clone(),
            })
            .collect();

        Self {
            walls,
            items,
            settings: Settings { scale },
        }
    }

    /// Rebuild a document with fresh entity ids.
    pub fn into_document(self) -> PlanDocument {
        let mut document = PlanDocument::new();
        for record in self.walls {
            let wall = Wall::reconstruct(
                Uuid::new_v4(),
                Point::new(record.x1, record.y1),
                Point::new(record.x2, record.y2),
                record.thickness.into(),
                record.height,
            );
            let host = document.add_wall(wall);
            for opening in record.openings {
                document.add_opening(Opening::with_size(
                    opening.kind,
                    host,
                    opening.position,
                    opening.width,
                    opening.height,
                ));
            }
        }
        for record in self.items {
            document.add_item(Item::reconstruct(
                Uuid::new_v4(),
                record.kind,
                Point::new(record.x, record.y),
                record.width,
                record.height,
                record.rotation,
                record.cost,
                record.finish,
            ));
        }
        document
    }

    /// Convert scene coordinates to a different mm-per-unit scale.
    ///
    /// Millimeter fields (thickness, height, opening sizes) are unchanged.
    pub fn rescaled(mut self, scale: f64) -> Self {
        let from = self.settings.scale;
        if !(scale.is_finite() && scale > 0.0) || (from - scale).abs() < f64::EPSILON {
            return self;
        }
        let factor = from / scale;
        for wall in &mut self.walls {
            wall.x1 *= factor;
            wall.y1 *= factor;
            wall.x2 *= factor;
            wall.y2 *= factor;
        }
        for item in &mut self.items {
            item.x *= factor;
            item.y *= factor;
            item.width *= factor;
            item.height *= factor;
        }
        self.settings.scale = scale;
        self
    }

    /// Number of openings across all walls.
    pub fn opening_count(&self) -> usize {
        self.walls.iter().map(|w| w.openings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.items.is_empty()
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if !(self.settings.scale.is_finite() && self.settings.scale > 0.0) {
            return Err(ExportError::Invalid(format!("scale must be positive, got {}", self.settings.scale)));
        }
        for (index, wall) in self.walls.iter().enumerate() {
            if ![wall.x1, wall.y1, wall.x2, wall.y2].iter().all(|v| v.is_finite()) {
                return Err(ExportError::Invalid(format!("wall {index} has a non-finite endpoint")));
            }
        }
        for (index, item) in self.items.iter().enumerate() {
            if ![item.x, item.y, item.width, item.height].iter().all(|v| v.is_finite()) {
                return Err(ExportError::Invalid(format!("item {index} has a non-finite field")));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Parse stored data, treating absent or malformed input as an empty design.
    pub fn from_json_or_empty(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(model) => model,
            Err(e) => {
                log::warn!("Ignoring stored design: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemSpec;

    fn sample_document() -> PlanDocument {
        let mut doc = PlanDocument::new();
        let host = doc.add_wall(Wall::new(
            Point::new(0.0, 0.0),
            Point::new(400.0, 0.0),
            WallThickness::Uniform(150.0),
        ));
        doc.add_wall(Wall::new(
            Point::new(400.0, 0.0),
            Point::new(400.0, 300.0),
            WallThickness::PerAxis { x: 100.0, y: 200.0 },
        ));
        doc.add_opening(Opening::new(OpeningKind::Door, host, 0.5));
        let mut item = Item::from_spec(&ItemSpec::new("sink", 800.0, 600.0, 120.0), Point::new(100.0, 60.0), SCALE);
        item.resize_to(320.0, 120.0);
        item.set_rotation(90.0);
        doc.add_item(item);
        doc
    }

    #[test]
    fn test_schema_field_names() {
        let model = DesignModel::from_document(&sample_document(), SCALE);
        let value: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();

        let first = &value["walls"][0];
        assert_eq!(first["x2"], 400.0);
        assert_eq!(first["thickness"], 150.0);
        assert_eq!(first["height"], 2700.0);
        assert_eq!(first["openings"][0]["type"], "door");
        assert_eq!(first["openings"][0]["width"], 900.0);

        let second = &value["walls"][1];
        assert_eq!(second["thicknessX"], 100.0);
        assert_eq!(second["thicknessY"], 200.0);
        assert!(second.get("openings").is_none());

        let item = &value["items"][0];
        assert_eq!(item["type"], "sink");
        assert_eq!(item["width"], 320.0);
        assert_eq!(item["rotation"], 90.0);
        assert_eq!(item["finish"], "default");
        assert_eq!(value["settings"]["scale"], 5.0);
    }

    #[test]
    fn test_export_reimport_equivalent() {
        let model = DesignModel::from_document(&sample_document(), SCALE);
        let json = model.to_json().unwrap();
        let doc = DesignModel::from_json(&json).unwrap().into_document();

        assert_eq!(doc.walls().len(), 2);
        assert_eq!(doc.openings().len(), 1);
        assert_eq!(doc.items().len(), 1);
        assert_eq!(doc.openings()[0].host, doc.walls()[0].id());
        assert_eq!(DesignModel::from_document(&doc, SCALE), model);
    }

    #[test]
    fn test_export_ignores_viewport_and_orphans() {
        let mut doc = sample_document();
        let host = doc.walls()[0].id();
        doc.remove(crate::model::EntityRef::Wall(host));
        let model = DesignModel::from_document(&doc, SCALE);
        assert_eq!(model.walls.len(), 1);
        assert_eq!(model.opening_count(), 0);
    }

    #[test]
    fn test_rescaled_keeps_millimeter_fields() {
        let model = DesignModel::from_document(&sample_document(), 10.0).rescaled(SCALE);
        assert_eq!(model.settings.scale, SCALE);
        assert_eq!(model.walls[0].x2, 800.0);
        assert_eq!(model.walls[0].thickness, ThicknessRecord::Uniform { thickness: 150.0 });
        assert_eq!(model.walls[0].openings[0].width, 900.0);
        assert_eq!(model.items[0].width, 640.0);

        let same = DesignModel::from_document(&sample_document(), SCALE);
        assert_eq!(same.clone().rescaled(SCALE), same);
        assert_eq!(same.clone().rescaled(f64::NAN), same);
    }

    #[test]
    fn test_missing_fields_default() {
        let model = DesignModel::from_json(
            r#"{ "walls": [ { "x1": 0, "y1": 0, "x2": 10, "y2": 0 } ],
                 "items": [ { "type": "oven", "x": 1, "y": 2, "width": 3, "height": 4 } ] }"#,
        )
        .unwrap();
        assert_eq!(model.walls[0].thickness, ThicknessRecord::Uniform { thickness: 100.0 });
        assert!((model.walls[0].height - 2700.0).abs() < f64::EPSILON);
        assert_eq!(model.items[0].finish, "default");
        assert!(model.items[0].cost.abs() < f64::EPSILON);
        assert!((model.settings.scale - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_is_empty() {
        assert!(DesignModel::from_json_or_empty(None).is_empty());
        assert!(DesignModel::from_json_or_empty(Some("not json")).is_empty());
        assert!(DesignModel::from_json_or_empty(Some(r#"{"settings":{"scale":0}}"#)).is_empty());
        assert!(DesignModel::from_json("{}").unwrap().is_empty());
    }
}
