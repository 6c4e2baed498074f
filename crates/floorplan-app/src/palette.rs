//! Design-item palette: the placeable kitchen items and the unit costs of
//! everything that can be priced.

use floorplan_core::costing::WALL_TYPE;
use floorplan_core::{Catalog, ItemSpec, OpeningKind};
use serde::{Deserialize, Serialize};

/// Unit cost of one wall segment.
pub const WALL_COST: f64 = 50.0;
pub const DOOR_COST: f64 = 150.0;
pub const WINDOW_COST: f64 = 100.0;

/// A palette of placeable items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub items: Vec<ItemSpec>,
    #[serde(default = "default_wall_cost")]
    pub wall_cost: f64,
    #[serde(default = "default_door_cost")]
    pub door_cost: f64,
    #[serde(default = "default_window_cost")]
    pub window_cost: f64,
}

fn default_wall_cost() -> f64 {
    WALL_COST
}

fn default_door_cost() -> f64 {
    DOOR_COST
}

fn default_window_cost() -> f64 {
    WINDOW_COST
}

impl Default for Palette {
    fn default() -> Self {
        Self::kitchen()
    }
}

impl Palette {
    /// The built-in kitchen palette. Sizes are millimeters.
    pub fn kitchen() -> Self {
        Self {
            items: vec![
                ItemSpec::new("base-cabinet", 600.0, 600.0, 200.0),
                ItemSpec::new("wall-cabinet", 600.0, 350.0, 150.0),
                ItemSpec::new("tall-unit", 600.0, 600.0, 300.0),
                ItemSpec::new("sink", 800.0, 600.0, 120.0),
                ItemSpec::new("oven", 600.0, 600.0, 300.0),
                ItemSpec::new("refrigerator", 600.0, 650.0, 0.0),
            ],
            wall_cost: WALL_COST,
            door_cost: DOOR_COST,
            window_cost: WINDOW_COST,
        }
    }

    pub fn get(&self, kind: &str) -> Option<&ItemSpec> {
        self.items.iter().find(|spec| spec.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|spec| spec.kind.as_str())
    }

    /// Build the cost lookup for walls, openings and every palette item.
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::new()
            .with(WALL_TYPE, self.wall_cost)
            .with(OpeningKind::Door.type_tag(), self.door_cost)
            .with(OpeningKind::Window.type_tag(), self.window_cost);
        catalog.extend_specs(&self.items);
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitchen_palette_lookup() {
        let palette = Palette::kitchen();
        let oven = palette.get("oven").unwrap();
        assert_eq!((oven.width_mm, oven.height_mm), (600.0, 600.0));
        assert!(palette.get("bathtub").is_none());
        assert_eq!(palette.kinds().count(), 6);
    }

    #[test]
    fn test_catalog_costs() {
        let catalog = Palette::kitchen().catalog();
        assert_eq!(catalog.unit_cost("wall"), Some(50.0));
        assert_eq!(catalog.unit_cost("door"), Some(150.0));
        assert_eq!(catalog.unit_cost("window"), Some(100.0));
        assert_eq!(catalog.unit_cost("tall-unit"), Some(300.0));
        assert_eq!(catalog.unit_cost("sink"), Some(120.0));
    }

    #[test]
    fn test_palette_json_defaults_costs() {
        let palette: Palette =
            serde_json::from_str(r#"{ "items": [{ "type": "sink", "width": 800, "height": 600, "unitCost": 99 }] }"#)
                .unwrap();
        assert_eq!(palette.wall_cost, WALL_COST);
        assert_eq!(palette.catalog().unit_cost("sink"), Some(99.0));
    }
}
