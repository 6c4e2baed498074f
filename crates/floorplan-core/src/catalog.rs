//! Catalog values supplied by the design-item palette.
//!
//! The core never defines catalog content; it only consumes the sizes and
//! costs handed to it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Finish label used when none was chosen.
pub const DEFAULT_FINISH: &str = "default";

/// A placeable item type from the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "width")]
    pub width_mm: f64,
    #[serde(rename = "height")]
    pub height_mm: f64,
    #[serde(default)]
    pub unit_cost: f64,
}

impl ItemSpec {
    pub fn new(kind: impl Into<String>, width_mm: f64, height_mm: f64, unit_cost: f64) -> Self {
        Self {
            kind: kind.into(),
            width_mm,
            height_mm,
            unit_cost,
        }
    }
}

/// Unit costs keyed by type tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    costs: HashMap<String, f64>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the unit cost for a type tag.
    pub fn insert(&mut self, kind: impl Into<String>, unit_cost: f64) {
        self.costs.insert(kind.into(), unit_cost);
    }

    /// Builder-style variant of [`Catalog::insert`].
    pub fn with(mut self, kind: impl Into<String>, unit_cost: f64) -> Self {
        self.insert(kind, unit_cost);
        self
    }

    /// Register every spec's unit cost.
    pub fn extend_specs<'a>(&mut self, specs: impl IntoIterator<Item = &'a ItemSpec>) {
        for spec in specs {
            self.insert(spec.kind.clone(), spec.unit_cost);
        }
    }

    pub fn unit_cost(&self, kind: &str) -> Option<f64> {
        self.costs.get(kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_json_uses_palette_names() {
        let spec: ItemSpec =
            serde_json::from_str(r#"{ "type": "oven", "width": 600, "height": 600, "unitCost": 300 }"#).unwrap();
        assert_eq!(spec.kind, "oven");
        assert!((spec.width_mm - 600.0).abs() < f64::EPSILON);
        assert!((spec.unit_cost - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = Catalog::new().with("wall", 50.0);
        catalog.extend_specs(&[ItemSpec::new("sink", 800.0, 600.0, 120.0)]);
        assert_eq!(catalog.unit_cost("wall"), Some(50.0));
        assert_eq!(catalog.unit_cost("sink"), Some(120.0));
        assert_eq!(catalog.unit_cost("jacuzzi"), None);
    }
}
