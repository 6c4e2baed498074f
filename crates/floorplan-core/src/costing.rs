//! Flat cost records for the costing page.

use crate::catalog::{Catalog, DEFAULT_FINISH};
use crate::document::PlanDocument;
use serde::{Deserialize, Serialize};

/// Type tag used for walls in cost records.
pub const WALL_TYPE: &str = "wall";

/// One placed entity as seen by the cost module, which aggregates by type and finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub cost: f64,
    #[serde(default = "default_finish")]
    pub finish: String,
}

fn default_finish() -> String {
    DEFAULT_FINISH.to_string()
}

impl CostRecord {
    pub fn new(kind: impl Into<String>, cost: f64, finish: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            cost,
            finish: finish.into(),
        }
    }
}

/// One record per wall, hosted opening and item, in that order.
///
/// Walls and openings are priced from `catalog`; items carry their own unit
/// cost. Types the catalog does not know cost 0.
pub fn cost_records(document: &PlanDocument, catalog: &Catalog) -> Vec<CostRecord> {
    let priced = |kind: &str| CostRecord::new(kind, catalog.unit_cost(kind).unwrap_or(0.0), DEFAULT_FINISH);

    let walls = document.walls().iter().map(|_| priced(WALL_TYPE));
    let openings = document.hosted_openings().map(|(opening, _)| priced(opening.kind.type_tag()));
    let items = document
        .items()
        .iter()
        .map(|item| CostRecord::new(item.kind.clone(), item.unit_cost, item.finish.clone()));

    walls.chain(openings).chain(items).collect()
}

/// Sum of all record costs.
pub fn total_cost(records: &[CostRecord]) -> f64 {
    records.iter().map(|r| r.cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemSpec;
    use crate::model::{Item, Opening, OpeningKind, Wall, WallThickness};
    use kurbo::Point;

    fn catalog() -> Catalog {
        Catalog::new().with("wall", 50.0).with("door", 150.0)
    }

    #[test]
    fn test_one_record_per_entity() {
        let mut doc = PlanDocument::new();
        let a = doc.add_wall(Wall::new(Point::ZERO, Point::new(100.0, 0.0), WallThickness::default()));
        doc.add_wall(Wall::new(Point::new(100.0, 0.0), Point::new(100.0, 100.0), WallThickness::default()));
        doc.add_opening(Opening::new(OpeningKind::Door, a, 0.5));
        doc.add_opening(Opening::new(OpeningKind::Window, a, 0.2));
        doc.add_item(Item::from_spec(&ItemSpec::new("oven", 600.0, 600.0, 300.0), Point::ZERO, 5.0));

        let records = cost_records(&doc, &catalog());
        let kinds: Vec<_> = records.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["wall", "wall", "door", "window", "oven"]);
        assert!((records[2].cost - 150.0).abs() < f64::EPSILON);
        // window is not in the catalog
        assert!(records[3].cost.abs() < f64::EPSILON);
        assert!((total_cost(&records) - 550.0).abs() < f64::EPSILON);
        assert!(records.iter().all(|r| r.finish == "default"));
    }

    #[test]
    fn test_orphaned_openings_not_costed() {
        let mut doc = PlanDocument::new();
        let a = doc.add_wall(Wall::new(Point::ZERO, Point::new(100.0, 0.0), WallThickness::default()));
        doc.add_opening(Opening::new(OpeningKind::Door, a, 0.5));
        doc.remove(crate::model::EntityRef::Wall(a));
        assert!(cost_records(&doc, &catalog()).is_empty());
    }

    #[test]
    fn test_record_json() {
        let json = serde_json::to_string(&CostRecord::new("sink", 120.0, "default")).unwrap();
        assert_eq!(json, r#"{"type":"sink","cost":120.0,"finish":"default"}"#);
    }
}
