//! The plan document: authoritative storage for walls, openings and items.

use crate::model::{EntityId, EntityRef, Item, Opening, OpeningPlacement, Wall};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All entities of a floor plan, kept in commit order.
///
/// This is the only owner of plan geometry. Renderers and exporters read it;
/// only the editor mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub id: String,
    pub name: String,
    walls: Vec<Wall>,
    openings: Vec<Opening>,
    items: Vec<Item>,
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanDocument {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            walls: Vec::new(),
            openings: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn add_wall(&mut self, wall: Wall) -> EntityId {
        let id = wall.id();
        self.walls.push(wall);
        id
    }

    pub fn add_opening(&mut self, opening: Opening) -> EntityId {
        let id = opening.id();
        self.openings.push(opening);
        id
    }

    pub fn add_item(&mut self, item: Item) -> EntityId {
        let id = item.id();
        self.items.push(item);
        id
    }

    /// Remove an entity. Openings hosted by a removed wall are left in place.
    /// Returns true if something was removed.
    pub fn remove(&mut self, entity: EntityRef) -> bool {
        let before = self.len();
        match entity {
            EntityRef::Wall(id) => self.walls.retain(|w| w.id() != id),
            EntityRef::Opening(id) => self.openings.retain(|o| o.id() != id),
            EntityRef::Item(id) => self.items.retain(|i| i.id() != id),
        }
        self.len() != before
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.openings.clear();
        self.items.clear();
    }

    /// Walls in commit order.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The `n` most recently committed walls, oldest first.
    pub fn recent_walls(&self, n: usize) -> &[Wall] {
        &self.walls[self.walls.len().saturating_sub(n)..]
    }

    pub fn wall(&self, id: EntityId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id() == id)
    }

    pub fn wall_mut(&mut self, id: EntityId) -> Option<&mut Wall> {
        self.walls.iter_mut().find(|w| w.id() == id)
    }

    pub fn opening(&self, id: EntityId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id() == id)
    }

    pub fn opening_mut(&mut self, id: EntityId) -> Option<&mut Opening> {
        self.openings.iter_mut().find(|o| o.id() == id)
    }

    pub fn item(&self, id: EntityId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn item_mut(&mut self, id: EntityId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Wall(id) => self.wall(id).is_some(),
            EntityRef::Opening(id) => self.opening(id).is_some(),
            EntityRef::Item(id) => self.item(id).is_some(),
        }
    }

    /// Openings whose host wall still exists, paired with that wall.
    pub fn hosted_openings(&self) -> impl Iterator<Item = (&Opening, &Wall)> {
        self.openings
            .iter()
            .filter_map(|o| self.wall(o.host).map(|w| (o, w)))
    }

    /// Openings hosted by a given wall.
    pub fn openings_on(&self, wall_id: EntityId) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(move |o| o.host == wall_id)
    }

    /// Placement of an opening, or None if its host is gone.
    pub fn opening_placement(&self, opening: &Opening, scale: f64) -> Option<OpeningPlacement> {
        self.wall(opening.host).map(|wall| opening.placement(wall, scale))
    }

    /// Topmost entity under `point` (scene units).
    ///
    /// Items are above openings, openings above walls; within a kind the most
    /// recently committed wins. Orphaned openings are never hit.
    pub fn hit_test(&self, point: Point, tolerance: f64, scale: f64) -> Option<EntityRef> {
        if let Some(item) = self.items.iter().rev().find(|i| i.hit_test(point, tolerance)) {
            return Some(EntityRef::Item(item.id()));
        }
        let opening = self.openings.iter().rev().find(|o| {
            self.opening_placement(o, scale)
                .is_some_and(|p| p.contains(point, tolerance))
        });
        if let Some(opening) = opening {
            return Some(EntityRef::Opening(opening.id()));
        }
        self.hit_test_wall(point, tolerance, scale).map(EntityRef::Wall)
    }

    /// Topmost wall under `point`, ignoring openings and items.
    pub fn hit_test_wall(&self, point: Point, tolerance: f64, scale: f64) -> Option<EntityId> {
        self.walls
            .iter()
            .rev()
            .find(|w| w.hit_test(point, tolerance, scale))
            .map(|w| w.id())
    }

    /// Move a wall or item by `delta`. Openings move with their host.
    pub fn translate(&mut self, entity: EntityRef, delta: Vec2) -> bool {
        match entity {
            EntityRef::Wall(id) => self.wall_mut(id).map(|w| w.translate(delta)).is_some(),
            EntityRef::Item(id) => self.item_mut(id).map(|i| i.translate(delta)).is_some(),
            EntityRef::Opening(_) => false,
        }
    }

    /// Bounding box of all walls and items.
    pub fn bounds(&self) -> Option<Rect> {
        self.walls
            .iter()
            .map(Wall::bounds)
            .chain(self.items.iter().map(Item::bounds))
            .reduce(|a, b| a.union(b))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.walls.len() + self.openings.len() + self.items.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
