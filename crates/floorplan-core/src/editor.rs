//! The editor context: document, viewport, tools and selection in one value.

use crate::catalog::{Catalog, ItemSpec};
use crate::config::{AnglePolicy, EditorConfig};
use crate::costing::{cost_records, CostRecord};
use crate::document::PlanDocument;
use crate::export::DesignModel;
use crate::frame::{Instant, RenderScheduler, ResizeDebouncer};
use crate::input::{InputEvent, InputState};
use crate::model::{constrain_orthogonal, EntityId, EntityRef, Item, Opening, OpeningKind, Wall, WallThickness};
use crate::snap::SnapEngine;
use crate::tools::{Cursor, Effect, EditorMode, ToolManager};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};

/// Pick tolerance in screen pixels.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Values applied to newly created walls and openings.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub wall_thickness: WallThickness,
    pub wall_height_mm: f64,
    /// (width, height) in millimeters.
    pub door_size_mm: (f64, f64),
    pub window_size_mm: (f64, f64),
}

impl EditorSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            wall_thickness: WallThickness::Uniform(config.default_wall_thickness_mm),
            wall_height_mm: config.default_wall_height_mm,
            door_size_mm: OpeningKind::Door.default_size_mm(),
            window_size_mm: OpeningKind::Window.default_size_mm(),
        }
    }

    pub fn opening_size_mm(&self, kind: OpeningKind) -> (f64, f64) {
        match kind {
            OpeningKind::Door => self.door_size_mm,
            OpeningKind::Window => self.window_size_mm,
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// A property change applied to the selected entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityEdit {
    WallThickness(WallThickness),
    WallHeight(f64),
    OpeningSize { width_mm: f64, height_mm: f64 },
    ItemSize { width_mm: f64, height_mm: f64 },
    ItemRotation(f64),
}

/// Owns all editor state and applies the effects of each input event.
#[derive(Debug, Clone)]
pub struct Editor {
    pub document: PlanDocument,
    pub viewport: Viewport,
    pub snap: SnapEngine,
    pub tools: ToolManager,
    pub input: InputState,
    pub settings: EditorSettings,
    config: EditorConfig,
    selection: Option<EntityRef>,
    render: RenderScheduler,
    resize: ResizeDebouncer,
    model_changed: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let mut render = RenderScheduler::new();
        render.request();
        Self {
            document: PlanDocument::new(),
            viewport: Viewport::from_config(&config),
            snap: SnapEngine::from_config(&config),
            tools: ToolManager::new(),
            input: InputState::new(),
            settings: EditorSettings::from_config(&config),
            resize: ResizeDebouncer::from_millis(config.resize_debounce_ms),
            selection: None,
            render,
            model_changed: false,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Millimeters per scene unit.
    pub fn scale(&self) -> f64 {
        self.config.scale
    }

    pub fn mode(&self) -> &EditorMode {
        self.tools.mode()
    }

    /// Cursor for the current mode. Hovering an entity the mode can act on
    /// shows a pointer.
    pub fn cursor(&self) -> Cursor {
        let cursor = self.tools.cursor();
        if cursor == Cursor::Grabbing || !self.mode().entities_interactive() {
            return cursor;
        }
        let hovered = self.viewport.screen_to_scene(self.input.pointer_position);
        match self.hit_test(hovered) {
            Some(_) => Cursor::Pointer,
            None => cursor,
        }
    }

    pub fn selection(&self) -> Option<EntityRef> {
        self.selection
    }

    /// Select an entity directly. Unknown ids clear the selection.
    pub fn select(&mut self, entity: Option<EntityRef>) {
        self.selection = entity.filter(|e| self.document.contains(*e));
        self.render.request();
    }

    /// Change mode, dropping any draft or drag in progress.
    pub fn set_mode(&mut self, mode: EditorMode) {
        log::debug!("Mode {} -> {}", self.tools.mode().name(), mode.name());
        if mode != EditorMode::Select {
            self.selection = None;
        }
        self.tools.set_mode(mode);
        self.render.request();
    }

    /// Feed one input event through the transition table.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.record(event);
        for effect in self.tools.handle(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::BeginPan(at) => {
                log::debug!("Pan started at {:?}", at);
                self.render.request();
            }
            Effect::PanBy(_) => {
                let delta = self.input.pointer_delta();
                self.pan(delta);
            }
            Effect::EndPan => self.render.request(),
            Effect::BeginWall(at) => {
                let start = self.snapped_scene_point(at);
                self.tools
                    .begin_draft(start, self.settings.wall_thickness, self.settings.wall_height_mm);
                self.render.request();
            }
            Effect::UpdateWall(at) => {
                let mut end = self.snapped_scene_point(at);
                if let Some(draft) = self.tools.draft() {
                    if self.config.angle_policy == AnglePolicy::Orthogonal {
                        end = constrain_orthogonal(draft.start, end);
                    }
                }
                self.tools.update_draft(end);
                self.render.request();
            }
            Effect::FinalizeWall(_) => self.finalize_wall(),
            Effect::CancelDraft => {
                self.tools.cancel_draft();
                self.render.request();
            }
            Effect::PlaceOpening { kind, at } => {
                let point = self.viewport.screen_to_scene(at);
                self.place_opening(kind, point);
            }
            Effect::DeleteAt(at) => {
                let point = self.viewport.screen_to_scene(at);
                if let Some(entity) = self.hit_test(point) {
                    self.remove(entity);
                }
            }
            Effect::PlaceItem { spec, at } => {
                let point = self.snapped_scene_point(at);
                self.place_item(&spec, point);
            }
            Effect::SetMode(mode) => self.set_mode(mode),
            Effect::SelectAt(at) => {
                let point = self.viewport.screen_to_scene(at);
                self.selection = self.hit_test(point);
                match self.selection {
                    Some(_) => self.tools.drag_anchor = Some(self.snap.snap_to_grid(point, self.viewport.zoom)),
                    None => self.tools.reset_phase(),
                }
                self.render.request();
            }
            Effect::DragSelection(at) => {
                let point = self.viewport.screen_to_scene(at);
                self.drag_selection(point);
            }
            Effect::EndDrag => self.tools.drag_anchor = None,
            Effect::ZoomAt { at, delta_y } => {
                if self.viewport.zoom_by_wheel(at, delta_y) {
                    self.render.request();
                }
            }
            Effect::DeleteSelection => {
                if let Some(entity) = self.selection.take() {
                    self.remove(entity);
                }
            }
            Effect::ClearSelection => {
                self.selection = None;
                self.render.request();
            }
        }
    }

    /// Screen point to scene, snapped to the grid then to nearby wall endpoints.
    fn snapped_scene_point(&self, screen: Point) -> Point {
        let scene = self.viewport.screen_to_scene(screen);
        self.snap.snap(scene, &self.document, self.viewport.zoom).point
    }

    fn hit_test(&self, point: Point) -> Option<EntityRef> {
        self.document
            .hit_test(point, HIT_TOLERANCE / self.viewport.zoom, self.config.scale)
    }

    fn finalize_wall(&mut self) {
        let Some(draft) = self.tools.take_draft() else {
            return;
        };
        let min_length = self.snap.min_wall_length(self.viewport.zoom);
        if draft.length() > min_length {
            log::info!(
                "Committed wall {} ({:.0} mm)",
                draft.id(),
                draft.length() * self.config.scale
            );
            self.document.add_wall(draft);
            self.model_changed = true;
        } else {
            log::debug!("Discarded wall shorter than {:.1} units", min_length);
        }
        self.render.request();
    }

    /// Add an opening where `point` (scene units) lands on a wall.
    /// Returns false if there is no wall under the point.
    pub fn place_opening(&mut self, kind: OpeningKind, point: Point) -> bool {
        let Some(EntityRef::Wall(host)) = self.hit_test(point) else {
            log::debug!("No wall under {:?}, {} not placed", point, kind.type_tag());
            return false;
        };
        let Some(wall) = self.document.wall(host) else {
            return false;
        };
        let (width_mm, height_mm) = self.settings.opening_size_mm(kind);
        let opening = Opening::with_size(kind, host, wall.project(point), width_mm, height_mm);
        log::info!("Placed {} at t={:.3} on wall {}", kind.type_tag(), opening.position, host);
        self.document.add_opening(opening);
        self.model_changed = true;
        self.render.request();
        true
    }

    /// Add a catalog item centered at `point` (scene units).
    pub fn place_item(&mut self, spec: &ItemSpec, point: Point) {
        let item = Item::from_spec(spec, point, self.config.scale);
        log::info!("Placed {} at ({:.1}, {:.1})", item.kind, point.x, point.y);
        self.document.add_item(item);
        self.model_changed = true;
        self.render.request();
    }

    /// Commit a wall directly, bypassing the gesture.
    pub fn add_wall(&mut self, wall: Wall) -> EntityId {
        self.model_changed = true;
        self.render.request();
        self.document.add_wall(wall)
    }

    fn remove(&mut self, entity: EntityRef) {
        if self.document.remove(entity) {
            log::info!("Removed {:?}", entity);
            if self.selection == Some(entity) {
                self.selection = None;
            }
            self.model_changed = true;
            self.render.request();
        }
    }

    fn drag_selection(&mut self, point: Point) {
        let Some(selected) = self.selection else {
            return;
        };
        match selected {
            EntityRef::Opening(id) => {
                let Some(host) = self.document.opening(id).map(|o| o.host) else {
                    return;
                };
                let Some(wall) = self.document.wall(host).cloned() else {
                    return;
                };
                if let Some(opening) = self.document.opening_mut(id) {
                    opening.slide_to(&wall, point);
                }
            }
            EntityRef::Wall(_) | EntityRef::Item(_) => {
                let snapped = self.snap.snap_to_grid(point, self.viewport.zoom);
                let Some(anchor) = self.tools.drag_anchor else {
                    self.tools.drag_anchor = Some(snapped);
                    return;
                };
                let delta = snapped - anchor;
                if delta == Vec2::ZERO {
                    return;
                }
                self.document.translate(selected, delta);
                self.tools.drag_anchor = Some(snapped);
            }
        }
        self.model_changed = true;
        self.render.request();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.render.request();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.render.request();
    }

    /// Zoom 1, no pan.
    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
        self.render.request();
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
        self.render.request();
    }

    /// Remove everything. Does nothing unless `confirmed`.
    pub fn clear_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        log::info!("Clearing plan ({} entities)", self.document.len());
        self.document.clear();
        self.tools.cancel_draft();
        self.tools.reset_phase();
        self.selection = None;
        self.model_changed = true;
        self.render.request();
        true
    }

    /// Thickness for walls drawn from now on.
    pub fn set_wall_thickness(&mut self, thickness: WallThickness) {
        self.settings.wall_thickness = thickness;
    }

    pub fn set_wall_height_mm(&mut self, height_mm: f64) {
        self.settings.wall_height_mm = height_mm;
    }

    /// Size for openings placed from now on.
    pub fn set_opening_size(&mut self, kind: OpeningKind, width_mm: f64, height_mm: f64) {
        match kind {
            OpeningKind::Door => self.settings.door_size_mm = (width_mm, height_mm),
            OpeningKind::Window => self.settings.window_size_mm = (width_mm, height_mm),
        }
    }

    /// Apply an edit to the selection. Returns false if nothing matching is selected.
    pub fn edit_selected(&mut self, edit: EntityEdit) -> bool {
        let scale = self.config.scale;
        let applied = match (self.selection, edit) {
            (Some(EntityRef::Wall(id)), EntityEdit::WallThickness(thickness)) => {
                self.document.wall_mut(id).map(|w| w.thickness = thickness).is_some()
            }
            (Some(EntityRef::Wall(id)), EntityEdit::WallHeight(height_mm)) => {
                self.document.wall_mut(id).map(|w| w.height_mm = height_mm).is_some()
            }
            (Some(EntityRef::Opening(id)), EntityEdit::OpeningSize { width_mm, height_mm }) => self
                .document
                .opening_mut(id)
                .map(|o| {
                    o.width_mm = width_mm;
                    o.height_mm = height_mm;
                })
                .is_some(),
            (Some(EntityRef::Item(id)), EntityEdit::ItemSize { width_mm, height_mm }) => self
                .document
                .item_mut(id)
                .map(|i| i.resize_to(width_mm / scale, height_mm / scale))
                .is_some(),
            (Some(EntityRef::Item(id)), EntityEdit::ItemRotation(degrees)) => {
                self.document.item_mut(id).map(|i| i.set_rotation(degrees)).is_some()
            }
            _ => false,
        };
        if applied {
            self.model_changed = true;
            self.render.request();
        }
        applied
    }

    /// Length of the wall being drawn, in millimeters.
    pub fn draft_length_mm(&self) -> Option<f64> {
        self.tools.draft().map(|d| d.length() * self.config.scale)
    }

    /// Dimension readout for the draft, such as `"1000mm"`.
    pub fn dimension_label(&self) -> Option<String> {
        self.draft_length_mm().map(|mm| format!("{}mm", mm.round()))
    }

    pub fn export(&self) -> DesignModel {
        DesignModel::from_document(&self.document, self.config.scale)
    }

    /// Replace the plan with an imported design. Designs saved at another
    /// mm-per-unit scale are converted to this editor's scale.
    pub fn import(&mut self, model: DesignModel) {
        log::info!("Importing design with {} walls, {} items", model.walls.len(), model.items.len());
        if (model.settings.scale - self.config.scale).abs() >= f64::EPSILON {
            log::warn!(
                "Design scale {} mm/unit differs from editor scale {}; rescaling",
                model.settings.scale,
                self.config.scale
            );
        }
        self.document = model.rescaled(self.config.scale).into_document();
        self.tools.cancel_draft();
        self.tools.reset_phase();
        self.selection = None;
        self.model_changed = true;
        self.render.request();
    }

    pub fn cost_records(&self, catalog: &Catalog) -> Vec<CostRecord> {
        cost_records(&self.document, catalog)
    }

    /// Queue a surface resize; it takes effect after the debounce delay.
    pub fn resize(&mut self, size: Size, now: Instant) {
        self.resize.push(size, now);
    }

    /// Apply a pending resize once due. Returns true if the viewport changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.resize.poll(now) {
            Some(size) => {
                log::debug!("Viewport resized to {}x{}", size.width, size.height);
                self.viewport.resize(size);
                self.render.request();
                true
            }
            None => false,
        }
    }

    /// Consume the pending repaint request.
    pub fn take_render_request(&mut self) -> bool {
        self.render.take()
    }

    /// Whether the plan changed since the last call.
    pub fn take_model_changed(&mut self) -> bool {
        std::mem::take(&mut self.model_changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, MouseButton};
    use crate::tools::Phase;
    use std::time::Duration;

    fn draw(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        editor.handle_event(&InputEvent::down(from.0, from.1));
        editor.handle_event(&InputEvent::moved(to.0, to.1));
        editor.handle_event(&InputEvent::up(to.0, to.1));
    }

    fn wall_editor() -> Editor {
        let mut editor = Editor::new();
        editor.set_mode(EditorMode::Wall);
        editor
    }

    #[test]
    fn test_draw_wall() {
        let mut editor = wall_editor();
        draw(&mut editor, (1.0, -2.0), (203.0, 4.0));
        let walls = editor.document.walls();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].start, Point::new(0.0, 0.0));
        assert_eq!(walls[0].end, Point::new(200.0, 0.0));
        assert!(editor.take_model_changed());
        assert!(editor.draft_length_mm().is_none());
    }

    #[test]
    fn test_short_wall_discarded() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (9.0, 0.0));
        assert!(editor.document.is_empty());
        assert!(!editor.take_model_changed());
    }

    #[test]
    fn test_draft_readout() {
        let mut editor = wall_editor();
        editor.handle_event(&InputEvent::down(0.0, 0.0));
        editor.handle_event(&InputEvent::moved(200.0, 0.0));
        assert_eq!(editor.dimension_label().as_deref(), Some("1000mm"));
    }

    #[test]
    fn test_wall_endpoint_snaps_to_existing() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (107.0, 0.0));
        let first_end = editor.document.walls()[0].end;
        assert_eq!(first_end, Point::new(100.0, 0.0));

        editor.handle_event(&InputEvent::down(112.0, 4.0));
        editor.handle_event(&InputEvent::moved(100.0, 200.0));
        editor.handle_event(&InputEvent::up(100.0, 200.0));
        assert_eq!(editor.document.walls()[1].start, first_end);
    }

    #[test]
    fn test_orthogonal_policy() {
        let config = EditorConfig {
            angle_policy: AnglePolicy::Orthogonal,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(config);
        editor.set_mode(EditorMode::Wall);
        draw(&mut editor, (0.0, 0.0), (200.0, 60.0));
        assert_eq!(editor.document.walls()[0].end, Point::new(200.0, 0.0));
    }

    #[test]
    fn test_pan_mid_draft_keeps_draft() {
        let mut editor = wall_editor();
        editor.handle_event(&InputEvent::down(0.0, 0.0));
        editor.handle_event(&InputEvent::moved(100.0, 0.0));
        editor.handle_event(&InputEvent::PointerDown {
            position: Point::new(300.0, 300.0),
            button: MouseButton::Right,
            modifiers: Modifiers::NONE,
        });
        assert_eq!(editor.cursor(), Cursor::Grabbing);
        editor.handle_event(&InputEvent::moved(320.0, 310.0));
        editor.handle_event(&InputEvent::PointerUp {
            position: Point::new(320.0, 310.0),
            button: MouseButton::Right,
        });

        assert_eq!(editor.viewport.offset, Vec2::new(20.0, 10.0));
        let draft = editor.tools.draft().unwrap();
        assert_eq!(draft.end, Point::new(100.0, 0.0));
        assert_eq!(editor.tools.gesture().phase, Phase::DrawingWall);
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_hover_cursor_in_select_mode() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (400.0, 0.0));
        editor.handle_event(&InputEvent::moved(200.0, 0.0));
        assert_eq!(editor.cursor(), Cursor::Crosshair);

        editor.set_mode(EditorMode::Select);
        assert_eq!(editor.cursor(), Cursor::Pointer);
        editor.handle_event(&InputEvent::moved(200.0, 200.0));
        assert_eq!(editor.cursor(), Cursor::Default);
    }

    #[test]
    fn test_door_needs_wall() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (400.0, 0.0));
        editor.set_mode(EditorMode::Door);

        editor.handle_event(&InputEvent::down(200.0, 200.0));
        assert!(editor.document.openings().is_empty());

        editor.handle_event(&InputEvent::down(300.0, 3.0));
        let opening = &editor.document.openings()[0];
        assert!((opening.position - 0.75).abs() < 1e-9);
        assert_eq!(opening.width_mm, 900.0);
    }

    #[test]
    fn test_custom_opening_size() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (400.0, 0.0));
        editor.set_opening_size(OpeningKind::Window, 600.0, 900.0);
        editor.set_mode(EditorMode::Window);
        editor.handle_event(&InputEvent::down(100.0, 0.0));
        let opening = &editor.document.openings()[0];
        assert_eq!(opening.kind, OpeningKind::Window);
        assert_eq!((opening.width_mm, opening.height_mm), (600.0, 900.0));
    }

    #[test]
    fn test_place_item_returns_to_select() {
        let mut editor = Editor::new();
        editor.set_mode(EditorMode::Place(ItemSpec::new("oven", 600.0, 600.0, 300.0)));
        editor.handle_event(&InputEvent::down(41.0, 59.0));
        assert_eq!(editor.mode(), &EditorMode::Select);
        let item = &editor.document.items()[0];
        assert_eq!(item.position, Point::new(40.0, 60.0));
        assert!((item.width - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_delete_on_empty_canvas_is_noop() {
        let mut editor = Editor::new();
        editor.set_mode(EditorMode::Delete);
        editor.handle_event(&InputEvent::down(50.0, 50.0));
        assert!(editor.document.is_empty());
        assert!(!editor.take_model_changed());
    }

    #[test]
    fn test_delete_removes_hit() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        editor.set_mode(EditorMode::Delete);
        editor.handle_event(&InputEvent::down(100.0, 2.0));
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_select_and_drag_wall() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        let id = editor.document.walls()[0].id();
        editor.set_mode(EditorMode::Select);

        editor.handle_event(&InputEvent::down(100.0, 0.0));
        assert_eq!(editor.selection(), Some(EntityRef::Wall(id)));
        editor.handle_event(&InputEvent::moved(100.0, 41.0));
        editor.handle_event(&InputEvent::up(100.0, 41.0));

        let wall = editor.document.wall(id).unwrap();
        assert_eq!(wall.start, Point::new(0.0, 40.0));
        assert_eq!(wall.end, Point::new(200.0, 40.0));
    }

    #[test]
    fn test_drag_opening_slides_along_host() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (400.0, 0.0));
        editor.set_mode(EditorMode::Door);
        editor.handle_event(&InputEvent::down(200.0, 0.0));
        let door = editor.document.openings()[0].id();

        editor.set_mode(EditorMode::Select);
        editor.handle_event(&InputEvent::down(200.0, 0.0));
        assert_eq!(editor.selection(), Some(EntityRef::Opening(door)));
        editor.handle_event(&InputEvent::moved(300.0, 80.0));
        editor.handle_event(&InputEvent::up(300.0, 80.0));
        assert!((editor.document.opening(door).unwrap().position - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_select_nothing_clears() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        editor.set_mode(EditorMode::Select);
        editor.handle_event(&InputEvent::down(100.0, 0.0));
        editor.handle_event(&InputEvent::up(100.0, 0.0));
        assert!(editor.selection().is_some());
        editor.handle_event(&InputEvent::down(100.0, 300.0));
        assert!(editor.selection().is_none());
        assert_eq!(editor.tools.gesture().phase, Phase::Idle);
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        editor.set_mode(EditorMode::Select);
        editor.handle_event(&InputEvent::down(100.0, 0.0));
        editor.handle_event(&InputEvent::up(100.0, 0.0));
        editor.handle_event(&InputEvent::key("Delete"));
        assert!(editor.document.is_empty());
        assert!(editor.selection().is_none());
    }

    #[test]
    fn test_edit_selected() {
        let mut editor = Editor::new();
        editor.place_item(&ItemSpec::new("sink", 800.0, 600.0, 120.0), Point::new(0.0, 0.0));
        let id = editor.document.items()[0].id();
        assert!(!editor.edit_selected(EntityEdit::ItemRotation(45.0)));

        editor.select(Some(EntityRef::Item(id)));
        assert!(editor.edit_selected(EntityEdit::ItemSize {
            width_mm: 1600.0,
            height_mm: 600.0
        }));
        assert!(editor.edit_selected(EntityEdit::ItemRotation(45.0)));
        assert!(!editor.edit_selected(EntityEdit::WallHeight(2400.0)));

        let item = editor.document.item(id).unwrap();
        assert!((item.scaled_width() - 320.0).abs() < 1e-9);
        assert!((item.rotation - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_walls_use_settings() {
        let mut editor = wall_editor();
        editor.set_wall_thickness(WallThickness::PerAxis { x: 150.0, y: 250.0 });
        editor.set_wall_height_mm(2400.0);
        draw(&mut editor, (0.0, 0.0), (0.0, 200.0));
        let wall = &editor.document.walls()[0];
        assert!((wall.effective_thickness_mm() - 250.0).abs() < f64::EPSILON);
        assert!((wall.height_mm - 2400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_all_requires_confirmation() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        assert!(!editor.clear_all(false));
        assert_eq!(editor.document.len(), 1);
        assert!(editor.clear_all(true));
        assert!(editor.document.is_empty());
    }

    #[test]
    fn test_zoom_controls() {
        let mut editor = Editor::new();
        for _ in 0..50 {
            editor.zoom_in();
        }
        assert!((editor.viewport.zoom - 3.0).abs() < 1e-9);
        editor.pan(Vec2::new(10.0, 10.0));
        editor.reset_zoom();
        assert!((editor.viewport.zoom - 1.0).abs() < f64::EPSILON);
        assert_eq!(editor.viewport.offset, Vec2::ZERO);
    }

    #[test]
    fn test_render_requests_coalesce() {
        let mut editor = wall_editor();
        assert!(editor.take_render_request());
        assert!(!editor.take_render_request());
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        assert!(editor.take_render_request());
        assert!(!editor.take_render_request());
    }

    #[test]
    fn test_debounced_resize() {
        let mut editor = Editor::new();
        let t0 = Instant::now();
        editor.resize(Size::new(1280.0, 720.0), t0);
        assert!(!editor.tick(t0 + Duration::from_millis(10)));
        assert!(editor.tick(t0 + Duration::from_millis(100)));
        assert_eq!(editor.viewport.size, Size::new(1280.0, 720.0));
    }

    #[test]
    fn test_export_import() {
        let mut editor = wall_editor();
        draw(&mut editor, (0.0, 0.0), (200.0, 0.0));
        editor.zoom_in();
        let model = editor.export();

        let mut other = Editor::new();
        other.import(model.clone());
        assert_eq!(other.export(), model);
    }

    #[test]
    fn test_import_converts_foreign_scale() {
        let model = DesignModel::from_json(
            r#"{ "walls": [ { "x1": 0, "y1": 0, "x2": 100, "y2": 0, "thickness": 150 } ],
                 "settings": { "scale": 10 } }"#,
        )
        .unwrap();
        let mut editor = Editor::new();
        editor.import(model);

        let wall = &editor.document.walls()[0];
        assert_eq!(wall.end, Point::new(200.0, 0.0));
        assert!((wall.length() * editor.scale() - 1000.0).abs() < 1e-9);
        assert_eq!(wall.effective_thickness_mm(), 150.0);
        assert_eq!(editor.export().settings.scale, 5.0);
    }
}
