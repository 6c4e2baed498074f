//! Backend-neutral display list renderer.

use crate::renderer::{GridStyle, RenderContext, Renderer};
use crate::style::{
    item_color, opening_color, DIMENSION_COLOR, GRID_COLOR, ITEM_OUTLINE, OPENING_OUTLINE, WALL_COLOR,
};
use floorplan_core::{EntityRef, Wall};
use kurbo::{Affine, BezPath, Line, Point, Rect, Shape as _, Size, Vec2};
use peniko::Color;

/// One drawing instruction in screen space.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(Color),
    /// Repeating grid aligned to the scene origin.
    Grid {
        style: GridStyle,
        /// Screen position of the scene origin.
        origin: Point,
        cell_size: f64,
        stroke_width: f64,
        color: Color,
    },
    /// A round-capped line.
    Line { line: Line, width: f64, color: Color },
    /// A closed path with optional fill and outline.
    Path {
        path: BezPath,
        fill: Option<Color>,
        stroke: Option<(Color, f64)>,
    },
    /// A text label anchored at its center.
    Label { position: Point, text: String, color: Color },
}

/// The commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Line, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { line, width, .. } => Some((line, *width)),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &BezPath> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Path { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Projects the editor into a [`DisplayList`].
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    list: DisplayList,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn take_display_list(&mut self) -> DisplayList {
        std::mem::take(&mut self.list)
    }

    fn push(&mut self, command: DrawCommand) {
        self.list.commands.push(command);
    }

    fn render_wall(&mut self, wall: &Wall, transform: Affine, scale: f64, zoom: f64) {
        self.push(DrawCommand::Line {
            line: transform * wall.as_line(),
            width: wall.effective_thickness_mm() / scale * zoom,
            color: WALL_COLOR,
        });
    }

    fn render_selection(&mut self, bounds: Rect, transform: Affine, color: Color) {
        let screen = transform.transform_rect_bbox(bounds).inflate(4.0, 4.0);
        self.push(DrawCommand::Path {
            path: screen.to_path(0.1),
            fill: None,
            stroke: Some((color, 1.5)),
        });
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let editor = ctx.editor;
        let document = &editor.document;
        let viewport = &editor.viewport;
        let transform = viewport.transform();
        let scale = editor.scale();
        let zoom = viewport.zoom;

        self.list = DisplayList {
            size: ctx.viewport_size,
            commands: Vec::new(),
        };
        self.push(DrawCommand::Clear(self.background_color(ctx)));

        if ctx.grid_style != GridStyle::None {
            let pattern = viewport.grid_pattern();
            self.push(DrawCommand::Grid {
                style: ctx.grid_style,
                origin: Point::ZERO + viewport.offset,
                cell_size: pattern.cell_size,
                stroke_width: pattern.stroke_width,
                color: GRID_COLOR,
            });
        }

        for wall in document.walls() {
            self.render_wall(wall, transform, scale, zoom);
        }

        for (opening, wall) in document.hosted_openings() {
            let placement = opening.placement(wall, scale);
            self.push(DrawCommand::Path {
                path: transform * placement.outline(),
                fill: Some(opening_color(opening.kind)),
                stroke: Some((OPENING_OUTLINE, 1.0)),
            });
        }

        for item in document.items() {
            self.push(DrawCommand::Path {
                path: transform * item.outline(),
                fill: Some(item_color(&item.kind)),
                stroke: Some((ITEM_OUTLINE, 1.0)),
            });
        }

        if let Some(draft) = editor.tools.draft() {
            self.render_wall(draft, transform, scale, zoom);
            if ctx.show_dimensions {
                if let Some(label) = editor.dimension_label() {
                    let position = transform * draft.midpoint() + Vec2::new(0.0, -12.0);
                    self.push(DrawCommand::Label {
                        position,
                        text: label,
                        color: DIMENSION_COLOR,
                    });
                }
            }
        }

        let selected_bounds = editor.selection().and_then(|entity| match entity {
            EntityRef::Wall(id) => document.wall(id).map(Wall::bounds),
            EntityRef::Item(id) => document.item(id).map(|i| i.bounds()),
            EntityRef::Opening(id) => document
                .opening(id)
                .and_then(|o| document.opening_placement(o, scale))
                .map(|p| p.outline().bounding_box()),
        });
        if let Some(bounds) = selected_bounds {
            self.render_selection(bounds, transform, ctx.selection_color);
        }

        log::trace!("built display list with {} commands", self.list.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::{EditorMode, InputEvent, ItemSpec};

    fn render(editor: &floorplan_core::Editor) -> DisplayList {
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(editor));
        renderer.take_display_list()
    }

    fn editor_with_wall() -> floorplan_core::Editor {
        let mut editor = floorplan_core::Editor::new();
        editor.set_mode(EditorMode::Wall);
        editor.handle_event(&InputEvent::down(0.0, 0.0));
        editor.handle_event(&InputEvent::moved(400.0, 0.0));
        editor.handle_event(&InputEvent::up(400.0, 0.0));
        editor
    }

    #[test]
    fn test_empty_editor_has_background_and_grid() {
        let list = render(&floorplan_core::Editor::new());
        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands[0], DrawCommand::Clear(_)));
        assert!(matches!(list.commands[1], DrawCommand::Grid { cell_size, .. } if cell_size == 20.0));
    }

    #[test]
    fn test_wall_stroke_scales_with_zoom() {
        let mut editor = editor_with_wall();
        let (_, width) = render(&editor).lines().next().map(|(l, w)| (*l, w)).unwrap();
        assert!((width - 20.0).abs() < 1e-9);

        editor.viewport.set_zoom(2.0);
        let list = render(&editor);
        let (line, width) = list.lines().next().unwrap();
        assert!((width - 40.0).abs() < 1e-9);
        assert_eq!(line.p1, Point::new(800.0, 0.0));
    }

    #[test]
    fn test_openings_and_items_are_paths() {
        let mut editor = editor_with_wall();
        editor.set_mode(EditorMode::Door);
        editor.handle_event(&InputEvent::down(200.0, 0.0));
        editor.set_mode(EditorMode::Place(ItemSpec::new("oven", 600.0, 600.0, 300.0)));
        editor.handle_event(&InputEvent::down(200.0, 200.0));

        let list = render(&editor);
        assert_eq!(list.paths().count(), 2);
    }

    #[test]
    fn test_orphaned_opening_not_drawn() {
        let mut editor = editor_with_wall();
        editor.set_mode(EditorMode::Door);
        editor.handle_event(&InputEvent::down(200.0, 0.0));
        editor.set_mode(EditorMode::Delete);
        editor.handle_event(&InputEvent::down(20.0, 0.0));

        let list = render(&editor);
        assert_eq!(list.lines().count(), 0);
        assert_eq!(list.paths().count(), 0);
    }

    #[test]
    fn test_draft_drawn_with_dimension() {
        let mut editor = floorplan_core::Editor::new();
        editor.set_mode(EditorMode::Wall);
        editor.handle_event(&InputEvent::down(0.0, 0.0));
        editor.handle_event(&InputEvent::moved(200.0, 0.0));

        let list = render(&editor);
        assert_eq!(list.lines().count(), 1);
        assert_eq!(list.labels().collect::<Vec<_>>(), vec!["1000mm"]);
    }

    #[test]
    fn test_selection_outline() {
        let mut editor = editor_with_wall();
        editor.set_mode(EditorMode::Select);
        editor.handle_event(&InputEvent::down(100.0, 0.0));
        let list = render(&editor);
        assert_eq!(list.paths().count(), 1);
    }

    #[test]
    fn test_grid_none() {
        let editor = floorplan_core::Editor::new();
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(&editor).with_grid(GridStyle::None));
        assert_eq!(renderer.display_list().len(), 1);
    }
}
