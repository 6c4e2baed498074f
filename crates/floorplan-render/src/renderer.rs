//! Renderer trait abstraction.

use floorplan_core::Editor;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Write failed: {0}")]
    Write(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid.
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only dots at intersections.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The editor to draw.
    pub editor: &'a Editor,
    /// Surface size in pixels.
    pub viewport_size: Size,
    pub background_color: Color,
    pub grid_style: GridStyle,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Show the draft length next to the wall being drawn.
    pub show_dimensions: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context sized to the editor's viewport.
    pub fn new(editor: &'a Editor) -> Self {
        Self {
            editor,
            viewport_size: editor.viewport.size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            grid_style: GridStyle::Lines,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            show_dimensions: true,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_dimensions(mut self, show: bool) -> Self {
        self.show_dimensions = show;
        self
    }
}

/// Trait for rendering backends.
///
/// A renderer reads the editor and never mutates it.
pub trait Renderer: Send + Sync {
    /// Build the draw commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
