//! Floor-plan Render Library
//!
//! Renderer abstraction for the floor-plan editor. The bundled
//! implementation projects the editor into a screen-space display list
//! that can be written out as SVG.

mod display;
mod renderer;
pub mod style;
mod svg;

pub use display::{DisplayList, DisplayListRenderer, DrawCommand};
pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};
pub use svg::to_svg;
