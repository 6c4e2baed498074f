//! SVG serialization of a display list.

use crate::display::{DisplayList, DrawCommand};
use crate::renderer::{GridStyle, RenderResult, RendererError};
use crate::style::css_color;
use std::fmt::Write as _;

/// Write a display list as a standalone SVG document.
pub fn to_svg(list: &DisplayList) -> RenderResult<String> {
    let (width, height) = (list.size.width, list.size.height);
    if !(width > 0.0 && height > 0.0) {
        return Err(RendererError::RenderFailed(format!("invalid surface size {width}x{height}")));
    }

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;

    for (index, command) in list.commands.iter().enumerate() {
        match command {
            DrawCommand::Clear(color) => {
                writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, css_color(*color))?;
            }
            DrawCommand::Grid {
                style,
                origin,
                cell_size,
                stroke_width,
                color,
            } => {
                let id = format!("grid{index}");
                let stroke = css_color(*color);
                writeln!(
                    out,
                    r#"<defs><pattern id="{id}" x="{}" y="{}" width="{cell_size}" height="{cell_size}" patternUnits="userSpaceOnUse">"#,
                    origin.x, origin.y
                )?;
                match style {
                    GridStyle::Lines => writeln!(
                        out,
                        r#"<path d="M {cell_size} 0 L 0 0 0 {cell_size}" fill="none" stroke="{stroke}" stroke-width="{stroke_width}"/>"#
                    )?,
                    GridStyle::Dots => writeln!(out, r#"<circle cx="0" cy="0" r="{stroke_width}" fill="{stroke}"/>"#)?,
                    GridStyle::None => {}
                }
                writeln!(out, r#"</pattern></defs><rect width="100%" height="100%" fill="url(#{id})"/>"#)?;
            }
            DrawCommand::Line { line, width, color } => {
                writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{width}" stroke-linecap="round"/>"#,
                    line.p0.x,
                    line.p0.y,
                    line.p1.x,
                    line.p1.y,
                    css_color(*color)
                )?;
            }
            DrawCommand::Path { path, fill, stroke } => {
                let fill = fill.map_or_else(|| "none".to_string(), css_color);
                write!(out, r#"<path d="{}" fill="{fill}""#, path.to_svg())?;
                if let Some((color, width)) = stroke {
                    write!(out, r#" stroke="{}" stroke-width="{width}""#, css_color(*color))?;
                }
                writeln!(out, "/>")?;
            }
            DrawCommand::Label { position, text, color } => {
                writeln!(
                    out,
                    r#"<text x="{}" y="{}" fill="{}" font-family="sans-serif" font-size="12" text-anchor="middle">{}</text>"#,
                    position.x,
                    position.y,
                    css_color(*color),
                    escape(text)
                )?;
            }
        }
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
