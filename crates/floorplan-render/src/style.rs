//! Entity colors.

use floorplan_core::OpeningKind;
use peniko::Color;

pub const WALL_COLOR: Color = Color::from_rgba8(0x7e, 0x8a, 0xa1, 255);
pub const DOOR_COLOR: Color = Color::from_rgba8(0x8a, 0x5a, 0x44, 255);
pub const WINDOW_COLOR: Color = Color::from_rgba8(0xa5, 0xd8, 0xff, 255);

/// Openings are drawn at 70% opacity.
pub const OPENING_ALPHA: u8 = 178;
pub const OPENING_OUTLINE: Color = Color::from_rgba8(0, 0, 0, 128);
pub const ITEM_OUTLINE: Color = Color::from_rgba8(0x66, 0x66, 0x66, 255);
pub const GRID_COLOR: Color = Color::from_rgba8(224, 224, 224, 255);
pub const DIMENSION_COLOR: Color = Color::from_rgba8(51, 51, 51, 255);

pub fn opening_color(kind: OpeningKind) -> Color {
    let base = match kind {
        OpeningKind::Door => DOOR_COLOR,
        OpeningKind::Window => WINDOW_COLOR,
    };
    let rgba = base.to_rgba8();
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, OPENING_ALPHA)
}

/// Fill for a placed item, by type tag.
pub fn item_color(kind: &str) -> Color {
    match kind {
        "base-cabinet" => Color::from_rgba8(139, 69, 19, 178),
        "wall-cabinet" => Color::from_rgba8(160, 82, 45, 178),
        "refrigerator" => Color::from_rgba8(220, 220, 220, 178),
        "oven" => Color::from_rgba8(100, 100, 100, 178),
        _ => Color::from_rgba8(200, 200, 200, 178),
    }
}

/// CSS `rgba(...)` for a color.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("rgba({},{},{},{:.2})", rgba.r, rgba.g, rgba.b, f64::from(rgba.a) / 255.0)
    }
}
