//! Keyboard shortcut registry and documentation.

use crate::ui::{ModeButton, UiAction};
use floorplan_core::Modifiers;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    /// `None` for keys the editor handles itself.
    pub action: Option<UiAction>,
}

impl Shortcut {
    pub fn new(key: &'static str, ctrl: bool, shift: bool, description: &'static str, action: Option<UiAction>) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+E").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == (modifiers.ctrl || modifiers.meta) && self.shift == modifiers.shift
    }
}

fn mode(mode: ModeButton) -> Option<UiAction> {
    Some(UiAction::SetMode { mode })
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("V", false, false, "Select mode", mode(ModeButton::Select)),
            Shortcut::new("W", false, false, "Wall mode", mode(ModeButton::Wall)),
            Shortcut::new("D", false, false, "Door mode", mode(ModeButton::Door)),
            Shortcut::new("N", false, false, "Window mode", mode(ModeButton::Window)),
            Shortcut::new("X", false, false, "Delete mode", mode(ModeButton::Delete)),
            Shortcut::new("+", false, false, "Zoom in", Some(UiAction::ZoomIn)),
            Shortcut::new("=", false, false, "Zoom in", Some(UiAction::ZoomIn)),
            Shortcut::new("-", false, false, "Zoom out", Some(UiAction::ZoomOut)),
            Shortcut::new("0", false, false, "Reset zoom", Some(UiAction::ZoomReset)),
            Shortcut::new("G", false, false, "Cycle grid style", Some(UiAction::ToggleGrid)),
            Shortcut::new("E", true, false, "Export design to 3D", Some(UiAction::ExportDesign)),
            Shortcut::new("Delete", false, false, "Delete selection", None),
            Shortcut::new("Backspace", false, false, "Delete selection", None),
            Shortcut::new("Escape", false, false, "Cancel the wall being drawn", None),
            Shortcut::new("Ctrl+Drag", false, false, "Pan the view", None),
        ]
    }

    /// The action bound to a key press, if any.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .and_then(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_keys() {
        assert_eq!(
            ShortcutRegistry::lookup("w", Modifiers::NONE),
            Some(UiAction::SetMode { mode: ModeButton::Wall })
        );
        assert_eq!(
            ShortcutRegistry::lookup("N", Modifiers::NONE),
            Some(UiAction::SetMode { mode: ModeButton::Window })
        );
    }

    #[test]
    fn test_ctrl_e_exports() {
        assert_eq!(ShortcutRegistry::lookup("e", Modifiers::CTRL), Some(UiAction::ExportDesign));
        assert_eq!(ShortcutRegistry::lookup("e", Modifiers::NONE), None);
        assert_eq!(ShortcutRegistry::lookup("w", Modifiers::CTRL), None);
    }

    #[test]
    fn test_editor_keys_have_no_action() {
        assert_eq!(ShortcutRegistry::lookup("Escape", Modifiers::NONE), None);
        assert_eq!(ShortcutRegistry::lookup("Delete", Modifiers::NONE), None);
    }

    #[test]
    fn test_format() {
        let shortcut = Shortcut::new("E", true, false, "Export", None);
        assert_eq!(shortcut.format(), "Ctrl+E");
    }
}
