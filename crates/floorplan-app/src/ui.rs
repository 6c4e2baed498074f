//! UI action surface: mode buttons, item palette, numeric inputs, zoom
//! controls, clear-all and the export actions.

use crate::palette::Palette;
use floorplan_core::{
    CostRecord, DesignModel, Editor, EditorMode, EntityEdit, EntityRef, OpeningKind, WallThickness,
};
use floorplan_render::GridStyle;
use serde::{Deserialize, Serialize};

/// Mode-select buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeButton {
    Select,
    Wall,
    Door,
    Window,
    Delete,
}

impl ModeButton {
    pub fn mode(self) -> EditorMode {
        match self {
            ModeButton::Select => EditorMode::Select,
            ModeButton::Wall => EditorMode::Wall,
            ModeButton::Door => EditorMode::Door,
            ModeButton::Window => EditorMode::Window,
            ModeButton::Delete => EditorMode::Delete,
        }
    }
}

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UiAction {
    /// Switch editor mode.
    SetMode { mode: ModeButton },
    /// Pick an item from the palette; the next click places it.
    PickItem { item: String },
    /// Wall thickness in millimeters.
    SetWallThickness { thickness: f64 },
    /// Directional thickness in millimeters: `x` for mostly horizontal
    /// walls, `y` for mostly vertical ones.
    SetWallThicknessPerAxis { x: f64, y: f64 },
    /// Wall height in millimeters.
    SetWallHeight { height: f64 },
    /// Opening size in millimeters.
    SetOpeningSize { opening: OpeningKind, width: f64, height: f64 },
    ZoomIn,
    ZoomOut,
    /// Zoom 100%, no pan.
    ZoomReset,
    /// Cycle the grid style.
    ToggleGrid,
    /// Ask to clear the plan. Nothing is removed until confirmed.
    RequestClearAll,
    ConfirmClearAll,
    CancelClearAll,
    /// Hand the design model to the 3D visualizer.
    ExportDesign,
    /// Hand the cost records to the cost estimator.
    CalculateCost,
}

/// What the shell has to do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum UiOutcome {
    /// Applied; nothing else to do.
    Handled,
    /// The action had no effect.
    Ignored,
    /// Clear-all is waiting for confirmation.
    ConfirmClearAll,
    /// The plan was cleared.
    Cleared,
    /// A design is ready for the visualizer.
    Export(DesignModel),
    /// Cost records are ready for the estimator.
    Costing(Vec<CostRecord>),
    /// The input was not accepted.
    Rejected(String),
}

/// UI state that lives outside the editor.
#[derive(Debug, Clone)]
pub struct UiState {
    pub palette: Palette,
    pub grid_style: GridStyle,
    /// Current zoom level (1.0 = 100%).
    pub zoom_level: f64,
    /// Clear-all was requested and awaits confirmation.
    pub clear_pending: bool,
    /// Palette entry picked for placement.
    pub picked_item: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl UiState {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            grid_style: GridStyle::Lines,
            zoom_level: 1.0,
            clear_pending: false,
            picked_item: None,
        }
    }

    /// One-line summary for a status bar.
    pub fn status_line(&self, editor: &Editor) -> String {
        let mut status = format!(
            "{} | {}% | {} walls, {} items",
            editor.mode().name(),
            editor.viewport.zoom_percent(),
            editor.document.walls().len(),
            editor.document.items().len()
        );
        if let Some(label) = editor.dimension_label() {
            status.push_str(" | ");
            status.push_str(&label);
        }
        if self.clear_pending {
            status.push_str(" | clear all? confirm or cancel");
        }
        status
    }
}

fn positive(value: f64, what: &str) -> Result<f64, UiOutcome> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(UiOutcome::Rejected(format!("{what} must be a positive number, got {value}")))
    }
}

/// New walls get this thickness, and so does a selected wall.
fn apply_wall_thickness(editor: &mut Editor, thickness: WallThickness) -> UiOutcome {
    editor.set_wall_thickness(thickness);
    editor.edit_selected(EntityEdit::WallThickness(thickness));
    UiOutcome::Handled
}

/// Apply a UI action to the editor.
pub fn apply_ui_action(editor: &mut Editor, ui: &mut UiState, action: UiAction) -> UiOutcome {
    log::debug!("UI action: {action:?}");
    let outcome = match action {
        UiAction::SetMode { mode } => {
            editor.set_mode(mode.mode());
            ui.picked_item = None;
            UiOutcome::Handled
        }
        UiAction::PickItem { item } => match ui.palette.get(&item) {
            Some(spec) => {
                editor.set_mode(EditorMode::Place(spec.clone()));
                ui.picked_item = Some(item);
                UiOutcome::Handled
            }
            None => UiOutcome::Rejected(format!("unknown palette item '{item}'")),
        },
        UiAction::SetWallThickness { thickness } => match positive(thickness, "wall thickness") {
            Ok(mm) => apply_wall_thickness(editor, WallThickness::Uniform(mm)),
            Err(rejected) => rejected,
        },
        UiAction::SetWallThicknessPerAxis { x, y } => {
            match (positive(x, "horizontal wall thickness"), positive(y, "vertical wall thickness")) {
                (Ok(x), Ok(y)) => apply_wall_thickness(editor, WallThickness::PerAxis { x, y }),
                (Err(rejected), _) | (_, Err(rejected)) => rejected,
            }
        }
        UiAction::SetWallHeight { height } => match positive(height, "wall height") {
            Ok(mm) => {
                editor.set_wall_height_mm(mm);
                editor.edit_selected(EntityEdit::WallHeight(mm));
                UiOutcome::Handled
            }
            Err(rejected) => rejected,
        },
        UiAction::SetOpeningSize { opening, width, height } => {
            match (positive(width, "opening width"), positive(height, "opening height")) {
                (Ok(width_mm), Ok(height_mm)) => {
                    editor.set_opening_size(opening, width_mm, height_mm);
                    let selected_kind = match editor.selection() {
                        Some(EntityRef::Opening(id)) => editor.document.opening(id).map(|o| o.kind),
                        _ => None,
                    };
                    if selected_kind == Some(opening) {
                        editor.edit_selected(EntityEdit::OpeningSize { width_mm, height_mm });
                    }
                    UiOutcome::Handled
                }
                (Err(rejected), _) | (_, Err(rejected)) => rejected,
            }
        }
        UiAction::ZoomIn => {
            editor.zoom_in();
            UiOutcome::Handled
        }
        UiAction::ZoomOut => {
            editor.zoom_out();
            UiOutcome::Handled
        }
        UiAction::ZoomReset => {
            editor.reset_zoom();
            UiOutcome::Handled
        }
        UiAction::ToggleGrid => {
            ui.grid_style = ui.grid_style.next();
            UiOutcome::Handled
        }
        UiAction::RequestClearAll => {
            if editor.document.is_empty() {
                UiOutcome::Ignored
            } else {
                ui.clear_pending = true;
                UiOutcome::ConfirmClearAll
            }
        }
        UiAction::ConfirmClearAll => {
            let confirmed = std::mem::take(&mut ui.clear_pending);
            if editor.clear_all(confirmed) {
                UiOutcome::Cleared
            } else {
                UiOutcome::Ignored
            }
        }
        UiAction::CancelClearAll => {
            if std::mem::take(&mut ui.clear_pending) {
                UiOutcome::Handled
            } else {
                UiOutcome::Ignored
            }
        }
        UiAction::ExportDesign => UiOutcome::Export(editor.export()),
        UiAction::CalculateCost => UiOutcome::Costing(editor.cost_records(&ui.palette.catalog())),
    };

    // The placed item returns the editor to select mode.
    if ui.picked_item.is_some() && !matches!(editor.mode(), EditorMode::Place(_)) {
        ui.picked_item = None;
    }
    ui.zoom_level = editor.viewport.zoom;
    outcome
}
