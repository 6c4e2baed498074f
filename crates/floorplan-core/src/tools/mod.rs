//! Editor modes and the gesture transition table.
//!
//! [`transition`] is pure: given the mode, the gesture state and an input
//! event it returns the next gesture state and the effects to apply. The
//! [`Editor`](crate::editor::Editor) carries the effects out.

use crate::catalog::ItemSpec;
use crate::input::{InputEvent, MouseButton, Modifiers};
use crate::model::{OpeningKind, Wall, WallThickness};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What a primary-button press does.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "item", rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Select,
    Wall,
    Door,
    Window,
    Delete,
    /// Place one catalog item, then return to select.
    Place(ItemSpec),
}

impl EditorMode {
    pub fn name(&self) -> &'static str {
        match self {
            EditorMode::Select => "select",
            EditorMode::Wall => "wall",
            EditorMode::Door => "door",
            EditorMode::Window => "window",
            EditorMode::Delete => "delete",
            EditorMode::Place(_) => "place",
        }
    }

    pub fn cursor(&self) -> Cursor {
        match self {
            EditorMode::Select => Cursor::Default,
            EditorMode::Wall | EditorMode::Door | EditorMode::Window | EditorMode::Place(_) => Cursor::Crosshair,
            EditorMode::Delete => Cursor::Pointer,
        }
    }

    /// Whether committed entities react to the pointer in this mode.
    pub fn entities_interactive(&self) -> bool {
        matches!(self, EditorMode::Select | EditorMode::Delete)
    }

    /// The opening kind placed by this mode, if any.
    pub fn opening_kind(&self) -> Option<OpeningKind> {
        match self {
            EditorMode::Door => Some(OpeningKind::Door),
            EditorMode::Window => Some(OpeningKind::Window),
            _ => None,
        }
    }
}

/// Pointer cursor shown over the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
    Pointer,
    Grabbing,
}

impl Cursor {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Crosshair => "crosshair",
            Cursor::Pointer => "pointer",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Primary-button gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    DrawingWall,
    DraggingSelection,
}

/// Gesture state. Panning is orthogonal to the primary gesture so a draft
/// survives a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    pub phase: Phase,
    /// Button holding the pan. Only its release ends the pan.
    pub pan_button: Option<MouseButton>,
}

impl GestureState {
    pub const IDLE: GestureState = GestureState {
        phase: Phase::Idle,
        pan_button: None,
    };

    pub fn is_panning(&self) -> bool {
        self.pan_button.is_some()
    }

    fn with_phase(self, phase: Phase) -> Self {
        Self { phase, ..self }
    }

    fn with_pan_button(self, pan_button: Option<MouseButton>) -> Self {
        Self { pan_button, ..self }
    }
}

/// A state change requested by the transition table. Points are in screen
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    BeginPan(Point),
    /// Pan by the pointer movement that ended at this point.
    PanBy(Point),
    EndPan,
    BeginWall(Point),
    UpdateWall(Point),
    FinalizeWall(Point),
    CancelDraft,
    PlaceOpening { kind: OpeningKind, at: Point },
    DeleteAt(Point),
    PlaceItem { spec: ItemSpec, at: Point },
    SetMode(EditorMode),
    SelectAt(Point),
    DragSelection(Point),
    EndDrag,
    ZoomAt { at: Point, delta_y: f64 },
    DeleteSelection,
    ClearSelection,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: GestureState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: GestureState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }

    fn to(next: GestureState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }
}

/// Whether a press starts a pan instead of the mode's gesture.
pub fn is_pan_press(button: MouseButton, modifiers: Modifiers) -> bool {
    button != MouseButton::Left || modifiers.ctrl
}

/// The gesture transition table.
///
/// Every event is handled in every state. Combinations with nothing to do
/// (a release with no gesture, a move while idle) return no effects.
pub fn transition(mode: &EditorMode, state: GestureState, event: &InputEvent) -> Transition {
    match event {
        InputEvent::PointerDown {
            position,
            button,
            modifiers,
        } => {
            if state.is_panning() {
                return Transition::stay(state);
            }
            if is_pan_press(*button, *modifiers) {
                return Transition::to(state.with_pan_button(Some(*button)), vec![Effect::BeginPan(*position)]);
            }
            pointer_down(mode, state, *position)
        }
        InputEvent::PointerMove { position } => {
            if state.is_panning() {
                return Transition::to(state, vec![Effect::PanBy(*position)]);
            }
            match state.phase {
                Phase::Idle => Transition::stay(state),
                Phase::DrawingWall => Transition::to(state, vec![Effect::UpdateWall(*position)]),
                Phase::DraggingSelection => Transition::to(state, vec![Effect::DragSelection(*position)]),
            }
        }
        InputEvent::PointerUp { position, button } => {
            if state.pan_button == Some(*button) {
                return Transition::to(state.with_pan_button(None), vec![Effect::EndPan]);
            }
            // A left release during a right or middle pan still ends the primary gesture.
            if *button != MouseButton::Left {
                return Transition::stay(state);
            }
            match state.phase {
                Phase::Idle => Transition::stay(state),
                Phase::DrawingWall => {
                    Transition::to(state.with_phase(Phase::Idle), vec![Effect::FinalizeWall(*position)])
                }
                Phase::DraggingSelection => Transition::to(state.with_phase(Phase::Idle), vec![Effect::EndDrag]),
            }
        }
        InputEvent::Wheel { position, delta_y } => Transition::to(
            state,
            vec![Effect::ZoomAt {
                at: *position,
                delta_y: *delta_y,
            }],
        ),
        InputEvent::Key { key, .. } => key_press(mode, state, key),
    }
}

fn pointer_down(mode: &EditorMode, state: GestureState, at: Point) -> Transition {
    match mode {
        EditorMode::Select => Transition::to(state.with_phase(Phase::DraggingSelection), vec![Effect::SelectAt(at)]),
        EditorMode::Wall => {
            let mut effects = Vec::with_capacity(2);
            if state.phase == Phase::DrawingWall {
                effects.push(Effect::CancelDraft);
            }
            effects.push(Effect::BeginWall(at));
            Transition::to(state.with_phase(Phase::DrawingWall), effects)
        }
        EditorMode::Door => Transition::to(
            state,
            vec![Effect::PlaceOpening {
                kind: OpeningKind::Door,
                at,
            }],
        ),
        EditorMode::Window => Transition::to(
            state,
            vec![Effect::PlaceOpening {
                kind: OpeningKind::Window,
                at,
            }],
        ),
        EditorMode::Delete => Transition::to(state, vec![Effect::DeleteAt(at)]),
        EditorMode::Place(spec) => Transition::to(
            state,
            vec![
                Effect::PlaceItem {
                    spec: spec.clone(),
                    at,
                },
                Effect::SetMode(EditorMode::Select),
            ],
        ),
    }
}

fn key_press(mode: &EditorMode, state: GestureState, key: &str) -> Transition {
    match key {
        "Escape" if state.phase == Phase::DrawingWall => {
            Transition::to(state.with_phase(Phase::Idle), vec![Effect::CancelDraft])
        }
        "Escape" if *mode == EditorMode::Select => Transition::to(
            state.with_phase(Phase::Idle),
            vec![Effect::ClearSelection],
        ),
        "Delete" | "Backspace" if *mode == EditorMode::Select => {
            Transition::to(state.with_phase(Phase::Idle), vec![Effect::DeleteSelection])
        }
        _ => Transition::stay(state),
    }
}

/// Current mode, gesture state and the in-progress draft.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    mode: EditorMode,
    gesture: GestureState,
    /// Wall under construction, in scene units.
    draft: Option<Wall>,
    /// Last snapped scene point of a selection drag.
    pub drag_anchor: Option<Point>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Switch mode. Any draft and drag are dropped; an active pan survives.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.draft = None;
        self.drag_anchor = None;
        self.gesture = GestureState::IDLE.with_pan_button(self.gesture.pan_button);
    }

    /// Run the transition table and adopt the next state.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Effect> {
        let Transition { next, effects } = transition(&self.mode, self.gesture, event);
        self.gesture = next;
        effects
    }

    /// End the primary gesture without touching the pan flag.
    pub fn reset_phase(&mut self) {
        self.gesture.phase = Phase::Idle;
    }

    pub fn cursor(&self) -> Cursor {
        if self.gesture.is_panning() {
            Cursor::Grabbing
        } else {
            self.mode.cursor()
        }
    }

    pub fn draft(&self) -> Option<&Wall> {
        self.draft.as_ref()
    }

    /// Start a zero-length draft.
    pub fn begin_draft(&mut self, start: Point, thickness: WallThickness, height_mm: f64) {
        self.draft = Some(Wall::new(start, start, thickness).with_height(height_mm));
    }

    /// Move the draft's far end. Directional thickness follows automatically.
    pub fn update_draft(&mut self, end: Point) {
        if let Some(draft) = self.draft.as_mut() {
            draft.end = end;
        }
    }

    pub fn take_draft(&mut self) -> Option<Wall> {
        self.draft.take()
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }
}
