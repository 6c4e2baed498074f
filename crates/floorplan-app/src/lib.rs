//! Floor-plan Application
//!
//! The application shell: UI actions, keyboard shortcuts, the item palette,
//! configuration and session replay around the editor core.

mod app;
mod palette;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, ReplayReport, Session, SessionStep};
pub use palette::{Palette, DOOR_COST, WALL_COST, WINDOW_COST};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{apply_ui_action, ModeButton, UiAction, UiOutcome, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{run_wasm, WebEditor};
