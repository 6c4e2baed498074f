//! Application shell: configuration, the editor with its UI state, and
//! headless replay of recorded sessions.

use crate::palette::Palette;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{apply_ui_action, UiAction, UiOutcome, UiState};
use floorplan_core::storage::{DesignPublisher, Storage, StorageError, StorageResult};
use floorplan_core::{ConfigError, Editor, EditorConfig, InputEvent};
use floorplan_render::{to_svg, DisplayListRenderer, RenderContext, Renderer, RendererError};
use kurbo::Size;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory of the shared store. `None` uses the platform default.
    pub data_dir: Option<PathBuf>,
    pub editor: EditorConfig,
    pub palette: Palette,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Floor Plan".to_string(),
            width: 1280,
            height: 800,
            data_dir: None,
            editor: EditorConfig::default(),
            palette: Palette::kitchen(),
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.editor.validate()?;
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport size must be non-zero, got {}x{}",
                config.width, config.height
            )));
        }
        Ok(config)
    }

    /// Load from a file, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = read_file(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn viewport_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

fn read_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// One recorded step: a UI action or a raw input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionStep {
    Action(UiAction),
    Event(InputEvent),
}

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub steps: Vec<SessionStep>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = read_file(path)?;
        Self::from_json(&json).map_err(|source| AppError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Summary of a replayed session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub steps: usize,
    pub rejected: Vec<String>,
    /// An export or cost calculation was requested.
    pub publish_requested: bool,
}

/// The editor together with its UI state.
pub struct App {
    pub config: AppConfig,
    pub editor: Editor,
    pub ui: UiState,
    background: Color,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut editor = Editor::with_config(config.editor.clone());
        editor.viewport.resize(config.viewport_size());
        let ui = UiState::new(config.palette.clone());
        Self {
            config,
            editor,
            ui,
            background: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Apply a UI action.
    pub fn apply(&mut self, action: UiAction) -> UiOutcome {
        apply_ui_action(&mut self.editor, &mut self.ui, action)
    }

    /// Route an input event. Bound keys become UI actions; everything else
    /// goes to the editor.
    pub fn handle_event(&mut self, event: &InputEvent) -> UiOutcome {
        if let InputEvent::Key { key, modifiers } = event {
            if let Some(action) = ShortcutRegistry::lookup(key, *modifiers) {
                return self.apply(action);
            }
        }
        self.editor.handle_event(event);
        UiOutcome::Handled
    }

    /// Feed every step of a session.
    pub fn replay(&mut self, session: &Session) -> ReplayReport {
        let mut report = ReplayReport::default();
        for step in &session.steps {
            let outcome = match step {
                SessionStep::Action(action) => self.apply(action.clone()),
                SessionStep::Event(event) => self.handle_event(event),
            };
            match outcome {
                UiOutcome::Export(_) | UiOutcome::Costing(_) => report.publish_requested = true,
                UiOutcome::Rejected(reason) => {
                    log::warn!("Step {} rejected: {}", report.steps, reason);
                    report.rejected.push(reason);
                }
                _ => {}
            }
            report.steps += 1;
        }
        log::info!("Replayed {} steps", report.steps);
        report
    }

    /// Publish design and cost records if the plan changed since the last publish.
    pub async fn publish<S: Storage>(&mut self, publisher: &mut DesignPublisher<S>) -> StorageResult<bool> {
        publisher.track(&mut self.editor);
        publisher.maybe_publish(&self.editor, &self.ui.palette.catalog()).await
    }

    /// Render the current frame as SVG.
    pub fn render_svg(&self) -> Result<String, AppError> {
        let mut renderer = DisplayListRenderer::new();
        let ctx = RenderContext::new(&self.editor)
            .with_background(self.background)
            .with_grid(self.ui.grid_style);
        renderer.build_scene(&ctx);
        Ok(to_svg(renderer.display_list())?)
    }

    pub fn status_line(&self) -> String {
        self.ui.status_line(&self.editor)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl App {
    /// Open the file store named by the config.
    pub fn open_storage(&self) -> Result<floorplan_core::storage::FileStorage, AppError> {
        use floorplan_core::storage::FileStorage;
        let storage = match &self.config.data_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::debug!("Using store at {}", storage.base_path().display());
        Ok(storage)
    }
}
