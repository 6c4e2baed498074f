//! WebAssembly entry point and the browser-facing editor handle.

use crate::{App, AppConfig, UiAction, UiOutcome};
use floorplan_core::frame::Instant;
use floorplan_core::storage::{DesignPublisher, LocalStorage};
use floorplan_core::{DesignModel, InputEvent};
use kurbo::Size;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Editor handle driven by the host page. Events, actions and designs
/// cross the boundary as JSON strings.
#[wasm_bindgen]
pub struct WebEditor {
    app: App,
}

#[wasm_bindgen]
impl WebEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebEditor, JsValue> {
        let config = match config_json {
            Some(json) => AppConfig::from_json(&json).map_err(js_error)?,
            None => AppConfig::default(),
        };
        Ok(Self { app: App::new(config) })
    }

    /// Feed one input event.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<(), JsValue> {
        let event: InputEvent = serde_json::from_str(event_json).map_err(js_error)?;
        let outcome = self.app.handle_event(&event);
        self.after(outcome);
        Ok(())
    }

    /// Apply a UI action. Returns false when the action was rejected or ignored.
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<bool, JsValue> {
        let action: UiAction = serde_json::from_str(action_json).map_err(js_error)?;
        let outcome = self.app.apply(action);
        Ok(self.after(outcome))
    }

    /// Queue a container resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.app.editor.resize(Size::new(width, height), Instant::now());
    }

    /// Advance timers. Returns true when the host should redraw.
    pub fn tick(&mut self) -> bool {
        self.app.editor.tick(Instant::now()) | self.app.editor.take_render_request()
    }

    pub fn cursor(&self) -> String {
        self.app.editor.cursor().css_name().to_string()
    }

    pub fn status(&self) -> String {
        self.app.status_line()
    }

    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> Result<String, JsValue> {
        self.app.render_svg().map_err(js_error)
    }

    #[wasm_bindgen(js_name = exportDesign)]
    pub fn export_design(&self) -> Result<String, JsValue> {
        self.app.editor.export().to_json().map_err(js_error)
    }

    /// Replace the plan with a design. Malformed input leaves an empty plan.
    #[wasm_bindgen(js_name = importDesign)]
    pub fn import_design(&mut self, design_json: &str) {
        self.app.editor.import(DesignModel::from_json_or_empty(Some(design_json)));
    }
}

impl WebEditor {
    /// Publish after export or costing requests, and after any model change.
    fn after(&mut self, outcome: UiOutcome) -> bool {
        let requested = matches!(outcome, UiOutcome::Export(_) | UiOutcome::Costing(_));
        if requested || self.app.editor.take_model_changed() {
            self.publish();
        }
        !matches!(outcome, UiOutcome::Rejected(_) | UiOutcome::Ignored)
    }

    fn publish(&self) {
        let editor = self.app.editor.clone();
        let catalog = self.app.ui.palette.catalog();
        wasm_bindgen_futures::spawn_local(async move {
            let mut publisher = DesignPublisher::new(Arc::new(LocalStorage::new()));
            publisher.mark_dirty();
            if let Err(e) = publisher.publish(&editor, &catalog).await {
                log::error!("Failed to publish design: {}", e);
            }
        });
    }
}

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Floor-plan editor loaded (WASM)");
}
