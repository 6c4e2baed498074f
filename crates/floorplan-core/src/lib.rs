//! Floor-plan editor core.
//!
//! Platform-agnostic geometry, snapping, gesture handling and export for the
//! 2D floor-plan editor.

pub mod catalog;
pub mod config;
pub mod costing;
pub mod document;
pub mod editor;
pub mod export;
pub mod frame;
pub mod input;
pub mod model;
pub mod snap;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use catalog::{Catalog, ItemSpec};
pub use config::{AnglePolicy, ConfigError, EditorConfig, GRID_SIZE, SCALE};
pub use costing::{cost_records, CostRecord};
pub use document::PlanDocument;
pub use editor::{Editor, EditorSettings, EntityEdit};
pub use export::{DesignModel, ExportError};
pub use frame::{RenderScheduler, ResizeDebouncer};
pub use input::{InputEvent, InputState, Modifiers, MouseButton};
pub use model::{EntityId, EntityRef, Item, Opening, OpeningKind, Wall, WallThickness};
pub use snap::{SnapEngine, SnapResult, SnapSource};
pub use storage::{DesignPublisher, Storage, StorageError, StorageResult};
pub use tools::{Cursor, EditorMode, ToolManager};
pub use viewport::Viewport;
