//! Publishing the design and its cost records to the shared store.

use crate::catalog::Catalog;
use crate::costing::CostRecord;
use crate::editor::Editor;
use crate::export::DesignModel;
use crate::storage::{Storage, StorageError, StorageResult, COSTING_KEY, DESIGN_KEY};
use std::sync::Arc;

/// Writes the design model and cost records whenever the plan has changed.
pub struct DesignPublisher<S: Storage> {
    storage: Arc<S>,
    /// Whether the plan changed since the last publish.
    dirty: bool,
    publish_count: u64,
}

impl<S: Storage> DesignPublisher<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            dirty: false,
            publish_count: 0,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Pick up model changes from the editor.
    pub fn track(&mut self, editor: &mut Editor) {
        if editor.take_model_changed() {
            self.mark_dirty();
        }
    }

    /// Number of successful publishes so far.
    pub fn publish_count(&self) -> u64 {
        self.publish_count
    }

    /// Write both keys now.
    pub async fn publish(&mut self, editor: &Editor, catalog: &Catalog) -> StorageResult<()> {
        let design = editor
            .export()
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let records = serde_json::to_string(&editor.cost_records(catalog))
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.storage.save(DESIGN_KEY, &design).await?;
        self.storage.save(COSTING_KEY, &records).await?;

        self.dirty = false;
        self.publish_count += 1;
        log::info!(
            "Published design ({} walls, {} items)",
            editor.document.walls().len(),
            editor.document.items().len()
        );
        Ok(())
    }

    /// Publish only if something changed. Returns true if a publish happened.
    pub async fn maybe_publish(&mut self, editor: &Editor, catalog: &Catalog) -> StorageResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.publish(editor, catalog).await?;
        Ok(true)
    }

    /// The stored design, or an empty one if it is missing or unreadable.
    pub async fn load_design(&self) -> DesignModel {
        match self.storage.load(DESIGN_KEY).await {
            Ok(json) => DesignModel::from_json_or_empty(Some(&json)),
            Err(StorageError::NotFound(_)) => DesignModel::default(),
            Err(e) => {
                log::warn!("Could not read stored design: {}", e);
                DesignModel::default()
            }
        }
    }

    /// The stored cost records, or none if missing or unreadable.
    pub async fn load_cost_records(&self) -> Vec<CostRecord> {
        let json = match self.storage.load(COSTING_KEY).await {
            Ok(json) => json,
            Err(StorageError::NotFound(_)) => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read stored cost records: {}", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring stored cost records: {}", e);
            Vec::new()
        })
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::LocalStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()))
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::LocalStorage;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::storage::MemoryStorage;
    use pollster::block_on;
    use crate::tools::EditorMode;

    fn editor_with_wall() -> Editor {
        let mut editor = Editor::new();
        editor.set_mode(EditorMode::Wall);
        editor.handle_event(&InputEvent::down(0.0, 0.0));
        editor.handle_event(&InputEvent::moved(200.0, 0.0));
        editor.handle_event(&InputEvent::up(200.0, 0.0));
        editor
    }

    #[test]
    fn test_publisher_tracks_changes() {
        let mut publisher = DesignPublisher::new(Arc::new(MemoryStorage::new()));
        let mut editor = editor_with_wall();
        assert!(!publisher.is_dirty());
        publisher.track(&mut editor);
        assert!(publisher.is_dirty());
        publisher.track(&mut editor);
        assert!(publisher.is_dirty());
    }

    #[test]
    fn test_publish_writes_both_keys() {
        let storage = Arc::new(MemoryStorage::new());
        let mut publisher = DesignPublisher::new(storage.clone());
        let mut editor = editor_with_wall();
        let catalog = Catalog::new().with("wall", 50.0);

        publisher.track(&mut editor);
        assert!(block_on(publisher.maybe_publish(&editor, &catalog)).unwrap());
        assert!(!publisher.is_dirty());
        assert!(!block_on(publisher.maybe_publish(&editor, &catalog)).unwrap());
        assert_eq!(publisher.publish_count(), 1);

        let costing = block_on(storage.load(COSTING_KEY)).unwrap();
        assert_eq!(costing, r#"[{"type":"wall","cost":50.0,"finish":"default"}]"#);

        let design = block_on(publisher.load_design());
        assert_eq!(design.walls.len(), 1);
        assert_eq!(block_on(publisher.load_cost_records()).len(), 1);
    }

    #[test]
    fn test_missing_or_malformed_design_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let publisher = DesignPublisher::new(storage.clone());
        assert!(block_on(publisher.load_design()).is_empty());

        block_on(storage.save(DESIGN_KEY, "{ not json")).unwrap();
        block_on(storage.save(COSTING_KEY, "42")).unwrap();
        assert!(block_on(publisher.load_design()).is_empty());
        assert!(block_on(publisher.load_cost_records()).is_empty());
    }
}
