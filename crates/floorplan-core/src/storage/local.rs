//! Browser `localStorage` backend for WebAssembly.

use super::{BoxFuture, Storage, StorageError, StorageResult};

/// Stores each key directly in `window.localStorage`, where the 3D view and
/// the costing page read it.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn store() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, json: &str) -> BoxFuture<'_, StorageResult<()>> {
        let result = Self::store().and_then(|store| {
            store
                .set_item(key, json)
                .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
        });
        Box::pin(async move { result })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>> {
        let result = Self::store().and_then(|store| {
            store
                .get_item(key)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?
                .ok_or_else(|| StorageError::NotFound(key.to_string()))
        });
        Box::pin(async move { result })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let result = Self::store().and_then(|store| {
            store
                .remove_item(key)
                .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
        });
        Box::pin(async move { result })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let result = Self::store().and_then(|store| {
            let len = store
                .length()
                .map_err(|e| StorageError::Io(format!("Failed to read length: {:?}", e)))?;
            let mut keys = Vec::with_capacity(len as usize);
            for index in 0..len {
                if let Ok(Some(key)) = store.key(index) {
                    keys.push(key);
                }
            }
            Ok(keys)
        });
        Box::pin(async move { result })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let result = Self::store().and_then(|store| {
            store
                .get_item(key)
                .map(|value| value.is_some())
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))
        });
        Box::pin(async move { result })
    }
}
