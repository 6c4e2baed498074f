//! Keyed store shared with the 3D visualizer and the costing page.
//!
//! Values are JSON strings. The plan is written under [`DESIGN_KEY`] and the
//! cost records under [`COSTING_KEY`].

mod memory;
mod publish;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use publish::{create_default_storage, DesignPublisher, PlatformStorage};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key of the exported design model.
pub const DESIGN_KEY: &str = "floorPlanDesign";

/// Key of the flat cost record list.
pub const COSTING_KEY: &str = "designItems";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A keyed store of JSON strings.
///
/// On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store `json` under `key`, replacing any previous value.
    fn save(&self, key: &str, json: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Read the value under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// A keyed store of JSON strings (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store `json` under `key`, replacing any previous value.
    fn save(&self, key: &str, json: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Read the value under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
