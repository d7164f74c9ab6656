//! API handlers for the preview store.

pub mod file;

pub use file::*;

use crate::file::ScopedFileStore;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Scoped file store for uploaded previews.
    pub store: ScopedFileStore,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: ScopedFileStore, max_upload_size: u64) -> Self {
        Self {
            store,
            max_upload_size,
        }
    }
}
