//! File storage module for the preview store.
//!
//! This module provides the scoped file store:
//! - Folder and file name validation
//! - Lexical and on-disk containment under a fixed root
//! - Atomic save and delete operations

pub mod path;
mod storage;

pub use path::{client_file_name, validate_name, MAX_NAME_LENGTH};
pub use storage::ScopedFileStore;

/// Default storage directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "preview";
