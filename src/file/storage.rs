//! Scoped file storage.
//!
//! Files are addressed by a (folder, file name) pair and stored directly
//! under a fixed root:
//! ```text
//! {root}/
//! ├── projectA/
//! │   └── logo.png
//! └── projectB/
//!     └── banner.jpg
//! ```
//! Writes go to a temporary file in the target folder and are renamed into
//! place, so a reader never sees a half-written file under the final name.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::path::{contains_lexically, validate_name};
use crate::{PreviewError, Result};

/// File store confined to a single root directory.
#[derive(Debug, Clone)]
pub struct ScopedFileStore {
    /// Absolute root directory.
    root: PathBuf,
    /// Root with symlinks resolved, used for containment checks on disk.
    canonical_root: PathBuf,
}

impl ScopedFileStore {
    /// Create a new store rooted at `root`.
    ///
    /// A relative root is resolved against the current working directory.
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };

        fs::create_dir_all(&root)?;
        let canonical_root = fs::canonicalize(&root)?;

        Ok(Self {
            root,
            canonical_root,
        })
    }

    /// Get the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the path for a (folder, file name) pair without touching disk.
    ///
    /// Fails with [`PreviewError::Validation`] if either name is unusable or
    /// the joined path would leave the root.
    pub fn resolve(&self, folder_name: &str, file_name: &str) -> Result<PathBuf> {
        validate_name(folder_name, "folder name")?;
        validate_name(file_name, "file name")?;

        let path = self.root.join(folder_name).join(file_name);
        if !contains_lexically(&self.root, &path) {
            return Err(PreviewError::Validation(
                "path resolves outside the storage root".to_string(),
            ));
        }

        Ok(path)
    }

    /// Store `content` as `file_name` in `folder_name`, replacing any
    /// existing file.
    ///
    /// # Returns
    ///
    /// The absolute path of the written file.
    pub fn put(&self, folder_name: &str, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.resolve(folder_name, file_name)?;
        let folder_path = self.root.join(folder_name);

        fs::create_dir_all(&folder_path)?;
        self.ensure_inside_root(&folder_path)?;

        let temp_path = folder_path.join(format!(".{}.upload", Uuid::new_v4()));
        if let Err(e) = Self::write_and_rename(&temp_path, &file_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %file_path.display(), size = content.len(), "Stored file");
        Ok(file_path)
    }

    /// Delete `file_name` from `folder_name`.
    ///
    /// The folder itself is left in place even when it becomes empty.
    pub fn delete(&self, folder_name: &str, file_name: &str) -> Result<()> {
        let file_path = self.resolve(folder_name, file_name)?;
        let folder_path = self.root.join(folder_name);

        // A missing folder, or a plain file in its place, holds no entries
        if !folder_path.is_dir() {
            return Err(PreviewError::NotFound("File".to_string()));
        }
        self.ensure_inside_root(&folder_path)?;

        match fs::remove_file(&file_path) {
            Ok(()) => {
                tracing::debug!(path = %file_path.display(), "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(PreviewError::NotFound("File".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(test)]
    fn exists(&self, folder_name: &str, file_name: &str) -> bool {
        self.resolve(folder_name, file_name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Reject folders that are symlinks pointing out of the root.
    fn ensure_inside_root(&self, folder_path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(folder_path)?;
        if canonical.starts_with(&self.canonical_root) && canonical != self.canonical_root {
            Ok(())
        } else {
            Err(PreviewError::Validation(
                "folder resolves outside the storage root".to_string(),
            ))
        }
    }

    fn write_and_rename(temp_path: &Path, file_path: &Path, content: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        drop(file);

        fs::rename(temp_path, file_path)
    }
}
