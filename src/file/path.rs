//! Name validation and path containment for the scoped file store.
//!
//! Folder and file names are single path components. Anything that could
//! walk out of the root (separators, `..`, absolute paths) is rejected
//! rather than rewritten.

use std::path::{Component, Path};

use crate::{PreviewError, Result};

/// Maximum length of a single name component, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validate a single folder or file name component.
///
/// `kind` is used in the error message ("folder name", "file name").
pub fn validate_name(name: &str, kind: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PreviewError::Validation(format!("{kind} is empty")));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(PreviewError::Validation(format!(
            "{kind} is too long (max {MAX_NAME_LENGTH} bytes)"
        )));
    }

    if name == "." || name == ".." {
        return Err(PreviewError::Validation(format!(
            "{kind} must not be a relative path segment"
        )));
    }

    if name.contains(['/', '\\']) {
        return Err(PreviewError::Validation(format!(
            "{kind} must not contain path separators"
        )));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(PreviewError::Validation(format!(
            "{kind} must not contain control characters"
        )));
    }

    Ok(())
}

/// Strip any client-side directory part from an uploaded filename.
///
/// Browsers occasionally send the full client path (`C:\Users\me\a.png`);
/// only the last component is kept. The result still has to pass
/// [`validate_name`].
pub fn client_file_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw)
}

/// Check that `path` lies lexically under `root`.
///
/// Every component after the root prefix must be a plain name.
pub fn contains_lexically(root: &Path, path: &Path) -> bool {
    match path.strip_prefix(root) {
        Ok(rest) => {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        }
        Err(_) => false,
    }
}
